// src/backend/editor/draft.rs
// In-memory working copy of one invitation.

use crate::editor::collection::OrderedCollection;
use crate::models::{Ceremony, FamilyMember, InvitationPayload, DEFAULT_TEMPLATE_TYPE, DEFAULT_THEME_COLOR};
use crate::utils::slug::normalize_slug;

/// Flat text fields of the draft, named by their payload field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    Slug,
    GroomName,
    BrideName,
    WeddingDate,
    WeddingTime,
    VenueName,
    VenueAddress,
    VenueMapLink,
    VenueMapEmbedLink,
    CoverImageUrl,
    LoveStory,
    ThankYouMessage,
    VideoUrl,
    TemplateType,
    ThemeColor,
    BackgroundMusicUrl,
}

impl TextField {
    /// Fields that must be non-empty before a save writes anything, in form order.
    pub const REQUIRED: [TextField; 7] = [
        TextField::Slug,
        TextField::GroomName,
        TextField::BrideName,
        TextField::WeddingDate,
        TextField::WeddingTime,
        TextField::VenueName,
        TextField::VenueAddress,
    ];

    pub fn payload_name(self) -> &'static str {
        match self {
            TextField::Slug => "slug",
            TextField::GroomName => "groom_name",
            TextField::BrideName => "bride_name",
            TextField::WeddingDate => "wedding_date",
            TextField::WeddingTime => "wedding_time",
            TextField::VenueName => "venue_name",
            TextField::VenueAddress => "venue_address",
            TextField::VenueMapLink => "venue_map_link",
            TextField::VenueMapEmbedLink => "venue_map_embed_link",
            TextField::CoverImageUrl => "cover_image_url",
            TextField::LoveStory => "love_story",
            TextField::ThankYouMessage => "thank_you_message",
            TextField::VideoUrl => "video_url",
            TextField::TemplateType => "template_type",
            TextField::ThemeColor => "theme_color",
            TextField::BackgroundMusicUrl => "background_music_url",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FamilySide {
    Groom,
    Bride,
}

/// One gallery position. Empty while its upload is pending or after it failed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GallerySlot {
    pub image_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct DraftRecord {
    pub slug: String,
    pub groom_name: String,
    pub bride_name: String,
    pub wedding_date: String,
    pub wedding_time: String,
    pub venue_name: String,
    pub venue_address: String,
    pub venue_map_link: String,
    pub venue_map_embed_link: String,
    pub cover_image_url: String,
    pub love_story: String,
    pub thank_you_message: String,
    pub video_url: String,
    pub template_type: String,
    pub theme_color: String,
    pub background_music_url: String,
    pub is_published: bool,
    pub love_story_images: Vec<String>,
    pub groom_family: OrderedCollection<FamilyMember>,
    pub bride_family: OrderedCollection<FamilyMember>,
    pub ceremonies: OrderedCollection<Ceremony>,
    pub gallery: OrderedCollection<GallerySlot>,
}

impl Default for DraftRecord {
    fn default() -> Self {
        Self {
            slug: String::new(),
            groom_name: String::new(),
            bride_name: String::new(),
            wedding_date: String::new(),
            wedding_time: String::new(),
            venue_name: String::new(),
            venue_address: String::new(),
            venue_map_link: String::new(),
            venue_map_embed_link: String::new(),
            cover_image_url: String::new(),
            love_story: String::new(),
            thank_you_message: String::new(),
            video_url: String::new(),
            template_type: DEFAULT_TEMPLATE_TYPE.to_string(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            background_music_url: String::new(),
            is_published: false,
            love_story_images: Vec::new(),
            groom_family: OrderedCollection::new(),
            bride_family: OrderedCollection::new(),
            ceremonies: OrderedCollection::new(),
            gallery: OrderedCollection::new(),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl DraftRecord {
    /// Hydrates a draft from a stored payload, keeping every array's order.
    pub fn from_payload(payload: InvitationPayload) -> Self {
        // Older records hold a full timestamp; the editor works on the date part.
        let wedding_date = payload.wedding_date.split('T').next().unwrap_or_default().to_string();
        Self {
            slug: payload.slug,
            groom_name: payload.groom_name,
            bride_name: payload.bride_name,
            wedding_date,
            wedding_time: payload.wedding_time,
            venue_name: payload.venue_name,
            venue_address: payload.venue_address,
            venue_map_link: payload.venue_map_link.unwrap_or_default(),
            venue_map_embed_link: payload.venue_map_embed_link.unwrap_or_default(),
            cover_image_url: payload.cover_image_url.unwrap_or_default(),
            love_story: payload.love_story.unwrap_or_default(),
            thank_you_message: payload.thank_you_message.unwrap_or_default(),
            video_url: payload.video_url.unwrap_or_default(),
            template_type: payload.template_type,
            theme_color: payload.theme_color,
            background_music_url: payload.background_music_url.unwrap_or_default(),
            is_published: payload.is_published,
            love_story_images: payload.love_story_images,
            groom_family: OrderedCollection::from_ordered_list(payload.groom_family),
            bride_family: OrderedCollection::from_ordered_list(payload.bride_family),
            ceremonies: OrderedCollection::from_ordered_list(payload.ceremonies),
            gallery: OrderedCollection::from_ordered_list(
                payload
                    .gallery_images
                    .into_iter()
                    .map(|url| GallerySlot { image_url: Some(url) }),
            ),
        }
    }

    /// Serializes the whole draft: flat fields plus every collection in
    /// current position order. Empty optional fields and empty gallery slots
    /// are left out.
    pub fn to_payload(&self) -> InvitationPayload {
        InvitationPayload {
            slug: normalize_slug(self.slug.trim()),
            groom_name: self.groom_name.trim().to_string(),
            bride_name: self.bride_name.trim().to_string(),
            wedding_date: self.wedding_date.trim().to_string(),
            wedding_time: self.wedding_time.trim().to_string(),
            venue_name: self.venue_name.trim().to_string(),
            venue_address: self.venue_address.trim().to_string(),
            venue_map_link: optional(&self.venue_map_link),
            venue_map_embed_link: optional(&self.venue_map_embed_link),
            cover_image_url: optional(&self.cover_image_url),
            love_story: optional(&self.love_story),
            love_story_images: self.love_story_images.clone(),
            groom_family: self.groom_family.to_ordered_list(),
            bride_family: self.bride_family.to_ordered_list(),
            gallery_images: self.gallery_images(),
            video_url: optional(&self.video_url),
            thank_you_message: optional(&self.thank_you_message),
            ceremonies: self.ceremonies.to_ordered_list(),
            is_published: self.is_published,
            template_type: optional(&self.template_type).unwrap_or_else(|| DEFAULT_TEMPLATE_TYPE.to_string()),
            theme_color: optional(&self.theme_color).unwrap_or_else(|| DEFAULT_THEME_COLOR.to_string()),
            background_music_url: optional(&self.background_music_url),
        }
    }

    /// Gallery references in slot order, skipping empty slots.
    pub fn gallery_images(&self) -> Vec<String> {
        self.gallery.iter().filter_map(|(_, slot)| slot.image_url.clone()).collect()
    }

    /// Payload names of required fields that are blank.
    pub fn missing_required_fields(&self) -> Vec<String> {
        TextField::REQUIRED
            .iter()
            .filter(|field| self.text(**field).trim().is_empty())
            .map(|field| field.payload_name().to_string())
            .collect()
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Slug => &self.slug,
            TextField::GroomName => &self.groom_name,
            TextField::BrideName => &self.bride_name,
            TextField::WeddingDate => &self.wedding_date,
            TextField::WeddingTime => &self.wedding_time,
            TextField::VenueName => &self.venue_name,
            TextField::VenueAddress => &self.venue_address,
            TextField::VenueMapLink => &self.venue_map_link,
            TextField::VenueMapEmbedLink => &self.venue_map_embed_link,
            TextField::CoverImageUrl => &self.cover_image_url,
            TextField::LoveStory => &self.love_story,
            TextField::ThankYouMessage => &self.thank_you_message,
            TextField::VideoUrl => &self.video_url,
            TextField::TemplateType => &self.template_type,
            TextField::ThemeColor => &self.theme_color,
            TextField::BackgroundMusicUrl => &self.background_music_url,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Slug => &mut self.slug,
            TextField::GroomName => &mut self.groom_name,
            TextField::BrideName => &mut self.bride_name,
            TextField::WeddingDate => &mut self.wedding_date,
            TextField::WeddingTime => &mut self.wedding_time,
            TextField::VenueName => &mut self.venue_name,
            TextField::VenueAddress => &mut self.venue_address,
            TextField::VenueMapLink => &mut self.venue_map_link,
            TextField::VenueMapEmbedLink => &mut self.venue_map_embed_link,
            TextField::CoverImageUrl => &mut self.cover_image_url,
            TextField::LoveStory => &mut self.love_story,
            TextField::ThankYouMessage => &mut self.thank_you_message,
            TextField::VideoUrl => &mut self.video_url,
            TextField::TemplateType => &mut self.template_type,
            TextField::ThemeColor => &mut self.theme_color,
            TextField::BackgroundMusicUrl => &mut self.background_music_url,
        }
    }

    /// Sets a flat field. The slug is normalized as it is typed; nothing else
    /// is validated here.
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        *self.text_mut(field) = match field {
            TextField::Slug => normalize_slug(&value),
            _ => value,
        };
    }

    pub fn family(&self, side: FamilySide) -> &OrderedCollection<FamilyMember> {
        match side {
            FamilySide::Groom => &self.groom_family,
            FamilySide::Bride => &self.bride_family,
        }
    }

    pub fn family_mut(&mut self, side: FamilySide) -> &mut OrderedCollection<FamilyMember> {
        match side {
            FamilySide::Groom => &mut self.groom_family,
            FamilySide::Bride => &mut self.bride_family,
        }
    }
}
