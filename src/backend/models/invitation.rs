// src/backend/models/invitation.rs
use crate::models::common::{InvitationId, TimestampNs, DEFAULT_TEMPLATE_TYPE, DEFAULT_THEME_COLOR};
use candid::CandidType;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FamilyMember {
    pub name: String,
    pub relation: String, // e.g., "Mother", "Elder Brother"
}

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Ceremony {
    pub title: String, // e.g., "Mehendi", "Reception"
    pub date: String,
    pub time: String,
    pub venue_name: String,
    pub venue_address: String,
    pub map_link: Option<String>,
    pub image_url: Option<String>,
}

/// Wire and storage shape of one invitation, exactly as written by a save.
///
/// Field names are the persisted names; renaming any of them breaks records
/// already in stable memory.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Validate)]
pub struct InvitationPayload {
    #[validate(length(max = 100))]
    pub slug: String,
    #[validate(length(max = 100))]
    pub groom_name: String,
    #[validate(length(max = 100))]
    pub bride_name: String,
    /// ISO-8601 date, `YYYY-MM-DD`.
    #[validate(length(max = 32))]
    pub wedding_date: String,
    /// Free text, e.g. "4:00 PM".
    #[validate(length(max = 64))]
    pub wedding_time: String,
    #[validate(length(max = 200))]
    pub venue_name: String,
    #[validate(length(max = 500))]
    pub venue_address: String,
    #[validate(length(max = 2048))]
    pub venue_map_link: Option<String>,
    #[validate(length(max = 2048))]
    pub venue_map_embed_link: Option<String>,
    pub cover_image_url: Option<String>,
    #[validate(length(max = 10000))]
    pub love_story: Option<String>,
    #[serde(default)]
    pub love_story_images: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub groom_family: Vec<FamilyMember>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub bride_family: Vec<FamilyMember>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub gallery_images: Vec<String>,
    pub video_url: Option<String>,
    #[validate(length(max = 5000))]
    pub thank_you_message: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub ceremonies: Vec<Ceremony>,
    pub is_published: bool,
    pub template_type: String,
    pub theme_color: String,
    pub background_music_url: Option<String>,
}

impl Default for InvitationPayload {
    fn default() -> Self {
        Self {
            slug: String::new(),
            groom_name: String::new(),
            bride_name: String::new(),
            wedding_date: String::new(),
            wedding_time: String::new(),
            venue_name: String::new(),
            venue_address: String::new(),
            venue_map_link: None,
            venue_map_embed_link: None,
            cover_image_url: None,
            love_story: None,
            love_story_images: Vec::new(),
            groom_family: Vec::new(),
            bride_family: Vec::new(),
            gallery_images: Vec::new(),
            video_url: None,
            thank_you_message: None,
            ceremonies: Vec::new(),
            is_published: false,
            template_type: DEFAULT_TEMPLATE_TYPE.to_string(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            background_music_url: None,
        }
    }
}

/// A durable invitation as held by the canister.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct InvitationRecord {
    pub id: InvitationId,
    pub invitation: InvitationPayload,
    pub created_at: TimestampNs,
    pub updated_at: TimestampNs,
}

/// Dashboard row for listing invitations.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct InvitationSummary {
    pub id: InvitationId,
    pub slug: String,
    pub groom_name: String,
    pub bride_name: String,
    pub wedding_date: String,
    pub is_published: bool,
    pub updated_at: TimestampNs,
}

impl From<&InvitationRecord> for InvitationSummary {
    fn from(record: &InvitationRecord) -> Self {
        Self {
            id: record.id,
            slug: record.invitation.slug.clone(),
            groom_name: record.invitation.groom_name.clone(),
            bride_name: record.invitation.bride_name.clone(),
            wedding_date: record.invitation.wedding_date.clone(),
            is_published: record.invitation.is_published,
            updated_at: record.updated_at,
        }
    }
}
