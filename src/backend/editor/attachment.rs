// src/backend/editor/attachment.rs
// Binds an image field of the draft to an asynchronous upload.

use crate::editor::collection::{CeremonyPatch, ItemKey};
use crate::editor::draft::GallerySlot;
use crate::editor::gateway::{BackingStore, ImageBlob, UploadGateway};
use crate::editor::session::{EditorSession, PendingUpload};
use crate::error::InvitationError;
use futures::future::join_all;

/// Which image field an upload is meant for. Collection targets are bound by
/// key, so they survive reorders made while the upload runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageTarget {
    Cover,
    Ceremony(ItemKey),
    Gallery(ItemKey),
}

impl<S: BackingStore, U: UploadGateway> EditorSession<S, U> {
    /// Uploads `blob` and, on success, writes the returned reference into
    /// `target`. On failure the target keeps its previous value.
    ///
    /// If the target item is removed before the upload completes, the
    /// reference is returned but not written anywhere.
    pub async fn attach_image(&self, target: ImageTarget, blob: ImageBlob) -> Result<String, InvitationError> {
        if !blob.is_image() {
            return Err(not_an_image(&blob));
        }
        if !self.target_exists(target) {
            return Err(InvitationError::InvalidInput(format!("No image target {:?}", target)));
        }

        let _pending = PendingUpload::begin(&self.pending_uploads);
        let filename = blob.filename.clone();
        let reference = self.gateway.upload(blob).await.map_err(|e| {
            log::warn!("Upload of '{}' for {:?} failed: {}", filename, target, e);
            match e {
                InvitationError::UploadError(msg) => InvitationError::UploadError(msg),
                other => InvitationError::UploadError(other.to_string()),
            }
        })?;

        if !self.apply_image(target, reference.clone()) {
            log::info!("Upload of '{}' finished after {:?} was removed; discarded", filename, target);
        }
        Ok(reference)
    }

    /// Uploads several gallery images concurrently, one new slot per image.
    ///
    /// Results come back in input order. A slot is reserved only for blobs
    /// that pass the image filter and is released again if its upload fails,
    /// so the gallery ends up holding only successful uploads.
    pub async fn add_gallery_images(&self, blobs: Vec<ImageBlob>) -> Vec<Result<(ItemKey, String), InvitationError>> {
        join_all(blobs.into_iter().map(|blob| self.add_gallery_image(blob))).await
    }

    async fn add_gallery_image(&self, blob: ImageBlob) -> Result<(ItemKey, String), InvitationError> {
        if !blob.is_image() {
            return Err(not_an_image(&blob));
        }
        let key = self.with_gallery(|gallery| gallery.insert(GallerySlot::default()));
        match self.attach_image(ImageTarget::Gallery(key), blob).await {
            Ok(reference) => Ok((key, reference)),
            Err(e) => {
                self.with_gallery(|gallery| gallery.remove(key));
                Err(e)
            }
        }
    }

    fn target_exists(&self, target: ImageTarget) -> bool {
        let draft = self.draft.borrow();
        match target {
            ImageTarget::Cover => true,
            ImageTarget::Ceremony(key) => draft.ceremonies.contains(key),
            ImageTarget::Gallery(key) => draft.gallery.contains(key),
        }
    }

    fn apply_image(&self, target: ImageTarget, reference: String) -> bool {
        let mut draft = self.draft.borrow_mut();
        match target {
            ImageTarget::Cover => {
                draft.cover_image_url = reference;
                true
            }
            ImageTarget::Ceremony(key) => draft.ceremonies.update(key, CeremonyPatch::image(reference)),
            ImageTarget::Gallery(key) => match draft.gallery.get_mut(key) {
                Some(slot) => {
                    slot.image_url = Some(reference);
                    true
                }
                None => false,
            },
        }
    }
}

fn not_an_image(blob: &ImageBlob) -> InvitationError {
    InvitationError::UploadError(format!("'{}' is not an image ({})", blob.filename, blob.mime_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::draft::TextField;
    use crate::editor::testing::{png, yield_now, FakeStore, ManualGateway};
    use crate::models::Ceremony;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn session() -> EditorSession<FakeStore, ManualGateway> {
        EditorSession::create(FakeStore::default(), ManualGateway::default())
    }

    fn ceremony(title: &str) -> Ceremony {
        Ceremony {
            title: title.to_string(),
            ..Ceremony::default()
        }
    }

    #[test]
    fn cover_upload_sets_the_flat_field() {
        let session = session();
        let reference = block_on(session.attach_image(ImageTarget::Cover, png("cover.png"))).unwrap();
        assert_eq!(reference, "/assets/cover.png");
        assert_eq!(session.draft().cover_image_url, "/assets/cover.png");
    }

    #[test]
    fn rejected_upload_leaves_ceremony_image_unset() {
        let session = session();
        let key = session.with_ceremonies(|c| c.insert(ceremony("Sangeet")));
        let reply = session.gateway.expect("k.png");
        reply.send(Err(InvitationError::UploadError("quota exceeded".to_string()))).unwrap();

        let result = block_on(session.attach_image(ImageTarget::Ceremony(key), png("k.png")));
        assert_eq!(result, Err(InvitationError::UploadError("quota exceeded".to_string())));
        assert_eq!(session.draft().ceremonies.get(key).unwrap().image_url, None);
        assert!(!session.is_upload_pending());
    }

    #[test]
    fn failure_keeps_the_previous_reference() {
        let session = session();
        block_on(session.attach_image(ImageTarget::Cover, png("old.png"))).unwrap();
        session
            .gateway
            .expect("new.png")
            .send(Err(InvitationError::StorageError("offline".to_string())))
            .unwrap();

        let err = block_on(session.attach_image(ImageTarget::Cover, png("new.png"))).unwrap_err();
        assert!(matches!(err, InvitationError::UploadError(_)));
        assert_eq!(session.draft().cover_image_url, "/assets/old.png");
    }

    #[test]
    fn non_images_never_reach_the_gateway() {
        let session = session();
        let blob = ImageBlob::new("notes.txt", "text/plain", vec![1]);
        assert!(matches!(
            block_on(session.attach_image(ImageTarget::Cover, blob)),
            Err(InvitationError::UploadError(_))
        ));
        assert_eq!(session.gateway.uploads.get(), 0);
    }

    #[test]
    fn upload_lands_on_its_key_after_a_reorder() {
        let session = session();
        let (first, second) = session.with_ceremonies(|c| (c.insert(ceremony("Mehendi")), c.insert(ceremony("Wedding"))));
        let reply = session.gateway.expect("wedding.png");

        let (uploaded, ()) = block_on(async {
            futures::join!(session.attach_image(ImageTarget::Ceremony(second), png("wedding.png")), async {
                assert!(session.is_upload_pending());
                session.with_ceremonies(|c| c.move_to(second, 0));
                reply.send(Ok("/assets/w".to_string())).unwrap();
            })
        });

        assert_eq!(uploaded, Ok("/assets/w".to_string()));
        let ceremonies = session.draft().ceremonies.to_ordered_list();
        assert_eq!(ceremonies[0].title, "Wedding");
        assert_eq!(ceremonies[0].image_url.as_deref(), Some("/assets/w"));
        assert_eq!(ceremonies[1].image_url, None);
        assert_eq!(session.draft().ceremonies.position_of(first), Some(1));
    }

    #[test]
    fn upload_for_a_removed_item_is_discarded() {
        let session = session();
        let (doomed, kept) = session.with_ceremonies(|c| (c.insert(ceremony("Haldi")), c.insert(ceremony("Reception"))));
        let reply = session.gateway.expect("haldi.png");

        let (result, ()) = block_on(async {
            futures::join!(session.attach_image(ImageTarget::Ceremony(doomed), png("haldi.png")), async {
                session.with_ceremonies(|c| c.remove(doomed));
                reply.send(Ok("/assets/h".to_string())).unwrap();
            })
        });

        assert!(result.is_ok());
        assert_eq!(session.draft().ceremonies.to_ordered_list(), vec![ceremony("Reception")]);
        assert_eq!(session.draft().ceremonies.get(kept).unwrap().image_url, None);
    }

    #[test]
    fn out_of_order_gallery_uploads_fill_their_own_slots() {
        let session = session();
        let (one, two) = session.with_gallery(|g| (g.insert(GallerySlot::default()), g.insert(GallerySlot::default())));
        let reply_one = session.gateway.expect("one.png");
        let reply_two = session.gateway.expect("two.png");
        let finished = RefCell::new(Vec::new());

        block_on(async {
            futures::join!(
                async {
                    session.attach_image(ImageTarget::Gallery(one), png("one.png")).await.unwrap();
                    finished.borrow_mut().push("one");
                },
                async {
                    session.attach_image(ImageTarget::Gallery(two), png("two.png")).await.unwrap();
                    finished.borrow_mut().push("two");
                },
                async {
                    reply_two.send(Ok("/assets/2".to_string())).unwrap();
                    yield_now().await;
                    yield_now().await;
                    reply_one.send(Ok("/assets/1".to_string())).unwrap();
                },
            )
        });

        assert_eq!(*finished.borrow(), vec!["two", "one"]);
        let draft = session.draft();
        assert_eq!(draft.gallery.get(one).unwrap().image_url.as_deref(), Some("/assets/1"));
        assert_eq!(draft.gallery.get(two).unwrap().image_url.as_deref(), Some("/assets/2"));
        assert_eq!(draft.gallery_images(), vec!["/assets/1", "/assets/2"]);
    }

    #[test]
    fn multi_file_gallery_upload_keeps_successes_only() {
        let session = session();
        session
            .gateway
            .expect("bad.png")
            .send(Err(InvitationError::UploadError("too large".to_string())))
            .unwrap();

        let results = block_on(session.add_gallery_images(vec![png("a.png"), png("bad.png"), png("c.png")]));

        assert_eq!(results.len(), 3);
        assert!(results[1].is_err());
        let (a_key, a_ref) = results[0].clone().unwrap();
        assert_eq!(a_ref, "/assets/a.png");
        assert_eq!(session.draft().gallery.position_of(a_key), Some(0));
        assert_eq!(session.draft().gallery.len(), 2);
        assert_eq!(session.draft().gallery_images(), vec!["/assets/a.png", "/assets/c.png"]);
    }

    #[test]
    fn failed_gallery_uploads_leave_the_gallery_unchanged() {
        let session = session();
        session.with_gallery(|g| g.insert(GallerySlot { image_url: Some("/assets/kept".to_string()) }));
        let before = session.draft().gallery.keys();
        session
            .gateway
            .expect("bad.png")
            .send(Err(InvitationError::UploadError("rejected".to_string())))
            .unwrap();

        let results = block_on(session.add_gallery_images(vec![
            png("bad.png"),
            ImageBlob::new("notes.txt", "text/plain", vec![1]),
        ]));

        assert!(results.iter().all(|r| matches!(r, Err(InvitationError::UploadError(_)))));
        assert_eq!(session.draft().gallery.keys(), before);
        assert_eq!(session.draft().gallery_images(), vec!["/assets/kept"]);
        // The text file never reached the gateway.
        assert_eq!(session.gateway.uploads.get(), 1);
        assert!(!session.is_upload_pending());
    }

    #[test]
    fn save_waits_for_pending_uploads() {
        let session = session();
        for (field, value) in [
            (TextField::Slug, "a"),
            (TextField::GroomName, "Ben"),
            (TextField::BrideName, "Ann"),
            (TextField::WeddingDate, "2026-05-02"),
            (TextField::WeddingTime, "4 PM"),
            (TextField::VenueName, "Hall"),
            (TextField::VenueAddress, "Road 1"),
        ] {
            session.set_field(field, value);
        }
        let reply = session.gateway.expect("cover.png");

        let (uploaded, blocked) = block_on(async {
            futures::join!(session.attach_image(ImageTarget::Cover, png("cover.png")), async {
                let blocked = session.save().await;
                reply.send(Ok("/assets/c".to_string())).unwrap();
                blocked
            })
        });

        assert!(uploaded.is_ok());
        assert_eq!(blocked, Err(InvitationError::UploadsPending(1)));
        assert!(session.store().calls.borrow().is_empty());

        block_on(session.save()).unwrap();
        assert_eq!(session.store().writes().len(), 1);
    }
}
