// src/backend/editor/session.rs
// One editing visit: owns the draft, commits it in a single write.

use crate::editor::collection::OrderedCollection;
use crate::editor::draft::{DraftRecord, FamilySide, GallerySlot, TextField};
use crate::editor::gateway::{BackingStore, UploadGateway};
use crate::error::InvitationError;
use crate::models::{Ceremony, FamilyMember, InvitationId};
use std::cell::{Cell, RefCell};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorMode {
    /// Nothing persisted yet; the next save creates.
    Create,
    /// Bound to a durable record; saves update it.
    Edit(InvitationId),
}

/// Holds a counter up for as long as it lives.
pub(crate) struct PendingUpload<'a>(&'a Cell<u32>);

impl<'a> PendingUpload<'a> {
    pub(crate) fn begin(counter: &'a Cell<u32>) -> Self {
        counter.set(counter.get() + 1);
        Self(counter)
    }
}

impl Drop for PendingUpload<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

struct SaveInFlight<'a>(&'a Cell<bool>);

impl Drop for SaveInFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Editor state for one visit.
///
/// Methods take `&self` so uploads can be awaited while the operator keeps
/// editing; the draft lives in a `RefCell` and no borrow is held across an
/// await. The `with_*` closures must not call back into the session.
pub struct EditorSession<S, U> {
    pub(crate) store: S,
    pub(crate) gateway: U,
    mode: Cell<EditorMode>,
    pub(crate) draft: RefCell<DraftRecord>,
    pub(crate) pending_uploads: Cell<u32>,
    save_in_flight: Cell<bool>,
}

impl<S: BackingStore, U: UploadGateway> EditorSession<S, U> {
    /// Starts an empty draft that will be created on first save.
    pub fn create(store: S, gateway: U) -> Self {
        Self::with_draft(store, gateway, EditorMode::Create, DraftRecord::default())
    }

    /// Fetches record `id` once and opens it for editing.
    pub async fn load_draft(store: S, gateway: U, id: InvitationId) -> Result<Self, InvitationError> {
        let payload = store.get(id).await.map_err(|e| match e {
            InvitationError::NotFound(what) => InvitationError::NotFound(what),
            other => InvitationError::BackendError(other.to_string()),
        })?;
        log::info!("Loaded invitation {} ('{}') for editing", id, payload.slug);
        Ok(Self::with_draft(store, gateway, EditorMode::Edit(id), DraftRecord::from_payload(payload)))
    }

    fn with_draft(store: S, gateway: U, mode: EditorMode, draft: DraftRecord) -> Self {
        Self {
            store,
            gateway,
            mode: Cell::new(mode),
            draft: RefCell::new(draft),
            pending_uploads: Cell::new(0),
            save_in_flight: Cell::new(false),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode.get()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the current draft for rendering.
    pub fn draft(&self) -> DraftRecord {
        self.draft.borrow().clone()
    }

    pub fn is_upload_pending(&self) -> bool {
        self.pending_uploads.get() > 0
    }

    pub fn is_save_pending(&self) -> bool {
        self.save_in_flight.get()
    }

    pub fn set_field(&self, field: TextField, value: impl Into<String>) {
        self.draft.borrow_mut().set_text(field, value);
    }

    pub fn set_published(&self, is_published: bool) {
        self.draft.borrow_mut().is_published = is_published;
    }

    pub fn with_family<R>(&self, side: FamilySide, f: impl FnOnce(&mut OrderedCollection<FamilyMember>) -> R) -> R {
        f(self.draft.borrow_mut().family_mut(side))
    }

    pub fn with_ceremonies<R>(&self, f: impl FnOnce(&mut OrderedCollection<Ceremony>) -> R) -> R {
        f(&mut self.draft.borrow_mut().ceremonies)
    }

    pub fn with_gallery<R>(&self, f: impl FnOnce(&mut OrderedCollection<GallerySlot>) -> R) -> R {
        f(&mut self.draft.borrow_mut().gallery)
    }

    /// Validates and commits the whole draft in one create or update.
    ///
    /// Rejected without touching the store while another save or any image
    /// upload is still in flight. On any failure the draft is kept as is.
    pub async fn save(&self) -> Result<InvitationId, InvitationError> {
        if self.save_in_flight.get() {
            return Err(InvitationError::SaveInProgress);
        }
        let pending = self.pending_uploads.get();
        if pending > 0 {
            return Err(InvitationError::UploadsPending(pending));
        }

        let payload = {
            let draft = self.draft.borrow();
            let missing = draft.missing_required_fields();
            if !missing.is_empty() {
                return Err(InvitationError::Validation { missing });
            }
            draft.to_payload()
        };

        self.save_in_flight.set(true);
        let _in_flight = SaveInFlight(&self.save_in_flight);

        let result = match self.mode.get() {
            EditorMode::Create => self.store.create(payload).await,
            EditorMode::Edit(id) => self.store.update(id, payload).await.map(|()| id),
        };

        match result {
            Ok(id) => {
                if self.mode.get() == EditorMode::Create {
                    log::info!("Invitation {} created from draft", id);
                }
                self.mode.set(EditorMode::Edit(id));
                Ok(id)
            }
            Err(e) => {
                log::warn!("Saving invitation failed: {}", e);
                Err(InvitationError::BackendError(e.to_string()))
            }
        }
    }
}
