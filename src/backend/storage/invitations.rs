// src/backend/storage/invitations.rs
// Durable invitation records plus the slug -> id index used by the public page.

use crate::error::InvitationError;
use crate::models::{InvitationId, InvitationRecord};
use crate::storage::memory::{get_invitation_counter_memory, get_invitations_memory, get_slug_index_memory, Memory};
use crate::storage::storable::Cbor;
use ic_stable_structures::{StableBTreeMap, StableCell};
use std::cell::RefCell;

type StorableInvitation = Cbor<InvitationRecord>;

thread_local! {
    // Last issued invitation id; ids start at 1.
    static INVITATION_COUNTER: RefCell<StableCell<u64, Memory>> = RefCell::new(
        StableCell::init(get_invitation_counter_memory(), 0)
            .expect("Failed to initialize invitation counter")
    );

    // Primary storage: InvitationId -> record
    static INVITATIONS_MAP: RefCell<StableBTreeMap<InvitationId, StorableInvitation, Memory>> = RefCell::new(
        StableBTreeMap::init(get_invitations_memory())
    );

    // Secondary index: normalized slug -> InvitationId
    static SLUG_INDEX: RefCell<StableBTreeMap<String, InvitationId, Memory>> = RefCell::new(
        StableBTreeMap::init(get_slug_index_memory())
    );
}

/// Reserves the next invitation id.
pub fn get_next_invitation_id() -> Result<InvitationId, InvitationError> {
    INVITATION_COUNTER.with(|cell_ref| {
        let mut cell = cell_ref.borrow_mut();
        let next_val = cell
            .get()
            .checked_add(1)
            .ok_or_else(|| InvitationError::StorageError("Invitation counter overflow".to_string()))?;
        cell.set(next_val)
            .map_err(|e| InvitationError::StorageError(format!("Failed to update invitation counter: {:?}", e)))?;
        Ok(next_val)
    })
}

/// Inserts or replaces a record, keeping the slug index in step.
///
/// Slug uniqueness is the caller's responsibility; this only moves the index
/// entry when the slug of an existing record changed.
pub fn insert_invitation(record: InvitationRecord) -> Option<InvitationRecord> {
    let id = record.id;
    let slug = record.invitation.slug.clone();
    let previous = INVITATIONS_MAP.with(|map_ref| map_ref.borrow_mut().insert(id, Cbor(record)).map(|c| c.0));

    SLUG_INDEX.with(|index_ref| {
        let mut index = index_ref.borrow_mut();
        if let Some(old) = &previous {
            if old.invitation.slug != slug {
                index.remove(&old.invitation.slug);
            }
        }
        index.insert(slug, id);
    });
    previous
}

pub fn get_invitation(id: InvitationId) -> Option<InvitationRecord> {
    INVITATIONS_MAP.with(|map_ref| map_ref.borrow().get(&id).map(|c| c.0))
}

pub fn find_invitation_id_by_slug(slug: &str) -> Option<InvitationId> {
    SLUG_INDEX.with(|index_ref| index_ref.borrow().get(&slug.to_string()))
}

/// Removes a record and its slug index entry.
pub fn remove_invitation(id: InvitationId) -> Option<InvitationRecord> {
    let removed = INVITATIONS_MAP.with(|map_ref| map_ref.borrow_mut().remove(&id).map(|c| c.0));
    match &removed {
        Some(record) => SLUG_INDEX.with(|index_ref| {
            index_ref.borrow_mut().remove(&record.invitation.slug);
        }),
        None => log::warn!("remove_invitation called for non-existent id: {}", id),
    }
    removed
}

/// Records in ascending id order.
pub fn list_invitations(offset: usize, limit: usize) -> Vec<InvitationRecord> {
    INVITATIONS_MAP.with(|map_ref| {
        map_ref
            .borrow()
            .iter()
            .skip(offset)
            .take(limit)
            .map(|(_id, record)| record.0)
            .collect()
    })
}

pub fn count_invitations() -> u64 {
    INVITATIONS_MAP.with(|map_ref| map_ref.borrow().len())
}
