// src/backend/services/invitation_service.rs
// Durable invitation records: the canister side of the editor's backing store.

use crate::{
    error::InvitationError,
    metrics,
    models::{InvitationId, InvitationPayload, InvitationRecord, InvitationSummary},
    storage::invitations as invitation_storage,
    utils::{slug::normalize_slug, time::get_current_time_ns},
};

/// Upper bound on one page of `list_invitations`.
pub const MAX_PAGE_SIZE: usize = 100;

// --- Helper Functions ---

/// Normalizes the slug and rejects payloads that cannot be indexed.
fn prepare_payload(mut payload: InvitationPayload) -> Result<InvitationPayload, InvitationError> {
    payload.slug = normalize_slug(payload.slug.trim());
    if payload.slug.is_empty() {
        return Err(InvitationError::InvalidInput("Slug cannot be empty".to_string()));
    }
    Ok(payload)
}

/// Fails with `SlugTaken` if another record already owns `slug`.
fn ensure_slug_available(slug: &str, owner: Option<InvitationId>) -> Result<(), InvitationError> {
    match invitation_storage::find_invitation_id_by_slug(slug) {
        Some(existing) if Some(existing) != owner => Err(InvitationError::SlugTaken(slug.to_string())),
        _ => Ok(()),
    }
}

// --- Service Functions ---

/// Stores a new invitation and returns its id.
pub fn create_invitation(payload: InvitationPayload) -> Result<InvitationId, InvitationError> {
    let invitation = prepare_payload(payload)?;
    ensure_slug_available(&invitation.slug, None)?;

    let id = invitation_storage::get_next_invitation_id()?;
    let now = get_current_time_ns();
    let is_published = invitation.is_published;
    let slug = invitation.slug.clone();

    invitation_storage::insert_invitation(InvitationRecord {
        id,
        invitation,
        created_at: now,
        updated_at: now,
    });
    metrics::record_invitation_saved(None, is_published);

    log::info!("Invitation {} created with slug '{}' (published: {})", id, slug, is_published);
    Ok(id)
}

/// Replaces the whole payload of an existing invitation in one write.
pub fn update_invitation(id: InvitationId, payload: InvitationPayload) -> Result<(), InvitationError> {
    let existing = invitation_storage::get_invitation(id)
        .ok_or_else(|| InvitationError::NotFound(format!("id {}", id)))?;
    let invitation = prepare_payload(payload)?;
    ensure_slug_available(&invitation.slug, Some(id))?;

    let was_published = existing.invitation.is_published;
    let is_published = invitation.is_published;

    invitation_storage::insert_invitation(InvitationRecord {
        id,
        invitation,
        created_at: existing.created_at,
        updated_at: get_current_time_ns(),
    });
    metrics::record_invitation_saved(Some(was_published), is_published);

    log::info!("Invitation {} updated (published: {})", id, is_published);
    Ok(())
}

pub fn get_invitation(id: InvitationId) -> Result<InvitationRecord, InvitationError> {
    invitation_storage::get_invitation(id).ok_or_else(|| InvitationError::NotFound(format!("id {}", id)))
}

/// Resolves a slug to its record. With `published_only`, drafts are reported
/// as not found so the public page never sees them.
pub fn get_invitation_by_slug(slug: &str, published_only: bool) -> Result<InvitationRecord, InvitationError> {
    let not_found = || InvitationError::NotFound(format!("slug '{}'", slug));
    let id = invitation_storage::find_invitation_id_by_slug(&normalize_slug(slug.trim())).ok_or_else(not_found)?;
    let record = invitation_storage::get_invitation(id).ok_or_else(not_found)?;
    if published_only && !record.invitation.is_published {
        return Err(not_found());
    }
    Ok(record)
}

pub fn delete_invitation(id: InvitationId) -> Result<(), InvitationError> {
    let removed = invitation_storage::remove_invitation(id)
        .ok_or_else(|| InvitationError::NotFound(format!("id {}", id)))?;
    metrics::record_invitation_deleted(removed.invitation.is_published);
    log::info!("Invitation {} ('{}') deleted", id, removed.invitation.slug);
    Ok(())
}

/// One page of dashboard summaries plus the total record count.
pub fn list_invitations(offset: usize, limit: usize) -> (Vec<InvitationSummary>, u64) {
    let limit = limit.min(MAX_PAGE_SIZE);
    let page = invitation_storage::list_invitations(offset, limit)
        .iter()
        .map(InvitationSummary::from)
        .collect();
    (page, invitation_storage::count_invitations())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::get_metrics;

    fn payload(slug: &str, published: bool) -> InvitationPayload {
        InvitationPayload {
            slug: slug.to_string(),
            groom_name: "Ben".to_string(),
            bride_name: "Ann".to_string(),
            wedding_date: "2026-05-02".to_string(),
            wedding_time: "4:00 PM".to_string(),
            venue_name: "Rose Hall".to_string(),
            venue_address: "1 Garden Row".to_string(),
            is_published: published,
            ..InvitationPayload::default()
        }
    }

    #[test]
    fn create_assigns_increasing_ids_and_stores_the_payload() {
        let first = create_invitation(payload("ann-and-ben", false)).unwrap();
        let second = create_invitation(payload("cara-and-dev", false)).unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let record = get_invitation(first).unwrap();
        assert_eq!(record.invitation.groom_name, "Ben");
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn create_normalizes_the_slug() {
        let id = create_invitation(payload("Ann & Ben", false)).unwrap();
        assert_eq!(get_invitation(id).unwrap().invitation.slug, "ann---ben");
    }

    #[test]
    fn create_rejects_empty_and_duplicate_slugs() {
        assert!(matches!(
            create_invitation(payload("  ", false)),
            Err(InvitationError::InvalidInput(_))
        ));

        create_invitation(payload("ann-and-ben", false)).unwrap();
        assert_eq!(
            create_invitation(payload("ann-and-ben", true)),
            Err(InvitationError::SlugTaken("ann-and-ben".to_string()))
        );
    }

    #[test]
    fn update_replaces_payload_and_moves_the_slug_index() {
        let id = create_invitation(payload("old-slug", true)).unwrap();
        update_invitation(id, payload("new-slug", true)).unwrap();

        assert!(get_invitation_by_slug("old-slug", false).is_err());
        assert_eq!(get_invitation_by_slug("new-slug", true).unwrap().id, id);
    }

    #[test]
    fn update_keeps_own_slug_but_not_anothers() {
        let a = create_invitation(payload("a", false)).unwrap();
        create_invitation(payload("b", false)).unwrap();

        assert!(update_invitation(a, payload("a", true)).is_ok());
        assert_eq!(
            update_invitation(a, payload("b", true)),
            Err(InvitationError::SlugTaken("b".to_string()))
        );
    }

    #[test]
    fn update_of_unknown_id_is_not_found() {
        assert!(matches!(update_invitation(42, payload("x", false)), Err(InvitationError::NotFound(_))));
    }

    #[test]
    fn unpublished_records_never_resolve_publicly() {
        let id = create_invitation(payload("ann-and-ben", false)).unwrap();
        assert!(matches!(
            get_invitation_by_slug("ann-and-ben", true),
            Err(InvitationError::NotFound(_))
        ));
        assert_eq!(get_invitation_by_slug("ann-and-ben", false).unwrap().id, id);
    }

    #[test]
    fn delete_removes_record_and_slug() {
        let id = create_invitation(payload("ann-and-ben", true)).unwrap();
        delete_invitation(id).unwrap();

        assert!(get_invitation(id).is_err());
        assert!(get_invitation_by_slug("ann-and-ben", false).is_err());
        assert!(matches!(delete_invitation(id), Err(InvitationError::NotFound(_))));
        // The slug is free again.
        assert!(create_invitation(payload("ann-and-ben", false)).is_ok());
    }

    #[test]
    fn list_pages_in_id_order() {
        for slug in ["a", "b", "c"] {
            create_invitation(payload(slug, false)).unwrap();
        }
        let (page, total) = list_invitations(1, 10);
        assert_eq!(total, 3);
        assert_eq!(page.iter().map(|s| s.slug.as_str()).collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn metrics_follow_publish_transitions() {
        let id = create_invitation(payload("a", false)).unwrap();
        update_invitation(id, payload("a", true)).unwrap();
        let metrics = get_metrics();
        assert_eq!(metrics.total_invitations, 1);
        assert_eq!(metrics.published_invitations, 1);
        assert_eq!(metrics.saves_total, 2);

        delete_invitation(id).unwrap();
        let metrics = get_metrics();
        assert_eq!(metrics.total_invitations, 0);
        assert_eq!(metrics.published_invitations, 0);
    }
}
