// src/backend/metrics.rs
use crate::models::StorageBytes;
use crate::storage::{get_metrics, update_metrics};
use candid::{CandidType, Deserialize};
use serde::Serialize;

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct InvitationMetrics {
    pub total_invitations: u64,
    pub published_invitations: u64,
    pub saves_total: u64,
    pub images_stored: u64,
    pub image_bytes_stored: StorageBytes,
}

// --- Metrics Update Helpers ---
// Metrics are best-effort: a failed write is logged and never fails the caller.

/// Accounts for a record being written. `was_published` is `None` for a new record.
pub fn record_invitation_saved(was_published: Option<bool>, is_published: bool) {
    let result = update_metrics(|metrics| {
        metrics.saves_total = metrics.saves_total.saturating_add(1);
        if was_published.is_none() {
            metrics.total_invitations = metrics.total_invitations.saturating_add(1);
        }
        match (was_published.unwrap_or(false), is_published) {
            (false, true) => metrics.published_invitations = metrics.published_invitations.saturating_add(1),
            (true, false) => metrics.published_invitations = metrics.published_invitations.saturating_sub(1),
            _ => {}
        }
    });
    if let Err(e) = result {
        log::warn!("metrics not updated after save: {}", e);
    }
}

pub fn record_invitation_deleted(was_published: bool) {
    let result = update_metrics(|metrics| {
        metrics.total_invitations = metrics.total_invitations.saturating_sub(1);
        if was_published {
            metrics.published_invitations = metrics.published_invitations.saturating_sub(1);
        }
    });
    if let Err(e) = result {
        log::warn!("metrics not updated after delete: {}", e);
    }
}

pub fn record_image_stored(size_bytes: StorageBytes) {
    let result = update_metrics(|metrics| {
        metrics.images_stored = metrics.images_stored.saturating_add(1);
        metrics.image_bytes_stored = metrics.image_bytes_stored.saturating_add(size_bytes);
    });
    if let Err(e) = result {
        log::warn!("metrics not updated after image upload: {}", e);
    }
}

pub fn get_invitation_metrics() -> InvitationMetrics {
    get_metrics()
}
