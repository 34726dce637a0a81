// src/backend/lib.rs

pub mod api;
pub mod editor;
pub mod error;
pub mod metrics;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

use crate::api::{ListInvitationsResponse, ListRequest, UploadImageRequest};
use crate::error::InvitationError;
use crate::metrics::InvitationMetrics;
use crate::models::{ImageAsset, InvitationId, InvitationPayload, InvitationRecord};

#[ic_cdk::init]
fn init() {
    utils::logger::init_logger();
    log::info!("Invitations backend canister initialized.");
}

#[ic_cdk::post_upgrade]
fn post_upgrade() {
    utils::logger::init_logger();
    log::info!(
        "Invitations backend canister upgraded. {} invitations in stable memory.",
        storage::invitations::count_invitations()
    );
}

// Export Candid interface
ic_cdk::export_candid!();
