// src/backend/api.rs
// Candid endpoints: the backing store, the public page lookup and the image gateway.

use crate::{
    error::InvitationError,
    metrics::{self, InvitationMetrics},
    models::{ImageAsset, InvitationId, InvitationPayload, InvitationRecord, InvitationSummary},
    services::{invitation_service, upload_service},
};
use candid::{CandidType, Deserialize};
use ic_cdk_macros::{query, update};
use validator::Validate;

const DEFAULT_PAGE_SIZE: u32 = 20;

// --- Validation Helper ---
fn validate_request<T: Validate>(req: &T) -> Result<(), InvitationError> {
    req.validate().map_err(|e| InvitationError::InvalidInput(e.to_string()))
}

// --- Request/Response Structs ---

#[derive(CandidType, Deserialize, Clone, Debug, Default, Validate)]
pub struct ListRequest {
    pub offset: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

#[derive(CandidType, Deserialize, Clone, Debug, Default)]
pub struct ListInvitationsResponse {
    pub invitations: Vec<InvitationSummary>,
    pub total: u64,
}

#[derive(CandidType, Deserialize, Clone, Debug, Validate)]
pub struct UploadImageRequest {
    #[validate(length(min = 1, max = 255))]
    pub filename: String,
    #[validate(length(min = 1, max = 100))]
    pub mime_type: String,
    #[serde(with = "serde_bytes")]
    #[validate(length(min = 1, max = 5242880))]
    pub data: Vec<u8>,
}

// --- Invitation Endpoints ---

#[update]
fn create_invitation(payload: InvitationPayload) -> Result<InvitationId, InvitationError> {
    validate_request(&payload)?;
    invitation_service::create_invitation(payload)
}

#[update]
fn update_invitation(id: InvitationId, payload: InvitationPayload) -> Result<(), InvitationError> {
    validate_request(&payload)?;
    invitation_service::update_invitation(id, payload)
}

#[update]
fn delete_invitation(id: InvitationId) -> Result<(), InvitationError> {
    invitation_service::delete_invitation(id)
}

#[query]
fn get_invitation(id: InvitationId) -> Result<InvitationRecord, InvitationError> {
    invitation_service::get_invitation(id)
}

/// Public page lookup. Drafts are indistinguishable from missing slugs.
#[query]
fn get_published_invitation(slug: String) -> Result<InvitationRecord, InvitationError> {
    invitation_service::get_invitation_by_slug(&slug, true)
}

#[query]
fn list_invitations(req: ListRequest) -> Result<ListInvitationsResponse, InvitationError> {
    validate_request(&req)?;
    let offset = req.offset.unwrap_or(0) as usize;
    let limit = req.limit.unwrap_or(DEFAULT_PAGE_SIZE) as usize;
    let (invitations, total) = invitation_service::list_invitations(offset, limit);
    Ok(ListInvitationsResponse { invitations, total })
}

// --- Image Endpoints ---

#[update]
fn upload_image(req: UploadImageRequest) -> Result<String, InvitationError> {
    validate_request(&req)?;
    upload_service::store_image(req.filename, req.mime_type, req.data)
}

#[query]
fn get_image(asset_id: String) -> Result<ImageAsset, InvitationError> {
    upload_service::get_image(&asset_id)
}

// --- Metrics ---

#[query]
fn get_metrics() -> InvitationMetrics {
    metrics::get_invitation_metrics()
}
