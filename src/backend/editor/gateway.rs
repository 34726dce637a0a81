// src/backend/editor/gateway.rs
// The two external collaborators the editor talks to, and their canister-backed
// implementations.

use crate::{
    error::InvitationError,
    models::{InvitationId, InvitationPayload},
    services::{invitation_service, upload_service},
};

/// Image bytes picked by the operator, before upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBlob {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageBlob {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// The "image-like" filter applied before a blob reaches the gateway.
    pub fn is_image(&self) -> bool {
        !self.data.is_empty() && upload_service::is_image_mime_type(&self.mime_type)
    }
}

/// Durable record store. `create`/`update` each write the whole record at once.
#[allow(async_fn_in_trait)]
pub trait BackingStore {
    async fn create(&self, record: InvitationPayload) -> Result<InvitationId, InvitationError>;

    async fn update(&self, id: InvitationId, record: InvitationPayload) -> Result<(), InvitationError>;

    async fn get(&self, id: InvitationId) -> Result<InvitationPayload, InvitationError>;

    async fn get_by_slug(&self, slug: &str, published_only: bool) -> Result<InvitationPayload, InvitationError>;
}

/// Remote binary store that hands back a public reference for each upload.
#[allow(async_fn_in_trait)]
pub trait UploadGateway {
    async fn upload(&self, blob: ImageBlob) -> Result<String, InvitationError>;
}

/// Public page lookup: only published records resolve.
pub async fn resolve_public_invitation<S: BackingStore>(
    store: &S,
    slug: &str,
) -> Result<InvitationPayload, InvitationError> {
    store.get_by_slug(slug, true).await
}

/// Backing store over this canister's stable memory.
#[derive(Clone, Copy, Debug, Default)]
pub struct StableBackingStore;

impl BackingStore for StableBackingStore {
    async fn create(&self, record: InvitationPayload) -> Result<InvitationId, InvitationError> {
        invitation_service::create_invitation(record)
    }

    async fn update(&self, id: InvitationId, record: InvitationPayload) -> Result<(), InvitationError> {
        invitation_service::update_invitation(id, record)
    }

    async fn get(&self, id: InvitationId) -> Result<InvitationPayload, InvitationError> {
        invitation_service::get_invitation(id).map(|record| record.invitation)
    }

    async fn get_by_slug(&self, slug: &str, published_only: bool) -> Result<InvitationPayload, InvitationError> {
        invitation_service::get_invitation_by_slug(slug, published_only).map(|record| record.invitation)
    }
}

/// Upload gateway over this canister's image asset store.
#[derive(Clone, Copy, Debug, Default)]
pub struct StableUploadGateway;

impl UploadGateway for StableUploadGateway {
    async fn upload(&self, blob: ImageBlob) -> Result<String, InvitationError> {
        upload_service::store_image(blob.filename, blob.mime_type, blob.data)
    }
}
