// src/backend/error.rs
use candid::CandidType;
use serde::Deserialize;
use thiserror::Error;

#[derive(CandidType, Deserialize, Error, Debug, Clone, PartialEq, Eq)]
pub enum InvitationError {
    /// Required flat fields were empty at save time. Nothing was written.
    #[error("Missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("Upload error: {0}")]
    UploadError(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Invitation not found: {0}")]
    NotFound(String),

    #[error("Slug already in use: {0}")]
    SlugTaken(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("{0} image upload(s) still pending")]
    UploadsPending(u32),
}

impl InvitationError {
    /// Field names carried by a `Validation` error, empty otherwise.
    pub fn missing_fields(&self) -> &[String] {
        match self {
            InvitationError::Validation { missing } => missing,
            _ => &[],
        }
    }
}
