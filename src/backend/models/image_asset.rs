// src/backend/models/image_asset.rs
use crate::models::common::{AssetId, StorageBytes, TimestampNs};
use candid::CandidType;
use serde::{Deserialize, Serialize};

/// An uploaded image held by the canister and served by its public reference.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ImageAsset {
    pub asset_id: AssetId,
    pub filename: String,
    pub mime_type: String,
    #[serde(with = "serde_bytes")]
    pub data: Vec<u8>,
    pub size_bytes: StorageBytes,
    pub created_at: TimestampNs,
}
