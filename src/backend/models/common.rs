// src/backend/models/common.rs

pub type InvitationId = u64; // Counter-assigned id of a durable invitation record
pub type AssetId = String; // Hex sha256 of the stored image bytes

pub type TimestampNs = u64; // Nanoseconds since epoch
pub type StorageBytes = u64;

/// Template used by the public page when nothing else is chosen.
pub const DEFAULT_TEMPLATE_TYPE: &str = "classic";
pub const DEFAULT_THEME_COLOR: &str = "rose";
