pub mod common;
pub mod image_asset;
pub mod invitation;

// Re-export common types/enums for easier access
pub use common::*;
pub use image_asset::ImageAsset;
pub use invitation::{Ceremony, FamilyMember, InvitationPayload, InvitationRecord, InvitationSummary};
