// src/backend/storage/mod.rs
// Stable memory layout and typed accessors, built on ic-stable-structures.

pub mod assets;
pub mod invitations;
pub mod memory;
pub mod metrics;
pub mod storable;

pub use memory::Memory;
pub use metrics::{get_metrics, update_metrics};
pub use storable::Cbor;
