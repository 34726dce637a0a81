// src/backend/editor/mod.rs
// Editor core: keyed ordered collections, drag reordering, the draft session
// and image attachment. Generic over the backing store and upload gateway.

pub mod attachment;
pub mod collection;
pub mod draft;
pub mod gateway;
pub mod reorder;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use attachment::ImageTarget;
pub use collection::{CeremonyPatch, FamilyMemberPatch, ItemKey, OrderedCollection, Patchable};
pub use draft::{DraftRecord, FamilySide, GallerySlot, TextField};
pub use gateway::{BackingStore, ImageBlob, StableBackingStore, StableUploadGateway, UploadGateway};
pub use reorder::{GestureOutcome, ItemBounds, KeyboardStep, MoveInstruction, Point, ReorderGesture};
pub use session::{EditorMode, EditorSession};
