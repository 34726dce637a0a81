// src/backend/storage/memory.rs
use ic_stable_structures::memory_manager::{MemoryId, MemoryManager, VirtualMemory};
use ic_stable_structures::DefaultMemoryImpl;
use std::cell::RefCell;

// Define Memory IDs for stable structures
// Choose non-overlapping IDs
const INVITATION_COUNTER_MEM_ID: MemoryId = MemoryId::new(0);
const INVITATIONS_MEM_ID: MemoryId = MemoryId::new(1);
const SLUG_INDEX_MEM_ID: MemoryId = MemoryId::new(2);
const IMAGE_ASSETS_MEM_ID: MemoryId = MemoryId::new(3);
const METRICS_MEM_ID: MemoryId = MemoryId::new(4);

// Define memory type alias
pub type Memory = VirtualMemory<DefaultMemoryImpl>;

thread_local! {
    // Memory manager
    static MEMORY_MANAGER: RefCell<MemoryManager<DefaultMemoryImpl>> = RefCell::new(
        MemoryManager::init(DefaultMemoryImpl::default())
    );
}

/// Get memory instance for a specific MemoryId.
pub fn get_memory(id: MemoryId) -> Memory {
    MEMORY_MANAGER.with(|m| m.borrow().get(id))
}

pub fn get_invitation_counter_memory() -> Memory {
    get_memory(INVITATION_COUNTER_MEM_ID)
}

pub fn get_invitations_memory() -> Memory {
    get_memory(INVITATIONS_MEM_ID)
}

pub fn get_slug_index_memory() -> Memory {
    get_memory(SLUG_INDEX_MEM_ID)
}

pub fn get_image_assets_memory() -> Memory {
    get_memory(IMAGE_ASSETS_MEM_ID)
}

pub fn get_metrics_memory() -> Memory {
    get_memory(METRICS_MEM_ID)
}
