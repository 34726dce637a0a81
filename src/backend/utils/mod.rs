pub mod crypto;
pub mod logger;
pub mod slug;
pub mod time;
