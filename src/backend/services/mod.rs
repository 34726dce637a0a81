pub mod invitation_service;
pub mod upload_service;
