pub mod admin_auth;
pub mod clock;
pub mod feedback_service;
pub mod image_storage;
pub mod markdown;
pub mod post_service;
pub mod slug;
