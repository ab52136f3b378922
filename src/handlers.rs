pub mod auth_handler;
pub mod caption_handler;
pub mod photo_handler;
pub mod transform_handler;
pub mod user_handler;
