pub mod photo;
pub mod user;

pub use photo::{NewPhoto, Photo};
