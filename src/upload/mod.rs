//! File uploads: temporary vs. committed files, deferred deletion, rename after create.

pub mod image_field;
pub mod workflow;

pub use image_field::ImageField;
pub use workflow::{UploadMode, UploadSource, Uploader};
