use serde::{Deserialize, Serialize};

use super::loose_u64;

/// A file stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    pub filename: String,
    /// Absolute and segment-encoded
    pub url: String,
    pub size: u64,
    /// Set for generic uploads that still need a rename once their owner exists
    pub is_temporary: bool,
    pub original_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireUpload {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "loose_u64")]
    pub size: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RenameResponse {
    #[serde(rename = "newImageUrl")]
    pub new_image_url: String,
}
