use super::workflow::Uploader;
use crate::models::UploadedFile;

/// Image URL of a form, with removal of the persisted image deferred until save.
///
/// Nothing here touches the backend until [`ImageField::commit`]; dropping the
/// field is a cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageField {
    original: Option<String>,
    current: Option<String>,
    pending_removal: Option<String>,
}

impl ImageField {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Seeded from a persisted resource's image
    pub fn with_original(url: impl Into<String>) -> Self {
        let url = url.into();
        if url.trim().is_empty() {
            return Self::empty();
        }
        Self {
            original: Some(url.clone()),
            current: Some(url),
            pending_removal: None,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    pub fn pending_removal(&self) -> Option<&str> {
        self.pending_removal.as_deref()
    }

    /// Clears the field. The persisted image is only marked for deletion.
    pub fn remove(&mut self) {
        if self.current.is_some() && self.current == self.original {
            tracing::debug!("marking {:?} for removal on save", self.original);
            self.pending_removal = self.original.clone();
        }
        self.current = None;
    }

    /// A fresh upload replaces the field and drops any pending removal.
    pub fn set_uploaded(&mut self, file: &UploadedFile) {
        self.set_url(file.url.clone());
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.current = Some(url.into());
        self.pending_removal = None;
    }

    /// Runs the deferred delete as part of saving the owning resource.
    ///
    /// Deletes only when a removal was requested and the image lives in the
    /// backend's upload directory. Returns whether a delete was issued.
    pub async fn commit(&mut self, uploader: &Uploader) -> bool {
        let issued = match self.pending_removal.take() {
            Some(url) if uploader.api().is_local_upload(&url) => {
                uploader.delete_uploaded_file(&url).await;
                true
            }
            Some(url) => {
                tracing::debug!("removed image {} is not a local upload; nothing to delete", url);
                false
            }
            None => false,
        };
        self.original = self.current.clone();
        issued
    }
}
