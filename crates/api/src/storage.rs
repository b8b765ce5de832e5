//! Local storage for uploaded school images.

use std::path::{Path, PathBuf};

use schoolhub_core::upload::{public_image_path, stored_image_name, IMAGE_DIR_NAME};

use crate::extract::ImageUpload;

/// An image written to disk.
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Absolute or configured-relative location on disk.
    pub file_path: PathBuf,
    /// URL path under which the file is served.
    pub public_path: String,
}

/// Writes uploads into `<public_dir>/schoolImages` under generated names.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(public_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: public_dir.as_ref().join(IMAGE_DIR_NAME),
        }
    }

    /// Directory holding stored images (served at `/schoolImages`).
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist an upload, creating the directory on first use.
    pub async fn save(&self, upload: &ImageUpload) -> Result<StoredImage, std::io::Error> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let stored_name = stored_image_name(upload.file_name.as_deref());
        let file_path = self.dir.join(&stored_name);
        tokio::fs::write(&file_path, &upload.bytes).await?;

        tracing::debug!(
            path = %file_path.display(),
            bytes = upload.bytes.len(),
            content_type = %upload.content_type,
            "Stored uploaded image"
        );

        Ok(StoredImage {
            file_path,
            public_path: public_image_path(&stored_name),
        })
    }
}
