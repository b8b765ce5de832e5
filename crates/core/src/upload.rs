//! Image upload policy: accepted content types, size ceiling, and the
//! naming scheme for stored files.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Multipart field carrying the optional school image.
pub const IMAGE_FIELD: &str = "image";

/// Largest accepted image (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Allowance for the text fields that accompany an image in one request.
pub const FORM_FIELDS_ALLOWANCE_BYTES: usize = 1024 * 1024;

/// Directory (under the public dir) and URL prefix for stored images.
pub const IMAGE_DIR_NAME: &str = "schoolImages";

/// Longest file extension carried over from the client's file name.
const MAX_EXTENSION_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Require a declared `image/*` content type.
pub fn validate_image_content_type(content_type: Option<&str>) -> Result<(), CoreError> {
    match content_type {
        Some(ct) if ct.trim().to_ascii_lowercase().starts_with("image/") => Ok(()),
        _ => Err(CoreError::Validation("Only image files are allowed!".into())),
    }
}

/// Fail once `received` bytes exceed [`MAX_IMAGE_BYTES`].
pub fn check_image_size(received: usize) -> Result<(), CoreError> {
    if received > MAX_IMAGE_BYTES {
        Err(CoreError::TooLarge(format!(
            "Image must not exceed {} MiB",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Lowercased extension of a client file name, including the leading dot.
///
/// Extensions that are empty, too long, or contain anything other than ASCII
/// alphanumerics are dropped so a client name can never steer the stored
/// path.
pub fn image_extension(original_name: Option<&str>) -> Option<String> {
    let name = original_name?;
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty()
        || ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.bytes().all(|b| b.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(format!(".{}", ext.to_ascii_lowercase()))
}

/// Generate a collision-resistant stored file name:
/// `{unix_millis}-{uuid_v7_simple}{.ext}`.
pub fn stored_image_name(original_name: Option<&str>) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let id = uuid::Uuid::now_v7().simple();
    let ext = image_extension(original_name).unwrap_or_default();
    format!("{millis}-{id}{ext}")
}

/// Public URL path for a stored image name, e.g. `/schoolImages/abc.png`.
pub fn public_image_path(stored_name: &str) -> String {
    format!("/{IMAGE_DIR_NAME}/{stored_name}")
}
