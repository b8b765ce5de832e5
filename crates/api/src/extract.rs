//! Request body extraction for school submissions.
//!
//! [`SchoolSubmission`] accepts either `multipart/form-data` (text fields
//! plus an optional `image` file) or `application/x-www-form-urlencoded`
//! (text fields only). The image is checked against the upload policy while
//! it streams in, so an oversized or non-image file is rejected before
//! anything touches the disk.

use axum::body::Bytes;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::Form;
use schoolhub_core::error::CoreError;
use schoolhub_core::school::SchoolDraft;
use schoolhub_core::upload::{check_image_size, validate_image_content_type, IMAGE_FIELD};

use crate::error::AppError;

/// An image file received with a submission, already within policy.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// File name as sent by the client.
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Parsed create-school request body.
#[derive(Debug, Clone, Default)]
pub struct SchoolSubmission {
    pub draft: SchoolDraft,
    pub image: Option<ImageUpload>,
}

enum BodyKind {
    Multipart,
    UrlEncoded,
    Other(String),
}

impl BodyKind {
    fn of(req: &Request) -> Self {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            Self::Multipart
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            Self::UrlEncoded
        } else {
            Self::Other(content_type)
        }
    }
}

impl<S> FromRequest<S> for SchoolSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match BodyKind::of(&req) {
            BodyKind::Multipart => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Self::from_multipart(multipart).await
            }
            BodyKind::UrlEncoded => {
                let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                let mut submission = Self::default();
                for (name, value) in fields {
                    submission.draft.set(&name, value);
                }
                Ok(submission)
            }
            BodyKind::Other(content_type) => Err(AppError::UnsupportedMediaType(format!(
                "Expected multipart/form-data or application/x-www-form-urlencoded, got '{content_type}'"
            ))),
        }
    }
}

impl SchoolSubmission {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut submission = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or("").to_string();
            if name == IMAGE_FIELD {
                let Some(upload) = read_image(field).await? else {
                    continue;
                };
                if submission.image.is_some() {
                    return Err(AppError::BadRequest(
                        "Only one image file may be uploaded".into(),
                    ));
                }
                submission.image = Some(upload);
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                submission.draft.set(&name, value);
            }
        }

        Ok(submission)
    }
}

/// Read the `image` part. Returns `None` for the empty part browsers send
/// when no file was chosen.
async fn read_image(mut field: Field<'_>) -> Result<Option<ImageUpload>, AppError> {
    let file_name = field
        .file_name()
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    let content_type = field.content_type().map(str::to_string);

    let first = field.chunk().await.map_err(multipart_error)?;
    if file_name.is_none() && first.as_ref().map_or(true, |c| c.is_empty()) {
        return Ok(None);
    }

    validate_image_content_type(content_type.as_deref())?;

    let mut buf = Vec::new();
    let mut next = first;
    while let Some(chunk) = next {
        check_image_size(buf.len() + chunk.len())?;
        buf.extend_from_slice(&chunk);
        next = field.chunk().await.map_err(multipart_error)?;
    }

    Ok(Some(ImageUpload {
        file_name,
        content_type: content_type.unwrap_or_default(),
        bytes: Bytes::from(buf),
    }))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Core(CoreError::TooLarge(err.body_text()))
    } else {
        AppError::BadRequest(err.body_text())
    }
}
