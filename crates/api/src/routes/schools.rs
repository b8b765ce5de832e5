//! Route definitions for the school registry.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use schoolhub_core::upload::{FORM_FIELDS_ALLOWANCE_BYTES, MAX_IMAGE_BYTES};

use crate::handlers::school;
use crate::state::AppState;

/// Largest accepted create request: one image plus its text fields.
pub const MAX_REQUEST_BYTES: usize = MAX_IMAGE_BYTES + FORM_FIELDS_ALLOWANCE_BYTES;

/// School routes, merged into the `/api` tree.
///
/// ```text
/// GET    /schools           -> list
/// POST   /schools           -> create (multipart or urlencoded)
/// *      /schools           -> 405 with Allow: GET, POST
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/schools",
        get(school::list)
            .post(school::create)
            .fallback(school::method_not_allowed)
            .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES)),
    )
}
