//! Handlers for the `/schools` resource.
//!
//! Schools are append-only: only create and list are exposed.

use axum::extract::State;
use axum::http::header::ALLOW;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use schoolhub_db::models::school::{CreateSchool, School};
use schoolhub_db::repositories::SchoolRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::SchoolSubmission;
use crate::state::AppState;

/// Methods served by `/api/schools`, as advertised in `Allow`.
pub const ALLOWED_METHODS: &str = "GET, POST";

/// Body of a successful create.
#[derive(Debug, Serialize)]
pub struct SchoolCreated {
    pub message: &'static str,
    #[serde(rename = "schoolId")]
    pub school_id: i64,
}

/// POST /api/schools
///
/// Validate the submission, store the optional image, then insert the row.
/// The image is written before the insert; if the insert fails the file is
/// left in place.
pub async fn create(
    State(state): State<AppState>,
    submission: SchoolSubmission,
) -> AppResult<impl IntoResponse> {
    let school = submission.draft.validate()?;

    let pool = state
        .db
        .ready()
        .await
        .map_err(AppError::database("Failed to add school"))?;

    let stored = match &submission.image {
        Some(upload) => Some(state.images.save(upload).await?),
        None => None,
    };

    let input = CreateSchool::new(school, stored.as_ref().map(|s| s.public_path.clone()));
    let school_id = match SchoolRepo::create(&pool, &input).await {
        Ok(id) => id,
        Err(e) => {
            if let Some(stored) = &stored {
                tracing::warn!(
                    path = %stored.file_path.display(),
                    "Insert failed after image upload; image left orphaned"
                );
            }
            return Err(AppError::database("Failed to add school")(e));
        }
    };

    tracing::info!(school_id, image = ?input.image, "School added");

    Ok((
        StatusCode::CREATED,
        Json(SchoolCreated {
            message: "School added successfully!",
            school_id,
        }),
    ))
}

/// GET /api/schools
///
/// List every school, newest first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<School>>> {
    let pool = state
        .db
        .ready()
        .await
        .map_err(AppError::database("Failed to fetch schools"))?;
    let schools = SchoolRepo::list(&pool)
        .await
        .map_err(AppError::database("Failed to fetch schools"))?;
    Ok(Json(schools))
}

/// Fallback for any other method on `/api/schools`.
pub async fn method_not_allowed(method: Method) -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(ALLOW, ALLOWED_METHODS)],
        format!("Method {method} Not Allowed"),
    )
}
