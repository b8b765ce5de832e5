pub mod health;
pub mod schools;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /schools                                         list (GET), create (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(schools::router())
}
