#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use schoolhub_api::config::ServerConfig;
use schoolhub_api::router::build_app_router;
use schoolhub_api::state::AppState;
use schoolhub_api::storage::ImageStore;
use schoolhub_db::PoolManager;

const BOUNDARY: &str = "schoolhub-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(public_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        public_dir: public_dir.to_path_buf(),
    }
}

/// Build the full application router around the given pool, storing
/// uploads under `public_dir`.
pub fn build_test_app(pool: PgPool, public_dir: &Path) -> Router {
    let config = test_config(public_dir);
    let state = AppState {
        db: Arc::new(PoolManager::from_pool(pool)),
        config: Arc::new(config.clone()),
        images: Arc::new(ImageStore::new(public_dir)),
    };
    build_app_router(state, &config)
}

/// A valid set of create-school form fields.
pub fn school_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Sunrise International School"),
        ("address", "45 MG Road, Near City Park"),
        ("city", "Bengaluru"),
        ("state", "Karnataka"),
        ("contact", "9988776655"),
        ("email_id", "contact@sunrise.edu.in"),
    ]
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: impl Into<Body>,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    post_raw(app, uri, "application/x-www-form-urlencoded", body).await
}

pub async fn post_multipart(app: Router, uri: &str, body: MultipartBody) -> Response<Body> {
    let (content_type, bytes) = body.finish();
    post_raw(app, uri, &content_type, bytes).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn url_encode(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            b' ' => "+".to_string(),
            other => format!("%{other:02X}"),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Multipart body builder
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn with_fields(fields: &[(&str, &str)]) -> Self {
        fields
            .iter()
            .fold(Self::default(), |body, (name, value)| body.text(name, value))
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (
            format!("multipart/form-data; boundary={BOUNDARY}"),
            self.bytes,
        )
    }
}
