//! CORS middleware configuration.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::header::{ACCEPT, CONTENT_TYPE, ORIGIN},
    http::{HeaderValue, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{Any, CorsLayer};

use crate::web::error::ApiError;

/// Create a CORS layer from configuration.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let parsed_origins: Vec<HeaderValue> =
        origins.iter().filter_map(|o| o.parse().ok()).collect();

    if parsed_origins.is_empty() {
        // Development mode: allow any origin but without credentials
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers(Any)
            .allow_origin(Any)
    } else {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE, ACCEPT])
            .allow_credentials(true)
            .allow_origin(parsed_origins)
    }
}

/// Origins permitted to call the API.
///
/// An empty list allows every origin, matching the permissive CORS layer.
#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    /// Create from configured origins.
    pub fn new(origins: &[String]) -> Self {
        Self(origins.to_vec())
    }

    /// Whether a request carrying `origin` may proceed.
    pub fn permits(&self, origin: &str) -> bool {
        self.0.is_empty() || self.0.iter().any(|o| o == origin)
    }
}

/// Reject requests whose `Origin` header is not on the allow list.
///
/// Requests without an `Origin` header (curl, server-to-server) pass.
pub async fn require_allowed_origin(
    State(allowed): State<Arc<AllowedOrigins>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(origin) = req.headers().get(ORIGIN) {
        let permitted = origin.to_str().map(|o| allowed.permits(o)).unwrap_or(false);
        if !permitted {
            tracing::warn!(origin = ?origin, "Rejected request from unlisted origin");
            return ApiError::forbidden("Origin not allowed").into_response();
        }
    }

    next.run(req).await
}
