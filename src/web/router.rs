//! Router configuration for Web API.

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::config::WebConfig;

use super::error::ApiError;
use super::handlers::{
    get_event, get_resource, health_check, list_events, list_resource_categories, list_resources,
    submit_contact, submit_inquiry, AppState,
};
use super::middleware::{
    api_rate_limit, create_cors_layer, require_allowed_origin, security_headers, AllowedOrigins,
    RateLimitState,
};
use super::openapi::openapi_json;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, config: &WebConfig) -> Router {
    let rate_limit_state = Arc::new(RateLimitState::from_config(config));
    create_router_with_rate_limit(app_state, config, rate_limit_state)
}

/// Create the main API router with an externally owned rate limiter.
pub fn create_router_with_rate_limit(
    app_state: Arc<AppState>,
    config: &WebConfig,
    rate_limit_state: Arc<RateLimitState>,
) -> Router {
    let contact_routes = Router::new()
        .route("/contact", post(submit_contact))
        .route("/inquiry", post(submit_inquiry))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes));

    let catalog_routes = Router::new()
        .route("/events", get(list_events))
        .route("/events/:id", get(get_event))
        .route("/resources", get(list_resources))
        .route("/resources/categories", get(list_resource_categories))
        .route("/resources/:id", get(get_resource));

    let api_routes = Router::new()
        .merge(contact_routes)
        .merge(catalog_routes)
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi_json));

    let allowed_origins = Arc::new(AllowedOrigins::new(&config.cors_origins));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers))
                .layer(CompressionLayer::new())
                .layer(create_cors_layer(&config.cors_origins))
                .layer(middleware::from_fn_with_state(
                    allowed_origins,
                    require_allowed_origin,
                ))
                .layer(middleware::from_fn_with_state(
                    rate_limit_state,
                    api_rate_limit,
                )),
        )
        .with_state(app_state)
}

/// Fallback for unmatched paths.
async fn not_found(uri: Uri) -> Response {
    if uri.path() == "/api" || uri.path().starts_with("/api/") {
        ApiError::not_found("Endpoint not found").into_response()
    } else {
        axum::http::StatusCode::NOT_FOUND.into_response()
    }
}
