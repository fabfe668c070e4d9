//! OpenAPI document for the bonsai club API.

use axum::Json;
use utoipa::OpenApi;

use crate::catalog::{Event, EventKind, Resource, ResourceKind};
use crate::contact::ContactRequest;
use crate::web::dto::{ContactResponse, HealthResponse};
use crate::web::error::ErrorBody;
use crate::web::handlers;

/// Generated OpenAPI description of every route.
#[derive(OpenApi)]
#[openapi(
    info(title = "Bonsai Club API", description = "Club events, resources and contact form."),
    paths(
        handlers::submit_contact,
        handlers::submit_inquiry,
        handlers::list_events,
        handlers::get_event,
        handlers::list_resources,
        handlers::list_resource_categories,
        handlers::get_resource,
        handlers::health_check,
    ),
    components(schemas(
        ContactRequest,
        ContactResponse,
        HealthResponse,
        ErrorBody,
        Event,
        EventKind,
        Resource,
        ResourceKind,
    )),
    tags(
        (name = "Contact", description = "Contact form submissions"),
        (name = "Events", description = "Club events"),
        (name = "Resources", description = "Learning resources"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// GET /api/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_contact_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/contact"));
        assert!(doc.paths.paths.contains_key("/api/inquiry"));
        assert!(doc.paths.paths.contains_key("/api/events/{id}"));
    }
}
