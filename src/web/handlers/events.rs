//! Event handlers.

use axum::{extract::Path, Json};

use crate::catalog::{self, Event};
use crate::web::error::{ApiError, ErrorBody};
use crate::BonsaiError;

/// GET /api/events - List all events, earliest first.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    responses(
        (status = 200, description = "Events sorted by date", body = [Event])
    )
)]
pub async fn list_events() -> Json<Vec<Event>> {
    Json(catalog::list_events())
}

/// GET /api/events/:id - Get a single event.
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "Events",
    params(("id" = u32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event", body = Event),
        (status = 404, description = "Event not found", body = ErrorBody)
    )
)]
pub async fn get_event(Path(id): Path<String>) -> Result<Json<Event>, ApiError> {
    id.parse::<u32>()
        .ok()
        .and_then(catalog::find_event)
        .map(Json)
        .ok_or_else(|| BonsaiError::NotFound("Event".to_string()).into())
}
