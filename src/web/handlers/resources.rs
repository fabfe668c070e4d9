//! Resource handlers.

use axum::{
    extract::{Path, Query},
    Json,
};

use crate::catalog::{self, Resource};
use crate::web::dto::ResourceQuery;
use crate::web::error::{ApiError, ErrorBody};
use crate::BonsaiError;

/// GET /api/resources - List resources, optionally by category.
#[utoipa::path(
    get,
    path = "/api/resources",
    tag = "Resources",
    params(ResourceQuery),
    responses(
        (status = 200, description = "Resources", body = [Resource])
    )
)]
pub async fn list_resources(Query(query): Query<ResourceQuery>) -> Json<Vec<Resource>> {
    Json(catalog::list_resources(query.category.as_deref()))
}

/// GET /api/resources/categories - List resource categories.
#[utoipa::path(
    get,
    path = "/api/resources/categories",
    tag = "Resources",
    responses(
        (status = 200, description = "Unique categories in listing order", body = [String])
    )
)]
pub async fn list_resource_categories() -> Json<Vec<String>> {
    Json(catalog::resource_categories())
}

/// GET /api/resources/:id - Get a single resource.
#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    tag = "Resources",
    params(("id" = u32, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Resource", body = Resource),
        (status = 404, description = "Resource not found", body = ErrorBody)
    )
)]
pub async fn get_resource(Path(id): Path<String>) -> Result<Json<Resource>, ApiError> {
    id.parse::<u32>()
        .ok()
        .and_then(catalog::find_resource)
        .map(Json)
        .ok_or_else(|| BonsaiError::NotFound("Resource".to_string()).into())
}
