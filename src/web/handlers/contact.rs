//! Contact form handlers.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::contact::{validate_inquiry, ContactRequest};
use crate::web::dto::ContactResponse;
use crate::web::error::{ApiError, ErrorBody, SUBMISSION_FAILED_MESSAGE};
use crate::web::handlers::AppState;

/// Submit the contact form.
///
/// Validates the payload and hands it to the mail dispatcher. In log-only
/// mode the submission is still accepted and `delivered` is `false`.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Submission received", body = ContactResponse),
        (status = 400, description = "Invalid submission", body = ErrorBody),
        (status = 413, description = "Request body too large", body = ErrorBody),
        (status = 500, description = "Delivery failed", body = ErrorBody)
    )
)]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(request) = payload?;
    let submission_id = Uuid::new_v4();

    let inquiry = validate_inquiry(request).map_err(|e| {
        tracing::info!(%submission_id, reason = %e, "Contact submission rejected");
        ApiError::from(e)
    })?;

    match state.dispatcher.send(&inquiry).await {
        Ok(result) => {
            tracing::info!(
                %submission_id,
                delivered = result.delivered,
                "Contact submission received"
            );
            Ok(Json(ContactResponse::received(result.delivered)))
        }
        Err(e) => {
            tracing::error!(%submission_id, error = %e, "Failed to deliver contact submission");
            Err(ApiError::internal(SUBMISSION_FAILED_MESSAGE))
        }
    }
}

/// Submit the contact form through the legacy inquiry path.
#[utoipa::path(
    post,
    path = "/api/inquiry",
    tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Submission received", body = ContactResponse),
        (status = 400, description = "Invalid submission", body = ErrorBody),
        (status = 500, description = "Delivery failed", body = ErrorBody)
    )
)]
pub async fn submit_inquiry(
    state: State<Arc<AppState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    submit_contact(state, payload).await
}
