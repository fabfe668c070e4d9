//! Request DTOs for Web API.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Query parameters for the resource listing.
#[derive(Debug, Default, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResourceQuery {
    /// Category to filter by; `all` or absent returns every resource.
    #[serde(default)]
    pub category: Option<String>,
}
