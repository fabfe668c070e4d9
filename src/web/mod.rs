//! Web API module for the bonsai club.
//!
//! Serves the contact form endpoint, the event and resource catalog, and a
//! health probe over HTTP.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::{ApiError, ErrorBody, ErrorCode};
pub use handlers::AppState;
pub use router::{create_router, create_router_with_rate_limit};
pub use server::WebServer;
