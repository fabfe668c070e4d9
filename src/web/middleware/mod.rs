//! Middleware for Web API.

pub mod cors;
pub mod rate_limit;
pub mod security;

pub use cors::{create_cors_layer, require_allowed_origin, AllowedOrigins};
pub use rate_limit::{api_rate_limit, RateLimitState, RATE_LIMIT_MESSAGE};
pub use security::{security_headers, HARDENING_HEADERS};
