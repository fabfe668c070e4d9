//! Data Transfer Objects for Web API.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
