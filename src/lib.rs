//! Bonsai club API
//!
//! Backend for a bonsai club website: club events, learning resources and a
//! contact form that relays submissions to the club inbox by email.

pub mod catalog;
pub mod client;
pub mod config;
pub mod contact;
pub mod error;
pub mod logging;
pub mod web;

pub use catalog::{Event, Resource};
pub use client::{ApiClient, ClientError, SubmissionController, SubmissionStatus};
pub use config::Config;
pub use contact::{
    validate_inquiry, ContactRequest, DeliveryResult, Inquiry, MailDispatcher, ValidationError,
};
pub use error::{BonsaiError, Result};
pub use web::{create_router, AppState, WebServer};
