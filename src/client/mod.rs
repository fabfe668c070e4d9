//! Typed client for the bonsai club API.
//!
//! [`ApiClient`] wraps the HTTP endpoints; [`SubmissionController`] drives a
//! contact form and reports its status through a watch channel.

mod api;
mod controller;

pub use api::{ApiClient, ClientError, NETWORK_ERROR_MESSAGE};
pub use controller::{SubmissionController, SubmissionStatus, SUBMIT_ERROR_MESSAGE};

pub use crate::catalog::partition_events;
