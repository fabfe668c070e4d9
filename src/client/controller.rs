//! Contact form submission controller.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::contact::ContactRequest;

use super::api::ApiClient;

/// Message shown when a submission does not succeed.
pub const SUBMIT_ERROR_MESSAGE: &str = "Unable to submit your message right now.";

/// Status of the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// Nothing submitted yet, or reset.
    #[default]
    Idle,
    /// A submission is in flight.
    Submitting,
    /// The server received the submission.
    Success {
        /// Acknowledgement from the server, if any.
        message: Option<String>,
    },
    /// The submission failed.
    Error {
        /// Message to show the user.
        message: String,
    },
}

impl SubmissionStatus {
    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionStatus::Submitting)
    }

    /// Whether this is a final outcome of a submission.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::Success { .. } | SubmissionStatus::Error { .. }
        )
    }

    fn failed() -> Self {
        SubmissionStatus::Error {
            message: SUBMIT_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Drives one contact form: one submission at a time, status on a watch channel.
#[derive(Debug)]
pub struct SubmissionController {
    api: ApiClient,
    status: watch::Sender<SubmissionStatus>,
    in_flight: AtomicBool,
}

impl SubmissionController {
    /// Create a controller in the `Idle` state.
    pub fn new(api: ApiClient) -> Self {
        let (status, _) = watch::channel(SubmissionStatus::Idle);
        Self {
            api,
            status,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Current status.
    pub fn status(&self) -> SubmissionStatus {
        self.status.borrow().clone()
    }

    /// Receive every status change.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.subscribe()
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submit the form.
    ///
    /// Returns `true` when the server reports the submission as received.
    /// A call made while another submission is in flight is refused and
    /// returns `false` without touching the network or the status.
    pub async fn submit(&self, request: &ContactRequest) -> bool {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Submission already in flight, ignoring");
            return false;
        }

        let mut guard = InFlightGuard {
            controller: self,
            settled: false,
        };
        self.status.send_replace(SubmissionStatus::Submitting);

        let outcome = match self.api.submit_contact(request).await {
            Ok(response) if response.is_received() => SubmissionStatus::Success {
                message: Some(response.message).filter(|m| !m.is_empty()),
            },
            Ok(response) => {
                tracing::warn!(status = %response.status, "Unexpected submission status");
                SubmissionStatus::failed()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Contact submission failed");
                SubmissionStatus::failed()
            }
        };

        let received = matches!(outcome, SubmissionStatus::Success { .. });
        self.status.send_replace(outcome);
        guard.settled = true;
        received
    }

    /// Return to `Idle` unless a submission is in flight.
    pub fn reset(&self) {
        if !self.is_submitting() {
            self.status.send_replace(SubmissionStatus::Idle);
        }
    }
}

/// Releases the in-flight flag, settling the status if the submit future was dropped.
struct InFlightGuard<'a> {
    controller: &'a SubmissionController,
    settled: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.controller
                .status
                .send_replace(SubmissionStatus::failed());
        }
        self.controller.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        assert!(!SubmissionStatus::Idle.is_terminal());
        assert!(SubmissionStatus::Submitting.is_submitting());
        assert!(SubmissionStatus::Success { message: None }.is_terminal());
        assert!(SubmissionStatus::failed().is_terminal());
    }

    #[test]
    fn test_new_controller_is_idle() {
        let controller = SubmissionController::new(ApiClient::new("http://localhost:5000/api").unwrap());
        assert_eq!(controller.status(), SubmissionStatus::Idle);
        assert!(!controller.is_submitting());
    }

    #[tokio::test]
    async fn test_network_failure_settles_on_error() {
        // Bind then drop a listener so the port refuses connections.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let controller =
            SubmissionController::new(ApiClient::new(&format!("http://{addr}/api")).unwrap());
        let ok = controller
            .submit(&ContactRequest::new("alex@example.com", "Hello"))
            .await;

        assert!(!ok);
        assert_eq!(
            controller.status(),
            SubmissionStatus::Error {
                message: SUBMIT_ERROR_MESSAGE.to_string()
            }
        );
        assert!(!controller.is_submitting());
    }
}
