//! API handlers for the bonsai club API.

pub mod contact;
pub mod events;
pub mod health;
pub mod resources;

pub use contact::*;
pub use events::*;
pub use health::*;
pub use resources::*;

use crate::config::SiteConfig;
use crate::contact::MailDispatcher;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Contact mail dispatcher, built once at startup.
    pub dispatcher: MailDispatcher,
    /// Site identity used in health responses.
    pub site: SiteConfig,
}

impl AppState {
    /// Create a new application state.
    pub fn new(dispatcher: MailDispatcher, site: SiteConfig) -> Self {
        Self { dispatcher, site }
    }
}
