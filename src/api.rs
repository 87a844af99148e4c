//! HTTP API for the heart health chat
//!
//! Serves the chat page and the JSON endpoints it talks to.

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;

use crate::chat::ConversationController;
use crate::config::ConfigError;
use crate::session::SessionManager;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    /// The controller, or why chat is disabled
    pub chat: Result<Arc<ConversationController>, ConfigError>,
}

impl AppState {
    pub fn new(
        sessions: SessionManager,
        chat: Result<ConversationController, ConfigError>,
    ) -> Self {
        Self {
            sessions: Arc::new(sessions),
            chat: chat.map(Arc::new),
        }
    }
}
