//! Per-session chat state
//!
//! A [`Session`] holds the transcript and the booking-form flag for one
//! browser session. Sessions never share state; [`SessionManager`] hands out
//! one independent store per session id.

mod manager;

#[cfg(test)]
mod proptests;

pub use manager::{SessionManager, SessionNotFound, DEFAULT_IDLE_TTL};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Bot,
}

/// One transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    role: Role,
    content: String,
    created_at: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: String) -> Self {
        Self {
            role,
            content,
            created_at: Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Transcript plus booking-form visibility for one session
///
/// History is append-only and only grows by whole exchanges, so its length
/// is always even.
#[derive(Debug, Clone, Default)]
pub struct Session {
    history: Vec<Message>,
    show_form: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message followed by the bot reply
    pub fn append_exchange(&mut self, user_text: impl Into<String>, bot_text: impl Into<String>) {
        self.history.push(Message::new(Role::User, user_text.into()));
        self.history.push(Message::new(Role::Bot, bot_text.into()));
    }

    pub fn set_show_form(&mut self, flag: bool) {
        self.show_form = flag;
    }

    pub fn show_form(&self) -> bool {
        self.show_form
    }

    /// Transcript in display order
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Clear the transcript and hide the booking form
    pub fn reset(&mut self) {
        self.history.clear();
        self.show_form = false;
    }

    /// Serializable copy of the current state
    pub fn snapshot(&self, id: &str) -> SessionSnapshot {
        SessionSnapshot {
            id: id.to_string(),
            history: self.history.clone(),
            show_form: self.show_form,
        }
    }
}

/// What the UI renders from
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub history: Vec<Message>,
    pub show_form: bool,
}
