//! API request and response types

use crate::booking::BookingConfirmation;
use crate::session::SessionSnapshot;
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Response for chat action
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session: SessionSnapshot,
    /// True when the message was blank and nothing happened
    pub ignored: bool,
}

/// Whether chat is usable, and if not, why
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub chat_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub max_message_chars: usize,
}

/// Fixed choices for the booking form
#[derive(Debug, Serialize)]
pub struct BookingOptionsResponse {
    pub doctors: Vec<&'static str>,
    pub times: Vec<&'static str>,
}

/// Response for an accepted booking
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub confirmation: BookingConfirmation,
    pub summary: String,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
