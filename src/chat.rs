//! Conversation controller
//!
//! Turns one user submission into one exchange: ask the model (with the
//! persona), record the question and the answer, and reveal the booking form
//! when the user asks for an appointment.

use crate::llm::{LlmError, LlmRequest, LlmService};
use crate::session::Session;
use crate::system_prompt::PERSONA;
use std::sync::Arc;
use thiserror::Error;

#[cfg(test)]
mod proptests;

/// Substring that reveals the booking form, matched case-insensitively
pub const APPOINTMENT_KEYWORD: &str = "appointment";

/// Longest message the chat box accepts, in characters
pub const MAX_MESSAGE_CHARS: usize = 500;

#[derive(Debug, Clone, Error)]
pub enum ChatError {
    /// Remote call failed or produced no text. The session is untouched.
    #[error("Generation failed: {0}")]
    GenerationFailed(#[from] LlmError),
}

/// Whether a message asks for the booking form
pub fn mentions_appointment(text: &str) -> bool {
    text.to_lowercase().contains(APPOINTMENT_KEYWORD)
}

/// What became of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input; nothing was sent or recorded
    Ignored,
    /// One user and one bot message were appended
    Exchanged,
}

pub struct ConversationController {
    llm: Arc<dyn LlmService>,
}

impl ConversationController {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }

    pub fn model_id(&self) -> &str {
        self.llm.model_id()
    }

    /// Run one exchange against `session`.
    ///
    /// Blank input is ignored. On failure the session is left exactly as it
    /// was; nothing is retried.
    pub async fn handle_message(
        &self,
        session: &mut Session,
        raw_text: &str,
    ) -> Result<Outcome, ChatError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Ok(Outcome::Ignored);
        }

        let request = LlmRequest::single_turn(PERSONA, text);
        let response = self.llm.complete(&request).await?;

        let reply = response.text();
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(ChatError::GenerationFailed(LlmError::empty_response(
                "Model returned an empty reply",
            )));
        }

        session.append_exchange(text, reply);

        if mentions_appointment(text) {
            session.set_show_form(true);
        }

        Ok(Outcome::Exchanged)
    }
}
