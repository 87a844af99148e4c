//! Common types for LLM interactions

/// Single-turn LLM request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmRequest {
    /// System instruction (the persona); empty means none
    pub system: String,
    pub user_text: String,
}

impl LlmRequest {
    pub fn single_turn(system: impl Into<String>, user_text: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user_text: user_text.into(),
        }
    }
}

/// LLM response
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    /// Text parts in the order the provider returned them
    pub parts: Vec<String>,
    pub finish_reason: Option<String>,
    pub usage: Usage,
}

impl LlmResponse {
    /// Response consisting of a single text part
    #[cfg(test)]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![text.into()],
            finish_reason: Some("STOP".to_string()),
            usage: Usage::default(),
        }
    }

    /// Get text content from the response
    pub fn text(&self) -> String {
        self.parts.concat()
    }
}

/// Usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
