//! Environment-driven configuration
//!
//! Everything has a default except the Gemini API key. A missing key does not
//! stop the server; the page loads and explains that chat is unavailable.

use crate::llm::DEFAULT_MODEL;
use crate::session::DEFAULT_IDLE_TTL;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;

/// Primary and fallback variables holding the Gemini key
pub const API_KEY_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key is not set in the environment variables (GOOGLE_API_KEY). The chat is disabled.")]
    MissingApiKey,
    #[error("Failed to set up the Gemini client: {0}")]
    Client(String),
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub model: String,
    /// Alternative Gemini endpoint (proxy or test server)
    pub api_base: Option<String>,
    pub session_idle_ttl: Duration,
    api_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = match non_blank("CHAT_BIND") {
            Some(raw) => raw.trim().parse::<IpAddr>().map_err(|_| ConfigError::Invalid {
                var: "CHAT_BIND",
                expected: "an IP address",
                value: raw,
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match non_blank("CHAT_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "CHAT_PORT",
                expected: "a port number",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let session_idle_ttl = match non_blank("SESSION_IDLE_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid {
                    var: "SESSION_IDLE_TTL_SECS",
                    expected: "a number of seconds",
                    value: raw,
                })?,
            None => DEFAULT_IDLE_TTL,
        };

        Ok(Self {
            bind,
            port,
            model: non_blank("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: non_blank("GEMINI_API_BASE"),
            session_idle_ttl,
            api_key: API_KEY_VARS.iter().find_map(|key| non_blank(key)),
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// The Gemini key, or the error the UI reports when it is missing
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}
