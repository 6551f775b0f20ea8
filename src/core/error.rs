use std::io;
use thiserror::Error;

/// Unified error type for the fallback chat client
#[derive(Error, Debug)]
pub enum ChatError {
    /// Completion endpoint answered, but not with something usable
    #[error("API error: {0}")]
    Api(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),

    /// Every model in the fallback chain failed
    #[error("All models failed to respond ({attempts} attempted)")]
    Exhausted {
        attempts: usize,
        last_error: Option<Box<ChatError>>,
    },
}

impl ChatError {
    pub fn exhausted(attempts: usize, last_error: Option<ChatError>) -> Self {
        ChatError::Exhausted {
            attempts,
            last_error: last_error.map(Box::new),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, ChatError::Exhausted { .. })
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            ChatError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            ChatError::Api(format!("API returned error status: {}", err))
        } else if err.is_decode() {
            ChatError::Serialization(format!("Malformed response body: {}", err))
        } else {
            ChatError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for ChatError {
    fn from(err: serde_yml::Error) -> Self {
        ChatError::Serialization(format!("YAML error: {}", err))
    }
}
