//! Error types for the Shamba engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the Shamba workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ShambaError {
    /// The backend accepted the connection but rejected the request.
    /// Carries the collaborator-provided message when one was returned.
    #[error("Backend rejected the request: {message}")]
    Backend { message: String },

    /// Network-level failure reaching the backend.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", etc.
        message: String,
    },

    /// User-supplied input failed local validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShambaError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Backend error
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is an InvalidInput error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// The message to surface to the user in the transcript.
    ///
    /// Backend rejections show the collaborator-provided message as-is;
    /// everything else shows the full error description.
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for ShambaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<String> for ShambaError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, ShambaError>`.
pub type Result<T> = std::result::Result<T, ShambaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_user_message_is_verbatim() {
        let err = ShambaError::backend("Farmer not found");
        assert_eq!(err.user_message(), "Farmer not found");
    }

    #[test]
    fn test_transport_user_message_includes_kind() {
        let err = ShambaError::transport("connection refused");
        assert!(err.user_message().contains("connection refused"));
        assert!(err.is_transport());
    }
}
