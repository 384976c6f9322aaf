//! Unified error type for Laneline collaborator interfaces
//!
//! All injected backend interfaces (profile store, workout store, message
//! store, identity deletion) fail with [`CoreError`]. Layers above decide
//! what a failure means for their own state; this type only carries the
//! category and a human-readable message.

use serde::{Deserialize, Serialize};

/// Unified error type for backend-facing operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum CoreError {
    /// Invalid input or argument
    #[error("Invalid: {message}")]
    Invalid {
        /// Description of the invalid input
        message: String,
    },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound {
        /// Description of what was not found
        message: String,
    },

    /// Network or transport failure
    #[error("Network error: {message}")]
    Network {
        /// Description of the network issue
        message: String,
    },

    /// Remote storage operation failed
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
    },

    /// Caller is not allowed to perform the operation
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Description of the permission issue
        message: String,
    },

    /// Internal invariant violation
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl CoreError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether a retry could plausibly succeed without user action
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        assert_eq!(
            CoreError::network("socket closed").to_string(),
            "Network error: socket closed"
        );
        assert_eq!(
            CoreError::not_found("profile user-42").to_string(),
            "Not found: profile user-42"
        );
    }

    #[test]
    fn test_transient_classification() {
        assert!(CoreError::network("timeout").is_transient());
        assert!(CoreError::not_found("record").is_transient());
        assert!(!CoreError::invalid("bad input").is_transient());
        assert!(!CoreError::permission_denied("nope").is_transient());
    }
}
