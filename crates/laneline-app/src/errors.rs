//! App-layer error type

use laneline_core::CoreError;

/// Errors surfaced by [`AppCore`](crate::AppCore) operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// The operation requires a signed-in session
    #[error("Not signed in")]
    NotSignedIn,

    /// The signed-in user's role does not allow the operation
    #[error("Not permitted: {message}")]
    NotPermitted {
        /// Description of the missing permission
        message: String,
    },

    /// The backing store failed
    #[error(transparent)]
    Store(#[from] CoreError),
}

impl AppError {
    /// Create a role-permission error
    pub fn not_permitted(message: impl Into<String>) -> Self {
        Self::NotPermitted {
            message: message.into(),
        }
    }
}
