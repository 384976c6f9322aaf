//! Session failure taxonomy
//!
//! Every failure the session can surface terminates in the single
//! [`Failure`](crate::SessionState::Failure) state variant carrying one of
//! these errors. There is no automatic retry at this layer; recovery is a
//! UI decision (typically the `abort` operation forcing a clean sign-out).

use laneline_core::IdentityKey;
use serde::{Deserialize, Serialize};

/// Error payload of the session failure state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SessionError {
    /// An identity is present but its profile record could not be loaded
    #[error("Profile loading failed: {message}")]
    ProfileLoading {
        /// Underlying store error, rendered
        message: String,
    },

    /// The identity provider swapped users under an active session
    ///
    /// This must never happen: it indicates a provider bug or an
    /// unexpected double-login, so it is surfaced loudly instead of being
    /// silently accepted.
    #[error("Signed-in user {current} was replaced by {observed}")]
    UserReplacedByAnother {
        /// Key of the user the session was established for
        current: IdentityKey,
        /// Key the identity stream reported instead
        observed: IdentityKey,
    },

    /// A step of the account-deletion protocol failed
    #[error("Account deletion failed: {message}")]
    AccountDeletion {
        /// Underlying error, rendered
        message: String,
    },
}

impl SessionError {
    /// Create a profile-loading failure from any renderable cause
    pub fn profile_loading(cause: impl ToString) -> Self {
        Self::ProfileLoading {
            message: cause.to_string(),
        }
    }

    /// Create the consistency-violation error
    pub fn user_replaced(current: IdentityKey, observed: IdentityKey) -> Self {
        Self::UserReplacedByAnother { current, observed }
    }

    /// Create an account-deletion failure from any renderable cause
    pub fn account_deletion(cause: impl ToString) -> Self {
        Self::AccountDeletion {
            message: cause.to_string(),
        }
    }

    /// Whether this error signals the impossible provider behavior
    #[must_use]
    pub fn is_consistency_violation(&self) -> bool {
        matches!(self, Self::UserReplacedByAnother { .. })
    }
}
