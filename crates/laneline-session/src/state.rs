//! # Session State
//!
//! The discriminated union every frontend renders the authentication flow
//! from. Exactly one variant is active at a time; transitions are driven
//! exclusively by the reconciliation reducer and the explicit
//! account-deletion operations on [`Session`](crate::Session).

use crate::error::SessionError;
use laneline_core::{IdentityKey, UserProfile};
use serde::{Deserialize, Serialize};

/// Discrete session state
///
/// Created as [`Undefined`](Self::Undefined) when a session starts and
/// torn down with the owning [`Session`](crate::Session).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionState {
    /// Initial state, before the first identity event arrives
    Undefined,
    /// No external identity is present
    SignedOut,
    /// An identity is present and its profile record loaded successfully
    SignedIn(UserProfile),
    /// An identity is present but unusable (profile load failed or an
    /// invariant was violated)
    Failure(SessionError),
    /// A deletion request was issued and is in flight
    DeletingAccount,
    /// Deletion completed; held until the UI acknowledges it
    AccountDeleted,
}

/// Equality is tuned for emission suppression, not structural identity:
/// two `SignedIn` states are equal iff their identity keys match, two
/// `Failure` states are always equal (payload not compared), and the
/// remaining variants compare by tag alone.
impl PartialEq for SessionState {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SignedIn(a), Self::SignedIn(b)) => a.key == b.key,
            (Self::Failure(_), Self::Failure(_)) => true,
            (Self::Undefined, Self::Undefined)
            | (Self::SignedOut, Self::SignedOut)
            | (Self::DeletingAccount, Self::DeletingAccount)
            | (Self::AccountDeleted, Self::AccountDeleted) => true,
            _ => false,
        }
    }
}

impl Eq for SessionState {}

impl SessionState {
    /// Short label for logging and diagnostics
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::SignedOut => "signed-out",
            Self::SignedIn(_) => "signed-in",
            Self::Failure(_) => "failure",
            Self::DeletingAccount => "deleting-account",
            Self::AccountDeleted => "account-deleted",
        }
    }

    /// Whether a profile is loaded and the session is usable
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    /// Whether the session is in the failure state
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The loaded profile, when signed in
    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::SignedIn(profile) => Some(profile),
            _ => None,
        }
    }

    /// The identity key of the signed-in user, when signed in
    #[must_use]
    pub fn identity_key(&self) -> Option<&IdentityKey> {
        self.profile().map(|p| &p.key)
    }
}
