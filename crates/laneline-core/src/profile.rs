//! # User Profile
//!
//! The application-level user record, keyed by the provider-issued
//! [`IdentityKey`]. Profiles live in the remote document store; this type
//! is the in-memory shape every layer above the store traits works with.

use crate::identifiers::IdentityKey;
use serde::{Deserialize, Serialize};

/// Role of a platform user
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Publishes workouts and answers messages
    Coach,
    /// Follows published workouts
    #[default]
    Swimmer,
}

impl UserRole {
    /// Get a display label for the role
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Coach => "Coach",
            Self::Swimmer => "Swimmer",
        }
    }

    /// Whether this role may publish workouts
    #[must_use]
    pub fn can_publish_workouts(&self) -> bool {
        matches!(self, Self::Coach)
    }
}

/// Application-level user record
///
/// Equality here is full structural equality; the session layer applies
/// its own key-only comparison where redundant emissions must be
/// suppressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider-issued identity key this profile is stored under
    pub key: IdentityKey,
    /// Name shown in rosters and message threads
    pub display_name: String,
    /// Coach or swimmer
    pub role: UserRole,
    /// Remote URL of the profile photo, if one was uploaded
    pub photo_url: Option<String>,
    /// Free-form short bio
    pub bio: Option<String>,
}

impl UserProfile {
    /// Create a profile with the required fields and no photo or bio
    pub fn new(key: IdentityKey, display_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            key,
            display_name: display_name.into(),
            role,
            photo_url: None,
            bio: None,
        }
    }

    /// Whether this profile belongs to a coach
    #[must_use]
    pub fn is_coach(&self) -> bool {
        self.role == UserRole::Coach
    }
}
