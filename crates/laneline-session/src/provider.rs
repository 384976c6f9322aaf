//! Injected collaborator interfaces
//!
//! The session core consumes the identity provider and the profile store
//! exclusively through these traits, injected as `Arc<dyn …>` at
//! construction. Production code wires the vendor SDK behind them; tests
//! use the in-memory fakes from `laneline-testkit`.

use async_trait::async_trait;
use laneline_core::{CoreError, IdentityKey, UserProfile};
use tokio::sync::watch;

/// External identity provider
///
/// Emits the currently authenticated identity (or `None`) whenever it
/// changes, and accepts sign-out and account-deletion requests.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Subscribe to the live identity stream.
    ///
    /// The returned receiver replays the latest value immediately, so
    /// observers always see the current identity without waiting for the
    /// next change.
    fn subscribe(&self) -> watch::Receiver<Option<IdentityKey>>;

    /// Request a sign-out. Best-effort: `false` means the provider did not
    /// accept the request; callers log and move on.
    fn sign_out(&self) -> bool;

    /// Delete the identity itself at the provider.
    async fn delete_identity(&self) -> Result<(), CoreError>;
}

/// Remote profile record store
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load the profile record stored under `key`.
    async fn load_profile(&self, key: &IdentityKey) -> Result<UserProfile, CoreError>;

    /// Delete the profile record stored under `key`.
    async fn delete_profile(&self, key: &IdentityKey) -> Result<(), CoreError>;
}
