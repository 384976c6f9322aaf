//! Fake identity provider
//!
//! Drives the identity stream from the test: `set_identity` /
//! `clear_identity` stand in for the provider's auth-state callbacks.
//! Sign-out and deletion outcomes are scripted, and calls are counted so
//! tests can assert on provider interactions.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use laneline_core::{CoreError, IdentityKey};
use laneline_session::IdentityProvider;
use parking_lot::Mutex;
use tokio::sync::watch;

/// Scriptable in-memory identity provider
pub struct FakeIdentityProvider {
    events: watch::Sender<Option<IdentityKey>>,
    sign_out_accepted: AtomicBool,
    deletion_error: Mutex<Option<String>>,
    sign_out_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl FakeIdentityProvider {
    /// Create a provider with no signed-in identity
    pub fn new() -> Self {
        let (events, _) = watch::channel(None);
        Self {
            events,
            sign_out_accepted: AtomicBool::new(true),
            deletion_error: Mutex::new(None),
            sign_out_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// Create a provider already signed in as `key`
    pub fn signed_in_as(key: impl Into<IdentityKey>) -> Self {
        let provider = Self::new();
        provider.set_identity(key);
        provider
    }

    /// Emit a sign-in event for `key`
    pub fn set_identity(&self, key: impl Into<IdentityKey>) {
        self.events.send_replace(Some(key.into()));
    }

    /// Emit a sign-out event
    pub fn clear_identity(&self) {
        self.events.send_replace(None);
    }

    /// Script whether `sign_out` reports acceptance
    pub fn set_sign_out_accepted(&self, accepted: bool) {
        self.sign_out_accepted.store(accepted, Ordering::SeqCst);
    }

    /// Script `delete_identity` to fail with a storage error
    pub fn fail_deletion(&self, message: impl Into<String>) {
        *self.deletion_error.lock() = Some(message.into());
    }

    /// Number of `sign_out` calls observed
    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    /// Number of `delete_identity` calls observed
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

impl Default for FakeIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    fn subscribe(&self) -> watch::Receiver<Option<IdentityKey>> {
        self.events.subscribe()
    }

    fn sign_out(&self) -> bool {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if self.sign_out_accepted.load(Ordering::SeqCst) {
            self.clear_identity();
            true
        } else {
            false
        }
    }

    async fn delete_identity(&self) -> Result<(), CoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        match self.deletion_error.lock().clone() {
            Some(message) => Err(CoreError::storage(message)),
            None => Ok(()),
        }
    }
}
