//! Fake profile store
//!
//! HashMap-backed store with scripted load failures and an async gate:
//! while a test holds the gate, every `load_profile` call blocks, which
//! makes in-flight-load races reproducible.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use laneline_core::{CoreError, IdentityKey, UserProfile};
use laneline_session::ProfileStore;
use parking_lot::Mutex;

/// Scriptable in-memory profile store
pub struct InMemoryProfileStore {
    profiles: Mutex<HashMap<IdentityKey, UserProfile>>,
    load_error: Mutex<Option<String>>,
    gate: Arc<async_lock::Mutex<()>>,
    load_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl InMemoryProfileStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
            load_error: Mutex::new(None),
            gate: Arc::new(async_lock::Mutex::new(())),
            load_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// Create a store holding the given profiles
    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let store = Self::new();
        for profile in profiles {
            store.insert_profile(profile);
        }
        store
    }

    /// Insert or replace a profile record
    pub fn insert_profile(&self, profile: UserProfile) {
        self.profiles.lock().insert(profile.key.clone(), profile);
    }

    /// Whether a record exists for `key`
    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.profiles.lock().contains_key(key)
    }

    /// Script every subsequent load to fail with a network error
    pub fn fail_loads(&self, message: impl Into<String>) {
        *self.load_error.lock() = Some(message.into());
    }

    /// Let loads succeed again
    pub fn clear_load_failure(&self) {
        *self.load_error.lock() = None;
    }

    /// Hold the load gate: every `load_profile` blocks until the returned
    /// guard is dropped.
    pub async fn hold_loads(&self) -> async_lock::MutexGuardArc<()> {
        self.gate.lock_arc().await
    }

    /// Number of `load_profile` calls observed
    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    /// Number of `delete_profile` calls observed
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn load_profile(&self, key: &IdentityKey) -> Result<UserProfile, CoreError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        let _held = self.gate.lock().await;

        if let Some(message) = self.load_error.lock().clone() {
            return Err(CoreError::network(message));
        }
        self.profiles
            .lock()
            .get(key)
            .cloned()
            .ok_or_else(|| CoreError::not_found(format!("profile {key}")))
    }

    async fn delete_profile(&self, key: &IdentityKey) -> Result<(), CoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.profiles.lock().remove(key);
        Ok(())
    }
}
