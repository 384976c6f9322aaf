//! # Session Driver
//!
//! Owns the authoritative [`SessionState`] and the single reactive
//! pipeline that maintains it: one spawned task subscribes to the identity
//! stream, runs the [reducer](crate::reducer) on every emission, and
//! performs the profile load the reducer requests.
//!
//! The three UI-facing operations (`delete_current_account`,
//! `account_deletion_completion`, `abort`) are the only external inputs
//! besides the identity stream; there is no other mutation path.

use std::sync::Arc;

use futures_signals::signal::{Mutable, Signal};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::error::SessionError;
use crate::provider::{IdentityProvider, ProfileStore};
use crate::reducer::{self, Transition};
use crate::state::SessionState;
use laneline_core::{CoreError, IdentityKey};

/// The session state machine
///
/// Created with [`Session::start`]; dropping it tears the pipeline down.
pub struct Session {
    state: Mutable<SessionState>,
    error_message: Mutable<Option<String>>,
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    driver: JoinHandle<()>,
}

impl Session {
    /// Start a session over the injected collaborators.
    ///
    /// State begins as [`SessionState::Undefined`] and transitions on the
    /// first identity observation. Must be called within a tokio runtime:
    /// the reconciliation pipeline runs on a spawned task.
    pub fn start(identity: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        let state = Mutable::new(SessionState::Undefined);
        let error_message = Mutable::new(None);

        let driver = tokio::spawn(Self::drive(
            identity.subscribe(),
            Arc::clone(&profiles),
            state.clone(),
            error_message.clone(),
        ));

        Self {
            state,
            error_message,
            identity,
            profiles,
            driver,
        }
    }

    // =========================================================================
    // Read surface
    // =========================================================================

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.get_cloned()
    }

    /// Signal of state changes, replaying the current value on subscribe.
    ///
    /// Redundant emissions are already suppressed by the session-level
    /// equality rule on [`SessionState`].
    pub fn state_signal(&self) -> impl Signal<Item = SessionState> {
        self.state.signal_cloned()
    }

    /// The last failure message, if any
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error_message.get_cloned()
    }

    /// Signal of failure-message updates.
    ///
    /// Unlike the state signal this fires on every failure, including a
    /// second distinct error while already in the failure state.
    pub fn error_signal(&self) -> impl Signal<Item = Option<String>> {
        self.error_message.signal_cloned()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Delete the signed-in user's account.
    ///
    /// Publishes [`SessionState::DeletingAccount`] before any network
    /// call, freezing the UI into its deletion screen so stale input has
    /// no window to land in. The profile record is deleted first, then the
    /// identity itself; any error aborts into
    /// [`SessionState::Failure`]. On success no transition happens here;
    /// the identity stream's subsequent absence drives
    /// [`SessionState::AccountDeleted`] through the reducer.
    pub async fn delete_current_account(&self) {
        let key = match self.state.get_cloned() {
            SessionState::SignedIn(profile) => profile.key,
            other => {
                warn!(
                    state = other.label(),
                    "account deletion requested without an active session"
                );
                return;
            }
        };

        publish(&self.state, &self.error_message, SessionState::DeletingAccount);

        if let Err(err) = self.run_deletion(&key).await {
            publish(
                &self.state,
                &self.error_message,
                SessionState::Failure(SessionError::account_deletion(err)),
            );
        }
    }

    async fn run_deletion(&self, key: &IdentityKey) -> Result<(), CoreError> {
        // Profile record first: deleting the identity first would revoke
        // the caller's permission to remove its own document.
        self.profiles.delete_profile(key).await?;
        self.identity.delete_identity().await?;
        Ok(())
    }

    /// Acknowledge a completed deletion.
    ///
    /// The final `AccountDeleted -> SignedOut` hop is manual so the UI can
    /// show its one-time confirmation before returning to the signed-out
    /// flow. Outside `AccountDeleted` this is a no-op.
    pub fn account_deletion_completion(&self) {
        if matches!(self.state.get_cloned(), SessionState::AccountDeleted) {
            publish(&self.state, &self.error_message, SessionState::SignedOut);
        } else {
            warn!("deletion completion acknowledged outside the account-deleted state");
        }
    }

    /// Force a clean sign-out after an unrecoverable failure.
    ///
    /// Intended to be invoked when the user dismisses a fatal failure
    /// dialog, guaranteeing the app never continues in an inconsistent
    /// authenticated state. Sign-out is best-effort; refusal is logged.
    pub fn abort(&self) {
        if !self.identity.sign_out() {
            warn!("identity provider did not accept the sign-out request");
        }
    }

    // =========================================================================
    // Reconciliation pipeline
    // =========================================================================

    async fn drive(
        mut events: watch::Receiver<Option<IdentityKey>>,
        profiles: Arc<dyn ProfileStore>,
        state: Mutable<SessionState>,
        error_message: Mutable<Option<String>>,
    ) {
        loop {
            let observed = events.borrow_and_update().as_ref().cloned();
            Self::reconcile(&events, &profiles, &state, &error_message, observed).await;

            if events.changed().await.is_err() {
                // Identity provider dropped; the pipeline ends with it.
                debug!("identity stream closed");
                break;
            }
        }
    }

    /// One reconciliation step: reduce, then interpret the transition.
    async fn reconcile(
        events: &watch::Receiver<Option<IdentityKey>>,
        profiles: &Arc<dyn ProfileStore>,
        state: &Mutable<SessionState>,
        error_message: &Mutable<Option<String>>,
        observed: Option<IdentityKey>,
    ) {
        let current = state.get_cloned();
        match reducer::next_transition(&current, observed.as_ref()) {
            Transition::Stay => {}
            Transition::Publish(next) => publish(state, error_message, next),
            Transition::LoadProfile(key) => {
                let loaded = profiles.load_profile(&key).await;

                // The load is tagged with the key it was issued for; a
                // result whose key has been superseded, or that lands
                // after a deletion started, is discarded.
                if events.borrow().as_ref() != Some(&key) {
                    debug!(%key, "discarding profile load for superseded identity");
                    return;
                }
                if matches!(
                    state.get_cloned(),
                    SessionState::DeletingAccount | SessionState::AccountDeleted
                ) {
                    debug!(%key, "discarding profile load during account deletion");
                    return;
                }

                let next = match loaded {
                    Ok(profile) => SessionState::SignedIn(profile),
                    Err(err) => SessionState::Failure(SessionError::profile_loading(err)),
                };
                publish(state, error_message, next);
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Publish a computed state, suppressing redundant emissions.
///
/// Failures additionally update the error-message observable, and do so on
/// every failure even when the state emission itself is suppressed.
fn publish(
    state: &Mutable<SessionState>,
    error_message: &Mutable<Option<String>>,
    next: SessionState,
) {
    match &next {
        SessionState::Failure(err) if err.is_consistency_violation() => {
            error!(%err, "session consistency violation");
            error_message.set(Some(err.to_string()));
        }
        SessionState::Failure(err) => {
            warn!(%err, "session failure");
            error_message.set(Some(err.to_string()));
        }
        other => debug!(state = other.label(), "session transition"),
    }
    state.set_neq(next);
}
