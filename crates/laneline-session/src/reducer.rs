//! # Reconciliation Reducer
//!
//! Pure case analysis computing what follows from the current session
//! state and a newly observed identity. Runs once per identity-stream
//! emission; the driver in [`session`](crate::session) interprets the
//! returned [`Transition`].
//!
//! Keeping this a pure function keeps the priority order testable without
//! an identity provider, a store, or a runtime.

use crate::error::SessionError;
use crate::state::SessionState;
use laneline_core::IdentityKey;

/// Outcome of one reconciliation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// No transition; the current state stands
    Stay,
    /// Publish the contained state (still subject to emission suppression)
    Publish(SessionState),
    /// Asynchronously load the profile for this identity; the result
    /// becomes `SignedIn` on success or `Failure` on error
    LoadProfile(IdentityKey),
}

/// Decide the next transition. Cases are checked in priority order:
///
/// 1. a signed-in session observing a *different* present identity is a
///    fatal consistency violation, checked before everything else;
/// 2. a deletion in flight completes when the identity disappears;
/// 3. a deletion in flight otherwise holds;
/// 4. a completed deletion holds until explicitly acknowledged;
/// 5. an absent identity means signed out;
/// 6. a present identity triggers a profile load.
pub fn next_transition(current: &SessionState, observed: Option<&IdentityKey>) -> Transition {
    // Guard against impossible provider behavior: a user swap under an
    // active session is never accepted, whatever else is going on.
    if let (SessionState::SignedIn(profile), Some(key)) = (current, observed) {
        if profile.key != *key {
            return Transition::Publish(SessionState::Failure(SessionError::user_replaced(
                profile.key.clone(),
                key.clone(),
            )));
        }
    }

    match (current, observed) {
        (SessionState::DeletingAccount, None) => {
            Transition::Publish(SessionState::AccountDeleted)
        }
        (SessionState::DeletingAccount, Some(_)) => Transition::Stay,
        // Terminal until the UI acknowledges it via the explicit
        // completion operation, which drives SignedOut externally.
        (SessionState::AccountDeleted, _) => Transition::Stay,
        (_, None) => Transition::Publish(SessionState::SignedOut),
        (_, Some(key)) => Transition::LoadProfile(key.clone()),
    }
}
