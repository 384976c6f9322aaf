//! End-to-end session lifecycle tests against the testkit fakes.
//!
//! These run on the default current-thread test runtime, so the driver
//! task only makes progress across await points; synchronous assertions
//! right after an operation observe the state the operation left behind.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use futures::StreamExt;
use futures_signals::signal::SignalExt;
use laneline_core::IdentityKey;
use laneline_session::{Session, SessionError, SessionState};
use laneline_testkit::factories::swimmer_profile;
use laneline_testkit::{FakeIdentityProvider, InMemoryProfileStore};
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(2);

/// Wait until the state signal reaches a value equal (by the session
/// equality rule) to `expected`, returning the actual state.
async fn wait_for_state(session: &Session, expected: SessionState) -> SessionState {
    let mut stream = session.state_signal().to_stream();
    timeout(WAIT, async {
        loop {
            match stream.next().await {
                Some(state) if state == expected => return state,
                Some(_) => {}
                None => panic!("state signal ended before reaching {}", expected.label()),
            }
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for {}", expected.label()))
}

/// Poll a condition until it holds.
async fn wait_until(mut condition: impl FnMut() -> bool) {
    timeout(WAIT, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

/// Any failure state; payload is irrelevant for equality.
fn any_failure() -> SessionState {
    SessionState::Failure(SessionError::profile_loading("any"))
}

#[tokio::test]
async fn fresh_session_is_undefined_until_first_event() {
    let provider = Arc::new(FakeIdentityProvider::new());
    let store = Arc::new(InMemoryProfileStore::new());
    let session = Session::start(provider.clone(), store.clone());

    // The driver task has not run yet on this single-threaded runtime.
    assert_matches!(session.state(), SessionState::Undefined);

    wait_for_state(&session, SessionState::SignedOut).await;
    assert_eq!(store.load_calls(), 0);
}

#[tokio::test]
async fn publishes_the_literal_example_sequence() {
    // Undefined -> SignedIn({user-42, Jo}) -> SignedOut, nothing else.
    let provider = Arc::new(FakeIdentityProvider::signed_in_as("user-42"));
    let store = Arc::new(InMemoryProfileStore::with_profiles([swimmer_profile(
        "user-42", "Jo",
    )]));
    let session = Session::start(provider.clone(), store.clone());

    let mut stream = session.state_signal().to_stream();
    assert_matches!(stream.next().await, Some(SessionState::Undefined));

    let state = timeout(WAIT, stream.next()).await.expect("timed out");
    assert_matches!(
        state,
        Some(SessionState::SignedIn(ref p))
            if p.key == IdentityKey::from("user-42") && p.display_name == "Jo"
    );

    provider.clear_identity();
    let state = timeout(WAIT, stream.next()).await.expect("timed out");
    assert_matches!(state, Some(SessionState::SignedOut));
}

#[tokio::test]
async fn repeated_identity_for_same_user_is_suppressed() {
    let provider = Arc::new(FakeIdentityProvider::signed_in_as("user-1"));
    let store = Arc::new(InMemoryProfileStore::with_profiles([swimmer_profile(
        "user-1", "Jo",
    )]));
    let session = Session::start(provider.clone(), store.clone());
    wait_for_state(&session, SessionState::SignedIn(swimmer_profile("user-1", "Jo"))).await;

    // The same user signs in again and the store now holds a newer name.
    // The reload happens, but the equal state must not be republished.
    store.insert_profile(swimmer_profile("user-1", "Joanna"));
    provider.set_identity("user-1");
    wait_until(|| store.load_calls() == 2).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_matches!(
        session.state(),
        SessionState::SignedIn(p) if p.display_name == "Jo"
    );
}

#[tokio::test]
async fn identity_swap_is_a_fatal_consistency_violation() {
    let provider = Arc::new(FakeIdentityProvider::signed_in_as("user-1"));
    let store = Arc::new(InMemoryProfileStore::with_profiles([
        swimmer_profile("user-1", "Jo"),
        swimmer_profile("user-2", "Sam"),
    ]));
    let session = Session::start(provider.clone(), store.clone());
    wait_for_state(&session, SessionState::SignedIn(swimmer_profile("user-1", "Jo"))).await;

    // The provider reports a different user with no sign-out in between.
    provider.set_identity("user-2");
    let state = wait_for_state(&session, any_failure()).await;
    assert_matches!(
        state,
        SessionState::Failure(SessionError::UserReplacedByAnother { current, observed })
            if current == IdentityKey::from("user-1") && observed == IdentityKey::from("user-2")
    );

    // The guard fires before any load for the replacement user.
    assert_eq!(store.load_calls(), 1);
    let message = session.error_message().expect("failure message set");
    assert!(message.contains("was replaced by"), "got: {message}");
}

#[tokio::test]
async fn identity_absence_signs_out() {
    let provider = Arc::new(FakeIdentityProvider::signed_in_as("user-1"));
    let store = Arc::new(InMemoryProfileStore::with_profiles([swimmer_profile(
        "user-1", "Jo",
    )]));
    let session = Session::start(provider.clone(), store.clone());
    wait_for_state(&session, SessionState::SignedIn(swimmer_profile("user-1", "Jo"))).await;

    provider.clear_identity();
    wait_for_state(&session, SessionState::SignedOut).await;
}

#[tokio::test]
async fn profile_load_failure_surfaces_failure_state() {
    let provider = Arc::new(FakeIdentityProvider::signed_in_as("user-1"));
    let store = Arc::new(InMemoryProfileStore::new());
    let session = Session::start(provider.clone(), store.clone());

    let state = wait_for_state(&session, any_failure()).await;
    assert_matches!(state, SessionState::Failure(SessionError::ProfileLoading { .. }));
    let message = session.error_message().expect("failure message set");
    assert!(message.contains("Not found"), "got: {message}");
}

#[tokio::test]
async fn second_failure_updates_the_error_message_without_a_state_emission() {
    let provider = Arc::new(FakeIdentityProvider::signed_in_as("user-1"));
    let store = Arc::new(InMemoryProfileStore::new());
    let session = Session::start(provider.clone(), store.clone());
    wait_for_state(&session, any_failure()).await;

    // A different error while already in the failure state: the state
    // value is suppressed by the payload-blind equality, but the message
    // observable still updates.
    store.fail_loads("backend unreachable");
    provider.set_identity("user-1");
    wait_until(|| {
        session
            .error_message()
            .is_some_and(|m| m.contains("backend unreachable"))
    })
    .await;
    assert_matches!(session.state(), SessionState::Failure(_));
}

#[tokio::test]
async fn failure_recovers_when_the_profile_becomes_loadable() {
    let provider = Arc::new(FakeIdentityProvider::signed_in_as("user-1"));
    let store = Arc::new(InMemoryProfileStore::new());
    let session = Session::start(provider.clone(), store.clone());
    wait_for_state(&session, any_failure()).await;

    store.insert_profile(swimmer_profile("user-1", "Jo"));
    provider.set_identity("user-1");
    wait_for_state(&session, SessionState::SignedIn(swimmer_profile("user-1", "Jo"))).await;
}

#[tokio::test]
async fn account_deletion_happy_path() {
    let provider = Arc::new(FakeIdentityProvider::signed_in_as("user-1"));
    let store = Arc::new(InMemoryProfileStore::with_profiles([swimmer_profile(
        "user-1", "Jo",
    )]));
    let session = Session::start(provider.clone(), store.clone());
    wait_for_state(&session, SessionState::SignedIn(swimmer_profile("user-1", "Jo"))).await;

    session.delete_current_account().await;

    // Optimistic transition held after a successful backend deletion;
    // only the identity stream may confirm completion.
    assert_matches!(session.state(), SessionState::DeletingAccount);
    assert_eq!(store.delete_calls(), 1);
    assert_eq!(provider.delete_calls(), 1);
    assert!(!store.contains(&IdentityKey::from("user-1")));

    // The provider still reporting the user mid-deletion changes nothing.
    provider.set_identity("user-1");
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_matches!(session.state(), SessionState::DeletingAccount);

    // Deletion is confirmed by the identity disappearing.
    provider.clear_identity();
    wait_for_state(&session, SessionState::AccountDeleted).await;

    // The final hop is the explicit acknowledgment.
    session.account_deletion_completion();
    assert_matches!(session.state(), SessionState::SignedOut);
}

#[tokio::test]
async fn account_deletion_failure_aborts_into_failure() {
    let provider = Arc::new(FakeIdentityProvider::signed_in_as("user-1"));
    let store = Arc::new(InMemoryProfileStore::with_profiles([swimmer_profile(
        "user-1", "Jo",
    )]));
    let session = Session::start(provider.clone(), store.clone());
    wait_for_state(&session, SessionState::SignedIn(swimmer_profile("user-1", "Jo"))).await;

    provider.fail_deletion("identity backend rejected the request");
    session.delete_current_account().await;

    // Straight to failure, never through AccountDeleted.
    assert_matches!(
        session.state(),
        SessionState::Failure(SessionError::AccountDeletion { .. })
    );
    let message = session.error_message().expect("failure message set");
    assert!(message.contains("identity backend rejected"), "got: {message}");
}

#[tokio::test]
async fn account_deletion_requires_a_signed_in_session() {
    let provider = Arc::new(FakeIdentityProvider::new());
    let store = Arc::new(InMemoryProfileStore::new());
    let session = Session::start(provider.clone(), store.clone());
    wait_for_state(&session, SessionState::SignedOut).await;

    session.delete_current_account().await;
    assert_matches!(session.state(), SessionState::SignedOut);
    assert_eq!(store.delete_calls(), 0);
    assert_eq!(provider.delete_calls(), 0);
}

#[tokio::test]
async fn deletion_completion_outside_account_deleted_is_a_no_op() {
    let provider = Arc::new(FakeIdentityProvider::signed_in_as("user-1"));
    let store = Arc::new(InMemoryProfileStore::with_profiles([swimmer_profile(
        "user-1", "Jo",
    )]));
    let session = Session::start(provider.clone(), store.clone());
    wait_for_state(&session, SessionState::SignedIn(swimmer_profile("user-1", "Jo"))).await;

    session.account_deletion_completion();
    assert_matches!(session.state(), SessionState::SignedIn(_));
}

#[tokio::test]
async fn abort_requests_a_sign_out() {
    let provider = Arc::new(FakeIdentityProvider::signed_in_as("user-1"));
    let store = Arc::new(InMemoryProfileStore::new());
    let session = Session::start(provider.clone(), store.clone());
    wait_for_state(&session, any_failure()).await;

    session.abort();
    assert_eq!(provider.sign_out_calls(), 1);

    // The fake accepted the request and dropped the identity.
    wait_for_state(&session, SessionState::SignedOut).await;
}

#[tokio::test]
async fn abort_tolerates_a_rejected_sign_out() {
    let provider = Arc::new(FakeIdentityProvider::signed_in_as("user-1"));
    let store = Arc::new(InMemoryProfileStore::with_profiles([swimmer_profile(
        "user-1", "Jo",
    )]));
    let session = Session::start(provider.clone(), store.clone());
    wait_for_state(&session, SessionState::SignedIn(swimmer_profile("user-1", "Jo"))).await;

    provider.set_sign_out_accepted(false);
    session.abort();
    assert_eq!(provider.sign_out_calls(), 1);

    // Rejection is logged, not fatal; the session is untouched.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_matches!(session.state(), SessionState::SignedIn(_));
}

#[tokio::test]
async fn superseded_profile_load_is_discarded() {
    let provider = Arc::new(FakeIdentityProvider::new());
    let store = Arc::new(InMemoryProfileStore::with_profiles([
        swimmer_profile("user-1", "Jo"),
        swimmer_profile("user-2", "Sam"),
    ]));
    let session = Session::start(provider.clone(), store.clone());
    wait_for_state(&session, SessionState::SignedOut).await;

    // Hold the first load in flight, then supersede its identity.
    let gate = store.hold_loads().await;
    provider.set_identity("user-1");
    wait_until(|| store.load_calls() == 1).await;
    provider.set_identity("user-2");
    drop(gate);

    // The stale user-1 result must be discarded; publishing it would trip
    // the consistency guard on the subsequent user-2 observation and end
    // in Failure instead of SignedIn(user-2).
    let state =
        wait_for_state(&session, SessionState::SignedIn(swimmer_profile("user-2", "Sam"))).await;
    assert_matches!(state, SessionState::SignedIn(p) if p.key == IdentityKey::from("user-2"));
    assert_eq!(store.load_calls(), 2);
}
