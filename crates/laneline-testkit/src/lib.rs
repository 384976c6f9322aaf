//! # Laneline Testkit
//!
//! In-memory fakes for every injected collaborator interface, plus
//! factory helpers for domain records. Fakes support scripted failures
//! (and, for profile loads, an async gate to hold a call in flight) so
//! tests can exercise error and race paths deterministically.

pub mod factories;
pub mod identity;
pub mod messages;
pub mod profiles;
pub mod workouts;

pub use identity::FakeIdentityProvider;
pub use messages::InMemoryMessageStore;
pub use profiles::InMemoryProfileStore;
pub use workouts::InMemoryWorkoutStore;
