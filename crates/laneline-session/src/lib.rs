//! # Laneline Session
//!
//! Reconciles two independently-asynchronous inputs into a single
//! authoritative session state:
//!
//! - the live identity stream from the external identity provider
//!   (sign-in and sign-out notifications), and
//! - on-demand profile lookups from the remote document store.
//!
//! The result is one discrete [`SessionState`] published through a
//! reactive signal, with redundant emissions suppressed, plus an explicit
//! multi-step account-deletion protocol.
//!
//! ## Shape
//!
//! - [`reducer`]: the pure `(current state, observed identity) -> next`
//!   case analysis
//! - [`Session`]: the driver that owns the state, subscribes to the
//!   identity stream, and performs profile loads
//! - [`IdentityProvider`] / [`ProfileStore`]: injected collaborator
//!   interfaces, trivially replaceable with fakes in tests

pub mod error;
pub mod provider;
pub mod reducer;
pub mod session;
pub mod state;

pub use error::SessionError;
pub use provider::{IdentityProvider, ProfileStore};
pub use reducer::Transition;
pub use session::Session;
pub use state::SessionState;
