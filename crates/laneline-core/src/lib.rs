//! # Laneline Core
//!
//! Foundation types shared by every Laneline crate:
//!
//! - [`identifiers`]: newtype identifiers for provider identities and
//!   app-generated records
//! - [`profile`]: the application-level user record and role
//! - [`errors`]: the unified [`CoreError`] used by collaborator interfaces
//! - [`time`]: millisecond timestamp helpers for view state
//!
//! This crate is deliberately small and dependency-light; it carries no
//! backend coupling so that higher layers stay testable with fakes.

pub mod errors;
pub mod identifiers;
pub mod profile;
pub mod time;

pub use errors::CoreError;
pub use identifiers::{IdentityKey, MessageId, ThreadId, WorkoutId};
pub use profile::{UserProfile, UserRole};
