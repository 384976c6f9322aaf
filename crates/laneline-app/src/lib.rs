//! # Laneline App
//!
//! Portable headless application core for the Laneline swim-coaching
//! platform. Frontends (mobile bindings, terminal) render from the
//! reactive state exposed here and never talk to the backend directly.
//!
//! - [`views`]: plain view-state types (workout lists with tag/status
//!   filtering, message threads with unread tallies)
//! - [`stores`]: injected backend store interfaces
//! - [`AppCore`]: composes the session state machine with the domain
//!   stores behind `futures-signals` state

pub mod app;
pub mod config;
pub mod errors;
pub mod stores;
pub mod views;

pub use app::AppCore;
pub use config::AppConfig;
pub use errors::AppError;
pub use stores::{MessageStore, WorkoutStore};
pub use views::{
    Message, MessagesState, Thread, Workout, WorkoutFilter, WorkoutStatus, WorkoutsState,
};
