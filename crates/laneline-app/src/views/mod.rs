//! # View State Module
//!
//! Plain state types frontends render from. They are serializable for
//! debugging and snapshots, carry no backend coupling, and are published
//! through `futures-signals` by [`AppCore`](crate::AppCore).

pub mod messages;
pub mod workouts;

pub use messages::{Message, MessagesState, Thread};
pub use workouts::{Workout, WorkoutFilter, WorkoutStatus, WorkoutsState};
