//! Injected backend store interfaces for the app layer
//!
//! Thin wrappers over the remote document store; the backend decides
//! visibility (a coach lists their own drafts, a swimmer the published
//! workouts of connected coaches). All methods fail with
//! [`CoreError`](laneline_core::CoreError).

use crate::views::{Message, Thread, Workout};
use async_trait::async_trait;
use laneline_core::{CoreError, IdentityKey, ThreadId, WorkoutId};

/// Remote workout store
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// List the workouts visible to `viewer`.
    async fn list_workouts(&self, viewer: &IdentityKey) -> Result<Vec<Workout>, CoreError>;

    /// Create or update a workout record.
    async fn publish_workout(&self, workout: Workout) -> Result<(), CoreError>;

    /// Archive a workout.
    async fn archive_workout(&self, id: &WorkoutId) -> Result<(), CoreError>;
}

/// Remote message store
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// List the threads `user` participates in.
    async fn list_threads(&self, user: &IdentityKey) -> Result<Vec<Thread>, CoreError>;

    /// List the messages of a thread, oldest first.
    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<Message>, CoreError>;

    /// Append a message to its thread.
    async fn send_message(&self, message: Message) -> Result<(), CoreError>;

    /// Mark a thread read for `reader`.
    async fn mark_read(&self, thread: &ThreadId, reader: &IdentityKey) -> Result<(), CoreError>;
}
