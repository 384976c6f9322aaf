//! # App Core
//!
//! Composes the session state machine with the domain stores and exposes
//! reactive view state. Frontends hold one `AppCore`, render from its
//! signals, and call its operations; nothing here blocks on the UI.
//!
//! Every domain operation is guarded by the session: outside
//! [`SessionState::SignedIn`](laneline_session::SessionState) it fails
//! with [`AppError::NotSignedIn`] instead of reaching the backend.

use std::sync::Arc;

use futures_signals::signal::{Mutable, Signal};
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::stores::{MessageStore, WorkoutStore};
use crate::views::{Message, MessagesState, Workout, WorkoutStatus, WorkoutsState};
use laneline_core::time::now_millis;
use laneline_core::{MessageId, ThreadId, UserProfile, WorkoutId};
use laneline_session::{IdentityProvider, ProfileStore, Session};

/// The portable application core
pub struct AppCore {
    config: AppConfig,
    session: Session,
    workout_store: Arc<dyn WorkoutStore>,
    message_store: Arc<dyn MessageStore>,
    workouts: Mutable<WorkoutsState>,
    messages: Mutable<MessagesState>,
}

impl AppCore {
    /// Create the app core over injected collaborators and start the
    /// session pipeline. Must be called within a tokio runtime.
    pub fn new(
        config: AppConfig,
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileStore>,
        workout_store: Arc<dyn WorkoutStore>,
        message_store: Arc<dyn MessageStore>,
    ) -> Self {
        Self {
            config,
            session: Session::start(identity, profiles),
            workout_store,
            message_store,
            workouts: Mutable::new(WorkoutsState::default()),
            messages: Mutable::new(MessagesState::default()),
        }
    }

    /// The session state machine
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Static configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn current_profile(&self) -> Result<UserProfile, AppError> {
        self.session
            .state()
            .profile()
            .cloned()
            .ok_or(AppError::NotSignedIn)
    }

    // =========================================================================
    // Workouts
    // =========================================================================

    /// Snapshot of the workout view state
    #[must_use]
    pub fn workouts(&self) -> WorkoutsState {
        self.workouts.get_cloned()
    }

    /// Signal of workout view-state changes
    pub fn workouts_signal(&self) -> impl Signal<Item = WorkoutsState> {
        self.workouts.signal_cloned()
    }

    /// Reload the workout list visible to the signed-in user
    pub async fn refresh_workouts(&self) -> Result<(), AppError> {
        let profile = self.current_profile()?;
        let mut list = self.workout_store.list_workouts(&profile.key).await?;
        list.truncate(self.config.workout_page_size);
        debug!(count = list.len(), "workouts refreshed");
        self.workouts.lock_mut().set_workouts(list);
        Ok(())
    }

    /// Set or clear the tag filter on the workout list
    pub fn set_workout_tag_filter(&self, tag: Option<String>) {
        self.workouts.lock_mut().set_tag_filter(tag);
    }

    /// Set or clear the status filter on the workout list
    pub fn set_workout_status_filter(&self, status: Option<WorkoutStatus>) {
        self.workouts.lock_mut().set_status_filter(status);
    }

    /// Clear both workout filters
    pub fn clear_workout_filters(&self) {
        self.workouts.lock_mut().clear_filters();
    }

    /// Publish a workout authored by the signed-in coach.
    ///
    /// The workout is stamped with the caller's identity and moved to
    /// [`WorkoutStatus::Published`] before it is written.
    pub async fn publish_workout(&self, mut workout: Workout) -> Result<WorkoutId, AppError> {
        let profile = self.current_profile()?;
        if !profile.role.can_publish_workouts() {
            return Err(AppError::not_permitted("only coaches publish workouts"));
        }

        workout.coach = profile.key;
        workout.updated_at = now_millis();
        if workout.status != WorkoutStatus::Published {
            workout.status = WorkoutStatus::Published;
            workout.published_at = Some(workout.updated_at);
        }

        let id = workout.id;
        self.workout_store.publish_workout(workout.clone()).await?;
        self.workouts.lock_mut().upsert_workout(workout);
        Ok(id)
    }

    /// Archive a workout and reflect the change locally
    pub async fn archive_workout(&self, id: &WorkoutId) -> Result<(), AppError> {
        let _ = self.current_profile()?;
        self.workout_store.archive_workout(id).await?;

        let mut workouts = self.workouts.lock_mut();
        if let Some(workout) = workouts.workout(id).cloned() {
            let mut archived = workout;
            archived.status = WorkoutStatus::Archived;
            archived.updated_at = now_millis();
            workouts.upsert_workout(archived);
        }
        Ok(())
    }

    // =========================================================================
    // Messages
    // =========================================================================

    /// Snapshot of the message view state
    #[must_use]
    pub fn messages(&self) -> MessagesState {
        self.messages.get_cloned()
    }

    /// Signal of message view-state changes
    pub fn messages_signal(&self) -> impl Signal<Item = MessagesState> {
        self.messages.signal_cloned()
    }

    /// Reload the signed-in user's thread list
    pub async fn refresh_threads(&self) -> Result<(), AppError> {
        let profile = self.current_profile()?;
        let threads = self.message_store.list_threads(&profile.key).await?;
        debug!(count = threads.len(), "threads refreshed");
        self.messages.lock_mut().set_threads(threads);
        Ok(())
    }

    /// Reload one thread's messages, keeping the most recent page
    pub async fn refresh_messages(&self, thread: &ThreadId) -> Result<(), AppError> {
        let _ = self.current_profile()?;
        let mut list = self.message_store.list_messages(thread).await?;
        if list.len() > self.config.message_page_size {
            let skip = list.len() - self.config.message_page_size;
            list.drain(0..skip);
        }
        self.messages.lock_mut().set_messages(*thread, list);
        Ok(())
    }

    /// Send a message in a thread as the signed-in user
    pub async fn send_message(
        &self,
        thread: &ThreadId,
        body: impl Into<String>,
    ) -> Result<MessageId, AppError> {
        let profile = self.current_profile()?;
        let message = Message {
            id: MessageId::new(),
            thread_id: *thread,
            sender: profile.key,
            body: body.into(),
            sent_at: now_millis(),
            is_own: true,
            is_read: true,
        };

        let id = message.id;
        self.message_store.send_message(message.clone()).await?;
        self.messages.lock_mut().apply_message(message);
        Ok(id)
    }

    /// Mark a thread read, remotely and locally
    pub async fn mark_thread_read(&self, thread: &ThreadId) -> Result<(), AppError> {
        let profile = self.current_profile()?;
        self.message_store.mark_read(thread, &profile.key).await?;
        self.messages.lock_mut().mark_thread_read(thread);
        Ok(())
    }
}
