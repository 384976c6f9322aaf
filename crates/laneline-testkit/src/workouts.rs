//! Fake workout store

use std::collections::HashMap;

use async_trait::async_trait;
use laneline_app::{Workout, WorkoutStatus, WorkoutStore};
use laneline_core::{CoreError, IdentityKey, WorkoutId};
use parking_lot::Mutex;

/// Scriptable in-memory workout store
///
/// Visibility is simplified for tests: a viewer sees their own workouts
/// plus every published workout.
pub struct InMemoryWorkoutStore {
    workouts: Mutex<HashMap<WorkoutId, Workout>>,
    error: Mutex<Option<String>>,
}

impl InMemoryWorkoutStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            workouts: Mutex::new(HashMap::new()),
            error: Mutex::new(None),
        }
    }

    /// Seed the store with workouts
    pub fn with_workouts(workouts: impl IntoIterator<Item = Workout>) -> Self {
        let store = Self::new();
        for workout in workouts {
            store.workouts.lock().insert(workout.id, workout);
        }
        store
    }

    /// Script every subsequent call to fail with a storage error
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.error.lock() = Some(message.into());
    }

    /// Direct lookup for assertions
    pub fn workout(&self, id: &WorkoutId) -> Option<Workout> {
        self.workouts.lock().get(id).cloned()
    }

    fn check_error(&self) -> Result<(), CoreError> {
        match self.error.lock().clone() {
            Some(message) => Err(CoreError::storage(message)),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryWorkoutStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkoutStore for InMemoryWorkoutStore {
    async fn list_workouts(&self, viewer: &IdentityKey) -> Result<Vec<Workout>, CoreError> {
        self.check_error()?;
        let mut list: Vec<Workout> = self
            .workouts
            .lock()
            .values()
            .filter(|w| w.coach == *viewer || w.status == WorkoutStatus::Published)
            .cloned()
            .collect();
        list.sort_by_key(|w| std::cmp::Reverse(w.updated_at));
        Ok(list)
    }

    async fn publish_workout(&self, workout: Workout) -> Result<(), CoreError> {
        self.check_error()?;
        self.workouts.lock().insert(workout.id, workout);
        Ok(())
    }

    async fn archive_workout(&self, id: &WorkoutId) -> Result<(), CoreError> {
        self.check_error()?;
        let mut workouts = self.workouts.lock();
        let workout = workouts
            .get_mut(id)
            .ok_or_else(|| CoreError::not_found(format!("{id}")))?;
        workout.status = WorkoutStatus::Archived;
        Ok(())
    }
}
