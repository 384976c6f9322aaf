//! # Workout View State

use laneline_core::{IdentityKey, WorkoutId};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a workout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutStatus {
    /// Visible to the authoring coach only
    #[default]
    Draft,
    /// Visible to connected swimmers
    Published,
    /// Kept for history, hidden from active lists
    Archived,
}

impl WorkoutStatus {
    /// Get a display label for the status
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Archived => "Archived",
        }
    }

    /// Whether swimmers can see a workout in this status
    #[must_use]
    pub fn is_visible_to_swimmers(&self) -> bool {
        matches!(self, Self::Published)
    }
}

/// A coached workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    /// Workout identifier
    pub id: WorkoutId,
    /// Authoring coach
    pub coach: IdentityKey,
    /// Title shown in lists
    pub title: String,
    /// Full set description
    pub description: String,
    /// Lowercase tags ("sprint", "endurance", ...)
    pub tags: Vec<String>,
    /// Lifecycle status
    pub status: WorkoutStatus,
    /// Total distance in meters
    pub total_distance_m: u32,
    /// Estimated duration in minutes
    pub duration_minutes: u32,
    /// When the workout was published (ms since epoch)
    pub published_at: Option<u64>,
    /// Last modification (ms since epoch)
    pub updated_at: u64,
}

impl Workout {
    /// Whether this workout carries the given tag (case-insensitive)
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.to_lowercase();
        self.tags.iter().any(|t| *t == needle)
    }

    /// Normalize tags to lowercase and drop duplicates, preserving order
    pub fn normalize_tags(&mut self) {
        let mut seen = Vec::with_capacity(self.tags.len());
        for tag in self.tags.drain(..) {
            let tag = tag.to_lowercase();
            if !seen.contains(&tag) {
                seen.push(tag);
            }
        }
        self.tags = seen;
    }
}

/// Active list filter, combining tag and status with AND semantics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutFilter {
    /// Only workouts carrying this tag
    pub tag: Option<String>,
    /// Only workouts in this status
    pub status: Option<WorkoutStatus>,
}

impl WorkoutFilter {
    /// Whether no filter is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.status.is_none()
    }

    /// Whether a workout passes the filter
    #[must_use]
    pub fn matches(&self, workout: &Workout) -> bool {
        if let Some(tag) = &self.tag {
            if !workout.has_tag(tag) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if workout.status != status {
                return false;
            }
        }
        true
    }
}

/// Workout list state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutsState {
    workouts: Vec<Workout>,
    /// Active filter
    pub filter: WorkoutFilter,
}

impl WorkoutsState {
    /// Get a workout by ID
    pub fn workout(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == *id)
    }

    /// Number of workouts held, ignoring the filter
    #[must_use]
    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    /// Whether no workouts are held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Replace the whole list, normalizing tags on ingest
    pub fn set_workouts(&mut self, workouts: Vec<Workout>) {
        self.workouts = workouts;
        for workout in &mut self.workouts {
            workout.normalize_tags();
        }
    }

    /// Insert a workout, or replace an existing one with the same ID
    pub fn upsert_workout(&mut self, mut workout: Workout) {
        workout.normalize_tags();
        match self.workouts.iter_mut().find(|w| w.id == workout.id) {
            Some(slot) => *slot = workout,
            None => self.workouts.push(workout),
        }
    }

    /// Remove a workout by ID
    pub fn remove_workout(&mut self, id: &WorkoutId) {
        self.workouts.retain(|w| w.id != *id);
    }

    /// Workouts passing the active filter, in list order
    #[must_use]
    pub fn filtered(&self) -> Vec<&Workout> {
        self.workouts
            .iter()
            .filter(|w| self.filter.matches(w))
            .collect()
    }

    /// Every tag in use, sorted and deduplicated
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .workouts
            .iter()
            .flat_map(|w| w.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Set or clear the tag filter (lowercased)
    pub fn set_tag_filter(&mut self, tag: Option<String>) {
        self.filter.tag = tag.map(|t| t.to_lowercase());
    }

    /// Set or clear the status filter
    pub fn set_status_filter(&mut self, status: Option<WorkoutStatus>) {
        self.filter.status = status;
    }

    /// Clear both filters
    pub fn clear_filters(&mut self) {
        self.filter = WorkoutFilter::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(title: &str, tags: &[&str], status: WorkoutStatus) -> Workout {
        Workout {
            id: WorkoutId::new(),
            coach: IdentityKey::from("coach-1"),
            title: title.to_string(),
            description: String::new(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            status,
            total_distance_m: 2000,
            duration_minutes: 60,
            published_at: None,
            updated_at: 0,
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(WorkoutStatus::Draft.label(), "Draft");
        assert_eq!(WorkoutStatus::Published.label(), "Published");
        assert_eq!(WorkoutStatus::Archived.label(), "Archived");
    }

    #[test]
    fn test_only_published_visible_to_swimmers() {
        assert!(!WorkoutStatus::Draft.is_visible_to_swimmers());
        assert!(WorkoutStatus::Published.is_visible_to_swimmers());
        assert!(!WorkoutStatus::Archived.is_visible_to_swimmers());
    }

    #[test]
    fn test_has_tag_is_case_insensitive() {
        let mut w = workout("Sprints", &["Sprint", "anaerobic"], WorkoutStatus::Draft);
        w.normalize_tags();
        assert!(w.has_tag("sprint"));
        assert!(w.has_tag("SPRINT"));
        assert!(!w.has_tag("endurance"));
    }

    #[test]
    fn test_normalize_tags_dedupes() {
        let mut w = workout("Sprints", &["Sprint", "sprint", "IM"], WorkoutStatus::Draft);
        w.normalize_tags();
        assert_eq!(w.tags, vec!["sprint".to_string(), "im".to_string()]);
    }

    #[test]
    fn test_filter_by_tag_and_status() {
        let mut state = WorkoutsState::default();
        state.set_workouts(vec![
            workout("A", &["sprint"], WorkoutStatus::Published),
            workout("B", &["sprint"], WorkoutStatus::Draft),
            workout("C", &["endurance"], WorkoutStatus::Published),
        ]);

        state.set_tag_filter(Some("Sprint".to_string()));
        state.set_status_filter(Some(WorkoutStatus::Published));
        let titles: Vec<&str> = state.filtered().iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, vec!["A"]);

        state.clear_filters();
        assert_eq!(state.filtered().len(), 3);
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = WorkoutFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&workout("A", &["sprint"], WorkoutStatus::Archived)));
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut state = WorkoutsState::default();
        let mut w = workout("A", &["sprint"], WorkoutStatus::Draft);
        state.upsert_workout(w.clone());
        assert_eq!(state.len(), 1);

        w.title = "A v2".to_string();
        w.status = WorkoutStatus::Published;
        state.upsert_workout(w.clone());
        assert_eq!(state.len(), 1);
        assert_eq!(state.workout(&w.id).map(|w| w.title.as_str()), Some("A v2"));
    }

    #[test]
    fn test_remove_workout() {
        let mut state = WorkoutsState::default();
        let w = workout("A", &[], WorkoutStatus::Draft);
        let id = w.id;
        state.upsert_workout(w);
        state.remove_workout(&id);
        assert!(state.is_empty());
    }

    #[test]
    fn test_tag_universe_sorted_and_deduped() {
        let mut state = WorkoutsState::default();
        state.set_workouts(vec![
            workout("A", &["Sprint", "im"], WorkoutStatus::Draft),
            workout("B", &["endurance", "sprint"], WorkoutStatus::Draft),
        ]);
        assert_eq!(
            state.tags(),
            vec![
                "endurance".to_string(),
                "im".to_string(),
                "sprint".to_string()
            ]
        );
    }
}
