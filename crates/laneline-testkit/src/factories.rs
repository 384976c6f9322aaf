//! Factory helpers for domain records

use laneline_app::{Message, Thread, Workout, WorkoutStatus};
use laneline_core::{IdentityKey, MessageId, ThreadId, UserProfile, UserRole, WorkoutId};

/// A coach profile with the given key and name
pub fn coach_profile(key: impl Into<IdentityKey>, name: &str) -> UserProfile {
    UserProfile::new(key.into(), name, UserRole::Coach)
}

/// A swimmer profile with the given key and name
pub fn swimmer_profile(key: impl Into<IdentityKey>, name: &str) -> UserProfile {
    UserProfile::new(key.into(), name, UserRole::Swimmer)
}

/// A draft workout with sensible defaults
pub fn draft_workout(coach: impl Into<IdentityKey>, title: &str, tags: &[&str]) -> Workout {
    Workout {
        id: WorkoutId::new(),
        coach: coach.into(),
        title: title.to_string(),
        description: String::new(),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        status: WorkoutStatus::Draft,
        total_distance_m: 2_000,
        duration_minutes: 60,
        published_at: None,
        updated_at: 0,
    }
}

/// An empty thread between the given participants
pub fn thread(participants: &[&str]) -> Thread {
    Thread {
        id: ThreadId::new(),
        participants: participants.iter().map(|p| IdentityKey::from(*p)).collect(),
        last_message: None,
        last_message_time: None,
        unread_count: 0,
    }
}

/// An incoming (not own, unread) message in a thread
pub fn incoming_message(thread_id: ThreadId, sender: &str, body: &str) -> Message {
    Message {
        id: MessageId::new(),
        thread_id,
        sender: IdentityKey::from(sender),
        body: body.to_string(),
        sent_at: 1_000,
        is_own: false,
        is_read: false,
    }
}
