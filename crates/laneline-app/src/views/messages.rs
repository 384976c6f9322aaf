//! # Message View State
//!
//! Threads and per-thread message storage with unread accounting. Thread
//! selection is frontend state and deliberately not tracked here; all
//! operations take an explicit thread ID.

use laneline_core::{IdentityKey, MessageId, ThreadId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A message within a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier
    pub id: MessageId,
    /// Thread this message belongs to
    pub thread_id: ThreadId,
    /// Sender identity
    pub sender: IdentityKey,
    /// Message body
    pub body: String,
    /// Timestamp (ms since epoch)
    pub sent_at: u64,
    /// Whether the current user sent this message
    pub is_own: bool,
    /// Whether the current user has read this message
    pub is_read: bool,
}

/// A coach/swimmer conversation thread
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    /// Thread identifier
    pub id: ThreadId,
    /// Participant identities (excluding self)
    pub participants: Vec<IdentityKey>,
    /// Last message preview
    pub last_message: Option<String>,
    /// Last message timestamp (ms since epoch)
    pub last_message_time: Option<u64>,
    /// Unread message count for the current user
    pub unread_count: u32,
}

/// Message state across all threads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagesState {
    /// All known threads
    pub threads: Vec<Thread>,
    /// Per-thread message storage
    #[serde(default)]
    thread_messages: HashMap<ThreadId, Vec<Message>>,
    /// Total unread count across all threads
    #[serde(default)]
    total_unread: u32,
}

impl MessagesState {
    /// Maximum number of messages retained in memory per thread.
    const MAX_RETAINED_MESSAGES: usize = 200;

    /// Get a thread by ID
    pub fn thread(&self, id: &ThreadId) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == *id)
    }

    /// Get a mutable thread by ID
    pub fn thread_mut(&mut self, id: &ThreadId) -> Option<&mut Thread> {
        self.threads.iter_mut().find(|t| t.id == *id)
    }

    /// Replace the thread list, recomputing the total unread tally
    pub fn set_threads(&mut self, threads: Vec<Thread>) {
        self.threads = threads;
        self.total_unread = self.threads.iter().map(|t| t.unread_count).sum();
        self.thread_messages
            .retain(|id, _| self.threads.iter().any(|t| t.id == *id));
    }

    /// Add a new thread, ignoring duplicates
    pub fn add_thread(&mut self, thread: Thread) {
        if self.thread(&thread.id).is_none() {
            self.total_unread = self.total_unread.saturating_add(thread.unread_count);
            self.threads.push(thread);
        }
    }

    /// Messages for a thread, empty if unknown
    pub fn messages_for_thread(&self, id: &ThreadId) -> &[Message] {
        self.thread_messages
            .get(id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the message list for one thread
    pub fn set_messages(&mut self, id: ThreadId, messages: Vec<Message>) {
        self.thread_messages.insert(id, messages);
    }

    /// Unread count for a thread
    pub fn unread_count(&self, id: &ThreadId) -> u32 {
        self.thread(id).map(|t| t.unread_count).unwrap_or(0)
    }

    /// Total unread count across all threads
    #[must_use]
    pub fn total_unread(&self) -> u32 {
        self.total_unread
    }

    /// Total message count across all threads
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.thread_messages.values().map(|v| v.len()).sum()
    }

    /// Apply a new message: update the thread preview, store the message,
    /// and count it as unread when it is an unread message from another
    /// participant.
    pub fn apply_message(&mut self, message: Message) {
        let thread_id = message.thread_id;
        if let Some(thread) = self.thread_mut(&thread_id) {
            thread.last_message = Some(message.body.clone());
            thread.last_message_time = Some(message.sent_at);
        }

        let msgs = self.thread_messages.entry(thread_id).or_default();
        if msgs.iter().any(|m| m.id == message.id) {
            return;
        }
        let counts_as_unread = !message.is_own && !message.is_read;
        msgs.push(message);
        if msgs.len() > Self::MAX_RETAINED_MESSAGES {
            let overflow = msgs.len() - Self::MAX_RETAINED_MESSAGES;
            msgs.drain(0..overflow);
        }

        if counts_as_unread {
            if let Some(thread) = self.thread_mut(&thread_id) {
                thread.unread_count = thread.unread_count.saturating_add(1);
            }
            self.total_unread = self.total_unread.saturating_add(1);
        }
    }

    /// Mark every message in a thread as read and clear its unread count
    pub fn mark_thread_read(&mut self, id: &ThreadId) {
        if let Some(thread) = self.thread_mut(id) {
            let count = thread.unread_count;
            thread.unread_count = 0;
            self.total_unread = self.total_unread.saturating_sub(count);
        }
        if let Some(msgs) = self.thread_messages.get_mut(id) {
            for message in msgs.iter_mut() {
                message.is_read = true;
            }
        }
    }
}
