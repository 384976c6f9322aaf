//! Fake message store

use std::collections::HashMap;

use async_trait::async_trait;
use laneline_app::{Message, MessageStore, Thread};
use laneline_core::{CoreError, IdentityKey, ThreadId};
use parking_lot::Mutex;

/// Scriptable in-memory message store
pub struct InMemoryMessageStore {
    threads: Mutex<Vec<Thread>>,
    messages: Mutex<HashMap<ThreadId, Vec<Message>>>,
    error: Mutex<Option<String>>,
}

impl InMemoryMessageStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            threads: Mutex::new(Vec::new()),
            messages: Mutex::new(HashMap::new()),
            error: Mutex::new(None),
        }
    }

    /// Seed the store with threads
    pub fn with_threads(threads: impl IntoIterator<Item = Thread>) -> Self {
        let store = Self::new();
        *store.threads.lock() = threads.into_iter().collect();
        store
    }

    /// Append a message directly, as if another participant sent it
    pub fn push_message(&self, message: Message) {
        self.messages
            .lock()
            .entry(message.thread_id)
            .or_default()
            .push(message);
    }

    /// Script every subsequent call to fail with a storage error
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.error.lock() = Some(message.into());
    }

    /// Messages stored for a thread, for assertions
    pub fn stored_messages(&self, thread: &ThreadId) -> Vec<Message> {
        self.messages.lock().get(thread).cloned().unwrap_or_default()
    }

    fn check_error(&self) -> Result<(), CoreError> {
        match self.error.lock().clone() {
            Some(message) => Err(CoreError::storage(message)),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn list_threads(&self, user: &IdentityKey) -> Result<Vec<Thread>, CoreError> {
        self.check_error()?;
        Ok(self
            .threads
            .lock()
            .iter()
            .filter(|t| t.participants.contains(user))
            .cloned()
            .collect())
    }

    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<Message>, CoreError> {
        self.check_error()?;
        Ok(self.stored_messages(thread))
    }

    async fn send_message(&self, message: Message) -> Result<(), CoreError> {
        self.check_error()?;
        self.push_message(message);
        Ok(())
    }

    async fn mark_read(&self, thread: &ThreadId, _reader: &IdentityKey) -> Result<(), CoreError> {
        self.check_error()?;
        if let Some(msgs) = self.messages.lock().get_mut(thread) {
            for message in msgs.iter_mut() {
                message.is_read = true;
            }
        }
        if let Some(t) = self.threads.lock().iter_mut().find(|t| t.id == *thread) {
            t.unread_count = 0;
        }
        Ok(())
    }
}
