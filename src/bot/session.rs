//! Session store module: the per-sender conversation state map.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::dialogue::Step;

/// In-memory map from sender id to that sender's current dialogue step.
///
/// Owned by the engine and shared across request handlers behind a mutex,
/// so concurrent requests from different senders are safe. Requests from
/// the same sender are assumed serial (the messaging client waits for a
/// reply before sending again); two truly parallel messages from one
/// sender may race between read and write, which is an accepted
/// limitation. Sessions live for the process lifetime.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Step>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step for a sender, if a session exists.
    pub async fn get(&self, sender: &str) -> Option<Step> {
        self.sessions.lock().await.get(sender).cloned()
    }

    /// Store the sender's next step, creating the session if needed.
    pub async fn put(&self, sender: &str, step: Step) {
        self.sessions.lock().await.insert(sender.to_string(), step);
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
