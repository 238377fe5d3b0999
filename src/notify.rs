//! Transient player-facing messages.
//!
//! Notifications carry no gameplay meaning. The log keeps the ones still on
//! screen and fans each new one out to any subscribers.

use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Danger,
    Info,
    Earning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    /// Session time at which it was raised.
    pub created_at_ms: u64,
}

pub struct NotificationLog {
    active: Vec<Notification>,
    next_id: u64,
    ttl_ms: u64,
    sender: broadcast::Sender<Notification>,
}

impl NotificationLog {
    pub fn new(ttl_ms: u64) -> Self {
        let (sender, _) = broadcast::channel(64);
        NotificationLog {
            active: Vec::new(),
            next_id: 1,
            ttl_ms,
            sender,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind, now_ms: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let notification = Notification {
            id,
            message: message.into(),
            kind,
            created_at_ms: now_ms,
        };
        // No receivers is fine
        let _ = self.sender.send(notification.clone());
        self.active.push(notification);
        id
    }

    /// Drop notifications older than the display duration.
    pub fn expire(&mut self, now_ms: u64) {
        let ttl = self.ttl_ms;
        self.active
            .retain(|n| now_ms.saturating_sub(n.created_at_ms) < ttl);
    }

    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    /// Receive every notification pushed from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl std::fmt::Debug for NotificationLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationLog")
            .field("active", &self.active.len())
            .field("ttl_ms", &self.ttl_ms)
            .finish()
    }
}
