// ===============================
// src/notify.rs
// ===============================
use chrono::{DateTime, Utc};

use crate::domain::{NotificationEvent, NotificationKind, NotificationPhase};
use crate::metrics::{NOTIFICATIONS, NOTIFICATIONS_ACTIVE};

/// Transient toasts. Append-only until removal; each event runs its own
/// enter/exit/remove timers, so overlapping toasts never wait on each other.
#[derive(Default)]
pub struct NotificationQueue {
    next_id: u64,
    events: Vec<NotificationEvent>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind, now: DateTime<Utc>) -> NotificationEvent {
        self.next_id += 1;
        let ev = NotificationEvent {
            id: self.next_id,
            message: message.into(),
            kind,
            created_at: now,
            phase: NotificationPhase::Pending,
        };
        self.events.push(ev.clone());
        NOTIFICATIONS.with_label_values(&[kind_label(kind)]).inc();
        NOTIFICATIONS_ACTIVE.set(self.events.len() as i64);
        ev
    }

    /// Moves an event forward. Returns the updated event, or `None` when the
    /// id is gone or the move would go backwards.
    pub fn advance(&mut self, id: u64, phase: NotificationPhase) -> Option<&NotificationEvent> {
        let ev = self.events.iter_mut().find(|e| e.id == id)?;
        if phase <= ev.phase {
            return None;
        }
        ev.phase = phase;
        Some(ev)
    }

    pub fn remove(&mut self, id: u64) -> Option<NotificationEvent> {
        let pos = self.events.iter().position(|e| e.id == id)?;
        let ev = self.events.remove(pos);
        NOTIFICATIONS_ACTIVE.set(self.events.len() as i64);
        Some(ev)
    }

    pub fn active(&self) -> &[NotificationEvent] {
        &self.events
    }
}

fn kind_label(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "success",
        NotificationKind::Info => "info",
    }
}
