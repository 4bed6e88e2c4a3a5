//! Delayed actions
//!
//! Actions fire once, at or after their due time, and only if the world is
//! still in the epoch they were scheduled in.

use serde::{Deserialize, Serialize};

/// What a delayed action does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Announce the final score, then reset to Waiting
    GameOverReset,
    /// Recreate the target set and award the clear bonus
    RespawnTargets,
}

/// A pending action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledAction {
    pub due_ms: f64,
    pub epoch: u64,
    pub kind: ActionKind,
}

/// Pending actions in insertion order
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<ScheduledAction>,
}

impl Scheduler {
    pub fn push(&mut self, kind: ActionKind, due_ms: f64, epoch: u64) {
        self.pending.push(ScheduledAction { due_ms, epoch, kind });
    }

    /// Remove and return every action due at `now_ms`, earliest first
    pub fn take_due(&mut self, now_ms: f64) -> Vec<ScheduledAction> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|action| action.due_ms <= now_ms);
        self.pending = pending;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
