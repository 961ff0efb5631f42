//! Fire-once, cancellable timers on a caller-driven clock.
//!
//! The scheduler never reads the wall clock. The host passes the current
//! time into [`Scheduler::pop_due`], which makes delayed behaviour fully
//! deterministic under test.

use serde::{Deserialize, Serialize};

/// Milliseconds on the host's clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Millis(pub u64);

impl Millis {
    /// Create a new instant.
    #[must_use]
    pub const fn new(ms: u64) -> Self {
        Self(ms)
    }

    /// This instant plus `delay_ms`, saturating.
    #[must_use]
    pub const fn after(self, delay_ms: u64) -> Self {
        Self(self.0.saturating_add(delay_ms))
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Handle for cancelling a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

#[derive(Clone, Debug)]
struct Task<T> {
    id: TaskId,
    due: Millis,
    payload: T,
}

/// Pending timers, fired in due order (ties in scheduling order).
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    tasks: Vec<Task<T>>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `payload` to fire at `due`.
    pub fn schedule_at(&mut self, due: Millis, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task { id, due, payload });
        id
    }

    /// Schedule `payload` to fire `delay_ms` after `now`.
    pub fn schedule(&mut self, now: Millis, delay_ms: u64, payload: T) -> TaskId {
        self.schedule_at(now.after(delay_ms), payload)
    }

    /// Cancel one task. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Cancel every pending task. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.tasks.len();
        self.tasks.clear();
        count
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Is this task still pending?
    #[must_use]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// When the next task is due.
    #[must_use]
    pub fn next_due(&self) -> Option<Millis> {
        self.tasks.iter().map(|t| t.due).min()
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TaskId, T)> {
        let position = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.id.0))
            .map(|(i, _)| i)?;
        let task = self.tasks.remove(position);
        Some((task.id, task.payload))
    }
}
