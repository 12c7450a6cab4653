//! Virtual-time scheduler for the playback engine
//!
//! Single-threaded and cooperative: the driver advances time explicitly and
//! due timers fire in timestamp order, so every run of the engine is
//! reproducible. Each timer kind is a typed, cancellable handle; `cancel_all`
//! is the atomic invalidation point used by `reset`.

use std::time::Duration;

/// The deferred actions the engine can schedule. At most one timer of each
/// kind is pending at a time; scheduling a kind replaces its pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// One-shot: invoke `play` once per reset cycle after mount
    AutoStart,
    /// Recurring while playing: one `advance_one` per tick
    PlayTick,
    /// One-shot: invoke `start_replay` after the crash
    AutoReplay,
    /// One-shot: hide the explanatory callout
    CalloutDismiss,
    /// Recurring while replaying: advance the replay cursor one source line
    ReplayTick,
    /// One-shot: resume auto-play after replay finishes
    ResumeAfterReplay,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    kind: TimerKind,
    fire_at_millis: u64,
    /// Arm order, used to break ties deterministically
    seq: u64,
}

/// Deterministic timer owner driven by explicit time advancement
#[derive(Debug, Default)]
pub struct Scheduler {
    now_millis: u64,
    next_seq: u64,
    pending: Vec<PendingTimer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now_millis(&self) -> u64 {
        self.now_millis
    }

    /// Virtual timestamp `duration` from now
    pub fn target_after(&self, duration: Duration) -> u64 {
        self.now_millis + duration.as_millis() as u64
    }

    /// Schedule `kind` to fire after `delay`, replacing any pending timer of
    /// the same kind.
    pub fn schedule_after(&mut self, kind: TimerKind, delay: Duration) {
        self.cancel(kind);
        let fire_at_millis = self.target_after(delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(PendingTimer {
            kind,
            fire_at_millis,
            seq,
        });
    }

    /// Cancel the pending timer of the given kind. Returns whether one was
    /// pending.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.kind != kind);
        self.pending.len() < before
    }

    /// Cancel every pending timer
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Whether a timer of the given kind is pending
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|timer| timer.kind == kind)
    }

    /// Number of pending timers
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pop the earliest timer due at or before `target_millis` and move the
    /// clock to its deadline. Timers armed while the caller handles the fired
    /// timer participate in the same advancement window.
    pub fn fire_next_due(&mut self, target_millis: u64) -> Option<TimerKind> {
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.fire_at_millis <= target_millis)
            .min_by_key(|(_, timer)| (timer.fire_at_millis, timer.seq))
            .map(|(position, _)| position)?;

        let timer = self.pending.swap_remove(position);
        self.now_millis = self.now_millis.max(timer.fire_at_millis);
        Some(timer.kind)
    }

    /// Move the clock forward to `target_millis` without firing anything.
    /// Callers drain due timers with [`fire_next_due`] first.
    ///
    /// [`fire_next_due`]: Scheduler::fire_next_due
    pub fn advance_to(&mut self, target_millis: u64) {
        self.now_millis = self.now_millis.max(target_millis);
    }
}
