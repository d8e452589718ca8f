//! Deterministic scheduling for the demo's "live" behavior.
//!
//! The original UI drove delivery progress and refreshes with wall
//! clock timers. Here the passage of time is explicit: tasks are
//! `(due, action)` pairs in a queue, and a virtual clock is advanced by
//! the caller, so the whole simulation can run synchronously in tests.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Virtual wall clock.
#[derive(Clone, Copy, Debug)]
pub struct SimClock {
    now: DateTime<Utc>,
}

impl SimClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn advance(&mut self, by: Duration) -> DateTime<Utc> {
        self.now += by;
        self.now
    }
}

/// Actions a scheduled task can perform when it fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimAction {
    /// Move one order a step along its delivery path.
    AdvanceOrder(Uuid),
    /// Periodic refresh: nudge every in-flight order forward.
    RefreshTick,
}

/// Opaque handle for cancelling a pending task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct ScheduledTask {
    due: DateTime<Utc>,
    seq: u64,
    handle: TaskHandle,
    action: SimAction,
}

// Min-heap by (due, seq): earliest first, FIFO among equal due times.
impl Ord for ScheduledTask {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for ScheduledTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledTask {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for ScheduledTask {}

/// A queue of deferred actions on the virtual timeline.
#[derive(Debug, Default)]
pub struct TaskQueue {
    heap: BinaryHeap<ScheduledTask>,
    cancelled: HashSet<TaskHandle>,
    next_seq: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: DateTime<Utc>, action: SimAction) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let handle = TaskHandle(seq);
        self.heap.push(ScheduledTask {
            due,
            seq,
            handle,
            action,
        });
        handle
    }

    /// Cancels a pending task. Returns whether the handle was still
    /// pending. Cancelling an already-fired task is a harmless no-op.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        if self.heap.iter().any(|task| task.handle == handle) {
            self.cancelled.insert(handle);
            true
        } else {
            false
        }
    }

    pub fn pending(&self) -> usize {
        self.heap
            .iter()
            .filter(|task| !self.cancelled.contains(&task.handle))
            .count()
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.heap
            .iter()
            .filter(|task| !self.cancelled.contains(&task.handle))
            .map(|task| task.due)
            .min()
    }

    /// Pops and returns every action due at or before `now`, in due
    /// order (FIFO among ties). Cancelled tasks are discarded silently.
    pub fn run_due(&mut self, now: DateTime<Utc>) -> Vec<SimAction> {
        let mut fired = Vec::new();
        while self.heap.peek().is_some_and(|task| task.due <= now) {
            if let Some(task) = self.heap.pop() {
                if self.cancelled.remove(&task.handle) {
                    continue;
                }
                fired.push(task.action);
            }
        }
        fired
    }
}
