//! Logical clock, timer queue and frame tasks.
//!
//! # Responsibility
//! - Keep the single time source every behavior family schedules against.
//! - Deliver one-shot timers in a deterministic order.
//! - Coalesce per-frame work so it runs at most once per rendered frame.
//!
//! # Invariants
//! - The clock never moves backwards.
//! - Timers due at the same instant fire in scheduling order.
//! - Frames land on multiples of the frame interval; a task requested
//!   during frame N runs no earlier than frame N+1.
//! - Timers are not cancelable; stale ones must no-op at the receiver.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, BinaryHeap};

/// Frame cadence of the logical clock, in milliseconds.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

#[derive(Debug)]
struct TimerEntry<T> {
    due_at_ms: u64,
    seq: u64,
    action: T,
}

impl<T> PartialEq for TimerEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_at_ms == other.due_at_ms && self.seq == other.seq
    }
}

impl<T> Eq for TimerEntry<T> {}

impl<T> PartialOrd for TimerEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TimerEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_at_ms, self.seq).cmp(&(other.due_at_ms, other.seq))
    }
}

/// Deterministic scheduler over a logical millisecond clock.
///
/// Generic over the timer payload `T` and the frame-task key `F`; the
/// controller defines both vocabularies and interprets what taken entries
/// mean.
#[derive(Debug)]
pub struct Scheduler<T, F> {
    now_ms: u64,
    frame_interval_ms: u64,
    next_seq: u64,
    timers: BinaryHeap<Reverse<TimerEntry<T>>>,
    frame_tasks: BTreeSet<F>,
}

impl<T, F: Ord> Scheduler<T, F> {
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL_MS)
    }

    /// A zero interval would stall the frame grid, so it is clamped to 1ms.
    pub fn with_frame_interval(frame_interval_ms: u64) -> Self {
        Self {
            now_ms: 0,
            frame_interval_ms: frame_interval_ms.max(1),
            next_seq: 0,
            timers: BinaryHeap::new(),
            frame_tasks: BTreeSet::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms
    }

    /// Schedules a one-shot timer; returns its due time.
    pub fn schedule_timer(&mut self, delay_ms: u64, action: T) -> u64 {
        let due_at_ms = self.now_ms + delay_ms;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Reverse(TimerEntry {
            due_at_ms,
            seq,
            action,
        }));
        due_at_ms
    }

    /// Requests frame work; returns whether the task was newly requested.
    ///
    /// A second request while one is pending coalesces into the first.
    pub fn request_frame_task(&mut self, task: F) -> bool {
        self.frame_tasks.insert(task)
    }

    pub fn has_frame_task(&self, task: &F) -> bool {
        self.frame_tasks.contains(task)
    }

    pub fn frame_tasks_pending(&self) -> bool {
        !self.frame_tasks.is_empty()
    }

    pub fn timers_pending(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the earliest outstanding timer.
    pub fn next_timer_due(&self) -> Option<u64> {
        self.timers.peek().map(|Reverse(entry)| entry.due_at_ms)
    }

    /// The next frame boundary strictly after the current instant.
    pub fn next_frame_at(&self) -> u64 {
        (self.now_ms / self.frame_interval_ms + 1) * self.frame_interval_ms
    }

    /// Moves the clock forward; requests to move backwards are ignored.
    pub fn advance_clock_to(&mut self, instant_ms: u64) {
        if instant_ms > self.now_ms {
            self.now_ms = instant_ms;
        }
    }

    /// Drains every timer due at or before the current instant, in
    /// `(due_at, scheduling)` order.
    pub fn take_due_timers(&mut self) -> Vec<T> {
        let mut due = Vec::new();
        while let Some(Reverse(entry)) = self.timers.peek() {
            if entry.due_at_ms > self.now_ms {
                break;
            }
            if let Some(Reverse(entry)) = self.timers.pop() {
                due.push(entry.action);
            }
        }
        due
    }

    /// Drains the pending frame tasks in key order.
    pub fn take_frame_tasks(&mut self) -> Vec<F> {
        std::mem::take(&mut self.frame_tasks).into_iter().collect()
    }
}

impl<T, F: Ord> Default for Scheduler<T, F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestScheduler = Scheduler<&'static str, &'static str>;

    #[test]
    fn timers_fire_in_due_then_scheduling_order() {
        let mut scheduler = TestScheduler::new();
        scheduler.schedule_timer(300, "late");
        scheduler.schedule_timer(100, "first");
        scheduler.schedule_timer(100, "second");
        scheduler.advance_clock_to(100);
        assert_eq!(scheduler.take_due_timers(), vec!["first", "second"]);
        assert_eq!(scheduler.timers_pending(), 1);
        scheduler.advance_clock_to(299);
        assert!(scheduler.take_due_timers().is_empty());
        scheduler.advance_clock_to(300);
        assert_eq!(scheduler.take_due_timers(), vec!["late"]);
    }

    #[test]
    fn frame_tasks_coalesce() {
        let mut scheduler = TestScheduler::new();
        assert!(scheduler.request_frame_task("highlight"));
        assert!(!scheduler.request_frame_task("highlight"));
        assert!(scheduler.has_frame_task(&"highlight"));
        assert_eq!(scheduler.take_frame_tasks(), vec!["highlight"]);
        assert!(!scheduler.frame_tasks_pending());
        assert!(scheduler.request_frame_task("highlight"));
    }

    #[test]
    fn frame_grid_lands_on_interval_multiples() {
        let mut scheduler = TestScheduler::new();
        assert_eq!(scheduler.next_frame_at(), 16);
        scheduler.advance_clock_to(16);
        assert_eq!(scheduler.next_frame_at(), 32);
        scheduler.advance_clock_to(500);
        assert_eq!(scheduler.next_frame_at(), 512);
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut scheduler = TestScheduler::new();
        scheduler.advance_clock_to(250);
        scheduler.advance_clock_to(100);
        assert_eq!(scheduler.now_ms(), 250);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let scheduler: TestScheduler = Scheduler::with_frame_interval(0);
        assert_eq!(scheduler.frame_interval_ms(), 1);
    }

    #[test]
    fn zero_delay_timer_is_due_immediately() {
        let mut scheduler = TestScheduler::new();
        let due = scheduler.schedule_timer(0, "now");
        assert_eq!(due, 0);
        assert_eq!(scheduler.next_timer_due(), Some(0));
        assert_eq!(scheduler.take_due_timers(), vec!["now"]);
    }
}
