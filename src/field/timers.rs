//! One-shot resize timers on a virtual clock.
//!
//! Nothing here reads the wall clock. The owner moves time forward
//! with [`ResizeTimers::advance`] and then drains whatever became due
//! with [`ResizeTimers::pop_due`].

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
    time::Duration,
};

/// Identifies one scheduled timer. Handles are never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

// Stale heap entries tolerated per live timer before compacting.
const COMPACT_RATIO: usize = 4;
const COMPACT_SLACK: usize = 64;

#[derive(Debug, Default)]
pub struct ResizeTimers {
    now: Duration,
    next_handle: u64,
    queue: BinaryHeap<Reverse<(Duration, TimerHandle)>>,
    pending: HashMap<TimerHandle, usize>,
}

impl ResizeTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    /// Arms a timer firing `delay` after the current virtual time.
    pub fn schedule(&mut self, bubble: usize, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        self.queue.push(Reverse((self.now + delay, handle)));
        self.pending.insert(handle, bubble);

        self.compact();

        handle
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn pending_for(&self, bubble: usize) -> usize {
        self.pending.values().filter(|&&b| b == bubble).count()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Fire time of the earliest live timer.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.skip_cancelled();
        self.queue.peek().map(|Reverse((at, _))| *at)
    }

    /// Removes and returns the earliest timer that is due at the
    /// current virtual time, with the bubble it belongs to.
    pub fn pop_due(&mut self) -> Option<(TimerHandle, usize)> {
        self.skip_cancelled();

        let &Reverse((at, handle)) = self.queue.peek()?;

        if at > self.now {
            return None;
        }

        self.queue.pop();
        self.pending.remove(&handle).map(|bubble| (handle, bubble))
    }

    fn skip_cancelled(&mut self) {
        while let Some(&Reverse((_, handle))) = self.queue.peek() {
            if self.pending.contains_key(&handle) {
                break;
            }
            self.queue.pop();
        }
    }

    fn compact(&mut self) {
        if self.queue.len() <= self.pending.len() * COMPACT_RATIO + COMPACT_SLACK {
            return;
        }

        let pending = &self.pending;
        self.queue
            .retain(|Reverse((_, handle))| pending.contains_key(handle));
    }
}
