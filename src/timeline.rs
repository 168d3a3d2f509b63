//! Virtual-clock cue queue that replaces chains of nested `setTimeout` calls.
//!
//! The page advances a timeline from its animation frame loop; tests advance
//! it with synthetic timestamps. Cues carry no closures, so a component
//! applies them against its own state when they come due.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

struct Entry<C> {
    due_ms: f64,
    seq: u64, // insertion order, breaks ties between equal due times
    cue: C,
}

impl<C> PartialEq for Entry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C> Eq for Entry<C> {}

impl<C> PartialOrd for Entry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> Ord for Entry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_ms
            .total_cmp(&other.due_ms)
            .then(self.seq.cmp(&other.seq))
    }
}

pub struct Timeline<C> {
    now_ms: f64,
    seq: u64,
    queue: BinaryHeap<Reverse<Entry<C>>>,
}

impl<C> Default for Timeline<C> {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl<C> Timeline<C> {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now_ms: start_ms,
            seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now_ms
    }

    /// Queue `cue` to fire `delay_ms` after the current clock (negative delays fire now).
    pub fn schedule(&mut self, delay_ms: f64, cue: C) {
        let due_ms = self.now_ms + delay_ms.max(0.0);
        self.seq += 1;
        self.queue.push(Reverse(Entry {
            due_ms,
            seq: self.seq,
            cue,
        }));
    }

    /// Next cue due at or before `until`. The clock moves to that cue's due
    /// time so anything scheduled while handling it is relative to it.
    pub fn pop_due(&mut self, until: f64) -> Option<C> {
        let due = self.queue.peek().map(|Reverse(e)| e.due_ms)?;
        if due > until {
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.cue)
    }

    /// Move the clock forward to `until` once all due cues are handled.
    /// The clock never runs backwards.
    pub fn finish(&mut self, until: f64) {
        self.now_ms = self.now_ms.max(until);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Due time of the earliest pending cue.
    pub fn next_due(&self) -> Option<f64> {
        self.queue.peek().map(|Reverse(e)| e.due_ms)
    }
}
