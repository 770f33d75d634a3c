//! One-shot deferred round transitions driven by caller-supplied time.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Pending {
    handle: TimerHandle,
    due_ms: u64,
}

/// Pending one-shot transitions. Each one fires exactly once unless cancelled.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    pending: Vec<Pending>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self { Self::default() }

    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending { handle, due_ms: now_ms.saturating_add(delay_ms) });
        handle
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) { self.pending.clear(); }

    pub fn len(&self) -> usize { self.pending.len() }
    pub fn is_empty(&self) -> bool { self.pending.is_empty() }

    /// Earliest due time among the pending transitions.
    pub fn due_ms(&self) -> Option<u64> { self.pending.iter().map(|p| p.due_ms).min() }

    /// Consumes the earliest pending transition if it is due at `now_ms`.
    pub fn fire_due(&mut self, now_ms: u64) -> Option<TimerHandle> {
        let (idx, p) = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| p.due_ms)
            .map(|(i, p)| (i, *p))?;
        if now_ms < p.due_ms { return None; }
        self.pending.remove(idx);
        Some(p.handle)
    }
}
