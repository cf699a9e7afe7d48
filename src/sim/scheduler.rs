//! Deferred hole/game transitions
//!
//! Hole-change announcements and session resets fire a few seconds after
//! the triggering event. Rather than fire-and-forget timers, transitions
//! are queued with a monotonically increasing id; scheduling a new
//! transition invalidates every still-pending older one, so a stale task
//! can never fire after the state it referred to is gone. Tasks run on
//! the tick timeline, interleaved with (never concurrent to) the frame
//! loop.

/// What a scheduled task does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move the roster to the next hole
    NextHole,
    /// Reset scores/positions for a new session after game completion
    SessionReset,
}

#[derive(Debug, Clone)]
struct ScheduledTask {
    id: u64,
    due_tick: u64,
    transition: Transition,
}

/// Single-owner transition queue driven by the tick counter
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    pending: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a transition `delay_ticks` from `now`. Any older pending
    /// transition is invalidated; returns the new transition id.
    pub fn schedule(&mut self, now: u64, delay_ticks: u64, transition: Transition) -> u64 {
        if !self.pending.is_empty() {
            log::debug!(
                "Invalidating {} pending transition(s) superseded by {:?}",
                self.pending.len(),
                transition
            );
            self.pending.clear();
        }
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(ScheduledTask {
            id,
            due_tick: now + delay_ticks,
            transition,
        });
        id
    }

    /// Pop every transition due at or before `now`
    pub fn due(&mut self, now: u64) -> Vec<Transition> {
        let mut fired = Vec::new();
        self.pending.retain(|task| {
            if task.due_tick <= now {
                fired.push(task.transition);
                false
            } else {
                true
            }
        });
        fired
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
