//! Delayed actions
//!
//! Fade-outs, flash cleanup and the end of the boss explosion are queued here
//! with a fire time in simulation seconds. The loop drains everything that is
//! due at the start of each step, so deferred mutations land in a known order.

use serde::{Deserialize, Serialize};

use super::state::EntityId;

/// What to do when a scheduled entry comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Drop a collision or blast flash
    ClearFlash(EntityId),
    /// Remove a destroyed regular adversary and its fade marker
    RemoveAdversary(EntityId),
    /// The craft has finished fading: the run is lost
    EndRun,
    /// One blast of the boss explosion sequence
    BossBlast(EntityId),
    /// Clear the post-hit damage flash on the boss
    ClearDamage(EntityId),
    /// The explosion is over: remove the boss and win
    RemoveBoss(EntityId),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    at: f64,
    seq: u64,
    action: Action,
}

/// Queue of actions ordered by fire time, then by insertion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire at simulation time `at`
    pub fn push(&mut self, at: f64, action: Action) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { at, seq, action });
    }

    /// Remove and return every action due at or before `now`, in firing order
    pub fn drain_due(&mut self, now: f64) -> Vec<Action> {
        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|e| {
            if e.at <= now {
                due.push(e.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.at.total_cmp(&b.at).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.action).collect()
    }

    /// Whether any pending entry matches `action`
    pub fn contains(&self, action: Action) -> bool {
        self.entries.iter().any(|e| e.action == action)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
