//! Per-session bookkeeping.
//!
//! A `Session` is reset by every `start_game` and mutated by flips, matches
//! and countdown ticks. It holds no cards itself, only their IDs.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::card::CardId;

/// Controller lifecycle.
///
/// `Idle → Shuffling → Active → {Victory | TimeExpired}`, and back to
/// `Shuffling` on the next `start_game`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Built but never started.
    #[default]
    Idle,
    /// Cards hidden, waiting for the start delay before shuffling.
    Shuffling,
    /// Countdown running, clicks accepted.
    Active,
    /// Every card matched.
    Victory,
    /// The countdown reached zero first.
    TimeExpired,
}

impl Phase {
    /// Whether the session has ended.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Victory | Phase::TimeExpired)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    pub phase: Phase,
    pub total_time: u32,
    pub time_remaining: u32,
    pub total_clicks: u32,
    /// The face-up card waiting for a partner.
    pub card_to_check: Option<CardId>,
    pub matched: FxHashSet<CardId>,
    /// Gates input during shuffle, reset and mismatch transitions.
    pub busy: bool,
    /// Bumped on every start so timers from an older session can be told apart.
    pub generation: u64,
}

impl Session {
    pub fn new(total_time: u32) -> Self {
        Self {
            total_time,
            time_remaining: total_time,
            ..Self::default()
        }
    }

    /// Reset for a fresh start. Leaves the phase to the caller.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.total_clicks = 0;
        self.time_remaining = self.total_time;
        self.matched.clear();
        self.card_to_check = None;
        self.busy = true;
    }

    /// Take one second off the clock, never going below zero.
    ///
    /// Returns the new remaining time.
    pub fn tick(&mut self) -> u32 {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.time_remaining
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    #[must_use]
    pub fn is_matched(&self, card: CardId) -> bool {
        self.matched.contains(&card)
    }
}
