//! Session configuration.
//!
//! The engine reads only `seed` and `min_players`. The remaining fields
//! steer the `RoundDriver`, which owns the orchestration-level rules.

use serde::{Deserialize, Serialize};

use crate::hand::INITIAL_SLOTS;

/// What happens after the first hand is completed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalTurnPolicy {
    /// Finish the current pass, then end the round. Players seated before
    /// the completer in that pass get no further turn.
    #[default]
    EndOfPass,
    /// Every other player gets exactly one more turn, in turn order
    /// starting after the completer.
    OneMoreTurn,
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkaijoConfig {
    /// Seed used by `init_deck` when the caller does not pass one.
    /// `None` draws a process-random seed.
    pub seed: Option<u64>,

    /// Slots each player turns face-up before turn order is decided.
    /// At most one fewer than a dealt hand; the driver clamps larger values.
    pub initial_reveals: usize,

    /// Smallest table the engine accepts.
    pub min_players: usize,

    /// Largest table the driver accepts. The engine does not enforce this.
    pub max_players: usize,

    /// Round-end rule applied by the driver.
    pub final_turn: FinalTurnPolicy,

    /// Choices the driver requests per decision before giving up.
    pub max_attempts: u32,
}

impl Default for SkaijoConfig {
    fn default() -> Self {
        Self {
            seed: None,
            initial_reveals: 2,
            min_players: 2,
            max_players: 8,
            final_turn: FinalTurnPolicy::EndOfPass,
            max_attempts: 3,
        }
    }
}

impl SkaijoConfig {
    /// Use a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the round-end rule.
    #[must_use]
    pub fn with_final_turn(mut self, policy: FinalTurnPolicy) -> Self {
        self.final_turn = policy;
        self
    }

    /// Set the number of initial reveals per player, capped so every hand
    /// keeps a face-down slot when play starts.
    #[must_use]
    pub fn with_initial_reveals(mut self, count: usize) -> Self {
        self.initial_reveals = count.min(INITIAL_SLOTS - 1);
        self
    }

    /// Set how many choices the driver requests per decision.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }
}
