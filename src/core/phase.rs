//! Session phases.

use serde::{Deserialize, Serialize};

/// Where a session is in its lifecycle.
///
/// Phases only move forward:
/// `Setup → DeckReady → Dealt → InitialReveal → Playing → RoundEnded → Scored`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No deck yet. Players may be set.
    #[default]
    Setup,
    /// Deck built and shuffled, hands still empty.
    DeckReady,
    /// Twelve face-down cards per player.
    Dealt,
    /// At least one initial reveal has happened.
    InitialReveal,
    /// Turn order fixed, players taking turns.
    Playing,
    /// Every hand forced face-up.
    RoundEnded,
    /// Leaderboard computed.
    Scored,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::DeckReady => "deck-ready",
            Phase::Dealt => "dealt",
            Phase::InitialReveal => "initial-reveal",
            Phase::Playing => "playing",
            Phase::RoundEnded => "round-ended",
            Phase::Scored => "scored",
        };
        f.write_str(name)
    }
}
