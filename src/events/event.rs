//! Engine notifications.
//!
//! An event is built once a state change has completed and is handed to
//! every sink by reference. Sinks cannot mutate it and the engine never
//! reads anything back.

use im::Vector;
use serde::Serialize;

use crate::cards::Card;
use crate::hand::Hand;

/// A player's final score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub player: String,
    pub score: i32,
}

/// Event discriminant, for sinks that filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Players,
    InitDeck,
    DealHands,
    PlayerOrder,
    Draw,
    Recover,
    Discard,
    Swap,
    Reveal,
    Column,
    RevealHands,
    Leaderboard,
}

impl EventKind {
    /// Stable snake-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::Players => "players",
            EventKind::InitDeck => "init_deck",
            EventKind::DealHands => "deal_hands",
            EventKind::PlayerOrder => "player_order",
            EventKind::Draw => "draw",
            EventKind::Recover => "recover",
            EventKind::Discard => "discard",
            EventKind::Swap => "swap",
            EventKind::Reveal => "reveal",
            EventKind::Column => "column",
            EventKind::RevealHands => "reveal_hands",
            EventKind::Leaderboard => "leaderboard",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A state change, with its payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Event {
    /// Names in seat order.
    Players(Vec<String>),
    /// The shuffled deck, front first.
    InitDeck(Vector<Card>),
    /// Every hand after dealing, in turn order.
    DealHands(Vec<(String, Hand)>),
    /// Who starts, and the revealed sum that put them first.
    PlayerOrder { first: String, revealed_sum: i32 },
    Draw(Card),
    Recover(Card),
    Discard(Card),
    Swap { player: String, old: Card, new: Card },
    /// `position` is 1-based.
    Reveal { player: String, card: Card, position: usize },
    Column { player: String, value: Card },
    /// Every hand after the forced reveal, in turn order.
    RevealHands(Vec<(String, Hand)>),
    /// Best (lowest) score first.
    Leaderboard(Vec<Standing>),
}

impl Event {
    /// The event's kind.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Players(_) => EventKind::Players,
            Event::InitDeck(_) => EventKind::InitDeck,
            Event::DealHands(_) => EventKind::DealHands,
            Event::PlayerOrder { .. } => EventKind::PlayerOrder,
            Event::Draw(_) => EventKind::Draw,
            Event::Recover(_) => EventKind::Recover,
            Event::Discard(_) => EventKind::Discard,
            Event::Swap { .. } => EventKind::Swap,
            Event::Reveal { .. } => EventKind::Reveal,
            Event::Column { .. } => EventKind::Column,
            Event::RevealHands(_) => EventKind::RevealHands,
            Event::Leaderboard(_) => EventKind::Leaderboard,
        }
    }
}
