//! # skaijo
//!
//! Game-state engine for Skaijo, a turn-based card game in the style of
//! Skyjo. Players hold a 3-row grid of face-down cards, improve it by
//! drawing or recovering cards and swapping them in, clear columns of three
//! equal face-up cards, and the lowest total wins once someone's grid is
//! fully revealed.
//!
//! ## Design Principles
//!
//! 1. **Engine Decides Nothing**: The `Engine` validates and applies
//!    commands. Choices come from a `PlayerController` through the
//!    `RoundDriver`, or from any other orchestrator.
//!
//! 2. **Observe, Don't Query**: Renderers subscribe as `EventSink`s and are
//!    pushed an `Event` after every completed state change.
//!
//! 3. **Reproducible**: A seed fully determines the shuffle; a stacked deck
//!    fully determines the deal.
//!
//! ## Modules
//!
//! - `core`: Seats, RNG, configuration, phases, errors
//! - `cards`: Card values and the two-ended deck
//! - `hand`: Player grids and the column-clear rule
//! - `events`: Event types and sinks
//! - `rules`: The engine
//! - `round`: Controller trait and round driver

pub mod core;
pub mod cards;
pub mod hand;
pub mod events;
pub mod rules;
pub mod round;

// Re-export commonly used types
pub use crate::core::{
    FinalTurnPolicy, GameRng, Phase, PlayerId, PlayerMap, Result, SkaijoConfig,
    SkaijoError,
};

pub use crate::cards::{Card, Deck, DECK_SIZE};

pub use crate::hand::{ClearedColumn, Hand, Slot};

pub use crate::events::{Event, EventKind, EventLog, EventSink, SinkId, Standing, TracingSink};

pub use crate::rules::{CardSource, Engine, InTransit};

pub use crate::round::{Placement, PlayerController, RoundDriver, TurnSource};
