//! Decision interface for whoever plays a seat.
//!
//! A controller only answers questions. It never calls the engine; the
//! `RoundDriver` asks, then applies the answer. Terminal prompts, network
//! clients and scripted test players all sit behind this trait.

use crate::cards::Card;
use crate::rules::Engine;

/// Where a turn's card comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnSource {
    /// Fresh card from the draw end.
    Draw,
    /// Most recent discard.
    Recover,
}

/// What to do with a drawn card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Discard it, then reveal one face-down slot.
    Discard,
    /// Put it face-up in this slot.
    Swap(usize),
}

/// Answers the driver's questions for one or more seats.
///
/// Every method receives a read-only view of the engine and the acting
/// player's name. Slot indices are 0-based. A rejected answer is asked for
/// again, up to the configured number of attempts.
pub trait PlayerController {
    /// Slot to reveal during set-up.
    fn initial_reveal(&mut self, engine: &Engine, player: &str) -> usize {
        self.choose_reveal(engine, player)
    }

    /// Draw or recover.
    fn choose_source(&mut self, engine: &Engine, player: &str) -> TurnSource;

    /// Discard or swap the drawn `card`.
    fn choose_placement(&mut self, engine: &Engine, player: &str, card: Card) -> Placement;

    /// Slot for a recovered `card`.
    fn choose_swap_slot(&mut self, engine: &Engine, player: &str, card: Card) -> usize;

    /// Face-down slot to reveal after a discard.
    fn choose_reveal(&mut self, engine: &Engine, player: &str) -> usize;
}
