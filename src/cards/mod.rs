//! Cards and the shared deck.
//!
//! ## Key Types
//!
//! - `Card`: a value in [-2, 12]
//! - `Deck`: the 150-card sequence with a draw end and a discard end

pub mod card;
pub mod deck;

pub use card::Card;
pub use deck::{value_counts, Deck, DECK_SIZE};
