//! The shared deck.
//!
//! One ordered sequence with two active ends:
//! - the **draw end** (front), where fresh cards come from
//! - the **discard end** (back), where discards land and `recover` takes from
//!
//! Backed by `im::Vector` so both ends are cheap and a snapshot for the
//! `init_deck` event is an O(1) clone.

use std::collections::BTreeMap;

use im::Vector;

use crate::core::{GameRng, Result, SkaijoError};

use super::card::Card;

/// Cards in a full deck.
pub const DECK_SIZE: usize = 150;

/// Copies per value before the zero substitution.
const COPIES_PER_VALUE: usize = 10;

/// Cards of value -2 turned into 0s.
const ZERO_SUBSTITUTIONS: usize = 5;

/// Ordered deck with a draw end and a discard end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// An empty deck, before `init_deck`.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The unshuffled standard composition.
    ///
    /// Ten copies of each value from -2 to 12, with the first five -2s
    /// turned into 0s: -2×5, -1×10, 0×15, 1..12×10.
    #[must_use]
    pub fn standard_cards() -> Vec<Card> {
        (0..DECK_SIZE)
            .map(|i| {
                let value = if i < ZERO_SUBSTITUTIONS {
                    0
                } else {
                    (i / COPIES_PER_VALUE) as i8 + Card::MIN
                };
                Card(value)
            })
            .collect()
    }

    /// Build the standard composition and shuffle it with `rng`.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut cards = Self::standard_cards();
        rng.shuffle(&mut cards);
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Use `cards` as-is, front first.
    ///
    /// Rejected unless it is exactly the standard multiset.
    pub fn stacked(cards: Vec<Card>) -> Result<Self> {
        if cards.len() != DECK_SIZE {
            return Err(SkaijoError::InvalidDeck(format!(
                "expected {} cards, got {}",
                DECK_SIZE,
                cards.len()
            )));
        }

        let expected = value_counts(Self::standard_cards());
        let actual = value_counts(cards.iter().copied());
        if let Some((value, want)) = expected
            .iter()
            .find(|&(value, want)| actual.get(value) != Some(want))
        {
            return Err(SkaijoError::InvalidDeck(format!(
                "expected {} cards of value {}, got {}",
                want,
                value,
                actual.get(value).copied().unwrap_or(0)
            )));
        }

        Ok(Self {
            cards: cards.into_iter().collect(),
        })
    }

    /// Remove and return the front card.
    pub fn draw(&mut self) -> Result<Card> {
        self.cards.pop_front().ok_or(SkaijoError::EmptyDeck)
    }

    /// Remove and return the back card.
    pub fn recover(&mut self) -> Result<Card> {
        self.cards.pop_back().ok_or(SkaijoError::EmptyDeck)
    }

    /// Append a card to the back.
    pub fn discard(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// The card `recover` would return.
    #[must_use]
    pub fn top_discard(&self) -> Option<Card> {
        self.cards.back().copied()
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cheap snapshot of the deck, front first.
    #[must_use]
    pub fn snapshot(&self) -> Vector<Card> {
        self.cards.clone()
    }

    /// Iterate front to back.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }
}

/// Multiplicity of each value in `cards`.
pub fn value_counts(cards: impl IntoIterator<Item = Card>) -> BTreeMap<i8, usize> {
    let mut counts = BTreeMap::new();
    for card in cards {
        *counts.entry(card.value()).or_insert(0) += 1;
    }
    counts
}
