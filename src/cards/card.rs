//! Card values.

use serde::{Deserialize, Serialize};

use crate::core::{Result, SkaijoError};

/// A valued tile. Cards have no identity beyond their value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct Card(pub(super) i8);

impl Card {
    /// Lowest card value.
    pub const MIN: i8 = -2;
    /// Highest card value.
    pub const MAX: i8 = 12;

    /// Create a card, rejecting values outside [-2, 12].
    pub fn new(value: i8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SkaijoError::InvalidCard(value))
        }
    }

    /// The card's value.
    #[must_use]
    pub const fn value(self) -> i8 {
        self.0
    }

    /// Every legal value, lowest first.
    pub fn all_values() -> impl Iterator<Item = i8> {
        Self::MIN..=Self::MAX
    }
}

impl TryFrom<i8> for Card {
    type Error = SkaijoError;

    fn try_from(value: i8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Card> for i8 {
    fn from(card: Card) -> i8 {
        card.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
