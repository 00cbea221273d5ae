//! A player's grid of slots.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::{Result, SkaijoError};

/// Rows in every hand. Hand length is always a multiple of this.
pub const ROWS: usize = 3;

/// Slots dealt to each player.
pub const INITIAL_SLOTS: usize = 12;

/// One position in a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub card: Card,
    pub revealed: bool,
}

/// Three slots removed by a column clear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClearedColumn {
    /// The shared value of the cleared slots.
    pub value: Card,
    /// The removed cards in slot order. They belong on the discard end.
    pub cards: SmallVec<[Card; ROWS]>,
}

/// Outcome of `Hand::reveal`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Revealed {
    pub card: Card,
    pub cleared: Option<ClearedColumn>,
}

/// Outcome of `Hand::swap`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Swapped {
    /// The card that was in the slot. The caller must discard it.
    pub old: Card,
    pub cleared: Option<ClearedColumn>,
}

/// A player's slots, conceptually three rows.
///
/// A slot's column is `index % (len / 3)`, recomputed from the current
/// length. After a clear the remaining slots keep their relative order, so
/// a later clear groups slots differently than the initial 4-column grid
/// would.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    slots: SmallVec<[Slot; INITIAL_SLOTS]>,
}

impl Hand {
    /// A hand of face-down cards, in the given order.
    ///
    /// The card count must be a multiple of 3.
    pub fn face_down(cards: impl IntoIterator<Item = Card>) -> Result<Self> {
        let slots: SmallVec<[Slot; INITIAL_SLOTS]> = cards
            .into_iter()
            .map(|card| Slot {
                card,
                revealed: false,
            })
            .collect();
        if slots.len() % ROWS != 0 {
            return Err(SkaijoError::InvalidHand(slots.len()));
        }
        Ok(Self { slots })
    }

    /// Number of slots left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether every slot has been cleared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots in order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// A single slot.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Number of columns at the current length.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.slots.len() / ROWS
    }

    /// Column of `index` at the current length.
    #[must_use]
    pub fn column_of(&self, index: usize) -> Option<usize> {
        match self.column_count() {
            0 => None,
            columns if index < self.slots.len() => Some(index % columns),
            _ => None,
        }
    }

    /// Turn slot `index` face-up, then apply the column rule.
    pub fn reveal(&mut self, index: usize) -> Result<Revealed> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SkaijoError::OutOfRange { index, len })?;
        if slot.revealed {
            return Err(SkaijoError::AlreadyRevealed { index });
        }
        slot.revealed = true;
        let card = slot.card;

        Ok(Revealed {
            card,
            cleared: self.column_check(index),
        })
    }

    /// Put `card` face-up in slot `index`, then apply the column rule.
    pub fn swap(&mut self, card: Card, index: usize) -> Result<Swapped> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SkaijoError::OutOfRange { index, len })?;
        let old = std::mem::replace(
            slot,
            Slot {
                card,
                revealed: true,
            },
        )
        .card;

        Ok(Swapped {
            old,
            cleared: self.column_check(index),
        })
    }

    /// Remove the column of `index` if all its slots are face-up and equal.
    fn column_check(&mut self, index: usize) -> Option<ClearedColumn> {
        let columns = self.column_count();
        let column = self.column_of(index)?;

        let members: SmallVec<[Slot; ROWS]> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(i, _)| i % columns == column)
            .map(|(_, slot)| *slot)
            .collect();

        let value = members.first()?.card;
        if !members.iter().all(|s| s.revealed && s.card == value) {
            return None;
        }

        let mut i = 0;
        self.slots.retain(|_| {
            let keep = i % columns != column;
            i += 1;
            keep
        });

        Some(ClearedColumn {
            value,
            cards: members.iter().map(|s| s.card).collect(),
        })
    }

    /// Force every slot face-up. No column rule is applied.
    pub fn reveal_all(&mut self) {
        for slot in &mut self.slots {
            slot.revealed = true;
        }
    }

    /// Whether every remaining slot is face-up.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.revealed)
    }

    /// Indices of face-down slots.
    pub fn hidden_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.revealed)
            .map(|(i, _)| i)
    }

    /// Sum of face-up values.
    #[must_use]
    pub fn revealed_value_sum(&self) -> i32 {
        self.slots
            .iter()
            .filter(|s| s.revealed)
            .map(|s| i32::from(s.card.value()))
            .sum()
    }

    /// Sum of all values, face-up or not.
    #[must_use]
    pub fn total_value_sum(&self) -> i32 {
        self.slots.iter().map(|s| i32::from(s.card.value())).sum()
    }

    /// Iterate over the cards, face-up or not.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.slots.iter().map(|s| s.card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(value: i8) -> Card {
        Card::new(value).unwrap()
    }

    fn hand(values: &[i8]) -> Hand {
        Hand::face_down(values.iter().map(|&v| card(v))).unwrap()
    }

    #[test]
    fn test_face_down_needs_whole_columns() {
        assert_eq!(
            Hand::face_down([card(1), card(2)]),
            Err(SkaijoError::InvalidHand(2))
        );
        assert_eq!(Hand::face_down(Vec::new()).map(|h| h.len()), Ok(0));

        let h = hand(&[4, 5, 6]);
        assert_eq!(h.column_count(), 1);
        assert!(h.hidden_slots().eq(0..3));
    }

    // Columns for 12 slots: {0,4,8} {1,5,9} {2,6,10} {3,7,11}
    const GRID: [i8; 12] = [7, 1, 2, 3, 7, 5, 6, 8, 4, 9, 10, 11];

    #[test]
    fn test_reveal_and_sums() {
        let mut h = hand(&GRID);
        assert_eq!(h.revealed_value_sum(), 0);
        assert_eq!(h.total_value_sum(), 73);

        let r = h.reveal(1).unwrap();
        assert_eq!(r.card, card(1));
        assert!(r.cleared.is_none());
        h.reveal(7).unwrap();

        assert_eq!(h.revealed_value_sum(), 9);
        assert_eq!(h.hidden_slots().count(), 10);
        assert!(!h.is_complete());
    }

    #[test]
    fn test_reveal_errors() {
        let mut h = hand(&GRID);
        h.reveal(3).unwrap();

        assert_eq!(h.reveal(3), Err(SkaijoError::AlreadyRevealed { index: 3 }));
        assert_eq!(h.reveal(12), Err(SkaijoError::OutOfRange { index: 12, len: 12 }));
        assert_eq!(h.revealed_value_sum(), 3);
    }

    #[test]
    fn test_two_equal_cards_do_not_clear() {
        let mut h = hand(&GRID);
        h.reveal(0).unwrap();
        let r = h.reveal(4).unwrap();

        assert!(r.cleared.is_none());
        assert_eq!(h.len(), 12);
    }

    #[test]
    fn test_swap_completes_column() {
        let mut h = hand(&GRID);
        h.reveal(0).unwrap();
        h.reveal(4).unwrap();

        let s = h.swap(card(7), 8).unwrap();
        assert_eq!(s.old, card(4));

        let cleared = s.cleared.unwrap();
        assert_eq!(cleared.value, card(7));
        assert_eq!(cleared.cards.as_slice(), &[card(7); 3]);
        assert_eq!(h.len(), 9);

        let remaining: Vec<i8> = h.cards().map(Card::value).collect();
        assert_eq!(remaining, vec![1, 2, 3, 5, 6, 8, 9, 10, 11]);
    }

    #[test]
    fn test_equal_but_hidden_column_does_not_clear() {
        let mut h = hand(&[5, 0, 0, 5, 0, 0, 5, 0, 0]);
        h.reveal(0).unwrap();
        let s = h.swap(card(5), 3).unwrap();

        assert!(s.cleared.is_none());
        assert_eq!(h.len(), 9);
    }

    #[test]
    fn test_columns_recomputed_after_clear() {
        // After clearing {0,4,8} the nine survivors regroup as
        // {0,3,6} {1,4,7} {2,5,8} over their new indices.
        let mut h = hand(&[7, 2, 1, 1, 7, 2, 1, 1, 7, 2, 1, 1]);
        h.reveal(0).unwrap();
        h.reveal(4).unwrap();
        assert!(h.reveal(8).unwrap().cleared.is_some());

        let remaining: Vec<i8> = h.cards().map(Card::value).collect();
        assert_eq!(remaining, vec![2, 1, 1, 2, 1, 1, 2, 1, 1]);
        assert_eq!(h.column_of(3), Some(0));

        // Old slots 1, 5 and 9 all held 2 and now sit at 0, 3 and 6.
        h.reveal(0).unwrap();
        h.reveal(3).unwrap();
        let cleared = h.reveal(6).unwrap().cleared.unwrap();
        assert_eq!(cleared.value, card(2));
        assert_eq!(h.len(), 6);
    }

    #[test]
    fn test_clear_to_empty() {
        let mut h = hand(&[4, 4, 4]);
        h.reveal(0).unwrap();
        h.reveal(1).unwrap();
        assert!(h.reveal(2).unwrap().cleared.is_some());

        assert!(h.is_empty());
        assert!(h.is_complete());
        assert_eq!(h.column_of(0), None);
        assert_eq!(h.total_value_sum(), 0);
    }

    #[test]
    fn test_reveal_all_skips_column_rule() {
        let mut h = hand(&[3, 3, 3, 3, 3, 3]);
        h.reveal_all();

        assert!(h.is_complete());
        assert_eq!(h.len(), 6);
        assert_eq!(h.total_value_sum(), 18);
    }
}
