//! Engine error taxonomy.
//!
//! Every error is local to the rejected call: the engine validates before it
//! mutates, so a caller can re-prompt and try again.

use thiserror::Error;

use super::phase::Phase;

/// Errors returned by engine and driver operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SkaijoError {
    /// Operation invoked in the wrong phase or turn step.
    #[error("`{operation}` is not allowed during {phase}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },
    /// Name not seated at this table.
    #[error("unknown player: {0}")]
    UnknownPlayer(String),
    /// Slot index outside the current hand.
    #[error("slot {index} is out of range for a hand of {len}")]
    OutOfRange { index: usize, len: usize },
    /// Slot is already face-up.
    #[error("slot {index} is already revealed")]
    AlreadyRevealed { index: usize },
    /// No card left at the requested end of the deck.
    #[error("deck is empty")]
    EmptyDeck,
    /// Player list rejected at set-up.
    #[error("invalid players: {0}")]
    InvalidPlayers(String),
    /// Card value outside [-2, 12].
    #[error("card value {0} is outside [-2, 12]")]
    InvalidCard(i8),
    /// Hand length is not a whole number of columns.
    #[error("a hand of {0} cards does not fill whole columns of 3")]
    InvalidHand(usize),
    /// Supplied deck is not the standard composition.
    #[error("invalid deck: {0}")]
    InvalidDeck(String),
    /// A controller kept choosing rejected moves.
    #[error("{player} made too many invalid choices")]
    TooManyAttempts { player: String },
}

impl SkaijoError {
    pub(crate) fn invalid_state(operation: &'static str, phase: Phase) -> Self {
        Self::InvalidState { operation, phase }
    }

    /// Whether a controller can fix this by choosing differently.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::OutOfRange { .. } | Self::AlreadyRevealed { .. } | Self::InvalidState { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SkaijoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SkaijoError::invalid_state("deal_hands", Phase::Setup);
        assert_eq!(err.to_string(), "`deal_hands` is not allowed during setup");

        let err = SkaijoError::OutOfRange { index: 12, len: 9 };
        assert_eq!(err.to_string(), "slot 12 is out of range for a hand of 9");
    }

    #[test]
    fn test_recoverable() {
        assert!(SkaijoError::AlreadyRevealed { index: 0 }.is_recoverable());
        assert!(!SkaijoError::EmptyDeck.is_recoverable());
        assert!(!SkaijoError::UnknownPlayer("Zoe".into()).is_recoverable());
    }
}
