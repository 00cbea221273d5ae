//! Core building blocks: seats, RNG, configuration, phases and errors.

pub mod player;
pub mod rng;
pub mod config;
pub mod phase;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{FinalTurnPolicy, SkaijoConfig};
pub use phase::Phase;
pub use error::{Result, SkaijoError};
