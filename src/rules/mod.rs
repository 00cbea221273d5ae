//! The engine: phases, turn actions, ordering and scoring.
//!
//! The engine never decides anything on a player's behalf. It validates and
//! applies the commands an orchestrator sends, such as the `RoundDriver` in
//! `crate::round`.

pub mod engine;

pub use engine::{CardSource, Engine, InTransit};
pub use crate::events::Standing;
