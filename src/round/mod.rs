//! Round orchestration.
//!
//! `RoundDriver` runs the fixed command protocol against an `Engine`,
//! asking a `PlayerController` for every decision.

pub mod controller;
pub mod driver;

pub use controller::{Placement, PlayerController, TurnSource};
pub use driver::RoundDriver;
