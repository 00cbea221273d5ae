//! Player hands and the column-clear rule.
//!
//! A hand starts as 12 face-down slots in 3 rows. Whenever a slot is
//! revealed or swapped, its column is checked: three face-up slots of equal
//! value are removed and handed back to the caller for discarding.

pub mod grid;

pub use grid::{ClearedColumn, Hand, Revealed, Slot, Swapped, INITIAL_SLOTS, ROWS};
