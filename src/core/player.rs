//! Seats and per-seat storage.
//!
//! A `PlayerId` is the position a name had in the list given to
//! `Engine::set_players`. Seats never move once assigned; turn order is a
//! separate sequence of seats that the engine rotates.

use serde::{Deserialize, Serialize};

use super::Result;

/// Seat identifier. Seat 0 is the first name given at set-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Every seat at a table of `seats`, in seat order.
    ///
    /// ```
    /// use skaijo::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).map(PlayerId::index).collect();
    /// assert_eq!(seats, vec![0, 1, 2]);
    /// ```
    pub fn all(seats: usize) -> impl Iterator<Item = PlayerId> {
        (0..seats).map(|seat| PlayerId(seat as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// One value per seat, stored in seat order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    by_seat: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one value per seat, stopping at the first error.
    ///
    /// Seats are visited in order, so a closure that pulls from a shared
    /// source hands seat 0 the first values.
    ///
    /// ```
    /// use skaijo::core::{PlayerId, PlayerMap};
    ///
    /// let mut next = 0;
    /// let map = PlayerMap::try_from_fn(3, |_| {
    ///     next += 10;
    ///     Ok(next)
    /// })
    /// .unwrap();
    /// assert_eq!(map.get(PlayerId::new(2)), Some(&30));
    /// ```
    pub fn try_from_fn(seats: usize, mut build: impl FnMut(PlayerId) -> Result<T>) -> Result<Self> {
        let by_seat = PlayerId::all(seats).map(&mut build).collect::<Result<Vec<T>>>()?;
        Ok(Self { by_seat })
    }

    /// A default value for every seat.
    #[must_use]
    pub fn with_default(seats: usize) -> Self
    where
        T: Default,
    {
        Self {
            by_seat: std::iter::repeat_with(T::default).take(seats).collect(),
        }
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.by_seat.len()
    }

    /// `None` for a seat outside the table.
    #[must_use]
    pub fn get(&self, seat: PlayerId) -> Option<&T> {
        self.by_seat.get(seat.index())
    }

    pub fn get_mut(&mut self, seat: PlayerId) -> Option<&mut T> {
        self.by_seat.get_mut(seat.index())
    }

    /// Values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.by_seat.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.by_seat.iter_mut()
    }
}
