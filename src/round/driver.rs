//! Drives an `Engine` through one full round.
//!
//! ## Protocol
//!
//! 1. Seat players, shuffle, deal.
//! 2. Each player reveals `initial_reveals` slots, in seat order.
//! 3. Fix turn order by revealed sum.
//! 4. Take turns until a hand is complete, as `FinalTurnPolicy` dictates.
//! 5. Reveal every hand and score.
//!
//! A turn is `draw → (discard → reveal | swap)` or `recover → swap`.

use tracing::{debug, info, warn};

use crate::core::{FinalTurnPolicy, Result, SkaijoConfig, SkaijoError};
use crate::events::Standing;
use crate::hand::INITIAL_SLOTS;
use crate::rules::Engine;

use super::controller::{Placement, PlayerController, TurnSource};

/// Stateless orchestrator built from a `SkaijoConfig`.
#[derive(Clone, Debug)]
pub struct RoundDriver {
    initial_reveals: usize,
    max_players: usize,
    final_turn: FinalTurnPolicy,
    max_attempts: u32,
}

impl Default for RoundDriver {
    fn default() -> Self {
        Self::new(&SkaijoConfig::default())
    }
}

impl RoundDriver {
    #[must_use]
    pub fn new(config: &SkaijoConfig) -> Self {
        Self {
            initial_reveals: config.initial_reveals.min(INITIAL_SLOTS - 1),
            max_players: config.max_players,
            final_turn: config.final_turn,
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Play a whole round on a fresh engine and return the leaderboard.
    pub fn run<C>(&self, engine: &mut Engine, names: &[&str], controller: &mut C) -> Result<Vec<Standing>>
    where
        C: PlayerController + ?Sized,
    {
        if names.len() > self.max_players {
            return Err(SkaijoError::InvalidPlayers(format!(
                "at most {} players, got {}",
                self.max_players,
                names.len()
            )));
        }

        engine.set_players(names.iter().copied())?;
        engine.init_deck(None)?;
        engine.deal_hands()?;
        self.setup_reveals(engine, controller)?;
        engine.determine_first_player()?;
        self.play_until_round_end(engine, controller)?;
        engine.reveal_hands()?;
        engine.leaderboard()
    }

    /// Ask every player for their initial reveals, in current order.
    ///
    /// A player always keeps at least one face-down slot, so no hand is
    /// complete before play starts.
    pub fn setup_reveals<C>(&self, engine: &mut Engine, controller: &mut C) -> Result<()>
    where
        C: PlayerController + ?Sized,
    {
        let order = owned_order(engine);
        for player in &order {
            for _ in 0..self.initial_reveals {
                if engine.hand(player)?.hidden_slots().nth(1).is_none() {
                    debug!(player = %player, "one face-down slot left, reveals stop");
                    break;
                }
                self.retry(player, || {
                    let slot = controller.initial_reveal(&*engine, player);
                    engine.reveal(player, slot).map(|_| ())
                })?;
            }
        }
        Ok(())
    }

    /// Take turns until the round ends. Returns the number of turns played.
    pub fn play_until_round_end<C>(&self, engine: &mut Engine, controller: &mut C) -> Result<usize>
    where
        C: PlayerController + ?Sized,
    {
        let order = owned_order(engine);
        let mut turns = 0;

        match self.final_turn {
            FinalTurnPolicy::EndOfPass => {
                while !engine.is_round_ended() {
                    for player in &order {
                        self.play_turn(engine, player, controller)?;
                        turns += 1;
                    }
                }
            }
            FinalTurnPolicy::OneMoreTurn => {
                let mut remaining: Option<usize> = None;
                for player in order.iter().cycle() {
                    if remaining == Some(0) {
                        break;
                    }
                    self.play_turn(engine, player, controller)?;
                    turns += 1;

                    match remaining.as_mut() {
                        Some(left) => *left -= 1,
                        None if engine.is_round_ended() => {
                            info!(closer = %player, "hand completed, last turns for the others");
                            remaining = Some(order.len() - 1);
                        }
                        None => {}
                    }
                }
            }
        }

        info!(turns, "round over");
        Ok(turns)
    }

    /// One full turn for `player`.
    pub fn play_turn<C>(&self, engine: &mut Engine, player: &str, controller: &mut C) -> Result<()>
    where
        C: PlayerController + ?Sized,
    {
        match controller.choose_source(engine, player) {
            TurnSource::Recover => {
                let card = engine.recover()?;
                debug!(player, card = card.value(), "recovered");
                self.retry(player, || {
                    let slot = controller.choose_swap_slot(&*engine, player, card);
                    engine.swap(card, player, slot).map(|_| ())
                })
            }
            TurnSource::Draw => {
                let card = engine.draw()?;
                debug!(player, card = card.value(), "drew");
                let discarded = self.retry(player, || {
                    match controller.choose_placement(&*engine, player, card) {
                        Placement::Swap(slot) => engine.swap(card, player, slot).map(|_| false),
                        Placement::Discard => {
                            // A discard owes a reveal, so it needs a face-down slot.
                            if engine.hand(player)?.hidden_slots().next().is_none() {
                                return Err(SkaijoError::invalid_state("discard", engine.phase()));
                            }
                            engine.discard(card).map(|_| true)
                        }
                    }
                })?;

                if discarded {
                    self.retry(player, || {
                        let slot = controller.choose_reveal(&*engine, player);
                        engine.reveal(player, slot).map(|_| ())
                    })?;
                }
                Ok(())
            }
        }
    }

    fn retry<T>(&self, player: &str, mut step: impl FnMut() -> Result<T>) -> Result<T> {
        for attempt in 1..=self.max_attempts {
            match step() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_recoverable() => {
                    warn!(player, attempt, error = %err, "choice rejected");
                }
                Err(err) => return Err(err),
            }
        }
        Err(SkaijoError::TooManyAttempts {
            player: player.to_string(),
        })
    }
}

fn owned_order(engine: &Engine) -> Vec<String> {
    engine.turn_order().into_iter().map(str::to_string).collect()
}
