//! Shared helpers for the integration suites.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::{fmt, EnvFilter};

use skaijo::round::{Placement, PlayerController, TurnSource};
use skaijo::{Card, Deck, Engine, EventLog};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once. Level from `TEST_LOG`, then `RUST_LOG`,
/// then `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn card(value: i8) -> Card {
    Card::new(value).unwrap()
}

/// The standard multiset with `front` moved to the draw end, in order.
///
/// The first 12 values become seat 0's hand, the next 12 seat 1's, and so
/// on. The last card of the result is the one `recover` takes first.
pub fn stacked(front: &[i8]) -> Vec<Card> {
    let mut pool = Deck::standard_cards();
    let mut cards = Vec::with_capacity(pool.len());
    for &value in front {
        let pos = pool
            .iter()
            .position(|c| c.value() == value)
            .unwrap_or_else(|| panic!("no {} left to stack", value));
        cards.push(pool.remove(pos));
    }
    cards.extend(pool);
    cards
}

/// Engine with `players` seated, a stacked deck installed and hands dealt.
pub fn dealt_stacked(players: &[&str], front: &[i8]) -> (Engine, EventLog) {
    init_logging();
    let log = EventLog::new();
    let mut engine = Engine::default();
    engine.register_sink(log.clone());
    engine.set_players(players.iter().copied()).unwrap();
    engine.init_deck_stacked(stacked(front)).unwrap();
    engine.deal_hands().unwrap();
    (engine, log)
}

/// Engine with `players` seated, a seeded deck and hands dealt.
pub fn dealt_seeded(players: &[&str], seed: u64) -> (Engine, EventLog) {
    init_logging();
    let log = EventLog::new();
    let mut engine = Engine::default();
    engine.register_sink(log.clone());
    engine.set_players(players.iter().copied()).unwrap();
    engine.init_deck(Some(seed)).unwrap();
    engine.deal_hands().unwrap();
    (engine, log)
}

/// Picks uniformly among legal answers.
pub struct RandomController {
    rng: ChaCha8Rng,
}

impl RandomController {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn any_slot(&mut self, engine: &Engine, player: &str) -> usize {
        let len = engine.hand(player).map_or(1, |h| h.len().max(1));
        self.rng.gen_range(0..len)
    }

    fn hidden_slot(&mut self, engine: &Engine, player: &str) -> Option<usize> {
        let hidden: Vec<usize> = engine.hand(player).ok()?.hidden_slots().collect();
        hidden.choose(&mut self.rng).copied()
    }
}

impl PlayerController for RandomController {
    fn choose_source(&mut self, _: &Engine, _: &str) -> TurnSource {
        if self.rng.gen_bool(0.3) {
            TurnSource::Recover
        } else {
            TurnSource::Draw
        }
    }

    fn choose_placement(&mut self, engine: &Engine, player: &str, _: Card) -> Placement {
        let has_hidden = self.hidden_slot(engine, player).is_some();
        if has_hidden && self.rng.gen_bool(0.5) {
            Placement::Discard
        } else {
            Placement::Swap(self.any_slot(engine, player))
        }
    }

    fn choose_swap_slot(&mut self, engine: &Engine, player: &str, _: Card) -> usize {
        self.any_slot(engine, player)
    }

    fn choose_reveal(&mut self, engine: &Engine, player: &str) -> usize {
        self.hidden_slot(engine, player).unwrap_or(0)
    }
}
