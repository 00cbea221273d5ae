//! The game-state engine.
//!
//! `Engine` owns the deck, every hand and the turn order. It accepts the
//! commands of the turn protocol, validates each one against the current
//! phase and the card in transit, applies it, and notifies sinks.
//!
//! ## Turn protocol
//!
//! ```text
//! draw ──► discard ──► reveal (one face-down slot)
//!   └────► swap
//! recover ──► swap
//! ```
//!
//! The engine enforces the card-in-transit half of this (a drawn card must be
//! discarded or swapped before anything else, a recovered card must be
//! swapped). The "reveal after discard" and "two initial reveals" steps are
//! left to the orchestrator; the engine validates each reveal on its own.

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::cards::{Card, Deck};
use crate::core::{GameRng, Phase, PlayerId, PlayerMap, Result, SkaijoConfig, SkaijoError};
use crate::events::{Event, EventBus, EventSink, SinkId, Standing};
use crate::hand::{ClearedColumn, Hand, INITIAL_SLOTS};

/// Where the card in transit came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardSource {
    /// Front of the deck. May be discarded or swapped.
    Draw,
    /// Back of the deck. Must be swapped.
    Recover,
}

/// A card taken from the deck and not yet placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InTransit {
    pub card: Card,
    pub source: CardSource,
}

/// Single-owner game engine for one session.
///
/// ## Example
///
/// ```
/// use skaijo::rules::Engine;
///
/// let mut engine = Engine::default();
/// engine.set_players(["Ada", "Bo"]).unwrap();
/// engine.init_deck(Some(42)).unwrap();
/// engine.deal_hands().unwrap();
/// assert_eq!(engine.card_count(), 150);
/// assert_eq!(engine.deck_len(), 150 - 24);
/// ```
#[derive(Debug)]
pub struct Engine {
    config: SkaijoConfig,
    phase: Phase,
    seed: Option<u64>,

    /// Names in seat order.
    names: Vec<String>,
    seats: FxHashMap<String, PlayerId>,
    turn_order: Vec<PlayerId>,
    hands: Option<PlayerMap<Hand>>,

    deck: Deck,
    in_transit: Option<InTransit>,
    bus: EventBus,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(SkaijoConfig::default())
    }
}

impl Engine {
    /// Create an engine in `Setup`.
    #[must_use]
    pub fn new(config: SkaijoConfig) -> Self {
        Self {
            config,
            phase: Phase::Setup,
            seed: None,
            names: Vec::new(),
            seats: FxHashMap::default(),
            turn_order: Vec::new(),
            hands: None,
            deck: Deck::empty(),
            in_transit: None,
            bus: EventBus::new(),
        }
    }

    // === Sinks ===

    /// Subscribe a sink to every future event.
    pub fn register_sink(&mut self, sink: impl EventSink + 'static) -> SinkId {
        self.bus.register(sink)
    }

    /// Unsubscribe a sink. Returns `false` if it was not registered.
    pub fn remove_sink(&mut self, id: SinkId) -> bool {
        self.bus.remove(id)
    }

    // === Set-up ===

    /// Seat the players. Seat order is the initial turn order.
    ///
    /// Requires at least `min_players` unique, non-empty names.
    pub fn set_players<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.phase != Phase::Setup || !self.names.is_empty() {
            return Err(SkaijoError::invalid_state("set_players", self.phase));
        }

        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() < self.config.min_players {
            return Err(SkaijoError::InvalidPlayers(format!(
                "need at least {} players, got {}",
                self.config.min_players,
                names.len()
            )));
        }
        if names.len() > usize::from(u8::MAX) {
            return Err(SkaijoError::InvalidPlayers(format!(
                "at most {} players supported",
                u8::MAX
            )));
        }

        let mut seats = FxHashMap::default();
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(SkaijoError::InvalidPlayers("empty player name".into()));
            }
            if seats.insert(name.clone(), PlayerId::new(i as u8)).is_some() {
                return Err(SkaijoError::InvalidPlayers(format!("duplicate player name: {}", name)));
            }
        }

        self.turn_order = PlayerId::all(names.len()).collect();
        self.hands = Some(PlayerMap::with_default(names.len()));
        self.seats = seats;
        self.names = names;

        info!(players = ?self.names, "players seated");
        self.bus.emit(&Event::Players(self.names.clone()));
        Ok(())
    }

    /// Build the 150-card deck and shuffle it.
    ///
    /// `seed` falls back to the configured seed, then to a process-random
    /// one. The seed used is available from `seed()` afterwards.
    pub fn init_deck(&mut self, seed: Option<u64>) -> Result<()> {
        self.check_deck_setup("init_deck")?;

        let seed = seed
            .or(self.config.seed)
            .unwrap_or_else(GameRng::random_seed);
        let mut rng = GameRng::new(seed);
        self.deck = Deck::shuffled(&mut rng);
        self.seed = Some(seed);

        self.enter(Phase::DeckReady);
        info!(seed, "deck shuffled");
        self.bus.emit(&Event::InitDeck(self.deck.snapshot()));
        Ok(())
    }

    /// Install a caller-arranged deck instead of shuffling, front first.
    ///
    /// The cards must be exactly the standard 150-card multiset.
    pub fn init_deck_stacked(&mut self, cards: Vec<Card>) -> Result<()> {
        self.check_deck_setup("init_deck")?;

        self.deck = Deck::stacked(cards)?;
        self.seed = None;

        self.enter(Phase::DeckReady);
        info!("stacked deck installed");
        self.bus.emit(&Event::InitDeck(self.deck.snapshot()));
        Ok(())
    }

    fn check_deck_setup(&self, operation: &'static str) -> Result<()> {
        if self.phase != Phase::Setup || self.names.is_empty() {
            return Err(SkaijoError::invalid_state(operation, self.phase));
        }
        Ok(())
    }

    /// Deal 12 face-down cards to each player, in seat order, from the
    /// draw end.
    pub fn deal_hands(&mut self) -> Result<()> {
        self.require(&[Phase::DeckReady], "deal_hands")?;

        let needed = INITIAL_SLOTS * self.names.len();
        if self.deck.len() < needed {
            return Err(SkaijoError::EmptyDeck);
        }

        let deck = &mut self.deck;
        let hands = PlayerMap::try_from_fn(self.names.len(), |_| {
            let cards = (0..INITIAL_SLOTS)
                .map(|_| deck.draw())
                .collect::<Result<Vec<Card>>>()?;
            Hand::face_down(cards)
        })?;
        self.hands = Some(hands);

        self.enter(Phase::Dealt);
        info!(players = self.names.len(), deck = self.deck.len(), "hands dealt");
        self.bus.emit(&Event::DealHands(self.hands_in_turn_order()));
        Ok(())
    }

    // === Turn actions ===

    /// Turn one of `player`'s face-down slots face-up.
    ///
    /// Allowed from `Dealt` through `Playing` while no card is in transit.
    /// Returns the revealed card.
    pub fn reveal(&mut self, player: &str, index: usize) -> Result<Card> {
        self.require(&[Phase::Dealt, Phase::InitialReveal, Phase::Playing], "reveal")?;
        self.require_nothing_in_transit("reveal")?;
        let seat = self.seat(player)?;

        let revealed = self.hand_mut(seat)?.reveal(index)?;

        if self.phase == Phase::Dealt {
            self.enter(Phase::InitialReveal);
        }
        debug!(player, index, card = revealed.card.value(), "reveal");
        self.bus.emit(&Event::Reveal {
            player: player.to_string(),
            card: revealed.card,
            position: index + 1,
        });
        if let Some(cleared) = revealed.cleared {
            self.return_column(player, cleared);
        }
        Ok(revealed.card)
    }

    /// Take the card at the draw end.
    pub fn draw(&mut self) -> Result<Card> {
        self.require(&[Phase::Playing], "draw")?;
        self.require_nothing_in_transit("draw")?;

        let card = self.deck.draw()?;
        self.in_transit = Some(InTransit {
            card,
            source: CardSource::Draw,
        });

        debug!(card = card.value(), "draw");
        self.bus.emit(&Event::Draw(card));
        Ok(card)
    }

    /// Take the card at the discard end.
    pub fn recover(&mut self) -> Result<Card> {
        self.require(&[Phase::Playing], "recover")?;
        self.require_nothing_in_transit("recover")?;

        let card = self.deck.recover()?;
        self.in_transit = Some(InTransit {
            card,
            source: CardSource::Recover,
        });

        debug!(card = card.value(), "recover");
        self.bus.emit(&Event::Recover(card));
        Ok(card)
    }

    /// Put the drawn card on the discard end.
    ///
    /// `card` must be the card in transit, and it must have been drawn:
    /// a recovered card can only be swapped.
    pub fn discard(&mut self, card: Card) -> Result<()> {
        self.require(&[Phase::Playing], "discard")?;
        match self.in_transit {
            Some(InTransit {
                card: held,
                source: CardSource::Draw,
            }) if held == card => {}
            _ => return Err(SkaijoError::invalid_state("discard", self.phase)),
        }

        self.in_transit = None;
        self.deck.discard(card);

        debug!(card = card.value(), "discard");
        self.bus.emit(&Event::Discard(card));
        Ok(())
    }

    /// Place the card in transit face-up in `player`'s slot `index`.
    ///
    /// The slot's previous card goes to the discard end and is returned.
    pub fn swap(&mut self, card: Card, player: &str, index: usize) -> Result<Card> {
        self.require(&[Phase::Playing], "swap")?;
        if self.in_transit.map(|t| t.card) != Some(card) {
            return Err(SkaijoError::invalid_state("swap", self.phase));
        }
        let seat = self.seat(player)?;

        let swapped = self.hand_mut(seat)?.swap(card, index)?;
        self.in_transit = None;
        self.deck.discard(swapped.old);

        debug!(player, index, old = swapped.old.value(), new = card.value(), "swap");
        self.bus.emit(&Event::Swap {
            player: player.to_string(),
            old: swapped.old,
            new: card,
        });
        if let Some(cleared) = swapped.cleared {
            self.return_column(player, cleared);
        }
        Ok(swapped.old)
    }

    fn return_column(&mut self, player: &str, cleared: ClearedColumn) {
        info!(player, value = cleared.value.value(), "column cleared");
        self.bus.emit(&Event::Column {
            player: player.to_string(),
            value: cleared.value,
        });
        for card in cleared.cards {
            self.deck.discard(card);
            self.bus.emit(&Event::Discard(card));
        }
    }

    // === Ordering and scoring ===

    /// Rotate the turn order so the player with the highest revealed sum
    /// goes first. Ties go to the earliest player in the current order.
    ///
    /// Returns the first player and their revealed sum.
    pub fn determine_first_player(&mut self) -> Result<(String, i32)> {
        self.require(&[Phase::Dealt, Phase::InitialReveal], "determine_first_player")?;

        let sums: Vec<i32> = self
            .turn_order
            .iter()
            .map(|&seat| self.hand_of(seat).map_or(0, Hand::revealed_value_sum))
            .collect();

        let mut best = 0;
        for (pos, &sum) in sums.iter().enumerate() {
            if sum > sums[best] {
                best = pos;
            }
        }

        self.turn_order.rotate_left(best);
        let first = self.names[self.turn_order[0].index()].clone();
        let revealed_sum = sums[best];

        self.enter(Phase::Playing);
        info!(first = %first, revealed_sum, "turn order fixed");
        self.bus.emit(&Event::PlayerOrder {
            first: first.clone(),
            revealed_sum,
        });
        Ok((first, revealed_sum))
    }

    /// Whether any hand is complete. Always `false` before play starts.
    #[must_use]
    pub fn is_round_ended(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::RoundEnded | Phase::Scored)
            && self
                .hands
                .as_ref()
                .is_some_and(|hands| hands.values().any(Hand::is_complete))
    }

    /// Force every slot of every hand face-up. No column clears happen.
    pub fn reveal_hands(&mut self) -> Result<()> {
        self.require(&[Phase::Playing], "reveal_hands")?;
        self.require_nothing_in_transit("reveal_hands")?;
        if !self.is_round_ended() {
            return Err(SkaijoError::invalid_state("reveal_hands", self.phase));
        }

        if let Some(hands) = self.hands.as_mut() {
            hands.values_mut().for_each(Hand::reveal_all);
        }

        self.enter(Phase::RoundEnded);
        info!("hands revealed");
        self.bus.emit(&Event::RevealHands(self.hands_in_turn_order()));
        Ok(())
    }

    /// Final ranking, lowest total first. Equal totals keep turn order.
    pub fn leaderboard(&mut self) -> Result<Vec<Standing>> {
        self.require(&[Phase::RoundEnded, Phase::Scored], "leaderboard")?;

        let mut standings: Vec<Standing> = self
            .turn_order
            .iter()
            .map(|&seat| Standing {
                player: self.names[seat.index()].clone(),
                score: self.hand_of(seat).map_or(0, Hand::total_value_sum),
            })
            .collect();
        standings.sort_by_key(|s| s.score);

        self.enter(Phase::Scored);
        info!(winner = ?standings.first().map(|s| &s.player), "round scored");
        self.bus.emit(&Event::Leaderboard(standings.clone()));
        Ok(standings)
    }

    // === Views ===

    #[must_use]
    pub fn config(&self) -> &SkaijoConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seed of the shuffled deck. `None` before `init_deck` or for a
    /// stacked deck.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Names in seat order.
    #[must_use]
    pub fn players(&self) -> &[String] {
        &self.names
    }

    /// Names in turn order.
    #[must_use]
    pub fn turn_order(&self) -> Vec<&str> {
        self.turn_order
            .iter()
            .map(|seat| self.names[seat.index()].as_str())
            .collect()
    }

    /// A player's hand.
    pub fn hand(&self, player: &str) -> Result<&Hand> {
        let seat = self.seat(player)?;
        self.hand_of(seat)
            .ok_or_else(|| SkaijoError::UnknownPlayer(player.to_string()))
    }

    /// Sum of a player's face-up cards.
    pub fn revealed_value(&self, player: &str) -> Result<i32> {
        self.hand(player).map(Hand::revealed_value_sum)
    }

    /// The deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// The card `recover` would take.
    #[must_use]
    pub fn top_discard(&self) -> Option<Card> {
        self.deck.top_discard()
    }

    /// The card drawn or recovered and not yet placed.
    #[must_use]
    pub fn held_card(&self) -> Option<InTransit> {
        self.in_transit
    }

    /// Cards in the deck, in every hand and in transit. 150 once the deck
    /// exists.
    #[must_use]
    pub fn card_count(&self) -> usize {
        let in_hands: usize = self
            .hands
            .as_ref()
            .map_or(0, |hands| hands.values().map(Hand::len).sum());
        self.deck.len() + in_hands + usize::from(self.in_transit.is_some())
    }

    // === Internals ===

    fn enter(&mut self, phase: Phase) {
        debug!(from = %self.phase, to = %phase, "phase change");
        self.phase = phase;
    }

    fn require(&self, allowed: &[Phase], operation: &'static str) -> Result<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SkaijoError::invalid_state(operation, self.phase))
        }
    }

    /// No card may be in transit.
    fn require_nothing_in_transit(&self, operation: &'static str) -> Result<()> {
        if self.in_transit.is_some() {
            return Err(SkaijoError::invalid_state(operation, self.phase));
        }
        Ok(())
    }

    fn seat(&self, player: &str) -> Result<PlayerId> {
        self.seats
            .get(player)
            .copied()
            .ok_or_else(|| SkaijoError::UnknownPlayer(player.to_string()))
    }

    fn hand_of(&self, seat: PlayerId) -> Option<&Hand> {
        self.hands.as_ref().and_then(|hands| hands.get(seat))
    }

    fn hand_mut(&mut self, seat: PlayerId) -> Result<&mut Hand> {
        let name = &self.names[seat.index()];
        match self.hands.as_mut().and_then(|hands| hands.get_mut(seat)) {
            Some(hand) => Ok(hand),
            None => Err(SkaijoError::UnknownPlayer(name.clone())),
        }
    }

    fn hands_in_turn_order(&self) -> Vec<(String, Hand)> {
        self.turn_order
            .iter()
            .filter_map(|&seat| {
                self.hand_of(seat)
                    .map(|hand| (self.names[seat.index()].clone(), hand.clone()))
            })
            .collect()
    }
}
