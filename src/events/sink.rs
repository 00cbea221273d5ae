//! Event sinks and the engine's fan-out bus.
//!
//! Notification is synchronous: `EventBus::emit` runs every sink to
//! completion, in registration order, before returning. Sinks observe only;
//! they hold no reference to the engine and cannot call back into it.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::event::{Event, EventKind};

/// Receives engine events.
///
/// Any `FnMut(&Event)` closure is a sink.
pub trait EventSink {
    fn handle(&mut self, event: &Event);
}

impl<F> EventSink for F
where
    F: FnMut(&Event),
{
    fn handle(&mut self, event: &Event) {
        self(event)
    }
}

/// Handle returned by `register_sink`, used to remove the sink again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SinkId(pub u32);

impl std::fmt::Display for SinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sink({})", self.0)
    }
}

/// Registered sinks, notified in registration order.
#[derive(Default)]
pub struct EventBus {
    sinks: Vec<(SinkId, Box<dyn EventSink>)>,
    next_id: u32,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink.
    pub fn register(&mut self, sink: impl EventSink + 'static) -> SinkId {
        let id = SinkId(self.next_id);
        self.next_id += 1;
        self.sinks.push((id, Box::new(sink)));
        debug!(sink = %id, "event sink registered");
        id
    }

    /// Remove a sink. Returns `false` if it was not registered.
    pub fn remove(&mut self, id: SinkId) -> bool {
        let before = self.sinks.len();
        self.sinks.retain(|(sid, _)| *sid != id);
        before != self.sinks.len()
    }

    /// Number of registered sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Deliver `event` to every sink.
    pub fn emit(&mut self, event: &Event) {
        for (_, sink) in &mut self.sinks {
            sink.handle(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("sinks", &self.sinks.iter().map(|(id, _)| *id).collect::<Vec<_>>())
            .finish()
    }
}

/// Records every event. Clones share the same record.
///
/// ```
/// use skaijo::events::{EventKind, EventLog};
/// use skaijo::rules::Engine;
///
/// let log = EventLog::new();
/// let mut engine = Engine::default();
/// engine.register_sink(log.clone());
/// engine.set_players(["Ada", "Bo"]).unwrap();
/// assert_eq!(log.kinds(), vec![EventKind::Players]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<Event>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Kinds recorded so far, in order.
    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.borrow().iter().map(Event::kind).collect()
    }

    /// Most recent event.
    #[must_use]
    pub fn last(&self) -> Option<Event> {
        self.events.borrow().last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventSink for EventLog {
    fn handle(&mut self, event: &Event) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Writes each event as a structured `tracing` record under the
/// `skaijo::events` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn handle(&mut self, event: &Event) {
        let kind = event.kind().name();
        match event {
            Event::Players(names) => {
                info!(target: "skaijo::events", kind, players = ?names, "players seated");
            }
            Event::InitDeck(cards) => {
                info!(target: "skaijo::events", kind, cards = cards.len(), "deck shuffled");
            }
            Event::DealHands(hands) | Event::RevealHands(hands) => {
                for (player, hand) in hands {
                    let cards: Vec<String> = hand
                        .slots()
                        .iter()
                        .map(|s| if s.revealed { s.card.to_string() } else { "X".into() })
                        .collect();
                    info!(target: "skaijo::events", kind, player = %player, hand = %cards.join(" "));
                }
            }
            Event::PlayerOrder { first, revealed_sum } => {
                info!(target: "skaijo::events", kind, first = %first, revealed_sum, "turn order fixed");
            }
            Event::Draw(card) | Event::Recover(card) | Event::Discard(card) => {
                info!(target: "skaijo::events", kind, card = card.value());
            }
            Event::Swap { player, old, new } => {
                info!(target: "skaijo::events", kind, player = %player, old = old.value(), new = new.value());
            }
            Event::Reveal { player, card, position } => {
                info!(target: "skaijo::events", kind, player = %player, card = card.value(), position);
            }
            Event::Column { player, value } => {
                info!(target: "skaijo::events", kind, player = %player, value = value.value(), "column cleared");
            }
            Event::Leaderboard(standings) => {
                for (rank, s) in standings.iter().enumerate() {
                    info!(target: "skaijo::events", kind, rank = rank + 1, player = %s.player, score = s.score);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    fn draw(value: i8) -> Event {
        Event::Draw(Card::new(value).unwrap())
    }

    #[test]
    fn test_fan_out_in_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let first = Rc::clone(&order);
        bus.register(move |_: &Event| first.borrow_mut().push("first"));
        let second = Rc::clone(&order);
        bus.register(move |_: &Event| second.borrow_mut().push("second"));

        bus.emit(&draw(3));
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_remove_sink() {
        let log = EventLog::new();
        let mut bus = EventBus::new();
        let id = bus.register(log.clone());

        bus.emit(&draw(1));
        assert!(bus.remove(id));
        assert!(!bus.remove(id));
        bus.emit(&draw(2));

        assert_eq!(log.len(), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_event_log_shared_between_clones() {
        let log = EventLog::new();
        let mut sink = log.clone();
        sink.handle(&draw(4));

        assert_eq!(log.kinds(), vec![EventKind::Draw]);
        assert_eq!(log.last(), Some(draw(4)));
        log.clear();
        assert!(log.is_empty());
    }

    /// Shared buffer handed to the fmt subscriber as its writer.
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_tracing_sink_writes_fields() {
        use crate::events::Standing;

        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut sink = TracingSink;
            sink.handle(&Event::Column {
                player: "Ada".into(),
                value: Card::new(7).unwrap(),
            });
            sink.handle(&Event::Leaderboard(vec![
                Standing {
                    player: "Bo".into(),
                    score: 12,
                },
                Standing {
                    player: "Ada".into(),
                    score: 30,
                },
            ]));
        });

        let text = out.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3, "{}", text);

        assert!(lines[0].contains("skaijo::events"));
        assert!(lines[0].contains("column cleared"));
        assert!(lines[0].contains("player=Ada"));
        assert!(lines[0].contains("value=7"));

        assert!(lines[1].contains("rank=1") && lines[1].contains("player=Bo") && lines[1].contains("score=12"));
        assert!(lines[2].contains("rank=2") && lines[2].contains("player=Ada") && lines[2].contains("score=30"));
    }
}
