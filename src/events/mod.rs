//! Event notifications.
//!
//! The engine pushes an `Event` to every registered `EventSink` after each
//! completed state change. Renderers, loggers and replay writers live
//! outside the crate and plug in here.

pub mod event;
pub mod sink;

pub use event::{Event, EventKind, Standing};
pub use sink::{EventBus, EventLog, EventSink, SinkId, TracingSink};
