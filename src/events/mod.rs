//! Event system: kinds, ship events, and the per-ship bus.
//!
//! Abilities react to things that happen to their host by subscribing
//! handlers to the host's [`EventBus`]. The engine fires lifecycle kinds
//! (round and phase boundaries, attack outcomes, token changes); games may
//! define their own kinds and fire them the same way.
//!
//! ## Example Usage
//!
//! ```
//! use rust_skirmish::core::ShipId;
//! use rust_skirmish::events::{EventBus, EventKind, ShipEvent};
//!
//! #[derive(Default)]
//! struct Log {
//!     bus: EventBus<Log>,
//!     seen: Vec<ShipId>,
//! }
//!
//! let mut log = Log::default();
//! let handle = log.bus.subscribe(EventKind::ROUND_END, |l: &mut Log, ev| l.seen.push(ev.ship));
//!
//! let event = ShipEvent::new(EventKind::ROUND_END, ShipId(3));
//! let emission = log.bus.snapshot(EventKind::ROUND_END);
//! emission.dispatch(&mut log, &event, |l, h| l.bus.unsubscribe(h));
//! assert_eq!(log.seen, vec![ShipId(3)]);
//!
//! assert!(log.bus.unsubscribe(handle));
//! assert!(!log.bus.unsubscribe(handle));
//! ```

mod bus;
mod event;
mod kind;

pub use bus::{Channel, Emission, EventBus, Handler, StatHook, SubscriptionHandle, SubscriptionId};
pub use event::ShipEvent;
pub use kind::EventKind;
