//! Trigger system: deferred, ordered, completion-driven work.
//!
//! Handlers never do multi-step work inline. They register a [`Trigger`]
//! for the event kind being resolved; the queue runs triggers one at a
//! time and waits for each to finish its [`Completion`] before starting the
//! next. This is how a step that needs a player's answer suspends without
//! blocking anything.
//!
//! ## Key Components
//!
//! - [`Trigger`]: a named action keyed by event kind and priority
//! - [`TriggerQueue`]: pending triggers plus the resolution stack
//! - [`Completion`]: single-use token every action must finish
//! - [`resolve`]: drain one kind, then continue
//! - [`in_sequence`]: fan a suspendable step out over a list
//! - [`ResolutionLog`]: replayable record of what ran, in order
//!
//! ## Example Usage
//!
//! ```
//! use rust_skirmish::core::TieBreak;
//! use rust_skirmish::events::EventKind;
//! use rust_skirmish::triggers::{register, resolve, Completion, Trigger, TriggerHost, TriggerQueue};
//!
//! struct Table {
//!     queue: TriggerQueue<Table>,
//!     order: Vec<&'static str>,
//! }
//!
//! impl TriggerHost for Table {
//!     fn trigger_queue(&mut self) -> &mut TriggerQueue<Self> {
//!         &mut self.queue
//!     }
//! }
//!
//! let mut table = Table { queue: TriggerQueue::new(TieBreak::RegistrationOrder, 2), order: Vec::new() };
//! let kind = EventKind::COMBAT_PHASE_START;
//!
//! register(&mut table, Trigger::new("late", kind, |t: &mut Table, done: Completion| {
//!     t.order.push("late");
//!     done.finish(t);
//! }).with_priority(2));
//! register(&mut table, Trigger::new("early", kind, |t: &mut Table, done: Completion| {
//!     t.order.push("early");
//!     done.finish(t);
//! }).with_priority(1));
//!
//! resolve(&mut table, kind, |t: &mut Table| t.order.push("done"));
//! assert_eq!(table.order, vec!["early", "late", "done"]);
//! ```

mod log;
mod queue;
mod sequence;
mod trigger;

pub use log::{ResolutionEntry, ResolutionLog};
pub use queue::{register, resolve, Completion, Continuation, QueueStatus, TriggerHost, TriggerQueue};
pub use sequence::{in_sequence, Step};
pub use trigger::{Trigger, TriggerAction, TriggerCondition, TriggerId};
