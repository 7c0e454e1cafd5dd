//! The trigger queue: ordered, continuation-driven execution.
//!
//! Resolution is a stack of frames. Each frame resolves one event kind:
//! it repeatedly takes the best pending trigger of that kind (lowest
//! priority value, then the tie-break policy, then registration order),
//! invokes its action, and waits. The frame does not advance until the
//! action's [`Completion`] is finished. When no trigger of the kind is left
//! the frame closes and runs its "on done" continuation.
//!
//! Waiting never blocks. An action that needs player input returns right
//! away after parking its completion inside whatever continuation the input
//! will run; the drive loop notices the frame is still waiting and returns.
//! Finishing the completion later resumes the loop.
//!
//! An action (or a continuation) may open a nested frame by resolving
//! another kind. The top frame always drains first.
//!
//! Opening a frame claims every unclaimed pending trigger of its kind. A
//! frame only takes its own claims plus triggers registered while it is
//! open, so a nested frame of the same kind never pulls in triggers that
//! are still queued behind the outer frame's in-flight trigger.

use tracing::{debug, error, warn};

use crate::core::TieBreak;
use crate::events::EventKind;

use super::log::{ResolutionEntry, ResolutionLog};
use super::{Trigger, TriggerId};

/// A step to run once some asynchronous work is done.
pub type Continuation<C> = Box<dyn FnOnce(&mut C)>;

/// Contexts that own a trigger queue.
///
/// The drive loop needs the whole context (actions mutate it) and the queue
/// inside it, so the queue is reached through this accessor.
pub trait TriggerHost: Sized + 'static {
    /// The context's trigger queue.
    fn trigger_queue(&mut self) -> &mut TriggerQueue<Self>;

    /// Will this context ever resolve `kind`?
    ///
    /// Registering a trigger for a kind nobody resolves strands it in the
    /// queue; [`register`] warns about that unless a frame of the kind is
    /// already open.
    fn resolves(&self, _kind: EventKind) -> bool {
        true
    }
}

/// Where the queue currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueStatus {
    /// No resolution is open.
    Idle,
    /// A trigger has started and its completion has not been finished.
    Waiting {
        /// Kind of the innermost frame.
        kind: EventKind,
        /// The trigger being waited on.
        trigger: TriggerId,
    },
    /// A frame is open but nothing is in flight (only seen mid-drive).
    Resolving {
        /// Kind of the innermost frame.
        kind: EventKind,
    },
}

struct Frame<C> {
    serial: u64,
    kind: EventKind,
    on_done: Option<Continuation<C>>,
    in_flight: Option<TriggerId>,
}

/// Pending triggers plus the resolution stack.
pub struct TriggerQueue<C> {
    pending: Vec<Trigger<C>>,
    frames: Vec<Frame<C>>,
    next_id: u64,
    next_frame: u64,
    draining: bool,
    tie_break: TieBreak,
    player_count: usize,
    log: ResolutionLog,
    log_limit: usize,
}

impl<C> TriggerQueue<C> {
    /// Create an empty queue.
    pub fn new(tie_break: TieBreak, player_count: usize) -> Self {
        Self {
            pending: Vec::new(),
            frames: Vec::new(),
            next_id: 1,
            next_frame: 1,
            draining: false,
            tie_break,
            player_count,
            log: ResolutionLog::new(),
            log_limit: 0,
        }
    }

    /// Cap the resolution log (builder pattern). 0 keeps every entry.
    #[must_use]
    pub fn with_log_limit(mut self, limit: usize) -> Self {
        self.log_limit = limit;
        self
    }

    fn record(&mut self, entry: ResolutionEntry) {
        self.log.record(entry);
        self.log.trim(self.log_limit);
    }

    /// Queue a trigger. It runs when its kind is next resolved.
    pub fn register(&mut self, mut trigger: Trigger<C>) -> TriggerId {
        let id = TriggerId::new(self.next_id);
        self.next_id += 1;
        trigger.id = id;
        trigger.frame = None;

        debug!(trigger = %id, name = %trigger.name, kind = %trigger.kind, priority = trigger.priority, "trigger registered");
        self.record(ResolutionEntry::Registered {
            trigger: id,
            kind: trigger.kind,
            priority: trigger.priority,
            name: trigger.name.clone(),
        });
        self.pending.push(trigger);
        id
    }

    /// Number of pending triggers for `kind`.
    #[must_use]
    pub fn pending_count(&self, kind: EventKind) -> usize {
        self.pending.iter().filter(|t| t.kind == kind).count()
    }

    /// Number of pending triggers of any kind.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Pending kinds with their trigger counts, in first-registration order.
    #[must_use]
    pub fn pending_kinds(&self) -> Vec<(EventKind, usize)> {
        let mut kinds: Vec<(EventKind, usize)> = Vec::new();
        for trigger in &self.pending {
            match kinds.iter_mut().find(|(kind, _)| *kind == trigger.kind) {
                Some((_, count)) => *count += 1,
                None => kinds.push((trigger.kind, 1)),
            }
        }
        kinds
    }

    /// Is a frame resolving `kind` open?
    #[must_use]
    pub fn is_resolving(&self, kind: EventKind) -> bool {
        self.frames.iter().any(|f| f.kind == kind)
    }

    /// Are there no pending triggers?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Open resolution frames, innermost last.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> QueueStatus {
        match self.frames.last() {
            None => QueueStatus::Idle,
            Some(frame) => match frame.in_flight {
                Some(trigger) => QueueStatus::Waiting { kind: frame.kind, trigger },
                None => QueueStatus::Resolving { kind: frame.kind },
            },
        }
    }

    /// Is no resolution open?
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.frames.is_empty()
    }

    /// The resolution record.
    #[must_use]
    pub fn log(&self) -> &ResolutionLog {
        &self.log
    }

    /// Take the resolution record, leaving an empty one.
    pub fn take_log(&mut self) -> ResolutionLog {
        std::mem::take(&mut self.log)
    }

    /// Change the tie-break policy for triggers taken from now on.
    pub fn set_tie_break(&mut self, tie_break: TieBreak) {
        self.tie_break = tie_break;
    }

    fn seat_key(&self, trigger: &Trigger<C>) -> usize {
        match self.tie_break {
            TieBreak::RegistrationOrder => 0,
            TieBreak::SeatOrder { first } => trigger
                .owner
                .map_or(usize::MAX, |owner| owner.seat_after(first, self.player_count)),
        }
    }

    fn open_frame(&mut self, kind: EventKind, on_done: Continuation<C>) {
        let serial = self.next_frame;
        self.next_frame += 1;
        for trigger in self.pending.iter_mut().filter(|t| t.kind == kind && t.frame.is_none()) {
            trigger.frame = Some(serial);
        }
        self.frames.push(Frame {
            serial,
            kind,
            on_done: Some(on_done),
            in_flight: None,
        });
    }

    fn take_next(&mut self, kind: EventKind, serial: u64) -> Option<Trigger<C>> {
        let pos = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == kind && t.frame.map_or(true, |claim| claim == serial))
            .min_by_key(|(_, t)| (t.priority, self.seat_key(t), t.id))
            .map(|(i, _)| i)?;
        Some(self.pending.remove(pos))
    }
}

impl<C> std::fmt::Debug for TriggerQueue<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerQueue")
            .field("pending", &self.pending)
            .field("depth", &self.frames.len())
            .field("status", &self.status())
            .field("tie_break", &self.tie_break)
            .finish()
    }
}

/// Queue a trigger on the context's queue.
pub fn register<C: TriggerHost>(ctx: &mut C, trigger: Trigger<C>) -> TriggerId {
    let kind = trigger.kind;
    if !ctx.resolves(kind) && !ctx.trigger_queue().is_resolving(kind) {
        warn!(%kind, name = %trigger.name, "trigger registered for a kind that is never resolved");
    }
    ctx.trigger_queue().register(trigger)
}

/// Resolve every pending trigger of `kind`, then run `on_done`.
///
/// If nothing is pending `on_done` runs immediately. If some trigger waits
/// for input, this returns early and `on_done` runs when the last trigger
/// of the kind finishes.
pub fn resolve<C: TriggerHost>(ctx: &mut C, kind: EventKind, on_done: impl FnOnce(&mut C) + 'static) {
    let queue = ctx.trigger_queue();
    debug!(%kind, pending = queue.pending_count(kind), depth = queue.frames.len(), "resolution opened");
    queue.record(ResolutionEntry::Opened { kind });
    queue.open_frame(kind, Box::new(on_done));
    drive(ctx);
}

fn drive<C: TriggerHost>(ctx: &mut C) {
    if ctx.trigger_queue().draining {
        return;
    }
    ctx.trigger_queue().draining = true;

    loop {
        let queue = ctx.trigger_queue();
        let Some(frame) = queue.frames.last() else {
            break;
        };
        if frame.in_flight.is_some() {
            break;
        }
        let (kind, serial) = (frame.kind, frame.serial);

        let Some(trigger) = queue.take_next(kind, serial) else {
            let Some(frame) = queue.frames.pop() else {
                break;
            };
            debug!(%kind, "resolution closed");
            queue.record(ResolutionEntry::Closed { kind });
            if let Some(on_done) = frame.on_done {
                on_done(ctx);
            }
            continue;
        };

        let Trigger { id, name, condition, action, .. } = trigger;
        if let Some(condition) = condition {
            if !condition(&*ctx) {
                debug!(trigger = %id, %name, "trigger condition failed, skipped");
                ctx.trigger_queue().record(ResolutionEntry::Skipped { trigger: id, name });
                continue;
            }
        }

        let queue = ctx.trigger_queue();
        if let Some(frame) = queue.frames.last_mut() {
            frame.in_flight = Some(id);
        }
        debug!(trigger = %id, %name, %kind, "trigger started");
        queue.record(ResolutionEntry::Started { trigger: id, kind, name });
        action(ctx, Completion::new(id));
    }

    ctx.trigger_queue().draining = false;
}

fn finish_trigger<C: TriggerHost>(ctx: &mut C, id: TriggerId) {
    let queue = ctx.trigger_queue();
    let Some(frame) = queue.frames.iter_mut().rev().find(|f| f.in_flight == Some(id)) else {
        warn!(trigger = %id, "completion finished for a trigger that is not in flight");
        return;
    };
    frame.in_flight = None;
    debug!(trigger = %id, "trigger finished");
    queue.record(ResolutionEntry::Finished { trigger: id });
    drive(ctx);
}

/// Single-use completion token handed to every trigger action.
///
/// `finish` consumes the token, so it cannot be signaled twice. A token
/// dropped without finishing leaves its frame waiting forever; that is
/// reported as an error and visible through [`QueueStatus::Waiting`].
#[must_use = "the queue waits until this completion is finished"]
#[derive(Debug)]
pub struct Completion {
    trigger: TriggerId,
    finished: bool,
}

impl Completion {
    fn new(trigger: TriggerId) -> Self {
        Self { trigger, finished: false }
    }

    /// The trigger this token completes.
    #[must_use]
    pub fn trigger(&self) -> TriggerId {
        self.trigger
    }

    /// Signal that the trigger's work is done and let the queue advance.
    pub fn finish<C: TriggerHost>(mut self, ctx: &mut C) {
        self.finished = true;
        finish_trigger(ctx, self.trigger);
    }

    /// Turn the token into a continuation that finishes it.
    pub fn into_continuation<C: TriggerHost>(self) -> Continuation<C> {
        Box::new(move |ctx: &mut C| self.finish(ctx))
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if !self.finished && !std::thread::panicking() {
            error!(trigger = %self.trigger, "completion dropped without finishing; resolution is stalled");
        }
    }
}
