//! Per-ship event bus.
//!
//! The bus is a registry of subscribers keyed by channel. Each subscription
//! returns a handle that removes exactly that subscriber. Emission works on
//! a snapshot taken when it starts: handlers added or removed while an
//! emission is running do not change who that emission reaches.
//!
//! Subscriber lists are `im::Vector`s, so taking a snapshot is a pointer
//! copy no matter how many handlers are subscribed.
//!
//! The bus is generic over the context `C` handed to handlers. The game
//! uses `EventBus<Game>`; tests can use any struct.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::ship::Stat;

use super::{EventKind, ShipEvent};

/// An event handler. Receives the context mutably and the event.
pub type Handler<C> = Rc<dyn Fn(&mut C, &ShipEvent)>;

/// An "after-get" hook. Adjusts a raw stat value before it is clamped.
pub type StatHook = Rc<dyn Fn(&mut i32)>;

/// Identifier of one subscription on one bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// A channel on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// An event channel.
    Event(EventKind),
    /// An after-get hook channel for a stat.
    Stat(Stat),
}

/// Handle returned by a subscription. Pass it back to `unsubscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    id: SubscriptionId,
    channel: Channel,
}

impl SubscriptionHandle {
    /// The subscription's identifier.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The channel the subscription lives on.
    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

struct Subscriber<F: ?Sized> {
    handle: SubscriptionHandle,
    once: bool,
    callback: Rc<F>,
}

// Manual impl: deriving would require `F: Clone`.
impl<F: ?Sized> Clone for Subscriber<F> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle,
            once: self.once,
            callback: Rc::clone(&self.callback),
        }
    }
}

type EventSubscriber<C> = Subscriber<dyn Fn(&mut C, &ShipEvent)>;
type StatSubscriber = Subscriber<dyn Fn(&mut i32)>;

/// Multicast notification per channel for one ship.
pub struct EventBus<C> {
    events: FxHashMap<EventKind, im::Vector<EventSubscriber<C>>>,
    stats: FxHashMap<Stat, im::Vector<StatSubscriber>>,
    next_id: u64,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self {
            events: FxHashMap::default(),
            stats: FxHashMap::default(),
            next_id: 0,
        }
    }
}

impl<C> std::fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let events: usize = self.events.values().map(im::Vector::len).sum();
        let stats: usize = self.stats.values().map(im::Vector::len).sum();
        f.debug_struct("EventBus")
            .field("event_subscribers", &events)
            .field("stat_hooks", &stats)
            .finish()
    }
}

impl<C> EventBus<C> {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, channel: Channel) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        SubscriptionHandle { id, channel }
    }

    /// Append a handler to `kind`'s subscriber list.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl Fn(&mut C, &ShipEvent) + 'static,
    ) -> SubscriptionHandle {
        self.push_event(kind, Rc::new(handler), false)
    }

    /// Append a handler that is retired the first time an emission reaches it.
    pub fn subscribe_once(
        &mut self,
        kind: EventKind,
        handler: impl Fn(&mut C, &ShipEvent) + 'static,
    ) -> SubscriptionHandle {
        self.push_event(kind, Rc::new(handler), true)
    }

    /// Append an already shared handler.
    pub fn subscribe_shared(&mut self, kind: EventKind, handler: Handler<C>) -> SubscriptionHandle {
        self.push_event(kind, handler, false)
    }

    fn push_event(&mut self, kind: EventKind, callback: Handler<C>, once: bool) -> SubscriptionHandle {
        let handle = self.alloc(Channel::Event(kind));
        self.events
            .entry(kind)
            .or_default()
            .push_back(Subscriber { handle, once, callback });
        debug!(%kind, id = handle.id.0, once, "subscribed");
        handle
    }

    /// Append an after-get hook for `stat`.
    pub fn subscribe_stat(&mut self, stat: Stat, hook: impl Fn(&mut i32) + 'static) -> SubscriptionHandle {
        self.subscribe_stat_shared(stat, Rc::new(hook))
    }

    /// Append an already shared after-get hook.
    pub fn subscribe_stat_shared(&mut self, stat: Stat, callback: StatHook) -> SubscriptionHandle {
        let handle = self.alloc(Channel::Stat(stat));
        self.stats
            .entry(stat)
            .or_default()
            .push_back(Subscriber { handle, once: false, callback });
        debug!(?stat, id = handle.id.0, "stat hook added");
        handle
    }

    /// Remove exactly the subscription behind `handle`.
    ///
    /// Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let removed = match handle.channel {
            Channel::Event(kind) => remove_from(&mut self.events, kind, handle),
            Channel::Stat(stat) => remove_from(&mut self.stats, stat, handle),
        };
        if removed {
            debug!(channel = ?handle.channel, id = handle.id.0, "unsubscribed");
        }
        removed
    }

    /// Is the subscription behind `handle` still live?
    #[must_use]
    pub fn is_subscribed(&self, handle: SubscriptionHandle) -> bool {
        match handle.channel {
            Channel::Event(kind) => self
                .events
                .get(&kind)
                .is_some_and(|list| list.iter().any(|s| s.handle == handle)),
            Channel::Stat(stat) => self
                .stats
                .get(&stat)
                .is_some_and(|list| list.iter().any(|s| s.handle == handle)),
        }
    }

    /// Number of live handlers for `kind`.
    #[must_use]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.events.get(&kind).map_or(0, im::Vector::len)
    }

    /// Number of live hooks for `stat`.
    #[must_use]
    pub fn stat_hook_count(&self, stat: Stat) -> usize {
        self.stats.get(&stat).map_or(0, im::Vector::len)
    }

    /// Take the snapshot an emission of `kind` will iterate.
    #[must_use]
    pub fn snapshot(&self, kind: EventKind) -> Emission<C> {
        Emission {
            kind,
            subscribers: self.events.get(&kind).cloned().unwrap_or_default(),
        }
    }

    /// Run `raw` through every hook on `stat`, in subscription order.
    #[must_use]
    pub fn apply_stat_hooks(&self, stat: Stat, raw: i32) -> i32 {
        let mut value = raw;
        if let Some(hooks) = self.stats.get(&stat) {
            for hook in hooks {
                (hook.callback)(&mut value);
            }
        }
        value
    }
}

fn remove_from<K, F>(
    map: &mut FxHashMap<K, im::Vector<Subscriber<F>>>,
    key: K,
    handle: SubscriptionHandle,
) -> bool
where
    K: std::hash::Hash + Eq,
    F: ?Sized,
{
    let Some(list) = map.get_mut(&key) else {
        return false;
    };
    let Some(pos) = list.iter().position(|s| s.handle == handle) else {
        return false;
    };
    list.remove(pos);
    if list.is_empty() {
        map.remove(&key);
    }
    true
}

/// A frozen subscriber list for one emission.
pub struct Emission<C> {
    kind: EventKind,
    subscribers: im::Vector<EventSubscriber<C>>,
}

impl<C> Emission<C> {
    /// The kind being emitted.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Number of handlers in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Is the snapshot empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Invoke every handler in the snapshot, in subscription order.
    ///
    /// One-shot handlers are only invoked if `retire` removes them from the
    /// live bus; a one-shot already retired by an overlapping emission is
    /// skipped. Returns the number of handlers invoked.
    pub fn dispatch(
        self,
        ctx: &mut C,
        event: &ShipEvent,
        mut retire: impl FnMut(&mut C, SubscriptionHandle) -> bool,
    ) -> usize {
        let mut invoked = 0;
        for subscriber in &self.subscribers {
            if subscriber.once && !retire(ctx, subscriber.handle) {
                continue;
            }
            (subscriber.callback)(ctx, event);
            invoked += 1;
        }
        invoked
    }
}
