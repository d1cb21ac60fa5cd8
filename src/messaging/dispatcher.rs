use super::QuizEvent;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Weak};

type Callback = Arc<dyn Fn(&Value) + Send + Sync + 'static>;

/// A subscriber callback with a stable identity.
///
/// Two `Listener`s are the same subscriber when one is a clone of the other.
/// Registering the same listener twice for one event has no extra effect.
#[derive(Clone)]
pub struct Listener {
    callback: Callback,
}

impl Listener {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    fn id(&self) -> ListenerId {
        ListenerId(Arc::as_ptr(&self.callback).cast::<()>() as usize)
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Listener").field(&self.id().0).finish()
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Listener {}

/// Address of the shared callback; unique while the listener is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ListenerId(usize);

/// One (event, listener) pair. `seq` is never reused, so a stale handle
/// cannot match a later registration that happens to reuse the address.
struct Registration {
    seq: u64,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_seq: u64,
    events: HashMap<String, HashMap<ListenerId, Registration>>,
}

impl Registry {
    fn listeners(&self, event: &str) -> Option<&HashMap<ListenerId, Registration>> {
        self.events.get(event)
    }

    fn remove(&mut self, event: &str, id: ListenerId, seq: Option<u64>) {
        let Some(registrations) = self.events.get_mut(event) else {
            return;
        };
        let matches = registrations
            .get(&id)
            .is_some_and(|registration| seq.is_none_or(|seq| registration.seq == seq));
        if matches {
            registrations.remove(&id);
        }
        if registrations.is_empty() {
            self.events.remove(event);
        }
    }
}

/// Subscriber registry keyed by event name, plus the `*` wildcard.
///
/// Delivery order among listeners of the same event is unspecified. The
/// registry is independent of connection state; listeners may be added or
/// removed at any time, including from inside a listener.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    registry: Arc<Mutex<Registry>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for `event` and returns a handle that removes
    /// exactly this registration.
    pub fn subscribe(&self, event: impl Into<QuizEvent>, listener: Listener) -> Subscription {
        let event = event.into().as_str().to_string();
        let id = listener.id();

        let seq = {
            let mut registry = self.registry.lock();
            let next_seq = registry.next_seq;
            let registration = registry
                .events
                .entry(event.clone())
                .or_default()
                .entry(id)
                .or_insert(Registration {
                    seq: next_seq,
                    listener,
                });
            let seq = registration.seq;
            if seq == next_seq {
                registry.next_seq += 1;
            }
            seq
        };

        tracing::debug!("Subscribed listener to '{}'", event);

        Subscription {
            event,
            id,
            seq,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Removes one listener, or every listener for `event` when `listener` is `None`.
    /// Removing something that is not registered is a no-op.
    pub fn unsubscribe(&self, event: impl Into<QuizEvent>, listener: Option<&Listener>) {
        let event = event.into();
        let mut registry = self.registry.lock();
        match listener {
            Some(listener) => registry.remove(event.as_str(), listener.id(), None),
            None => {
                registry.events.remove(event.as_str());
            }
        }
    }

    /// Number of listeners currently registered for `event`
    pub fn listener_count(&self, event: impl Into<QuizEvent>) -> usize {
        let event = event.into();
        self.registry
            .lock()
            .listeners(event.as_str())
            .map_or(0, HashMap::len)
    }

    /// Delivers `data` to the listeners of `event` and `{event, data}` to the
    /// wildcard listeners. Returns the number of listeners that completed
    /// without panicking.
    ///
    /// An inbound event literally named `*` only reaches the wildcard
    /// listeners, in the wrapped form.
    pub fn dispatch(&self, event: &str, data: &Value) -> usize {
        let mut delivered = 0;
        if event != QuizEvent::Wildcard.as_str() {
            delivered += self.deliver_all(event, data);
        }

        if self.listener_count(QuizEvent::Wildcard) > 0 {
            let wrapped = serde_json::json!({ "event": event, "data": data });
            delivered += self.deliver_all(QuizEvent::Wildcard.as_str(), &wrapped);
        }

        delivered
    }

    fn deliver_all(&self, key: &str, payload: &Value) -> usize {
        let snapshot: Vec<Listener> = {
            let registry = self.registry.lock();
            match registry.listeners(key) {
                Some(registrations) => registrations
                    .values()
                    .map(|registration| registration.listener.clone())
                    .collect(),
                None => return 0,
            }
        }; // Lock released here so listeners can (un)subscribe

        let mut delivered = 0;
        for listener in snapshot {
            // Skip listeners removed by an earlier listener in this dispatch
            if !self.is_registered(key, listener.id()) {
                continue;
            }

            match catch_unwind(AssertUnwindSafe(|| (listener.callback)(payload))) {
                Ok(()) => delivered += 1,
                Err(_) => tracing::error!("Listener for '{}' panicked; continuing dispatch", key),
            }
        }
        delivered
    }

    fn is_registered(&self, key: &str, id: ListenerId) -> bool {
        self.registry
            .lock()
            .listeners(key)
            .is_some_and(|registrations| registrations.contains_key(&id))
    }
}

/// Handle returned by [`EventDispatcher::subscribe`].
///
/// Dropping the handle keeps the registration alive; call
/// [`unsubscribe`](Self::unsubscribe) to remove it. Calling it again is a no-op.
#[derive(Debug, Clone)]
pub struct Subscription {
    event: String,
    id: ListenerId,
    seq: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().remove(&self.event, self.id, Some(self.seq));
        }
    }
}
