//! The untyped, name-keyed event registry.

use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

use tracing::{debug, trace};

use crate::error::{EmitterError, Result};
use crate::subscription::Subscription;

/// A listener callback taking zero or one payload argument.
///
/// Listener identity is the `Arc` allocation: cloning the `Arc` preserves
/// identity, while wrapping the same closure in a fresh `Arc` produces a
/// distinct listener. The registry compares handlers by identity, never by
/// the closure they contain.
pub type Handler = Arc<dyn Fn(Option<&dyn Any>) + Send + Sync + 'static>;

/// Returns true if both handles address the same listener allocation.
pub(crate) fn same_handler(a: &Handler, b: &Handler) -> bool {
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}

/// Shared registry state addressed by every [`Emitter`] clone and every
/// outstanding [`Subscription`].
pub(crate) struct Shared {
    /// Listener lists by event name, in insertion order.
    ///
    /// An entry exists once a listener has been added for that name;
    /// clearing empties the list but keeps the entry.
    events: RwLock<HashMap<String, Vec<Handler>>>,
}

impl Shared {
    /// Removes one listener registration by identity.
    ///
    /// Returns `false` for an unknown event name or a non-member handler;
    /// both are normal outcomes.
    pub(crate) fn remove(&self, event: &str, handler: &Handler) -> bool {
        let Ok(mut events) = self.events.write() else {
            return false;
        };
        let Some(listeners) = events.get_mut(event) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|h| !same_handler(h, handler));
        before != listeners.len()
    }

    /// Returns true if the handler is currently registered for the event.
    pub(crate) fn contains(&self, event: &str, handler: &Handler) -> bool {
        self.events
            .read()
            .map(|events| {
                events
                    .get(event)
                    .is_some_and(|listeners| listeners.iter().any(|h| same_handler(h, handler)))
            })
            .unwrap_or(false)
    }
}

/// The untyped, name-keyed event registry.
///
/// Listeners are registered under string event names and invoked
/// synchronously, in insertion order, when that name fires. The emitter is a
/// cheap handle: clones address the same registry, so any part of the
/// program holding a clone can fire events that listeners registered through
/// another clone will observe.
///
/// # Dispatch guarantees
///
/// `fire` iterates a point-in-time snapshot of the listener list and
/// re-checks membership before each call. A listener removed before its turn
/// is skipped; a listener added during dispatch is not visited in that same
/// `fire` call. Listener panics are not caught: they propagate to `fire`'s
/// caller and remaining listeners in that dispatch are not invoked.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use emitter_core::{Emitter, Handler};
///
/// let emitter = Emitter::new();
///
/// let handler: Handler = Arc::new(|payload| {
///     if let Some(n) = payload.and_then(|p| p.downcast_ref::<u32>()) {
///         println!("ping {n}");
///     }
/// });
///
/// let sub = emitter.on("ping", Arc::clone(&handler)).unwrap();
/// emitter.fire("ping", Some(&1_u32));
///
/// sub.unsubscribe();
/// emitter.fire("ping", Some(&2_u32)); // no listener left
/// ```
#[derive(Clone)]
pub struct Emitter {
    shared: Arc<Shared>,
}

impl Emitter {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                events: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Registers a listener for an event name.
    ///
    /// Registering the same handler (same `Arc` allocation) twice for one
    /// name is a no-op on the second call: the listener is invoked once per
    /// `fire`, and both returned subscriptions remove the same registration.
    ///
    /// Returns an unsubscribe handle bound to this one registration.
    pub fn on(&self, event: &str, handler: Handler) -> Result<Subscription> {
        {
            let mut events = self
                .shared
                .events
                .write()
                .map_err(|e| EmitterError::LockPoisoned(e.to_string()))?;

            let listeners = events.entry(event.to_string()).or_default();
            if !listeners.iter().any(|h| same_handler(h, &handler)) {
                listeners.push(Arc::clone(&handler));
                debug!(event, listeners = listeners.len(), "listener registered");
            }
        }

        Ok(Subscription::new(
            Arc::downgrade(&self.shared),
            event,
            &handler,
        ))
    }

    /// Registers a listener that is invoked at most once.
    ///
    /// The registry stores a wrapper that removes its own registration
    /// *before* delegating to `handler`, so a handler that re-fires the same
    /// event from inside its own invocation does not re-trigger itself.
    ///
    /// The returned handle removes the wrapper; invoked before the event
    /// fires, it prevents any invocation.
    pub fn once(&self, event: &str, handler: Handler) -> Result<Subscription> {
        // The wrapper needs its own subscription to remove itself, but the
        // subscription only exists after registration; the slot closes the
        // loop without a strong reference cycle.
        let slot: Arc<OnceLock<Subscription>> = Arc::new(OnceLock::new());

        let wrapper: Handler = {
            let slot = Arc::clone(&slot);
            let fired = AtomicBool::new(false);
            Arc::new(move |payload: Option<&dyn Any>| {
                if fired.swap(true, Ordering::SeqCst) {
                    return;
                }
                if let Some(sub) = slot.get() {
                    sub.unsubscribe();
                }
                handler(payload);
            })
        };

        let sub = self.on(event, wrapper)?;
        let _ = slot.set(sub.clone());
        Ok(sub)
    }

    /// Removes a listener registration by identity.
    ///
    /// Returns `false` if no listener list exists for the event or the
    /// handler was not a member. Removing an absent listener is a normal,
    /// expected outcome, not an error.
    pub fn off(&self, event: &str, handler: &Handler) -> bool {
        let removed = self.shared.remove(event, handler);
        if removed {
            debug!(event, "listener removed");
        }
        removed
    }

    /// Empties the listener list for an event name.
    ///
    /// Silent no-op for an unknown name. Does not prevent future `on` calls
    /// for the same name.
    pub fn clear(&self, event: &str) {
        if let Ok(mut events) = self.shared.events.write() {
            if let Some(listeners) = events.get_mut(event) {
                listeners.clear();
                debug!(event, "listeners cleared");
            }
        }
    }

    /// Invokes every listener currently registered for an event name,
    /// synchronously and in insertion order, each with the same payload
    /// borrow.
    ///
    /// Firing a name with no listeners is a silent no-op. No lock is held
    /// while listeners run, so listeners may freely call `on`, `off`,
    /// `clear`, or `fire` on the same registry; see the type-level docs for
    /// the mid-dispatch guarantees.
    pub fn fire(&self, event: &str, payload: Option<&dyn Any>) {
        let snapshot: Vec<Handler> = {
            let Ok(events) = self.shared.events.read() else {
                return;
            };
            match events.get(event) {
                Some(listeners) if !listeners.is_empty() => listeners.clone(),
                _ => return,
            }
        };

        trace!(event, listeners = snapshot.len(), "dispatching");

        for handler in &snapshot {
            // Skip listeners removed since the snapshot was taken.
            if !self.shared.contains(event, handler) {
                continue;
            }
            handler(payload);
        }
    }

    /// Returns the number of listeners currently registered for an event
    /// name; `0` for a never-used or cleared name.
    pub fn event_count(&self, event: &str) -> usize {
        self.shared
            .events
            .read()
            .map(|events| events.get(event).map(Vec::len).unwrap_or(0))
            .unwrap_or(0)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
