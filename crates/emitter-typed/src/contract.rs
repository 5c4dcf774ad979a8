//! Trait-level event contracts and the typed registry view.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use emitter_core::{Emitter, Handler, Result, Subscription};

/// A named event and the payload shape its listeners receive.
///
/// One marker type per event name. Use `()` as the payload for events that
/// carry nothing.
pub trait Event: 'static {
    /// Registry key for this event.
    const NAME: &'static str;
    /// Payload delivered to listeners.
    type Payload: Any + Send + Sync;
}

/// Marker for a caller-declared event vocabulary.
///
/// A contract carries no data and no behavior; it exists only as a type
/// parameter for [`TypedEmitter`].
pub trait Contract: 'static {}

/// Membership of event `E` in a contract.
///
/// `TypedEmitter<C>` operations on `E` only compile where
/// `C: Declares<E>`, which is the entire narrowing mechanism: an
/// undeclared event name is a type error, not a runtime one.
pub trait Declares<E: Event>: Contract {}

/// Statically narrowed view over an untyped [`Emitter`].
///
/// The wrapper is zero-cost: it holds the same registry handle plus a
/// zero-sized contract tag, intercepts nothing, and adds no runtime
/// checking. Payloads fired through the untyped surface with a shape other
/// than the contract's are silently not delivered to typed listeners;
/// that is never an error.
///
/// Operations not narrowed by the contract ([`clear`](Self::clear),
/// [`event_count`](Self::event_count)) pass through unchanged.
///
/// ```compile_fail
/// use emitter_typed::{events, TypedEmitter};
///
/// events! {
///     pub contract Narrow {
///         Ping("ping") => u32,
///     }
/// }
///
/// events! {
///     pub contract Other {
///         Pong("pong") => u32,
///     }
/// }
///
/// let emitter = TypedEmitter::<Narrow>::new();
/// emitter.fire::<Pong>(&1); // Pong is not declared by Narrow
/// ```
pub struct TypedEmitter<C: Contract> {
    inner: Emitter,
    _contract: PhantomData<fn() -> C>,
}

impl<C: Contract> TypedEmitter<C> {
    /// Creates a fresh registry wrapped in this contract.
    pub fn new() -> Self {
        Self::from_untyped(Emitter::new())
    }

    /// Wraps an existing registry.
    ///
    /// The view and the registry are the same instance at runtime;
    /// listeners registered through either surface fire through both.
    pub fn from_untyped(inner: Emitter) -> Self {
        Self {
            inner,
            _contract: PhantomData,
        }
    }

    /// The underlying untyped registry.
    ///
    /// This is the escape hatch: everything the contract forbids is still
    /// expressible here, exactly as permissive as [`Emitter`] itself.
    pub fn as_untyped(&self) -> &Emitter {
        &self.inner
    }

    /// Unwraps back into the untyped registry handle.
    pub fn into_untyped(self) -> Emitter {
        self.inner
    }

    /// Registers a listener for a declared event.
    pub fn on<E, F>(&self, handler: F) -> Result<Subscription>
    where
        E: Event,
        C: Declares<E>,
        F: Fn(&E::Payload) + Send + Sync + 'static,
    {
        self.inner.on(E::NAME, adapt::<E, F>(handler))
    }

    /// Registers a one-shot listener for a declared event.
    pub fn once<E, F>(&self, handler: F) -> Result<Subscription>
    where
        E: Event,
        C: Declares<E>,
        F: Fn(&E::Payload) + Send + Sync + 'static,
    {
        self.inner.once(E::NAME, adapt::<E, F>(handler))
    }

    /// Removes a registration made through [`on`](Self::on) or
    /// [`once`](Self::once) for a declared event.
    ///
    /// Typed registrations are removed through their [`Subscription`]: the
    /// registry's entry is an adapter this crate created, so the
    /// subscription is the only stable identity the caller holds. Removal
    /// by raw handler reference stays on the untyped surface.
    pub fn off<E>(&self, sub: &Subscription) -> bool
    where
        E: Event,
        C: Declares<E>,
    {
        sub.unsubscribe()
    }

    /// Fires a declared event, delivering the payload to every listener.
    pub fn fire<E>(&self, payload: &E::Payload)
    where
        E: Event,
        C: Declares<E>,
    {
        self.inner.fire(E::NAME, Some(payload));
    }

    /// Empties the listener list for an event name. Pass-through.
    pub fn clear(&self, event: &str) {
        self.inner.clear(event);
    }

    /// Number of listeners currently registered for an event name.
    /// Pass-through.
    pub fn event_count(&self, event: &str) -> usize {
        self.inner.event_count(event)
    }
}

impl<C: Contract> Clone for TypedEmitter<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _contract: PhantomData,
        }
    }
}

impl<C: Contract> Default for TypedEmitter<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Bridges a typed listener onto the untyped registry surface.
///
/// The adapter downcasts the payload borrow back to the declared shape. A
/// payload of any other shape (reachable only through the untyped escape
/// hatch) is not delivered; no error is raised.
fn adapt<E, F>(handler: F) -> Handler
where
    E: Event,
    F: Fn(&E::Payload) + Send + Sync + 'static,
{
    Arc::new(move |payload: Option<&dyn Any>| {
        if let Some(payload) = payload.and_then(|p| p.downcast_ref::<E::Payload>()) {
            handler(payload);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, PartialEq)]
    struct PingPayload {
        n: u32,
    }

    struct Ping;
    impl Event for Ping {
        const NAME: &'static str = "ping";
        type Payload = PingPayload;
    }

    struct Tick;
    impl Event for Tick {
        const NAME: &'static str = "tick";
        type Payload = ();
    }

    struct AppEvents;
    impl Contract for AppEvents {}
    impl Declares<Ping> for AppEvents {}
    impl Declares<Tick> for AppEvents {}

    fn make_emitter() -> TypedEmitter<AppEvents> {
        TypedEmitter::new()
    }

    #[test]
    fn test_typed_delivery() {
        let emitter = make_emitter();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = Arc::clone(&seen);
        emitter
            .on::<Ping, _>(move |p| s.lock().unwrap().push(p.n))
            .unwrap();

        emitter.fire::<Ping>(&PingPayload { n: 1 });
        emitter.fire::<Ping>(&PingPayload { n: 2 });

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_unit_payload_event() {
        let emitter = make_emitter();
        let count = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&count);
        emitter
            .on::<Tick, _>(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        emitter.fire::<Tick>(&());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_typed_once() {
        let emitter = make_emitter();
        let count = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&count);
        emitter
            .once::<Ping, _>(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        emitter.fire::<Ping>(&PingPayload { n: 1 });
        emitter.fire::<Ping>(&PingPayload { n: 2 });

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(emitter.event_count("ping"), 0);
    }

    #[test]
    fn test_typed_off() {
        let emitter = make_emitter();
        let count = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&count);
        let sub = emitter
            .on::<Ping, _>(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        assert!(emitter.off::<Ping>(&sub));
        assert!(!emitter.off::<Ping>(&sub));

        emitter.fire::<Ping>(&PingPayload { n: 1 });
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_pass_through_clear_and_count() {
        let emitter = make_emitter();

        emitter.on::<Ping, _>(|_| {}).unwrap();
        emitter.on::<Ping, _>(|_| {}).unwrap();
        assert_eq!(emitter.event_count("ping"), 2);

        emitter.clear("ping");
        assert_eq!(emitter.event_count("ping"), 0);
    }

    #[test]
    fn test_same_registry_as_untyped_view() {
        let untyped = emitter_core::Emitter::new();
        let typed = TypedEmitter::<AppEvents>::from_untyped(untyped.clone());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        typed
            .on::<Ping, _>(move |p| s.lock().unwrap().push(p.n))
            .unwrap();

        // Fired through the untyped handle, observed by the typed listener.
        untyped.fire("ping", Some(&PingPayload { n: 7 }));
        assert_eq!(*seen.lock().unwrap(), vec![7]);
        assert_eq!(untyped.event_count("ping"), 1);
    }

    #[test]
    fn test_mismatched_payload_through_escape_hatch() {
        let emitter = make_emitter();
        let count = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&count);
        emitter
            .on::<Ping, _>(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        // Wrong shape and missing payload: silently not delivered to the
        // typed listener, never an error.
        emitter.as_untyped().fire("ping", Some(&"not a ping"));
        emitter.as_untyped().fire("ping", None);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        emitter.as_untyped().fire("ping", Some(&PingPayload { n: 1 }));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cloned_view_shares_registry() {
        let emitter = make_emitter();
        let twin = emitter.clone();
        let count = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&count);
        emitter
            .on::<Tick, _>(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        twin.fire::<Tick>(&());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
