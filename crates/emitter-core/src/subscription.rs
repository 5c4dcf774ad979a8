//! Unsubscribe handles returned by subscribe operations.

use std::any::Any;
use std::sync::{Arc, Weak};

use tracing::debug;

use crate::emitter::{Handler, Shared};

type WeakHandler = Weak<dyn Fn(Option<&dyn Any>) + Send + Sync + 'static>;

/// Handle for one listener registration.
///
/// Returned by [`Emitter::on`](crate::Emitter::on) and
/// [`Emitter::once`](crate::Emitter::once); lets the caller cancel that one
/// registration without keeping the handler reference around separately.
///
/// The handle holds only weak references: dropping it leaves the
/// registration in place, and it does not keep the registry or the listener
/// alive.
#[derive(Clone)]
pub struct Subscription {
    shared: Weak<Shared>,
    event: String,
    handler: WeakHandler,
}

impl Subscription {
    pub(crate) fn new(shared: Weak<Shared>, event: &str, handler: &Handler) -> Self {
        Self {
            shared,
            event: event.to_string(),
            handler: Arc::downgrade(handler),
        }
    }

    /// The event name this subscription is bound to.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Removes the registration this handle is bound to.
    ///
    /// Idempotent: returns `true` the first time the listener is actually
    /// removed and `false` on every later call, or if the listener was
    /// already removed through [`Emitter::off`](crate::Emitter::off) or
    /// [`Emitter::clear`](crate::Emitter::clear), or if the registry is
    /// gone.
    pub fn unsubscribe(&self) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            return false;
        };
        // The registry holds a strong reference while registered, so a
        // failed upgrade means the listener is already gone everywhere.
        let Some(handler) = self.handler.upgrade() else {
            return false;
        };
        let removed = shared.remove(&self.event, &handler);
        if removed {
            debug!(event = %self.event, "listener removed via subscription");
        }
        removed
    }

    /// Returns true if the registration is still present in the registry.
    pub fn is_active(&self) -> bool {
        let (Some(shared), Some(handler)) = (self.shared.upgrade(), self.handler.upgrade()) else {
            return false;
        };
        shared.contains(&self.event, &handler)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}
