//! Synchronous publish/subscribe bus.
//!
//! Handlers run inside the caller's `emit`, in subscription order. The
//! handler list is snapshotted before delivery and no lock is held while a
//! handler runs, so handlers may emit again (nested dispatch) or drop their
//! own subscription.
//!
//! Nesting depth is counted per thread, so concurrent emits from unrelated
//! threads do not add up toward the limit.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};

use parking_lot::{Mutex, RwLock};

use super::SearchEvent;
use crate::error::CoordinationError;

/// Nested dispatch depth allowed before an emit is refused.
pub const DEFAULT_MAX_DISPATCH_DEPTH: usize = 32;

/// A signal handler. Errors abort the dispatch and reach the emitter.
pub type Handler = Arc<dyn Fn(&SearchEvent) -> Result<(), CoordinationError> + Send + Sync>;

/// Cloneable handle to a shared bus.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

struct BusInner {
    handlers: RwLock<Vec<(u64, Handler)>>,
    next_id: AtomicU64,
    depths: Mutex<HashMap<ThreadId, usize>>,
    max_depth: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DISPATCH_DEPTH)
    }

    /// Create a bus that refuses dispatches nested deeper than `max_depth`.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            inner: Arc::new(BusInner {
                handlers: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(0),
                depths: Mutex::new(HashMap::new()),
                max_depth,
            }),
        }
    }

    /// Register a handler. It stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&SearchEvent) -> Result<(), CoordinationError> + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let handler: Handler = Arc::new(handler);
        self.inner.handlers.write().push((id, handler));
        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every current subscriber.
    ///
    /// Stops at the first handler error and returns it.
    pub fn emit(&self, event: &SearchEvent) -> Result<(), CoordinationError> {
        let thread = thread::current().id();
        let depth = {
            let mut depths = self.inner.depths.lock();
            let depth = depths.entry(thread).or_insert(0);
            *depth += 1;
            *depth
        };
        let _depth_guard = scopeguard::guard((), |_| {
            let mut depths = self.inner.depths.lock();
            if let Some(depth) = depths.get_mut(&thread) {
                *depth -= 1;
                if *depth == 0 {
                    depths.remove(&thread);
                }
            }
        });

        if depth > self.inner.max_depth {
            tracing::error!(
                event = %event,
                max_depth = self.inner.max_depth,
                "Refusing nested dispatch"
            );
            return Err(CoordinationError::DispatchDepthExceeded {
                event: event.to_string(),
                depth: self.inner.max_depth,
            });
        }

        let handlers: Vec<Handler> = self
            .inner
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        tracing::trace!(
            event = %event,
            subscribers = handlers.len(),
            depth,
            "Dispatching signal"
        );

        for handler in handlers {
            handler(event)?;
        }
        Ok(())
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.handlers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a handler registered on its bus. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes its handler"]
pub struct Subscription {
    id: u64,
    bus: Weak<BusInner>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.handlers.write().retain(|(id, _)| *id != self.id);
        }
    }
}
