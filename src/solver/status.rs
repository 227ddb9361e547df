//! Status reporting and cooperative cancellation
//!
//! Strategies publish short progress strings while they search. Listeners are
//! plain callbacks invoked on the publishing thread; a channel adapter is
//! provided for consumers that want to drain messages elsewhere.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Listener = Arc<dyn Fn(&str) + Send + Sync>;

/// Handle returned by [`StatusFeed::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

/// Fan-out of status messages to any number of listeners
///
/// Cloning a feed yields another handle to the same listener list.
#[derive(Clone, Default)]
pub struct StatusFeed {
    listeners: Arc<Mutex<Listeners>>,
}

impl StatusFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a callback for every future message
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let mut listeners = self.lock();
        let id = SubscriptionId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry, _)| *entry != id);
        listeners.entries.len() != before
    }

    /// Subscribe a channel; messages are sent without blocking the publisher
    #[must_use]
    pub fn channel(&self) -> (SubscriptionId, Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        let id = self.subscribe(move |message| {
            // A dropped receiver just means nobody is listening any more
            let _ = tx
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .send(message.to_string());
        });
        (id, rx)
    }

    /// Deliver a message to every listener
    pub fn publish(&self, message: &str) {
        // Snapshot so listeners may subscribe or unsubscribe from a callback
        let listeners: Vec<Listener> = self
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(message);
        }
    }

    /// Number of registered listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock().entries.len()
    }
}

/// Shared cancellation flag
///
/// Raised from any thread; searches poll it and return their best result so
/// far. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal(Arc<AtomicBool>);

impl AbortSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    #[inline]
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
