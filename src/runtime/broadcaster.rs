//! Current locale and change notification.

use std::fmt;
use std::sync::atomic::{
    AtomicU64,
    Ordering,
};
use std::sync::{
    Arc,
    Mutex,
    PoisonError,
    Weak,
};

use arc_swap::ArcSwap;

use crate::locale::LocaleId;

type Callback = Arc<dyn Fn(&LocaleId) + Send + Sync>;

/// Holds the active locale and notifies subscribers when it changes.
///
/// Reads of the current locale are wait-free and never observe a partially
/// written value. Every [`set_locale`](Self::set_locale) bumps a version
/// counter, so readers can detect a change without subscribing.
pub struct LocaleBroadcaster {
    current: ArcSwap<LocaleId>,
    version: AtomicU64,
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(u64, Callback)>>,
}

impl LocaleBroadcaster {
    #[must_use]
    pub fn new(initial: LocaleId) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
            version: AtomicU64::new(0),
            next_id: AtomicU64::new(0),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn current(&self) -> Arc<LocaleId> {
        self.current.load_full()
    }

    /// Incremented on every locale switch.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Publishes `locale`, then calls every current subscriber before returning.
    ///
    /// Callbacks run outside the subscriber lock and may subscribe or
    /// unsubscribe themselves. Their order is unspecified.
    pub fn set_locale(&self, locale: LocaleId) {
        let locale = Arc::new(locale);
        self.current.store(Arc::clone(&locale));
        self.version.fetch_add(1, Ordering::SeqCst);

        let callbacks: Vec<Callback> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        tracing::debug!(locale = %locale, subscribers = callbacks.len(), "Locale changed");
        for callback in callbacks {
            callback(&locale);
        }
    }

    /// Registers `callback` until the returned [`Subscription`] is dropped.
    pub fn subscribe(
        self: &Arc<Self>,
        callback: impl Fn(&LocaleId) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        Subscription { id, broadcaster: Arc::downgrade(self) }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn unsubscribe(&self, id: u64) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(subscriber, _)| *subscriber != id);
    }
}

impl fmt::Debug for LocaleBroadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleBroadcaster")
            .field("current", &self.current.load_full())
            .field("version", &self.version())
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

/// Keeps a callback registered with a [`LocaleBroadcaster`]. Dropping it unsubscribes.
#[derive(Debug)]
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    broadcaster: Weak<LocaleBroadcaster>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(broadcaster) = self.broadcaster.upgrade() {
            broadcaster.unsubscribe(self.id);
        }
    }
}
