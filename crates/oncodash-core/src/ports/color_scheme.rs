//! Host color-scheme signal port.
//!
//! The operating environment reports its light/dark preference
//! asynchronously. Consumers subscribe once and hold the returned
//! [`Subscription`]; dropping or detaching it removes the listener.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::domain::SystemColorSignal;

/// Callback invoked with each new color-scheme signal.
///
/// Must not block; it may be called from a background task.
pub type SignalCallback = Arc<dyn Fn(SystemColorSignal) + Send + Sync>;

/// Detach handle for a color-scheme subscription.
///
/// The detach action runs exactly once: on [`Subscription::detach`] or on drop,
/// whichever happens first.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wrap a detach action.
    pub fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// A subscription with nothing to tear down.
    pub fn noop() -> Self {
        Self { detach: None }
    }

    /// Tear down the subscription now.
    pub fn detach(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_detach();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

/// Source of the host's live color-scheme preference.
pub trait ColorSchemeSource: Send + Sync {
    /// The signal as of now.
    fn current(&self) -> SystemColorSignal;

    /// Register `callback` for future changes.
    fn subscribe(&self, callback: SignalCallback) -> Subscription;
}

/// A color-scheme source driven by hand.
///
/// Used by tests, and by the CLI when OS detection is disabled.
#[derive(Clone)]
pub struct ManualColorScheme {
    inner: Arc<ManualInner>,
}

struct ManualInner {
    signal: Mutex<SystemColorSignal>,
    listeners: Mutex<Vec<(u64, SignalCallback)>>,
    next_id: AtomicU64,
}

impl ManualColorScheme {
    pub fn new(initial: SystemColorSignal) -> Self {
        Self {
            inner: Arc::new(ManualInner {
                signal: Mutex::new(initial),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Change the signal, notifying listeners only if it differs.
    pub fn set(&self, signal: SystemColorSignal) {
        let changed = {
            let mut current = self.inner.signal.lock().unwrap_or_else(PoisonError::into_inner);
            let changed = *current != signal;
            *current = signal;
            changed
        };
        if changed {
            self.deliver(signal);
        }
    }

    /// Deliver `signal` to every listener unconditionally, as a host that
    /// re-sends duplicate notifications would.
    pub fn emit(&self, signal: SystemColorSignal) {
        *self.inner.signal.lock().unwrap_or_else(PoisonError::into_inner) = signal;
        self.deliver(signal);
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn deliver(&self, signal: SystemColorSignal) {
        // Snapshot so callbacks can subscribe or detach without deadlocking.
        let callbacks: Vec<SignalCallback> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(signal);
        }
    }
}

impl Default for ManualColorScheme {
    fn default() -> Self {
        Self::new(SystemColorSignal::default())
    }
}

impl ColorSchemeSource for ManualColorScheme {
    fn current(&self) -> SystemColorSignal {
        *self.inner.signal.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn subscribe(&self, callback: SignalCallback) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, callback));

        let weak: Weak<ManualInner> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .listeners
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }
}
