//! Theme resolution: user preference vs. persisted preference vs. OS signal.
//!
//! [`ThemeResolver`] is the single writer of the theme state. It reads the
//! persisted preference once at load, follows the host color scheme through
//! a detachable subscription, and pushes every recomputed [`ResolvedTheme`]
//! to its registered observers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::domain::{ResolvedTheme, SystemColorSignal, ThemePreference};
use crate::ports::{ColorSchemeSource, PreferenceStore, SignalCallback, Subscription, ThemeObserver};

/// Persistence slot holding the theme preference.
pub const THEME_PREFERENCE_KEY: &str = "theme-preference";

/// Handle returned by [`ThemeResolver::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Debug, Clone, Copy)]
struct ThemeState {
    preference: ThemePreference,
    signal: SystemColorSignal,
}

impl ThemeState {
    const fn resolved(self) -> ResolvedTheme {
        ResolvedTheme::resolve(self.preference, self.signal)
    }
}

/// Owns the theme preference and derives the rendered theme.
pub struct ThemeResolver {
    store: Arc<dyn PreferenceStore>,
    state: Mutex<ThemeState>,
    observers: Mutex<Vec<(ObserverId, Arc<dyn ThemeObserver>)>>,
    next_observer: AtomicU64,
    // Serializes recompute+notify so observers see changes in order.
    notify_lock: Mutex<()>,
    subscription: Mutex<Option<Subscription>>,
}

impl ThemeResolver {
    /// Create a resolver, reading the persisted preference from `store`.
    ///
    /// Absent, unrecognized or unreadable values fall back to
    /// [`ThemePreference::System`]. Until a color-scheme source is attached
    /// the system signal is assumed to be light.
    pub fn load(store: Arc<dyn PreferenceStore>) -> Self {
        let preference = read_preference(store.as_ref());
        debug!(%preference, "Loaded theme preference");

        Self {
            store,
            state: Mutex::new(ThemeState {
                preference,
                signal: SystemColorSignal::default(),
            }),
            observers: Mutex::new(Vec::new()),
            next_observer: AtomicU64::new(0),
            notify_lock: Mutex::new(()),
            subscription: Mutex::new(None),
        }
    }

    /// The current user preference.
    pub fn preference(&self) -> ThemePreference {
        self.state().preference
    }

    /// The latest known host signal.
    pub fn system_signal(&self) -> SystemColorSignal {
        self.state().signal
    }

    /// The theme that should be rendered right now.
    pub fn resolved(&self) -> ResolvedTheme {
        self.state().resolved()
    }

    /// Store a new preference, persist it and notify observers.
    ///
    /// Persistence failures are logged; the in-memory preference still
    /// changes so the UI stays responsive.
    pub fn set_preference(&self, preference: ThemePreference) -> ResolvedTheme {
        let _ordered = lock(&self.notify_lock);
        let resolved = {
            let mut state = lock(&self.state);
            state.preference = preference;
            state.resolved()
        };

        if let Err(e) = self.store.set(THEME_PREFERENCE_KEY, preference.as_str()) {
            warn!(error = %e, %preference, "Failed to persist theme preference");
        }

        debug!(%preference, %resolved, "Theme preference changed");
        self.notify(resolved);
        resolved
    }

    /// UI-boundary setter taking the raw menu value.
    ///
    /// Returns `false` (and changes nothing) for an unrecognized value.
    pub fn set_preference_str(&self, raw: &str) -> bool {
        match ThemePreference::parse(raw) {
            Some(preference) => {
                self.set_preference(preference);
                true
            }
            None => {
                debug!(value = raw, "Ignoring unrecognized theme preference");
                false
            }
        }
    }

    /// Apply a host color-scheme signal.
    ///
    /// Re-delivering the current value is a no-op. Observers hear about a
    /// change only while the preference is [`ThemePreference::System`].
    pub fn handle_system_signal(&self, signal: SystemColorSignal) {
        let _ordered = lock(&self.notify_lock);
        let resolved = {
            let mut state = lock(&self.state);
            if state.signal == signal {
                return;
            }
            state.signal = signal;
            (state.preference == ThemePreference::System).then(|| state.resolved())
        };

        if let Some(resolved) = resolved {
            debug!(?signal, %resolved, "System color scheme changed");
            self.notify(resolved);
        }
    }

    /// Register an observer of resolved-theme changes.
    pub fn subscribe(&self, observer: Arc<dyn ThemeObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer.fetch_add(1, Ordering::Relaxed));
        lock(&self.observers).push((id, observer));
        id
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = lock(&self.observers);
        let before = observers.len();
        observers.retain(|(observer_id, _)| *observer_id != id);
        observers.len() != before
    }

    /// Follow `source` for live color-scheme changes.
    ///
    /// Subscribes before sampling the current signal so no change can slip
    /// between the two. Attaching again replaces the previous subscription.
    pub fn attach(self: &Arc<Self>, source: &dyn ColorSchemeSource) {
        let weak = Arc::downgrade(self);
        let callback: SignalCallback = Arc::new(move |signal| {
            if let Some(resolver) = weak.upgrade() {
                resolver.handle_system_signal(signal);
            }
        });

        let subscription = source.subscribe(callback);
        self.handle_system_signal(source.current());

        let previous = lock(&self.subscription).replace(subscription);
        drop(previous);
    }

    /// Tear down the color-scheme subscription, if any.
    pub fn detach(&self) {
        let subscription = lock(&self.subscription).take();
        if let Some(subscription) = subscription {
            subscription.detach();
            debug!("Detached from system color scheme");
        }
    }

    /// Whether a color-scheme subscription is active.
    pub fn is_attached(&self) -> bool {
        lock(&self.subscription).is_some()
    }

    fn state(&self) -> ThemeState {
        *lock(&self.state)
    }

    fn notify(&self, resolved: ResolvedTheme) {
        let observers: Vec<Arc<dyn ThemeObserver>> = lock(&self.observers)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer.on_theme_resolved(resolved);
        }
    }
}

impl std::fmt::Debug for ThemeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("ThemeResolver")
            .field("preference", &state.preference)
            .field("signal", &state.signal)
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}

fn read_preference(store: &dyn PreferenceStore) -> ThemePreference {
    match store.get(THEME_PREFERENCE_KEY) {
        Ok(Some(raw)) => ThemePreference::parse(&raw).unwrap_or_else(|| {
            warn!(value = %raw, "Unrecognized stored theme preference, using system");
            ThemePreference::System
        }),
        Ok(None) => ThemePreference::System,
        Err(e) => {
            warn!(error = %e, "Failed to read theme preference, using system");
            ThemePreference::System
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
