//! OS light/dark signal via `dark-light`.
//!
//! `dark_light::detect` is a blocking, one-shot query, so live changes are
//! followed by a tokio task sampling it on the blocking pool, and one-off
//! reads from a multi-threaded runtime hand the worker's queue to another
//! thread while they run.

use std::sync::Arc;
use std::time::Duration;

use dark_light::Mode;
use oncodash_core::{ColorSchemeSource, SignalCallback, Subscription, SystemColorSignal};
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::error::CliError;

type Detector = Arc<dyn Fn() -> SystemColorSignal + Send + Sync>;

fn detect_os_signal() -> SystemColorSignal {
    match dark_light::detect() {
        Mode::Dark => SystemColorSignal::Dark,
        Mode::Light => SystemColorSignal::Light,
    }
}

/// Polls the OS color scheme at a fixed interval.
///
/// Each subscription owns one polling task; detaching or dropping the
/// [`Subscription`] aborts it.
pub struct DarkLightColorScheme {
    interval: Duration,
    detector: Detector,
    runtime: Handle,
}

impl DarkLightColorScheme {
    /// Must be called from within a tokio runtime.
    pub fn new(interval: Duration) -> Result<Self, CliError> {
        Self::with_detector(interval, Arc::new(detect_os_signal))
    }

    /// Use a custom detector instead of querying the OS.
    pub fn with_detector(interval: Duration, detector: Detector) -> Result<Self, CliError> {
        let runtime = Handle::try_current().map_err(|e| CliError::Config(e.to_string()))?;
        Ok(Self {
            interval,
            detector,
            runtime,
        })
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl std::fmt::Debug for DarkLightColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DarkLightColorScheme")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl ColorSchemeSource for DarkLightColorScheme {
    /// Query the detector now.
    ///
    /// On a multi-threaded runtime worker this runs under
    /// [`tokio::task::block_in_place`], so other tasks keep running. A
    /// current-thread runtime is blocked for the duration of the query.
    fn current(&self) -> SystemColorSignal {
        let on_worker = Handle::try_current()
            .is_ok_and(|handle| handle.runtime_flavor() == RuntimeFlavor::MultiThread);
        if on_worker {
            tokio::task::block_in_place(|| (self.detector)())
        } else {
            (self.detector)()
        }
    }

    fn subscribe(&self, callback: SignalCallback) -> Subscription {
        let detector = Arc::clone(&self.detector);
        let interval = self.interval;

        let task = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut last: Option<SystemColorSignal> = None;

            loop {
                ticker.tick().await;
                let detect = Arc::clone(&detector);
                let signal = match tokio::task::spawn_blocking(move || detect()).await {
                    Ok(signal) => signal,
                    Err(e) => {
                        warn!(error = %e, "Color scheme detection failed");
                        continue;
                    }
                };

                // The first sample is always delivered; receivers ignore repeats.
                if last != Some(signal) {
                    debug!(?signal, "OS color scheme sampled");
                    last = Some(signal);
                    callback(signal);
                }
            }
        });

        Subscription::new(move || task.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn switchable() -> (Detector, Arc<AtomicBool>) {
        let dark = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&dark);
        let detector: Detector = Arc::new(move || {
            if flag.load(Ordering::SeqCst) {
                SystemColorSignal::Dark
            } else {
                SystemColorSignal::Light
            }
        });
        (detector, dark)
    }

    fn recorder() -> (SignalCallback, Arc<Mutex<Vec<SystemColorSignal>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: SignalCallback = Arc::new(move |signal| sink.lock().unwrap().push(signal));
        (callback, seen)
    }

    #[test]
    fn test_requires_runtime() {
        let (detector, _) = switchable();
        assert!(DarkLightColorScheme::with_detector(Duration::from_millis(10), detector).is_err());
    }

    #[tokio::test]
    async fn test_current_uses_detector() {
        let (detector, dark) = switchable();
        let source = DarkLightColorScheme::with_detector(Duration::from_millis(10), detector).unwrap();
        assert_eq!(source.current(), SystemColorSignal::Light);
        dark.store(true, Ordering::SeqCst);
        assert_eq!(source.current(), SystemColorSignal::Dark);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_current_lets_other_tasks_run() {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let rx = Mutex::new(rx);
        // Reports Dark only if another task on the same worker ran meanwhile.
        let detector: Detector = Arc::new(move || {
            match rx.lock().unwrap().recv_timeout(Duration::from_secs(5)) {
                Ok(()) => SystemColorSignal::Dark,
                Err(_) => SystemColorSignal::Light,
            }
        });
        let source = DarkLightColorScheme::with_detector(Duration::from_secs(1), detector).unwrap();

        let signal = tokio::spawn(async move {
            let _sender = tokio::spawn(async move {
                let _ = tx.send(());
            });
            source.current()
        })
        .await
        .unwrap();
        assert_eq!(signal, SystemColorSignal::Dark);
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_only_on_change() {
        let (detector, dark) = switchable();
        let source = DarkLightColorScheme::with_detector(Duration::from_millis(10), detector).unwrap();
        let (callback, seen) = recorder();
        let _subscription = source.subscribe(callback);

        tokio::time::sleep(Duration::from_millis(35)).await;
        assert_eq!(*seen.lock().unwrap(), vec![SystemColorSignal::Light]);

        dark.store(true, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(
            *seen.lock().unwrap(),
            vec![SystemColorSignal::Light, SystemColorSignal::Dark]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_detach_stops_polling() {
        let (detector, dark) = switchable();
        let source = DarkLightColorScheme::with_detector(Duration::from_millis(10), detector).unwrap();
        let (callback, seen) = recorder();
        let subscription = source.subscribe(callback);

        tokio::time::sleep(Duration::from_millis(25)).await;
        subscription.detach();
        let before = seen.lock().unwrap().len();
        assert_eq!(before, 1);

        dark.store(true, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(seen.lock().unwrap().len(), before);
    }
}
