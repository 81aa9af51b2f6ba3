//! Delayed loading indicator
//!
//! The flag only turns on once an operation has been running for longer than
//! the configured delay, so fast requests never flash a spinner. Timers run on
//! the Tokio runtime; `start` must be called from inside one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

#[derive(Default)]
struct Timer {
    // Bumped on every start/stop; a timer only fires if its generation is current.
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl Timer {
    fn disarm(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

pub struct LoadingIndicator {
    delay: Duration,
    flag: Arc<watch::Sender<bool>>,
    timer: Arc<Mutex<Timer>>,
}

fn lock(timer: &Mutex<Timer>) -> MutexGuard<'_, Timer> {
    timer.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl LoadingIndicator {
    pub fn new(delay: Duration) -> Self {
        let (flag, _) = watch::channel(false);
        Self {
            delay,
            flag: Arc::new(flag),
            timer: Arc::new(Mutex::new(Timer::default())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the delayed transition to `true`, replacing any pending one
    pub fn start(&self) {
        let mut timer = lock(&self.timer);
        timer.disarm();

        let generation = timer.generation;
        let delay = self.delay;
        let flag = Arc::clone(&self.flag);
        let shared = Arc::clone(&self.timer);

        timer.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let timer = lock(&shared);
            if timer.generation == generation {
                flag.send_replace(true);
            }
        }));
    }

    /// Cancel any pending transition and clear the flag immediately
    pub fn stop(&self) {
        let mut timer = lock(&self.timer);
        timer.disarm();
        self.flag.send_replace(false);
    }

    pub fn is_loading(&self) -> bool {
        *self.flag.borrow()
    }

    /// Receiver that observes every flag transition
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.flag.subscribe()
    }
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        lock(&self.timer).disarm();
    }
}
