//! Single-slot delayed dispatch
//!
//! Values pushed into a [`Debouncer`] replace whatever is pending and restart
//! the quiet-period timer. A value is emitted only once no new value has
//! arrived for the whole quiet period.

use std::time::Duration;

use tokio::sync::mpsc;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the dispatch task and return the sending half with the settled-value receiver
    ///
    /// The task ends when the debouncer is dropped; a value still waiting for
    /// its quiet period at that point is emitted right away.
    pub fn new(quiet_period: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, mut pending_rx) = mpsc::unbounded_channel::<T>();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(mut pending) = pending_rx.recv().await {
                loop {
                    tokio::select! {
                        next = pending_rx.recv() => match next {
                            Some(value) => pending = value,
                            None => {
                                let _ = settled_tx.send(pending);
                                return;
                            }
                        },
                        _ = tokio::time::sleep(quiet_period) => {
                            if settled_tx.send(pending).is_err() {
                                return;
                            }
                            break;
                        }
                    }
                }
            }
        });

        (Self { input }, settled_rx)
    }

    /// Replace the pending value. Returns false once the dispatch task is gone.
    pub fn push(&self, value: T) -> bool {
        self.input.send(value).is_ok()
    }
}
