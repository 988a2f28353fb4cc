//! Debounced search input.
//!
//! Filtering itself is recomputed on every keystroke (it is a pure in-memory
//! function). The debouncer only decides when a query counts as "settled" for
//! logging and telemetry: each keystroke cancels the pending timer and starts
//! a new one.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::DEFAULT_SEARCH_DEBOUNCE_MS;

#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<CancellationToken>,
    settled_tx: mpsc::UnboundedSender<String>,
}

impl SearchDebouncer {
    /// Create a debouncer and the receiver on which settled queries arrive.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                pending: None,
                settled_tx,
            },
            settled_rx,
        )
    }

    pub fn with_default_delay() -> (Self, mpsc::UnboundedReceiver<String>) {
        Self::new(Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS))
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the timer for `query`. Must be called inside a tokio runtime.
    pub fn schedule(&mut self, query: impl Into<String>) {
        self.cancel();

        let token = CancellationToken::new();
        self.pending = Some(token.clone());

        let query = query.into();
        let delay = self.delay;
        let settled_tx = self.settled_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    tracing::debug!("Search settled: '{}'", query);
                    let _ = settled_tx.send(query);
                }
            }
        });
    }

    /// Drop the pending timer, if any, without emitting anything.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
