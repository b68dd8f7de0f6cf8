//! Once-per-second elapsed time for the running-fast display.
//!
//! The ticker only reads the clock and publishes `now - start_time` on a
//! watch channel; it never touches the session store. Dropping the ticker
//! aborts its task, so every exit path releases it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::session::{ActiveFast, Clock};

/// A running display timer for one active fast.
pub struct ElapsedTicker {
    start_time: i64,
    rx: watch::Receiver<i64>,
    handle: JoinHandle<()>,
}

impl ElapsedTicker {
    pub const PERIOD: Duration = Duration::from_secs(1);

    /// Start ticking for a fast that began at `start_time`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(start_time: i64, clock: Arc<dyn Clock>) -> Self {
        Self::with_period(start_time, clock, Self::PERIOD)
    }

    pub fn with_period(start_time: i64, clock: Arc<dyn Clock>, period: Duration) -> Self {
        let (tx, rx) = watch::channel(clock.now_ms().saturating_sub(start_time));
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let elapsed = clock.now_ms().saturating_sub(start_time);
                if tx.send(elapsed).is_err() {
                    break;
                }
            }
        });
        tracing::debug!(start_time, "elapsed ticker started");
        Self {
            start_time,
            rx,
            handle,
        }
    }

    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    /// Most recently published elapsed milliseconds.
    pub fn elapsed(&self) -> i64 {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<i64> {
        self.rx.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!(start_time = self.start_time, "elapsed ticker stopped");
    }
}

/// Holds a ticker exactly while a fast is active.
pub struct ElapsedDisplay {
    clock: Arc<dyn Clock>,
    ticker: Option<ElapsedTicker>,
}

impl ElapsedDisplay {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            ticker: None,
        }
    }

    /// Reconcile with the store's current active fast.
    ///
    /// Starts a ticker when a fast becomes active, restarts it when the
    /// start time was edited, and drops it when the fast ends.
    pub fn sync(&mut self, active: Option<&ActiveFast>) {
        let current = self.ticker.as_ref().map(ElapsedTicker::start_time);
        match active {
            Some(a) if current == Some(a.start_time) => {}
            Some(a) => {
                self.ticker = Some(ElapsedTicker::spawn(a.start_time, Arc::clone(&self.clock)));
            }
            None => self.ticker = None,
        }
    }

    /// Elapsed milliseconds on display; 0 when no fast is active.
    pub fn elapsed_ms(&self) -> i64 {
        self.ticker.as_ref().map(ElapsedTicker::elapsed).unwrap_or(0)
    }

    pub fn subscribe(&self) -> Option<watch::Receiver<i64>> {
        self.ticker.as_ref().map(ElapsedTicker::subscribe)
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }
}
