//! Server health state and in-flight request tracking.
//!
//! Health transitions are lock-free through `ArcSwap`, shutdown is broadcast
//! over a `watch` channel, and in-flight GraphQL requests are counted with
//! RAII guards so a panicking handler still releases its slot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use tokio::sync::watch;

/// State machine: Starting -> Ready -> Draining -> Stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    /// Listener bound, not yet serving.
    Starting,
    /// Accepting and executing requests.
    Ready,
    /// Shutdown signalled, waiting for in-flight requests.
    Draining,
    /// Every in-flight request finished before the drain deadline.
    Stopped,
}

impl HealthState {
    /// Lowercase name used in health responses.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Ready => "ready",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        }
    }
}

/// Tracks server health and the number of GraphQL operations in flight.
#[derive(Debug)]
pub struct Lifecycle {
    state: ArcSwap<HealthState>,
    shutdown_signal: watch::Sender<bool>,
    in_flight: Arc<AtomicU64>,
}

impl Lifecycle {
    /// Creates a lifecycle in the `Starting` state with nothing in flight.
    #[must_use]
    pub fn new() -> Self {
        let (shutdown_signal, _rx) = watch::channel(false);
        Self {
            state: ArcSwap::from_pointee(HealthState::Starting),
            shutdown_signal,
            in_flight: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Marks the server as ready; readiness probes pass from here on.
    pub fn set_ready(&self) {
        self.state.store(Arc::new(HealthState::Ready));
    }

    /// Moves to `Draining` and notifies every shutdown receiver.
    ///
    /// Readiness probes fail from here on.
    pub fn begin_draining(&self) {
        self.state.store(Arc::new(HealthState::Draining));
        self.shutdown_signal.send_replace(true);
    }

    /// Receiver that observes `true` once draining has begun.
    #[must_use]
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_signal.subscribe()
    }

    /// Current health state.
    #[must_use]
    pub fn health_state(&self) -> HealthState {
        **self.state.load()
    }

    /// Counts one request as in flight until the guard is dropped.
    #[must_use]
    pub fn in_flight_guard(&self) -> InFlightGuard {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Number of requests currently holding an [`InFlightGuard`].
    #[must_use]
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Waits until no request is in flight or `timeout` elapses.
    ///
    /// On success the state becomes `Stopped` and `true` is returned; on
    /// timeout the state is left untouched.
    pub async fn wait_for_drain(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if self.in_flight_count() == 0 {
                self.state.store(Arc::new(HealthState::Stopped));
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Decrements the in-flight counter on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    in_flight: Arc<AtomicU64>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}
