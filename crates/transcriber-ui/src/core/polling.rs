//! Vocabulary readiness monitor.
//!
//! # Design
//! - Probe, and on failure report `Busy`, wait one fixed interval, probe again.
//!   No backoff and no attempt cap; the first success reports `Ready` and stops.
//! - A run is bound to the view ticket that started it: navigating away ends
//!   the loop at its next wake-up.
//! - Starting a run supersedes any earlier run of the same monitor, so a
//!   re-render restarts polling instead of duplicating it.

use crate::core::mount::ViewTicket;
use async_trait::async_trait;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Delay between readiness probes.
pub const READINESS_INTERVAL: Duration = Duration::from_secs(5);

/// Observable readiness of the vocabulary build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// Build still running; action controls hidden.
    Busy,
    /// Build finished; action controls shown.
    Ready,
}

/// Timer seam.
#[async_trait(?Send)]
pub trait Sleeper {
    /// Resolve after `delay`.
    async fn sleep(&self, delay: Duration);
}

/// Readiness check seam.
#[async_trait(?Send)]
pub trait ReadinessProbe {
    /// `true` once the resource is ready; every failure reads as not ready.
    async fn probe(&self) -> bool;
}

/// How a monitor run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// Probe succeeded after `retries` delayed re-probes.
    Ready {
        /// Re-probes performed.
        retries: u32,
    },
    /// Run was superseded or its view unmounted.
    Cancelled {
        /// Re-probes performed before cancellation.
        retries: u32,
    },
}

/// Cancellable readiness polling loop.
#[derive(Clone, Debug)]
pub struct ReadinessMonitor {
    interval: Duration,
    run: Rc<Cell<u64>>,
}

impl Default for ReadinessMonitor {
    fn default() -> Self {
        Self::new(READINESS_INTERVAL)
    }
}

impl ReadinessMonitor {
    /// Monitor that waits `interval` between probes.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            run: Rc::new(Cell::new(0)),
        }
    }

    /// Interval between probes.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop the active run at its next wake-up.
    pub fn cancel(&self) {
        self.run.set(self.run.get().wrapping_add(1));
    }

    /// Poll until ready, reporting every state change through `on_state`.
    pub async fn run(
        &self,
        probe: &dyn ReadinessProbe,
        sleeper: &dyn Sleeper,
        ticket: &ViewTicket,
        mut on_state: impl FnMut(Readiness),
    ) -> MonitorOutcome {
        self.cancel();
        let run_id = self.run.get();
        let live = || self.run.get() == run_id && ticket.is_current();
        let mut retries = 0;
        loop {
            if !live() {
                return MonitorOutcome::Cancelled { retries };
            }
            let ready = probe.probe().await;
            if !live() {
                return MonitorOutcome::Cancelled { retries };
            }
            if ready {
                tracing::info!(retries, "vocabulary is ready");
                on_state(Readiness::Ready);
                return MonitorOutcome::Ready { retries };
            }
            on_state(Readiness::Busy);
            tracing::debug!(
                delay_ms = u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX),
                "vocabulary busy, probing again"
            );
            sleeper.sleep(self.interval).await;
            retries += 1;
        }
    }
}
