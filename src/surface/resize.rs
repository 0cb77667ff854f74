use std::time::{Duration, Instant};

use crate::host::{LayoutHost, SurfaceProvider};
use crate::surface::registry::SurfaceRegistry;

/// Debounces container-resize bursts into a single registry rebuild.
///
/// Every [`notify`](Self::notify) pushes the deadline out by the quiescence window; once a
/// [`poll`](Self::poll) observes the deadline has passed it fires exactly once.
#[derive(Clone, Debug)]
pub struct ResizeCoordinator {
    window: Duration,
    deadline: Option<Instant>,
    settled: u64,
}

impl ResizeCoordinator {
    /// Coordinator with a quiescence `window`.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
            settled: 0,
        }
    }

    /// Quiescence window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a resize notification at `now`, restarting the window.
    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// `true` while a rebuild is waiting for quiescence.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// `true` exactly once when the window has elapsed since the last notification.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.settled += 1;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending rebuild.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Number of rebuilds fired so far.
    pub fn settled(&self) -> u64 {
        self.settled
    }

    /// Rebuild every known surface if the window has elapsed. Returns the number of surfaces
    /// rebuilt, or `None` when nothing was due.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn settle<H>(
        &mut self,
        now: Instant,
        registry: &mut SurfaceRegistry,
        host: &mut H,
    ) -> Option<usize>
    where
        H: LayoutHost + SurfaceProvider + ?Sized,
    {
        if !self.poll(now) {
            return None;
        }
        let rebuilt = registry.reinitialize_all(host);
        tracing::info!(
            rebuilt,
            known = registry.known().len(),
            "resize settled"
        );
        Some(rebuilt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(200);

    #[test]
    fn fires_once_after_quiescence() {
        let t0 = Instant::now();
        let mut rc = ResizeCoordinator::new(WINDOW);
        assert!(!rc.poll(t0));
        rc.notify(t0);
        assert!(rc.is_pending());
        assert!(!rc.poll(t0 + Duration::from_millis(199)));
        assert!(rc.poll(t0 + Duration::from_millis(200)));
        assert!(!rc.poll(t0 + Duration::from_millis(400)));
        assert_eq!(rc.settled(), 1);
    }

    #[test]
    fn burst_restarts_the_window() {
        let t0 = Instant::now();
        let mut rc = ResizeCoordinator::new(WINDOW);
        for ms in [0u64, 50, 100, 150, 300] {
            rc.notify(t0 + Duration::from_millis(ms));
            assert!(!rc.poll(t0 + Duration::from_millis(ms + 10)));
        }
        assert!(!rc.poll(t0 + Duration::from_millis(499)));
        assert!(rc.poll(t0 + Duration::from_millis(500)));
        assert_eq!(rc.settled(), 1);
    }

    #[test]
    fn cancel_drops_pending_rebuild() {
        let t0 = Instant::now();
        let mut rc = ResizeCoordinator::new(WINDOW);
        rc.notify(t0);
        rc.cancel();
        assert!(!rc.poll(t0 + Duration::from_secs(1)));
    }
}
