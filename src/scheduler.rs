//! Frame scheduling: one shared clock, one pending host callback, and a per-frame pass that
//! redraws every active surface through its scene.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use crate::config::EngineConfig;
use crate::foundation::core::SurfaceId;
use crate::host::{FrameHandle, FrameHost};
use crate::scene::{Scene, VirtualSurface, default_scenes};
use crate::surface::registry::{SurfaceEntry, SurfaceRegistry};
use crate::typewriter::Typewriter;
use crate::viewport::Viewport;

/// Start instant shared by every scene.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockState {
    start: Option<Instant>,
}

impl ClockState {
    /// Capture `now` as time zero.
    pub fn start(&mut self, now: Instant) {
        self.start = Some(now);
    }

    /// Whether a start instant has been captured.
    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }

    /// Seconds since start, 0 before start or for instants earlier than it.
    pub fn elapsed(&self, now: Instant) -> f64 {
        self.start
            .map(|s| now.saturating_duration_since(s).as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// What happened to one surface during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceOutcome {
    /// Scene rendered.
    Drawn,
    /// Surface too small to host a viewport; cleared only.
    Empty,
    /// Scene panicked; the surface was cleared and its state unwound.
    Failed,
}

/// Summary of one frame pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Elapsed seconds the frame was drawn at.
    pub elapsed: f64,
    /// Surfaces whose scene rendered.
    pub drawn: usize,
    /// Surfaces cleared without drawing (degenerate size).
    pub empty: usize,
    /// Registered surfaces without a scene.
    pub unassigned: usize,
    /// Surfaces excluded with `set_active(false)`.
    pub inactive: usize,
    /// Surfaces whose scene panicked.
    pub failed: usize,
}

/// Clear `entry`, map it to virtual units and let `scene` paint it at `elapsed`.
///
/// The context's state stack is returned to its prior depth whatever the scene does.
pub fn draw_surface(
    entry: &mut SurfaceEntry,
    scene: &dyn Scene,
    reference_width: f64,
    elapsed: f64,
) -> SurfaceOutcome {
    let logical = entry.logical();
    let ctx = entry.context_mut();
    let depth = ctx.states().depth();

    ctx.save();
    ctx.clear();
    let outcome = match Viewport::compute(logical, reference_width) {
        None => SurfaceOutcome::Empty,
        Some(vp) => {
            ctx.transform(vp.transform());
            let painted = catch_unwind(AssertUnwindSafe(|| {
                let mut surface = VirtualSurface::new(&mut *ctx, vp.virtual_width, vp.virtual_height);
                scene.render(&mut surface, elapsed);
            }));
            match painted {
                Ok(()) => SurfaceOutcome::Drawn,
                Err(payload) => {
                    let msg = payload
                        .downcast_ref::<&str>()
                        .map(|s| (*s).to_owned())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "non-string panic".to_owned());
                    tracing::error!(scene = scene.name(), panic = %msg, "scene panicked");
                    SurfaceOutcome::Failed
                }
            }
        }
    };
    ctx.states_mut().unwind_to(depth);
    outcome
}

/// Drives the recurring frame callback.
pub struct Scheduler {
    scenes: HashMap<SurfaceId, Box<dyn Scene>>,
    reference_width: f64,
    typewriter_every: u32,
    clock: ClockState,
    pending: Option<FrameHandle>,
    running: bool,
    ticks: u64,
    typewriter: Typewriter,
}

impl Scheduler {
    /// Scheduler with the default diagram set.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_scenes(config, default_scenes())
    }

    /// Scheduler with a custom scene table.
    pub fn with_scenes(
        config: &EngineConfig,
        scenes: impl IntoIterator<Item = (SurfaceId, Box<dyn Scene>)>,
    ) -> Self {
        Self {
            scenes: scenes.into_iter().collect(),
            reference_width: config.reference_width,
            typewriter_every: config.typewriter_every_ticks.max(1),
            clock: ClockState::default(),
            pending: None,
            running: false,
            ticks: 0,
            typewriter: Typewriter::default(),
        }
    }

    /// Assign `scene` to `id`, replacing any previous one.
    pub fn register_scene(&mut self, id: impl Into<SurfaceId>, scene: Box<dyn Scene>) {
        self.scenes.insert(id.into(), scene);
    }

    /// Scene assigned to `id`.
    pub fn scene(&self, id: &SurfaceId) -> Option<&dyn Scene> {
        self.scenes.get(id).map(|s| s.as_ref())
    }

    /// Whether the loop is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The callback currently registered with the host.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Frames handled since the first start.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Shared clock.
    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    /// Answer typewriter.
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// Mutable answer typewriter.
    pub fn typewriter_mut(&mut self) -> &mut Typewriter {
        &mut self.typewriter
    }

    /// Capture the clock and register the first callback. No-op while already running.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn start<F: FrameHost + ?Sized>(&mut self, host: &mut F, now: Instant) -> bool {
        if self.running {
            return false;
        }
        self.clock.start(now);
        self.running = true;
        self.pending = Some(host.request_frame());
        tracing::debug!(scenes = self.scenes.len(), "scheduler started");
        true
    }

    /// Handle a fired callback: redraw every active surface and re-register.
    ///
    /// Stale handles and callbacks arriving after [`stop`](Self::stop) return `None`.
    pub fn on_frame<F: FrameHost + ?Sized>(
        &mut self,
        host: &mut F,
        handle: FrameHandle,
        now: Instant,
        registry: &mut SurfaceRegistry,
    ) -> Option<FrameReport> {
        if !self.running || self.pending != Some(handle) {
            tracing::trace!(?handle, "ignoring stale frame callback");
            return None;
        }
        self.pending = None;

        let report = self.draw_frame(registry, self.clock.elapsed(now));

        self.ticks += 1;
        if self.ticks % u64::from(self.typewriter_every) == 0 {
            self.typewriter.advance();
        }
        self.pending = Some(host.request_frame());
        Some(report)
    }

    /// Redraw every active registered surface at `elapsed` seconds.
    pub fn draw_frame(&self, registry: &mut SurfaceRegistry, elapsed: f64) -> FrameReport {
        let mut report = FrameReport {
            elapsed,
            ..FrameReport::default()
        };
        for entry in registry.entries_mut() {
            if !entry.is_active() {
                report.inactive += 1;
                continue;
            }
            let Some(scene) = self.scenes.get(entry.id()) else {
                tracing::trace!(surface = %entry.id(), "no scene for surface");
                report.unassigned += 1;
                continue;
            };
            match draw_surface(entry, scene.as_ref(), self.reference_width, elapsed) {
                SurfaceOutcome::Drawn => report.drawn += 1,
                SurfaceOutcome::Empty => report.empty += 1,
                SurfaceOutcome::Failed => report.failed += 1,
            }
        }
        tracing::trace!(
            elapsed,
            drawn = report.drawn,
            failed = report.failed,
            "frame drawn"
        );
        report
    }

    /// Withdraw the pending callback and tear down the registry. Later callbacks are ignored.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn stop<F: FrameHost + ?Sized>(&mut self, host: &mut F, registry: &mut SurfaceRegistry) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
        self.running = false;
        registry.clear();
        tracing::debug!(ticks = self.ticks, "scheduler stopped");
    }
}

#[cfg(test)]
#[path = "../tests/unit/scheduler.rs"]
mod tests;
