//! Host-facing facade tying configuration, surfaces, resize handling and the frame loop together.

use std::time::Instant;

use crate::config::EngineConfig;
use crate::foundation::core::SurfaceId;
use crate::foundation::error::EngineResult;
use crate::host::{FrameHandle, FrameHost, Host, LayoutHost, SurfaceProvider};
use crate::scene::Scene;
use crate::scheduler::{FrameReport, Scheduler};
use crate::surface::registry::SurfaceRegistry;
use crate::surface::resize::ResizeCoordinator;
use crate::typewriter::Typewriter;

/// The animation engine as seen by a host.
///
/// Call [`on_layout_ready`](Self::on_layout_ready) once, then [`on_frame`](Self::on_frame) for
/// every fired callback. Layout changes go through
/// [`on_container_resized`](Self::on_container_resized) and are applied by a regularly polled
/// [`pump`](Self::pump). [`stop`](Self::stop) ends the loop.
pub struct Engine {
    config: EngineConfig,
    registry: SurfaceRegistry,
    scheduler: Scheduler,
    resize: ResizeCoordinator,
}

impl Engine {
    /// Engine with the default twelve diagrams.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let scheduler = Scheduler::new(&config);
        Ok(Self::assemble(config, scheduler))
    }

    /// Engine with a custom scene table.
    pub fn with_scenes(
        config: EngineConfig,
        scenes: impl IntoIterator<Item = (SurfaceId, Box<dyn Scene>)>,
    ) -> EngineResult<Self> {
        config.validate()?;
        let scheduler = Scheduler::with_scenes(&config, scenes);
        Ok(Self::assemble(config, scheduler))
    }

    fn assemble(config: EngineConfig, scheduler: Scheduler) -> Self {
        Self {
            registry: SurfaceRegistry::new(config.device_pixel_ratio),
            resize: ResizeCoordinator::new(config.resize_debounce()),
            scheduler,
            config,
        }
    }

    /// Register every configured surface and start the frame loop. Returns how many surfaces
    /// were found.
    #[tracing::instrument(level = "info", skip_all)]
    pub fn on_layout_ready<H: Host + ?Sized>(&mut self, host: &mut H, now: Instant) -> usize {
        let mut found = 0;
        for spec in &self.config.surfaces {
            if self
                .registry
                .initialize_surface(&spec.id, spec.fallback_height, host)
                .is_some()
            {
                found += 1;
            }
        }
        tracing::info!(
            found,
            configured = self.config.surfaces.len(),
            "surfaces registered"
        );
        self.scheduler.start(host, now);
        found
    }

    /// Note a container resize; the rebuild happens in [`pump`](Self::pump) once resizes stop.
    pub fn on_container_resized(&mut self, now: Instant) {
        self.resize.notify(now);
    }

    /// Apply a settled resize. Returns the number of rebuilt surfaces when one was applied.
    pub fn pump<H>(&mut self, host: &mut H, now: Instant) -> Option<usize>
    where
        H: LayoutHost + SurfaceProvider + ?Sized,
    {
        self.resize.settle(now, &mut self.registry, host)
    }

    /// Handle a fired frame callback.
    pub fn on_frame<F: FrameHost + ?Sized>(
        &mut self,
        host: &mut F,
        handle: FrameHandle,
        now: Instant,
    ) -> Option<FrameReport> {
        self.scheduler
            .on_frame(host, handle, now, &mut self.registry)
    }

    /// Draw every active surface at an explicit `elapsed` time, outside the frame loop.
    pub fn render_at(&mut self, elapsed: f64) -> FrameReport {
        self.scheduler.draw_frame(&mut self.registry, elapsed)
    }

    /// Stop the loop, drop pending resize work and release every surface.
    #[tracing::instrument(level = "info", skip_all)]
    pub fn stop<F: FrameHost + ?Sized>(&mut self, host: &mut F) {
        self.resize.cancel();
        self.scheduler.stop(host, &mut self.registry);
    }

    /// Whether the frame loop is running.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registered surfaces.
    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    /// Mutable surface registry.
    pub fn registry_mut(&mut self) -> &mut SurfaceRegistry {
        &mut self.registry
    }

    /// Frame scheduler.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Resize debouncer.
    pub fn resize(&self) -> &ResizeCoordinator {
        &self.resize
    }

    /// Answer typewriter.
    pub fn typewriter(&self) -> &Typewriter {
        self.scheduler.typewriter()
    }

    /// Mutable answer typewriter.
    pub fn typewriter_mut(&mut self) -> &mut Typewriter {
        self.scheduler.typewriter_mut()
    }
}
