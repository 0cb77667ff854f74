use std::time::Duration;

use super::*;
use crate::draw::color::palette;
use crate::draw::recording::DrawCommand;
use crate::foundation::core::{Affine, LogicalSize, Rect};
use crate::host::headless::HeadlessHost;
use crate::scene::cycle::{Cycle, CycleTime};

/// Fills its whole virtual area.
struct Fill;

impl Scene for Fill {
    fn name(&self) -> &'static str {
        "fill"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(4)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, _t: &CycleTime) {
        s.ctx.set_fill(palette::BLUE);
        s.ctx.fill_rect(Rect::new(0.0, 0.0, s.width, s.height));
    }
}

/// Leaves saves open and panics.
struct Boom;

impl Scene for Boom {
    fn name(&self) -> &'static str {
        "boom"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(4)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, _t: &CycleTime) {
        s.ctx.save();
        s.ctx.save();
        s.ctx.set_alpha(0.1);
        panic!("scene exploded");
    }
}

fn setup(ids: &[&str]) -> (HeadlessHost, SurfaceRegistry, Scheduler) {
    let config = EngineConfig::default();
    let mut host = HeadlessHost::recording();
    let mut registry = SurfaceRegistry::new(config.device_pixel_ratio);
    for id in ids {
        host.set_container(*id, LogicalSize::new(860, 200));
        registry.initialize_surface(&SurfaceId::from(*id), 200, &mut host);
    }
    let scenes = ids
        .iter()
        .map(|id| (SurfaceId::from(*id), Box::new(Fill) as Box<dyn Scene>));
    let scheduler = Scheduler::with_scenes(&config, scenes);
    (host, registry, scheduler)
}

fn fire(
    host: &mut HeadlessHost,
    scheduler: &mut Scheduler,
    registry: &mut SurfaceRegistry,
    now: Instant,
) -> Option<FrameReport> {
    let handle = host.fire_next_frame()?;
    scheduler.on_frame(host, handle, now, registry)
}

fn commands<'a>(registry: &'a SurfaceRegistry, id: &str) -> &'a [DrawCommand] {
    registry
        .get(&SurfaceId::from(id))
        .and_then(|e| e.context().as_recording())
        .map(|r| r.commands())
        .unwrap_or_default()
}

#[test]
fn clock_reports_zero_before_start() {
    let clock = ClockState::default();
    assert!(!clock.is_started());
    assert_eq!(clock.elapsed(Instant::now()), 0.0);
}

#[test]
fn clock_saturates_for_earlier_instants() {
    let t0 = Instant::now();
    let mut clock = ClockState::default();
    clock.start(t0 + Duration::from_secs(5));
    assert_eq!(clock.elapsed(t0), 0.0);
    assert!((clock.elapsed(t0 + Duration::from_millis(8300)) - 3.3).abs() < 1e-9);
}

#[test]
fn start_registers_exactly_one_callback() {
    let (mut host, _registry, mut scheduler) = setup(&["a"]);
    let t0 = Instant::now();
    assert!(scheduler.start(&mut host, t0));
    assert!(!scheduler.start(&mut host, t0));
    assert_eq!(host.pending_frames().len(), 1);
    assert!(scheduler.is_running());
}

#[test]
fn each_frame_re_registers_once() {
    let (mut host, mut registry, mut scheduler) = setup(&["a", "b"]);
    let t0 = Instant::now();
    scheduler.start(&mut host, t0);
    for k in 1..=5u64 {
        let report = fire(
            &mut host,
            &mut scheduler,
            &mut registry,
            t0 + Duration::from_millis(16 * k),
        )
        .unwrap();
        assert_eq!(report.drawn, 2);
        assert_eq!(host.pending_frames().len(), 1);
    }
    assert_eq!(scheduler.ticks(), 5);
}

#[test]
fn stale_handles_are_ignored() {
    let (mut host, mut registry, mut scheduler) = setup(&["a"]);
    let t0 = Instant::now();
    scheduler.start(&mut host, t0);
    let first = host.fire_next_frame().unwrap();
    assert!(
        scheduler
            .on_frame(&mut host, first, t0, &mut registry)
            .is_some()
    );
    assert!(
        scheduler
            .on_frame(&mut host, first, t0, &mut registry)
            .is_none()
    );
    assert_eq!(scheduler.ticks(), 1);
}

#[test]
fn stop_cancels_and_tears_down() {
    let (mut host, mut registry, mut scheduler) = setup(&["a"]);
    let t0 = Instant::now();
    scheduler.start(&mut host, t0);
    let pending = scheduler.pending().unwrap();
    scheduler.stop(&mut host, &mut registry);

    assert!(host.pending_frames().is_empty());
    assert!(registry.is_empty());
    assert!(!scheduler.is_running());
    assert!(
        scheduler
            .on_frame(&mut host, pending, t0, &mut registry)
            .is_none()
    );
}

#[test]
fn typewriter_advances_every_third_tick() {
    let (mut host, mut registry, mut scheduler) = setup(&["a"]);
    let t0 = Instant::now();
    scheduler.start(&mut host, t0);
    let mut seen = Vec::new();
    for _ in 0..9 {
        fire(&mut host, &mut scheduler, &mut registry, t0);
        seen.push(scheduler.typewriter().revealed());
    }
    assert_eq!(seen, [0, 0, 1, 1, 1, 2, 2, 2, 3]);

    scheduler.typewriter_mut().reset();
    assert_eq!(scheduler.typewriter().revealed(), 0);
}

#[test]
fn panicking_scene_does_not_stop_the_others() {
    let (mut host, mut registry, mut scheduler) = setup(&["a", "b"]);
    scheduler.register_scene("a", Box::new(Boom));
    let t0 = Instant::now();
    scheduler.start(&mut host, t0);

    let report = fire(&mut host, &mut scheduler, &mut registry, t0).unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.drawn, 1);
    assert_eq!(host.pending_frames().len(), 1);

    let a = registry.get(&SurfaceId::from("a")).unwrap().context();
    assert_eq!(a.states().depth(), 0);
    assert_eq!(a.states().current().alpha, 1.0);
    assert!(!commands(&registry, "b").is_empty());
}

#[test]
fn surfaces_without_scene_are_skipped() {
    let (mut host, mut registry, scheduler) = setup(&["a"]);
    host.set_container("orphan", LogicalSize::new(300, 100));
    registry.initialize_surface(&SurfaceId::from("orphan"), 100, &mut host);

    let report = scheduler.draw_frame(&mut registry, 1.0);
    assert_eq!(report.drawn, 1);
    assert_eq!(report.unassigned, 1);
    assert!(commands(&registry, "orphan").is_empty());
}

#[test]
fn inactive_surfaces_are_not_drawn() {
    let (_host, mut registry, scheduler) = setup(&["a", "b"]);
    registry.set_active(&SurfaceId::from("b"), false);
    let report = scheduler.draw_frame(&mut registry, 0.5);
    assert_eq!(report.drawn, 1);
    assert_eq!(report.inactive, 1);
    assert!(commands(&registry, "b").is_empty());
}

#[test]
fn narrow_surface_is_scaled_into_virtual_units() {
    let config = EngineConfig::default();
    let mut host = HeadlessHost::recording();
    host.set_container("n", LogicalSize::new(430, 100));
    let mut registry = SurfaceRegistry::new(2);
    registry.initialize_surface(&SurfaceId::from("n"), 100, &mut host);
    let scheduler = Scheduler::with_scenes(
        &config,
        [(SurfaceId::from("n"), Box::new(Fill) as Box<dyn Scene>)],
    );

    scheduler.draw_frame(&mut registry, 0.0);
    let cmds = commands(&registry, "n");
    assert!(matches!(cmds[0], DrawCommand::Clear));
    let DrawCommand::Fill {
        path, transform, ..
    } = &cmds[1]
    else {
        panic!("expected fill, got {:?}", cmds[1]);
    };
    let expected = Affine::scale(2.0) * Affine::scale(0.5);
    for (a, b) in transform.as_coeffs().iter().zip(expected.as_coeffs()) {
        assert!((a - b).abs() < 1e-12);
    }
    // the scene filled its full virtual area: 860 x 200 virtual units
    let bounds = kurbo::Shape::bounding_box(path);
    assert!((bounds.width() - 860.0).abs() < 1e-9);
    assert!((bounds.height() - 200.0).abs() < 1e-9);
    // which lands on the whole 860 x 200 backing store
    let device = transform.transform_rect_bbox(bounds);
    assert!((device.width() - 860.0).abs() < 1e-9);
}

#[test]
fn transform_is_reset_between_frames() {
    let (_host, mut registry, scheduler) = setup(&["a"]);
    scheduler.draw_frame(&mut registry, 0.0);
    scheduler.draw_frame(&mut registry, 0.5);
    let a = registry.get(&SurfaceId::from("a")).unwrap().context();
    assert_eq!(a.current_transform(), Affine::scale(2.0));
    let fills = commands(&registry, "a")
        .iter()
        .filter(|c| matches!(c, DrawCommand::Fill { .. }))
        .count();
    assert_eq!(fills, 1);
}
