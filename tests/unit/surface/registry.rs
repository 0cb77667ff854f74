use super::*;
use crate::foundation::error::{EngineError, EngineResult};
use crate::host::headless::HeadlessHost;

fn id(s: &str) -> SurfaceId {
    SurfaceId::from(s)
}

struct FailingProvider;

impl SurfaceProvider for FailingProvider {
    fn create_context(
        &mut self,
        _id: &SurfaceId,
        _physical: PhysicalSize,
    ) -> EngineResult<Box<dyn DrawContext>> {
        Err(EngineError::surface("no 2d context"))
    }
}

#[test]
fn physical_size_is_logical_times_ratio() {
    let mut host = HeadlessHost::recording();
    host.set_container("c1", LogicalSize::new(430, 200));
    let mut reg = SurfaceRegistry::new(2);

    let e = reg.initialize_surface(&id("c1"), 200, &mut host).unwrap();
    assert_eq!(e.logical(), LogicalSize::new(430, 200));
    assert_eq!(
        e.physical(),
        PhysicalSize {
            width: 860,
            height: 400
        }
    );
    assert_eq!(e.context().current_transform(), Affine::scale(2.0));
    assert!(e.is_active());
}

#[test]
fn zero_height_uses_fallback() {
    let mut host = HeadlessHost::recording();
    host.set_container("c8", LogicalSize::new(600, 0));
    let mut reg = SurfaceRegistry::new(2);

    let e = reg.initialize_surface(&id("c8"), 340, &mut host).unwrap();
    assert_eq!(e.logical().height, 340);
    assert_eq!(e.physical().height, 680);
    assert_eq!(e.fallback_height(), 340);
}

#[test]
fn missing_container_is_skipped_but_remembered() {
    let mut host = HeadlessHost::recording();
    let mut reg = SurfaceRegistry::new(2);

    assert!(reg.initialize_surface(&id("c3"), 200, &mut host).is_none());
    assert!(reg.is_empty());
    assert_eq!(reg.remembered_fallback(&id("c3")), Some(200));

    host.set_container("c3", LogicalSize::new(500, 0));
    assert_eq!(reg.reinitialize_all(&mut host), 1);
    assert_eq!(reg.get(&id("c3")).unwrap().logical().height, 200);
}

#[test]
fn reinitialization_is_idempotent() {
    let mut host = HeadlessHost::recording();
    host.set_container("a", LogicalSize::new(700, 180));
    host.set_container("b", LogicalSize::new(700, 0));
    let mut reg = SurfaceRegistry::new(2);
    reg.initialize_surface(&id("a"), 180, &mut host);
    reg.initialize_surface(&id("b"), 250, &mut host);

    let snapshot = |reg: &SurfaceRegistry| {
        reg.entries()
            .map(|e| (e.id().clone(), e.logical(), e.physical()))
            .collect::<Vec<_>>()
    };
    let first = snapshot(&reg);
    reg.reinitialize_all(&mut host);
    reg.reinitialize_all(&mut host);
    assert_eq!(snapshot(&reg), first);
    assert_eq!(reg.len(), 2);
}

#[test]
fn reinitialization_replaces_entry_in_place() {
    let mut host = HeadlessHost::recording();
    host.set_container("a", LogicalSize::new(900, 100));
    host.set_container("b", LogicalSize::new(900, 100));
    let mut reg = SurfaceRegistry::new(2);
    reg.initialize_surface(&id("a"), 100, &mut host);
    reg.initialize_surface(&id("b"), 100, &mut host);

    host.set_all_widths(300);
    reg.reinitialize_all(&mut host);
    let order: Vec<_> = reg.entries().map(|e| e.id().as_str().to_owned()).collect();
    assert_eq!(order, ["a", "b"]);
    assert_eq!(reg.get(&id("a")).unwrap().logical().width, 300);
    assert_eq!(host.contexts_created(), 4);
}

#[test]
fn removed_container_keeps_previous_entry() {
    let mut host = HeadlessHost::recording();
    host.set_container("a", LogicalSize::new(800, 120));
    let mut reg = SurfaceRegistry::new(2);
    reg.initialize_surface(&id("a"), 100, &mut host);

    host.remove_container(&id("a"));
    assert_eq!(reg.reinitialize_all(&mut host), 0);
    assert_eq!(reg.get(&id("a")).unwrap().logical().width, 800);
}

#[test]
fn context_failure_is_not_fatal() {
    let mut host = HeadlessHost::new(FailingProvider);
    host.set_container("a", LogicalSize::new(800, 120));
    let mut reg = SurfaceRegistry::new(2);
    assert!(reg.initialize_surface(&id("a"), 100, &mut host).is_none());
    assert!(reg.is_empty());
}

#[test]
fn active_flag_survives_rebuild() {
    let mut host = HeadlessHost::recording();
    host.set_container("a", LogicalSize::new(800, 120));
    let mut reg = SurfaceRegistry::new(2);
    reg.initialize_surface(&id("a"), 100, &mut host);

    assert!(reg.set_active(&id("a"), false));
    assert!(!reg.set_active(&id("zz"), false));
    reg.reinitialize_all(&mut host);
    assert!(!reg.get(&id("a")).unwrap().is_active());
}

#[test]
fn clear_forgets_everything() {
    let mut host = HeadlessHost::recording();
    host.set_container("a", LogicalSize::new(800, 120));
    let mut reg = SurfaceRegistry::new(2);
    reg.initialize_surface(&id("a"), 100, &mut host);
    reg.clear();
    assert!(reg.is_empty());
    assert!(reg.known().is_empty());
}
