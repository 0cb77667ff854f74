use super::*;
use crate::draw::color::palette;
use crate::draw::recording::{DrawCommand, RecordingContext};
use crate::foundation::core::PhysicalSize;

#[test]
fn round_rect_bounds_match_request() {
    let p = round_rect(10.0, 20.0, 100.0, 40.0, 8.0);
    let b = p.bounding_box();
    assert!((b.x0 - 10.0).abs() < 1e-9);
    assert!((b.y0 - 20.0).abs() < 1e-9);
    assert!((b.x1 - 110.0).abs() < 1e-9);
    assert!((b.y1 - 60.0).abs() < 1e-9);
}

#[test]
fn round_rect_tolerates_degenerate_sizes() {
    let p = round_rect(0.0, 0.0, 0.0, 30.0, 12.0);
    let b = p.bounding_box();
    assert_eq!(b.width(), 0.0);
    let p = round_rect(0.0, 0.0, -5.0, -5.0, 3.0);
    assert!(p.bounding_box().area() == 0.0);
}

#[test]
fn arrow_head_points_back_from_tip() {
    let p = arrow_path(Point::new(0.0, 0.0), Point::new(20.0, 0.0));
    let b = p.bounding_box();
    assert!((b.x1 - 20.0).abs() < 1e-9);
    // Head legs fan out symmetrically behind the tip.
    assert!(b.y0 < 0.0 && b.y1 > 0.0);
    assert!((b.y0 + b.y1).abs() < 1e-9);
}

#[test]
fn arrow_does_not_leak_state() {
    let mut c = RecordingContext::new(PhysicalSize {
        width: 10,
        height: 10,
    });
    arrow(&mut c, Point::new(0.0, 0.0), Point::new(5.0, 5.0), palette::BLUE);
    assert!(c.states().current().glow.is_none());
    assert_eq!(c.states().current().line_width, 1.0);
    let DrawCommand::Stroke { glow, width, .. } = &c.commands()[0] else {
        panic!("expected stroke");
    };
    assert_eq!(*width, 2.0);
    assert_eq!(glow.map(|g| g.blur), Some(6.0));
}

#[test]
fn panel_fills_then_strokes() {
    let mut c = RecordingContext::new(PhysicalSize {
        width: 10,
        height: 10,
    });
    Panel::tinted(palette::GREEN, 0x12, 0x44, 6.0)
        .line_width(1.5)
        .draw(&mut c, 0.0, 0.0, 5.0, 5.0);
    assert!(matches!(c.commands()[0], DrawCommand::Fill { .. }));
    assert!(matches!(
        c.commands()[1],
        DrawCommand::Stroke { width, .. } if width == 1.5
    ));
}

#[test]
fn prefix_counts_characters() {
    assert_eq!(prefix("héllo", 2), "hé");
    assert_eq!(prefix("abc", 10), "abc");
    assert_eq!(prefix("abc", 0), "");
}
