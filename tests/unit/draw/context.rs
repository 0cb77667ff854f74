use super::*;
use crate::draw::color::palette;
use crate::draw::recording::{DrawCommand, RecordingContext};
use crate::foundation::core::PhysicalSize;

fn ctx() -> RecordingContext {
    RecordingContext::new(PhysicalSize {
        width: 100,
        height: 100,
    })
}

#[test]
fn restore_reinstates_saved_state() {
    let mut c = ctx();
    c.set_fill(palette::BLUE);
    c.save();
    c.set_fill(palette::RED);
    c.set_alpha(0.5);
    c.transform(Affine::scale(2.0));
    c.restore();
    let s = c.states().current();
    assert_eq!(s.fill, palette::BLUE);
    assert_eq!(s.alpha, 1.0);
    assert_eq!(s.transform, Affine::IDENTITY);
}

#[test]
fn unbalanced_restore_is_ignored() {
    let mut c = ctx();
    c.set_line_width(3.0);
    c.restore();
    assert_eq!(c.states().current().line_width, 3.0);
}

#[test]
fn unwind_to_drops_nested_saves() {
    let mut c = ctx();
    c.save();
    c.save();
    c.save();
    c.states_mut().unwind_to(1);
    assert_eq!(c.states().depth(), 1);
}

#[test]
fn transforms_compose_in_canvas_order() {
    let mut c = ctx();
    c.transform(Affine::scale(2.0));
    c.transform(Affine::translate((10.0, 0.0)));
    let p = c.current_transform() * Point::new(0.0, 0.0);
    assert_eq!(p, Point::new(20.0, 0.0));
}

#[test]
fn global_alpha_fades_recorded_fill() {
    let mut c = ctx();
    c.set_fill(palette::GREEN);
    c.set_alpha(0.5);
    c.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
    let DrawCommand::Fill { color, .. } = &c.commands()[0] else {
        panic!("expected fill");
    };
    assert_eq!(color.a, 128);
}

#[test]
fn non_finite_alpha_becomes_transparent() {
    let mut c = ctx();
    c.set_alpha(f64::NAN);
    assert_eq!(c.states().current().alpha, 0.0);
}

#[test]
fn estimate_scales_with_font_size() {
    let w10 = estimate_text_width("abcd", FontSpec::mono(10.0));
    let w20 = estimate_text_width("abcd", FontSpec::mono(20.0));
    assert!((w20 - 2.0 * w10).abs() < 1e-9);
    assert_eq!(align_offset(TextAlign::Center, 10.0), -5.0);
    assert_eq!(align_offset(TextAlign::Right, 10.0), -10.0);
}

#[test]
fn clear_discards_previous_picture() {
    let mut c = ctx();
    c.fill_text("hello", Point::new(1.0, 1.0));
    c.clear();
    assert!(c.is_blank());
    assert_eq!(c.texts().count(), 0);
}
