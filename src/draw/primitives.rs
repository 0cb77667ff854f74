//! Stateless drawing helpers shared by every scene.

use kurbo::Shape;

use crate::draw::color::Color;
use crate::draw::context::{DrawContext, FontSpec};
use crate::foundation::core::{BezPath, Point};

/// Arrow-head leg length.
pub const ARROW_HEAD: f64 = 8.0;
/// Arrow-head half-angle in radians.
pub const ARROW_SPREAD: f64 = 0.4;

/// Rounded rectangle with quadratic corners. The radius is clamped to half the shorter side so
/// collapsing widths (growing cards) never self-intersect.
pub fn round_rect(x: f64, y: f64, w: f64, h: f64, r: f64) -> BezPath {
    let w = w.max(0.0);
    let h = h.max(0.0);
    let r = r.clamp(0.0, w.min(h) / 2.0);

    let mut p = BezPath::new();
    p.move_to((x + r, y));
    p.line_to((x + w - r, y));
    p.quad_to((x + w, y), (x + w, y + r));
    p.line_to((x + w, y + h - r));
    p.quad_to((x + w, y + h), (x + w - r, y + h));
    p.line_to((x + r, y + h));
    p.quad_to((x, y + h), (x, y + h - r));
    p.line_to((x, y + r));
    p.quad_to((x, y), (x + r, y));
    p.close_path();
    p
}

/// Full circle.
pub fn circle(center: Point, r: f64) -> BezPath {
    kurbo::Circle::new(center, r.max(0.0)).to_path(0.1)
}

/// Straight segment.
pub fn line(from: Point, to: Point) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(from);
    p.line_to(to);
    p
}

/// Shaft plus two-leg triangular head pointing at `to`.
pub fn arrow_path(from: Point, to: Point) -> BezPath {
    let a = (to.y - from.y).atan2(to.x - from.x);
    let mut p = line(from, to);
    p.line_to((
        to.x - ARROW_HEAD * (a - ARROW_SPREAD).cos(),
        to.y - ARROW_HEAD * (a - ARROW_SPREAD).sin(),
    ));
    p.move_to(to);
    p.line_to((
        to.x - ARROW_HEAD * (a + ARROW_SPREAD).cos(),
        to.y - ARROW_HEAD * (a + ARROW_SPREAD).sin(),
    ));
    p
}

/// Stroke an arrow with width 2 and a glow in its own colour.
pub fn arrow(ctx: &mut dyn DrawContext, from: Point, to: Point, color: Color) {
    ctx.save();
    ctx.set_stroke(color);
    ctx.set_line_width(2.0);
    ctx.set_glow(color, 6.0);
    ctx.stroke_path(&arrow_path(from, to));
    ctx.restore();
}

/// Run `draw` with a halo of `blur` in `color`, then drop the halo.
pub fn with_glow(
    ctx: &mut dyn DrawContext,
    color: Color,
    blur: f64,
    draw: impl FnOnce(&mut dyn DrawContext),
) {
    ctx.set_glow(color, blur);
    draw(ctx);
    ctx.clear_glow();
}

/// Run `draw` at global alpha `alpha`, then reset alpha to opaque.
pub fn with_alpha(ctx: &mut dyn DrawContext, alpha: f64, draw: impl FnOnce(&mut dyn DrawContext)) {
    ctx.set_alpha(alpha);
    draw(ctx);
    ctx.set_alpha(1.0);
}

/// Glowing filled dot.
pub fn glow_dot(ctx: &mut dyn DrawContext, center: Point, r: f64, color: Color, blur: f64) {
    ctx.set_fill(color);
    with_glow(ctx, color, blur, |ctx| ctx.fill_path(&circle(center, r)));
}

/// Tinted rounded panel: fill, then optional outline.
#[derive(Clone, Copy, Debug)]
pub struct Panel {
    /// Fill colour.
    pub fill: Color,
    /// Outline colour and width.
    pub stroke: Option<(Color, f64)>,
    /// Corner radius.
    pub radius: f64,
}

impl Panel {
    /// Panel tinted from one accent: `fill_alpha` for the body, `stroke_alpha` for the outline.
    pub fn tinted(accent: Color, fill_alpha: u8, stroke_alpha: u8, radius: f64) -> Self {
        Self {
            fill: accent.with_alpha(fill_alpha),
            stroke: Some((accent.with_alpha(stroke_alpha), 1.0)),
            radius,
        }
    }

    /// Replace the outline width.
    pub fn line_width(mut self, width: f64) -> Self {
        if let Some((c, _)) = self.stroke {
            self.stroke = Some((c, width));
        }
        self
    }

    /// Fill-only panel.
    pub fn solid(fill: Color, radius: f64) -> Self {
        Self {
            fill,
            stroke: None,
            radius,
        }
    }

    /// Paint the panel at `(x, y, w, h)`.
    pub fn draw(&self, ctx: &mut dyn DrawContext, x: f64, y: f64, w: f64, h: f64) {
        let path = round_rect(x, y, w, h, self.radius);
        ctx.set_fill(self.fill);
        ctx.fill_path(&path);
        if let Some((color, width)) = self.stroke {
            ctx.set_stroke(color);
            ctx.set_line_width(width);
            ctx.stroke_path(&path);
        }
    }
}

/// Set font and fill colour, then draw `text` at `(x, y)`.
pub fn label(ctx: &mut dyn DrawContext, text: &str, x: f64, y: f64, font: FontSpec, color: Color) {
    ctx.set_font(font);
    ctx.set_fill(color);
    ctx.fill_text(text, Point::new(x, y));
}

/// Prefix of `s` holding at most `n` characters.
pub fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/primitives.rs"]
mod tests;
