use kurbo::Shape;

use crate::draw::color::Color;
use crate::draw::recording::RecordingContext;
use crate::foundation::core::{Affine, BezPath, Point, Rect};
use crate::render::backend::FrameRGBA;

/// Horizontal anchor of `fill_text` relative to its x coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Text starts at x.
    #[default]
    Left,
    /// Text is centred on x.
    Center,
    /// Text ends at x.
    Right,
}

/// Font request. Backends with a single face honour `size` only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    /// Size in user units.
    pub size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Monospace family.
    pub mono: bool,
}

impl FontSpec {
    /// Regular sans-serif.
    pub const fn sans(size: f64) -> Self {
        Self {
            size,
            bold: false,
            mono: false,
        }
    }

    /// Bold sans-serif.
    pub const fn bold(size: f64) -> Self {
        Self {
            size,
            bold: true,
            mono: false,
        }
    }

    /// Regular monospace.
    pub const fn mono(size: f64) -> Self {
        Self {
            size,
            bold: false,
            mono: true,
        }
    }

    /// Bold monospace.
    pub const fn mono_bold(size: f64) -> Self {
        Self {
            size,
            bold: true,
            mono: true,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::sans(10.0)
    }
}

/// Soft halo drawn beneath filled and stroked geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    /// Halo colour.
    pub color: Color,
    /// Blur radius in user units.
    pub blur: f64,
}

/// Graphics state captured by `save` and reinstated by `restore`.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    /// User-to-device transform.
    pub transform: Affine,
    /// Fill paint.
    pub fill: Color,
    /// Stroke paint.
    pub stroke: Color,
    /// Stroke width in user units.
    pub line_width: f64,
    /// `[on, off]` dash lengths, solid when `None`.
    pub dash: Option<[f64; 2]>,
    /// Halo under subsequent geometry.
    pub glow: Option<Glow>,
    /// Global alpha multiplier in `[0, 1]`.
    pub alpha: f64,
    /// Current font.
    pub font: FontSpec,
    /// Current text alignment.
    pub align: TextAlign,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            fill: Color::rgb(0, 0, 0),
            stroke: Color::rgb(0, 0, 0),
            line_width: 1.0,
            dash: None,
            glow: None,
            alpha: 1.0,
            font: FontSpec::default(),
            align: TextAlign::Left,
        }
    }
}

impl DrawState {
    /// Fill colour with global alpha applied.
    pub fn effective_fill(&self) -> Color {
        self.fill.fade(self.alpha)
    }

    /// Stroke colour with global alpha applied.
    pub fn effective_stroke(&self) -> Color {
        self.stroke.fade(self.alpha)
    }

    /// Glow with global alpha applied, `None` when invisible.
    pub fn effective_glow(&self) -> Option<Glow> {
        self.glow
            .filter(|g| g.blur > 0.0 && g.color.a > 0 && self.alpha > 0.0)
            .map(|g| Glow {
                color: g.color.fade(self.alpha),
                blur: g.blur,
            })
    }

    /// Stroke style for the current width and dash pattern.
    pub fn stroke_style(&self) -> kurbo::Stroke {
        let stroke = kurbo::Stroke::new(self.line_width.max(0.0));
        match self.dash {
            Some([on, off]) if on > 0.0 && off >= 0.0 => stroke.with_dashes(0.0, [on, off]),
            _ => stroke,
        }
    }
}

/// Save/restore stack shared by all backends.
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    /// Active state.
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    /// Mutable active state.
    pub fn current_mut(&mut self) -> &mut DrawState {
        &mut self.current
    }

    /// Push a copy of the active state.
    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Pop the last saved state. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(s) = self.saved.pop() {
            self.current = s;
        }
    }

    /// Number of outstanding saves.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Restore until at most `depth` saves remain.
    pub fn unwind_to(&mut self, depth: usize) {
        while self.saved.len() > depth {
            self.restore();
        }
    }
}

/// Immediate-mode 2D drawing surface, modelled on a browser canvas context.
///
/// Implementors only provide raw geometry and text output plus access to their [`StateStack`];
/// every state mutator is provided on top of that.
pub trait DrawContext {
    /// Graphics state stack.
    fn states(&self) -> &StateStack;

    /// Mutable graphics state stack.
    fn states_mut(&mut self) -> &mut StateStack;

    /// Erase all pixels. Does not touch the graphics state.
    fn clear(&mut self);

    /// Fill `path` with the current fill paint.
    fn fill_path(&mut self, path: &BezPath);

    /// Stroke `path` with the current stroke paint, width and dash.
    fn stroke_path(&mut self, path: &BezPath);

    /// Draw `text` with its baseline at `origin`, honouring font and alignment.
    fn fill_text(&mut self, text: &str, origin: Point);

    /// Advance width of `text` in user units under the current font.
    fn measure_text(&mut self, text: &str) -> f64 {
        estimate_text_width(text, self.states().current().font)
    }

    /// Rendered pixels, for backends that rasterize.
    fn snapshot(&mut self) -> Option<FrameRGBA> {
        None
    }

    /// Access the display list, for the recording backend.
    fn as_recording(&self) -> Option<&RecordingContext> {
        None
    }

    /// Push a copy of the graphics state.
    fn save(&mut self) {
        self.states_mut().save();
    }

    /// Reinstate the last saved graphics state.
    fn restore(&mut self) {
        self.states_mut().restore();
    }

    /// Post-multiply the current transform (canvas `transform`/`scale`/`translate`).
    fn transform(&mut self, affine: Affine) {
        let s = self.states_mut().current_mut();
        s.transform = s.transform * affine;
    }

    /// Replace the current transform.
    fn set_transform(&mut self, affine: Affine) {
        self.states_mut().current_mut().transform = affine;
    }

    /// Current transform.
    fn current_transform(&self) -> Affine {
        self.states().current().transform
    }

    /// Set fill paint.
    fn set_fill(&mut self, color: Color) {
        self.states_mut().current_mut().fill = color;
    }

    /// Set stroke paint.
    fn set_stroke(&mut self, color: Color) {
        self.states_mut().current_mut().stroke = color;
    }

    /// Set stroke width.
    fn set_line_width(&mut self, width: f64) {
        self.states_mut().current_mut().line_width = width;
    }

    /// Set or clear the dash pattern.
    fn set_dash(&mut self, dash: Option<[f64; 2]>) {
        self.states_mut().current_mut().dash = dash;
    }

    /// Set halo colour and blur.
    fn set_glow(&mut self, color: Color, blur: f64) {
        self.states_mut().current_mut().glow = Some(Glow { color, blur });
    }

    /// Remove halo.
    fn clear_glow(&mut self) {
        self.states_mut().current_mut().glow = None;
    }

    /// Set global alpha, clamped to `[0, 1]`.
    fn set_alpha(&mut self, alpha: f64) {
        let alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.states_mut().current_mut().alpha = alpha;
    }

    /// Set font.
    fn set_font(&mut self, font: FontSpec) {
        self.states_mut().current_mut().font = font;
    }

    /// Set text alignment.
    fn set_align(&mut self, align: TextAlign) {
        self.states_mut().current_mut().align = align;
    }

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect) {
        self.fill_path(&rect.to_path(0.1));
    }
}

/// Monospace-style width estimate used when no shaped font is available.
pub fn estimate_text_width(text: &str, font: FontSpec) -> f64 {
    let per_char = if font.mono { 0.6 } else { 0.55 };
    text.chars().count() as f64 * font.size * per_char
}

/// Horizontal offset to apply to a run of `width` for `align`.
pub fn align_offset(align: TextAlign, width: f64) -> f64 {
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => -width / 2.0,
        TextAlign::Right => -width,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/context.rs"]
mod tests;
