use std::path::Path;
use std::sync::Arc;

use crate::draw::color::Color;
use crate::draw::context::{DrawContext, DrawState, Glow, StateStack, align_offset};
use crate::foundation::core::{Affine, BezPath, PhysicalSize, Point, SurfaceId};
use crate::foundation::error::{EngineError, EngineResult};
use crate::host::SurfaceProvider;
use crate::render::backend::FrameRGBA;
use crate::render::text::TextShaper;

/// Halo passes drawn under glowing geometry, widest first.
const GLOW_PASSES: u32 = 3;
/// Combined opacity of all halo passes.
const GLOW_STRENGTH: f64 = 0.45;

/// Drawing context rasterized by `vello_cpu`.
///
/// Text needs a font face; without one, `fill_text` is a no-op and measurement falls back to the
/// monospace estimate.
pub struct CpuContext {
    stack: StateStack,
    ctx: vello_cpu::RenderContext,
    pixels: (u16, u16),
    size: PhysicalSize,
    text: Option<TextShaper>,
}

impl CpuContext {
    /// Allocate a context for a backing store of `size`.
    pub fn new(size: PhysicalSize, font: Option<Arc<Vec<u8>>>) -> EngineResult<Self> {
        let width: u16 = size
            .width
            .max(1)
            .try_into()
            .map_err(|_| EngineError::surface("surface width exceeds u16"))?;
        let height: u16 = size
            .height
            .max(1)
            .try_into()
            .map_err(|_| EngineError::surface("surface height exceeds u16"))?;
        let text = font.map(TextShaper::new).transpose()?;
        Ok(Self {
            stack: StateStack::default(),
            ctx: vello_cpu::RenderContext::new(width, height),
            pixels: (width, height),
            size,
            text,
        })
    }

    /// Backing store size.
    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    fn paint_glow(&mut self, path: &vello_cpu::kurbo::BezPath, base_width: f64, glow: Glow) {
        let per_pass = GLOW_STRENGTH / f64::from(GLOW_PASSES);
        for i in (1..=GLOW_PASSES).rev() {
            let spread = glow.blur * f64::from(i) / f64::from(GLOW_PASSES);
            self.ctx
                .set_stroke(vello_cpu::kurbo::Stroke::new(base_width + spread));
            self.ctx.set_paint(color_to_cpu(glow.color.fade(per_pass)));
            self.ctx.stroke_path(path);
        }
    }
}

impl DrawContext for CpuContext {
    fn states(&self) -> &StateStack {
        &self.stack
    }

    fn states_mut(&mut self) -> &mut StateStack {
        &mut self.stack
    }

    fn clear(&mut self) {
        self.ctx.reset();
    }

    fn fill_path(&mut self, path: &BezPath) {
        let state = self.stack.current().clone();
        let color = state.effective_fill();
        if color.a == 0 && state.effective_glow().is_none() {
            return;
        }
        let cpu_path = bezpath_to_cpu(path);
        self.ctx.set_transform(affine_to_cpu(state.transform));
        if let Some(glow) = state.effective_glow() {
            self.paint_glow(&cpu_path, 0.0, glow);
        }
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&cpu_path);
    }

    fn stroke_path(&mut self, path: &BezPath) {
        let state = self.stack.current().clone();
        let color = state.effective_stroke();
        if state.line_width <= 0.0 || (color.a == 0 && state.effective_glow().is_none()) {
            return;
        }
        let cpu_path = bezpath_to_cpu(path);
        self.ctx.set_transform(affine_to_cpu(state.transform));
        if let Some(glow) = state.effective_glow() {
            self.paint_glow(&cpu_path, state.line_width, glow);
        }
        self.ctx.set_stroke(stroke_to_cpu(&state));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.stroke_path(&cpu_path);
    }

    fn fill_text(&mut self, text: &str, origin: Point) {
        let state = self.stack.current().clone();
        let color = state.effective_fill();
        let Some(shaper) = self.text.as_mut() else {
            return;
        };
        if text.is_empty() || color.a == 0 || state.font.size <= 0.0 {
            return;
        }
        let shaped = shaper.shape(text, state.font.size as f32);
        let dx = origin.x + align_offset(state.align, shaped.width);
        let dy = origin.y - shaped.baseline;
        let tr = state.transform * Affine::translate((dx, dy));

        self.ctx.set_transform(affine_to_cpu(tr));
        self.ctx.set_paint(color_to_cpu(color));
        for line in shaped.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(shaper.font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        let font = self.stack.current().font;
        match self.text.as_mut() {
            Some(shaper) if font.size > 0.0 && !text.is_empty() => {
                shaper.shape(text, font.size as f32).width
            }
            _ => crate::draw::context::estimate_text_width(text, font),
        }
    }

    fn snapshot(&mut self) -> Option<FrameRGBA> {
        let (width, height) = self.pixels;
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Some(FrameRGBA {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

/// Creates [`CpuContext`]s, optionally sharing one font face.
#[derive(Clone, Debug, Default)]
pub struct CpuProvider {
    font: Option<Arc<Vec<u8>>>,
}

impl CpuProvider {
    /// Provider without text rasterization.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that shapes text with the given font bytes.
    pub fn with_font_bytes(bytes: Vec<u8>) -> Self {
        Self {
            font: Some(Arc::new(bytes)),
        }
    }

    /// Provider that shapes text with the font file at `path`.
    pub fn from_font_path(path: &Path) -> EngineResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            EngineError::config(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Ok(Self::with_font_bytes(bytes))
    }
}

impl SurfaceProvider for CpuProvider {
    fn create_context(
        &mut self,
        _id: &SurfaceId,
        physical: PhysicalSize,
    ) -> EngineResult<Box<dyn DrawContext>> {
        Ok(Box::new(CpuContext::new(physical, self.font.clone())?))
    }
}

fn color_to_cpu(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn stroke_to_cpu(state: &DrawState) -> vello_cpu::kurbo::Stroke {
    let stroke = vello_cpu::kurbo::Stroke::new(state.line_width);
    match state.dash {
        Some([on, off]) if on > 0.0 && off >= 0.0 => stroke.with_dashes(0.0, [on, off]),
        _ => stroke,
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
