use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::error::{EngineError, EngineResult};

const LAYOUT_CACHE_CAP: usize = 512;

/// Shaped single-line run ready for glyph output.
pub(crate) struct ShapedText {
    pub(crate) layout: parley::Layout<()>,
    /// Advance width in user units.
    pub(crate) width: f64,
    /// Distance from the layout top to the first baseline.
    pub(crate) baseline: f64,
}

/// Parley-backed shaper bound to one font face.
///
/// Layouts are cached by `(text, size)`; the diagrams redraw the same labels every frame.
pub(crate) struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    cache: HashMap<(String, u32), Arc<ShapedText>>,
}

impl TextShaper {
    pub(crate) fn new(font_bytes: Arc<Vec<u8>>) -> EngineResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            EngineError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| EngineError::validation("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
            0,
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
            cache: HashMap::new(),
        })
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    pub(crate) fn shape(&mut self, text: &str, size_px: f32) -> Arc<ShapedText> {
        let key = (text.to_owned(), size_px.to_bits());
        if let Some(hit) = self.cache.get(&key) {
            return Arc::clone(hit);
        }
        if self.cache.len() >= LAYOUT_CACHE_CAP {
            self.cache.clear();
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let baseline = layout
            .lines()
            .next()
            .map(|l| f64::from(l.metrics().baseline))
            .unwrap_or(f64::from(size_px));
        let shaped = Arc::new(ShapedText {
            width: f64::from(layout.width()),
            baseline,
            layout,
        });
        self.cache.insert(key, Arc::clone(&shaped));
        shaped
    }
}
