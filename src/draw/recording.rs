use crate::draw::color::Color;
use crate::draw::context::{DrawContext, FontSpec, Glow, StateStack, TextAlign};
use crate::foundation::core::{Affine, BezPath, PhysicalSize, Point};

/// One resolved draw call: geometry plus the state in effect when it was issued.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Surface wiped.
    Clear,
    /// Filled path.
    Fill {
        /// Geometry in user units.
        path: BezPath,
        /// User-to-device transform.
        transform: Affine,
        /// Paint with global alpha applied.
        color: Color,
        /// Halo drawn beneath.
        glow: Option<Glow>,
    },
    /// Stroked path.
    Stroke {
        /// Geometry in user units.
        path: BezPath,
        /// User-to-device transform.
        transform: Affine,
        /// Paint with global alpha applied.
        color: Color,
        /// Stroke width in user units.
        width: f64,
        /// Dash pattern.
        dash: Option<[f64; 2]>,
        /// Halo drawn beneath.
        glow: Option<Glow>,
    },
    /// Text run anchored at a baseline point.
    Text {
        /// The run.
        text: String,
        /// Baseline anchor in user units.
        origin: Point,
        /// User-to-device transform.
        transform: Affine,
        /// Paint with global alpha applied.
        color: Color,
        /// Font in effect.
        font: FontSpec,
        /// Alignment in effect.
        align: TextAlign,
    },
}

impl DrawCommand {
    /// Transform the command was issued under.
    pub fn transform(&self) -> Option<Affine> {
        match self {
            Self::Clear => None,
            Self::Fill { transform, .. }
            | Self::Stroke { transform, .. }
            | Self::Text { transform, .. } => Some(*transform),
        }
    }
}

/// Display-list backend. `clear` drops the previous picture so the list always describes the
/// current frame only.
#[derive(Clone, Debug, Default)]
pub struct RecordingContext {
    stack: StateStack,
    commands: Vec<DrawCommand>,
    size: PhysicalSize,
}

impl RecordingContext {
    /// Empty recording for a backing store of `size`.
    pub fn new(size: PhysicalSize) -> Self {
        Self {
            stack: StateStack::default(),
            commands: Vec::new(),
            size,
        }
    }

    /// Backing store size this context stands in for.
    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    /// Commands issued since the last `clear`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// `true` when nothing but clears was issued.
    pub fn is_blank(&self) -> bool {
        self.commands
            .iter()
            .all(|c| matches!(c, DrawCommand::Clear))
    }

    /// Text runs in issue order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawContext for RecordingContext {
    fn states(&self) -> &StateStack {
        &self.stack
    }

    fn states_mut(&mut self) -> &mut StateStack {
        &mut self.stack
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_path(&mut self, path: &BezPath) {
        let s = self.stack.current();
        let cmd = DrawCommand::Fill {
            path: path.clone(),
            transform: s.transform,
            color: s.effective_fill(),
            glow: s.effective_glow(),
        };
        self.commands.push(cmd);
    }

    fn stroke_path(&mut self, path: &BezPath) {
        let s = self.stack.current();
        let cmd = DrawCommand::Stroke {
            path: path.clone(),
            transform: s.transform,
            color: s.effective_stroke(),
            width: s.line_width,
            dash: s.dash,
            glow: s.effective_glow(),
        };
        self.commands.push(cmd);
    }

    fn fill_text(&mut self, text: &str, origin: Point) {
        if text.is_empty() {
            return;
        }
        let s = self.stack.current();
        let cmd = DrawCommand::Text {
            text: text.to_owned(),
            origin,
            transform: s.transform,
            color: s.effective_fill(),
            font: s.font,
            align: s.align,
        };
        self.commands.push(cmd);
    }

    fn as_recording(&self) -> Option<&RecordingContext> {
        Some(self)
    }
}
