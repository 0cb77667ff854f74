//! Maps reference-width-authored scene coordinates onto a surface's logical size.
//!
//! Surfaces at or above the reference width render 1:1 (never upscaled); narrower surfaces shrink
//! uniformly. Scenes are told the *virtual* size they occupy at that scale, so their layout maths
//! never needs to know the real container width.

use crate::foundation::core::{Affine, LogicalSize, Point};

/// Uniform scale plus the virtual size a scene should lay itself out in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// `min(1, logical_width / reference_width)`.
    pub scale: f64,
    /// Logical width divided by `scale`.
    pub virtual_width: f64,
    /// Logical height divided by `scale`.
    pub virtual_height: f64,
}

impl Viewport {
    /// Viewport for a surface of `logical` size, `None` when there is nothing to draw into.
    pub fn compute(logical: LogicalSize, reference_width: f64) -> Option<Self> {
        if logical.is_empty() || !reference_width.is_finite() || reference_width <= 0.0 {
            return None;
        }
        let scale = scale_for(f64::from(logical.width), reference_width);
        Some(Self {
            scale,
            virtual_width: f64::from(logical.width) / scale,
            virtual_height: f64::from(logical.height) / scale,
        })
    }

    /// Transform from virtual units to logical units.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale)
    }

    /// Logical position of a virtual point.
    pub fn to_logical(&self, p: Point) -> Point {
        self.transform() * p
    }
}

/// `min(1, width / reference_width)`.
pub fn scale_for(width: f64, reference_width: f64) -> f64 {
    (width / reference_width).min(1.0)
}
