use std::path::Path;

use crate::foundation::error::{EngineError, EngineResult};

/// A rendered surface as RGBA8 pixels.
///
/// Frames produced by the CPU backend are **premultiplied alpha**; the flag keeps that explicit at
/// API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Composite over an opaque-or-not straight background, in place.
    pub fn flatten_over(&mut self, background: [u8; 4]) {
        if !self.premultiplied {
            premultiply_rgba8_in_place(&mut self.data);
            self.premultiplied = true;
        }
        let [br, bg, bb, ba] = premul_rgba8(background);
        for px in self.data.chunks_exact_mut(4) {
            let inv = 255 - u16::from(px[3]);
            let over = |src: u8, dst: u8| -> u8 {
                (u16::from(src) + ((u16::from(dst) * inv + 127) / 255)).min(255) as u8
            };
            px[0] = over(px[0], br);
            px[1] = over(px[1], bg);
            px[2] = over(px[2], bb);
            px[3] = over(px[3], ba);
        }
    }

    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    /// Encode as PNG at `path`.
    pub fn write_png(&self, path: &Path) -> EngineResult<()> {
        let rgba = self.to_straight_rgba();
        image::save_buffer_with_format(
            path,
            &rgba,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| EngineError::render(format!("write png '{}': {e}", path.display())))
    }
}

pub(crate) fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    let premul = |c: u8| -> u8 { (((u16::from(c) * a16) + 127) / 255) as u8 };
    [premul(r), premul(g), premul(b), a]
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let [r, g, b, a] = premul_rgba8([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&[r, g, b, a]);
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(px: [u8; 4], premultiplied: bool) -> FrameRGBA {
        FrameRGBA {
            width: 1,
            height: 1,
            data: px.to_vec(),
            premultiplied,
        }
    }

    #[test]
    fn unpremultiply_restores_straight_colour() {
        let f = frame([128, 64, 0, 128], true);
        assert_eq!(f.to_straight_rgba(), vec![255, 128, 0, 128]);
    }

    #[test]
    fn transparent_pixels_unpremultiply_to_zero() {
        let f = frame([0, 0, 0, 0], true);
        assert_eq!(f.to_straight_rgba(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn flatten_over_opaque_background_is_opaque() {
        let mut f = frame([0, 0, 0, 0], true);
        f.flatten_over([10, 20, 30, 255]);
        assert_eq!(f.data, vec![10, 20, 30, 255]);

        let mut f = frame([255, 0, 0, 255], true);
        f.flatten_over([10, 20, 30, 255]);
        assert_eq!(f.data, vec![255, 0, 0, 255]);
    }
}
