use crate::foundation::error::{EngineError, EngineResult};

/// Straight-alpha RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Colour with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Replace the alpha byte, the `#rrggbb` + `aa` suffix convention the diagrams use for tints.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Replace alpha with a `[0, 1]` opacity.
    pub fn with_opacity(self, opacity: f64) -> Self {
        self.with_alpha(unit_to_u8(opacity))
    }

    /// Multiply the existing alpha by `factor`.
    pub fn fade(self, factor: f64) -> Self {
        self.with_alpha(unit_to_u8(f64::from(self.a) / 255.0 * factor))
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive).
    pub fn parse_hex(s: &str) -> EngineResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> EngineResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| EngineError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(EngineError::validation("hex colour must be ascii"));
        }
        match s.len() {
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self::rgba(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
                hex_byte(&s[6..8])?,
            )),
            _ => Err(EngineError::validation(
                "hex colour must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            )),
        }
    }

    /// Premultiplied bytes.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { (((u16::from(c) * a) + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

fn unit_to_u8(x: f64) -> u8 {
    if !x.is_finite() {
        return 0;
    }
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Semantic palette shared by every diagram.
pub mod palette {
    use super::Color;

    /// Primary accent, sources and queries.
    pub const BLUE: Color = Color::rgb(0x38, 0xbd, 0xf8);
    /// Models and transformations.
    pub const PURPLE: Color = Color::rgb(0xa7, 0x8b, 0xfa);
    /// Success and outputs.
    pub const GREEN: Color = Color::rgb(0x34, 0xd3, 0x99);
    /// Secondary accent.
    pub const CYAN: Color = Color::rgb(0x22, 0xd3, 0xee);
    /// Rejected or noisy input.
    pub const RED: Color = Color::rgb(0xf8, 0x71, 0x71);
    /// Body text.
    pub const INK: Color = Color::rgb(0xe2, 0xe8, 0xf0);
    /// Labels and captions.
    pub const MUTED: Color = Color::rgb(0x94, 0xa3, 0xb8);
    /// Configuration highlights.
    pub const YELLOW: Color = Color::rgb(0xfb, 0xbf, 0x24);
    /// Chat-history accent.
    pub const PINK: Color = Color::rgb(0xf4, 0x72, 0xb6);
    /// Low-relevance items.
    pub const SLATE: Color = Color::rgb(0x64, 0x74, 0x8b);
    /// Idle panel stroke.
    pub const NAVY: Color = Color::rgb(56, 78, 135);
    /// Idle panel fill.
    pub const DEEP: Color = Color::rgb(30, 40, 70);
    /// Plain white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Plain black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
}

#[cfg(test)]
#[path = "../../tests/unit/draw/color.rs"]
mod tests;
