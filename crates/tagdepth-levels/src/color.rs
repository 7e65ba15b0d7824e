//! Level colors.
//!
//! Hue advances 60° per level, so the palette repeats every six levels.
//! Saturation and lightness are fixed per call (60% / 60% by default),
//! which keeps the colors pastel.

use std::fmt;

pub const HUE_STEP: u16 = 60;
pub const HUE_CYCLE: usize = 6;
pub const DEFAULT_SATURATION: u8 = 60;
pub const DEFAULT_LIGHTNESS: u8 = 60;

/// A color as hue (degrees) plus saturation and lightness (percent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    pub fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue: hue % 360,
            saturation: saturation.min(100),
            lightness: lightness.min(100),
        }
    }

    /// 8-bit sRGB components.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let s = f64::from(self.saturation.min(100)) / 100.0;
        let l = f64::from(self.lightness.min(100)) / 100.0;
        let h = f64::from(self.hue % 360) / 60.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u8 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

        (channel(r), channel(g), channel(b))
    }

    /// `#rrggbb`
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// CSS notation, e.g. `hsl(120, 60%, 60%)`.
impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Color for a nesting level with the default saturation and lightness.
pub fn color_for_level(level: usize) -> Hsl {
    color_for_level_with(level, DEFAULT_SATURATION, DEFAULT_LIGHTNESS)
}

/// Color for a nesting level.
pub fn color_for_level_with(level: usize, saturation: u8, lightness: u8) -> Hsl {
    // level % 6 first so huge levels can't overflow.
    let hue = (level % HUE_CYCLE) as u16 * HUE_STEP;
    Hsl::new(hue, saturation, lightness)
}
