use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }

    /// Strict `#rgb` / `#rrggbb` parser. The leading `#` is optional and hex
    /// digits are case-insensitive.
    pub fn parse_hex(hex: &str) -> Result<Self, Error> {
        let s = hex.strip_prefix('#').unwrap_or(hex);
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(hex.to_string()));
        }
        let expanded: String = match s.len() {
            3 => s.chars().flat_map(|c| [c, c]).collect(),
            6 => s.to_string(),
            _ => return Err(Error::InvalidColor(hex.to_string())),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| Error::InvalidColor(hex.to_string()))
        };
        Ok(Color(channel(0)?, channel(2)?, channel(4)?, 255))
    }

    /// Lenient parse: anything that is not a valid 3 or 6 digit hex color
    /// becomes opaque black.
    pub fn from_hex(hex: &str) -> Self {
        Self::parse_hex(hex).unwrap_or(Color::BLACK)
    }

    /// Adds `amount` to each of r, g, b, clamping to [0, 255]. Alpha is kept.
    pub fn offset(self, amount: i32) -> Self {
        let ch = |c: u8| (c as i32 + amount).clamp(0, 255) as u8;
        Color(ch(self.0), ch(self.1), ch(self.2), self.3)
    }

    /// Lowercase `#rrggbb`; alpha is dropped.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// CSS color: hex when opaque, `rgba(...)` otherwise.
    pub fn to_css(self) -> String {
        if self.3 == 255 {
            self.to_hex()
        } else {
            let a = (self.3 as f32 / 255.0 * 100.0).round() / 100.0;
            format!("rgba({},{},{},{})", self.0, self.1, self.2, a)
        }
    }
}

/// Shifts every channel of a hex color by `amount` and returns `#rrggbb`.
///
/// Malformed input degrades to `#000000` instead of failing, so callers that
/// derive shades from user-provided wall colors always get a usable value.
///
/// ```rust
/// use tvroom_core::adjust_color;
///
/// assert_eq!(adjust_color("#e6ccac", -15), "#d7bd9d");
/// assert_eq!(adjust_color("#abc", 0), "#aabbcc");
/// assert_eq!(adjust_color("not a color", 10), "#000000");
/// ```
pub fn adjust_color(color: &str, amount: i32) -> String {
    match Color::parse_hex(color) {
        Ok(c) => c.offset(amount).to_hex(),
        Err(e) => {
            log::debug!("adjust_color: {e}; falling back to black");
            "#000000".to_string()
        }
    }
}

/// Position of a gradient color stop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum StopOffset {
    Px(f32),
    Percent(f32),
}

impl StopOffset {
    pub fn to_css(self) -> String {
        match self {
            StopOffset::Px(v) => format!("{v}px"),
            StopOffset::Percent(v) => format!("{v}%"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: Color,
    pub offset: StopOffset,
}

impl ColorStop {
    pub fn px(color: Color, at: f32) -> Self {
        Self {
            color,
            offset: StopOffset::Px(at),
        }
    }
    pub fn percent(color: Color, at: f32) -> Self {
        Self {
            color,
            offset: StopOffset::Percent(at),
        }
    }
}

/// Brush for filling shapes.
///
/// Higher-level code (wall textures, screen surfaces) talks in terms of
/// `Brush` rather than raw `Color` so gradients and patterns share one path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Brush {
    /// Solid color fill
    Solid(Color),

    /// Linear gradient along `angle_deg` (CSS convention: 0 is "to top",
    /// 90 is "to right").
    Linear { angle_deg: f32, stops: Vec<ColorStop> },

    /// Radial gradient, circle centered at (`cx`, `cy`) in percent of the
    /// painted box.
    Radial { cx: f32, cy: f32, stops: Vec<ColorStop> },
}

impl From<Color> for Brush {
    fn from(c: Color) -> Self {
        Brush::Solid(c)
    }
}

impl Brush {
    pub fn to_css(&self) -> String {
        let stops = |stops: &[ColorStop]| {
            stops
                .iter()
                .map(|s| format!("{} {}", s.color.to_css(), s.offset.to_css()))
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self {
            Brush::Solid(c) => c.to_css(),
            Brush::Linear { angle_deg, stops: s } => {
                format!("linear-gradient({angle_deg}deg, {})", stops(s))
            }
            Brush::Radial { cx, cy, stops: s } => {
                format!("radial-gradient(circle at {cx}% {cy}%, {})", stops(s))
            }
        }
    }
}
