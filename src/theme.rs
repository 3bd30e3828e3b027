use resvg::tiny_skia::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Straight (non-premultiplied) RGBA colour, written as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn to_color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::opaque(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::parse(&value).ok_or_else(|| format!("invalid colour '{value}', expected #RRGGBB or #RRGGBBAA"))
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Rgba,
    pub wall: Rgba,
    pub floor: Rgba,
    pub segment: Rgba,
    pub path: Rgba,
    pub predicted_path: Rgba,
}

impl Theme {
    pub fn valetudo_default() -> Self {
        Self {
            background: Rgba::new(0, 0, 0, 0),
            wall: Rgba::opaque(0, 0, 0),
            floor: Rgba::opaque(200, 200, 200),
            segment: Rgba::opaque(128, 128, 128),
            path: Rgba::opaque(100, 100, 100),
            predicted_path: Rgba::new(100, 100, 100, 100),
        }
    }

    /// Same palette on an opaque white backdrop, for viewers without alpha.
    pub fn light() -> Self {
        Self {
            background: Rgba::opaque(255, 255, 255),
            ..Self::valetudo_default()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::valetudo_default()
    }
}
