// Imports
use serde::Deserialize;

/// A rgba color.
///
/// Serializes to and from a css hex string (`#rrggbb`, or `#rrggbbaa` for translucent colors),
/// which is the representation persisted in map records.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Color {
    /// Red, ranging [0.0, 1.0].
    pub r: f64,
    /// Green, ranging [0.0, 1.0].
    pub g: f64,
    /// Blue, ranging [0.0, 1.0].
    pub b: f64,
    /// Alpha, ranging [0.0, 1.0].
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    /// Transparent color with r,g,b set to 0.0.
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Black color.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// White color.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// A new color from rgba values.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Approximate equality.
    pub fn approx_eq(self, other: Self) -> bool {
        approx::relative_eq!(self.r, other.r)
            && approx::relative_eq!(self.g, other.g)
            && approx::relative_eq!(self.b, other.b)
            && approx::relative_eq!(self.a, other.a)
    }

    /// The luma value, ranging [0.0 - 1.0].
    ///
    /// see: <https://en.wikipedia.org/wiki/Luma_(video)>
    pub fn luma(&self) -> f64 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// Convert to a css hex string in the style: `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_css_hex(self) -> String {
        let (r, g, b, a) = (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        );

        if a == u8::MAX {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Parse from a css hex string in the style: `#rrggbb` or `#rrggbbaa`.
    pub fn from_css_hex(s: &str) -> anyhow::Result<Self> {
        let hex = s.trim().trim_start_matches('#');

        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(anyhow::anyhow!(
                "Creating Color from css hex string failed, invalid format in '{s}'"
            ));
        }

        let parse_channel = |range: std::ops::Range<usize>| -> anyhow::Result<f64> {
            let byte = u8::from_str_radix(&hex[range], 16).map_err(|e| {
                anyhow::anyhow!("Creating Color from css hex string '{s}' failed, Err: {e:?}")
            })?;
            Ok(f64::from(byte) / 255.0)
        };

        Ok(Self {
            r: parse_channel(0..2)?,
            g: parse_channel(2..4)?,
            b: parse_channel(4..6)?,
            a: if hex.len() == 8 {
                parse_channel(6..8)?
            } else {
                1.0
            },
        })
    }
}

impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_css_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_css_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self {
            r: f64::from((value >> 24) & 0xff) / 255.0,
            g: f64::from((value >> 16) & 0xff) / 255.0,
            b: f64::from((value >> 8) & 0xff) / 255.0,
            a: f64::from(value & 0xff) / 255.0,
        }
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        ((((color.r * 255.0).round() as u32) & 0xff) << 24)
            | ((((color.g * 255.0).round() as u32) & 0xff) << 16)
            | ((((color.b * 255.0).round() as u32) & 0xff) << 8)
            | (((color.a * 255.0).round() as u32) & 0xff)
    }
}

/// Editor swatch red (`#ef4444`).
pub const SWATCH_RED: Color = Color {
    r: 0xef as f64 / 255.0,
    g: 0x44 as f64 / 255.0,
    b: 0x44 as f64 / 255.0,
    a: 1.0,
};

/// Editor swatch orange (`#f97316`).
pub const SWATCH_ORANGE: Color = Color {
    r: 0xf9 as f64 / 255.0,
    g: 0x73 as f64 / 255.0,
    b: 0x16 as f64 / 255.0,
    a: 1.0,
};

/// Editor swatch amber (`#eab308`).
pub const SWATCH_AMBER: Color = Color {
    r: 0xea as f64 / 255.0,
    g: 0xb3 as f64 / 255.0,
    b: 0x08 as f64 / 255.0,
    a: 1.0,
};

/// Editor swatch green (`#22c55e`).
pub const SWATCH_GREEN: Color = Color {
    r: 0x22 as f64 / 255.0,
    g: 0xc5 as f64 / 255.0,
    b: 0x5e as f64 / 255.0,
    a: 1.0,
};

/// Editor swatch blue (`#3b82f6`). The default color for newly placed markers.
pub const SWATCH_BLUE: Color = Color {
    r: 0x3b as f64 / 255.0,
    g: 0x82 as f64 / 255.0,
    b: 0xf6 as f64 / 255.0,
    a: 1.0,
};

/// Editor swatch purple (`#a855f7`).
pub const SWATCH_PURPLE: Color = Color {
    r: 0xa8 as f64 / 255.0,
    g: 0x55 as f64 / 255.0,
    b: 0xf7 as f64 / 255.0,
    a: 1.0,
};

/// Editor swatch pink (`#ec4899`).
pub const SWATCH_PINK: Color = Color {
    r: 0xec as f64 / 255.0,
    g: 0x48 as f64 / 255.0,
    b: 0x99 as f64 / 255.0,
    a: 1.0,
};

/// The fixed swatch palette offered by the inline item editor.
pub const SWATCHES: [Color; 8] = [
    SWATCH_RED,
    SWATCH_ORANGE,
    SWATCH_AMBER,
    SWATCH_GREEN,
    SWATCH_BLUE,
    SWATCH_PURPLE,
    SWATCH_PINK,
    Color::BLACK,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_hex_roundtrip() {
        for swatch in SWATCHES {
            let parsed = Color::from_css_hex(&swatch.to_css_hex()).unwrap();
            assert!(swatch.approx_eq(parsed));
        }
    }

    #[test]
    fn css_hex_with_alpha() {
        let color = Color::from_css_hex("#e6eef6ff").unwrap();
        assert!(approx::relative_eq!(color.a, 1.0));
        assert_eq!(color.to_css_hex(), "#e6eef6");

        let translucent = Color::from_css_hex("#00000080").unwrap();
        assert!(translucent.a < 0.51 && translucent.a > 0.49);
        assert_eq!(translucent.to_css_hex(), "#00000080");
    }

    #[test]
    fn css_hex_invalid() {
        assert!(Color::from_css_hex("#abcd").is_err());
        assert!(Color::from_css_hex("#zzzzzz").is_err());
        assert!(Color::from_css_hex("").is_err());
    }
}
