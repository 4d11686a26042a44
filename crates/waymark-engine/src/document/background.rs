// Imports
use waymark_compose::Color;

/// The background of the canvas underneath the viewport, for the blank-grid map base.
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub color: Color,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            color: Self::COLOR_DEFAULT,
        }
    }
}

impl Background {
    /// The default canvas background (`#fafafa`).
    pub const COLOR_DEFAULT: Color = Color {
        r: 0xfa as f64 / 255.0,
        g: 0xfa as f64 / 255.0,
        b: 0xfa as f64 / 255.0,
        a: 1.0,
    };

    /// The canvas background swatches offered by the toolbar.
    pub const CANVAS_COLORS: [Color; 3] = [
        // #18181b
        Color {
            r: 0x18 as f64 / 255.0,
            g: 0x18 as f64 / 255.0,
            b: 0x1b as f64 / 255.0,
            a: 1.0,
        },
        // #e6eef6
        Color {
            r: 0xe6 as f64 / 255.0,
            g: 0xee as f64 / 255.0,
            b: 0xf6 as f64 / 255.0,
            a: 1.0,
        },
        // #d8eaf7
        Color {
            r: 0xd8 as f64 / 255.0,
            g: 0xea as f64 / 255.0,
            b: 0xf7 as f64 / 255.0,
            a: 1.0,
        },
    ];
}
