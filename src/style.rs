//! Visual theme for the coordinate view.

use crate::render::{Color, LineKind, LineStyle, RectStyle, TextStyle};

/// Colors, stroke widths, and font sizes used by the draw passes.
///
/// The defaults transcribe a plain black-on-white look: solid black axes and
/// frame, dotted gray grid lines, a blue rubber-band rectangle with a
/// translucent yellow fill.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Axis baseline and notch stroke.
    pub axis: LineStyle,
    /// Grid helper lines through the major notches.
    pub grid: LineStyle,
    /// Outer frame stroke.
    pub frame: LineStyle,
    /// Numeric notch labels.
    pub notch_label: TextStyle,
    /// Axis name labels.
    pub axis_label: TextStyle,
    /// Scaling-mode annotation (`log10(x)` / `log10(y)`).
    pub scaling_note: TextStyle,
    /// Coordinate-system title.
    pub title: TextStyle,
    /// Zoom rubber-band rectangle.
    pub zoom_rect: RectStyle,
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            axis: LineStyle::default(),
            grid: LineStyle {
                color: Color::new(0.5, 0.5, 0.5, 1.0),
                width: 1.0,
                kind: LineKind::Dotted,
            },
            frame: LineStyle::default(),
            notch_label: TextStyle::default(),
            axis_label: TextStyle {
                size: 14.0,
                bold: true,
                ..TextStyle::default()
            },
            scaling_note: TextStyle {
                size: 14.0,
                ..TextStyle::default()
            },
            title: TextStyle {
                size: 16.0,
                bold: true,
                ..TextStyle::default()
            },
            zoom_rect: RectStyle {
                fill: Color::new(0.94, 0.9, 0.2, 0.5),
                stroke: Color::new(0.0, 0.0, 1.0, 1.0),
                stroke_width: 2.0,
            },
        }
    }
}
