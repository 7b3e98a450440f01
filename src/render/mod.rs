//! Rendering primitives for the drawing-surface contract.
//!
//! These types are backend-agnostic: the coordinate view describes what to
//! draw as a [`RenderList`] of [`RenderCommand`]s, and the host's drawing
//! surface replays them with whatever painter it owns. Text measurement and
//! layout are the surface's concern; text commands carry an alignment hint
//! relative to their anchor position instead of pre-measured extents.

use crate::geom::{DevicePoint, DeviceRect};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

/// Line stroke pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineKind {
    /// Continuous stroke.
    #[default]
    Solid,
    /// Dotted stroke, used for grid helper lines.
    Dotted,
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    /// Stroke pattern.
    pub kind: LineKind,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            kind: LineKind::Solid,
        }
    }
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f32,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            fill: Color::TRANSPARENT,
            stroke: Color::BLACK,
            stroke_width: 1.0,
        }
    }
}

/// Horizontal alignment of a text command relative to its anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Anchor marks the left edge.
    #[default]
    Left,
    /// Anchor marks the horizontal center.
    Center,
    /// Anchor marks the right edge.
    Right,
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Bold weight hint.
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
            bold: false,
        }
    }
}

/// A line segment in device space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment {
    /// Segment start.
    pub start: DevicePoint,
    /// Segment end.
    pub end: DevicePoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: DevicePoint, end: DevicePoint) -> Self {
        Self { start, end }
    }
}

/// A single draw instruction for the host surface.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(DeviceRect),
    /// End clipping.
    ClipEnd,
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw a circle outline.
    Circle {
        /// Circle center.
        center: DevicePoint,
        /// Radius in pixels.
        radius: i32,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: DeviceRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Draw text.
    ///
    /// The anchor position marks the top of the text line; [`TextAlign`]
    /// selects which horizontal edge it pins. `rotated` requests a
    /// quarter-turn counter-clockwise around the anchor (vertical axis
    /// labels).
    Text {
        /// Anchor position.
        position: DevicePoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
        /// Horizontal alignment relative to the anchor.
        align: TextAlign,
        /// Quarter-turn rotation around the anchor.
        rotated: bool,
    },
}

/// Aggregated render commands.
#[derive(Debug, Default, Clone)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Push a single line segment with the given style.
    pub fn push_line(&mut self, start: DevicePoint, end: DevicePoint, style: LineStyle) {
        self.commands.push(RenderCommand::LineSegments {
            segments: vec![LineSegment::new(start, end)],
            style,
        });
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Drop all recorded commands, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_line_records_one_segment() {
        let mut list = RenderList::new();
        list.push_line(
            DevicePoint::new(0, 0),
            DevicePoint::new(5, 5),
            LineStyle::default(),
        );
        assert_eq!(list.commands().len(), 1);
        match &list.commands()[0] {
            RenderCommand::LineSegments { segments, .. } => assert_eq!(segments.len(), 1),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn clear_keeps_list_usable() {
        let mut list = RenderList::new();
        list.push(RenderCommand::ClipEnd);
        list.clear();
        assert!(list.commands().is_empty());
        list.push(RenderCommand::ClipEnd);
        assert_eq!(list.commands().len(), 1);
    }
}
