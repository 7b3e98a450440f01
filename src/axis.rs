//! Axis definition: scaling, device transforms, and tick placement.
//!
//! An [`Axis`] owns one dimension's data range, scaling mode, tick
//! configuration, and device-size mapping. It computes the forward and
//! inverse transforms between (scaled) axis values and integer device
//! coordinates, and the positions of major and minor notches. An axis is
//! immutable after construction; adjustments rebuild a new value from
//! modified fields.

use crate::error::AxisError;
use crate::geom::DevicePoint;
use crate::render::{RenderCommand, RenderList, TextAlign};
use crate::style::Theme;

/// Device length of a major notch in pixels.
const MAJOR_NOTCH_LEN: i32 = 8;
/// Device length of a minor notch in pixels.
const MINOR_NOTCH_LEN: i32 = 5;
/// Gap between notch end and notch label anchor.
const NOTCH_LABEL_GAP: i32 = 4;
/// Gap between axis baseline and axis name label.
const AXIS_LABEL_GAP: i32 = 28;

/// Orientation of an axis on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Device coordinate grows with the data value.
    Horizontal,
    /// Device coordinate grows opposite to the data value.
    Vertical,
}

/// Axis scale type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scaling {
    /// Linear scaling.
    #[default]
    Linear,
    /// Base-10 logarithmic scaling; axis values are log10 of the true values.
    Log10,
}

impl Scaling {
    /// Map a natural-unit value into axis space.
    ///
    /// Returns `None` for values this scale cannot represent (non-finite
    /// input, or non-positive input under [`Scaling::Log10`]).
    pub fn map_value(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Self::Linear => Some(value),
            Self::Log10 => {
                if value <= 0.0 {
                    None
                } else {
                    Some(value.log10())
                }
            }
        }
    }

    /// Invert an axis-space value back into natural units.
    pub fn invert_value(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log10 => 10_f64.powf(value),
        }
    }
}

/// Inclusive axis range in scaled values.
///
/// Under [`Scaling::Log10`] the bounds are log10 of the true values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl AxisRange {
    /// Create a new range.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether the bounds are finite and `max > min`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }

    /// Check whether a scaled value lies within the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Tick-mark configuration for a linear axis.
///
/// Ignored under [`Scaling::Log10`]: log axes always use decade majors and
/// the fixed 8-way sub-decade minor pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSpec {
    /// Scaled value the major notches are centered around.
    pub major_anchor: f64,
    /// Distance between two major notches; must be positive.
    pub major_delta: f64,
    /// Number of minor intervals within each major interval (0: none).
    pub minor_intervals: u32,
}

impl Default for TickSpec {
    fn default() -> Self {
        Self {
            major_anchor: 0.0,
            major_delta: 1.0,
            minor_intervals: 2,
        }
    }
}

/// Device-space size, border, and usable length of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceExtent {
    /// Total device size along this axis in pixels.
    pub total_size: i32,
    /// Reserved border in pixels.
    pub offset: i32,
    /// Usable axis length in pixels.
    pub length: i32,
}

impl Default for DeviceExtent {
    fn default() -> Self {
        Self {
            total_size: 600,
            offset: 50,
            length: 520,
        }
    }
}

/// One dimension of a coordinate system.
///
/// Construction validates the range and extent invariants and precomputes
/// the derived transform scalars; all queries afterwards are read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    extent: DeviceExtent,
    range: AxisRange,
    direction: Direction,
    scaling: Scaling,
    label: String,
    ticks: TickSpec,

    // derived on construction
    origin_offset: i32,
    scale_factor: f64,
}

impl Axis {
    /// Create a new axis.
    ///
    /// Fails when `range.max <= range.min` or when the extent cannot hold a
    /// positive border plus a positive axis length.
    pub fn new(
        extent: DeviceExtent,
        range: AxisRange,
        direction: Direction,
        scaling: Scaling,
        label: impl Into<String>,
        ticks: TickSpec,
    ) -> Result<Self, AxisError> {
        if !range.is_valid() {
            return Err(AxisError::EmptyRange {
                min: range.min,
                max: range.max,
            });
        }
        if extent.total_size <= 0 {
            return Err(AxisError::NonPositiveSize(extent.total_size));
        }
        if extent.offset <= 0 {
            return Err(AxisError::NonPositiveOffset(extent.offset));
        }
        if extent.length <= 0 {
            return Err(AxisError::NonPositiveLength(extent.length));
        }
        if extent.total_size < extent.offset + extent.length {
            return Err(AxisError::ExtentTooSmall {
                total_size: extent.total_size,
                offset: extent.offset,
                length: extent.length,
            });
        }

        let (origin_offset, scale_factor) = match direction {
            Direction::Horizontal => {
                (extent.offset, f64::from(extent.length) / range.span())
            }
            Direction::Vertical => (
                extent.total_size - extent.offset,
                -f64::from(extent.length) / range.span(),
            ),
        };

        Ok(Self {
            extent,
            range,
            direction,
            scaling,
            label: label.into(),
            ticks,
            origin_offset,
            scale_factor,
        })
    }

    /// Rebuild this axis with a different range.
    pub fn with_range(&self, range: AxisRange) -> Result<Self, AxisError> {
        Self::new(
            self.extent,
            range,
            self.direction,
            self.scaling,
            self.label.clone(),
            self.ticks,
        )
    }

    /// Rebuild this axis with a different device extent.
    pub fn with_extent(&self, extent: DeviceExtent) -> Result<Self, AxisError> {
        Self::new(
            extent,
            self.range,
            self.direction,
            self.scaling,
            self.label.clone(),
            self.ticks,
        )
    }

    /// Rebuild this axis with a different range and tick configuration.
    pub fn with_range_and_ticks(
        &self,
        range: AxisRange,
        ticks: TickSpec,
    ) -> Result<Self, AxisError> {
        Self::new(
            self.extent,
            range,
            self.direction,
            self.scaling,
            self.label.clone(),
            ticks,
        )
    }

    /// Rebuild this axis with a different scaling mode.
    pub fn with_scaling(&self, scaling: Scaling) -> Result<Self, AxisError> {
        Self::new(
            self.extent,
            self.range,
            self.direction,
            scaling,
            self.label.clone(),
            self.ticks,
        )
    }

    /// Access the device extent.
    pub fn extent(&self) -> DeviceExtent {
        self.extent
    }

    /// Access the scaled range.
    pub fn range(&self) -> AxisRange {
        self.range
    }

    /// Lower bound of the scaled range.
    pub fn min(&self) -> f64 {
        self.range.min
    }

    /// Upper bound of the scaled range.
    pub fn max(&self) -> f64 {
        self.range.max
    }

    /// Access the direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Access the scaling mode.
    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    /// Access the axis label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Access the tick configuration.
    pub fn ticks(&self) -> TickSpec {
        self.ticks
    }

    /// Effective spacing between major notches.
    ///
    /// One decade for log axes regardless of the configured [`TickSpec`].
    pub fn major_delta(&self) -> f64 {
        match self.scaling {
            Scaling::Linear => self.ticks.major_delta,
            Scaling::Log10 => 1.0,
        }
    }

    /// Signed device units per scaled axis unit.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Device position of the range minimum.
    pub fn device_min(&self) -> i32 {
        self.scaled_to_device(self.range.min)
    }

    /// Device position of the range maximum.
    pub fn device_max(&self) -> i32 {
        self.scaled_to_device(self.range.max)
    }

    /// Map a scaled axis value to an exact device coordinate.
    pub fn scaled_to_device(&self, value: f64) -> i32 {
        (self.scale_factor * (value - self.range.min)).round() as i32 + self.origin_offset
    }

    /// Map a natural-unit value to a device coordinate.
    ///
    /// Applies `log10` first under [`Scaling::Log10`]; returns `None` for
    /// values the scale cannot map.
    pub fn unscaled_to_device(&self, value: f64) -> Option<i32> {
        self.scaling
            .map_value(value)
            .map(|scaled| self.scaled_to_device(scaled))
    }

    /// Map a device coordinate back to a scaled axis value.
    pub fn device_to_scaled(&self, pos: i32) -> f64 {
        f64::from(pos - self.origin_offset) / self.scale_factor + self.range.min
    }

    /// Map a device coordinate back to natural units.
    ///
    /// Exponentiates under [`Scaling::Log10`].
    pub fn device_to_unscaled(&self, pos: i32) -> f64 {
        self.scaling.invert_value(self.device_to_scaled(pos))
    }

    /// Scaled positions of the major notches.
    ///
    /// Sweeps left and right from the anchor, collecting every step inside
    /// `[min - delta, max + delta]`. The one-step overshoot on each side
    /// guarantees at least two bracketing majors whenever the delta is
    /// smaller than the span, which minor placement relies on. Log axes use
    /// a fixed anchor of `log10(1) = 0` and a one-decade step.
    pub fn major_positions(&self) -> Vec<f64> {
        let (anchor, delta) = match self.scaling {
            Scaling::Linear => (self.ticks.major_anchor, self.ticks.major_delta),
            Scaling::Log10 => (0.0, 1.0),
        };
        if !anchor.is_finite() || !delta.is_finite() || delta <= 0.0 {
            return Vec::new();
        }

        let lo = self.range.min - delta;
        let hi = self.range.max + delta;
        let mut notches = Vec::new();

        let mut value = anchor;
        while value >= lo {
            if value <= hi {
                notches.push(value);
            }
            let next = value - delta;
            // guard against step underflow at large magnitudes
            if next == value {
                return notches;
            }
            value = next;
        }
        notches.reverse();

        let mut value = anchor + delta;
        while value <= hi {
            if value >= lo {
                notches.push(value);
            }
            let next = value + delta;
            if next == value {
                break;
            }
            value = next;
        }

        notches
    }

    /// Scaled positions of the minor notches between the given majors.
    ///
    /// Requires at least two major positions; returns empty otherwise. The
    /// majors themselves are excluded. Log axes emit the conventional
    /// 2x..9x sub-decade pattern (8 positions per decade pair).
    pub fn minor_positions(&self, majors: &[f64]) -> Vec<f64> {
        if majors.len() < 2 {
            return Vec::new();
        }
        let mut notches = Vec::new();
        match self.scaling {
            Scaling::Linear => {
                let intervals = self.ticks.minor_intervals;
                for pair in majors.windows(2) {
                    let step = (pair[1] - pair[0]) / f64::from(intervals.max(1));
                    for j in 1..intervals {
                        notches.push(pair[0] + f64::from(j) * step);
                    }
                }
            }
            Scaling::Log10 => {
                for pair in majors.windows(2) {
                    let mut value = pair[0];
                    let decade = 10_f64.powf(value.floor());
                    for _ in 0..8 {
                        value = (10_f64.powf(value) + decade).log10();
                        notches.push(value);
                    }
                }
            }
        }
        notches
    }

    /// Emit the axis baseline, notches, labels, and scaling annotation.
    ///
    /// `cross` is the device position on the perpendicular axis where this
    /// axis is drawn (the other axis's range-minimum position). Notches
    /// outside the visible range are skipped.
    pub fn draw(&self, list: &mut RenderList, cross: i32, theme: &Theme) {
        let majors = self.major_positions();
        let minors = self.minor_positions(&majors);

        match self.direction {
            Direction::Horizontal => {
                list.push_line(
                    DevicePoint::new(self.device_min(), cross),
                    DevicePoint::new(self.device_max(), cross),
                    theme.axis,
                );

                for &value in majors.iter().filter(|v| self.range.contains(**v)) {
                    let pos = self.scaled_to_device(value);
                    list.push_line(
                        DevicePoint::new(pos, cross),
                        DevicePoint::new(pos, cross + MAJOR_NOTCH_LEN),
                        theme.axis,
                    );
                    list.push(RenderCommand::Text {
                        position: DevicePoint::new(pos, cross + MAJOR_NOTCH_LEN + NOTCH_LABEL_GAP),
                        text: format_notch(value),
                        style: theme.notch_label,
                        align: TextAlign::Center,
                        rotated: false,
                    });
                }
                for &value in minors.iter().filter(|v| self.range.contains(**v)) {
                    let pos = self.scaled_to_device(value);
                    list.push_line(
                        DevicePoint::new(pos, cross),
                        DevicePoint::new(pos, cross + MINOR_NOTCH_LEN),
                        theme.axis,
                    );
                }

                let mid = (self.device_min() + self.device_max()) / 2;
                if !self.label.is_empty() {
                    list.push(RenderCommand::Text {
                        position: DevicePoint::new(mid, cross + AXIS_LABEL_GAP),
                        text: self.label.clone(),
                        style: theme.axis_label,
                        align: TextAlign::Center,
                        rotated: false,
                    });
                }
                if self.scaling == Scaling::Log10 {
                    list.push(RenderCommand::Text {
                        position: DevicePoint::new(self.device_max(), cross + AXIS_LABEL_GAP),
                        text: "log10(x)".to_string(),
                        style: theme.scaling_note,
                        align: TextAlign::Right,
                        rotated: false,
                    });
                }
            }
            Direction::Vertical => {
                list.push_line(
                    DevicePoint::new(cross, self.device_min()),
                    DevicePoint::new(cross, self.device_max()),
                    theme.axis,
                );

                let label_nudge = (theme.notch_label.size * 0.5) as i32;
                for &value in majors.iter().filter(|v| self.range.contains(**v)) {
                    let pos = self.scaled_to_device(value);
                    list.push_line(
                        DevicePoint::new(cross - MAJOR_NOTCH_LEN, pos),
                        DevicePoint::new(cross, pos),
                        theme.axis,
                    );
                    list.push(RenderCommand::Text {
                        position: DevicePoint::new(
                            cross - MAJOR_NOTCH_LEN - NOTCH_LABEL_GAP,
                            pos - label_nudge,
                        ),
                        text: format_notch(value),
                        style: theme.notch_label,
                        align: TextAlign::Right,
                        rotated: false,
                    });
                }
                for &value in minors.iter().filter(|v| self.range.contains(**v)) {
                    let pos = self.scaled_to_device(value);
                    list.push_line(
                        DevicePoint::new(cross - MINOR_NOTCH_LEN, pos),
                        DevicePoint::new(cross, pos),
                        theme.axis,
                    );
                }

                let mid = (self.device_min() + self.device_max()) / 2;
                if !self.label.is_empty() {
                    list.push(RenderCommand::Text {
                        position: DevicePoint::new(cross - AXIS_LABEL_GAP - MINOR_NOTCH_LEN, mid),
                        text: self.label.clone(),
                        style: theme.axis_label,
                        align: TextAlign::Center,
                        rotated: true,
                    });
                }
                if self.scaling == Scaling::Log10 {
                    list.push(RenderCommand::Text {
                        position: DevicePoint::new(
                            cross - AXIS_LABEL_GAP - MINOR_NOTCH_LEN,
                            self.device_max(),
                        ),
                        text: "log10(y)".to_string(),
                        style: theme.scaling_note,
                        align: TextAlign::Right,
                        rotated: true,
                    });
                }
            }
        }
    }
}

/// Format a notch value for display, trimming float noise.
fn format_notch(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let abs = value.abs();
    if abs >= 1e6 || abs < 1e-4 {
        return format!("{value:e}");
    }
    let mut text = format!("{value:.6}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal(range: AxisRange, ticks: TickSpec) -> Axis {
        Axis::new(
            DeviceExtent::default(),
            range,
            Direction::Horizontal,
            Scaling::Linear,
            "x",
            ticks,
        )
        .expect("valid axis")
    }

    #[test]
    fn construction_rejects_empty_range() {
        let result = Axis::new(
            DeviceExtent::default(),
            AxisRange::new(2.0, 2.0),
            Direction::Horizontal,
            Scaling::Linear,
            "x",
            TickSpec::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            AxisError::EmptyRange { min: 2.0, max: 2.0 }
        );
    }

    #[test]
    fn construction_rejects_small_extent() {
        let extent = DeviceExtent {
            total_size: 100,
            offset: 50,
            length: 80,
        };
        let result = Axis::new(
            extent,
            AxisRange::new(0.0, 1.0),
            Direction::Horizontal,
            Scaling::Linear,
            "x",
            TickSpec::default(),
        );
        assert!(matches!(result, Err(AxisError::ExtentTooSmall { .. })));
    }

    #[test]
    fn horizontal_endpoints_map_to_extent() {
        let axis = horizontal(AxisRange::new(0.0, 10.0), TickSpec::default());
        assert_eq!(axis.device_min(), 50);
        assert_eq!(axis.device_max(), 570);
    }

    #[test]
    fn vertical_direction_inverts_device_growth() {
        let axis = Axis::new(
            DeviceExtent::default(),
            AxisRange::new(0.0, 10.0),
            Direction::Vertical,
            Scaling::Linear,
            "y",
            TickSpec::default(),
        )
        .expect("valid axis");
        assert_eq!(axis.device_min(), 550);
        assert_eq!(axis.device_max(), 30);
        assert!(axis.scale_factor() < 0.0);
    }

    #[test]
    fn log_scale_rejects_non_positive() {
        let scale = Scaling::Log10;
        assert!(scale.map_value(0.0).is_none());
        assert!(scale.map_value(-1.0).is_none());
        assert!(scale.map_value(1.0).is_some());
    }

    #[test]
    fn unscaled_roundtrip_on_log_axis() {
        let axis = Axis::new(
            DeviceExtent::default(),
            AxisRange::new(-2.0, 2.0),
            Direction::Horizontal,
            Scaling::Log10,
            "x",
            TickSpec::default(),
        )
        .expect("valid axis");
        let pos = axis.unscaled_to_device(100.0).expect("mappable value");
        let back = axis.device_to_unscaled(pos);
        assert!((back - 100.0).abs() / 100.0 < 0.02);
        assert!(axis.unscaled_to_device(-1.0).is_none());
    }

    #[test]
    fn major_positions_overshoot_each_side() {
        let axis = horizontal(
            AxisRange::new(0.0, 10.0),
            TickSpec {
                major_anchor: 0.0,
                major_delta: 1.0,
                minor_intervals: 2,
            },
        );
        let majors = axis.major_positions();
        let expected: Vec<f64> = (-1..=11).map(f64::from).collect();
        assert_eq!(majors, expected);
    }

    #[test]
    fn major_positions_with_anchor_outside_range() {
        let axis = horizontal(
            AxisRange::new(10.0, 14.0),
            TickSpec {
                major_anchor: 0.0,
                major_delta: 2.0,
                minor_intervals: 2,
            },
        );
        let majors = axis.major_positions();
        assert_eq!(majors, vec![8.0, 10.0, 12.0, 14.0, 16.0]);
    }

    #[test]
    fn log_axis_ignores_tick_spec() {
        let axis = Axis::new(
            DeviceExtent::default(),
            AxisRange::new(-2.0, 2.0),
            Direction::Horizontal,
            Scaling::Log10,
            "x",
            TickSpec {
                major_anchor: 0.7,
                major_delta: 0.25,
                minor_intervals: 5,
            },
        )
        .expect("valid axis");
        let majors = axis.major_positions();
        assert_eq!(majors, vec![-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn minor_positions_need_two_majors() {
        let axis = horizontal(AxisRange::new(0.0, 10.0), TickSpec::default());
        assert!(axis.minor_positions(&[]).is_empty());
        assert!(axis.minor_positions(&[1.0]).is_empty());
    }

    #[test]
    fn minor_positions_subdivide_interior_only() {
        let axis = horizontal(
            AxisRange::new(0.0, 10.0),
            TickSpec {
                major_anchor: 0.0,
                major_delta: 1.0,
                minor_intervals: 4,
            },
        );
        let minors = axis.minor_positions(&[0.0, 1.0]);
        assert_eq!(minors, vec![0.25, 0.5, 0.75]);
    }

    #[test]
    fn log_minor_positions_follow_sub_decade_pattern() {
        let axis = Axis::new(
            DeviceExtent::default(),
            AxisRange::new(0.0, 2.0),
            Direction::Horizontal,
            Scaling::Log10,
            "x",
            TickSpec::default(),
        )
        .expect("valid axis");
        let minors = axis.minor_positions(&[0.0, 1.0]);
        assert_eq!(minors.len(), 8);
        for (index, value) in minors.iter().enumerate() {
            let expected = (index as f64 + 2.0).log10();
            assert!((value - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn format_notch_trims_accumulated_noise() {
        assert_eq!(format_notch(0.30000000000000004), "0.3");
        assert_eq!(format_notch(-2.0), "-2");
        assert_eq!(format_notch(0.0), "0");
    }

    #[test]
    fn draw_skips_overshoot_notches() {
        let axis = horizontal(AxisRange::new(0.0, 2.0), TickSpec::default());
        let mut list = RenderList::new();
        axis.draw(&mut list, 550, &Theme::default());
        let labels: Vec<&str> = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(labels.contains(&"0"));
        assert!(labels.contains(&"2"));
        assert!(!labels.contains(&"-1"));
        assert!(!labels.contains(&"3"));
    }
}
