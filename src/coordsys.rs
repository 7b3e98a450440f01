//! Coordinate system: an axis pair with range-adjustment heuristics.
//!
//! A [`Coordsys`] pairs a horizontal and a vertical [`Axis`] with a title.
//! Adjustment operations (resize, pan, zoom, wheel zoom) return a new value
//! instead of mutating in place; the interaction controller snapshots the
//! previous value for undo with a plain clone.

use crate::axis::{Axis, AxisRange, TickSpec};
use crate::error::AxisError;
use crate::geom::{DevicePoint, DeviceRect};
use crate::render::{LineSegment, RenderCommand, RenderList, TextAlign};
use crate::style::Theme;

/// Gap between the top frame edge and the title anchor.
const TITLE_GAP: i32 = 24;

/// Rescale bands for [`rescaled_delta`]: the zoom factor's upper band edge
/// paired with the divisor applied to the old delta.
const DELTA_LADDER: [(f64, f64); 10] = [
    (3.0, 2.0),
    (4.5, 4.0),
    (7.0, 5.0),
    (9.0, 8.0),
    (15.0, 10.0),
    (30.0, 20.0),
    (45.0, 40.0),
    (70.0, 50.0),
    (90.0, 80.0),
    (150.0, 100.0),
];

/// Divisor beyond the last ladder band.
const DELTA_LADDER_TOP: f64 = 200.0;

/// A 2D Cartesian coordinate system.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordsys {
    x: Axis,
    y: Axis,
    title: String,
    x_target_ratio: f64,
    y_target_ratio: f64,
}

impl Coordsys {
    /// Pair two axes under a title.
    ///
    /// Captures each axis's tick-density ratio `span / major_delta` as the
    /// target that wheel-zoom rescaling stays anchored to, no matter how
    /// many zoom steps have been applied since.
    pub fn new(x: Axis, y: Axis, title: impl Into<String>) -> Self {
        let x_target_ratio = x.range().span() / x.major_delta();
        let y_target_ratio = y.range().span() / y.major_delta();
        Self {
            x,
            y,
            title: title.into(),
            x_target_ratio,
            y_target_ratio,
        }
    }

    /// Access the horizontal axis.
    pub fn x(&self) -> &Axis {
        &self.x
    }

    /// Access the vertical axis.
    pub fn y(&self) -> &Axis {
        &self.y
    }

    /// Access the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Tick-density target captured at construction for the x axis.
    pub fn x_target_ratio(&self) -> f64 {
        self.x_target_ratio
    }

    /// Tick-density target captured at construction for the y axis.
    pub fn y_target_ratio(&self) -> f64 {
        self.y_target_ratio
    }

    /// Device rectangle of the data area.
    pub fn plot_rect(&self) -> DeviceRect {
        DeviceRect::from_corners(
            DevicePoint::new(self.x.device_min(), self.y.device_max()),
            DevicePoint::new(self.x.device_max(), self.y.device_min()),
        )
    }

    /// Rebuild for a resized device surface.
    ///
    /// An axis whose total device size changed absorbs the size delta into
    /// its usable length; the border offset and the data ranges stay fixed,
    /// so a resize changes pixels-per-unit, not the visible window.
    pub fn resized_to(&self, new_width: i32, new_height: i32) -> Result<Self, AxisError> {
        let mut next = self.clone();
        if new_width != self.x.extent().total_size {
            let mut extent = self.x.extent();
            extent.length += new_width - extent.total_size;
            extent.total_size = new_width;
            next.x = self.x.with_extent(extent)?;
        }
        if new_height != self.y.extent().total_size {
            let mut extent = self.y.extent();
            extent.length += new_height - extent.total_size;
            extent.total_size = new_height;
            next.y = self.y.with_extent(extent)?;
        }
        Ok(next)
    }

    /// Rebuild with both ranges shifted against the drag direction.
    ///
    /// A zero delta leaves the corresponding axis untouched; `(0, 0)` is an
    /// identity returning a bit-identical clone.
    pub fn panned_by(&self, dx: f64, dy: f64) -> Result<Self, AxisError> {
        let mut next = self.clone();
        if dx != 0.0 {
            let range = self.x.range();
            next.x = self
                .x
                .with_range(AxisRange::new(range.min - dx, range.max - dx))?;
        }
        if dy != 0.0 {
            let range = self.y.range();
            next.y = self
                .y
                .with_range(AxisRange::new(range.min - dy, range.max - dy))?;
        }
        Ok(next)
    }

    /// Rebuild with new bounds from a rectangle zoom.
    ///
    /// Each axis whose bounds actually change gets its major delta re-picked
    /// through [`rescaled_delta`] before the rebuild.
    pub fn zoomed_to(&self, x_range: AxisRange, y_range: AxisRange) -> Result<Self, AxisError> {
        let mut next = self.clone();
        if x_range != self.x.range() {
            let ticks = TickSpec {
                major_delta: rescaled_delta(self.x.range(), self.x.ticks().major_delta, x_range),
                ..self.x.ticks()
            };
            next.x = self.x.with_range_and_ticks(x_range, ticks)?;
        }
        if y_range != self.y.range() {
            let ticks = TickSpec {
                major_delta: rescaled_delta(self.y.range(), self.y.ticks().major_delta, y_range),
                ..self.y.ticks()
            };
            next.y = self.y.with_range_and_ticks(y_range, ticks)?;
        }
        Ok(next)
    }

    /// Rebuild with new bounds from an incremental wheel zoom.
    ///
    /// Uses [`wheel_rescaled_delta`] against the construction-time target
    /// ratios, so a long wheel gesture cannot drift the tick density.
    pub fn wheel_zoomed_to(
        &self,
        x_range: AxisRange,
        y_range: AxisRange,
    ) -> Result<Self, AxisError> {
        let mut next = self.clone();
        if x_range != self.x.range() {
            let ticks = TickSpec {
                major_delta: wheel_rescaled_delta(
                    x_range,
                    self.x.ticks().major_delta,
                    self.x_target_ratio,
                ),
                ..self.x.ticks()
            };
            next.x = self.x.with_range_and_ticks(x_range, ticks)?;
        }
        if y_range != self.y.range() {
            let ticks = TickSpec {
                major_delta: wheel_rescaled_delta(
                    y_range,
                    self.y.ticks().major_delta,
                    self.y_target_ratio,
                ),
                ..self.y.ticks()
            };
            next.y = self.y.with_range_and_ticks(y_range, ticks)?;
        }
        Ok(next)
    }

    /// Emit grid, axes, frame, and title, then clip to the data area.
    ///
    /// The trailing clip command bounds everything drawn afterwards (the
    /// geometry model) to the visible data rectangle; the caller closes it
    /// with [`RenderCommand::ClipEnd`].
    pub fn draw(&self, list: &mut RenderList, theme: &Theme) {
        let x_range = self.x.range();
        let y_range = self.y.range();

        let mut grid = Vec::new();
        for value in self.x.major_positions() {
            if x_range.contains(value) {
                let pos = self.x.scaled_to_device(value);
                grid.push(LineSegment::new(
                    DevicePoint::new(pos, self.y.device_max()),
                    DevicePoint::new(pos, self.y.device_min()),
                ));
            }
        }
        for value in self.y.major_positions() {
            if y_range.contains(value) {
                let pos = self.y.scaled_to_device(value);
                grid.push(LineSegment::new(
                    DevicePoint::new(self.x.device_min(), pos),
                    DevicePoint::new(self.x.device_max(), pos),
                ));
            }
        }
        if !grid.is_empty() {
            list.push(RenderCommand::LineSegments {
                segments: grid,
                style: theme.grid,
            });
        }

        self.x.draw(list, self.y.device_min(), theme);
        self.y.draw(list, self.x.device_min(), theme);

        // outer frame on the two edges the axes do not cover
        list.push_line(
            DevicePoint::new(self.x.device_min(), self.y.device_max()),
            DevicePoint::new(self.x.device_max(), self.y.device_max()),
            theme.frame,
        );
        list.push_line(
            DevicePoint::new(self.x.device_max(), self.y.device_min()),
            DevicePoint::new(self.x.device_max(), self.y.device_max()),
            theme.frame,
        );

        if !self.title.is_empty() {
            list.push(RenderCommand::Text {
                position: DevicePoint::new(
                    (self.x.device_min() + self.x.device_max()) / 2,
                    self.y.device_max() - TITLE_GAP,
                ),
                text: self.title.clone(),
                style: theme.title,
                align: TextAlign::Center,
                rotated: false,
            });
        }

        list.push(RenderCommand::ClipRect(self.plot_rect()));
    }
}

/// Pick a major delta for a rectangle zoom from `old` bounds to `new`.
///
/// Keeps the old delta while the resulting tick count stays reasonable
/// (between 3 and 9) or the zoom factor is trivial (`<= 1.2`), so small
/// zooms never jitter the grid. Otherwise divides the old delta by the
/// ladder divisor for the band the zoom factor falls into, yielding round
/// 1/2/4/5/8-style spacings at any magnification.
pub(crate) fn rescaled_delta(old: AxisRange, old_delta: f64, new: AxisRange) -> f64 {
    if !old_delta.is_finite() || old_delta <= 0.0 {
        return old_delta;
    }
    let new_span = new.span();
    if new_span <= 0.0 {
        return old_delta;
    }
    let new_n = (new_span / old_delta).floor();
    let fact = old.span() / new_span;
    if (new_n > 2.0 && new_n < 10.0) || fact <= 1.2 {
        return old_delta;
    }
    let divisor = DELTA_LADDER
        .iter()
        .find(|(edge, _)| fact <= *edge)
        .map_or(DELTA_LADDER_TOP, |(_, divisor)| *divisor);
    old_delta / divisor
}

/// Pick a major delta for an incremental wheel zoom.
///
/// Hysteresis variant of [`rescaled_delta`]: the delta doubles or halves
/// only when the density drifts a full octave away from the target ratio,
/// so per-tick wheel events cannot oscillate the grid.
pub(crate) fn wheel_rescaled_delta(new: AxisRange, delta: f64, target_ratio: f64) -> f64 {
    if !delta.is_finite() || delta <= 0.0 || !target_ratio.is_finite() || target_ratio <= 0.0 {
        return delta;
    }
    let new_ratio = new.span() / delta;
    if new_ratio >= 2.0 * target_ratio {
        delta * 2.0
    } else if new_ratio <= 0.5 * target_ratio {
        delta / 2.0
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{DeviceExtent, Direction, Scaling};

    fn axis(direction: Direction, min: f64, max: f64, delta: f64) -> Axis {
        Axis::new(
            DeviceExtent::default(),
            AxisRange::new(min, max),
            direction,
            Scaling::Linear,
            "",
            TickSpec {
                major_anchor: 0.0,
                major_delta: delta,
                minor_intervals: 2,
            },
        )
        .expect("valid axis")
    }

    fn coordsys() -> Coordsys {
        Coordsys::new(
            axis(Direction::Horizontal, 0.0, 10.0, 1.0),
            axis(Direction::Vertical, 0.0, 10.0, 1.0),
            "test",
        )
    }

    #[test]
    fn construction_captures_target_ratios() {
        let cs = Coordsys::new(
            axis(Direction::Horizontal, 0.0, 10.0, 2.0),
            axis(Direction::Vertical, -5.0, 5.0, 1.0),
            "",
        );
        assert_eq!(cs.x_target_ratio(), 5.0);
        assert_eq!(cs.y_target_ratio(), 10.0);
    }

    #[test]
    fn resize_changes_length_not_range() {
        let cs = coordsys();
        let resized = cs.resized_to(800, 600).expect("valid resize");
        assert_eq!(resized.x().extent().total_size, 800);
        assert_eq!(resized.x().extent().length, 720);
        assert_eq!(resized.x().extent().offset, 50);
        assert_eq!(resized.x().range(), cs.x().range());
        // unchanged axis is not rebuilt
        assert_eq!(resized.y(), cs.y());
    }

    #[test]
    fn pan_shifts_both_bounds_against_drag() {
        let cs = coordsys();
        let panned = cs.panned_by(2.0, -1.0).expect("valid pan");
        assert_eq!(panned.x().range(), AxisRange::new(-2.0, 8.0));
        assert_eq!(panned.y().range(), AxisRange::new(1.0, 11.0));
    }

    #[test]
    fn pan_identity_is_bit_identical() {
        let cs = coordsys();
        let panned = cs.panned_by(0.0, 0.0).expect("valid pan");
        assert_eq!(panned, cs);
    }

    #[test]
    fn zoom_keeps_delta_on_small_change() {
        let cs = coordsys();
        let zoomed = cs
            .zoomed_to(AxisRange::new(0.0, 9.0), cs.y().range())
            .expect("valid zoom");
        assert_eq!(zoomed.x().ticks().major_delta, 1.0);
    }

    #[test]
    fn zoom_rescales_delta_through_ladder() {
        let cs = coordsys();
        let zoomed = cs
            .zoomed_to(AxisRange::new(0.0, 1.0), cs.y().range())
            .expect("valid zoom");
        assert_eq!(zoomed.x().ticks().major_delta, 0.1);
    }

    #[test]
    fn rescaled_delta_band_edges() {
        let old = AxisRange::new(0.0, 100.0);
        let delta = 10.0;
        // fact = 50, new_n = 0 -> band (45, 70] -> divisor 50
        assert_eq!(rescaled_delta(old, delta, AxisRange::new(0.0, 2.0)), 0.2);
        // fact = 200 -> beyond the ladder -> divisor 200
        assert_eq!(rescaled_delta(old, delta, AxisRange::new(0.0, 0.5)), 0.05);
    }

    #[test]
    fn wheel_delta_hysteresis() {
        let target = 10.0;
        // within one octave of the target: unchanged
        assert_eq!(
            wheel_rescaled_delta(AxisRange::new(0.0, 15.0), 1.0, target),
            1.0
        );
        // density doubled: delta doubles
        assert_eq!(
            wheel_rescaled_delta(AxisRange::new(0.0, 20.0), 1.0, target),
            2.0
        );
        // density halved: delta halves
        assert_eq!(
            wheel_rescaled_delta(AxisRange::new(0.0, 5.0), 1.0, target),
            0.5
        );
    }

    #[test]
    fn draw_ends_with_clip_to_plot_area() {
        let cs = coordsys();
        let mut list = RenderList::new();
        cs.draw(&mut list, &Theme::default());
        match list.commands().last() {
            Some(RenderCommand::ClipRect(rect)) => assert_eq!(*rect, cs.plot_rect()),
            other => panic!("expected trailing clip, got {other:?}"),
        }
    }
}
