//! Range-adjustment heuristics on the coordinate-system value type.

use coordview::{Axis, AxisRange, Coordsys, DeviceExtent, Direction, Scaling, TickSpec};

fn coordsys(x_delta: f64, y_delta: f64) -> Coordsys {
    let ticks = |delta| TickSpec {
        major_anchor: 0.0,
        major_delta: delta,
        minor_intervals: 2,
    };
    let x = Axis::new(
        DeviceExtent::default(),
        AxisRange::new(0.0, 10.0),
        Direction::Horizontal,
        Scaling::Linear,
        "x",
        ticks(x_delta),
    )
    .expect("valid axis");
    let y = Axis::new(
        DeviceExtent::default(),
        AxisRange::new(0.0, 10.0),
        Direction::Vertical,
        Scaling::Linear,
        "y",
        ticks(y_delta),
    )
    .expect("valid axis");
    Coordsys::new(x, y, "adjust")
}

#[test]
fn small_zoom_keeps_the_grid_stable() {
    let cs = coordsys(1.0, 1.0);
    let zoomed = cs
        .zoomed_to(AxisRange::new(0.0, 9.0), cs.y().range())
        .expect("valid zoom");
    assert_eq!(zoomed.x().ticks().major_delta, 1.0);
    assert_eq!(zoomed.x().range(), AxisRange::new(0.0, 9.0));
}

#[test]
fn deep_zoom_rescales_through_the_ladder() {
    let cs = coordsys(1.0, 1.0);
    let zoomed = cs
        .zoomed_to(AxisRange::new(0.0, 1.0), cs.y().range())
        .expect("valid zoom");
    // zoom factor 10 falls in the (9, 15] band
    assert_eq!(zoomed.x().ticks().major_delta, 0.1);
}

#[test]
fn unchanged_axis_is_not_rebuilt_by_zoom() {
    let cs = coordsys(1.0, 1.0);
    let zoomed = cs
        .zoomed_to(AxisRange::new(2.0, 8.0), cs.y().range())
        .expect("valid zoom");
    assert_eq!(zoomed.y(), cs.y());
}

#[test]
fn pan_is_an_exact_identity_at_zero_delta() {
    let cs = coordsys(1.0, 1.0);
    let panned = cs.panned_by(0.0, 0.0).expect("valid pan");
    assert_eq!(panned, cs);
}

#[test]
fn pan_shifts_the_window_against_the_drag() {
    let cs = coordsys(1.0, 1.0);
    let panned = cs.panned_by(1.5, -0.5).expect("valid pan");
    assert_eq!(panned.x().range(), AxisRange::new(-1.5, 8.5));
    assert_eq!(panned.y().range(), AxisRange::new(0.5, 10.5));
    assert_eq!(panned.x().ticks().major_delta, 1.0);
}

#[test]
fn resize_scales_pixels_not_data() {
    let cs = coordsys(1.0, 1.0);
    let resized = cs.resized_to(900, 450).expect("valid resize");
    assert_eq!(resized.x().extent().total_size, 900);
    assert_eq!(resized.x().extent().length, 820);
    assert_eq!(resized.y().extent().total_size, 450);
    assert_eq!(resized.y().extent().length, 370);
    assert_eq!(resized.x().range(), cs.x().range());
    assert_eq!(resized.y().range(), cs.y().range());
}

#[test]
fn wheel_zoom_keeps_delta_within_an_octave() {
    let cs = coordsys(1.0, 1.0);
    // target ratio is 10; spans up to just below 20 keep the delta
    let zoomed = cs
        .wheel_zoomed_to(AxisRange::new(0.0, 19.5), AxisRange::new(0.0, 19.5))
        .expect("valid zoom");
    assert_eq!(zoomed.x().ticks().major_delta, 1.0);
    assert_eq!(zoomed.y().ticks().major_delta, 1.0);
}

#[test]
fn wheel_zoom_doubles_delta_at_twice_the_target() {
    let cs = coordsys(1.0, 1.0);
    let zoomed = cs
        .wheel_zoomed_to(AxisRange::new(0.0, 20.0), cs.y().range())
        .expect("valid zoom");
    assert_eq!(zoomed.x().ticks().major_delta, 2.0);
}

#[test]
fn wheel_zoom_halves_delta_at_half_the_target() {
    let cs = coordsys(1.0, 1.0);
    let zoomed = cs
        .wheel_zoomed_to(AxisRange::new(0.0, 5.0), cs.y().range())
        .expect("valid zoom");
    assert_eq!(zoomed.x().ticks().major_delta, 0.5);
}

#[test]
fn wheel_target_ratio_is_anchored_at_construction() {
    let cs = coordsys(1.0, 1.0);
    // first step crosses the octave and doubles the delta
    let step1 = cs
        .wheel_zoomed_to(AxisRange::new(0.0, 20.0), cs.y().range())
        .expect("valid zoom");
    assert_eq!(step1.x().ticks().major_delta, 2.0);
    // the target ratio still derives from construction time, so the next
    // doubling needs four times the original span, not four times step1's
    let step2 = step1
        .wheel_zoomed_to(AxisRange::new(0.0, 39.0), step1.y().range())
        .expect("valid zoom");
    assert_eq!(step2.x().ticks().major_delta, 2.0);
    let step3 = step1
        .wheel_zoomed_to(AxisRange::new(0.0, 40.0), step1.y().range())
        .expect("valid zoom");
    assert_eq!(step3.x().ticks().major_delta, 4.0);
}

#[test]
fn adjustments_preserve_anchor_and_minor_intervals() {
    let cs = coordsys(1.0, 1.0);
    let zoomed = cs
        .zoomed_to(AxisRange::new(0.0, 1.0), AxisRange::new(0.0, 1.0))
        .expect("valid zoom");
    assert_eq!(zoomed.x().ticks().major_anchor, 0.0);
    assert_eq!(zoomed.x().ticks().minor_intervals, 2);
}
