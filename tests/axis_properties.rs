//! Transform properties: round-trip and monotonicity over direction and
//! scaling.

use coordview::{Axis, AxisRange, DeviceExtent, Direction, Scaling, TickSpec};
use quickcheck_macros::quickcheck;

fn axis(direction: Direction, scaling: Scaling, min: f64, max: f64) -> Axis {
    Axis::new(
        DeviceExtent::default(),
        AxisRange::new(min, max),
        direction,
        scaling,
        "",
        TickSpec::default(),
    )
    .expect("valid axis")
}

/// Fold an arbitrary float into the [0, 10] test range.
fn into_range(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value.abs().rem_euclid(10.0))
    } else {
        None
    }
}

#[quickcheck]
fn scaled_roundtrip_within_one_device_unit(value: f64) -> bool {
    let Some(value) = into_range(value) else {
        return true;
    };
    for direction in [Direction::Horizontal, Direction::Vertical] {
        for scaling in [Scaling::Linear, Scaling::Log10] {
            let axis = axis(direction, scaling, 0.0, 10.0);
            let tolerance = 1.0 / axis.scale_factor().abs();
            let back = axis.device_to_scaled(axis.scaled_to_device(value));
            if (back - value).abs() > tolerance {
                return false;
            }
        }
    }
    true
}

#[quickcheck]
fn unscaled_roundtrip_on_log_axis(exponent: f64) -> bool {
    let Some(exponent) = into_range(exponent) else {
        return true;
    };
    // natural values spanning 10 decades against a matching log axis
    let natural = 10_f64.powf(exponent);
    let axis = axis(Direction::Horizontal, Scaling::Log10, 0.0, 10.0);
    let tolerance = 1.0 / axis.scale_factor().abs();
    let Some(pos) = axis.unscaled_to_device(natural) else {
        return false;
    };
    let back = axis.device_to_unscaled(pos);
    (back.log10() - natural.log10()).abs() <= tolerance
}

#[quickcheck]
fn horizontal_transform_is_increasing(a: f64, b: f64) -> bool {
    let (Some(a), Some(b)) = (into_range(a), into_range(b)) else {
        return true;
    };
    let (low, high) = (a.min(b), a.max(b));
    let axis = axis(Direction::Horizontal, Scaling::Linear, 0.0, 10.0);
    axis.scaled_to_device(low) <= axis.scaled_to_device(high)
}

#[quickcheck]
fn vertical_transform_is_decreasing(a: f64, b: f64) -> bool {
    let (Some(a), Some(b)) = (into_range(a), into_range(b)) else {
        return true;
    };
    let (low, high) = (a.min(b), a.max(b));
    let axis = axis(Direction::Vertical, Scaling::Linear, 0.0, 10.0);
    axis.scaled_to_device(low) >= axis.scaled_to_device(high)
}

#[test]
fn inverse_recovers_extent_endpoints() {
    let axis = axis(Direction::Horizontal, Scaling::Linear, -4.5, 4.5);
    assert!((axis.device_to_scaled(axis.device_min()) + 4.5).abs() < 1e-9);
    assert!((axis.device_to_scaled(axis.device_max()) - 4.5).abs() < 1e-9);
}
