use num::Float;

/// Similar to numpy.interp for a single abscissa: linear between consecutive
/// coordinates, holding the first/last ordinate outside of them.
///
/// Coordinates must be sorted by x. A zero width segment (a vertical edge)
/// takes the higher of its two ordinates.
pub(crate) fn interp<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let (Some(&(first_x, first_y)), Some(&(last_x, last_y))) = (coords.first(), coords.last()) else {
        return F::zero();
    };

    // Base cases
    if x < first_x {
        return first_y;
    }
    if x > last_x {
        return last_y;
    }
    if coords.len() == 1 {
        return first_y;
    }

    for window in coords.windows(2) {
        let (x1, y1) = window[0];
        let (x2, y2) = window[1];

        if x1 <= x && x <= x2 {
            if x2 == x1 {
                return F::max(y1, y2);
            }

            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    // Only reachable for NaN
    F::zero()
}

/// Rounds half away from zero to `decimals` places.
///
/// Values too large to scale are returned as is; they have no fractional
/// digits left to round anyway.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;

    if !scaled.is_finite() {
        return value;
    }

    scaled.round() / factor
}

#[test]
fn test_interp() {
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert_eq!(interp(0., &coords), 3.);
    assert_eq!(interp(1., &coords), 3.);
    assert_eq!(interp(1.5, &coords), 2.5);
    assert_eq!(interp(2.72, &coords), 0.5599999999999996);
    assert_eq!(interp(3.24, &coords), 0.);

    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(2.5, &coords), 4.);
    assert_eq!(interp(-1., &coords), 0.);
    assert_eq!(interp(7.5, &coords), 2.);
}

#[test]
fn test_interp_vertical_edge() {
    let coords = [(0., 0.), (0., 1.), (2., 0.)];

    assert_eq!(interp(0., &coords), 1.);
    assert_eq!(interp(1., &coords), 0.5);
    assert_eq!(interp(-0.1, &coords), 0.);
}

#[test]
fn test_interp_degenerate_inputs() {
    assert_eq!(interp::<f64>(1., &[]), 0.);
    assert_eq!(interp(f64::NAN, &[(0., 0.), (1., 1.)]), 0.);
    assert_eq!(interp(5., &[(5., 1.)]), 1.);
}

#[test]
fn test_round_to() {
    assert_eq!(round_to(3.14159, 2), 3.14);
    assert_eq!(round_to(2.5, 1), 2.5);
    assert_eq!(round_to(-1.25, 1), -1.3);
    assert_eq!(round_to(0.123456789, 4), 0.1235);
}

#[test]
fn test_round_to_huge_values() {
    assert_eq!(round_to(1e300, 15), 1e300);
    assert_eq!(round_to(-2e294, 15), -2e294);
    assert_eq!(round_to(f64::MAX, 1), f64::MAX);
    assert!(round_to(f64::INFINITY, 4).is_infinite());
}
