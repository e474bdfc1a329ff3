//! Kinematics helpers shared by every recognizer.
//!
//! All functions here are pure: they take points and elapsed milliseconds and
//! never touch recognizer state.

use kurbo::Point;

/// Center and separation of a two-finger contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoPointSpan {
    /// Midpoint between the two contacts.
    pub center: Point,
    /// Euclidean distance between the two contacts.
    pub separation: f64,
}

/// Distance between two points.
///
/// Identical points always yield exactly `0.0`.
pub fn distance(a: Point, b: Point) -> f64 {
    if a.x == b.x && a.y == b.y {
        return 0.0;
    }
    (b.x - a.x).hypot(b.y - a.y)
}

/// Rate of change per millisecond. Zero elapsed time yields `0.0`.
pub fn velocity(delta: f64, elapsed_ms: u64) -> f64 {
    if elapsed_ms == 0 {
        return 0.0;
    }
    delta / elapsed_ms as f64
}

/// Milliseconds between two timestamps, clamped at zero for out-of-order input.
pub fn elapsed(from_ms: u64, to_ms: u64) -> u64 {
    to_ms.saturating_sub(from_ms)
}

/// Centroid and separation of a sample set, if it holds exactly two points.
pub fn two_point_span(points: &[Point]) -> Option<TwoPointSpan> {
    match points {
        [a, b] => Some(TwoPointSpan {
            center: a.midpoint(*b),
            separation: (b.x - a.x).hypot(b.y - a.y),
        }),
        _ => None,
    }
}

/// Angle of the ray `from -> to` in degrees, in `(-180, 180]`.
///
/// Screen coordinates grow downwards, so positive angles turn clockwise.
pub fn angle_of(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance() {
        let d = distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_velocity_zero_elapsed() {
        assert_eq!(velocity(42.0, 0), 0.0);
        assert!((velocity(100.0, 50) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_elapsed_out_of_order() {
        assert_eq!(elapsed(100, 40), 0);
        assert_eq!(elapsed(40, 100), 60);
    }

    #[test]
    fn test_two_point_span() {
        let span = two_point_span(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]).unwrap();
        assert_eq!(span.center, Point::new(50.0, 0.0));
        assert!((span.separation - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_two_point_span_requires_two() {
        assert!(two_point_span(&[]).is_none());
        assert!(two_point_span(&[Point::ZERO]).is_none());
        assert!(two_point_span(&[Point::ZERO, Point::ZERO, Point::ZERO]).is_none());
    }

    #[test]
    fn test_angle_of() {
        let c = Point::new(10.0, 10.0);
        assert!((angle_of(c, Point::new(20.0, 10.0))).abs() < 1e-10);
        assert!((angle_of(c, Point::new(10.0, 20.0)) - 90.0).abs() < 1e-10);
        assert!((angle_of(c, Point::new(0.0, 10.0)) - 180.0).abs() < 1e-10);
        assert!((angle_of(c, Point::new(10.0, 0.0)) + 90.0).abs() < 1e-10);
    }

    proptest! {
        #[test]
        fn prop_distance_to_self_is_zero(x in -1e6f64..1e6, y in -1e6f64..1e6) {
            let p = Point::new(x, y);
            prop_assert_eq!(distance(p, p), 0.0);
        }

        #[test]
        fn prop_velocity_is_finite(delta in -1e6f64..1e6, elapsed_ms in 0u64..10_000) {
            let v = velocity(delta, elapsed_ms);
            prop_assert!(v.is_finite());
            if elapsed_ms == 0 {
                prop_assert_eq!(v, 0.0);
            }
        }
    }
}
