//! Rotate: a finger circling a pivot.
//!
//! With one finger the pivot is the surface center, resolved once per cycle.
//! With two fingers it is their live centroid and the angle follows the
//! first finger around it.

use super::{Context, Recognizer};
use crate::config::{GestureConfig, PreventDefault, RotateConfig};
use crate::event::{GestureKind, GesturePayload, Phase, RotatePayload};
use crate::geometry::{angle_of, elapsed, two_point_span, velocity};
use crate::store::CycleState;
use kurbo::Point;

#[derive(Debug)]
pub struct Rotate {
    config: RotateConfig,
    cycle: CycleState,
    /// Cached surface center for one-finger rotation, or the latest centroid.
    pivot: Option<Point>,
    degrees: Option<f64>,
    last_degrees: Option<f64>,
    velocity: f64,
}

impl Rotate {
    pub fn new(config: RotateConfig) -> Self {
        Self {
            config,
            cycle: CycleState::default(),
            pivot: None,
            degrees: None,
            last_degrees: None,
            velocity: 0.0,
        }
    }

    fn degree_delta(&self) -> f64 {
        match (self.degrees, self.last_degrees) {
            (Some(current), Some(last)) => current - last,
            _ => 0.0,
        }
    }

    fn resolve_pivot(&mut self, cx: &Context<'_>, samples: &[Point], start_point: Point) -> Point {
        if let Some(span) = two_point_span(samples) {
            self.pivot = Some(span.center);
            return span.center;
        }
        *self.pivot.get_or_insert_with(|| {
            cx.surface_center().unwrap_or_else(|| {
                log::debug!("no bounds for {}, rotating around the start point", cx.surface());
                start_point
            })
        })
    }

    fn payload(&self) -> Option<RotatePayload> {
        let start_point = self.cycle.start_point?;
        Some(RotatePayload {
            start_point,
            start_time: self.cycle.start_time.unwrap_or_default(),
            move_point: self.cycle.move_point.unwrap_or(start_point),
            last_move_point: self.cycle.last_move_point.unwrap_or(start_point),
            pivot: self.pivot,
            degrees: self.degrees.unwrap_or_default(),
            degree_delta: self.degree_delta(),
            velocity: self.velocity,
        })
    }

    fn reset(&mut self) {
        self.cycle.clear();
        self.pivot = None;
        self.degrees = None;
        self.last_degrees = None;
        self.velocity = 0.0;
    }
}

impl Recognizer for Rotate {
    fn kind(&self) -> GestureKind {
        GestureKind::Rotate
    }

    fn required_touches(&self) -> usize {
        self.config.required_touches
    }

    fn prevent_default(&self) -> PreventDefault {
        self.config.prevent_default
    }

    fn reconfigure(&mut self, config: GestureConfig) {
        if let GestureConfig::Rotate(config) = config {
            self.config = config;
        }
    }

    fn on_start(&mut self, cx: &mut Context<'_>, samples: &[Point]) {
        match (two_point_span(samples), samples.first()) {
            (Some(span), _) => {
                self.cycle.start_point = Some(span.center);
                self.cycle.start_time = Some(cx.time());
            }
            (None, Some(&point)) => self.cycle.ensure_start(point, cx.time()),
            (None, None) => return,
        }
        cx.set_active(GestureKind::Rotate, true);

        let Some(start_point) = self.cycle.start_point else {
            return;
        };
        cx.emit(
            Some(Phase::Start),
            GesturePayload::Rotate(RotatePayload {
                start_point,
                start_time: self.cycle.start_time.unwrap_or(cx.time()),
                move_point: start_point,
                last_move_point: start_point,
                pivot: None,
                degrees: 0.0,
                degree_delta: 0.0,
                velocity: 0.0,
            }),
        );
    }

    fn on_move(&mut self, cx: &mut Context<'_>, samples: &[Point]) {
        let Some(&point) = samples.first() else {
            return;
        };
        let now = cx.time();
        self.cycle.ensure_start(point, now);
        let Some(start_point) = self.cycle.start_point else {
            return;
        };

        let last_move_time = self.cycle.latest_time().unwrap_or(now);
        self.cycle.last_move_point = self.cycle.latest_point();
        self.cycle.last_move_time = Some(last_move_time);
        self.cycle.move_point = Some(point);
        self.cycle.move_time = Some(now);

        let pivot = self.resolve_pivot(cx, samples, start_point);
        let degrees = angle_of(pivot, point);
        self.last_degrees = self.degrees;
        self.degrees = Some(degrees);
        self.velocity = velocity(self.degree_delta(), elapsed(last_move_time, now));
        log::trace!("rotate {:.2} deg around {:?}", degrees, pivot);

        if let Some(payload) = self.payload() {
            cx.emit(Some(Phase::Move), GesturePayload::Rotate(payload));
        }
    }

    fn on_end(&mut self, cx: &mut Context<'_>, _samples: &[Point]) {
        cx.set_active(GestureKind::Rotate, false);
        if let Some(payload) = self.payload() {
            cx.emit(Some(Phase::End), GesturePayload::Rotate(payload));
        }
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::testing::Harness;
    use kurbo::Rect;

    fn one_finger(bounds: Rect) -> Harness {
        let mut h = Harness::new(RotateConfig::default());
        h.geometry.set_bounds(h.surface, bounds);
        h
    }

    #[test]
    fn test_start_event_is_zeroed() {
        let mut h = one_finger(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(h.start(5, &[(100.0, 50.0)]), 1);
        let events = h.events();
        let rotate = events[0].as_rotate().unwrap();
        assert_eq!(events[0].phase, Some(Phase::Start));
        assert_eq!(rotate.start_point, Point::new(100.0, 50.0));
        assert_eq!(rotate.start_time, 5);
        assert_eq!(rotate.degrees, 0.0);
        assert_eq!(rotate.velocity, 0.0);
    }

    #[test]
    fn test_one_finger_around_surface_center() {
        let mut h = one_finger(Rect::new(0.0, 0.0, 100.0, 100.0));
        h.start(0, &[(100.0, 50.0)]);
        h.step(10, &[(100.0, 50.0)]);
        h.step(20, &[(50.0, 100.0)]);

        let events = h.events();
        let first = events[1].as_rotate().unwrap();
        assert_eq!(first.pivot, Some(Point::new(50.0, 50.0)));
        assert!(first.degrees.abs() < 1e-10);
        assert_eq!(first.degree_delta, 0.0);

        let second = events[2].as_rotate().unwrap();
        assert!((second.degrees - 90.0).abs() < 1e-10);
        assert!((second.degree_delta - 90.0).abs() < 1e-10);
        assert!((second.velocity - 9.0).abs() < 1e-10);
        assert_eq!(second.last_move_point, Point::new(100.0, 50.0));
        assert_eq!(second.move_point, Point::new(50.0, 100.0));
    }

    #[test]
    fn test_same_point_gives_zero_delta() {
        let mut h = one_finger(Rect::new(0.0, 0.0, 200.0, 200.0));
        h.start(0, &[(10.0, 10.0)]);
        h.step(10, &[(30.0, 40.0)]);
        h.step(20, &[(30.0, 40.0)]);
        let events = h.events();
        let last = events.last().unwrap().as_rotate().unwrap();
        assert_eq!(last.degree_delta, 0.0);
        assert_eq!(last.velocity, 0.0);
    }

    #[test]
    fn test_pivot_cached_for_the_cycle() {
        let mut h = one_finger(Rect::new(0.0, 0.0, 100.0, 100.0));
        h.start(0, &[(100.0, 50.0)]);
        h.step(10, &[(100.0, 50.0)]);
        h.geometry.set_bounds(h.surface, Rect::new(0.0, 0.0, 400.0, 400.0));
        h.step(20, &[(100.0, 60.0)]);
        let events = h.events();
        assert_eq!(events[2].as_rotate().unwrap().pivot, Some(Point::new(50.0, 50.0)));

        h.end(30, &[]);
        h.start(40, &[(100.0, 50.0)]);
        h.step(50, &[(100.0, 50.0)]);
        let events = h.events();
        let fresh = events.last().unwrap().as_rotate().unwrap();
        assert_eq!(fresh.pivot, Some(Point::new(200.0, 200.0)));
    }

    #[test]
    fn test_zero_elapsed_velocity() {
        let mut h = one_finger(Rect::new(0.0, 0.0, 100.0, 100.0));
        h.start(0, &[(100.0, 50.0)]);
        h.step(10, &[(100.0, 50.0)]);
        h.step(10, &[(50.0, 100.0)]);
        let events = h.events();
        let last = events.last().unwrap().as_rotate().unwrap();
        assert!((last.degree_delta - 90.0).abs() < 1e-10);
        assert_eq!(last.velocity, 0.0);
    }

    #[test]
    fn test_two_finger_rotation_uses_live_centroid() {
        let mut h = Harness::new(RotateConfig {
            required_touches: 2,
            ..Default::default()
        });
        h.start(0, &[(0.0, 0.0), (100.0, 0.0)]);
        let events = h.events();
        assert_eq!(events[0].as_rotate().unwrap().start_point, Point::new(50.0, 0.0));

        // First finger above the centroid of the pair.
        h.step(10, &[(0.0, 0.0), (0.0, 100.0)]);
        let events = h.events();
        let rotate = events[1].as_rotate().unwrap();
        assert_eq!(rotate.pivot, Some(Point::new(0.0, 50.0)));
        assert!((rotate.degrees + 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_end_reports_last_values_and_clears() {
        let mut h = one_finger(Rect::new(0.0, 0.0, 100.0, 100.0));
        h.start(0, &[(100.0, 50.0)]);
        h.step(10, &[(100.0, 50.0)]);
        h.step(20, &[(50.0, 100.0)]);
        assert_eq!(h.end(30, &[]), 1);

        let events = h.events();
        let end = events.last().unwrap();
        assert_eq!(end.phase, Some(Phase::End));
        assert!(!end.active.rotate);
        let rotate = end.as_rotate().unwrap();
        assert!((rotate.degrees - 90.0).abs() < 1e-10);
        assert!((rotate.degree_delta - 90.0).abs() < 1e-10);
        assert!((rotate.velocity - 9.0).abs() < 1e-10);

        // Nothing recorded anymore, so a stray end is silent.
        assert_eq!(h.end(40, &[]), 0);
    }

    #[test]
    fn test_unknown_bounds_fall_back_to_start_point() {
        let mut h = Harness::new(RotateConfig::default());
        h.start(0, &[(0.0, 0.0)]);
        h.step(10, &[(0.0, 10.0)]);
        let events = h.events();
        let rotate = events[1].as_rotate().unwrap();
        assert_eq!(rotate.pivot, Some(Point::ZERO));
        assert!((rotate.degrees - 90.0).abs() < 1e-10);
    }
}
