//! Swipe: a fast flick in one of four directions.
//!
//! The cycle latches `swiped` the first time the displacement from the start
//! point, divided by the time since the previous sample, exceeds the
//! threshold. Depending on [`SwipeTrigger`] the event fires on that move or
//! when the finger lifts, at most once per cycle.

use super::{Context, Recognizer};
use crate::config::{GestureConfig, PreventDefault, SwipeConfig, SwipeTrigger};
use crate::event::{GestureKind, GesturePayload, SwipeDirection, SwipePayload};
use crate::geometry::{distance, elapsed, velocity};
use crate::store::CycleState;
use kurbo::{Point, Vec2};

#[derive(Debug)]
pub struct Swipe {
    config: SwipeConfig,
    cycle: CycleState,
    /// Signed displacement of the latest sample from the start point.
    displacement: Vec2,
    swiped: bool,
    fired: bool,
}

impl Swipe {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            cycle: CycleState::default(),
            displacement: Vec2::ZERO,
            swiped: false,
            fired: false,
        }
    }

    fn track(&mut self, point: Point, now: u64) {
        self.cycle.ensure_start(point, now);
        let Some(start_point) = self.cycle.start_point else {
            return;
        };
        let last_move_time = self.cycle.latest_time().unwrap_or(now);
        self.cycle.last_move_point = self.cycle.latest_point();
        self.cycle.last_move_time = Some(last_move_time);
        self.cycle.move_point = Some(point);
        self.cycle.move_time = Some(now);
        self.displacement = point - start_point;

        let ms = elapsed(last_move_time, now);
        let thresh = self.config.velocity_thresh;
        if !self.swiped
            && (velocity(self.displacement.x.abs(), ms) > thresh
                || velocity(self.displacement.y.abs(), ms) > thresh)
        {
            log::debug!("swipe latched after {}ms", ms);
            self.swiped = true;
        }
    }

    /// Emit if the last recorded step is fast enough.
    fn fire(&self, cx: &mut Context<'_>) {
        let (Some(start_point), Some(move_point), Some(last_move_point)) = (
            self.cycle.start_point,
            self.cycle.move_point,
            self.cycle.last_move_point,
        ) else {
            return;
        };
        let ms = match (self.cycle.last_move_time, self.cycle.move_time) {
            (Some(last), Some(now)) => elapsed(last, now),
            _ => 0,
        };
        let speed = velocity(distance(move_point, last_move_point), ms);
        if speed <= self.config.velocity_thresh {
            log::trace!("swipe too slow to fire: {:.3}px/ms", speed);
            return;
        }

        let direction = SwipeDirection::from_displacement(self.displacement.x, self.displacement.y);
        cx.emit(
            None,
            GesturePayload::Swipe(SwipePayload {
                direction,
                start_point,
                move_point,
                last_move_point,
                velocity: speed,
            }),
        );
    }

    fn reset(&mut self) {
        self.cycle.clear();
        self.displacement = Vec2::ZERO;
        self.swiped = false;
        self.fired = false;
    }
}

impl Recognizer for Swipe {
    fn kind(&self) -> GestureKind {
        GestureKind::Swipe
    }

    fn required_touches(&self) -> usize {
        self.config.required_touches
    }

    fn prevent_default(&self) -> PreventDefault {
        self.config.prevent_default
    }

    fn reconfigure(&mut self, config: GestureConfig) {
        if let GestureConfig::Swipe(config) = config {
            self.config = config;
        }
    }

    fn on_start(&mut self, cx: &mut Context<'_>, samples: &[Point]) {
        let Some(&point) = samples.first() else {
            return;
        };
        cx.set_active(GestureKind::Swipe, true);
        self.track(point, cx.time());
    }

    fn on_move(&mut self, cx: &mut Context<'_>, samples: &[Point]) {
        let Some(&point) = samples.first() else {
            return;
        };
        self.track(point, cx.time());

        if self.swiped && !self.fired && self.config.trigger_on == SwipeTrigger::Move {
            // One evaluation per cycle, whether or not it clears the threshold.
            self.fired = true;
            self.fire(cx);
        }
    }

    fn on_end(&mut self, cx: &mut Context<'_>, _samples: &[Point]) {
        cx.set_active(GestureKind::Swipe, false);
        if self.swiped && self.config.trigger_on == SwipeTrigger::End {
            self.fire(cx);
        }
        self.reset();
    }
}
