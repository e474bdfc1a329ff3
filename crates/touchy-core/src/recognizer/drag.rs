//! Drag: a finger moved across the surface after resting briefly.
//!
//! Moves are only reported once the finger is "held": the first move that
//! arrives more than `msHoldThresh` after touch-down promotes the cycle, and
//! every move after that emits. Earlier moves keep the state pinned to the
//! start point, which filters out jitter at touch-down.

use super::{Context, Recognizer};
use crate::config::{DragConfig, GestureConfig, PreventDefault};
use crate::event::{DragPayload, GestureKind, GesturePayload, Phase};
use crate::geometry::{distance, elapsed, velocity};
use crate::store::CycleState;
use kurbo::Point;

#[derive(Debug)]
pub struct Drag {
    config: DragConfig,
    cycle: CycleState,
    held: bool,
}

impl Drag {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            cycle: CycleState::default(),
            held: false,
        }
    }

    fn track(&mut self, point: Point, now: u64) {
        self.cycle.ensure_start(point, now);
        let since = self.cycle.latest_time().unwrap_or(now);

        if self.held || elapsed(since, now) > self.config.ms_hold_thresh {
            if !self.held {
                log::debug!("drag held after {}ms", elapsed(since, now));
            }
            self.held = true;
            self.cycle.last_move_time = Some(since);
            self.cycle.last_move_point = self.cycle.latest_point();
            self.cycle.move_time = Some(now);
            self.cycle.move_point = Some(point);
        } else {
            self.held = false;
            self.cycle.last_move_time = None;
            self.cycle.last_move_point = self.cycle.start_point;
            self.cycle.move_time = None;
            self.cycle.move_point = self.cycle.start_point;
        }
    }

    /// Payload computed from the recorded points, without sampling new ones.
    fn payload(&self) -> Option<DragPayload> {
        let start_point = self.cycle.start_point?;
        let move_point = self.cycle.move_point.unwrap_or(start_point);
        let last_move_point = self.cycle.last_move_point.unwrap_or(start_point);
        let ms = match (self.cycle.last_move_time, self.cycle.move_time) {
            (Some(last), Some(now)) => elapsed(last, now),
            _ => 0,
        };
        Some(DragPayload {
            start_point,
            move_point,
            last_move_point,
            velocity: velocity(distance(move_point, last_move_point), ms),
        })
    }
}

impl Recognizer for Drag {
    fn kind(&self) -> GestureKind {
        GestureKind::Drag
    }

    fn required_touches(&self) -> usize {
        self.config.required_touches
    }

    fn prevent_default(&self) -> PreventDefault {
        self.config.prevent_default
    }

    fn reconfigure(&mut self, config: GestureConfig) {
        if let GestureConfig::Drag(config) = config {
            self.config = config;
        }
    }

    fn on_start(&mut self, cx: &mut Context<'_>, samples: &[Point]) {
        let Some(&point) = samples.first() else {
            return;
        };
        cx.set_active(GestureKind::Drag, true);
        self.track(point, cx.time());

        let Some(start_point) = self.cycle.start_point else {
            return;
        };
        cx.emit(
            Some(Phase::Start),
            GesturePayload::Drag(DragPayload {
                start_point,
                move_point: start_point,
                last_move_point: start_point,
                velocity: 0.0,
            }),
        );
    }

    fn on_move(&mut self, cx: &mut Context<'_>, samples: &[Point]) {
        let Some(&point) = samples.first() else {
            return;
        };
        self.track(point, cx.time());

        if self.held {
            if let Some(payload) = self.payload() {
                log::trace!("drag velocity {:.3}px/ms", payload.velocity);
                cx.emit(Some(Phase::Move), GesturePayload::Drag(payload));
            }
        }
    }

    fn on_end(&mut self, cx: &mut Context<'_>, _samples: &[Point]) {
        cx.set_active(GestureKind::Drag, false);
        if self.held {
            if let Some(payload) = self.payload() {
                cx.emit(Some(Phase::End), GesturePayload::Drag(payload));
            }
        }
        self.cycle.clear();
        self.held = false;
    }
}
