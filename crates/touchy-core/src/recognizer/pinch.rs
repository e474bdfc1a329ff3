//! Pinch: two fingers moving closer together or further apart.
//!
//! Pinch reports a single kind of notification per move, with no phase, and
//! nothing at all when the fingers lift.

use super::{Context, Recognizer};
use crate::config::{GestureConfig, PinchConfig, PreventDefault};
use crate::event::{GestureKind, GesturePayload, PinchPayload};
use crate::geometry::two_point_span;
use kurbo::Point;

#[derive(Debug)]
pub struct Pinch {
    config: PinchConfig,
    start_point: Option<Point>,
    start_distance: f64,
    scale: f64,
}

impl Pinch {
    pub fn new(config: PinchConfig) -> Self {
        Self {
            config,
            start_point: None,
            start_distance: 0.0,
            scale: 1.0,
        }
    }

    fn reset(&mut self) {
        self.start_point = None;
        self.start_distance = 0.0;
        self.scale = 1.0;
    }
}

impl Recognizer for Pinch {
    fn kind(&self) -> GestureKind {
        GestureKind::Pinch
    }

    fn required_touches(&self) -> usize {
        self.config.required_touches
    }

    fn prevent_default(&self) -> PreventDefault {
        self.config.prevent_default
    }

    fn reconfigure(&mut self, config: GestureConfig) {
        if let GestureConfig::Pinch(config) = config {
            self.config = config;
        }
    }

    fn on_start(&mut self, cx: &mut Context<'_>, samples: &[Point]) {
        cx.set_active(GestureKind::Pinch, true);
        if let Some(span) = two_point_span(samples) {
            self.start_point = Some(span.center);
            self.start_distance = span.separation;
            log::debug!("pinch start: separation {:.1}px", span.separation);
        }
    }

    fn on_move(&mut self, cx: &mut Context<'_>, samples: &[Point]) {
        let (Some(span), Some(start_point)) = (two_point_span(samples), self.start_point) else {
            return;
        };
        if self.start_distance == 0.0 {
            // Both fingers landed on the same spot; no scale is defined.
            return;
        }

        let previous_scale = self.scale;
        let scale = span.separation / self.start_distance;
        self.scale = scale;

        let current_distance = scale * self.start_distance;
        if current_distance > self.config.px_thresh {
            log::trace!("pinch scale {:.3}", scale);
            cx.emit(
                None,
                GesturePayload::Pinch(PinchPayload {
                    scale,
                    previous_scale,
                    current_point: span.center,
                    start_point,
                    start_distance: self.start_distance,
                }),
            );
        }
    }

    fn on_end(&mut self, cx: &mut Context<'_>, _samples: &[Point]) {
        cx.set_active(GestureKind::Pinch, false);
        self.reset();
    }
}
