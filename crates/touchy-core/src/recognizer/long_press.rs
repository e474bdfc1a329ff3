//! Long-press: a finger held in place for `msThresh` milliseconds.
//!
//! The only recognizer whose terminal event is driven by time rather than
//! input. Releasing before the deadline cancels the timer, so no end event
//! is ever produced for a short press.

use super::{Context, Recognizer};
use crate::config::{GestureConfig, LongPressConfig, PreventDefault};
use crate::event::{GestureKind, GesturePayload, LongPressPayload, Phase};
use crate::timer::{Scheduler, TimerId};
use kurbo::Point;

#[derive(Debug)]
pub struct LongPress {
    config: LongPressConfig,
    start_point: Option<Point>,
    start_time: Option<u64>,
    timer: Option<TimerId>,
}

impl LongPress {
    pub fn new(config: LongPressConfig) -> Self {
        Self {
            config,
            start_point: None,
            start_time: None,
            timer: None,
        }
    }

    fn payload(&self) -> GesturePayload {
        GesturePayload::LongPress(LongPressPayload {
            start_point: self.start_point,
            start_time: self.start_time,
        })
    }
}

impl Recognizer for LongPress {
    fn kind(&self) -> GestureKind {
        GestureKind::LongPress
    }

    fn required_touches(&self) -> usize {
        self.config.required_touches
    }

    fn prevent_default(&self) -> PreventDefault {
        self.config.prevent_default
    }

    fn reconfigure(&mut self, config: GestureConfig) {
        if let GestureConfig::LongPress(config) = config {
            self.config = config;
        }
    }

    fn on_start(&mut self, cx: &mut Context<'_>, samples: &[Point]) {
        let Some(&point) = samples.first() else {
            return;
        };

        // A new press pre-empts one that never saw its release.
        if let Some(stale) = self.timer.take() {
            cx.cancel(stale);
        }

        cx.set_active(GestureKind::LongPress, true);
        self.start_point = Some(point);
        self.start_time = Some(cx.time());

        if self.config.trigger_start_phase {
            cx.emit(Some(Phase::Start), self.payload());
        }

        self.timer = Some(cx.schedule(GestureKind::LongPress, self.config.ms_thresh));
    }

    fn on_move(&mut self, _cx: &mut Context<'_>, _samples: &[Point]) {}

    fn on_end(&mut self, cx: &mut Context<'_>, _samples: &[Point]) {
        cx.set_active(GestureKind::LongPress, false);
        if let Some(timer) = self.timer.take() {
            cx.cancel(timer);
        }
        self.start_point = None;
        self.start_time = None;
    }

    fn on_timer(&mut self, cx: &mut Context<'_>, timer: TimerId) {
        if self.timer != Some(timer) {
            log::warn!("ignoring stale long-press timer {:?} on {}", timer, cx.surface());
            return;
        }
        self.timer = None;
        cx.emit(Some(Phase::End), self.payload());
        cx.set_active(GestureKind::LongPress, false);
    }

    fn teardown(&mut self, scheduler: &mut Scheduler) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
    }
}
