//! Gesture state machines.
//!
//! Each gesture type implements [`Recognizer`]. The engine looks the gesture
//! up in [`GESTURES`], applies the touch-count guard, and hands the sample
//! to the recognizer together with a [`Context`] giving access to the
//! active flags, the timer scheduler, the surface geometry and the
//! subscription's listeners.

mod drag;
mod long_press;
mod pinch;
mod rotate;
mod swipe;

pub use drag::Drag;
pub use long_press::LongPress;
pub use pinch::Pinch;
pub use rotate::Rotate;
pub use swipe::Swipe;

use crate::active::ActiveTracker;
use crate::config::{GestureConfig, PreventDefault};
use crate::emitter::Emitter;
use crate::event::{GestureEvent, GestureKind, GesturePayload, Phase};
use crate::surface::{SurfaceGeometry, SurfaceId};
use crate::timer::{Scheduler, TimerId};
use kurbo::Point;
use std::fmt;

/// Static description of a gesture type.
#[derive(Debug, Clone, Copy)]
pub struct GestureDescriptor {
    pub kind: GestureKind,
    pub name: &'static str,
    /// Raw input phases this gesture consumes.
    pub phases: &'static [Phase],
}

impl GestureDescriptor {
    pub fn listens(&self, phase: Phase) -> bool {
        self.phases.contains(&phase)
    }

    pub fn default_config(&self) -> GestureConfig {
        GestureConfig::default_for(self.kind)
    }
}

const ALL_PHASES: &[Phase] = &[Phase::Start, Phase::Move, Phase::End];

/// Every supported gesture. Adding a gesture means adding a row here, a
/// [`GestureConfig`] variant, and a [`Recognizer`] implementation.
pub const GESTURES: [GestureDescriptor; 5] = [
    GestureDescriptor {
        kind: GestureKind::LongPress,
        name: "longpress",
        phases: &[Phase::Start, Phase::End],
    },
    GestureDescriptor {
        kind: GestureKind::Drag,
        name: "drag",
        phases: ALL_PHASES,
    },
    GestureDescriptor {
        kind: GestureKind::Pinch,
        name: "pinch",
        phases: ALL_PHASES,
    },
    GestureDescriptor {
        kind: GestureKind::Rotate,
        name: "rotate",
        phases: ALL_PHASES,
    },
    GestureDescriptor {
        kind: GestureKind::Swipe,
        name: "swipe",
        phases: ALL_PHASES,
    },
];

/// Descriptor for a gesture type.
pub fn descriptor(kind: GestureKind) -> &'static GestureDescriptor {
    match kind {
        GestureKind::LongPress => &GESTURES[0],
        GestureKind::Drag => &GESTURES[1],
        GestureKind::Pinch => &GESTURES[2],
        GestureKind::Rotate => &GESTURES[3],
        GestureKind::Swipe => &GESTURES[4],
    }
}

/// Create the state machine for a configuration.
pub fn build(config: GestureConfig) -> Box<dyn Recognizer> {
    match config {
        GestureConfig::LongPress(c) => Box::new(LongPress::new(c)),
        GestureConfig::Drag(c) => Box::new(Drag::new(c)),
        GestureConfig::Pinch(c) => Box::new(Pinch::new(c)),
        GestureConfig::Rotate(c) => Box::new(Rotate::new(c)),
        GestureConfig::Swipe(c) => Box::new(Swipe::new(c)),
    }
}

/// A per-(surface, gesture type) state machine.
///
/// `on_start` and `on_move` are only called when the sample holds exactly
/// [`required_touches`](Recognizer::required_touches) points. `on_end`
/// receives the contacts still down after the lift and is never gated.
pub trait Recognizer: fmt::Debug {
    fn kind(&self) -> GestureKind;

    fn required_touches(&self) -> usize;

    fn prevent_default(&self) -> PreventDefault;

    /// Replace the configuration, keeping any cycle in progress.
    fn reconfigure(&mut self, config: GestureConfig);

    fn on_start(&mut self, cx: &mut Context<'_>, samples: &[Point]);

    fn on_move(&mut self, cx: &mut Context<'_>, samples: &[Point]);

    fn on_end(&mut self, cx: &mut Context<'_>, samples: &[Point]);

    /// A timer scheduled through [`Context::schedule`] has expired.
    fn on_timer(&mut self, _cx: &mut Context<'_>, _timer: TimerId) {}

    /// The subscription is being removed; release any pending timers.
    fn teardown(&mut self, _scheduler: &mut Scheduler) {}
}

/// Everything a recognizer may touch while handling one input.
pub struct Context<'a> {
    surface: SurfaceId,
    time: u64,
    flags: &'a mut ActiveTracker,
    scheduler: &'a mut Scheduler,
    geometry: &'a dyn SurfaceGeometry,
    emitter: &'a mut Emitter,
    emitted: usize,
}

impl<'a> Context<'a> {
    pub fn new(
        surface: SurfaceId,
        time: u64,
        flags: &'a mut ActiveTracker,
        scheduler: &'a mut Scheduler,
        geometry: &'a dyn SurfaceGeometry,
        emitter: &'a mut Emitter,
    ) -> Self {
        Self {
            surface,
            time,
            flags,
            scheduler,
            geometry,
            emitter,
            emitted: 0,
        }
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Timestamp of the input being handled.
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn set_active(&mut self, kind: GestureKind, active: bool) {
        self.flags.set(self.surface, kind, active);
    }

    /// Emit an event to the subscription's listeners, stamped with the
    /// current time and a copy of the active flags.
    pub fn emit(&mut self, phase: Option<Phase>, payload: GesturePayload) {
        let event = GestureEvent {
            surface: self.surface,
            phase,
            time: self.time,
            active: self.flags.snapshot(),
            payload,
        };
        self.emitter.emit(&event);
        self.emitted += 1;
    }

    /// Number of events emitted through this context.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Schedule a timer `delay_ms` after the current input.
    pub fn schedule(&mut self, kind: GestureKind, delay_ms: u64) -> TimerId {
        self.scheduler
            .schedule(self.time.saturating_add(delay_ms), self.surface, kind)
    }

    pub fn cancel(&mut self, timer: TimerId) -> bool {
        self.scheduler.cancel(timer)
    }

    /// Geometric center of the surface, if the host knows its bounds.
    pub fn surface_center(&self) -> Option<Point> {
        self.geometry.center(self.surface)
    }
}
