//! The gesture engine: subscriptions, raw sample dispatch and timer driving.

use crate::active::{ActiveFlags, ActiveTracker};
use crate::config::GestureConfig;
use crate::emitter::{Emitter, Listener};
use crate::error::TouchyResult;
use crate::event::{GestureKind, Phase};
use crate::recognizer::{self, Context};
use crate::store::{Entry, GestureStore};
use crate::surface::{StaticGeometry, SurfaceGeometry, SurfaceId};
use crate::timer::Scheduler;
use kurbo::Point;

/// One raw touch sample addressed to a single gesture type.
#[derive(Debug, Clone, Copy)]
pub struct TouchInput<'a> {
    pub kind: GestureKind,
    pub surface: SurfaceId,
    pub phase: Phase,
    /// Every contact currently on the surface. For `End`, the contacts that
    /// remain after the lift.
    pub samples: &'a [Point],
    /// Monotonic timestamp in milliseconds.
    pub time: u64,
}

/// What happened to a raw sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The sample reached at least one state machine.
    pub routed: bool,
    /// The host should suppress its default handling of the raw input.
    pub prevent_default: bool,
    /// Number of gesture events emitted while handling the sample.
    pub emitted: usize,
}

impl Dispatch {
    fn merge(self, other: Dispatch) -> Dispatch {
        Dispatch {
            routed: self.routed || other.routed,
            prevent_default: self.prevent_default || other.prevent_default,
            emitted: self.emitted + other.emitted,
        }
    }
}

/// Owns every subscription, the active-gesture flags and pending timers.
///
/// Single-threaded: samples and ticks are handled to completion, in the order
/// the host supplies them. Listeners run synchronously inside the call that
/// produced the event.
#[derive(Debug)]
pub struct Engine<G = StaticGeometry> {
    store: GestureStore,
    active: ActiveTracker,
    scheduler: Scheduler,
    geometry: G,
}

impl Engine<StaticGeometry> {
    pub fn new() -> Self {
        Self::with_geometry(StaticGeometry::new())
    }
}

impl Default for Engine<StaticGeometry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: SurfaceGeometry> Engine<G> {
    pub fn with_geometry(geometry: G) -> Self {
        Self {
            store: GestureStore::new(),
            active: ActiveTracker::new(),
            scheduler: Scheduler::new(),
            geometry,
        }
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    /// Subscribe `listener` to a gesture on `surface`. The config variant names
    /// the gesture type.
    ///
    /// Subscribing again to the same pair keeps the state entry, replaces
    /// its configuration and adds the listener next to the existing ones.
    pub fn subscribe(
        &mut self,
        surface: SurfaceId,
        config: impl Into<GestureConfig>,
        listener: Listener,
    ) -> TouchyResult<()> {
        let config = config.into();
        config.validate()?;
        let kind = config.kind();

        match self.store.get_mut(surface, kind) {
            Some(entry) => {
                log::debug!("resubscribe {} on {}", kind, surface);
                entry.recognizer.reconfigure(config);
                entry.emitter.add(listener);
            }
            None => {
                log::debug!("subscribe {} on {}", kind, surface);
                self.store.insert(
                    surface,
                    Entry {
                        recognizer: recognizer::build(config),
                        emitter: Emitter::with_listener(listener),
                    },
                );
            }
        }
        Ok(())
    }

    /// Remove a subscription and every listener on it, cancelling any
    /// pending timer and abandoning a cycle in progress. Returns whether the
    /// subscription existed.
    pub fn unsubscribe(&mut self, surface: SurfaceId, kind: GestureKind) -> bool {
        match self.store.remove(surface, kind) {
            Some(mut entry) => {
                entry.recognizer.teardown(&mut self.scheduler);
                self.active.set(surface, kind, false);
                log::debug!("unsubscribe {} on {}", kind, surface);
                true
            }
            None => false,
        }
    }

    pub fn is_subscribed(&self, surface: SurfaceId, kind: GestureKind) -> bool {
        self.store.contains(surface, kind)
    }

    /// Whether any surface still wants raw samples for `kind`.
    pub fn is_listening(&self, kind: GestureKind) -> bool {
        self.store.subscriber_count(kind) > 0
    }

    /// Raw phases the gesture type consumes.
    pub fn listened_phases(&self, kind: GestureKind) -> &'static [Phase] {
        recognizer::descriptor(kind).phases
    }

    /// Snapshot of which gesture types are currently in progress.
    pub fn active(&self) -> ActiveFlags {
        self.active.snapshot()
    }

    /// Route one raw sample to the state machine for `(input.surface, input.kind)`.
    ///
    /// Unknown surfaces, phases the gesture does not listen to, and start or
    /// move samples with the wrong number of contacts are ignored. Default
    /// suppression follows the phase's `preventDefault` flag even when the
    /// contact count rules the sample out.
    pub fn handle(&mut self, input: &TouchInput<'_>) -> Dispatch {
        if !recognizer::descriptor(input.kind).listens(input.phase) {
            return Dispatch::default();
        }
        let Some(entry) = self.store.get_mut(input.surface, input.kind) else {
            log::trace!("no {} subscription on {}", input.kind, input.surface);
            return Dispatch::default();
        };

        let prevent_default = entry.recognizer.prevent_default().applies(input.phase);
        let gated = input.phase != Phase::End;
        if gated && input.samples.len() != entry.recognizer.required_touches() {
            return Dispatch {
                routed: false,
                prevent_default,
                emitted: 0,
            };
        }

        let mut cx = Context::new(
            input.surface,
            input.time,
            &mut self.active,
            &mut self.scheduler,
            &self.geometry,
            &mut entry.emitter,
        );
        match input.phase {
            Phase::Start => entry.recognizer.on_start(&mut cx, input.samples),
            Phase::Move => entry.recognizer.on_move(&mut cx, input.samples),
            Phase::End => entry.recognizer.on_end(&mut cx, input.samples),
        }

        Dispatch {
            routed: true,
            prevent_default,
            emitted: cx.emitted(),
        }
    }

    /// Route one raw sample to every gesture type subscribed on `surface`.
    pub fn dispatch_surface(
        &mut self,
        surface: SurfaceId,
        phase: Phase,
        samples: &[Point],
        time: u64,
    ) -> Dispatch {
        self.store
            .kinds_for(surface)
            .into_iter()
            .fold(Dispatch::default(), |acc, kind| {
                acc.merge(self.handle(&TouchInput {
                    kind,
                    surface,
                    phase,
                    samples,
                    time,
                }))
            })
    }

    /// Fire every timer due at `now`. Returns the number of timers delivered.
    pub fn tick(&mut self, now: u64) -> usize {
        let mut fired = 0;
        for task in self.scheduler.take_due(now) {
            let Some(entry) = self.store.get_mut(task.surface, task.kind) else {
                log::warn!(
                    "timer {:?} fired for missing {} on {}",
                    task.id,
                    task.kind,
                    task.surface
                );
                continue;
            };
            let mut cx = Context::new(
                task.surface,
                task.deadline,
                &mut self.active,
                &mut self.scheduler,
                &self.geometry,
                &mut entry.emitter,
            );
            entry.recognizer.on_timer(&mut cx, task.id);
            fired += 1;
        }
        fired
    }

    /// Earliest pending timer deadline; the host should call [`tick`](Self::tick)
    /// no later than this.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }
}
