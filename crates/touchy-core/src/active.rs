//! Tracking of gesture types currently mid-recognition.

use crate::event::GestureKind;
use crate::surface::SurfaceId;
use serde::Serialize;
use std::collections::HashSet;

/// One flag per gesture type, true while at least one surface has a cycle of
/// that type in progress.
///
/// Events carry a copy taken at emission time, so a listener never observes
/// them changing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActiveFlags {
    pub longpress: bool,
    pub drag: bool,
    pub pinch: bool,
    pub rotate: bool,
    pub swipe: bool,
}

impl ActiveFlags {
    /// Whether a gesture of this type is in progress on any surface.
    pub fn is_active(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::LongPress => self.longpress,
            GestureKind::Drag => self.drag,
            GestureKind::Pinch => self.pinch,
            GestureKind::Rotate => self.rotate,
            GestureKind::Swipe => self.swipe,
        }
    }

    /// Gesture types currently in progress.
    pub fn active_kinds(&self) -> impl Iterator<Item = GestureKind> + '_ {
        GestureKind::ALL.into_iter().filter(|k| self.is_active(*k))
    }
}

/// The in-flight cycles behind [`ActiveFlags`], one per (surface, gesture type).
///
/// Only recognizers enter and leave cycles; the engine also drops a cycle
/// when its subscription is removed.
#[derive(Debug, Default)]
pub struct ActiveTracker {
    in_flight: HashSet<(SurfaceId, GestureKind)>,
}

impl ActiveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the cycle on `surface` as in progress or finished. Repeated
    /// calls with the same value are no-ops.
    pub(crate) fn set(&mut self, surface: SurfaceId, kind: GestureKind, active: bool) {
        let changed = if active {
            self.in_flight.insert((surface, kind))
        } else {
            self.in_flight.remove(&(surface, kind))
        };
        if changed {
            log::trace!("{} on {} active: {}", kind, surface, active);
        }
    }

    /// Number of surfaces with a cycle of `kind` in progress.
    pub fn in_flight(&self, kind: GestureKind) -> usize {
        self.in_flight.iter().filter(|(_, k)| *k == kind).count()
    }

    pub fn snapshot(&self) -> ActiveFlags {
        let mut flags = ActiveFlags::default();
        for (_, kind) in &self.in_flight {
            let flag = match kind {
                GestureKind::LongPress => &mut flags.longpress,
                GestureKind::Drag => &mut flags.drag,
                GestureKind::Pinch => &mut flags.pinch,
                GestureKind::Rotate => &mut flags.rotate,
                GestureKind::Swipe => &mut flags.swipe,
            };
            *flag = true;
        }
        flags
    }
}
