//! Keyed storage of per-surface gesture state.

use crate::emitter::Emitter;
use crate::event::GestureKind;
use crate::recognizer::Recognizer;
use crate::surface::SurfaceId;
use kurbo::Point;
use std::collections::HashMap;

/// Sample bookkeeping shared by the recognizers that track movement.
///
/// `start_*` is written once per cycle; `move_*` follows every accepted move
/// and `last_move_*` holds the move before it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleState {
    pub start_point: Option<Point>,
    pub start_time: Option<u64>,
    pub move_point: Option<Point>,
    pub move_time: Option<u64>,
    pub last_move_point: Option<Point>,
    pub last_move_time: Option<u64>,
}

impl CycleState {
    /// Record the start of a cycle unless one is already recorded.
    pub fn ensure_start(&mut self, point: Point, time: u64) {
        if self.start_point.is_none() {
            self.start_point = Some(point);
        }
        if self.start_time.is_none() {
            self.start_time = Some(time);
        }
    }

    /// Time of the latest recorded move, or of the start if nothing moved yet.
    pub fn latest_time(&self) -> Option<u64> {
        self.move_time.or(self.start_time)
    }

    /// Point of the latest recorded move, or the start point.
    pub fn latest_point(&self) -> Option<Point> {
        self.move_point.or(self.start_point)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A subscription: the recognizer holding the state machine and the
/// listeners to notify.
#[derive(Debug)]
pub struct Entry {
    pub recognizer: Box<dyn Recognizer>,
    pub emitter: Emitter,
}

/// All gesture state, keyed by surface and gesture type.
#[derive(Debug, Default)]
pub struct GestureStore {
    entries: HashMap<(SurfaceId, GestureKind), Entry>,
}

impl GestureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_mut(&mut self, surface: SurfaceId, kind: GestureKind) -> Option<&mut Entry> {
        self.entries.get_mut(&(surface, kind))
    }

    pub fn insert(&mut self, surface: SurfaceId, entry: Entry) {
        let kind = entry.recognizer.kind();
        self.entries.insert((surface, kind), entry);
    }

    pub fn remove(&mut self, surface: SurfaceId, kind: GestureKind) -> Option<Entry> {
        self.entries.remove(&(surface, kind))
    }

    pub fn contains(&self, surface: SurfaceId, kind: GestureKind) -> bool {
        self.entries.contains_key(&(surface, kind))
    }

    /// Gesture types subscribed on a surface, in a stable order.
    pub fn kinds_for(&self, surface: SurfaceId) -> Vec<GestureKind> {
        GestureKind::ALL
            .into_iter()
            .filter(|kind| self.contains(surface, *kind))
            .collect()
    }

    /// Number of surfaces subscribed to a gesture type.
    pub fn subscriber_count(&self, kind: GestureKind) -> usize {
        self.entries.keys().filter(|(_, k)| *k == kind).count()
    }
}
