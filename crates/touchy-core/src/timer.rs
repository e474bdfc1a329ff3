//! Cancellable deferred tasks, driven cooperatively by the host clock.

use crate::event::GestureKind;
use crate::surface::SurfaceId;
use std::collections::BTreeMap;

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A task whose deadline has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTask {
    pub id: TimerId,
    pub deadline: u64,
    pub surface: SurfaceId,
    pub kind: GestureKind,
}

/// Pending tasks ordered by deadline, then by scheduling order.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    pending: BTreeMap<(u64, TimerId), (SurfaceId, GestureKind)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task for `(surface, kind)` at `deadline`.
    pub fn schedule(&mut self, deadline: u64, surface: SurfaceId, kind: GestureKind) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.insert((deadline, id), (surface, kind));
        log::debug!("timer {:?} armed for {} on {} at {}", id, kind, surface, deadline);
        id
    }

    /// Cancel a task. Cancelling a task that already fired or was already
    /// cancelled is a no-op; returns whether anything was removed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let key = self.pending.keys().find(|(_, tid)| *tid == id).copied();
        match key {
            Some(key) => {
                self.pending.remove(&key);
                log::debug!("timer {:?} cancelled", id);
                true
            }
            None => false,
        }
    }

    /// Remove and return every task with `deadline <= now`, earliest first.
    pub fn take_due(&mut self, now: u64) -> Vec<DueTask> {
        let due = match now.checked_add(1) {
            Some(bound) => {
                let later = self.pending.split_off(&(bound, TimerId(0)));
                std::mem::replace(&mut self.pending, later)
            }
            // Every deadline is due at the end of time.
            None => std::mem::take(&mut self.pending),
        };
        due.into_iter()
            .map(|((deadline, id), (surface, kind))| DueTask {
                id,
                deadline,
                surface,
                kind,
            })
            .collect()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_take_due_in_order() {
        let mut scheduler = Scheduler::new();
        let surface = Uuid::new_v4();
        let late = scheduler.schedule(900, surface, GestureKind::LongPress);
        let early = scheduler.schedule(800, surface, GestureKind::LongPress);

        assert_eq!(scheduler.next_deadline(), Some(800));
        assert!(scheduler.take_due(799).is_empty());

        let due = scheduler.take_due(800);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, early);
        assert_eq!(scheduler.next_deadline(), Some(900));

        let due = scheduler.take_due(10_000);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, late);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(800, Uuid::new_v4(), GestureKind::LongPress);

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.take_due(u64::MAX).is_empty());
    }

    #[test]
    fn test_cancel_after_fire_is_noop() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(10, Uuid::new_v4(), GestureKind::LongPress);
        assert_eq!(scheduler.take_due(10).len(), 1);
        assert!(!scheduler.cancel(id));
    }

    #[test]
    fn test_same_deadline_keeps_schedule_order() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.schedule(50, Uuid::new_v4(), GestureKind::LongPress);
        let b = scheduler.schedule(50, Uuid::new_v4(), GestureKind::LongPress);
        let ids: Vec<_> = scheduler.take_due(50).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_saturated_deadline_fires_at_max() {
        let mut scheduler = Scheduler::new();
        let surface = Uuid::new_v4();
        let id = scheduler.schedule(u64::MAX, surface, GestureKind::LongPress);
        assert!(scheduler.take_due(u64::MAX - 1).is_empty());

        let due = scheduler.take_due(u64::MAX);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, id);
        assert!(scheduler.is_empty());
    }
}
