//! Delivery of semantic events to subscribers.

use crate::event::GestureEvent;
use std::fmt;

/// Callback receiving gesture events, invoked synchronously.
pub type Listener = Box<dyn FnMut(&GestureEvent)>;

/// The listeners subscribed to one (surface, gesture type) pair.
#[derive(Default)]
pub struct Emitter {
    listeners: Vec<Listener>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listener(listener: Listener) -> Self {
        Self {
            listeners: vec![listener],
        }
    }

    pub fn add(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Deliver an event to every listener, in subscription order.
    pub fn emit(&mut self, event: &GestureEvent) {
        log::debug!(
            "emit {} {:?} on {} at {}",
            event.kind(),
            event.phase,
            event.surface,
            event.time
        );
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
