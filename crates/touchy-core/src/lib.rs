//! Touchy Core Library
//!
//! Multi-touch gesture recognition: long-press, drag, pinch, rotate and swipe,
//! fed by raw contact samples and reported as semantic events.
//!
//! The host forwards raw samples to an [`Engine`] together with a monotonic
//! timestamp, and calls [`Engine::tick`] to let long-press timers expire.
//! Nothing here touches a clock, a thread or a platform API.

pub mod active;
pub mod config;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod recognizer;
pub mod store;
pub mod surface;
pub mod timer;

pub use active::{ActiveFlags, ActiveTracker};
pub use config::{
    DragConfig, GestureConfig, LongPressConfig, PinchConfig, PreventDefault, RotateConfig,
    SwipeConfig, SwipeTrigger, TouchyOptions,
};
pub use emitter::Listener;
pub use engine::{Dispatch, Engine, TouchInput};
pub use error::{ConfigError, TouchyError, TouchyResult};
pub use event::{
    DragPayload, GestureEvent, GestureKind, GesturePayload, LongPressPayload, Phase,
    PinchPayload, RotatePayload, SwipeDirection, SwipePayload,
};
pub use recognizer::{GESTURES, GestureDescriptor, Recognizer};
pub use surface::{StaticGeometry, SurfaceGeometry, SurfaceId};

/// Hold time before a long-press fires, in milliseconds.
pub const DEFAULT_LONG_PRESS_MS: u64 = 800;

/// Time a finger must rest before drag moves are reported, in milliseconds.
pub const DEFAULT_DRAG_HOLD_MS: u64 = 100;

/// Minimum two-finger separation for pinch events, in pixels.
pub const DEFAULT_PINCH_PX_THRESHOLD: f64 = 0.0;

/// Minimum swipe speed, in pixels per millisecond.
pub const DEFAULT_SWIPE_VELOCITY: f64 = 1.0;
