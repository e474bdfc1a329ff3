//! Per-gesture configuration.
//!
//! Every struct deserializes with `#[serde(default)]`, so a partial document
//! such as `{"swipe": {"velocityThresh": 0.5}}` keeps the defaults for
//! everything it leaves out.

use crate::error::ConfigError;
use crate::event::{GestureKind, Phase};
use crate::{
    DEFAULT_DRAG_HOLD_MS, DEFAULT_LONG_PRESS_MS, DEFAULT_PINCH_PX_THRESHOLD,
    DEFAULT_SWIPE_VELOCITY,
};
use serde::{Deserialize, Serialize};

/// Whether default handling of the raw input should be suppressed, per phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreventDefault {
    pub start: bool,
    pub r#move: bool,
    pub end: bool,
}

impl Default for PreventDefault {
    fn default() -> Self {
        Self {
            start: true,
            r#move: true,
            end: true,
        }
    }
}

impl PreventDefault {
    pub const NONE: Self = Self {
        start: false,
        r#move: false,
        end: false,
    };

    pub fn applies(&self, phase: Phase) -> bool {
        match phase {
            Phase::Start => self.start,
            Phase::Move => self.r#move,
            Phase::End => self.end,
        }
    }
}

/// When a swipe is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeTrigger {
    /// As soon as the swipe velocity is reached.
    #[default]
    #[serde(alias = "touchmove")]
    Move,
    /// When the finger lifts.
    #[serde(alias = "touchend")]
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LongPressConfig {
    pub prevent_default: PreventDefault,
    pub required_touches: usize,
    /// Hold duration before the press fires.
    pub ms_thresh: u64,
    /// Emit a start event as soon as the press begins.
    pub trigger_start_phase: bool,
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self {
            prevent_default: PreventDefault::default(),
            required_touches: 1,
            ms_thresh: DEFAULT_LONG_PRESS_MS,
            trigger_start_phase: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DragConfig {
    pub prevent_default: PreventDefault,
    pub required_touches: usize,
    /// Time a finger must rest before moves count as dragging.
    pub ms_hold_thresh: u64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            prevent_default: PreventDefault::default(),
            required_touches: 1,
            ms_hold_thresh: DEFAULT_DRAG_HOLD_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PinchConfig {
    pub prevent_default: PreventDefault,
    pub required_touches: usize,
    /// Minimum finger separation, in pixels, for a pinch to be reported.
    pub px_thresh: f64,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            prevent_default: PreventDefault::default(),
            required_touches: 2,
            px_thresh: DEFAULT_PINCH_PX_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RotateConfig {
    pub prevent_default: PreventDefault,
    pub required_touches: usize,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            prevent_default: PreventDefault::default(),
            required_touches: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwipeConfig {
    pub prevent_default: PreventDefault,
    pub required_touches: usize,
    /// Minimum speed in pixels per millisecond.
    pub velocity_thresh: f64,
    pub trigger_on: SwipeTrigger,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            prevent_default: PreventDefault::default(),
            required_touches: 1,
            velocity_thresh: DEFAULT_SWIPE_VELOCITY,
            trigger_on: SwipeTrigger::default(),
        }
    }
}

/// Configuration for one gesture subscription. The variant names the gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureConfig {
    LongPress(LongPressConfig),
    Drag(DragConfig),
    Pinch(PinchConfig),
    Rotate(RotateConfig),
    Swipe(SwipeConfig),
}

impl GestureConfig {
    /// Default configuration for a gesture type.
    pub fn default_for(kind: GestureKind) -> Self {
        match kind {
            GestureKind::LongPress => Self::LongPress(LongPressConfig::default()),
            GestureKind::Drag => Self::Drag(DragConfig::default()),
            GestureKind::Pinch => Self::Pinch(PinchConfig::default()),
            GestureKind::Rotate => Self::Rotate(RotateConfig::default()),
            GestureKind::Swipe => Self::Swipe(SwipeConfig::default()),
        }
    }

    pub fn kind(&self) -> GestureKind {
        match self {
            Self::LongPress(_) => GestureKind::LongPress,
            Self::Drag(_) => GestureKind::Drag,
            Self::Pinch(_) => GestureKind::Pinch,
            Self::Rotate(_) => GestureKind::Rotate,
            Self::Swipe(_) => GestureKind::Swipe,
        }
    }

    pub fn required_touches(&self) -> usize {
        match self {
            Self::LongPress(c) => c.required_touches,
            Self::Drag(c) => c.required_touches,
            Self::Pinch(c) => c.required_touches,
            Self::Rotate(c) => c.required_touches,
            Self::Swipe(c) => c.required_touches,
        }
    }

    pub fn prevent_default(&self) -> PreventDefault {
        match self {
            Self::LongPress(c) => c.prevent_default,
            Self::Drag(c) => c.prevent_default,
            Self::Pinch(c) => c.prevent_default,
            Self::Rotate(c) => c.prevent_default,
            Self::Swipe(c) => c.prevent_default,
        }
    }

    /// Check the configuration against what the recognizer can handle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let kind = self.kind();
        let touches = self.required_touches();
        let (ok, expected) = match self {
            Self::LongPress(_) | Self::Drag(_) => (touches >= 1, "at least 1"),
            Self::Pinch(_) => (touches == 2, "exactly 2"),
            Self::Rotate(_) => ((1..=2).contains(&touches), "1 or 2"),
            Self::Swipe(_) => ((1..=4).contains(&touches), "1 to 4"),
        };
        if !ok {
            return Err(ConfigError::UnsupportedTouchCount {
                kind,
                expected,
                got: touches,
            });
        }

        match self {
            Self::Pinch(c) => check_threshold(kind, "pxThresh", c.px_thresh),
            Self::Swipe(c) => check_threshold(kind, "velocityThresh", c.velocity_thresh),
            _ => Ok(()),
        }
    }
}

fn check_threshold(kind: GestureKind, field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { kind, field, value })
    }
}

impl From<LongPressConfig> for GestureConfig {
    fn from(config: LongPressConfig) -> Self {
        Self::LongPress(config)
    }
}

impl From<DragConfig> for GestureConfig {
    fn from(config: DragConfig) -> Self {
        Self::Drag(config)
    }
}

impl From<PinchConfig> for GestureConfig {
    fn from(config: PinchConfig) -> Self {
        Self::Pinch(config)
    }
}

impl From<RotateConfig> for GestureConfig {
    fn from(config: RotateConfig) -> Self {
        Self::Rotate(config)
    }
}

impl From<SwipeConfig> for GestureConfig {
    fn from(config: SwipeConfig) -> Self {
        Self::Swipe(config)
    }
}

/// Default configuration for every gesture type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchyOptions {
    #[serde(alias = "longPress")]
    pub longpress: LongPressConfig,
    pub drag: DragConfig,
    pub pinch: PinchConfig,
    pub rotate: RotateConfig,
    pub swipe: SwipeConfig,
}

impl TouchyOptions {
    /// Parse options from JSON, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// The configured settings for one gesture type.
    pub fn config_for(&self, kind: GestureKind) -> GestureConfig {
        match kind {
            GestureKind::LongPress => self.longpress.clone().into(),
            GestureKind::Drag => self.drag.clone().into(),
            GestureKind::Pinch => self.pinch.clone().into(),
            GestureKind::Rotate => self.rotate.clone().into(),
            GestureKind::Swipe => self.swipe.clone().into(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        GestureKind::ALL
            .into_iter()
            .try_for_each(|kind| self.config_for(kind).validate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TouchyOptions::default();
        assert_eq!(options.longpress.ms_thresh, 800);
        assert!(!options.longpress.trigger_start_phase);
        assert_eq!(options.drag.ms_hold_thresh, 100);
        assert_eq!(options.pinch.required_touches, 2);
        assert_eq!(options.rotate.required_touches, 1);
        assert_eq!(options.swipe.trigger_on, SwipeTrigger::Move);
        assert!(options.swipe.prevent_default.applies(Phase::Move));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = TouchyOptions::from_json(
            r#"{
                "swipe": { "velocityThresh": 0.5, "triggerOn": "touchend" },
                "longpress": { "preventDefault": { "move": false } }
            }"#,
        )
        .unwrap();

        assert!((options.swipe.velocity_thresh - 0.5).abs() < f64::EPSILON);
        assert_eq!(options.swipe.trigger_on, SwipeTrigger::End);
        assert_eq!(options.swipe.required_touches, 1);
        assert!(!options.longpress.prevent_default.r#move);
        assert!(options.longpress.prevent_default.start);
        assert_eq!(options.drag, DragConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = TouchyOptions::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_pinch_requires_two_touches() {
        let config = GestureConfig::Pinch(PinchConfig {
            required_touches: 1,
            ..Default::default()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedTouchCount { got: 1, .. })
        ));
    }

    #[test]
    fn test_rotate_touch_range() {
        for touches in [0, 3] {
            let config = GestureConfig::Rotate(RotateConfig {
                required_touches: touches,
                ..Default::default()
            });
            assert!(config.validate().is_err());
        }
        let two = GestureConfig::Rotate(RotateConfig {
            required_touches: 2,
            ..Default::default()
        });
        assert!(two.validate().is_ok());
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = GestureConfig::Swipe(SwipeConfig {
            velocity_thresh: -1.0,
            ..Default::default()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold { field: "velocityThresh", .. })
        ));

        let config = GestureConfig::Pinch(PinchConfig {
            px_thresh: f64::NAN,
            ..Default::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_kind_round_trip() {
        for kind in GestureKind::ALL {
            assert_eq!(GestureConfig::default_for(kind).kind(), kind);
        }
    }
}
