//! Semantic gesture events.

use crate::active::ActiveFlags;
use crate::surface::SurfaceId;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five recognized gesture types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    #[serde(alias = "long_press", alias = "longPress")]
    LongPress,
    Drag,
    Pinch,
    Rotate,
    Swipe,
}

impl GestureKind {
    pub const ALL: [GestureKind; 5] = [
        GestureKind::LongPress,
        GestureKind::Drag,
        GestureKind::Pinch,
        GestureKind::Rotate,
        GestureKind::Swipe,
    ];

    /// Stable lowercase name, as used in configuration documents.
    pub fn name(self) -> &'static str {
        match self {
            GestureKind::LongPress => "longpress",
            GestureKind::Drag => "drag",
            GestureKind::Pinch => "pinch",
            GestureKind::Rotate => "rotate",
            GestureKind::Swipe => "swipe",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle moment of a raw input sample or of a semantic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[serde(alias = "touchstart")]
    Start,
    #[serde(alias = "touchmove")]
    Move,
    #[serde(alias = "touchend")]
    End,
}

/// Swipe direction. `Right` and `Down` follow screen axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// Direction of the dominant axis of a displacement.
    ///
    /// Horizontal is chosen only when strictly larger; equal magnitudes
    /// resolve on the vertical axis.
    pub fn from_displacement(horizontal: f64, vertical: f64) -> Self {
        if horizontal.abs() > vertical.abs() {
            if horizontal > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            }
        } else if vertical > 0.0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LongPressPayload {
    pub start_point: Option<Point>,
    pub start_time: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub start_point: Point,
    pub move_point: Point,
    pub last_move_point: Point,
    /// Pixels per millisecond between the last two recorded points.
    pub velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinchPayload {
    /// Current separation divided by the separation at touch-down.
    pub scale: f64,
    pub previous_scale: f64,
    /// Current centroid of the two contacts.
    pub current_point: Point,
    /// Centroid at touch-down.
    pub start_point: Point,
    pub start_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RotatePayload {
    pub start_point: Point,
    pub start_time: u64,
    pub move_point: Point,
    pub last_move_point: Point,
    /// Pivot the angle is measured around; `None` before the first move.
    pub pivot: Option<Point>,
    pub degrees: f64,
    pub degree_delta: f64,
    /// Degrees per millisecond.
    pub velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipePayload {
    pub direction: SwipeDirection,
    pub start_point: Point,
    pub move_point: Point,
    pub last_move_point: Point,
    pub velocity: f64,
}

/// Gesture-specific event data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "gesture", content = "detail", rename_all = "lowercase")]
pub enum GesturePayload {
    LongPress(LongPressPayload),
    Drag(DragPayload),
    Pinch(PinchPayload),
    Rotate(RotatePayload),
    Swipe(SwipePayload),
}

impl GesturePayload {
    pub fn kind(&self) -> GestureKind {
        match self {
            GesturePayload::LongPress(_) => GestureKind::LongPress,
            GesturePayload::Drag(_) => GestureKind::Drag,
            GesturePayload::Pinch(_) => GestureKind::Pinch,
            GesturePayload::Rotate(_) => GestureKind::Rotate,
            GesturePayload::Swipe(_) => GestureKind::Swipe,
        }
    }
}

/// A recognized gesture, delivered to the listeners of its surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureEvent {
    pub surface: SurfaceId,
    /// `None` for single-shot gestures (pinch and swipe).
    pub phase: Option<Phase>,
    /// Timestamp of the sample (or timer deadline) that produced the event.
    pub time: u64,
    /// Copy of the active flags at emission time.
    pub active: ActiveFlags,
    #[serde(flatten)]
    pub payload: GesturePayload,
}

impl GestureEvent {
    pub fn kind(&self) -> GestureKind {
        self.payload.kind()
    }

    pub fn as_drag(&self) -> Option<&DragPayload> {
        match &self.payload {
            GesturePayload::Drag(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_pinch(&self) -> Option<&PinchPayload> {
        match &self.payload {
            GesturePayload::Pinch(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_rotate(&self) -> Option<&RotatePayload> {
        match &self.payload {
            GesturePayload::Rotate(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_swipe(&self) -> Option<&SwipePayload> {
        match &self.payload {
            GesturePayload::Swipe(p) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_dominant_axis() {
        assert_eq!(SwipeDirection::from_displacement(10.0, 3.0), SwipeDirection::Right);
        assert_eq!(SwipeDirection::from_displacement(-10.0, 3.0), SwipeDirection::Left);
        assert_eq!(SwipeDirection::from_displacement(2.0, 30.0), SwipeDirection::Down);
        assert_eq!(SwipeDirection::from_displacement(2.0, -30.0), SwipeDirection::Up);
    }

    #[test]
    fn test_direction_tie_is_vertical_branch() {
        // Equal magnitudes fall through the strict comparison.
        assert_eq!(SwipeDirection::from_displacement(5.0, 5.0), SwipeDirection::Down);
        assert_eq!(SwipeDirection::from_displacement(5.0, -5.0), SwipeDirection::Up);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(GestureKind::LongPress.to_string(), "longpress");
        let parsed: GestureKind = serde_json::from_str("\"longpress\"").unwrap();
        assert_eq!(parsed, GestureKind::LongPress);
        let phase: Phase = serde_json::from_str("\"touchend\"").unwrap();
        assert_eq!(phase, Phase::End);
    }

    #[test]
    fn test_event_serializes_with_gesture_tag() {
        let event = GestureEvent {
            surface: uuid::Uuid::nil(),
            phase: None,
            time: 50,
            active: ActiveFlags::default(),
            payload: GesturePayload::Swipe(SwipePayload {
                direction: SwipeDirection::Right,
                start_point: Point::ZERO,
                move_point: Point::new(100.0, 0.0),
                last_move_point: Point::ZERO,
                velocity: 2.0,
            }),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["gesture"], "swipe");
        assert_eq!(json["detail"]["direction"], "right");
        assert_eq!(json["time"], 50);
    }
}
