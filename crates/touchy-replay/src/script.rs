//! Touch scripts: a recorded session of raw samples and the surfaces they
//! target, replayed through a fresh engine.

use kurbo::{Point, Rect};
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use touchy_core::{
    Engine, GestureEvent, GestureKind, Phase, SurfaceId, TouchyError, TouchyOptions, TouchyResult,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Script {
    pub options: TouchyOptions,
    pub surfaces: Vec<SurfaceSpec>,
    pub samples: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurfaceSpec {
    pub id: SurfaceId,
    #[serde(default)]
    pub bounds: Option<Rect>,
    pub gestures: Vec<GestureKind>,
}

/// One entry of the sample list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Sample {
        surface: SurfaceId,
        phase: Phase,
        t: u64,
        #[serde(default)]
        points: Vec<Point>,
    },
    /// Advance the timer clock without input.
    Tick { tick: u64 },
}

impl Script {
    pub fn from_json(json: &str) -> TouchyResult<Self> {
        let script: Script = serde_json::from_str(json)
            .map_err(|e| TouchyError::Script(format!("invalid script: {e}")))?;
        script.options.validate()?;

        let mut seen = HashSet::new();
        for surface in &script.surfaces {
            if !seen.insert(surface.id) {
                return Err(TouchyError::Script(format!(
                    "surface {} declared twice",
                    surface.id
                )));
            }
        }
        Ok(script)
    }

    /// Run every step through a new engine and collect the emitted events in
    /// order.
    ///
    /// Each sample first lets timers due at its timestamp expire, as they
    /// would have in real time.
    pub fn replay(&self) -> TouchyResult<Vec<GestureEvent>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut engine = Engine::new();

        for surface in &self.surfaces {
            if let Some(bounds) = surface.bounds {
                engine.geometry_mut().set_bounds(surface.id, bounds);
            }
            for &kind in &surface.gestures {
                let sink = Rc::clone(&events);
                engine.subscribe(
                    surface.id,
                    self.options.config_for(kind),
                    Box::new(move |e: &GestureEvent| sink.borrow_mut().push(e.clone())),
                )?;
            }
        }
        log::info!(
            "replaying {} steps across {} surfaces",
            self.samples.len(),
            self.surfaces.len()
        );

        for step in &self.samples {
            match step {
                Step::Sample {
                    surface,
                    phase,
                    t,
                    points,
                } => {
                    engine.tick(*t);
                    let outcome = engine.dispatch_surface(*surface, *phase, points, *t);
                    if !outcome.routed {
                        log::debug!("{:?} at {} on {} not routed", phase, t, surface);
                    }
                }
                Step::Tick { tick } => {
                    let fired = engine.tick(*tick);
                    log::debug!("tick {}: {} timers fired", tick, fired);
                }
            }
        }

        let collected = events.borrow().clone();
        Ok(collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use touchy_core::SwipeDirection;

    const SURFACE: &str = "6f1c2a0e-5b7d-4c1e-9a3f-2d8e4b6c0a11";

    fn script(body: &str) -> Script {
        Script::from_json(body).unwrap()
    }

    #[test]
    fn test_long_press_fires_on_tick() {
        let s = script(&format!(
            r#"{{
                "surfaces": [{{ "id": "{SURFACE}", "gestures": ["longpress"] }}],
                "samples": [
                    {{ "surface": "{SURFACE}", "phase": "start", "t": 0, "points": [{{"x": 5, "y": 5}}] }},
                    {{ "tick": 900 }}
                ]
            }}"#
        ));
        let events = s.replay().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), GestureKind::LongPress);
        assert_eq!(events[0].phase, Some(Phase::End));
        assert_eq!(events[0].time, 800);
    }

    #[test]
    fn test_release_before_deadline_is_silent() {
        let s = script(&format!(
            r#"{{
                "surfaces": [{{ "id": "{SURFACE}", "gestures": ["longPress"] }}],
                "samples": [
                    {{ "surface": "{SURFACE}", "phase": "touchstart", "t": 0, "points": [{{"x": 5, "y": 5}}] }},
                    {{ "surface": "{SURFACE}", "phase": "touchend", "t": 750 }},
                    {{ "tick": 2000 }}
                ]
            }}"#
        ));
        assert!(s.replay().unwrap().is_empty());
    }

    #[test]
    fn test_options_apply_to_every_surface() {
        let s = script(&format!(
            r#"{{
                "options": {{ "swipe": {{ "velocityThresh": 5, "triggerOn": "touchend" }} }},
                "surfaces": [{{ "id": "{SURFACE}", "gestures": ["swipe"] }}],
                "samples": [
                    {{ "surface": "{SURFACE}", "phase": "start", "t": 0, "points": [{{"x": 0, "y": 0}}] }},
                    {{ "surface": "{SURFACE}", "phase": "move", "t": 10, "points": [{{"x": -80, "y": 0}}] }},
                    {{ "surface": "{SURFACE}", "phase": "end", "t": 20 }}
                ]
            }}"#
        ));
        let events = s.replay().unwrap();
        assert_eq!(events.len(), 1);
        let swipe = events[0].as_swipe().unwrap();
        assert_eq!(swipe.direction, SwipeDirection::Left);
        assert!((swipe.velocity - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_feed_rotation_pivot() {
        let s = script(&format!(
            r#"{{
                "surfaces": [{{
                    "id": "{SURFACE}",
                    "bounds": {{"x0": 0, "y0": 0, "x1": 200, "y1": 200}},
                    "gestures": ["rotate"]
                }}],
                "samples": [
                    {{ "surface": "{SURFACE}", "phase": "start", "t": 0, "points": [{{"x": 200, "y": 100}}] }},
                    {{ "surface": "{SURFACE}", "phase": "move", "t": 10, "points": [{{"x": 100, "y": 0}}] }}
                ]
            }}"#
        ));
        let events = s.replay().unwrap();
        let rotate = events[1].as_rotate().unwrap();
        assert_eq!(rotate.pivot, Some(Point::new(100.0, 100.0)));
        assert!((rotate.degrees + 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_duplicate_surface_rejected() {
        let err = Script::from_json(&format!(
            r#"{{ "surfaces": [
                {{ "id": "{SURFACE}", "gestures": ["drag"] }},
                {{ "id": "{SURFACE}", "gestures": ["pinch"] }}
            ] }}"#
        ))
        .unwrap_err();
        assert!(matches!(err, TouchyError::Script(_)));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let err = Script::from_json(r#"{ "options": { "pinch": { "requiredTouches": 1 } } }"#)
            .unwrap_err();
        assert!(matches!(err, TouchyError::Config(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Script::from_json("{ not json"),
            Err(TouchyError::Script(_))
        ));
    }
}
