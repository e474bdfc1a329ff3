//! Surface identity and geometry.

use kurbo::{Point, Rect};
use std::collections::HashMap;
use uuid::Uuid;

/// Opaque identity of a surface that owns gesture subscriptions.
pub type SurfaceId = Uuid;

/// Host-provided layout information about surfaces.
///
/// The engine only needs this for one-finger rotation, which pivots around
/// the surface center. Bounds are in the same page coordinates as samples.
pub trait SurfaceGeometry {
    /// Page-space bounds of the surface, if known.
    fn bounds(&self, surface: SurfaceId) -> Option<Rect>;

    /// Geometric center of the surface.
    fn center(&self, surface: SurfaceId) -> Option<Point> {
        self.bounds(surface).map(|b| b.center())
    }
}

/// In-memory surface geometry, updated by the host whenever layout changes.
#[derive(Debug, Clone, Default)]
pub struct StaticGeometry {
    bounds: HashMap<SurfaceId, Rect>,
}

impl StaticGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bounds(&mut self, surface: SurfaceId, bounds: Rect) {
        self.bounds.insert(surface, bounds);
    }

    pub fn remove(&mut self, surface: SurfaceId) -> Option<Rect> {
        self.bounds.remove(&surface)
    }
}

impl SurfaceGeometry for StaticGeometry {
    fn bounds(&self, surface: SurfaceId) -> Option<Rect> {
        self.bounds.get(&surface).copied()
    }
}
