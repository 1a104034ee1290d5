use crate::geometry::{Line, Point, Primitive, PrimitiveKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a primitive in its scene. Primitives are never removed, so an
/// id stays valid for the lifetime of the scene that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrimitiveId(pub usize);

impl fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which primitive types a pick may land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickFilter {
    /// Compass, circle and line operands.
    Points,
    /// Intersection operands: lines and circles.
    Curves,
}

impl PickFilter {
    pub fn accepts(&self, kind: PrimitiveKind) -> bool {
        match self {
            PickFilter::Points => kind == PrimitiveKind::Point,
            PickFilter::Curves => matches!(kind, PrimitiveKind::Line | PrimitiveKind::Circle),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneEntry {
    pub id: PrimitiveId,
    pub geometry: Primitive,
    pub picked: bool,
}

impl SceneEntry {
    pub fn kind(&self) -> PrimitiveKind {
        self.geometry.kind()
    }

    pub fn set_picked(&mut self, picked: bool) {
        self.picked = picked;
    }
}

/// Every primitive of a construction session, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstructionScene {
    pub entries: Vec<SceneEntry>,
    /// Up to two operands picked for the pending operation.
    pub picks: [Option<PrimitiveId>; 2],
    /// Radius measured by the last completed compass operation.
    pub compass_radius: Option<f64>,
}

impl ConstructionScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// The start-up scene: two points on the x axis and a horizontal line.
    pub fn seeded() -> Self {
        let mut scene = Self::new();
        scene.add(Point::new(0.0, 0.0));
        scene.add(Point::new(0.2, 0.0));
        if let Ok(line) = Line::through([0.1, 0.0], [0.4, 0.0]) {
            scene.add(line);
        }
        scene
    }

    pub fn add(&mut self, geometry: impl Into<Primitive>) -> PrimitiveId {
        let id = PrimitiveId(self.entries.len());
        self.entries.push(SceneEntry { id, geometry: geometry.into(), picked: false });
        id
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&SceneEntry> {
        self.entries.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries_of(&self, kind: PrimitiveKind) -> impl Iterator<Item = &SceneEntry> {
        self.entries.iter().filter(move |e| e.kind() == kind)
    }

    /// First primitive, in insertion order, accepted by `filter` whose
    /// outline passes within `tolerance` of `at`.
    pub fn find_at(&self, at: [f64; 2], filter: PickFilter, tolerance: f64) -> Option<PrimitiveId> {
        self.entries
            .iter()
            .find(|e| filter.accepts(e.kind()) && e.geometry.contains(at, tolerance))
            .map(|e| e.id)
    }

    /// Pick the primitive under `at` into operand `slot` (0 or 1) and flag it.
    pub fn pick(&mut self, slot: usize, at: [f64; 2], filter: PickFilter, tolerance: f64) -> Option<PrimitiveId> {
        let id = self.find_at(at, filter, tolerance)?;
        self.entries[id.0].set_picked(true);
        self.picks[slot.min(1)] = Some(id);
        Some(id)
    }

    pub fn clear_picks(&mut self) {
        for entry in &mut self.entries {
            entry.set_picked(false);
        }
        self.picks = [None, None];
    }

    pub fn point_at(&self, id: PrimitiveId) -> Option<[f64; 2]> {
        match &self.get(id)?.geometry {
            Primitive::Point(p) => Some(p.pos),
            _ => None,
        }
    }
}
