//! Mode-driven construction workflow.
//!
//! A session owns one [`ConstructionScene`] and a single [`InteractionState`].
//! Mode keys reset the state, every click is consumed by the current state.

use super::render::{draw_scene, Renderer};
use super::snap::CanvasConfig;
use super::types::{ConstructionScene, PickFilter, PrimitiveId};
use crate::geometry::utils_2d::distance;
use crate::geometry::{intersect, Circle, GeometryError, Line, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Construction tool selected by a mode key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Measure a radius between two points.
    Compass,
    /// Draw a circle of the measured radius around a point.
    Circle,
    /// Straightedge through two points.
    Line,
    /// Points where two curves meet.
    Intersection,
}

impl Mode {
    pub fn from_key(key: char) -> Option<Mode> {
        match key {
            's' => Some(Mode::Compass),
            'c' => Some(Mode::Circle),
            'l' => Some(Mode::Line),
            'i' => Some(Mode::Intersection),
            _ => None,
        }
    }

    pub fn initial_state(&self) -> InteractionState {
        match self {
            Mode::Compass => InteractionState::CompassFirstPick,
            Mode::Circle => InteractionState::CircleAwaitingCenter,
            Mode::Line => InteractionState::LineFirstPick,
            Mode::Intersection => InteractionState::IntersectionFirstPick,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionState {
    #[default]
    Idle,
    CompassFirstPick,
    CompassSecondPick { first: PrimitiveId },
    CircleAwaitingCenter,
    LineFirstPick,
    LineSecondPick { first: PrimitiveId },
    IntersectionFirstPick,
    IntersectionSecondPick { first: PrimitiveId },
}

impl InteractionState {
    /// Operand types the next click may pick, `None` when idle.
    pub fn pick_filter(&self) -> Option<PickFilter> {
        match self {
            InteractionState::Idle => None,
            InteractionState::CompassFirstPick
            | InteractionState::CompassSecondPick { .. }
            | InteractionState::CircleAwaitingCenter
            | InteractionState::LineFirstPick
            | InteractionState::LineSecondPick { .. } => Some(PickFilter::Points),
            InteractionState::IntersectionFirstPick
            | InteractionState::IntersectionSecondPick { .. } => Some(PickFilter::Curves),
        }
    }

    fn pick_slot(&self) -> usize {
        match self {
            InteractionState::CompassSecondPick { .. }
            | InteractionState::LineSecondPick { .. }
            | InteractionState::IntersectionSecondPick { .. } => 1,
            _ => 0,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstructionError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("No compass radius has been measured yet")]
    NoCompassRadius,

    #[error("Primitive {0} is not a valid operand")]
    InvalidOperand(PrimitiveId),
}

pub type ConstructionResult<T> = Result<T, ConstructionError>;

/// What a click did to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// Nothing acceptable under the cursor, or no tool selected.
    Ignored,
    /// First operand picked, waiting for the next click.
    Advanced(InteractionState),
    /// Compass finished measuring.
    RadiusSet(f64),
    /// New primitives appended to the scene (possibly none).
    Created(Vec<PrimitiveId>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructionSession {
    pub scene: ConstructionScene,
    pub state: InteractionState,
    pub canvas: CanvasConfig,
}

impl Default for ConstructionSession {
    fn default() -> Self {
        Self::new(ConstructionScene::seeded(), CanvasConfig::default())
    }
}

impl ConstructionSession {
    pub fn new(scene: ConstructionScene, canvas: CanvasConfig) -> Self {
        Self { scene, state: InteractionState::Idle, canvas }
    }

    /// Enter the initial state of `mode`, dropping any half-finished operation.
    pub fn select_mode(&mut self, mode: Mode) {
        self.scene.clear_picks();
        self.state = mode.initial_state();
        info!("Mode {:?} selected", mode);
    }

    /// Handle a mode key. Unknown keys are ignored.
    pub fn press_key(&mut self, key: char) -> Option<Mode> {
        let mode = Mode::from_key(key)?;
        self.select_mode(mode);
        Some(mode)
    }

    pub fn click_pixel(&mut self, px: u32, py: u32) -> ConstructionResult<ClickOutcome> {
        let at = self.canvas.map_pixel(px, py);
        self.click(at)
    }

    /// Consume one click at `at` (normalized device coordinates).
    ///
    /// Geometric failures on the final pick are returned as errors; the
    /// session has already returned to [`InteractionState::Idle`] by then.
    pub fn click(&mut self, at: [f64; 2]) -> ConstructionResult<ClickOutcome> {
        let Some(filter) = self.state.pick_filter() else {
            return Ok(ClickOutcome::Ignored);
        };

        let tolerance = self.canvas.pick_tolerance;
        let Some(picked) = self.scene.pick(self.state.pick_slot(), at, filter, tolerance) else {
            debug!("Click at {:?} ignored in {:?}", at, self.state);
            return Ok(ClickOutcome::Ignored);
        };

        let next = match self.state {
            InteractionState::CompassFirstPick => {
                Some(InteractionState::CompassSecondPick { first: picked })
            }
            InteractionState::LineFirstPick => Some(InteractionState::LineSecondPick { first: picked }),
            InteractionState::IntersectionFirstPick => {
                Some(InteractionState::IntersectionSecondPick { first: picked })
            }
            _ => None,
        };

        if let Some(next) = next {
            debug!("Picked {}, now {:?}", picked, next);
            self.state = next;
            return Ok(ClickOutcome::Advanced(next));
        }

        let result = self.complete(picked);
        self.scene.clear_picks();
        self.state = InteractionState::Idle;

        if let Err(e) = &result {
            warn!("Construction failed: {}", e);
        }
        result
    }

    /// Run the operation of the current state with `last` as its final operand.
    fn complete(&mut self, last: PrimitiveId) -> ConstructionResult<ClickOutcome> {
        match self.state {
            InteractionState::CompassSecondPick { first } => {
                let a = self.point(first)?;
                let b = self.point(last)?;
                let radius = distance(a, b);
                if radius <= 0.0 {
                    return Err(GeometryError::InvalidRadius(radius).into());
                }
                self.scene.compass_radius = Some(radius);
                info!("Compass radius set to {:.4}", radius);
                Ok(ClickOutcome::RadiusSet(radius))
            }
            InteractionState::CircleAwaitingCenter => {
                let radius = self.scene.compass_radius.ok_or(ConstructionError::NoCompassRadius)?;
                let center = self.point(last)?;
                let id = self.scene.add(Circle::new(center, radius)?);
                info!("Created circle {} at {:?} r={:.4}", id, center, radius);
                Ok(ClickOutcome::Created(vec![id]))
            }
            InteractionState::LineSecondPick { first } => {
                let line = Line::through(self.point(first)?, self.point(last)?)?;
                let id = self.scene.add(line);
                info!("Created line {} (m={}, c={})", id, line.slope, line.intercept);
                Ok(ClickOutcome::Created(vec![id]))
            }
            InteractionState::IntersectionSecondPick { first } => {
                let a = self.scene.get(first).ok_or(ConstructionError::InvalidOperand(first))?;
                let b = self.scene.get(last).ok_or(ConstructionError::InvalidOperand(last))?;
                let points = intersect(&a.geometry, &b.geometry)?;
                debug!("Intersection of {} and {} produced {} points", first, last, points.len());

                let ids: Vec<_> = points
                    .into_iter()
                    .map(|p| self.scene.add(Point::new(p[0], p[1])))
                    .collect();
                info!("Created {} intersection points", ids.len());
                Ok(ClickOutcome::Created(ids))
            }
            _ => Ok(ClickOutcome::Ignored),
        }
    }

    fn point(&self, id: PrimitiveId) -> ConstructionResult<[f64; 2]> {
        self.scene.point_at(id).ok_or(ConstructionError::InvalidOperand(id))
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        draw_scene(&self.scene, renderer);
    }
}
