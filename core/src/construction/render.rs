//! Render adapter for construction scenes.
//!
//! The scene does not talk to a graphics API. It issues one `draw` call per
//! primitive to a [`Renderer`]; circles go first, then lines, then points, so
//! finer elements are never covered by coarser ones.

use super::types::ConstructionScene;
use crate::geometry::PrimitiveKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawKind {
    Points,
    Lines,
    LineLoop,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 3]);

impl Color {
    pub const POINT: Color = Color([1.0, 1.0, 0.0]);
    pub const LINE: Color = Color([1.0, 0.0, 0.0]);
    pub const CIRCLE: Color = Color([0.0, 1.0, 1.0]);
    pub const PICKED: Color = Color([1.0, 1.0, 1.0]);

    pub fn for_kind(kind: PrimitiveKind, picked: bool) -> Color {
        if picked {
            return Color::PICKED;
        }
        match kind {
            PrimitiveKind::Point => Color::POINT,
            PrimitiveKind::Line => Color::LINE,
            PrimitiveKind::Circle => Color::CIRCLE,
        }
    }
}

impl From<PrimitiveKind> for DrawKind {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Point => DrawKind::Points,
            PrimitiveKind::Line => DrawKind::Lines,
            PrimitiveKind::Circle => DrawKind::LineLoop,
        }
    }
}

/// Sink for primitive draw calls.
pub trait Renderer {
    fn draw(&mut self, kind: DrawKind, color: Color, vertices: &[[f64; 2]]);
}

/// Draw order of primitive groups.
pub const DRAW_ORDER: [PrimitiveKind; 3] = [PrimitiveKind::Circle, PrimitiveKind::Line, PrimitiveKind::Point];

pub fn draw_scene<R: Renderer + ?Sized>(scene: &ConstructionScene, renderer: &mut R) {
    for kind in DRAW_ORDER {
        for entry in scene.entries_of(kind) {
            let vertices = entry.geometry.vertices();
            if vertices.is_empty() {
                continue;
            }
            renderer.draw(kind.into(), Color::for_kind(kind, entry.picked), &vertices);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub kind: DrawKind,
    pub color: Color,
    pub vertices: Vec<[f64; 2]>,
}

/// A renderer that records draw calls, e.g. to ship them to a remote client.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_scene(scene: &ConstructionScene) -> Self {
        let mut list = Self::new();
        draw_scene(scene, &mut list);
        list
    }
}

impl Renderer for DrawList {
    fn draw(&mut self, kind: DrawKind, color: Color, vertices: &[[f64; 2]]) {
        self.commands.push(DrawCommand { kind, color, vertices: vertices.to_vec() });
    }
}
