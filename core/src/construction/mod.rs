//! Interactive compass-and-straightedge construction.

pub mod types;
pub mod snap;
pub mod render;
pub mod session;

pub use render::{draw_scene, Color, DrawCommand, DrawKind, DrawList, Renderer};
pub use session::{ClickOutcome, ConstructionError, ConstructionSession, InteractionState, Mode};
pub use snap::CanvasConfig;
pub use types::{ConstructionScene, PickFilter, PrimitiveId, SceneEntry};

#[cfg(test)]
mod tests_session;
#[cfg(test)]
mod tests_render;
