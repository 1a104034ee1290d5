//! WebSocket command parsing and dispatch.
//!
//! Frames are text of the form `COMMAND` or `COMMAND:payload`. Every command
//! produces zero or more reply frames in the same `KIND:json` format.

use compass_core::construction::{
    ClickOutcome, ConstructionError, ConstructionScene, ConstructionSession, DrawList, InteractionState, Mode,
};
use compass_core::lamp::LampScene;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::RwLock;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Mode(Mode),
    Click { x: u32, y: u32 },
    Reset,
    LampStep(f64),
    LampMesh,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Unknown mode key: {0:?}")]
    UnknownMode(String),

    #[error("Malformed {command} payload: {reason}")]
    Malformed { command: &'static str, reason: String },
}

impl CommandError {
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Unknown(_) => "UNKNOWN_COMMAND",
            CommandError::UnknownMode(_) => "UNKNOWN_MODE",
            CommandError::Malformed { .. } => "BAD_PAYLOAD",
        }
    }
}

#[derive(Deserialize)]
struct ClickCmd {
    x: u32,
    y: u32,
}

pub fn parse(text: &str) -> Result<Command, CommandError> {
    let text = text.trim();
    let (name, payload) = match text.split_once(':') {
        Some((name, payload)) => (name, payload.trim()),
        None => (text, ""),
    };

    match name {
        "MODE" => {
            let mut chars = payload.chars();
            let mode = match (chars.next(), chars.next()) {
                (Some(key), None) => Mode::from_key(key),
                _ => None,
            };
            mode.map(Command::Mode)
                .ok_or_else(|| CommandError::UnknownMode(payload.to_string()))
        }
        "CLICK" => {
            let cmd: ClickCmd = serde_json::from_str(payload).map_err(|e| CommandError::Malformed {
                command: "CLICK",
                reason: e.to_string(),
            })?;
            Ok(Command::Click { x: cmd.x, y: cmd.y })
        }
        "RESET" => Ok(Command::Reset),
        "LAMP_STEP" => {
            let dt: f64 = payload.parse().map_err(|e: std::num::ParseFloatError| CommandError::Malformed {
                command: "LAMP_STEP",
                reason: e.to_string(),
            })?;
            if !dt.is_finite() {
                return Err(CommandError::Malformed {
                    command: "LAMP_STEP",
                    reason: format!("time step must be finite, got {}", dt),
                });
            }
            Ok(Command::LampStep(dt))
        }
        "LAMP_MESH" => Ok(Command::LampMesh),
        _ => Err(CommandError::Unknown(name.to_string())),
    }
}

/// Format an error as a JSON message for the frontend
pub fn format_error(code: &str, message: &str, severity: &str) -> String {
    format!(
        "ERROR_UPDATE:{}",
        json!({
            "code": code,
            "message": message,
            "severity": severity
        })
    )
}

#[derive(Debug, Serialize)]
struct StateUpdate<'a> {
    state: InteractionState,
    compass_radius: Option<f64>,
    primitives: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a ClickOutcome>,
}

fn state_update(session: &ConstructionSession, outcome: Option<&ClickOutcome>) -> String {
    let update = StateUpdate {
        state: session.state,
        compass_radius: session.scene.compass_radius,
        primitives: session.scene.len(),
        outcome,
    };
    format!("STATE_UPDATE:{}", serde_json::to_string(&update).unwrap_or("{}".into()))
}

fn render_update(session: &ConstructionSession) -> String {
    let mut list = DrawList::new();
    session.render(&mut list);
    format!("RENDER_UPDATE:{}", serde_json::to_string(&list).unwrap_or("{}".into()))
}

fn construction_error(e: &ConstructionError) -> String {
    let (code, severity) = match e {
        ConstructionError::Geometry(_) => ("GEOMETRY_ERROR", "warning"),
        ConstructionError::NoCompassRadius => ("NO_COMPASS_RADIUS", "warning"),
        ConstructionError::InvalidOperand(_) => ("INVALID_OPERAND", "error"),
    };
    format_error(code, &e.to_string(), severity)
}

/// Frames sent to a client right after it connects.
pub fn greeting(session: &ConstructionSession) -> Vec<String> {
    vec![state_update(session, None), render_update(session)]
}

/// Run one text frame against the connection's session and the shared lamp.
pub fn respond(text: &str, session: &mut ConstructionSession, lamp: &RwLock<LampScene>) -> Vec<String> {
    let command = match parse(text) {
        Ok(command) => command,
        Err(e) => {
            warn!("Rejected command {:?}: {}", text, e);
            return vec![format_error(e.code(), &e.to_string(), "error")];
        }
    };

    match command {
        Command::Mode(mode) => {
            session.select_mode(mode);
            vec![state_update(session, None), render_update(session)]
        }
        Command::Click { x, y } if !session.canvas.contains_pixel(x, y) => {
            let e = CommandError::Malformed {
                command: "CLICK",
                reason: format!(
                    "pixel ({}, {}) is outside the {}x{} canvas",
                    x, y, session.canvas.width, session.canvas.height
                ),
            };
            warn!("Rejected click: {}", e);
            vec![format_error(e.code(), &e.to_string(), "error")]
        }
        Command::Click { x, y } => match session.click_pixel(x, y) {
            Ok(outcome) => vec![state_update(session, Some(&outcome)), render_update(session)],
            Err(e) => vec![
                construction_error(&e),
                state_update(session, None),
                render_update(session),
            ],
        },
        Command::Reset => {
            *session = ConstructionSession::new(ConstructionScene::seeded(), session.canvas.clone());
            info!("Construction scene reset");
            vec![state_update(session, None), render_update(session)]
        }
        Command::LampStep(dt) => {
            let frame = {
                let mut scene = lamp.write().unwrap_or_else(|e| e.into_inner());
                scene.animate(dt);
                scene.frame()
            };
            vec![format!("LAMP_UPDATE:{}", serde_json::to_string(&frame).unwrap_or("{}".into()))]
        }
        Command::LampMesh => {
            let meshes = lamp.read().unwrap_or_else(|e| e.into_inner()).meshes();
            let payload: Vec<_> = meshes
                .iter()
                .map(|(kind, mesh)| json!({ "surface": kind, "mesh": mesh }))
                .collect();
            info!("Sending {} surface meshes", payload.len());
            vec![format!("MESH_UPDATE:{}", serde_json::Value::Array(payload))]
        }
    }
}
