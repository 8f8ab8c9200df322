// Wire protocol DTOs and conversions for public arena server messages.

use crate::domain::{ActorInput, ActorSnapshot, ProjectileSnapshot, WorldSnapshot};
use crate::use_cases::{ActorAction, FireRequest};
use axum::extract::ws::Utf8Bytes;
use serde::{Deserialize, Serialize};

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ServerMessage {
    // Identity of the actor owned by this connection, sent once on accept.
    AssignId { id: String },
    // Snapshot of every actor and projectile.
    GameState(GameStateDto),
    // Server-detected fault on something the client sent.
    Error { message: String },
}

/// Envelope for every client message; the payload is decoded per action.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientMessage {
    pub action: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NicknamePayload {
    pub nickname: String,
}

/// Held keys and aim point; missing fields default to released / origin.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPayload {
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub aim_x: f64,
    #[serde(default)]
    pub aim_y: f64,
}

impl From<InputPayload> for ActorInput {
    fn from(input: InputPayload) -> Self {
        Self {
            up: input.up,
            down: input.down,
            left: input.left,
            right: input.right,
            aim_x: input.aim_x,
            aim_y: input.aim_y,
        }
    }
}

/// Fire payload. Browser clients send the aim point, older ones a direction vector.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ShootPayload {
    #[serde(rename_all = "camelCase")]
    Direction { direction_x: f64, direction_y: f64 },
    #[serde(rename_all = "camelCase")]
    AimPoint { aim_x: f64, aim_y: f64 },
}

impl From<ShootPayload> for FireRequest {
    fn from(payload: ShootPayload) -> Self {
        match payload {
            ShootPayload::Direction {
                direction_x,
                direction_y,
            } => FireRequest::Direction {
                x: direction_x,
                y: direction_y,
            },
            ShootPayload::AimPoint { aim_x, aim_y } => FireRequest::AimPoint { x: aim_x, y: aim_y },
        }
    }
}

#[derive(Debug)]
pub enum DecodeError {
    // Frame is not a `{ action, payload }` JSON object.
    Envelope(serde_json::Error),
    UnknownAction(String),
    InvalidPayload {
        action: &'static str,
        source: serde_json::Error,
    },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Envelope(e) => write!(f, "malformed message: {e}"),
            DecodeError::UnknownAction(action) => write!(f, "unknown action '{action}'"),
            DecodeError::InvalidPayload { action, source } => {
                write!(f, "invalid {action} payload: {source}")
            }
        }
    }
}

/// Decodes one text frame into an actor action.
pub fn decode_client_action(text: &str) -> Result<ActorAction, DecodeError> {
    let msg: ClientMessage = serde_json::from_str(text).map_err(DecodeError::Envelope)?;
    match msg.action.as_str() {
        "setNickname" => {
            let p: NicknamePayload = payload(msg.payload, "setNickname")?;
            Ok(ActorAction::Rename(p.nickname))
        }
        "input" => {
            let p: InputPayload = payload(msg.payload, "input")?;
            Ok(ActorAction::Steer(p.into()))
        }
        "shoot" => {
            let p: ShootPayload = payload(msg.payload, "shoot")?;
            Ok(ActorAction::Fire(p.into()))
        }
        _ => Err(DecodeError::UnknownAction(msg.action)),
    }
}

fn payload<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    action: &'static str,
) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(|source| DecodeError::InvalidPayload { action, source })
}

/// Serializes a server message once into shareable text.
pub fn encode(msg: &ServerMessage) -> Result<Utf8Bytes, serde_json::Error> {
    serde_json::to_string(msg).map(Utf8Bytes::from)
}

/// Snapshot of the world sent to clients on each broadcast.
#[derive(Debug, Clone, Serialize)]
pub struct GameStateDto {
    pub players: Vec<PlayerStateDto>,
    pub projectiles: Vec<ProjectileStateDto>,
}

impl From<WorldSnapshot> for GameStateDto {
    fn from(snapshot: WorldSnapshot) -> Self {
        Self {
            players: snapshot.actors.iter().map(PlayerStateDto::from).collect(),
            projectiles: snapshot
                .projectiles
                .iter()
                .map(ProjectileStateDto::from)
                .collect(),
        }
    }
}

/// Client-visible actor state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateDto {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub score: u32,
    pub lives: i32,
    pub nickname: String,
    pub body_angle: f64,
    pub aim_angle: f64,
}

impl From<&ActorSnapshot> for PlayerStateDto {
    fn from(actor: &ActorSnapshot) -> Self {
        Self {
            id: actor.id.to_string(),
            x: actor.x,
            y: actor.y,
            color: actor.color.clone(),
            score: actor.score,
            lives: actor.lives,
            nickname: actor.nickname.clone(),
            body_angle: actor.body_angle,
            aim_angle: actor.aim_angle,
        }
    }
}

/// Client-visible projectile state (velocity stays server-side).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectileStateDto {
    pub id: String,
    pub owner_id: String,
    pub x: f64,
    pub y: f64,
}

impl From<&ProjectileSnapshot> for ProjectileStateDto {
    fn from(projectile: &ProjectileSnapshot) -> Self {
        Self {
            id: projectile.id.to_string(),
            owner_id: projectile.owner_id.to_string(),
            x: projectile.x,
            y: projectile.y,
        }
    }
}
