//! Protocol messages for client-server communication
//!
//! Only the message *shapes* live here; the transport that carries them
//! is the host's concern.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::game::input::MoveIntent;
use crate::game::state::EntityId;

// =============================================================================
// CLIENT -> SERVER
// =============================================================================

/// Messages the client emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Throttled movement intent for the locally-controlled entity.
    Move {
        /// Which entity is moving
        entity_id: EntityId,
        /// Direction x component, unit-normalized with y
        direction_x: f32,
        /// Direction y component
        direction_y: f32,
        /// Wall-clock Unix milliseconds at dispatch
        timestamp: u64,
    },
}

impl ClientMessage {
    /// Wrap a sampled intent for the wire.
    pub fn from_intent(entity_id: EntityId, intent: MoveIntent) -> Self {
        Self::Move {
            entity_id,
            direction_x: intent.direction.x,
            direction_y: intent.direction.y,
            timestamp: intent.timestamp_ms,
        }
    }
}

// =============================================================================
// SERVER -> CLIENT
// =============================================================================

/// Messages the server emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Authoritative position for one entity.
    Position {
        /// Target entity
        entity_id: EntityId,
        /// World x
        x: f32,
        /// World y
        y: f32,
    },
}

/// A decoded authoritative position, ready to buffer for the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionUpdate {
    /// Target entity
    pub entity_id: EntityId,
    /// New target position
    pub position: Vec2,
}

impl From<ServerMessage> for PositionUpdate {
    fn from(message: ServerMessage) -> Self {
        match message {
            ServerMessage::Position { entity_id, x, y } => Self {
                entity_id,
                position: Vec2::new(x, y),
            },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
