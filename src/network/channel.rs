//! Transport Handoff
//!
//! The tick loop is single-threaded; the transport is not. Each direction
//! crosses on its own single-producer/single-consumer channel, and the
//! tick loop touches them only at fixed points: inbound updates are
//! drained at the start of a tick, outbound intents are pushed as they
//! are sampled. Neither side ever blocks.

use std::collections::BTreeMap;

use tokio::sync::mpsc;
use tracing::error;

use crate::core::vec2::Vec2;
use crate::game::state::EntityId;
use crate::network::protocol::{ClientMessage, PositionUpdate};

// =============================================================================
// INBOUND: authoritative positions
// =============================================================================

/// Transport-side sender for authoritative position updates.
pub type PositionFeed = mpsc::UnboundedSender<PositionUpdate>;

/// Scene-side receiver, drained once per tick.
#[derive(Debug)]
pub struct PositionInbox {
    rx: mpsc::UnboundedReceiver<PositionUpdate>,
}

/// Create the inbound handoff pair.
pub fn position_channel() -> (PositionFeed, PositionInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, PositionInbox { rx })
}

impl PositionInbox {
    /// Drain everything queued since the last tick, keeping only the
    /// latest target per entity. Out-of-order or duplicate updates are
    /// overwritten, never replayed.
    pub fn drain_latest(&mut self) -> BTreeMap<EntityId, Vec2> {
        let mut latest = BTreeMap::new();
        while let Ok(update) = self.rx.try_recv() {
            latest.insert(update.entity_id, update.position);
        }
        latest
    }
}

// =============================================================================
// OUTBOUND: movement intents
// =============================================================================

/// Transport-side receiver that drains queued intents for send.
pub type IntentDrain = mpsc::UnboundedReceiver<ClientMessage>;

/// Scene-side sender for throttled movement intents.
#[derive(Debug, Clone)]
pub struct IntentOutbox {
    tx: mpsc::UnboundedSender<ClientMessage>,
}

/// Create the outbound handoff pair.
pub fn intent_channel() -> (IntentOutbox, IntentDrain) {
    let (tx, rx) = mpsc::unbounded_channel();
    (IntentOutbox { tx }, rx)
}

impl IntentOutbox {
    /// Queue a message for the transport. Fire-and-forget; a dropped
    /// transport is logged, not propagated into the tick.
    pub fn push(&self, message: ClientMessage) {
        if let Err(e) = self.tx.send(message) {
            error!("Failed to queue message: {}", e);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
