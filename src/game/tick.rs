//! Simulation Tick
//!
//! One fixed step of the movement core. Components run synchronously in
//! a fixed order and never block; the transport only touches the scene
//! through the channel endpoints drained here.

use tracing::debug;

use crate::core::vec2::Vec2;
use crate::game::animation::{clip_for_velocity, facing_toward};
use crate::game::input::{KeySnapshot, MoveIntent};
use crate::game::motion::{
    self, motion_state, MotionState, SMOOTHING_FACTOR, SNAP_EPSILON,
};
use crate::game::state::{ControlMode, SceneState};
use crate::network::protocol::ClientMessage;

/// Everything the host hands the core for one tick. An explicit
/// snapshot, not ambient engine state.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    /// Held movement keys
    pub keys: KeySnapshot,
    /// Screen-space look target (pointer), if the host tracks one
    pub look_target: Option<Vec2>,
    /// Fixed timestep, seconds
    pub dt: f32,
    /// Wall-clock Unix milliseconds, for intent throttling and stamps
    pub now_ms: u64,
}

/// Tuning for the remote-smoothing update.
#[derive(Clone, Copy, Debug)]
pub struct TickConfig {
    /// Per-tick easing factor toward the authoritative target
    pub smoothing_factor: f32,
    /// Snap distance, world units
    pub snap_epsilon: f32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: SMOOTHING_FACTOR,
            snap_epsilon: SNAP_EPSILON,
        }
    }
}

/// Result of a tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickResult {
    /// This tick's input-derived movement state
    pub local_state: MotionState,
    /// The intent dispatched to the transport, if the throttle allowed one
    pub dispatched: Option<MoveIntent>,
}

/// Run one simulation tick.
///
/// # Order
///
/// 1. Buffered authoritative positions land (atomically, between ticks).
/// 2. Held keys become a direction.
/// 3. The throttle decides whether an intent goes out.
/// 4. Every entity advances: local by input + collision, remote by
///    smoothing.
/// 5. Animation clip and facing are re-derived from the results.
/// 6. The camera eases after its subject.
pub fn tick(scene: &mut SceneState, frame: &FrameInput, config: &TickConfig) -> TickResult {
    let mut result = TickResult::default();

    // 1. Apply buffered remote updates
    for (id, position) in scene.inbox.drain_latest() {
        match scene.entities.get_mut(&id) {
            Some(entity) => entity.target_position = position,
            None => debug!(%id, "position update for unknown entity, dropping"),
        }
    }

    // 2. Sample input
    let direction = frame.keys.direction();
    result.local_state = motion_state(direction);

    // 3. Throttled intent dispatch (networked scenes only)
    if let Some(outbox) = &scene.outbox {
        if let Some(local_id) = scene.local_entity_id() {
            if let Some(intent) = scene.throttle.sample(direction, frame.now_ms) {
                outbox.push(ClientMessage::from_intent(local_id, intent));
                result.dispatched = Some(intent);
            }
        }
    }

    // 4. Motion update
    let world = &scene.world;
    for entity in scene.entities.values_mut() {
        match entity.control {
            ControlMode::Local => motion::step_local(entity, world, direction, frame.dt),
            ControlMode::Remote => motion::step_remote(
                entity,
                config.smoothing_factor,
                config.snap_epsilon,
                frame.dt,
            ),
        }
    }

    // 5. Animation and facing
    let scroll_x = scene.camera.scroll().x;
    for entity in scene.entities.values_mut() {
        entity.animation = clip_for_velocity(entity.velocity);
        if entity.control == ControlMode::Local {
            if let Some(look) = frame.look_target {
                entity.facing = facing_toward(look.x, entity.position.x, scroll_x);
            }
        }
    }

    // 6. Camera follow
    if let Some(subject) = scene.camera.subject() {
        if let Some(target) = scene.entities.get(&subject).map(|e| e.position) {
            scene.camera.step(target);
        }
    }

    result
}

// =============================================================================
// TESTS
// =============================================================================
