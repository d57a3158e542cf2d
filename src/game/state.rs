//! Scene State Definitions
//!
//! Entity and scene aggregates. Entities live in a `BTreeMap` keyed by
//! [`EntityId`] so per-tick iteration order is deterministic.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::animation::{AnimationClip, Facing};
use crate::game::camera::CameraFollower;
use crate::game::collision::CollisionWorld;
use crate::game::input::{IntentThrottle, Keyboard};
use crate::game::motion::{LOCAL_MOVE_SPEED, REMOTE_MOVE_SPEED};
use crate::network::channel::{
    intent_channel, position_channel, IntentDrain, IntentOutbox, PositionFeed, PositionInbox,
};

// =============================================================================
// ENTITY ID
// =============================================================================

/// Unique entity identifier.
///
/// Implements Ord for deterministic BTreeMap ordering; serializes as a
/// UUID string so the wire protocol can carry it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Fresh random id for a locally-spawned entity.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a server-assigned id.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse from a UUID string.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// ENTITY
// =============================================================================

/// How an entity's position advances each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    /// Driven by sampled key input, resolved against the collision world
    Local,
    /// Eased toward the last authoritative position from the server
    Remote,
}

/// Default collision box, smaller than the sprite it sits under.
pub const DEFAULT_BODY_SIZE: Vec2 = Vec2::new(10.0, 14.0);

/// A controlled or remote-driven actor.
///
/// Plain data: no engine base class, no collider references. The motion
/// controller is the only writer of `position`/`velocity` during a tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entity {
    /// Unique id
    pub id: EntityId,
    /// Local or remote drive
    pub control: ControlMode,
    /// Rendered position (sprite center), world pixels
    pub position: Vec2,
    /// Displacement rate from the last tick, units/second
    pub velocity: Vec2,
    /// Last authoritative position; meaningful only in remote mode
    pub target_position: Vec2,
    /// Last resolved sprite flip
    pub facing: Facing,
    /// Last resolved clip
    pub animation: AnimationClip,
    /// Movement speed, units/second
    pub move_speed: f32,
    /// Collision box size
    pub body_size: Vec2,
    /// Collision box center offset from `position`
    pub body_offset: Vec2,
}

impl Entity {
    /// New entity at rest.
    pub fn new(id: EntityId, control: ControlMode, position: Vec2, move_speed: f32) -> Self {
        Self {
            id,
            control,
            position,
            velocity: Vec2::ZERO,
            target_position: position,
            facing: Facing::default(),
            animation: AnimationClip::default(),
            move_speed,
            body_size: DEFAULT_BODY_SIZE,
            body_offset: Vec2::ZERO,
        }
    }

    /// Current collision box.
    pub fn aabb(&self) -> Rect {
        Rect::from_center(self.position + self.body_offset, self.body_size)
    }
}

// =============================================================================
// SCENE
// =============================================================================

/// Scene errors.
#[derive(Debug, Clone, Error)]
pub enum SceneError {
    /// The host has no keyboard; a locally-controlled entity would be
    /// uncontrollable.
    #[error("keyboard input is not available")]
    KeyboardUnavailable,

    /// An entity with this id is already in the scene.
    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),
}

/// Everything one tick operates on: the static collision world, the
/// entity set, the camera, and the handoff endpoints to the transport.
#[derive(Debug)]
pub struct SceneState {
    /// Static geometry, shared read-only across entities
    pub world: CollisionWorld,
    /// Viewport follower
    pub camera: CameraFollower,
    pub(crate) entities: BTreeMap<EntityId, Entity>,
    pub(crate) throttle: IntentThrottle,
    pub(crate) inbox: PositionInbox,
    pub(crate) outbox: Option<IntentOutbox>,
    feed: PositionFeed,
    keyboard: Option<Keyboard>,
}

impl SceneState {
    /// New scene over a built collision world.
    ///
    /// `keyboard` is the host's input handle; scenes without one can
    /// still hold remote entities but refuse to spawn local ones.
    pub fn new(world: CollisionWorld, keyboard: Option<Keyboard>) -> Self {
        let (feed, inbox) = position_channel();
        Self {
            world,
            camera: CameraFollower::default(),
            entities: BTreeMap::new(),
            throttle: IntentThrottle::new(),
            inbox,
            outbox: None,
            feed,
            keyboard,
        }
    }

    /// Sender half for the transport task that feeds authoritative
    /// positions. Clones are cheap; writes land at the start of the next
    /// tick, never mid-frame.
    pub fn position_feed(&self) -> PositionFeed {
        self.feed.clone()
    }

    /// Attach the outbound intent channel; returns the drain the
    /// transport task consumes. A scene without one never dispatches
    /// intents (offline play).
    pub fn connect_transport(&mut self) -> IntentDrain {
        let (outbox, drain) = intent_channel();
        self.outbox = Some(outbox);
        drain
    }

    /// Spawn the locally-controlled entity.
    ///
    /// Fails loudly when the host has no keyboard. The camera starts
    /// following the new entity unless it already has a subject.
    pub fn spawn_local(&mut self, position: Vec2) -> Result<EntityId, SceneError> {
        if self.keyboard.is_none() {
            return Err(SceneError::KeyboardUnavailable);
        }

        let id = EntityId::random();
        self.entities
            .insert(id, Entity::new(id, ControlMode::Local, position, LOCAL_MOVE_SPEED));
        if self.camera.subject().is_none() {
            self.camera.follow(id, position);
        }
        Ok(id)
    }

    /// Spawn a remote-driven entity under a server-assigned id.
    pub fn spawn_remote(&mut self, id: EntityId, position: Vec2) -> Result<(), SceneError> {
        if self.entities.contains_key(&id) {
            return Err(SceneError::DuplicateEntity(id));
        }
        self.entities
            .insert(id, Entity::new(id, ControlMode::Remote, position, REMOTE_MOVE_SPEED));
        Ok(())
    }

    /// Remove an entity, releasing the camera if it was the subject.
    /// Colliders are owned by the world and never reference entities, so
    /// nothing else can dangle.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let removed = self.entities.remove(&id).is_some();
        if removed {
            self.camera.stop_following(id);
        }
        removed
    }

    /// Look up an entity.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Look up an entity mutably.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// All entities in id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Number of entities in the scene.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// The locally-controlled entity, if one is alive.
    pub(crate) fn local_entity_id(&self) -> Option<EntityId> {
        self.entities
            .values()
            .find(|e| e.control == ControlMode::Local)
            .map(|e| e.id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
