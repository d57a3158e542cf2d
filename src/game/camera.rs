//! Camera Follower
//!
//! Eases the viewport anchor toward a followed entity. A separate
//! first-order filter from the entity's own motion smoothing; the two
//! are never composed. No snap rule here: sub-pixel drift on the camera
//! is invisible, unlike on a sprite.

use crate::core::vec2::Vec2;
use crate::game::state::EntityId;

/// Easing factor applied to both axes each tick.
pub const CAMERA_FOLLOW_FACTOR: f32 = 0.1;

/// Base viewport size in pixels.
pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

/// Smoothed viewport anchor tracking one entity.
///
/// Owns only its own anchor; it reads entity positions and never mutates
/// them.
#[derive(Clone, Debug)]
pub struct CameraFollower {
    anchor: Vec2,
    viewport: Vec2,
    factor: f32,
    subject: Option<EntityId>,
}

impl CameraFollower {
    /// Follower for a viewport of the given size.
    pub fn new(viewport: Vec2) -> Self {
        Self {
            anchor: Vec2::ZERO,
            viewport,
            factor: CAMERA_FOLLOW_FACTOR,
            subject: None,
        }
    }

    /// Start tracking an entity, snapping the anchor onto it.
    pub fn follow(&mut self, subject: EntityId, position: Vec2) {
        self.subject = Some(subject);
        self.anchor = position;
    }

    /// The tracked entity, if any.
    pub fn subject(&self) -> Option<EntityId> {
        self.subject
    }

    /// Drop the subject if it is the given entity. Called on despawn so
    /// the follower never dangles.
    pub fn stop_following(&mut self, subject: EntityId) {
        if self.subject == Some(subject) {
            self.subject = None;
        }
    }

    /// Ease the anchor toward the subject's current position.
    pub fn step(&mut self, target: Vec2) {
        self.anchor = self.anchor.lerp(target, self.factor);
    }

    /// Current anchor (viewport center), world units.
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Top-left viewport scroll, world units. Screen space = world space
    /// minus this.
    pub fn scroll(&self) -> Vec2 {
        self.anchor - self.viewport * 0.5
    }
}

impl Default for CameraFollower {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT)
    }
}

// =============================================================================
// TESTS
// =============================================================================
