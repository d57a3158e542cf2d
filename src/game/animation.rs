//! Animation and Facing
//!
//! Pure per-tick mappings from motion to a discrete clip and a sprite
//! flip flag. Nothing here stores history; the renderer owns playback.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Discrete animation clip selected each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationClip {
    /// Standing still
    #[default]
    Idle,
    /// Walking away from the camera
    WalkUp,
    /// Walking toward the camera
    WalkDown,
    /// Walking left
    WalkLeft,
    /// Walking right
    WalkRight,
}

impl AnimationClip {
    /// Stable key the renderer registered the clip under.
    pub fn key(self) -> &'static str {
        match self {
            AnimationClip::Idle => "idle",
            AnimationClip::WalkUp => "walk-up",
            AnimationClip::WalkDown => "walk-down",
            AnimationClip::WalkLeft => "walk-left",
            AnimationClip::WalkRight => "walk-right",
        }
    }
}

/// Horizontal sprite orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    /// Default orientation, sprite unflipped
    #[default]
    Right,
    /// Mirrored horizontally
    Left,
}

impl Facing {
    /// Flip flag for the renderer.
    pub fn flip_x(self) -> bool {
        matches!(self, Facing::Left)
    }
}

/// Select the clip for this tick's velocity.
///
/// Vertical movement wins over horizontal, so a diagonal walk plays the
/// vertical clip. Zero velocity is idle. Screen convention: negative y
/// is up.
pub fn clip_for_velocity(velocity: Vec2) -> AnimationClip {
    if velocity.y < 0.0 {
        AnimationClip::WalkUp
    } else if velocity.y > 0.0 {
        AnimationClip::WalkDown
    } else if velocity.x < 0.0 {
        AnimationClip::WalkLeft
    } else if velocity.x > 0.0 {
        AnimationClip::WalkRight
    } else {
        AnimationClip::Idle
    }
}

/// Face toward a screen-space look target (pointer).
///
/// The entity's world x is converted to screen space with the camera
/// scroll before comparing, since the target is already in screen space.
/// A target strictly to the right faces right; anything else faces left.
pub fn facing_toward(look_x: f32, entity_x: f32, camera_scroll_x: f32) -> Facing {
    let entity_screen_x = entity_x - camera_scroll_x;
    if look_x > entity_screen_x {
        Facing::Right
    } else {
        Facing::Left
    }
}

// =============================================================================
// TESTS
// =============================================================================
