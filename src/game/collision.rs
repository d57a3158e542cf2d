//! Collision World
//!
//! Static AABB geometry built once at scene load, queried every tick.
//! Entities never hold collider references; they ask the world whether a
//! proposed move is allowed.

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::map::{collect_colliders, MapData};

/// Immutable set of static colliders plus the world boundary.
///
/// Shared read-only across every entity in a scene.
#[derive(Clone, Debug, Default)]
pub struct CollisionWorld {
    colliders: Vec<Rect>,
    bounds: Rect,
}

impl CollisionWorld {
    /// Build from adapter-provided map data (see [`crate::game::map`]).
    pub fn from_map(map: &MapData) -> Self {
        let size = map.world_size();
        Self {
            colliders: collect_colliders(map),
            bounds: Rect::new(0.0, 0.0, size.x, size.y),
        }
    }

    /// Build from an explicit collider list and world size, for hosts that
    /// produce geometry some other way (and for tests).
    pub fn new(colliders: Vec<Rect>, world_size: Vec2) -> Self {
        Self {
            colliders,
            bounds: Rect::new(0.0, 0.0, world_size.x, world_size.y),
        }
    }

    /// The static colliders.
    pub fn colliders(&self) -> &[Rect] {
        &self.colliders
    }

    /// The world boundary rectangle `[0, w] x [0, h]`.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Does `body` overlap any static collider?
    pub fn overlaps_any(&self, body: &Rect) -> bool {
        self.colliders.iter().any(|c| body.overlaps(c))
    }

    /// Resolve a proposed displacement against the static world.
    ///
    /// Each axis is tested independently, X then Y, so blockage in one
    /// axis never cancels sliding along the other. An axis whose movement
    /// would overlap a collider is zeroed for this tick; the world border
    /// clamps rather than zeroes. Never fails: the conservative answer to
    /// any ambiguous overlap is "don't move on that axis".
    pub fn resolve(&self, body: Rect, proposed: Vec2) -> Vec2 {
        let mut allowed = Vec2::ZERO;

        if proposed.x != 0.0 {
            let dx = clamp_axis(body.x + proposed.x, body.width, self.bounds.width) - body.x;
            if !self.overlaps_any(&body.translated(Vec2::new(dx, 0.0))) {
                allowed.x = dx;
            }
        }

        if proposed.y != 0.0 {
            let dy = clamp_axis(body.y + proposed.y, body.height, self.bounds.height) - body.y;
            let candidate = body.translated(Vec2::new(allowed.x, dy));
            if !self.overlaps_any(&candidate) {
                allowed.y = dy;
            }
        }

        allowed
    }
}

/// Keep `[pos, pos + extent]` inside `[0, limit]`.
fn clamp_axis(pos: f32, extent: f32, limit: f32) -> f32 {
    pos.clamp(0.0, (limit - extent).max(0.0))
}

// =============================================================================
// TESTS
// =============================================================================
