//! Motion Controller
//!
//! Per-tick position and velocity updates for both drive modes. Sole
//! writer of `Entity::position` and `Entity::velocity` during a tick.
//! There is no inertia model: speed is instantaneous and symmetric, and
//! `velocity` exists for the animation/facing decision, not as momentum.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::game::collision::CollisionWorld;
use crate::game::state::Entity;

/// Default speed for the locally-controlled entity, units/second.
pub const LOCAL_MOVE_SPEED: f32 = 100.0;

/// Default speed hint for remote-driven entities, units/second.
pub const REMOTE_MOVE_SPEED: f32 = 200.0;

/// Per-tick easing factor toward the authoritative target.
pub const SMOOTHING_FACTOR: f32 = 0.2;

/// Distance below which a remote entity lands exactly on its target.
pub const SNAP_EPSILON: f32 = 0.5;

/// Coarse movement state, re-derived from input every tick rather than
/// stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    /// No direction held
    #[default]
    Idle,
    /// At least one direction held
    Moving,
}

/// Movement state for this tick's direction.
pub fn motion_state(direction: Vec2) -> MotionState {
    if direction == Vec2::ZERO {
        MotionState::Idle
    } else {
        MotionState::Moving
    }
}

/// Advance a locally-controlled entity by one tick.
///
/// The proposed displacement `direction * speed * dt` is resolved against
/// the static world; whatever survives is applied. The direction arrives
/// already unit-normalized from input sampling, so diagonal speed equals
/// axial speed, and an axis blocked by collision simply stops
/// contributing with no re-normalization of the other.
pub fn step_local(entity: &mut Entity, world: &CollisionWorld, direction: Vec2, dt: f32) {
    if dt <= 0.0 {
        return;
    }

    let proposed = direction * (entity.move_speed * dt);
    let allowed = world.resolve(entity.aabb(), proposed);

    entity.position += allowed;
    entity.velocity = allowed / dt;
}

/// Advance a remote-driven entity by one tick.
///
/// Exponential ease toward the last authoritative target, landing exactly
/// on it once within `snap_epsilon` so the approach terminates instead of
/// jittering sub-pixel forever. The factor is applied once per fixed
/// tick; a variable-rate host must derive it from elapsed time
/// (`1 - exp(-k * dt)`) or responsiveness will vary with frame rate.
pub fn step_remote(entity: &mut Entity, smoothing: f32, snap_epsilon: f32, dt: f32) {
    if entity.position == entity.target_position {
        entity.velocity = Vec2::ZERO;
        return;
    }

    let previous = entity.position;
    let mut next = previous.lerp(entity.target_position, smoothing);
    if next.distance(entity.target_position) < snap_epsilon {
        next = entity.target_position;
    }

    entity.position = next;
    entity.velocity = if dt > 0.0 {
        (next - previous) / dt
    } else {
        Vec2::ZERO
    };
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rect::Rect;
    use crate::game::input::KeySnapshot;
    use crate::game::state::{ControlMode, EntityId};
    use proptest::prelude::*;

    const WORLD: Vec2 = Vec2::new(1000.0, 1000.0);

    fn open_world() -> CollisionWorld {
        CollisionWorld::new(Vec::new(), WORLD)
    }

    fn local_entity(position: Vec2) -> Entity {
        Entity::new(EntityId::random(), ControlMode::Local, position, LOCAL_MOVE_SPEED)
    }

    fn remote_entity(position: Vec2, target: Vec2) -> Entity {
        let mut e = Entity::new(EntityId::random(), ControlMode::Remote, position, REMOTE_MOVE_SPEED);
        e.target_position = target;
        e
    }

    #[test]
    fn test_local_step_moves_by_speed_times_dt() {
        let world = open_world();
        let mut entity = local_entity(Vec2::new(100.0, 100.0));

        step_local(&mut entity, &world, Vec2::new(1.0, 0.0), 0.1);

        assert_eq!(entity.position, Vec2::new(110.0, 100.0));
        assert_eq!(entity.velocity, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_local_step_idle_zeroes_velocity() {
        let world = open_world();
        let mut entity = local_entity(Vec2::new(100.0, 100.0));
        entity.velocity = Vec2::new(100.0, 0.0);

        step_local(&mut entity, &world, Vec2::ZERO, 0.1);

        assert_eq!(entity.position, Vec2::new(100.0, 100.0));
        assert_eq!(entity.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_blocked_axis_keeps_other_axis_speed() {
        // Wall immediately right of the body
        let world = CollisionWorld::new(vec![Rect::new(105.0, 0.0, 20.0, 1000.0)], WORLD);
        let mut entity = local_entity(Vec2::new(100.0, 100.0));

        let diagonal = KeySnapshot {
            up: false,
            down: true,
            left: false,
            right: true,
        }
        .direction();
        step_local(&mut entity, &world, diagonal, 0.1);

        // X blocked; Y advances by its diagonal share, not re-normalized
        assert_eq!(entity.position.x, 100.0);
        let expected_dy = LOCAL_MOVE_SPEED * 0.1 * std::f32::consts::FRAC_1_SQRT_2;
        assert!((entity.position.y - (100.0 + expected_dy)).abs() < 1e-3);
        assert_eq!(entity.velocity.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_displacement_magnitude_is_speed_times_dt(
            up in proptest::bool::ANY,
            left in proptest::bool::ANY,
            two_axes in proptest::bool::ANY,
        ) {
            // Opposite-axis-free input: one or two active axes
            let keys = KeySnapshot {
                up,
                down: !up,
                left: two_axes && left,
                right: two_axes && !left,
            };
            let world = open_world();
            let mut entity = local_entity(Vec2::new(500.0, 500.0));
            let start = entity.position;

            step_local(&mut entity, &world, keys.direction(), 0.1);

            let displacement = entity.position.distance(start);
            prop_assert!((displacement - LOCAL_MOVE_SPEED * 0.1).abs() < 1e-3);
        }
    }

    #[test]
    fn test_remote_step_eases_by_factor() {
        let mut entity = remote_entity(Vec2::ZERO, Vec2::new(10.0, 0.0));

        step_remote(&mut entity, SMOOTHING_FACTOR, SNAP_EPSILON, 0.1);

        assert_eq!(entity.position, Vec2::new(2.0, 0.0));
        assert!(entity.velocity.x > 0.0);
    }

    #[test]
    fn test_remote_step_converges_and_snaps_exactly() {
        let target = Vec2::new(10.0, 0.0);
        let mut entity = remote_entity(Vec2::ZERO, target);

        let mut ticks = 0;
        while entity.position != target {
            step_remote(&mut entity, SMOOTHING_FACTOR, SNAP_EPSILON, 0.1);
            ticks += 1;
            assert!(ticks <= 30, "smoothing did not converge");
        }

        // Exact, not approximate
        assert_eq!(entity.position, target);
    }

    #[test]
    fn test_remote_step_at_target_is_at_rest() {
        let here = Vec2::new(42.0, 42.0);
        let mut entity = remote_entity(here, here);
        entity.velocity = Vec2::new(5.0, 5.0);

        step_remote(&mut entity, SMOOTHING_FACTOR, SNAP_EPSILON, 0.1);

        assert_eq!(entity.position, here);
        assert_eq!(entity.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_remote_retarget_redirects_easing() {
        let mut entity = remote_entity(Vec2::ZERO, Vec2::new(10.0, 0.0));
        step_remote(&mut entity, SMOOTHING_FACTOR, SNAP_EPSILON, 0.1);

        // Newer authoritative update overwrites the target outright
        entity.target_position = Vec2::new(0.0, 10.0);
        step_remote(&mut entity, SMOOTHING_FACTOR, SNAP_EPSILON, 0.1);

        assert!(entity.position.y > 0.0);
        assert!(entity.position.x < 2.0);
    }

    #[test]
    fn test_motion_state_is_pure_function_of_direction() {
        assert_eq!(motion_state(Vec2::ZERO), MotionState::Idle);
        assert_eq!(motion_state(Vec2::new(0.0, -1.0)), MotionState::Moving);
        assert_eq!(motion_state(Vec2::new(0.7, 0.7)), MotionState::Moving);
    }
}
