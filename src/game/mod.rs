//! Game Logic Module
//!
//! The simulation side of the crate: everything that runs inside the
//! per-tick loop.
//!
//! ## Module Structure
//!
//! - `input`: key sampling, direction derivation, intent throttling
//! - `map`: minimal tilemap adapter schema
//! - `collision`: static collider set, per-axis movement resolution
//! - `motion`: local and remote per-tick position updates
//! - `animation`: clip selection and facing
//! - `camera`: viewport follower
//! - `state`: entity and scene aggregates
//! - `tick`: the fixed per-tick pipeline

pub mod animation;
pub mod camera;
pub mod collision;
pub mod input;
pub mod map;
pub mod motion;
pub mod state;
pub mod tick;

// Re-export key types
pub use animation::{AnimationClip, Facing};
pub use camera::CameraFollower;
pub use collision::CollisionWorld;
pub use input::{IntentThrottle, KeySnapshot, Keyboard, MoveIntent};
pub use map::MapData;
pub use motion::MotionState;
pub use state::{ControlMode, Entity, EntityId, SceneError, SceneState};
pub use tick::{tick, FrameInput, TickConfig, TickResult};
