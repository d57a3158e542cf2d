//! # Emberhollow Movement Core
//!
//! Entity motion and collision for the Emberhollow client: held keys (or
//! server-fed positions) in, collision-respecting positions plus
//! animation state out, with a camera easing behind.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  EMBERHOLLOW MOVEMENT CORE                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Math primitives                           │
//! │  ├── vec2.rs     - f32 world-space vectors                   │
//! │  └── rect.rs     - Axis-aligned rectangles                   │
//! │                                                              │
//! │  game/           - Per-tick simulation                       │
//! │  ├── input.rs    - Key sampling, intent throttling           │
//! │  ├── map.rs      - Tilemap adapter schema                    │
//! │  ├── collision.rs- Static AABB world, axis resolution        │
//! │  ├── motion.rs   - Local & remote position updates           │
//! │  ├── animation.rs- Clip selection, facing                    │
//! │  ├── camera.rs   - Viewport follower                         │
//! │  ├── state.rs    - Entity and scene aggregates               │
//! │  └── tick.rs     - The fixed pipeline                        │
//! │                                                              │
//! │  network/        - Transport edge (no I/O)                   │
//! │  ├── protocol.rs - Wire message shapes                       │
//! │  └── channel.rs  - SPSC handoffs to the transport task       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two drive modes, one pipeline
//!
//! A locally-controlled entity turns this tick's held keys into a
//! displacement and resolves it against the collision world. A remote
//! entity eases toward the last authoritative position the server sent
//! and snaps once close enough. Both kinds coexist in one scene and are
//! serviced by the same [`game::tick::tick`] call, which runs every
//! component in a fixed order each simulation step.
//!
//! The tick loop is single-threaded. The transport crosses into it only
//! through channels: authoritative positions buffer up and land at the
//! start of the next tick, throttled intents queue out as they are
//! sampled. Nothing in the loop blocks.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod network;

// Re-export commonly used types
pub use self::core::rect::Rect;
pub use self::core::vec2::Vec2;
pub use self::game::animation::{AnimationClip, Facing};
pub use self::game::camera::CameraFollower;
pub use self::game::collision::CollisionWorld;
pub use self::game::input::{KeySnapshot, Keyboard, MoveIntent};
pub use self::game::map::MapData;
pub use self::game::motion::MotionState;
pub use self::game::state::{ControlMode, Entity, EntityId, SceneError, SceneState};
pub use self::game::tick::{tick, FrameInput, TickConfig, TickResult};
pub use self::network::protocol::{ClientMessage, PositionUpdate, ServerMessage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
