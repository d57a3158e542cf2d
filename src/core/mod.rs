//! Core math primitives.
//!
//! Pure, stateless geometry used by every other module: vectors for
//! positions/velocities and axis-aligned rectangles for bodies and
//! colliders.

pub mod rect;
pub mod vec2;

// Re-export core types
pub use rect::Rect;
pub use vec2::Vec2;
