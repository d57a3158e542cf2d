//! Tilemap Adapter
//!
//! Minimal schema the core requires from whatever loads the source map.
//! The engine-side loader parses its own format (Tiled JSON, CSV, ...)
//! and hands over this description; the core never sees the raw file.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;

/// One cell of the collision layer, in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidCell {
    /// Column index (0-based)
    pub col: u32,
    /// Row index (0-based)
    pub row: u32,
}

/// A placed object from the source map's object layers.
///
/// `kind` is the source map's free-form type string; it is resolved into
/// [`ObjectKind`] exactly once during world construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectData {
    /// Source type string ("wall", "decoration", ...)
    pub kind: String,
    /// Left edge, world pixels
    pub x: f32,
    /// Top edge, world pixels
    pub y: f32,
    /// Width, world pixels
    pub width: f32,
    /// Height, world pixels
    pub height: f32,
    /// Blocking flag from the source map
    #[serde(default)]
    pub collides: bool,
}

/// Closed set of object kinds the core understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    /// Visual-only placement; blocks movement only when flagged `collides`
    Decoration,
    /// Always blocks movement
    Wall,
}

impl ObjectKind {
    /// Resolve a source type string. Unknown strings are `None` and the
    /// object is skipped during world construction.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "decoration" => Some(Self::Decoration),
            "wall" => Some(Self::Wall),
            _ => None,
        }
    }
}

/// Everything the core needs to know about a map.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MapData {
    /// World width in tiles
    pub width: u32,
    /// World height in tiles
    pub height: u32,
    /// Tile width in world pixels
    pub tile_width: f32,
    /// Tile height in world pixels
    pub tile_height: f32,
    /// Cells flagged solid by the source map's collision layer.
    /// `None` when the source map has no such layer.
    #[serde(default)]
    pub solid_cells: Option<Vec<SolidCell>>,
    /// Placed objects
    #[serde(default)]
    pub objects: Vec<ObjectData>,
}

impl MapData {
    /// World size in pixels.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_width,
            self.height as f32 * self.tile_height,
        )
    }

    /// A map that cannot produce sane geometry (zero tiles or
    /// non-positive tile size).
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0 || self.tile_width <= 0.0 || self.tile_height <= 0.0
    }
}

/// Build the static collider list for a map.
///
/// Degrades instead of failing: a degenerate map or a missing collision
/// layer yields fewer (or zero) colliders and a warning, never an error.
/// The world stays explorable either way.
pub fn collect_colliders(map: &MapData) -> Vec<Rect> {
    if map.is_degenerate() {
        warn!(
            width = map.width,
            height = map.height,
            "degenerate map data, building world without colliders"
        );
        return Vec::new();
    }

    let mut colliders = Vec::new();

    match &map.solid_cells {
        Some(cells) => {
            for cell in cells {
                if cell.col >= map.width || cell.row >= map.height {
                    warn!(col = cell.col, row = cell.row, "solid cell outside map, skipping");
                    continue;
                }
                colliders.push(Rect::new(
                    cell.col as f32 * map.tile_width,
                    cell.row as f32 * map.tile_height,
                    map.tile_width,
                    map.tile_height,
                ));
            }
        }
        None => {
            warn!("map has no collision layer, walls disabled");
        }
    }

    for object in &map.objects {
        let Some(kind) = ObjectKind::parse(&object.kind) else {
            warn!(kind = %object.kind, "unknown map object kind, skipping");
            continue;
        };

        let blocks = match kind {
            ObjectKind::Wall => true,
            ObjectKind::Decoration => object.collides,
        };
        if blocks {
            colliders.push(Rect::new(object.x, object.y, object.width, object.height));
        }
    }

    colliders
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn base_map() -> MapData {
        MapData {
            width: 10,
            height: 8,
            tile_width: 32.0,
            tile_height: 32.0,
            solid_cells: Some(vec![SolidCell { col: 0, row: 0 }, SolidCell { col: 3, row: 2 }]),
            objects: Vec::new(),
        }
    }

    #[test]
    fn test_world_size() {
        assert_eq!(base_map().world_size(), Vec2::new(320.0, 256.0));
    }

    #[test]
    fn test_solid_cells_become_tile_rects() {
        let colliders = collect_colliders(&base_map());
        assert_eq!(colliders.len(), 2);
        assert_eq!(colliders[0], Rect::new(0.0, 0.0, 32.0, 32.0));
        assert_eq!(colliders[1], Rect::new(96.0, 64.0, 32.0, 32.0));
    }

    #[test]
    fn test_missing_collision_layer_degrades_to_empty() {
        let mut map = base_map();
        map.solid_cells = None;
        assert!(collect_colliders(&map).is_empty());
    }

    #[test]
    fn test_degenerate_map_degrades_to_empty() {
        let mut map = base_map();
        map.tile_width = 0.0;
        assert!(collect_colliders(&map).is_empty());

        let mut map = base_map();
        map.height = 0;
        assert!(collect_colliders(&map).is_empty());
    }

    #[test]
    fn test_out_of_range_cell_skipped() {
        let mut map = base_map();
        map.solid_cells = Some(vec![
            SolidCell { col: 99, row: 0 },
            SolidCell { col: 1, row: 1 },
        ]);
        let colliders = collect_colliders(&map);
        assert_eq!(colliders.len(), 1);
        assert_eq!(colliders[0], Rect::new(32.0, 32.0, 32.0, 32.0));
    }

    #[test]
    fn test_object_kinds() {
        let mut map = base_map();
        map.solid_cells = Some(Vec::new());
        map.objects = vec![
            ObjectData {
                kind: "wall".into(),
                x: 10.0,
                y: 10.0,
                width: 64.0,
                height: 8.0,
                collides: false,
            },
            ObjectData {
                kind: "decoration".into(),
                x: 50.0,
                y: 50.0,
                width: 16.0,
                height: 16.0,
                collides: true,
            },
            ObjectData {
                kind: "decoration".into(),
                x: 70.0,
                y: 70.0,
                width: 16.0,
                height: 16.0,
                collides: false,
            },
            // Unknown kind: skipped even though flagged solid
            ObjectData {
                kind: "portal".into(),
                x: 90.0,
                y: 90.0,
                width: 16.0,
                height: 16.0,
                collides: true,
            },
        ];

        let colliders = collect_colliders(&map);
        assert_eq!(colliders.len(), 2);
        assert_eq!(colliders[0], Rect::new(10.0, 10.0, 64.0, 8.0));
        assert_eq!(colliders[1], Rect::new(50.0, 50.0, 16.0, 16.0));
    }

    #[test]
    fn test_schema_roundtrips_through_json() {
        let json = r#"{
            "width": 4,
            "height": 4,
            "tile_width": 16.0,
            "tile_height": 16.0,
            "solid_cells": [{"col": 1, "row": 2}],
            "objects": [
                {"kind": "wall", "x": 0.0, "y": 0.0, "width": 64.0, "height": 4.0}
            ]
        }"#;

        let map: MapData = serde_json::from_str(json).unwrap();
        assert_eq!(map.width, 4);
        assert_eq!(map.objects.len(), 1);
        assert!(!map.objects[0].collides); // defaulted

        let colliders = collect_colliders(&map);
        assert_eq!(colliders.len(), 2);
    }
}
