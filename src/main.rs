//! Emberhollow Simulation Harness
//!
//! Headless demo of the movement core: walks a scripted player through a
//! small walled map while a stand-in server drives a second entity, then
//! reports what went over the wire.

use anyhow::Context;
use chrono::Utc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use emberhollow::{
    tick, CollisionWorld, EntityId, FrameInput, KeySnapshot, Keyboard, MapData, PositionUpdate,
    SceneState, TickConfig, Vec2, TICK_RATE, VERSION,
};

/// A small test map: bordered 25x19 room with a pillar in the middle.
const DEMO_MAP: &str = r#"{
    "width": 25,
    "height": 19,
    "tile_width": 32.0,
    "tile_height": 32.0,
    "solid_cells": [
        {"col": 12, "row": 8},
        {"col": 12, "row": 9},
        {"col": 13, "row": 8},
        {"col": 13, "row": 9}
    ],
    "objects": [
        {"kind": "wall", "x": 0.0,   "y": 0.0,   "width": 800.0, "height": 32.0},
        {"kind": "wall", "x": 0.0,   "y": 576.0, "width": 800.0, "height": 32.0},
        {"kind": "wall", "x": 0.0,   "y": 0.0,   "width": 32.0,  "height": 608.0},
        {"kind": "wall", "x": 768.0, "y": 0.0,   "width": 32.0,  "height": 608.0},
        {"kind": "decoration", "x": 200.0, "y": 400.0, "width": 48.0, "height": 24.0, "collides": true},
        {"kind": "decoration", "x": 600.0, "y": 120.0, "width": 16.0, "height": 16.0}
    ]
}"#;

/// Patrol waypoints the stand-in server walks the remote entity through.
const WAYPOINTS: [Vec2; 4] = [
    Vec2::new(600.0, 100.0),
    Vec2::new(600.0, 500.0),
    Vec2::new(120.0, 500.0),
    Vec2::new(120.0, 100.0),
];

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Emberhollow movement core v{}", VERSION);
    info!("Tick rate: {} Hz", TICK_RATE);

    demo_walk()
}

/// Held keys for a given demo tick: east along the top wall, south until
/// the pillar blocks, then south-west to slide along its edge, then rest.
fn scripted_keys(t: u32) -> KeySnapshot {
    match t {
        0..=179 => KeySnapshot {
            right: true,
            ..KeySnapshot::IDLE
        },
        180..=359 => KeySnapshot {
            down: true,
            ..KeySnapshot::IDLE
        },
        360..=399 => KeySnapshot {
            down: true,
            left: true,
            ..KeySnapshot::IDLE
        },
        _ => KeySnapshot::IDLE,
    }
}

fn demo_walk() -> anyhow::Result<()> {
    info!("=== Starting Demo Walk ===");

    let map: MapData = serde_json::from_str(DEMO_MAP).context("demo map is not valid JSON")?;
    let world_size = map.world_size();
    let world = CollisionWorld::from_map(&map);
    info!(
        colliders = world.colliders().len(),
        size = %world_size,
        "world built"
    );

    let mut scene = SceneState::new(world, Some(Keyboard::attach()));
    let mut intent_drain = scene.connect_transport();
    let position_feed = scene.position_feed();

    let player = scene
        .spawn_local(Vec2::new(100.0, 100.0))
        .context("spawning the player")?;
    let patrol = EntityId::random();
    scene
        .spawn_remote(patrol, WAYPOINTS[3])
        .context("spawning the patrol")?;

    info!(%player, %patrol, "entities spawned");

    let start_ms = Utc::now().timestamp_millis() as u64;
    let dt = 1.0 / TICK_RATE as f32;
    let config = TickConfig::default();

    for t in 0..420u32 {
        // Stand-in server: new authoritative waypoint every 90 ticks
        if t % 90 == 0 {
            let waypoint = WAYPOINTS[(t / 90) as usize % WAYPOINTS.len()];
            position_feed
                .send(PositionUpdate {
                    entity_id: patrol,
                    position: waypoint,
                })
                .context("feeding patrol waypoint")?;
        }

        let frame = FrameInput {
            keys: scripted_keys(t),
            look_target: Some(Vec2::new(400.0, 300.0)),
            dt,
            now_ms: start_ms + (t as u64 * 1000) / TICK_RATE as u64,
        };
        tick(&mut scene, &frame, &config);

        if t % 60 == 0 {
            let p = scene.entity(player).expect("player alive");
            let r = scene.entity(patrol).expect("patrol alive");
            info!(
                tick = t,
                player = %p.position,
                clip = p.animation.key(),
                flip = p.facing.flip_x(),
                patrol = %r.position,
                "state"
            );
        }
    }

    // What would have gone over the wire
    let mut intents = Vec::new();
    while let Ok(message) = intent_drain.try_recv() {
        intents.push(message);
    }
    info!("dispatched {} intents over {} ticks", intents.len(), 420);
    if let Some(first) = intents.first() {
        info!("first intent on the wire: {}", serde_json::to_string(first)?);
    }

    let p = scene.entity(player).expect("player alive");
    info!("=== Final player position: {} ({}) ===", p.position, p.animation.key());

    Ok(())
}
