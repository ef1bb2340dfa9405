//! Hex Arena - collect-and-race on a hexagonal platform
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, hits, collectibles, scoring)
//! - `platform`: Browser/native platform abstraction (time, storage, JS bindings)
//! - `settings`: Difficulty and match rules
//! - `highscores`: Player leaderboard

pub mod error;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{ArenaError, ArenaResult};
pub use highscores::HighScores;
pub use settings::{Difficulty, Rules, Settings};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per displayed frame at 60 FPS)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Simulation ticks per second
    pub const TICKS_PER_SEC: u32 = 60;

    /// Platform circumradius (world units)
    pub const PLATFORM_RADIUS: f32 = 12.0;

    /// Actor footprint radius
    pub const ACTOR_RADIUS: f32 = 0.5;
    /// Player run speed (units/s)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// NPC base speed before difficulty scaling (units/s)
    pub const NPC_SPEED: f32 = 3.6;

    /// Actor-to-collectible distance that starts a pickup
    pub const PICKUP_RADIUS: f32 = 0.9;
    /// Actor-to-actor distance that counts as a hit
    pub const HIT_DISTANCE: f32 = 2.0 * ACTOR_RADIUS;
    /// How long a hit actor stays stunned (0.75 s)
    pub const HIT_DURATION_TICKS: u64 = 45;
    /// Ticks after a hit clears before the same actor can be hit again
    pub const HIT_COOLDOWN_TICKS: u32 = 30;
    /// Extra separation applied on top of the hit distance when actors collide
    pub const KNOCKBACK: f32 = 0.6;

    /// Collect animation length (seconds)
    pub const COLLECT_DURATION: f32 = 0.5;
    /// Minimum distance between a new collectible and any actor/collectible
    pub const SPAWN_CLEARANCE: f32 = 1.5;
    /// Placement attempts per spawn before giving up
    pub const SPAWN_ATTEMPTS: u32 = 16;

    /// NPCs never pick a wander point closer than this
    pub const NPC_MIN_TARGET_DIST: f32 = 3.0;
    /// A point target counts as reached inside this distance
    pub const NPC_ARRIVE_DIST: f32 = 0.25;

    /// Pending events kept for the presentation layer
    pub const MAX_EVENTS: usize = 256;
}

/// Project a vector onto the ground (XZ) plane
#[inline]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Distance between two points measured on the ground plane
#[inline]
pub fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(a - b).length()
}

/// Yaw angle (radians) of a ground direction, 0 = facing +Z
#[inline]
pub fn heading_of(dir: Vec3) -> f32 {
    dir.x.atan2(dir.z)
}
