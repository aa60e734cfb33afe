//! Chase Trail - entity interaction and collision engine for two 2D arcade scenarios
//!
//! Core modules:
//! - `geometry`: Vector helpers (distance, move toward/away, rotation)
//! - `sim`: Deterministic simulation (chase world, trail game, spatial queries)
//! - `settings`: Data-driven tunables loaded from JSON
//! - `logging`: env_logger setup for the headless driver

pub mod geometry;
pub mod logging;
pub mod settings;
pub mod sim;

pub use geometry::{distance, move_away, move_toward, rotate_degrees};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use crate::sim::Color;

    /// Fixed simulation timestep (120 Hz, the frame cap both scenarios ran at)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Default world dimensions
    pub const WORLD_WIDTH: f32 = 1280.0;
    pub const WORLD_HEIGHT: f32 = 720.0;

    /// Everything not drawn is this color; the raster probe treats it as free space
    pub const BACKGROUND: Color = Color::rgb(0, 10, 30);

    /// Random spawn points keep this far from the edges
    pub const SPAWN_PADDING: f32 = 30.0;

    // === Chase ===
    pub const INITIAL_MONSTERS: usize = 10;
    pub const TREE_COUNT: usize = 10;
    /// Tree radius range (integer radii, end exclusive)
    pub const TREE_RADIUS_MIN: u32 = 20;
    pub const TREE_RADIUS_MAX: u32 = 100;
    pub const TREE_COLOR: Color = Color::rgb(0, 100, 0);
    /// Monster radius is `MIN + random * SPAN`
    pub const MONSTER_RADIUS_MIN: f32 = 5.0;
    pub const MONSTER_RADIUS_SPAN: f32 = 20.0;
    /// Monster speed (pixels per tick) is `random * MAX`
    pub const MONSTER_MAX_SPEED: f32 = 0.5;
    /// Monsters added per tick while the burst key is held
    pub const SPAWN_BURST: usize = 100;

    // === Trail ===
    pub const TRAIL_PLAYER_RADIUS: f32 = 3.0;
    /// Pixels per tick
    pub const TRAIL_SPEED: f32 = 1.0;
    pub const TRAIL_BOOST_SPEED: f32 = 2.0;
    /// Look-ahead distance in multiples of one tick's travel
    pub const LOOK_AHEAD_FACTOR: f32 = 5.0;
    /// Seconds a dead player waits before respawning
    pub const RESPAWN_COOLDOWN: f64 = 2.0;
    /// Distance from the edges of the fixed trail start positions
    pub const TRAIL_START_PAD: f32 = 100.0;
    pub const BULLET_SPEED: f32 = 2.0;
    pub const BULLET_RADIUS: f32 = 4.0;
    /// Bullets expire after this many ticks (5 seconds at 120 Hz)
    pub const BULLET_TTL_TICKS: u32 = 5 * 120;
    pub const BULLET_COLOR: Color = Color::rgb(255, 255, 255);
}
