//! Simulation settings
//!
//! Every tunable both scenarios read at reset time. Loaded from a JSON file
//! on the command line; missing fields fall back to the defaults in
//! [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{BoundaryPolicy, Color};

/// Starting parameters for one chase player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChasePlayerSpec {
    pub name: String,
    /// Pixels per second
    pub speed: f32,
    /// Pixels per second while the boost key is held
    pub boost_speed: f32,
    pub radius: f32,
    pub color: Color,
}

/// Simulation settings/tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for world generation and spawns
    pub seed: u64,
    pub world_width: f32,
    pub world_height: f32,
    pub background: Color,

    // === Chase ===
    pub chase_players: Vec<ChasePlayerSpec>,
    pub initial_monsters: usize,
    pub tree_count: usize,
    pub tree_radius_min: u32,
    pub tree_radius_max: u32,
    pub monster_radius_min: f32,
    pub monster_radius_span: f32,
    pub monster_max_speed: f32,
    /// Monsters added per tick while the burst key is held
    pub spawn_burst: usize,
    /// Monsters run from players when true, hunt them otherwise
    pub monsters_flee: bool,
    pub chase_boundary: BoundaryPolicy,

    // === Trail ===
    pub trail_radius: f32,
    pub trail_speed: f32,
    pub trail_boost_speed: f32,
    pub look_ahead_factor: f32,
    /// Seconds of simulation time
    pub respawn_cooldown: f64,
    pub trail_start_pad: f32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub bullet_ttl_ticks: u32,
    pub trail_boundary: BoundaryPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            background: BACKGROUND,

            chase_players: vec![
                ChasePlayerSpec {
                    name: "red".into(),
                    speed: 300.0,
                    boost_speed: 600.0,
                    radius: 20.0,
                    color: Color::RED,
                },
                ChasePlayerSpec {
                    name: "yellow".into(),
                    speed: 200.0,
                    boost_speed: 500.0,
                    radius: 30.0,
                    color: Color::YELLOW,
                },
            ],
            initial_monsters: INITIAL_MONSTERS,
            tree_count: TREE_COUNT,
            tree_radius_min: TREE_RADIUS_MIN,
            tree_radius_max: TREE_RADIUS_MAX,
            monster_radius_min: MONSTER_RADIUS_MIN,
            monster_radius_span: MONSTER_RADIUS_SPAN,
            monster_max_speed: MONSTER_MAX_SPEED,
            spawn_burst: SPAWN_BURST,
            monsters_flee: true,
            chase_boundary: BoundaryPolicy::Clamp,

            trail_radius: TRAIL_PLAYER_RADIUS,
            trail_speed: TRAIL_SPEED,
            trail_boost_speed: TRAIL_BOOST_SPEED,
            look_ahead_factor: LOOK_AHEAD_FACTOR,
            respawn_cooldown: RESPAWN_COOLDOWN,
            trail_start_pad: TRAIL_START_PAD,
            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            bullet_ttl_ticks: BULLET_TTL_TICKS,
            trail_boundary: BoundaryPolicy::Wrap,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Same settings with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// World extent as a vector
    pub fn world_size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.world_width, self.world_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "world_width": 640.0, "monsters_flee": false }"#)
            .expect("valid json");
        assert_eq!(settings.world_width, 640.0);
        assert!(!settings.monsters_flee);
        assert_eq!(settings.world_height, WORLD_HEIGHT);
        assert_eq!(settings.chase_players.len(), 2);
        assert_eq!(settings.trail_boundary, BoundaryPolicy::Wrap);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let settings = Settings::load(Path::new("/definitely/not/here/settings.json"));
        assert_eq!(settings.initial_monsters, INITIAL_MONSTERS);
    }

    #[test]
    fn test_round_trip_through_json() {
        let settings = Settings::default().with_seed(42);
        let json = serde_json::to_string(&settings).expect("serialize");
        let back = Settings::from_json(&json).expect("deserialize");
        assert_eq!(back.seed, 42);
        assert_eq!(back.background, BACKGROUND);
    }
}
