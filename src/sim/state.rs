//! Entity types and their lifecycle state
//!
//! Players, monsters, trees and bullets share a small capability set:
//! every entity is a circle ([`Body`]) that can draw itself ([`Drawable`]).
//! Movement differs per entity and lives with the scenario that drives it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::input::{Bindings, Command};
use super::raster::RenderSurface;
use crate::consts::*;
use crate::{Settings, rotate_degrees};

/// Stable entity handle, allocated monotonically per world
pub type EntityId = u32;

/// RGBA color, compared exactly by the raster probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Uniformly random opaque color
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::rgb(rng.random(), rng.random(), rng.random())
    }
}

/// A circle that takes part in distance queries
pub trait Body {
    fn position(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// Anything that can paint itself onto a render surface
pub trait Drawable {
    fn draw(&self, surface: &mut dyn RenderSurface);
}

/// Uniform random point at least `pad` away from every edge
///
/// Falls back to the world center along an axis too small to hold the padding.
pub fn random_position(rng: &mut impl Rng, width: f32, height: f32, pad: f32) -> Vec2 {
    Vec2::new(padded_coord(rng, width, pad), padded_coord(rng, height, pad))
}

fn padded_coord(rng: &mut impl Rng, extent: f32, pad: f32) -> f32 {
    if extent - pad > pad {
        rng.random_range(pad..extent - pad).floor()
    } else {
        extent / 2.0
    }
}

/// Player lifecycle (only the trail game ever kills a player)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Lifecycle {
    Alive,
    /// Dead since the given simulation time (seconds)
    Dead { since: f64 },
}

/// A player entity, used by both scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub name: String,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Normal speed scalar (pixels/second in chase, pixels/tick in trail)
    pub speed: f32,
    /// Speed scalar while boosted
    pub boost_speed: f32,
    pub boosted: bool,
    pub lifecycle: Lifecycle,
    /// Heading for the trail game (unit length)
    pub facing: Vec2,
    /// Per-player key table for the trail game
    #[serde(skip)]
    pub bindings: Bindings,
}

impl Player {
    pub fn new(id: EntityId, name: impl Into<String>, pos: Vec2, radius: f32, color: Color) -> Self {
        Self {
            id,
            name: name.into(),
            pos,
            radius,
            color,
            speed: TRAIL_SPEED,
            boost_speed: TRAIL_BOOST_SPEED,
            boosted: false,
            lifecycle: Lifecycle::Alive,
            facing: Vec2::X,
            bindings: Bindings::default(),
        }
    }

    pub fn with_speeds(mut self, speed: f32, boost_speed: f32) -> Self {
        self.speed = speed;
        self.boost_speed = boost_speed;
        self
    }

    pub fn with_bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Alive)
    }

    /// Speed scalar currently in effect
    #[inline]
    pub fn current_speed(&self) -> f32 {
        if self.boosted { self.boost_speed } else { self.speed }
    }

    /// Apply a turn or speed command. `Shoot` needs the world and is handled there.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::TurnLeft => self.facing = rotate_degrees(self.facing, -90.0),
            Command::TurnRight => self.facing = rotate_degrees(self.facing, 90.0),
            Command::SpeedUp => self.boosted = true,
            Command::SpeedNormal => self.boosted = false,
            Command::Shoot => {}
        }
    }

    /// Transition to Dead at `now`
    pub fn die(&mut self, now: f64) {
        self.lifecycle = Lifecycle::Dead { since: now };
    }

    /// Whether a dead player has waited strictly longer than `cooldown`
    pub fn ready_to_respawn(&self, now: f64, cooldown: f64) -> bool {
        match self.lifecycle {
            Lifecycle::Dead { since } => now - since > cooldown,
            Lifecycle::Alive => false,
        }
    }

    /// Transition back to Alive at `pos`
    pub fn respawn(&mut self, pos: Vec2) {
        self.lifecycle = Lifecycle::Alive;
        self.pos = pos;
    }
}

impl Body for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

impl Drawable for Player {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_circle(self.pos, self.radius, self.color);
    }
}

/// A mobile monster that evades (or chases) the nearest visible player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Pixels per tick
    pub speed: f32,
    pub fleeing: bool,
}

impl Monster {
    /// Random size, speed and color; position given or random
    pub fn random(id: EntityId, rng: &mut impl Rng, pos: Option<Vec2>, settings: &Settings) -> Self {
        let pos = match pos {
            Some(pos) => pos,
            None => random_position(rng, settings.world_width, settings.world_height, SPAWN_PADDING),
        };
        Self {
            id,
            pos,
            radius: rng.random::<f32>() * settings.monster_radius_span + settings.monster_radius_min,
            color: Color::random(rng),
            speed: rng.random::<f32>() * settings.monster_max_speed,
            fleeing: settings.monsters_flee,
        }
    }
}

impl Body for Monster {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

impl Drawable for Monster {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_circle(self.pos, self.radius, self.color);
    }
}

/// Static obstacle that can conceal players
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub pos: Vec2,
    pub radius: f32,
}

impl Body for Tree {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

impl Drawable for Tree {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_circle(self.pos, self.radius, TREE_COLOR);
    }
}

/// A bullet fired by a trail player; erases whatever it passes over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    /// Id of the firing player. Bullets never keep the player alive or borrow it.
    pub owner: EntityId,
    pub pos: Vec2,
    /// Facing scaled by the bullet speed. [`Bullet::step`] scales it by the
    /// speed again, so a half-step covers `speed * speed` pixels.
    pub vel: Vec2,
    pub radius: f32,
    pub ttl_ticks: u32,
}

impl Bullet {
    pub fn fired_by(id: EntityId, player: &Player, speed: f32, radius: f32, ttl_ticks: u32) -> Self {
        let vel = player.facing.normalize_or_zero() * speed;
        Self {
            id,
            owner: player.id,
            pos: player.pos + vel,
            vel,
            radius,
            ttl_ticks,
        }
    }

    /// Advance one half-step of `vel * speed`
    #[inline]
    pub fn step(&mut self, speed: f32) {
        self.pos += self.vel * speed;
    }

    /// Paint background over the bullet's footprint (one pixel wider)
    pub fn erase(&self, surface: &mut dyn RenderSurface, background: Color) {
        surface.draw_circle(self.pos, self.radius + 1.0, background);
    }
}

impl Body for Bullet {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

impl Drawable for Bullet {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_circle(self.pos, self.radius, BULLET_COLOR);
    }
}
