//! Chase scenario: monsters react to players, players swallow monsters
//!
//! Per tick: reset/spawn requests, player steering, monster pursuit or
//! evasion against the players no tree conceals, edge clamping, then one
//! absorption pass whose removals are applied after the pass.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{hidden_by, remove_absorbed, resolve_absorptions};
use super::pursuit::{nearest, resolve};
use super::raster::RenderSurface;
use super::state::{Drawable, EntityId, Monster, Player, Tree, random_position};
use super::tick::{GameEvent, Scenario};
use crate::Settings;
use crate::consts::SPAWN_PADDING;

/// Held-key state for one player
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerControl {
    /// Held directions, each axis in -1..=1. Diagonals are not normalized.
    pub steer: Vec2,
    pub boost: bool,
}

/// Input for one chase tick
#[derive(Debug, Clone, Default)]
pub struct ChaseInput {
    /// Controls by player index; missing entries mean "no keys held"
    pub players: Vec<PlayerControl>,
    /// Spawn one monster at each point (mouse release)
    pub spawn_at: Vec<Vec2>,
    /// Spawn a burst of random monsters
    pub spawn_burst: bool,
    pub reset: bool,
    pub quit: bool,
    /// Idle/demo mode - players hunt the nearest monster on their own
    pub idle_mode: bool,
}

/// The chase world (sole owner of its entities)
#[derive(Debug, Clone)]
pub struct ChaseWorld {
    pub settings: Settings,
    pub players: Vec<Player>,
    pub monsters: Vec<Monster>,
    pub trees: Vec<Tree>,
    pub time_ticks: u64,
    rng: Pcg32,
    next_id: EntityId,
}

impl ChaseWorld {
    pub fn new(settings: Settings) -> Self {
        let rng = Pcg32::seed_from_u64(settings.seed);
        let mut world = Self {
            settings,
            players: Vec::new(),
            monsters: Vec::new(),
            trees: Vec::new(),
            time_ticks: 0,
            rng,
            next_id: 1,
        };
        world.reset();
        world
    }

    /// A world with exactly the given entities, for scripted setups
    pub fn with_entities(settings: Settings, players: Vec<Player>, monsters: Vec<Monster>, trees: Vec<Tree>) -> Self {
        let next_id = players
            .iter()
            .map(|p| p.id)
            .chain(monsters.iter().map(|m| m.id))
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            players,
            monsters,
            trees,
            time_ticks: 0,
            next_id,
        }
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn random_position(&mut self) -> Vec2 {
        let (w, h) = (self.settings.world_width, self.settings.world_height);
        random_position(&mut self.rng, w, h, SPAWN_PADDING)
    }

    /// Append one random monster, at `pos` if given
    pub fn spawn_monster(&mut self, pos: Option<Vec2>) -> EntityId {
        let id = self.next_entity_id();
        let monster = Monster::random(id, &mut self.rng, pos, &self.settings);
        self.monsters.push(monster);
        id
    }

    /// Positions of alive players that no tree conceals, in player order
    pub fn visible_targets(&self) -> Vec<Vec2> {
        self.players
            .iter()
            .filter(|p| p.is_alive() && hidden_by(*p, &self.trees).is_none())
            .map(|p| p.pos)
            .collect()
    }

    /// Steering that walks each player toward its nearest monster
    pub fn autopilot(&self) -> Vec<PlayerControl> {
        let monsters: Vec<Vec2> = self.monsters.iter().map(|m| m.pos).collect();
        self.players
            .iter()
            .map(|p| PlayerControl {
                steer: nearest(p.pos, &monsters)
                    .map(|i| (monsters[i] - p.pos).normalize_or_zero())
                    .unwrap_or(Vec2::ZERO),
                boost: false,
            })
            .collect()
    }

    /// Paint the world: background, players, monsters, then trees on top
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.fill(self.settings.background);
        for player in &self.players {
            player.draw(surface);
        }
        for monster in &self.monsters {
            monster.draw(surface);
        }
        for tree in &self.trees {
            tree.draw(surface);
        }
    }
}

/// Advance the chase world by one tick
pub fn tick(world: &mut ChaseWorld, input: &ChaseInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.reset {
        world.reset();
        events.push(GameEvent::Reset);
    }

    for &pos in &input.spawn_at {
        let id = world.spawn_monster(Some(pos));
        events.push(GameEvent::MonsterSpawned { id });
    }
    if input.spawn_burst {
        for _ in 0..world.settings.spawn_burst {
            let id = world.spawn_monster(None);
            events.push(GameEvent::MonsterSpawned { id });
        }
    }

    // Player steering
    let controls = if input.idle_mode { world.autopilot() } else { input.players.clone() };
    for (player, control) in world.players.iter_mut().zip(&controls) {
        if !player.is_alive() {
            continue;
        }
        player.boosted = control.boost;
        player.pos += control.steer * player.current_speed() * dt;
    }

    // Monsters react to the players they can see
    let targets = world.visible_targets();
    for monster in &mut world.monsters {
        monster.pos = resolve(monster.pos, &targets, monster.speed, monster.fleeing);
    }

    let policy = world.settings.chase_boundary;
    let (w, h) = (world.settings.world_width, world.settings.world_height);
    for player in &mut world.players {
        player.pos = policy.apply(player.pos, w, h);
    }
    for monster in &mut world.monsters {
        monster.pos = policy.apply(monster.pos, w, h);
    }

    // Collect first, remove after
    let absorbed = resolve_absorptions(&mut world.players, &world.monsters);
    for a in &absorbed {
        log::debug!(
            "Player {} absorbed monster {} (radius now {:.2})",
            a.player_id,
            a.monster_id,
            a.new_radius
        );
        events.push(GameEvent::MonsterAbsorbed {
            monster_id: a.monster_id,
            player_id: a.player_id,
            new_radius: a.new_radius,
        });
    }
    remove_absorbed(&mut world.monsters, &absorbed);

    world.time_ticks += 1;

    if input.quit {
        events.push(GameEvent::Quit);
    }
    events
}

impl Scenario for ChaseWorld {
    type Input = ChaseInput;

    fn tick(&mut self, input: &ChaseInput, dt: f32) -> Vec<GameEvent> {
        tick(self, input, dt)
    }

    /// Re-seed trees, players and the initial monster pool
    fn reset(&mut self) {
        self.trees.clear();
        for _ in 0..self.settings.tree_count {
            let pos = self.random_position();
            let (lo, hi) = (self.settings.tree_radius_min, self.settings.tree_radius_max);
            let radius = if hi > lo { self.rng.random_range(lo..hi) } else { lo.max(1) };
            self.trees.push(Tree { pos, radius: radius as f32 });
        }

        self.players.clear();
        let specs = self.settings.chase_players.clone();
        for spec in specs {
            let id = self.next_entity_id();
            let pos = self.random_position();
            let player = Player::new(id, spec.name, pos, spec.radius, spec.color)
                .with_speeds(spec.speed, spec.boost_speed);
            self.players.push(player);
        }

        self.monsters.clear();
        for _ in 0..self.settings.initial_monsters {
            self.spawn_monster(None);
        }

        log::info!(
            "Chase reset: {} players, {} monsters, {} trees",
            self.players.len(),
            self.monsters.len(),
            self.trees.len()
        );
    }
}
