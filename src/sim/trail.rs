//! Trail scenario: two riders leave permanent trails and die on contact
//!
//! Collisions are decided by the raster probe against the game's own frame
//! buffer, which is never cleared between ticks. Players update and draw in
//! a fixed order, so a trail drawn by an earlier player this tick is already
//! visible to a later player's probe in the same tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::input::{Bindings, Command, Key};
use super::raster::{FrameBuffer, RenderSurface, is_background, probe_collides};
use super::state::{Body, Bullet, Color, Drawable, EntityId, Player, random_position};
use super::tick::{GameEvent, Scenario};
use crate::Settings;
use crate::consts::SPAWN_PADDING;
use crate::rotate_degrees;

/// Random respawn points tried before settling for an occupied one
const SPAWN_ATTEMPTS: usize = 16;

/// Input for one trail tick
#[derive(Debug, Clone, Default)]
pub struct TrailInput {
    /// Key down-edges, in arrival order
    pub keys: Vec<Key>,
    /// Same as a `Return` down-edge ahead of `keys`
    pub reset: bool,
    /// Window close request
    pub quit: bool,
    /// Idle/demo mode - players steer around obstacles on their own
    pub idle_mode: bool,
}

/// The trail game (sole owner of its players, bullets and frame)
#[derive(Debug, Clone)]
pub struct TrailGame {
    pub settings: Settings,
    pub players: Vec<Player>,
    pub bullets: Vec<Bullet>,
    /// Committed raster the probe samples
    pub frame: FrameBuffer,
    /// Simulation clock in seconds
    pub time: f64,
    pub time_ticks: u64,
    rng: Pcg32,
    next_id: EntityId,
}

impl TrailGame {
    pub fn new(settings: Settings) -> Self {
        let mut game = Self::with_players(settings, Vec::new());
        game.reset();
        game
    }

    /// A game with exactly these players on a blank frame
    pub fn with_players(settings: Settings, players: Vec<Player>) -> Self {
        let next_id = players.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            frame: FrameBuffer::for_world(settings.world_size(), settings.background),
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            players,
            bullets: Vec::new(),
            time: 0.0,
            time_ticks: 0,
            next_id,
        }
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Run one command for the player at `index`
    pub fn apply_command(&mut self, index: usize, command: Command) -> Option<GameEvent> {
        let player = self.players.get_mut(index)?;
        if command != Command::Shoot {
            player.apply(command);
            return None;
        }

        let owner = player.id;
        let id = self.next_entity_id();
        let player = &self.players[index];
        let bullet = Bullet::fired_by(
            id,
            player,
            self.settings.bullet_speed,
            self.settings.bullet_radius,
            self.settings.bullet_ttl_ticks,
        );
        self.bullets.push(bullet);
        Some(GameEvent::BulletFired { id, owner })
    }

    /// Dispatch a key down-edge to every player that binds it
    pub fn handle_key(&mut self, key: Key) -> Vec<GameEvent> {
        let commands: Vec<(usize, Command)> = self
            .players
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.bindings.command_for(key).map(|c| (i, c)))
            .collect();
        commands
            .into_iter()
            .filter_map(|(i, c)| self.apply_command(i, c))
            .collect()
    }

    /// A random point on background, or the last candidate if none is found
    fn spawn_point(&mut self) -> Vec2 {
        let (w, h) = (self.settings.world_width, self.settings.world_height);
        let mut pos = Vec2::new(w / 2.0, h / 2.0);
        for _ in 0..SPAWN_ATTEMPTS {
            pos = random_position(&mut self.rng, w, h, SPAWN_PADDING);
            if is_background(&self.frame, pos, self.settings.background) {
                break;
            }
        }
        pos
    }

    /// Turns that keep alive players off whatever is ahead of them
    pub fn autopilot(&self) -> Vec<(usize, Command)> {
        let factor = self.settings.look_ahead_factor;
        let bg = self.settings.background;
        let mut commands = Vec::new();
        for (i, p) in self.players.iter().enumerate() {
            if !p.is_alive() {
                continue;
            }
            let speed = p.current_speed();
            if !probe_collides(&self.frame, p.pos, p.facing, speed, factor, bg) {
                continue;
            }
            let left = rotate_degrees(p.facing, -90.0);
            let right = rotate_degrees(p.facing, 90.0);
            if !probe_collides(&self.frame, p.pos, left, speed, factor, bg) {
                commands.push((i, Command::TurnLeft));
            } else if !probe_collides(&self.frame, p.pos, right, speed, factor, bg) {
                commands.push((i, Command::TurnRight));
            }
        }
        commands
    }

    /// Whether a bullet has left the world entirely
    fn off_world(&self, bullet: &Bullet) -> bool {
        let (w, h) = self.frame.size();
        let (p, r) = (bullet.position(), bullet.radius());
        p.x + r < 0.0 || p.y + r < 0.0 || p.x - r > w as f32 || p.y - r > h as f32
    }

    /// Carve, move and redraw every bullet; expired ones leave no trace
    fn update_bullets(&mut self, events: &mut Vec<GameEvent>) {
        let bg = self.settings.background;
        let speed = self.settings.bullet_speed;

        for bullet in &mut self.bullets {
            bullet.erase(&mut self.frame, bg);
            bullet.step(speed);
            bullet.erase(&mut self.frame, bg);
            bullet.step(speed);
            bullet.ttl_ticks = bullet.ttl_ticks.saturating_sub(1);
        }

        let expired: Vec<EntityId> = self
            .bullets
            .iter()
            .filter(|b| b.ttl_ticks == 0 || self.off_world(b))
            .map(|b| b.id)
            .collect();
        self.bullets.retain(|b| !expired.contains(&b.id));
        events.extend(expired.into_iter().map(|id| GameEvent::BulletExpired { id }));

        for bullet in &self.bullets {
            bullet.draw(&mut self.frame);
        }
    }

    /// Respawn check, probe, move or die, then draw
    fn update_player(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        let now = self.time;

        if self.players[index].ready_to_respawn(now, self.settings.respawn_cooldown) {
            let at = self.spawn_point();
            let player = &mut self.players[index];
            player.respawn(at);
            log::info!("{} respawns at ({:.0}, {:.0})", player.name, at.x, at.y);
            events.push(GameEvent::PlayerRespawned { player_id: player.id, at });
        }

        let Self { players, frame, settings, .. } = self;
        let player = &mut players[index];
        if player.is_alive() {
            let speed = player.current_speed();
            if probe_collides(frame, player.pos, player.facing, speed, settings.look_ahead_factor, settings.background) {
                player.die(now);
                log::info!("{} dies at ({:.0}, {:.0})", player.name, player.pos.x, player.pos.y);
                events.push(GameEvent::PlayerDied { player_id: player.id, at: player.pos });
            } else {
                player.pos += player.facing * speed;
            }
        }
        player.draw(frame);
    }
}

/// Advance the trail game by one tick
pub fn tick(game: &mut TrailGame, input: &TrailInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut quit = input.quit;

    if input.reset {
        game.reset();
        events.push(GameEvent::Reset);
    }

    for &key in &input.keys {
        match key {
            Key::Escape => quit = true,
            Key::Return => {
                game.reset();
                events.push(GameEvent::Reset);
            }
            _ => events.extend(game.handle_key(key)),
        }
    }

    if input.idle_mode {
        for (i, command) in game.autopilot() {
            events.extend(game.apply_command(i, command));
        }
    }

    game.update_bullets(&mut events);

    for i in 0..game.players.len() {
        game.update_player(i, &mut events);
    }

    let policy = game.settings.trail_boundary;
    let (w, h) = (game.settings.world_width, game.settings.world_height);
    for player in &mut game.players {
        player.pos = policy.apply(player.pos, w, h);
    }

    game.time += f64::from(dt);
    game.time_ticks += 1;

    if quit {
        events.push(GameEvent::Quit);
    }
    events
}

impl Scenario for TrailGame {
    type Input = TrailInput;

    fn tick(&mut self, input: &TrailInput, dt: f32) -> Vec<GameEvent> {
        tick(self, input, dt)
    }

    /// Blank the frame and put both players back at their start positions
    fn reset(&mut self) {
        self.frame.fill(self.settings.background);

        let pad = self.settings.trail_start_pad;
        let h = self.settings.world_height;
        let starts = [
            ("player1", Color::RED, Vec2::new(pad, h - pad * 2.0), Bindings::player_one()),
            ("player2", Color::BLUE, Vec2::new(pad, pad), Bindings::player_two()),
        ];
        self.players.clear();
        for (name, color, pos, bindings) in starts {
            let id = self.next_entity_id();
            let player = Player::new(id, name, pos, self.settings.trail_radius, color)
                .with_speeds(self.settings.trail_speed, self.settings.trail_boost_speed)
                .with_bindings(bindings);
            self.players.push(player);
        }
        self.bullets.clear();

        log::info!("Trail reset at t={:.2}s", self.time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BULLET_COLOR, SIM_DT};

    fn settings() -> Settings {
        Settings {
            world_width: 800.0,
            world_height: 600.0,
            ..Settings::default()
        }
    }

    fn rider(id: EntityId, x: f32, y: f32, facing: Vec2) -> Player {
        let mut p = Player::new(id, format!("rider{id}"), Vec2::new(x, y), 3.0, Color::RED).with_speeds(1.0, 2.0);
        p.facing = facing;
        p
    }

    fn bg(game: &TrailGame, x: f32, y: f32) -> bool {
        is_background(&game.frame, Vec2::new(x, y), game.settings.background)
    }

    #[test]
    fn test_reset_places_players() {
        let game = TrailGame::new(settings());
        assert_eq!(game.players.len(), 2);
        assert_eq!(game.players[0].pos, Vec2::new(100.0, 400.0));
        assert_eq!(game.players[1].pos, Vec2::new(100.0, 100.0));
        assert!(game.players.iter().all(|p| p.is_alive() && p.facing == Vec2::X));
        assert_eq!(game.frame.occupied_count(game.settings.background), 0);
    }

    #[test]
    fn test_players_move_and_leave_trails() {
        let mut game = TrailGame::new(settings());
        for _ in 0..10 {
            tick(&mut game, &TrailInput::default(), SIM_DT);
        }
        assert!(game.players.iter().all(Player::is_alive));
        assert_eq!(game.players[0].pos, Vec2::new(110.0, 400.0));
        assert!(!bg(&game, 101.0, 400.0));
    }

    #[test]
    fn test_probe_hit_kills_then_respawns_after_cooldown() {
        let mut game = TrailGame::new(settings());
        let start = game.players[0].pos;
        game.frame.draw_circle(start + Vec2::new(5.0, 0.0), 1.0, Color::YELLOW);

        let events = tick(&mut game, &TrailInput::default(), 0.5);
        assert!(!game.players[0].is_alive());
        assert!(events.iter().any(|e| matches!(e, GameEvent::PlayerDied { .. })));
        // Death halts movement
        assert_eq!(game.players[0].pos, start);

        // Cooldown is strict: 0.5, 1.0, 1.5 and 2.0 seconds after death are not enough
        for _ in 0..4 {
            tick(&mut game, &TrailInput::default(), 0.5);
            assert!(!game.players[0].is_alive());
            assert_eq!(game.players[0].pos, start);
        }

        let events = tick(&mut game, &TrailInput::default(), 0.5);
        assert!(game.players[0].is_alive());
        assert!(events.iter().any(|e| matches!(e, GameEvent::PlayerRespawned { .. })));
        assert_ne!(game.players[0].pos, start);
    }

    #[test]
    fn test_dead_player_stays_drawn() {
        let mut game = TrailGame::new(settings());
        let start = game.players[0].pos;
        game.frame.draw_circle(start + Vec2::new(5.0, 0.0), 1.0, Color::YELLOW);
        tick(&mut game, &TrailInput::default(), SIM_DT);
        game.frame.fill(game.settings.background);
        tick(&mut game, &TrailInput::default(), SIM_DT);
        assert!(!bg(&game, start.x, start.y));
    }

    #[test]
    fn test_earlier_player_trail_visible_to_later_probe_same_tick() {
        // A's fat circle lands on B's probe point during A's update
        let mut a = rider(1, 100.0, 100.0, Vec2::X);
        a.radius = 6.0;
        let b = rider(2, 100.0, 110.0, Vec2::NEG_Y);

        let mut game = TrailGame::with_players(settings(), vec![a.clone(), b.clone()]);
        tick(&mut game, &TrailInput::default(), SIM_DT);
        assert!(game.players[0].is_alive());
        assert!(!game.players[1].is_alive());

        // Same geometry, B processed first: nobody dies this tick
        let mut game = TrailGame::with_players(settings(), vec![b, a]);
        tick(&mut game, &TrailInput::default(), SIM_DT);
        assert!(game.players.iter().all(Player::is_alive));
    }

    #[test]
    fn test_keys_dispatch_through_bindings() {
        let mut game = TrailGame::new(settings());
        let input = TrailInput {
            keys: vec![Key::O, Key::Right, Key::E],
            ..Default::default()
        };
        tick(&mut game, &input, SIM_DT);
        assert!(game.players[0].facing.y < -0.99);
        assert!(game.players[1].facing.y > 0.99);
        assert!(game.players[0].boosted);
        assert!(!game.players[1].boosted);
    }

    #[test]
    fn test_boost_speed_and_look_ahead() {
        let mut game = TrailGame::with_players(settings(), vec![rider(1, 100.0, 300.0, Vec2::X)]);
        game.apply_command(0, Command::SpeedUp);
        // Boosted probe reaches 10 px ahead
        game.frame.draw_circle(Vec2::new(110.0, 300.0), 0.5, Color::YELLOW);
        tick(&mut game, &TrailInput::default(), SIM_DT);
        assert!(!game.players[0].is_alive());
    }

    #[test]
    fn test_escape_quits_and_return_resets() {
        let mut game = TrailGame::new(settings());
        game.apply_command(0, Command::Shoot);
        let events = tick(&mut game, &TrailInput { keys: vec![Key::Return, Key::Escape], ..Default::default() }, SIM_DT);
        assert!(events.contains(&GameEvent::Reset));
        assert_eq!(events.last(), Some(&GameEvent::Quit));
        assert!(game.bullets.is_empty());
    }

    #[test]
    fn test_reset_flag_clears_frame_and_bullets() {
        let mut game = TrailGame::new(settings());
        for _ in 0..20 {
            tick(&mut game, &TrailInput::default(), SIM_DT);
        }
        game.apply_command(1, Command::Shoot);
        assert!(!game.bullets.is_empty());

        let events = tick(&mut game, &TrailInput { reset: true, ..Default::default() }, SIM_DT);
        assert_eq!(events.first(), Some(&GameEvent::Reset));
        assert!(game.bullets.is_empty());
        // Only this tick's two player dots are on the fresh frame
        assert!(bg(&game, 110.0, 100.0));
        assert_eq!(game.players[1].pos, Vec2::new(101.0, 100.0));
    }

    #[test]
    fn test_bullet_carves_through_wall() {
        let mut game = TrailGame::with_players(settings(), vec![rider(1, 100.0, 100.0, Vec2::X)]);
        game.frame.draw_circle(Vec2::new(130.0, 100.0), 2.0, Color::YELLOW);
        let fired = game.apply_command(0, Command::Shoot);
        assert!(matches!(fired, Some(GameEvent::BulletFired { owner: 1, .. })));

        for _ in 0..8 {
            tick(&mut game, &TrailInput::default(), SIM_DT);
        }
        for x in 128..=132 {
            assert!(bg(&game, x as f32, 100.0), "wall pixel {x} should be erased");
        }
    }

    #[test]
    fn test_bullet_expires_without_trace() {
        let s = Settings {
            bullet_ttl_ticks: 3,
            ..settings()
        };
        let mut game = TrailGame::with_players(s, vec![rider(1, 100.0, 300.0, Vec2::X)]);
        game.apply_command(0, Command::Shoot);

        let mut expired = 0;
        for _ in 0..3 {
            let events = tick(&mut game, &TrailInput::default(), SIM_DT);
            expired += events.iter().filter(|e| matches!(e, GameEvent::BulletExpired { .. })).count();
        }
        assert_eq!(expired, 1);
        assert!(game.bullets.is_empty());
        for x in 110..=160 {
            assert_ne!(game.frame.sample(Vec2::new(x as f32, 300.0)), Some(BULLET_COLOR));
        }
    }

    #[test]
    fn test_bullet_leaving_world_expires() {
        let mut game = TrailGame::with_players(settings(), vec![rider(1, 790.0, 300.0, Vec2::X)]);
        game.apply_command(0, Command::Shoot);
        for _ in 0..4 {
            tick(&mut game, &TrailInput::default(), SIM_DT);
        }
        assert!(game.bullets.is_empty());
    }

    #[test]
    fn test_players_wrap_at_edges() {
        let mut game = TrailGame::with_players(settings(), vec![rider(1, 799.5, 300.0, Vec2::X)]);
        tick(&mut game, &TrailInput::default(), SIM_DT);
        assert_eq!(game.players[0].pos, Vec2::new(0.0, 300.0));
        assert!(game.players[0].is_alive());
    }

    #[test]
    fn test_idle_mode_steers_around_obstacle() {
        let mut game = TrailGame::with_players(settings(), vec![rider(1, 100.0, 100.0, Vec2::X)]);
        game.frame.draw_circle(Vec2::new(105.0, 100.0), 1.0, Color::YELLOW);
        tick(&mut game, &TrailInput { idle_mode: true, ..Default::default() }, SIM_DT);
        assert!(game.players[0].is_alive());
        assert!(game.players[0].facing.y < -0.99);
    }

    #[test]
    fn test_clock_advances_by_dt() {
        let mut game = TrailGame::new(settings());
        for _ in 0..4 {
            tick(&mut game, &TrailInput::default(), 0.25);
        }
        assert!((game.time - 1.0).abs() < 1e-9);
        assert_eq!(game.time_ticks, 4);
    }
}
