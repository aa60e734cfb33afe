//! Fixed timestep driver shared by both scenarios
//!
//! A tick runs to completion before the next one starts; quitting is only
//! observed between ticks.

use glam::Vec2;
use serde::Serialize;

use super::state::EntityId;

/// Something notable that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Reset,
    Quit,
    MonsterSpawned { id: EntityId },
    MonsterAbsorbed { monster_id: EntityId, player_id: EntityId, new_radius: f32 },
    PlayerDied { player_id: EntityId, at: Vec2 },
    PlayerRespawned { player_id: EntityId, at: Vec2 },
    BulletFired { id: EntityId, owner: EntityId },
    BulletExpired { id: EntityId },
}

/// A world that advances in fixed steps
pub trait Scenario {
    type Input;

    /// Advance one tick of `dt` seconds
    fn tick(&mut self, input: &Self::Input, dt: f32) -> Vec<GameEvent>;

    /// Re-seed the world to a fresh randomized start
    fn reset(&mut self);
}

/// Tallies from a [`run`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub quit: bool,
    pub resets: u32,
    pub monsters_spawned: u32,
    pub monsters_absorbed: u32,
    pub deaths: u32,
    pub respawns: u32,
    pub bullets_fired: u32,
    pub bullets_expired: u32,
}

impl RunSummary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Reset => self.resets += 1,
            GameEvent::Quit => self.quit = true,
            GameEvent::MonsterSpawned { .. } => self.monsters_spawned += 1,
            GameEvent::MonsterAbsorbed { .. } => self.monsters_absorbed += 1,
            GameEvent::PlayerDied { .. } => self.deaths += 1,
            GameEvent::PlayerRespawned { .. } => self.respawns += 1,
            GameEvent::BulletFired { .. } => self.bullets_fired += 1,
            GameEvent::BulletExpired { .. } => self.bullets_expired += 1,
        }
    }
}

/// Tick `scenario` once per input until inputs run out or a tick quits
pub fn run<S, I>(scenario: &mut S, inputs: I, dt: f32) -> RunSummary
where
    S: Scenario,
    I: IntoIterator<Item = S::Input>,
{
    let mut summary = RunSummary::default();
    for input in inputs {
        let events = scenario.tick(&input, dt);
        summary.ticks += 1;
        for event in &events {
            log::trace!("tick {}: {:?}", summary.ticks, event);
            summary.record(event);
        }
        if summary.quit {
            log::info!("Quit after {} ticks", summary.ticks);
            break;
        }
    }
    summary
}
