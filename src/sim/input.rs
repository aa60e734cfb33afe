//! Keys, commands and per-player bindings
//!
//! The input layer reports key down-edges; each player's [`Bindings`] turns
//! them into [`Command`]s. `Escape` and `Return` are global and never bound.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Physical keys the scenarios care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    RightShift,
    Return,
    Escape,
    Period,
    A,
    E,
    O,
    U,
}

/// Player actions in the trail game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    TurnLeft,
    TurnRight,
    Shoot,
    SpeedUp,
    SpeedNormal,
}

/// Key to command table for one player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    map: HashMap<Key, Command>,
}

impl Bindings {
    pub fn new(pairs: impl IntoIterator<Item = (Key, Command)>) -> Self {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    /// Left-hand player: O/U turn, Period shoots, E/A boost and slow
    pub fn player_one() -> Self {
        Self::new([
            (Key::O, Command::TurnLeft),
            (Key::U, Command::TurnRight),
            (Key::Period, Command::Shoot),
            (Key::E, Command::SpeedUp),
            (Key::A, Command::SpeedNormal),
        ])
    }

    /// Arrow-key player: Left/Right turn, Up shoots, RightShift/Down boost and slow
    pub fn player_two() -> Self {
        Self::new([
            (Key::Left, Command::TurnLeft),
            (Key::Right, Command::TurnRight),
            (Key::Up, Command::Shoot),
            (Key::RightShift, Command::SpeedUp),
            (Key::Down, Command::SpeedNormal),
        ])
    }

    #[inline]
    pub fn command_for(&self, key: Key) -> Option<Command> {
        self.map.get(&key).copied()
    }

    pub fn bind(&mut self, key: Key, command: Command) {
        self.map.insert(key, command);
    }
}
