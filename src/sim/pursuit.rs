//! Nearest-target pursuit and evasion

use glam::Vec2;

use crate::{distance, move_away, move_toward};

/// Index of the nearest target; ties go to the earliest in `targets`
pub fn nearest(mover: Vec2, targets: &[Vec2]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &t) in targets.iter().enumerate() {
        let d = distance(mover, t);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// New position for a mover reacting to its nearest target
///
/// With no targets the mover stays put. Chasing stops on the target;
/// fleeing has no cap and keeps stepping away however far that goes.
pub fn resolve(mover: Vec2, targets: &[Vec2], step: f32, fleeing: bool) -> Vec2 {
    let Some(i) = nearest(mover, targets) else {
        return mover;
    };
    if fleeing {
        move_away(mover, targets[i], step)
    } else {
        move_toward(mover, targets[i], step)
    }
}
