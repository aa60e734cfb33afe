//! Circle enclosure queries: concealment and absorption
//!
//! Both rules reduce to the same test: does one circle lie entirely inside
//! another? A tree hides a player it encloses; a player absorbs a monster it
//! encloses.

use super::state::{Body, EntityId, Monster, Player};
use crate::distance;

/// Whether `inner` lies strictly inside `outer`
///
/// Requires `outer.radius >= inner.radius` and
/// `distance < outer.radius - inner.radius`. Touching the rim from the
/// inside does not count.
#[inline]
pub fn encloses(outer: &impl Body, inner: &impl Body) -> bool {
    let (r_out, r_in) = (outer.radius(), inner.radius());
    if r_out < r_in {
        return false;
    }
    distance(inner.position(), outer.position()) < r_out - r_in
}

/// Index of the first obstacle that encloses `target`
pub fn hiding_index<T: Body, O: Body>(target: &T, obstacles: &[O]) -> Option<usize> {
    obstacles.iter().position(|o| encloses(o, target))
}

/// First obstacle (in iteration order) that conceals `target`
pub fn hidden_by<'a, T: Body, O: Body>(target: &T, obstacles: &'a [O]) -> Option<&'a O> {
    hiding_index(target, obstacles).map(|i| &obstacles[i])
}

/// Radius of a circle whose area is the sum of both areas
#[inline]
pub fn absorbed_radius(absorber: f32, absorbed: f32) -> f32 {
    (absorber * absorber + absorbed * absorbed).sqrt()
}

/// Grow `absorber` by `absorbed`'s area if it encloses it
///
/// Returns whether absorption happened. Removing the monster is the caller's
/// job, after the pass over the monster list is complete.
pub fn try_absorb(absorber: &mut Player, absorbed: &Monster) -> bool {
    if !absorber.is_alive() || !encloses(absorber, absorbed) {
        return false;
    }
    absorber.radius = absorbed_radius(absorber.radius, absorbed.radius);
    true
}

/// One monster swallowed by one player during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Absorption {
    pub monster_id: EntityId,
    pub player_id: EntityId,
    pub new_radius: f32,
}

/// Read-only pass over the monsters: each is absorbed by the first player
/// enclosing it. Players grow immediately, so a player that swallows an
/// early monster may enclose a later one it would otherwise have missed.
pub fn resolve_absorptions(players: &mut [Player], monsters: &[Monster]) -> Vec<Absorption> {
    let mut absorbed = Vec::new();
    for monster in monsters {
        if let Some(player) = players.iter_mut().find(|p| p.is_alive() && encloses(&**p, monster)) {
            if try_absorb(player, monster) {
                absorbed.push(Absorption {
                    monster_id: monster.id,
                    player_id: player.id,
                    new_radius: player.radius,
                });
            }
        }
    }
    absorbed
}

/// Apply a batch of absorptions, dropping each swallowed monster once
pub fn remove_absorbed(monsters: &mut Vec<Monster>, absorbed: &[Absorption]) {
    if absorbed.is_empty() {
        return;
    }
    monsters.retain(|m| !absorbed.iter().any(|a| a.monster_id == m.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Color, Tree};
    use glam::Vec2;
    use proptest::prelude::*;

    fn tree(x: f32, y: f32, radius: f32) -> Tree {
        Tree { pos: Vec2::new(x, y), radius }
    }

    fn player(id: EntityId, x: f32, y: f32, radius: f32) -> Player {
        Player::new(id, format!("p{id}"), Vec2::new(x, y), radius, Color::RED)
    }

    fn monster(id: EntityId, x: f32, y: f32, radius: f32) -> Monster {
        Monster {
            id,
            pos: Vec2::new(x, y),
            radius,
            color: Color::YELLOW,
            speed: 0.0,
            fleeing: true,
        }
    }

    #[test]
    fn test_tree_hides_enclosed_player() {
        let p = player(1, 10.0, 0.0, 20.0);
        let trees = [tree(0.0, 0.0, 50.0)];
        assert!(hidden_by(&p, &trees).is_some());
    }

    #[test]
    fn test_smaller_tree_never_hides() {
        let p = player(1, 0.0, 0.0, 30.0);
        let trees = [tree(0.0, 0.0, 29.0)];
        assert!(hidden_by(&p, &trees).is_none());
    }

    #[test]
    fn test_rim_contact_is_not_concealment() {
        // distance == R - r exactly
        let p = player(1, 30.0, 0.0, 20.0);
        let trees = [tree(0.0, 0.0, 50.0)];
        assert!(hidden_by(&p, &trees).is_none());
    }

    #[test]
    fn test_first_matching_obstacle_wins() {
        let p = player(1, 0.0, 0.0, 10.0);
        // Second tree is closer-centered, but the first one also qualifies
        let trees = [tree(20.0, 0.0, 40.0), tree(0.0, 0.0, 90.0)];
        assert_eq!(hiding_index(&p, &trees), Some(0));
    }

    #[test]
    fn test_absorb_scenario_small_monster_inside_player() {
        let mut players = vec![player(1, 0.0, 0.0, 30.0)];
        let mut monsters = vec![monster(7, 5.0, 0.0, 10.0)];
        let absorbed = resolve_absorptions(&mut players, &monsters);
        assert_eq!(absorbed.len(), 1);
        assert!((players[0].radius - 1000.0f32.sqrt()).abs() < 1e-3);
        assert!((players[0].radius - 31.62).abs() < 0.01);

        remove_absorbed(&mut monsters, &absorbed);
        assert!(monsters.is_empty());
    }

    #[test]
    fn test_monster_absorbed_once_with_two_enclosing_players() {
        let mut players = vec![player(1, 0.0, 0.0, 40.0), player(2, 1.0, 0.0, 40.0)];
        let mut monsters = vec![monster(3, 0.0, 0.0, 5.0), monster(4, 300.0, 0.0, 5.0)];
        let absorbed = resolve_absorptions(&mut players, &monsters);
        assert_eq!(absorbed.len(), 1);
        assert_eq!(absorbed[0].player_id, 1);
        // Only the first player grew
        assert_eq!(players[1].radius, 40.0);

        remove_absorbed(&mut monsters, &absorbed);
        assert_eq!(monsters.len(), 1);
        assert_eq!(monsters[0].id, 4);
    }

    #[test]
    fn test_dead_player_absorbs_nothing() {
        let mut dead = player(1, 100.0, 300.0, 40.0);
        dead.die(0.0);
        let mut players = vec![dead];
        let monsters = vec![monster(2, 105.0, 300.0, 5.0)];
        assert!(encloses(&players[0], &monsters[0]));

        assert!(resolve_absorptions(&mut players, &monsters).is_empty());
        assert!(!try_absorb(&mut players[0], &monsters[0]));
        assert_eq!(players[0].radius, 40.0);
    }

    #[test]
    fn test_living_player_takes_monster_dead_one_encloses() {
        let mut dead = player(1, 0.0, 0.0, 40.0);
        dead.die(0.0);
        let mut players = vec![dead, player(2, 1.0, 0.0, 40.0)];
        let monsters = vec![monster(3, 0.0, 0.0, 5.0)];
        let absorbed = resolve_absorptions(&mut players, &monsters);
        assert_eq!(absorbed.len(), 1);
        assert_eq!(absorbed[0].player_id, 2);
        assert_eq!(players[0].radius, 40.0);
    }

    #[test]
    fn test_bigger_monster_is_not_absorbed() {
        let mut p = player(1, 0.0, 0.0, 10.0);
        let m = monster(2, 0.0, 0.0, 12.0);
        assert!(!try_absorb(&mut p, &m));
        assert_eq!(p.radius, 10.0);
    }

    proptest! {
        #[test]
        fn concealment_matches_enclosure_rule(
            tx in -200.0f32..200.0, ty in -200.0f32..200.0, tr in 1.0f32..80.0,
            ox in -200.0f32..200.0, oy in -200.0f32..200.0, or in 1.0f32..120.0,
        ) {
            let p = player(1, tx, ty, tr);
            let trees = [tree(ox, oy, or)];
            let d = Vec2::new(tx, ty).distance(Vec2::new(ox, oy));
            let expected = or >= tr && d < or - tr;
            prop_assert_eq!(hidden_by(&p, &trees).is_some(), expected);
        }

        #[test]
        fn absorption_conserves_area(a in 1.0f32..200.0, b in 0.5f32..200.0) {
            let grown = absorbed_radius(a, b);
            let expected = a * a + b * b;
            prop_assert!((grown * grown - expected).abs() <= expected * 1e-5);
        }
    }
}
