//! 2D vector helpers shared by every resolver
//!
//! All functions are total: zero-length vectors and coincident points fall
//! back to the zero vector or the unchanged input instead of producing NaN.

use glam::Vec2;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Step from `from` toward `to` by `step`, stopping at `to`
///
/// The result is never farther along the ray than the target itself, so the
/// remaining distance is `max(0, d - step)`. A non-positive step leaves
/// `from` unchanged.
pub fn move_toward(from: Vec2, to: Vec2, step: f32) -> Vec2 {
    if step <= 0.0 {
        return from;
    }
    let delta = to - from;
    let dist = delta.length();
    if dist <= step {
        return to;
    }
    from + delta / dist * step
}

/// Step from `from` directly away from `to` by `step`
///
/// Unlike [`move_toward`] there is no cap: the mover may end up arbitrarily
/// far from the target. Coincident points have no direction to flee in and
/// return `from`.
pub fn move_away(from: Vec2, to: Vec2, step: f32) -> Vec2 {
    from + (from - to).normalize_or_zero() * step
}

/// Rotate `v` by `degrees` (positive is counter-clockwise in math axes,
/// clockwise on a y-down screen)
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}
