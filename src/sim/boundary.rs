//! World edge handling

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How positions are kept inside `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Pin each component to the nearest edge
    Clamp,
    /// Toroidal: leaving one edge re-enters at the opposite one
    Wrap,
}

impl BoundaryPolicy {
    pub fn apply(self, pos: Vec2, width: f32, height: f32) -> Vec2 {
        match self {
            BoundaryPolicy::Clamp => Vec2::new(pos.x.clamp(0.0, width), pos.y.clamp(0.0, height)),
            BoundaryPolicy::Wrap => Vec2::new(wrap_axis(pos.x, width), wrap_axis(pos.y, height)),
        }
    }
}

/// Reaching the upper bound jumps to 0; dropping below 0 jumps to the bound
#[inline]
fn wrap_axis(v: f32, bound: f32) -> f32 {
    if v < 0.0 {
        bound
    } else if v >= bound {
        0.0
    } else {
        v
    }
}
