//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No windowing or platform dependencies

pub mod boundary;
pub mod chase;
pub mod collision;
pub mod input;
pub mod pursuit;
pub mod raster;
pub mod state;
pub mod tick;
pub mod trail;

pub use boundary::BoundaryPolicy;
pub use chase::{ChaseInput, ChaseWorld, PlayerControl};
pub use collision::{Absorption, absorbed_radius, encloses, hidden_by, hiding_index, try_absorb};
pub use input::{Bindings, Command, Key};
pub use pursuit::resolve;
pub use raster::{FrameBuffer, RenderSurface, is_background, look_ahead};
pub use state::{Body, Bullet, Color, Drawable, EntityId, Lifecycle, Monster, Player, Tree};
pub use tick::{GameEvent, RunSummary, Scenario, run};
pub use trail::{TrailGame, TrailInput};
