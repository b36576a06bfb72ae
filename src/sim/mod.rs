//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (store order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod pop;
pub mod state;
pub mod tick;

pub use collision::{WallHit, bodies_overlap, bounce_off_walls, integrate};
pub use pop::{PairScan, Transfer, apply_scan, resolve_collisions, transfer_mass};
pub use state::{Arena, Body, BodyStore, World, initialize};
pub use tick::{TickInput, TickStats, apply_input, eject, step, thrust_direction, tick};
