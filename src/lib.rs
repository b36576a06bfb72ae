//! Popper - circles that bounce, collide and pop
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, walls, mass transfer, popping)
//! - `renderer`: Read-only frame building from the body store
//! - `platform`: Pointer input and tick pacing glue
//! - `settings`: Runtime configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Simulation constants
///
/// All quantities are per tick: velocities in units/tick, thrust in units/tick².
pub mod consts {
    /// Target simulation rate
    pub const TICKS_PER_SECOND: u32 = 30;
    /// Remaining frame budget (ms) under which the pacer complains
    pub const OVERRUN_WARN_MS: u64 = 5;

    /// Default arena size
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;
    /// Autonomous bodies spawned at startup
    pub const DEFAULT_RANDOM_BODIES: usize = 5;

    /// Starting radius of the player body
    pub const PLAYER_START_RADIUS: f32 = 25.0;

    /// Velocity added along the thrust direction each held tick
    pub const THRUST: f32 = 0.1;
    /// Radius the acting body loses per ejection
    pub const EJECT_SHRINK: f32 = 0.5;
    /// Radius of an ejected fragment
    pub const EJECT_RADIUS: f32 = 0.5;
    /// A player body must be strictly larger than this to eject
    pub const MIN_EJECT_RADIUS: f32 = 0.5;

    /// Radius moved from loser to winner per overlapping tick
    pub const TRANSFER: f32 = 0.1;
    /// Losers smaller than this thin out faster
    pub const THIN_THRESHOLD: f32 = 0.2;
    /// Radius lost by a loser below `THIN_THRESHOLD`
    pub const THIN_TRANSFER: f32 = 0.2;

    /// Growth ceiling; a winner above this pops
    pub const POP_SIZE: f32 = 75.0;
    /// Popped winner radius is divided by this
    pub const POP_DIVISOR: f32 = 5.0;
    /// Distance (per diagonal axis) of pop fragments from the winner
    pub const POP_SPREAD: f32 = 30.0;
}
