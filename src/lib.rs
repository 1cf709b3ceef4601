//! Paper Golf - a dice-driven golf board game on a fixed grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (course generation, movement, game state)
//! - `scorecard`: Derived round totals over completed holes
//! - `settings`: Runtime configuration loaded from JSON

pub mod scorecard;
pub mod settings;
pub mod sim;

pub use scorecard::Scorecard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Grid dimensions (fixed for every hole)
    pub const GRID_WIDTH: i32 = 8;
    pub const GRID_HEIGHT: i32 = 12;

    /// Number of holes in a round
    pub const HOLE_COUNT: usize = 18;
    /// Number of leading holes replaced by fixed, easy layouts
    pub const ONBOARDING_HOLES: usize = 3;

    /// Row the tee sits on for generated holes
    pub const TEE_ROW: i32 = 10;
    /// Flag row for long (par 5) holes
    pub const LONG_FLAG_ROW: i32 = 1;
    /// Flag row for short (par 4) holes
    pub const SHORT_FLAG_ROW: i32 = 2;
    pub const LONG_PAR: u32 = 5;
    pub const SHORT_PAR: u32 = 4;

    /// Dice faces (a roll is 1..=DIE_FACES)
    pub const DIE_FACES: u8 = 6;

    /// Placement attempts per obstacle before it is dropped
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10;
    /// Obstacles keep this Manhattan distance (or more) from tee and flag
    pub const CLEARANCE: i32 = 2;
    /// Region growth gives up after size * this many picks
    pub const GROWTH_ROUNDS_PER_CELL: usize = 16;
}
