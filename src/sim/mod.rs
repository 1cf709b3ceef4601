//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (every random choice takes an injected `Rng`)
//! - Stable iteration order (row-major cells, fixed direction order)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod course;
pub mod geometry;
pub mod path;
pub mod state;
pub mod terrain;
pub mod tick;

pub use course::{GenerationParams, HoleTable, HoleTableError, generate_course, generate_course_with, grow_region};
pub use geometry::{DIRECTIONS, Position, calculate_possible_moves, is_same_position};
pub use path::{is_near_flag, is_path_clear};
pub use state::{GamePhase, GameState, HoleScore};
pub use terrain::{Cell, Course, HoleConfig, ObstacleSpec, TerrainType};
pub use tick::{Action, ActionError, Game, HoleContext, apply, legal_moves};
