//! Hole layouts and course generation
//!
//! A round is a fixed table of [`HoleConfig`]s built once from a seeded RNG.
//! Each time a hole starts its grid is materialized from the config: grass
//! everywhere, tee and green stamped, then obstacles grown as random
//! 4-connected blobs kept clear of the tee and flag.

use std::collections::HashSet;

use glam::IVec2;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::Position;
use super::terrain::{Course, HoleConfig, ObstacleSpec, TerrainType};
use crate::consts::*;

/// Obstacle kinds in priority order; the hole's count truncates this list
const OBSTACLE_ORDER: [TerrainType; 3] = [TerrainType::Tree, TerrainType::Water, TerrainType::Sand];

/// Orthogonal neighbour offsets used by region growth
const NEIGHBOURS: [IVec2; 4] = [
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(0, -1),
    IVec2::new(0, 1),
];

/// Knobs for grid materialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Placement attempts per obstacle before it is dropped
    pub placement_attempts: u32,
    /// Region growth gives up after `size * growth_rounds_per_cell` picks
    pub growth_rounds_per_cell: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            growth_rounds_per_cell: GROWTH_ROUNDS_PER_CELL,
        }
    }
}

/// Why a list of hole layouts cannot form a round
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoleTableError {
    #[error("a round needs at least one hole")]
    Empty,
    #[error("hole {hole}: tee ({}, {}) is off the grid", .tee.x, .tee.y)]
    TeeOutOfBounds { hole: usize, tee: Position },
    #[error("hole {hole}: flag ({}, {}) is off the grid", .flag.x, .flag.y)]
    FlagOutOfBounds { hole: usize, flag: Position },
    #[error("hole {0}: tee and flag share a cell")]
    TeeOnFlag(usize),
}

/// The fixed sequence of hole layouts for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHoleTable")]
pub struct HoleTable {
    holes: Vec<HoleConfig>,
}

/// Wire shape of [`HoleTable`]; deserialized tables go through validation
#[derive(Deserialize)]
struct RawHoleTable {
    holes: Vec<HoleConfig>,
}

impl TryFrom<RawHoleTable> for HoleTable {
    type Error = HoleTableError;

    fn try_from(raw: RawHoleTable) -> Result<Self, Self::Error> {
        Self::from_configs(raw.holes)
    }
}

#[allow(clippy::len_without_is_empty)]
impl HoleTable {
    /// Generate a full round: random layouts for every hole, with the first
    /// [`ONBOARDING_HOLES`] replaced by fixed easy ones.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut holes: Vec<HoleConfig> = (0..HOLE_COUNT).map(|i| random_hole(i, rng)).collect();
        for (slot, fixed) in holes.iter_mut().zip(onboarding_holes()) {
            *slot = fixed;
        }
        log::debug!("Generated hole table, total par {}", holes.iter().map(|h| h.par).sum::<u32>());
        Self { holes }
    }

    /// Wrap an explicit list of layouts (custom rounds, tests).
    ///
    /// A round needs at least one hole, and every hole needs its tee and
    /// flag on distinct cells of the standard grid.
    pub fn from_configs(holes: Vec<HoleConfig>) -> Result<Self, HoleTableError> {
        if holes.is_empty() {
            return Err(HoleTableError::Empty);
        }
        for (hole, config) in holes.iter().enumerate() {
            if !config.tee.in_bounds(GRID_WIDTH, GRID_HEIGHT) {
                return Err(HoleTableError::TeeOutOfBounds { hole, tee: config.tee });
            }
            if !config.flag.in_bounds(GRID_WIDTH, GRID_HEIGHT) {
                return Err(HoleTableError::FlagOutOfBounds { hole, flag: config.flag });
            }
            if config.tee == config.flag {
                return Err(HoleTableError::TeeOnFlag(hole));
            }
        }
        Ok(Self { holes })
    }

    /// Layout of the opening hole. Tables are never empty.
    pub fn first(&self) -> &HoleConfig {
        &self.holes[0]
    }

    pub fn get(&self, index: usize) -> Option<&HoleConfig> {
        self.holes.get(index)
    }

    pub fn len(&self) -> usize {
        self.holes.len()
    }

    /// True when `index` is the final hole of the round
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.holes.len()
    }

    pub fn total_par(&self) -> u32 {
        self.holes.iter().map(|h| h.par).sum()
    }

    /// Materialize the grid for hole `index`, or `None` past the last hole
    pub fn generate_course<R: Rng + ?Sized>(
        &self,
        width: i32,
        height: i32,
        index: usize,
        rng: &mut R,
    ) -> Option<Course> {
        self.get(index)
            .map(|config| generate_course(width, height, config, rng))
    }
}

/// Random layout for hole `index`. Later holes get more and bigger obstacles.
fn random_hole<R: Rng + ?Sized>(index: usize, rng: &mut R) -> HoleConfig {
    let is_long = rng.random_bool(0.5);
    let tee_x = rng.random_range(1..=GRID_WIDTH - 2);
    let flag_x = rng.random_range(1..=GRID_WIDTH - 2);

    let difficulty = ((index as f32 + 5.0) / HOLE_COUNT as f32).min(1.0);
    let obstacle_count = (2.0 + difficulty * 2.0).floor() as usize;
    let obstacle_size = (3.0 + difficulty * 3.0).floor() as usize;

    let obstacles = OBSTACLE_ORDER
        .iter()
        .map(|&terrain| {
            // Water runs one cell smaller than the others
            let size = if terrain == TerrainType::Water { obstacle_size - 1 } else { obstacle_size };
            ObstacleSpec::new(terrain, size)
        })
        .take(obstacle_count)
        .collect();

    HoleConfig {
        tee: Position::new(tee_x, TEE_ROW),
        flag: Position::new(flag_x, if is_long { LONG_FLAG_ROW } else { SHORT_FLAG_ROW }),
        obstacles,
        par: if is_long { LONG_PAR } else { SHORT_PAR },
    }
}

/// Fixed layouts for the opening holes
fn onboarding_holes() -> [HoleConfig; ONBOARDING_HOLES] {
    [
        HoleConfig {
            tee: Position::new(4, 10),
            flag: Position::new(4, 2),
            obstacles: vec![ObstacleSpec::new(TerrainType::Sand, 3)],
            par: 3,
        },
        HoleConfig {
            tee: Position::new(2, 10),
            flag: Position::new(6, 2),
            obstacles: vec![
                ObstacleSpec::new(TerrainType::Water, 3),
                ObstacleSpec::new(TerrainType::Sand, 3),
            ],
            par: 3,
        },
        HoleConfig {
            tee: Position::new(1, 10),
            flag: Position::new(7, 2),
            obstacles: vec![
                ObstacleSpec::new(TerrainType::Tree, 3),
                ObstacleSpec::new(TerrainType::Sand, 4),
            ],
            par: 4,
        },
    ]
}

/// Materialize a hole with the default generation parameters
pub fn generate_course<R: Rng + ?Sized>(
    width: i32,
    height: i32,
    config: &HoleConfig,
    rng: &mut R,
) -> Course {
    generate_course_with(width, height, config, GenerationParams::default(), rng)
}

/// Materialize a hole.
///
/// Obstacles that cannot be placed clear of the tee and flag within the
/// attempt budget are dropped. Later obstacles may overwrite earlier ones.
pub fn generate_course_with<R: Rng + ?Sized>(
    width: i32,
    height: i32,
    config: &HoleConfig,
    params: GenerationParams,
    rng: &mut R,
) -> Course {
    let mut course = Course::filled(width, height, TerrainType::Grass);
    course.set(config.tee, TerrainType::Tee);
    course.set(config.flag, TerrainType::Green);
    if width <= 0 || height <= 0 {
        return course;
    }

    // Seeds avoid the top and bottom two rows where the flag and tee live
    let seed_rows = if height > 4 { 2..height - 2 } else { 0..height };

    for obstacle in &config.obstacles {
        let mut placed = None;
        for attempt in 0..params.placement_attempts {
            let seed = Position::new(rng.random_range(0..width), rng.random_range(seed_rows.clone()));
            let region = grow_region_capped(
                seed,
                obstacle.size,
                width,
                height,
                params.growth_rounds_per_cell,
                rng,
            );
            if region.iter().all(|&p| is_clear_of(p, config)) {
                log::trace!(
                    "Placed {} ({} cells) on attempt {}",
                    obstacle.terrain.as_str(),
                    region.len(),
                    attempt + 1
                );
                placed = Some(region);
                break;
            }
        }

        match placed {
            Some(region) => {
                for pos in region {
                    course.set(pos, obstacle.terrain);
                }
            }
            None => log::debug!(
                "Dropped {} obstacle of size {} after {} attempts",
                obstacle.terrain.as_str(),
                obstacle.size,
                params.placement_attempts
            ),
        }
    }

    log::debug!(
        "Course ready: {} tree, {} water, {} sand cells",
        course.count(TerrainType::Tree),
        course.count(TerrainType::Water),
        course.count(TerrainType::Sand)
    );
    course
}

/// Whether an obstacle cell keeps its distance from the tee and flag
fn is_clear_of(pos: Position, config: &HoleConfig) -> bool {
    pos.manhattan_distance(config.tee) >= CLEARANCE && pos.manhattan_distance(config.flag) >= CLEARANCE
}

/// Grow a random 4-connected region of up to `size` cells from `seed`
pub fn grow_region<R: Rng + ?Sized>(
    seed: Position,
    size: usize,
    width: i32,
    height: i32,
    rng: &mut R,
) -> Vec<Position> {
    grow_region_capped(seed, size, width, height, GROWTH_ROUNDS_PER_CELL, rng)
}

/// Region growth with an explicit pick budget.
///
/// Each round picks a random cell already in the region and tries its four
/// neighbours in shuffled order. Growth stops at `size` cells, when no
/// region cell has a free neighbour left, or after `size * rounds_per_cell`
/// picks. The returned region may then be smaller than `size`.
fn grow_region_capped<R: Rng + ?Sized>(
    seed: Position,
    size: usize,
    width: i32,
    height: i32,
    rounds_per_cell: usize,
    rng: &mut R,
) -> Vec<Position> {
    let mut region = Vec::with_capacity(size);
    let mut visited = HashSet::with_capacity(size);
    if size == 0 || !seed.in_bounds(width, height) {
        return region;
    }
    region.push(seed);
    visited.insert(seed);

    let max_rounds = size.saturating_mul(rounds_per_cell.max(1));
    let mut rounds = 0;
    while region.len() < size && rounds < max_rounds {
        rounds += 1;
        let origin = region[rng.random_range(0..region.len())];
        let mut dirs = NEIGHBOURS;
        dirs.shuffle(rng);

        let before = region.len();
        for dir in dirs {
            if region.len() >= size {
                break;
            }
            let next = Position::from(origin.as_ivec2() + dir);
            if next.in_bounds(width, height) && visited.insert(next) {
                region.push(next);
            }
        }

        if region.len() == before && !has_frontier(&region, &visited, width, height) {
            log::trace!("Region growth stalled at {} of {} cells", region.len(), size);
            break;
        }
    }

    region
}

fn has_frontier(region: &[Position], visited: &HashSet<Position>, width: i32, height: i32) -> bool {
    region.iter().any(|p| {
        NEIGHBOURS.iter().any(|&dir| {
            let n = Position::from(p.as_ivec2() + dir);
            n.in_bounds(width, height) && !visited.contains(&n)
        })
    })
}
