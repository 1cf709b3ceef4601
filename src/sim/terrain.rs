//! Terrain types, cells and the materialized course grid

use serde::{Deserialize, Serialize};

use super::geometry::Position;

/// Surface of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainType {
    Tee,
    Water,
    Sand,
    #[default]
    Grass,
    Tree,
    Green,
}

impl TerrainType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerrainType::Tee => "tee",
            TerrainType::Water => "water",
            TerrainType::Sand => "sand",
            TerrainType::Grass => "grass",
            TerrainType::Tree => "tree",
            TerrainType::Green => "green",
        }
    }

    /// Only trees stop a ball in flight; water and sand are crossed freely
    pub fn blocks_path(&self) -> bool {
        matches!(self, TerrainType::Tree)
    }

    /// Whether a ball resting here may add +1 to its roll
    pub fn allows_bonus(&self) -> bool {
        matches!(self, TerrainType::Tee | TerrainType::Grass)
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, TerrainType::Tree | TerrainType::Water | TerrainType::Sand)
    }

    /// Single-character glyph for text dumps of a course
    pub fn glyph(&self) -> char {
        match self {
            TerrainType::Tee => 'T',
            TerrainType::Water => '~',
            TerrainType::Sand => ':',
            TerrainType::Grass => '.',
            TerrainType::Tree => '#',
            TerrainType::Green => 'G',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub position: Position,
    pub terrain: TerrainType,
}

/// One obstacle to place on a hole: terrain kind and target cell count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub terrain: TerrainType,
    pub size: usize,
}

impl ObstacleSpec {
    pub const fn new(terrain: TerrainType, size: usize) -> Self {
        Self { terrain, size }
    }
}

/// Layout parameters for one hole. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleConfig {
    pub tee: Position,
    pub flag: Position,
    pub obstacles: Vec<ObstacleSpec>,
    pub par: u32,
}

/// A materialized hole: every cell of the grid in row-major order
/// (`index = y * width + x`). Lookups depend on that ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
}

impl Course {
    /// A course of the given size with every cell set to `terrain`
    pub fn filled(width: i32, height: i32, terrain: TerrainType) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell { position: Position::new(x, y), terrain }))
            .collect();
        Self { width, height, cells }
    }

    /// Build a course from ASCII rows using [`TerrainType::glyph`] characters.
    /// Unknown characters become grass. Handy for hand-built test layouts.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as i32;
        let mut course = Self::filled(width, height, TerrainType::Grass);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate().take(width as usize) {
                let terrain = match ch {
                    'T' => TerrainType::Tee,
                    '~' => TerrainType::Water,
                    ':' => TerrainType::Sand,
                    '#' => TerrainType::Tree,
                    'G' => TerrainType::Green,
                    _ => TerrainType::Grass,
                };
                course.set(Position::new(x as i32, y as i32), terrain);
            }
        }
        course
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Terrain at `pos`, or `None` outside the grid
    pub fn terrain_at(&self, pos: Position) -> Option<TerrainType> {
        if !pos.in_bounds(self.width, self.height) {
            return None;
        }
        self.cells.get(pos.index(self.width)).map(|c| c.terrain)
    }

    /// Overwrite the terrain at `pos`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, pos: Position, terrain: TerrainType) {
        if !pos.in_bounds(self.width, self.height) {
            return;
        }
        let index = pos.index(self.width);
        if let Some(cell) = self.cells.get_mut(index) {
            cell.terrain = terrain;
        }
    }

    /// Positions of every cell with the given terrain, in row-major order
    pub fn positions_of(&self, terrain: TerrainType) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|c| c.terrain == terrain)
            .map(|c| c.position)
            .collect()
    }

    pub fn count(&self, terrain: TerrainType) -> usize {
        self.cells.iter().filter(|c| c.terrain == terrain).count()
    }

    /// Text dump, one line per row
    pub fn render_ascii(&self) -> String {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().map(|c| c.terrain.glyph()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
