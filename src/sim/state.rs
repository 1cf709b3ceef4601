//! Game state and scoring types
//!
//! `GameState` is a plain value. The controller never edits a published
//! state in place; every action produces a fresh one.

use serde::{Deserialize, Serialize};

use super::geometry::Position;

/// Current phase of play, derived from a [`GameState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a dice roll
    PreRoll,
    /// A roll is active and candidate moves are on offer
    Rolled,
    /// Ball reached the flag; waiting to advance
    HoleComplete,
    /// Final hole finished; only reset is accepted
    GameComplete,
}

/// Result of one completed hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleScore {
    pub strokes: u32,
    pub par: u32,
}

impl HoleScore {
    /// Strokes over (positive) or under (negative) par
    pub fn relative_to_par(&self) -> i32 {
        self.strokes as i32 - self.par as i32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current hole index (0-based)
    pub current_hole: usize,
    pub ball: Position,
    /// Active roll distance, including any +1 bonus
    pub last_roll: Option<u8>,
    /// Strokes taken on the current hole
    pub strokes: u32,
    /// Whether the +1 bonus may still be used on the active roll
    pub can_add_one: bool,
    /// Legal destinations for the active roll
    pub possible_moves: Vec<Position>,
    /// Ball has reached the flag neighbourhood on this hole
    pub is_complete: bool,
    /// One entry per completed hole, in play order
    pub scores: Vec<HoleScore>,
}

impl GameState {
    /// Fresh state for the start of a round, ball on the first tee
    pub fn new(tee: Position) -> Self {
        Self {
            current_hole: 0,
            ball: tee,
            last_roll: None,
            strokes: 0,
            can_add_one: true,
            possible_moves: Vec::new(),
            is_complete: false,
            scores: Vec::new(),
        }
    }

    /// State for the start of hole `index`, carrying scores forward
    pub fn start_hole(&self, index: usize, tee: Position) -> Self {
        Self {
            current_hole: index,
            scores: self.scores.clone(),
            ..Self::new(tee)
        }
    }

    /// Phase of play for a round of `hole_count` holes
    pub fn phase(&self, hole_count: usize) -> GamePhase {
        if self.is_complete {
            if self.current_hole + 1 >= hole_count {
                GamePhase::GameComplete
            } else {
                GamePhase::HoleComplete
            }
        } else if self.last_roll.is_some() {
            GamePhase::Rolled
        } else {
            GamePhase::PreRoll
        }
    }

    /// Whether `pos` is one of the current legal destinations
    pub fn is_possible_move(&self, pos: Position) -> bool {
        self.possible_moves.contains(&pos)
    }

    pub fn total_strokes(&self) -> u32 {
        self.scores.iter().map(|s| s.strokes).sum()
    }
}
