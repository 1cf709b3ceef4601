//! Round scorecard
//!
//! Pure arithmetic over completed [`HoleScore`]s: per-nine and round totals
//! and the usual golf "relative to par" notation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::HoleScore;

/// Holes per side of the card
pub const NINE: usize = 9;

/// Totals for a run of consecutive holes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionTotals {
    /// Index of the first hole in the section (0-based)
    pub first_hole: usize,
    pub holes: usize,
    pub strokes: u32,
    pub par: u32,
}

impl SectionTotals {
    fn from_slice(first_hole: usize, scores: &[HoleScore]) -> Self {
        Self {
            first_hole,
            holes: scores.len(),
            strokes: scores.iter().map(|s| s.strokes).sum(),
            par: scores.iter().map(|s| s.par).sum(),
        }
    }

    pub fn relative_to_par(&self) -> i32 {
        self.strokes as i32 - self.par as i32
    }
}

/// Scorecard for a (possibly unfinished) round
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scorecard {
    pub scores: Vec<HoleScore>,
}

impl Scorecard {
    pub fn from_scores(scores: &[HoleScore]) -> Self {
        Self {
            scores: scores.to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn total_strokes(&self) -> u32 {
        self.scores.iter().map(|s| s.strokes).sum()
    }

    pub fn total_par(&self) -> u32 {
        self.scores.iter().map(|s| s.par).sum()
    }

    pub fn relative_to_par(&self) -> i32 {
        self.total_strokes() as i32 - self.total_par() as i32
    }

    /// Holes 1-9
    pub fn front_nine(&self) -> SectionTotals {
        let end = self.scores.len().min(NINE);
        SectionTotals::from_slice(0, &self.scores[..end])
    }

    /// Holes 10-18
    pub fn back_nine(&self) -> SectionTotals {
        let start = self.scores.len().min(NINE);
        let end = self.scores.len().min(NINE * 2);
        SectionTotals::from_slice(NINE, &self.scores[start..end])
    }

    /// Best single-hole result relative to par, with its 0-based index
    pub fn best_hole(&self) -> Option<(usize, HoleScore)> {
        self.scores
            .iter()
            .copied()
            .enumerate()
            .min_by_key(|(_, s)| s.relative_to_par())
    }

    /// "Even Par", "3 Over Par", "2 Under Par"
    pub fn verdict(&self) -> String {
        match self.relative_to_par() {
            0 => "Even Par".to_string(),
            diff if diff > 0 => format!("{} Over Par", diff),
            diff => format!("{} Under Par", diff.abs()),
        }
    }
}

/// Golf notation for a score relative to par: "E", "+2", "-1"
pub fn format_relative(diff: i32) -> String {
    match diff {
        0 => "E".to_string(),
        d if d > 0 => format!("+{}", d),
        d => d.to_string(),
    }
}

impl fmt::Display for Scorecard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in [self.front_nine(), self.back_nine()] {
            if section.holes == 0 {
                continue;
            }
            let holes = &self.scores[section.first_hole..section.first_hole + section.holes];

            write!(f, "Hole ")?;
            for i in 0..section.holes {
                write!(f, "{:>4}", section.first_hole + i + 1)?;
            }
            writeln!(f, " Total")?;

            write!(f, "Par  ")?;
            for hole in holes {
                write!(f, "{:>4}", hole.par)?;
            }
            writeln!(f, "{:>6}", section.par)?;

            write!(f, "Score")?;
            for hole in holes {
                write!(f, "{:>4}", hole.strokes)?;
            }
            writeln!(f, "{:>6}", section.strokes)?;

            write!(f, "+/-  ")?;
            for hole in holes {
                write!(f, "{:>4}", format_relative(hole.relative_to_par()))?;
            }
            writeln!(f, "{:>6}", format_relative(section.relative_to_par()))?;
            writeln!(f)?;
        }

        writeln!(f, "Total Strokes: {}", self.total_strokes())?;
        writeln!(f, "Course Par: {}", self.total_par())?;
        write!(f, "{}", self.verdict())
    }
}
