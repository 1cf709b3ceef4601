//! Turn transitions
//!
//! Every player intent is an [`Action`]. [`apply`] is a pure reducer: it
//! validates the action against the current phase and returns a brand new
//! [`GameState`], leaving the input untouched. [`Game`] owns the round
//! (hole table, current course, RNG) and publishes the latest snapshot.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::course::{GenerationParams, HoleTable, generate_course_with};
use super::geometry::{Position, calculate_possible_moves};
use super::path::{is_near_flag, is_path_clear};
use super::state::{GamePhase, GameState, HoleScore};
use super::terrain::{Course, HoleConfig};
use crate::consts::*;
use crate::settings::Settings;

/// A single player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Dice came up with this value (1..=6)
    Roll(u8),
    /// Spend the once-per-roll +1 bonus
    AddOne,
    /// Hit the ball to a highlighted cell
    Click(Position),
    /// Move on to the next hole after finishing this one
    AdvanceHole,
    /// Start the round over from hole 1
    Reset,
}

/// Why an action was rejected. The state is unchanged when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("hole is complete; advance to the next hole")]
    HoleComplete,
    #[error("round is complete; reset to play again")]
    GameComplete,
    #[error("roll {0} is not a die face")]
    InvalidRoll(u8),
    #[error("no active roll")]
    NoActiveRoll,
    #[error("+1 bonus is not available for this roll")]
    BonusUnavailable,
    #[error("({}, {}) is not a legal move", .0.x, .0.y)]
    IllegalMove(Position),
    #[error("hole is not complete yet")]
    HoleNotComplete,
    #[error("no hole with index {0}")]
    UnknownHole(usize),
}

/// Read-only inputs a transition may consult
#[derive(Debug, Clone, Copy)]
pub struct HoleContext<'a> {
    pub holes: &'a HoleTable,
    pub course: &'a Course,
}

impl HoleContext<'_> {
    fn hole(&self, index: usize) -> Result<&HoleConfig, ActionError> {
        self.holes.get(index).ok_or(ActionError::UnknownHole(index))
    }
}

/// Destinations reachable from `origin` with a hop of `distance`:
/// in-bounds projections whose line of flight is clear.
pub fn legal_moves(origin: Position, distance: u8, course: &Course) -> Vec<Position> {
    // Bounds filtering happens before any terrain lookup
    calculate_possible_moves(origin, i32::from(distance), course.width, course.height)
        .into_iter()
        .filter(|&dest| is_path_clear(origin, dest, course))
        .collect()
}

/// Apply `action` to `state`, producing the next state
pub fn apply(
    state: &GameState,
    action: Action,
    ctx: &HoleContext<'_>,
) -> Result<GameState, ActionError> {
    match action {
        Action::Roll(value) => roll(state, value, ctx),
        Action::AddOne => add_one(state, ctx),
        Action::Click(dest) => click(state, dest, ctx),
        Action::AdvanceHole => advance_hole(state, ctx),
        Action::Reset => Ok(GameState::new(ctx.holes.first().tee)),
    }
}

fn ensure_in_play(state: &GameState, ctx: &HoleContext<'_>) -> Result<(), ActionError> {
    match state.phase(ctx.holes.len()) {
        GamePhase::HoleComplete => Err(ActionError::HoleComplete),
        GamePhase::GameComplete => Err(ActionError::GameComplete),
        GamePhase::PreRoll | GamePhase::Rolled => Ok(()),
    }
}

fn roll(state: &GameState, value: u8, ctx: &HoleContext<'_>) -> Result<GameState, ActionError> {
    ensure_in_play(state, ctx)?;
    if !(1..=DIE_FACES).contains(&value) {
        return Err(ActionError::InvalidRoll(value));
    }

    let can_add_one = ctx
        .course
        .terrain_at(state.ball)
        .is_some_and(|t| t.allows_bonus());

    Ok(GameState {
        last_roll: Some(value),
        can_add_one,
        possible_moves: legal_moves(state.ball, value, ctx.course),
        ..state.clone()
    })
}

fn add_one(state: &GameState, ctx: &HoleContext<'_>) -> Result<GameState, ActionError> {
    ensure_in_play(state, ctx)?;
    let current = state.last_roll.ok_or(ActionError::NoActiveRoll)?;
    if !state.can_add_one {
        return Err(ActionError::BonusUnavailable);
    }

    let boosted = current + 1;
    Ok(GameState {
        last_roll: Some(boosted),
        can_add_one: false,
        possible_moves: legal_moves(state.ball, boosted, ctx.course),
        ..state.clone()
    })
}

fn click(state: &GameState, dest: Position, ctx: &HoleContext<'_>) -> Result<GameState, ActionError> {
    ensure_in_play(state, ctx)?;
    if !state.is_possible_move(dest) {
        return Err(ActionError::IllegalMove(dest));
    }

    let hole = ctx.hole(state.current_hole)?;
    let strokes = state.strokes + 1;
    let mut next = GameState {
        ball: dest,
        last_roll: None,
        strokes,
        can_add_one: true,
        possible_moves: Vec::new(),
        ..state.clone()
    };

    if is_near_flag(dest, hole.flag) {
        next.is_complete = true;
        next.scores.push(HoleScore { strokes, par: hole.par });
    }

    Ok(next)
}

fn advance_hole(state: &GameState, ctx: &HoleContext<'_>) -> Result<GameState, ActionError> {
    match state.phase(ctx.holes.len()) {
        GamePhase::HoleComplete => {}
        GamePhase::GameComplete => return Err(ActionError::GameComplete),
        GamePhase::PreRoll | GamePhase::Rolled => return Err(ActionError::HoleNotComplete),
    }

    let next_index = state.current_hole + 1;
    let next_hole = ctx.hole(next_index)?;
    Ok(state.start_hole(next_index, next_hole.tee))
}

/// Owner of a round in progress.
///
/// Holds the hole table, the materialized course for the current hole, the
/// latest published [`GameState`] and the RNG used for dice and terrain.
/// Readers only ever see whole snapshots.
#[derive(Debug, Clone)]
pub struct Game {
    seed: u64,
    rng: Pcg32,
    params: GenerationParams,
    holes: HoleTable,
    course: Course,
    state: GameState,
}

impl Game {
    /// Start a standard 18-hole round with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_params(seed, GenerationParams::default())
    }

    /// Start a round using the generation knobs and seed from `settings`.
    /// `fallback_seed` is used when the settings leave the seed open.
    pub fn from_settings(settings: &Settings, fallback_seed: u64) -> Self {
        Self::with_params(settings.seed.unwrap_or(fallback_seed), settings.generation_params())
    }

    fn with_params(seed: u64, params: GenerationParams) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let holes = HoleTable::generate(&mut rng);
        log::info!("New round with seed {}, course par {}", seed, holes.total_par());
        Self::start(seed, rng, params, holes)
    }

    /// Start a round over an explicit hole table
    pub fn with_holes(holes: HoleTable, seed: u64) -> Self {
        Self::start(seed, Pcg32::seed_from_u64(seed), GenerationParams::default(), holes)
    }

    fn start(seed: u64, mut rng: Pcg32, params: GenerationParams, holes: HoleTable) -> Self {
        let first = holes.first();
        let course = generate_course_with(GRID_WIDTH, GRID_HEIGHT, first, params, &mut rng);
        let state = GameState::new(first.tee);
        Self {
            seed,
            rng,
            params,
            holes,
            course,
            state,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn holes(&self) -> &HoleTable {
        &self.holes
    }

    /// Layout of the hole being played
    pub fn hole(&self) -> Option<&HoleConfig> {
        self.holes.get(self.state.current_hole)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase(self.holes.len())
    }

    /// Roll the die and offer the resulting moves
    pub fn roll(&mut self) -> Result<&GameState, ActionError> {
        if let Err(err) = ensure_in_play(&self.state, &self.context()) {
            log::warn!("Rejected roll on hole {}: {}", self.state.current_hole + 1, err);
            return Err(err);
        }
        let value = self.rng.random_range(1..=DIE_FACES);
        self.dispatch(Action::Roll(value))
    }

    pub fn add_one(&mut self) -> Result<&GameState, ActionError> {
        self.dispatch(Action::AddOne)
    }

    pub fn click(&mut self, dest: Position) -> Result<&GameState, ActionError> {
        self.dispatch(Action::Click(dest))
    }

    pub fn advance_hole(&mut self) -> Result<&GameState, ActionError> {
        self.dispatch(Action::AdvanceHole)
    }

    pub fn reset(&mut self) -> Result<&GameState, ActionError> {
        self.dispatch(Action::Reset)
    }

    /// Apply an action and publish the resulting snapshot.
    ///
    /// Starting a hole (advance or reset) materializes a fresh course.
    pub fn dispatch(&mut self, action: Action) -> Result<&GameState, ActionError> {
        let next = match apply(&self.state, action, &self.context()) {
            Ok(next) => next,
            Err(err) => {
                log::warn!("Rejected {:?} on hole {}: {}", action, self.state.current_hole + 1, err);
                return Err(err);
            }
        };

        if matches!(action, Action::AdvanceHole | Action::Reset) {
            let hole = self
                .holes
                .get(next.current_hole)
                .ok_or(ActionError::UnknownHole(next.current_hole))?;
            self.course = generate_course_with(GRID_WIDTH, GRID_HEIGHT, hole, self.params, &mut self.rng);
            log::info!("Hole {} (par {})", next.current_hole + 1, hole.par);
        }

        log::debug!("{:?} -> {:?}", action, next.phase(self.holes.len()));
        if next.is_complete && !self.state.is_complete {
            log::info!("Hole {} complete in {} strokes", next.current_hole + 1, next.strokes);
        }

        self.state = next;
        Ok(&self.state)
    }

    fn context(&self) -> HoleContext<'_> {
        HoleContext {
            holes: &self.holes,
            course: &self.course,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::terrain::TerrainType;

    fn open_hole() -> HoleConfig {
        HoleConfig {
            tee: Position::new(4, 10),
            flag: Position::new(4, 2),
            obstacles: Vec::new(),
            par: 3,
        }
    }

    fn open_round(holes: usize) -> HoleTable {
        HoleTable::from_configs(vec![open_hole(); holes]).unwrap()
    }

    /// Two strokes from tee to flag on an open hole
    fn play_open_hole(game: &mut Game) {
        game.dispatch(Action::Roll(6)).unwrap();
        game.click(Position::new(4, 4)).unwrap();
        game.dispatch(Action::Roll(2)).unwrap();
        game.click(Position::new(4, 2)).unwrap();
    }

    #[test]
    fn test_roll_six_from_first_tee() {
        let mut game = Game::new(12345);
        assert_eq!(game.phase(), GamePhase::PreRoll);
        assert_eq!(game.state().ball, Position::new(4, 10));

        let state = game.dispatch(Action::Roll(6)).unwrap();
        assert_eq!(state.last_roll, Some(6));
        assert!(state.can_add_one);
        assert!(state.possible_moves.contains(&Position::new(4, 4)));
        assert_eq!(game.phase(), GamePhase::Rolled);

        let state = game.click(Position::new(4, 4)).unwrap();
        assert_eq!(state.ball, Position::new(4, 4));
        assert_eq!(state.strokes, 1);
        assert_eq!(state.last_roll, None);
        assert!(state.possible_moves.is_empty());
        assert!(state.can_add_one);
        assert!(!state.is_complete);
        assert_eq!(game.phase(), GamePhase::PreRoll);
    }

    #[test]
    fn test_reaching_flag_completes_hole() {
        let mut game = Game::new(12345);
        game.dispatch(Action::Roll(6)).unwrap();
        game.click(Position::new(4, 4)).unwrap();
        game.dispatch(Action::Roll(2)).unwrap();

        let state = game.click(Position::new(4, 2)).unwrap();
        assert!(state.is_complete);
        assert_eq!(state.scores, vec![HoleScore { strokes: 2, par: 3 }]);
        assert_eq!(game.phase(), GamePhase::HoleComplete);

        assert_eq!(game.dispatch(Action::Roll(3)), Err(ActionError::HoleComplete));
        assert_eq!(game.roll(), Err(ActionError::HoleComplete));
        assert_eq!(game.add_one(), Err(ActionError::HoleComplete));
    }

    #[test]
    fn test_add_one_once_per_roll() {
        let mut game = Game::with_holes(open_round(2), 1);
        assert_eq!(game.add_one(), Err(ActionError::NoActiveRoll));

        game.dispatch(Action::Roll(3)).unwrap();
        let state = game.add_one().unwrap();
        assert_eq!(state.last_roll, Some(4));
        assert!(!state.can_add_one);
        assert_eq!(
            state.possible_moves,
            vec![Position::new(0, 10), Position::new(4, 6), Position::new(0, 6)]
        );

        assert_eq!(game.add_one(), Err(ActionError::BonusUnavailable));

        // A committed move re-enables the bonus for the next roll
        game.click(Position::new(4, 6)).unwrap();
        assert!(game.state().can_add_one);
    }

    #[test]
    fn test_no_bonus_from_sand() {
        let holes = open_round(1);
        let mut course = Course::filled(GRID_WIDTH, GRID_HEIGHT, TerrainType::Grass);
        course.set(Position::new(4, 10), TerrainType::Sand);
        let ctx = HoleContext { holes: &holes, course: &course };

        let state = GameState::new(Position::new(4, 10));
        let rolled = apply(&state, Action::Roll(2), &ctx).unwrap();
        assert!(!rolled.can_add_one);
        assert_eq!(apply(&rolled, Action::AddOne, &ctx), Err(ActionError::BonusUnavailable));
    }

    #[test]
    fn test_tree_filters_candidate_moves() {
        let holes = open_round(1);
        let mut course = Course::filled(GRID_WIDTH, GRID_HEIGHT, TerrainType::Grass);
        course.set(Position::new(4, 7), TerrainType::Tree);
        let ctx = HoleContext { holes: &holes, course: &course };

        let state = GameState::new(Position::new(4, 10));
        let rolled = apply(&state, Action::Roll(6), &ctx).unwrap();
        assert!(rolled.possible_moves.is_empty());

        // Landing on the tree is fine; only cells past it are shielded
        let rolled = apply(&state, Action::Roll(3), &ctx).unwrap();
        assert!(rolled.possible_moves.contains(&Position::new(4, 7)));
        assert!(rolled.possible_moves.contains(&Position::new(1, 7)));
        assert_eq!(rolled.possible_moves.len(), 5);
    }

    #[test]
    fn test_invalid_roll_values() {
        let mut game = Game::new(5);
        assert_eq!(game.dispatch(Action::Roll(0)), Err(ActionError::InvalidRoll(0)));
        assert_eq!(game.dispatch(Action::Roll(7)), Err(ActionError::InvalidRoll(7)));
        assert_eq!(game.phase(), GamePhase::PreRoll);
    }

    #[test]
    fn test_reroll_replaces_active_roll() {
        let mut game = Game::with_holes(open_round(1), 9);
        game.dispatch(Action::Roll(3)).unwrap();
        let state = game.dispatch(Action::Roll(5)).unwrap();
        assert_eq!(state.last_roll, Some(5));
        assert!(state.possible_moves.contains(&Position::new(4, 5)));
    }

    #[test]
    fn test_illegal_click_leaves_state() {
        let mut game = Game::with_holes(open_round(1), 2);
        assert_eq!(
            game.click(Position::new(4, 9)),
            Err(ActionError::IllegalMove(Position::new(4, 9)))
        );

        game.dispatch(Action::Roll(2)).unwrap();
        let before = game.state().clone();
        assert_eq!(
            game.click(Position::new(4, 9)),
            Err(ActionError::IllegalMove(Position::new(4, 9)))
        );
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_advance_requires_complete_hole() {
        let mut game = Game::with_holes(open_round(3), 4);
        assert_eq!(game.advance_hole(), Err(ActionError::HoleNotComplete));

        play_open_hole(&mut game);
        let state = game.advance_hole().unwrap();
        assert_eq!(state.current_hole, 1);
        assert_eq!(state.ball, Position::new(4, 10));
        assert_eq!(state.strokes, 0);
        assert!(!state.is_complete);
        assert_eq!(state.scores.len(), 1);
    }

    #[test]
    fn test_advance_builds_next_course() {
        let mut game = Game::new(777);
        game.dispatch(Action::Roll(6)).unwrap();
        game.click(Position::new(4, 4)).unwrap();
        game.dispatch(Action::Roll(2)).unwrap();
        game.click(Position::new(4, 2)).unwrap();

        game.advance_hole().unwrap();
        let hole = game.hole().unwrap().clone();
        assert_eq!(hole.tee, Position::new(2, 10));
        assert_eq!(game.state().ball, hole.tee);
        assert_eq!(game.course().positions_of(TerrainType::Tee), vec![hole.tee]);
        assert_eq!(game.course().positions_of(TerrainType::Green), vec![hole.flag]);
    }

    #[test]
    fn test_full_round_ends_in_game_complete() {
        let mut game = Game::with_holes(open_round(HOLE_COUNT), 8);
        for hole in 0..HOLE_COUNT {
            play_open_hole(&mut game);
            if hole + 1 < HOLE_COUNT {
                assert_eq!(game.phase(), GamePhase::HoleComplete);
                game.advance_hole().unwrap();
            }
        }

        assert_eq!(game.phase(), GamePhase::GameComplete);
        assert_eq!(game.state().scores.len(), HOLE_COUNT);
        assert_eq!(game.advance_hole(), Err(ActionError::GameComplete));
        assert_eq!(game.roll(), Err(ActionError::GameComplete));

        let state = game.reset().unwrap();
        assert_eq!(state.current_hole, 0);
        assert!(state.scores.is_empty());
        assert_eq!(game.phase(), GamePhase::PreRoll);
        game.dispatch(Action::Roll(1)).unwrap();
    }

    #[test]
    fn test_reset_mid_hole() {
        let mut game = Game::new(31);
        game.dispatch(Action::Roll(6)).unwrap();
        game.click(Position::new(4, 4)).unwrap();

        let state = game.reset().unwrap();
        assert_eq!(state, &GameState::new(Position::new(4, 10)));
        assert_eq!(game.course().positions_of(TerrainType::Tee), vec![Position::new(4, 10)]);
    }

    #[test]
    fn test_same_seed_same_round() {
        let mut a = Game::new(99999);
        let mut b = Game::new(99999);
        assert_eq!(a.course(), b.course());
        assert_eq!(a.holes(), b.holes());
        for _ in 0..5 {
            assert_eq!(a.roll().unwrap().last_roll, b.roll().unwrap().last_roll);
        }
    }

    #[test]
    fn test_settings_seed_wins_over_fallback() {
        let settings = Settings {
            seed: Some(42),
            ..Settings::default()
        };
        let game = Game::from_settings(&settings, 1);
        assert_eq!(game.seed(), 42);
        assert_eq!(game.holes(), Game::new(42).holes());
    }

    #[test]
    fn test_round_from_json_starts_on_its_tee() {
        let json = serde_json::to_string(&open_round(2)).unwrap();
        let holes: HoleTable = serde_json::from_str(&json).unwrap();
        let mut game = Game::with_holes(holes, 6);
        assert_eq!(game.course().positions_of(TerrainType::Tee), vec![Position::new(4, 10)]);
        assert!(game.roll().unwrap().can_add_one);
    }
}
