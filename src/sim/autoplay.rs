//! Autoplay - a simple greedy player
//!
//! Drives a [`Game`] without user input: roll, optionally take the +1,
//! then hit to whichever candidate lands closest to the flag. When no
//! candidate gets closer it re-rolls instead of wasting a stroke.

use thiserror::Error;

use super::geometry::Position;
use super::state::{GamePhase, GameState};
use super::terrain::Course;
use super::tick::{ActionError, Game, legal_moves};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutoplayError {
    #[error("round not finished after {0} actions")]
    ActionLimit(u32),
    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Distance key: Chebyshev first (what completes a hole), then Manhattan
fn distance_key(pos: Position, flag: Position) -> (i32, i32) {
    (pos.chebyshev_distance(flag), pos.manhattan_distance(flag))
}

fn best_of(moves: &[Position], flag: Position) -> Option<Position> {
    // min_by_key keeps the first of equal keys, so ties follow direction order
    moves.iter().copied().min_by_key(|&m| distance_key(m, flag))
}

/// The candidate move that gets strictly closer to the flag, if any
pub fn choose_move(state: &GameState, flag: Position) -> Option<Position> {
    best_of(&state.possible_moves, flag)
        .filter(|&m| distance_key(m, flag) < distance_key(state.ball, flag))
}

/// Whether spending the +1 bonus on the active roll lands closer to the flag
pub fn wants_bonus(state: &GameState, course: &Course, flag: Position) -> bool {
    let Some(roll) = state.last_roll else {
        return false;
    };
    if !state.can_add_one {
        return false;
    }

    let boosted = legal_moves(state.ball, roll + 1, course);
    match (best_of(&boosted, flag), best_of(&state.possible_moves, flag)) {
        (Some(with_bonus), Some(without)) => distance_key(with_bonus, flag) < distance_key(without, flag),
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Take one autoplay action. Does nothing once the round is over.
pub fn step(game: &mut Game, use_bonus: bool) -> Result<(), ActionError> {
    let flag = match game.hole() {
        Some(hole) => hole.flag,
        None => return Ok(()),
    };

    match game.phase() {
        GamePhase::GameComplete => {}
        GamePhase::HoleComplete => {
            game.advance_hole()?;
        }
        GamePhase::PreRoll => {
            game.roll()?;
        }
        GamePhase::Rolled => {
            if use_bonus && wants_bonus(game.state(), game.course(), flag) {
                game.add_one()?;
            } else if let Some(dest) = choose_move(game.state(), flag) {
                game.click(dest)?;
            } else {
                log::trace!("No useful move from {:?}, rolling again", game.state().ball);
                game.roll()?;
            }
        }
    }
    Ok(())
}

/// Play until the round is complete. Returns the number of actions taken.
///
/// `on_hole_start` sees the game once at the start of every hole played,
/// before its first action.
pub fn play_round<F>(
    game: &mut Game,
    use_bonus: bool,
    action_limit: u32,
    mut on_hole_start: F,
) -> Result<u32, AutoplayError>
where
    F: FnMut(&Game),
{
    let mut actions = 0;
    let mut started = None;
    while game.phase() != GamePhase::GameComplete {
        let current = game.state().current_hole;
        if started != Some(current) {
            on_hole_start(game);
            started = Some(current);
        }
        if actions >= action_limit {
            return Err(AutoplayError::ActionLimit(action_limit));
        }
        step(game, use_bonus)?;
        actions += 1;
    }
    log::info!(
        "Autoplay finished the round in {} actions, {} strokes",
        actions,
        game.state().total_strokes()
    );
    Ok(actions)
}
