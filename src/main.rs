//! Paper Golf entry point
//!
//! Plays a full round with the autoplayer, printing each hole as it starts
//! and the scorecard at the end.
//!
//! Usage: `paper-golf [settings.json]`. Set `RUST_LOG=debug` for turn logs.

use std::path::PathBuf;
use std::process::ExitCode;

use paper_golf::scorecard::format_relative;
use paper_golf::sim::{Game, autoplay};
use paper_golf::{Scorecard, Settings};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Paper Golf starting...");

    let settings = match std::env::args_os().nth(1) {
        Some(path) => Settings::load(&PathBuf::from(path)),
        None => Settings::default(),
    };

    let mut game = Game::from_settings(&settings, rand::random());
    println!("Seed: {}", game.seed());

    let played = autoplay::play_round(&mut game, settings.autoplay_bonus, settings.autoplay_action_limit, |game| {
        if let Some(hole) = game.hole() {
            println!("\nHole {} - par {}", game.state().current_hole + 1, hole.par);
        }
        println!("{}", game.course().render_ascii());
    });
    if let Err(err) = played {
        log::error!("Autoplay failed: {}", err);
        return ExitCode::FAILURE;
    }

    let card = Scorecard::from_scores(&game.state().scores);
    if card.is_empty() {
        println!("\nNo holes played");
        return ExitCode::SUCCESS;
    }
    println!("\n{}", card);
    if let Some((index, best)) = card.best_hole() {
        println!("Best hole: {} ({})", index + 1, format_relative(best.relative_to_par()));
    }
    ExitCode::SUCCESS
}
