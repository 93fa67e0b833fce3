//! Matchplay CLI
//!
//! Run self-play matches between engine sessions and analyze positions on
//! the Skirmish demo game.

mod config;
mod selfplay;
mod setup;

use std::env;
use std::path::Path;

use game_core::{coord, GamePosition, Move};
use minimax_engine::Difficulty;
use skirmish::{Skirmish, BOARD_W};

use config::FileConfig;
use selfplay::{run_match, MatchSettings};
use setup::make_session;

const RESULTS_FILE: &str = "selfplay_results.json";

fn print_usage() {
    println!("Matchplay - engine self-play and analysis");
    println!();
    println!("Usage:");
    println!("  matchplay selfplay [--games N] [--difficulty D] [--moves M] [--seed S] [--quiet]");
    println!("  matchplay analyze <position-key> [--difficulty D]");
    println!("  matchplay top <position-key> [--n N] [--difficulty D]");
    println!();
    println!("Positions use the Skirmish key format, e.g. the start position:");
    println!("  \"{}\"", skirmish::START_KEY);
    println!();
    println!("Difficulty is 1 (casual) to 5 (strongest). An optional");
    println!("matchplay.toml can override the difficulty table, cache");
    println!("capacity, and RNG seed. Set RUST_LOG=debug for search traces.");
}

fn render_move(mv: &Move) -> String {
    format!("{}{}", coord(mv.from, BOARD_W), coord(mv.to, BOARD_W))
}

/// Reads `--flag value` style options from the argument list.
fn flag_value<T: std::str::FromStr>(args: &[String], names: [&str; 2]) -> Option<T> {
    let mut i = 0;
    while i + 1 < args.len() {
        if names.contains(&args[i].as_str()) {
            return args[i + 1].parse().ok();
        }
        i += 1;
    }
    None
}

fn run_selfplay(args: &[String], file_config: &FileConfig) {
    let mut settings = MatchSettings {
        session: file_config.session_config(),
        ..MatchSettings::default()
    };
    if let Some(games) = flag_value(args, ["--games", "-g"]) {
        settings.games = games;
    }
    if let Some(level) = flag_value::<u8>(args, ["--difficulty", "-d"]) {
        settings.difficulty = Difficulty::new(level);
    }
    if let Some(moves) = flag_value(args, ["--moves", "-m"]) {
        settings.max_moves = moves;
    }
    if let Some(seed) = flag_value(args, ["--seed", "-s"]) {
        settings.session.seed = Some(seed);
    }
    if args.iter().any(|a| a == "--quiet" || a == "-q") {
        settings.verbose = false;
    }

    println!(
        "=== Self-play: {} games at difficulty {} ===",
        settings.games,
        settings.difficulty.level()
    );
    println!();

    match run_match(&settings) {
        Ok(summary) => {
            println!();
            println!("=== Final Result ===");
            println!(
                "First player: {} wins, {} losses, {} draws",
                summary.first_wins, summary.second_wins, summary.draws
            );
            if let Err(e) = summary.save(RESULTS_FILE) {
                eprintln!("Warning: failed to save {RESULTS_FILE}: {e}");
            } else {
                println!("Saved summary to {RESULTS_FILE}");
            }
        }
        Err(e) => eprintln!("Self-play aborted: {e}"),
    }
}

fn run_analyze(args: &[String], file_config: &FileConfig) {
    let Some(key) = args.first() else {
        eprintln!("Error: analyze requires a position key");
        print_usage();
        return;
    };
    let pos = match Skirmish::decode(key) {
        Ok(pos) => pos,
        Err(e) => {
            // Malformed input, as opposed to a legal but decided position
            eprintln!("Cannot analyze: {e}");
            return;
        }
    };
    let difficulty = Difficulty::new(flag_value(args, ["--difficulty", "-d"]).unwrap_or(3));

    let mut session = make_session(file_config.session_config());
    print!("{pos}");

    match session.find_best_move(&pos, difficulty) {
        Ok(best) => match best.mv {
            Some(mv) => {
                println!(
                    "Best move: {} (score {}, depth {}, {} nodes{})",
                    render_move(&mv),
                    best.score,
                    best.depth,
                    best.nodes,
                    if best.timed_out { ", timed out" } else { "" }
                );
            }
            None => println!("No legal moves: the game is over here."),
        },
        Err(e) => {
            eprintln!("Search failed: {e}");
            return;
        }
    }

    match session.evaluate_position(&pos, 3) {
        Ok(report) => println!(
            "Evaluation: {} ({}, win probability {:.1}%)",
            report.score,
            report.label,
            report.win_probability * 100.0
        ),
        Err(e) => eprintln!("Evaluation failed: {e}"),
    }
}

fn run_top(args: &[String], file_config: &FileConfig) {
    let Some(key) = args.first() else {
        eprintln!("Error: top requires a position key");
        print_usage();
        return;
    };
    let pos = match Skirmish::decode(key) {
        Ok(pos) => pos,
        Err(e) => {
            eprintln!("Cannot rank moves: {e}");
            return;
        }
    };
    let n = flag_value(args, ["--n", "-n"]).unwrap_or(3);
    let difficulty = Difficulty::new(flag_value(args, ["--difficulty", "-d"]).unwrap_or(3));

    let mut session = make_session(file_config.session_config());
    match session.top_moves(&pos, n, difficulty, &[]) {
        Ok(ranked) if ranked.is_empty() => println!("No legal moves: the game is over here."),
        Ok(ranked) => {
            for (i, r) in ranked.iter().enumerate() {
                println!(
                    "{}. {} score {} win {:.1}% - {}",
                    i + 1,
                    render_move(&r.mv),
                    r.score,
                    r.win_probability * 100.0,
                    r.explanation
                );
            }
        }
        Err(e) => eprintln!("Ranking failed: {e}"),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        return;
    };
    let rest = &args[1..];
    let file_config = FileConfig::load(Path::new(config::CONFIG_FILE));

    match command.as_str() {
        "selfplay" => run_selfplay(rest, &file_config),
        "analyze" => run_analyze(rest, &file_config),
        "top" => run_top(rest, &file_config),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
        }
    }
}
