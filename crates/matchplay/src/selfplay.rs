//! Engine-vs-engine self-play on the Skirmish game.
//!
//! Each game gets two fresh sessions (one per side, independently owned
//! tables) so the two "players" never share mutable search state.

use game_core::{Color, GamePosition};
use log::debug;
use minimax_engine::{Difficulty, EngineError, SessionConfig};
use serde::Serialize;
use skirmish::Skirmish;

use crate::setup::make_session;

/// Settings for one self-play match.
#[derive(Debug, Clone)]
pub struct MatchSettings {
    pub games: u32,
    pub difficulty: Difficulty,
    /// Full moves before a game is adjudicated a draw.
    pub max_moves: u32,
    pub verbose: bool,
    pub session: SessionConfig,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            games: 4,
            difficulty: Difficulty::new(2),
            max_moves: 80,
            verbose: true,
            session: SessionConfig::default(),
        }
    }
}

/// Result of one game, from the first player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    FirstWin,
    SecondWin,
    Draw,
}

/// Match tally, serialized to `selfplay_results.json` after a run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MatchSummary {
    pub games: u32,
    pub first_wins: u32,
    pub second_wins: u32,
    pub draws: u32,
}

impl MatchSummary {
    fn add(&mut self, result: GameResult) {
        self.games += 1;
        match result {
            GameResult::FirstWin => self.first_wins += 1,
            GameResult::SecondWin => self.second_wins += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

/// Runs the whole match.
pub fn run_match(settings: &MatchSettings) -> Result<MatchSummary, EngineError> {
    debug!(
        "self-play: {} games, difficulty {}, {} move cap",
        settings.games,
        settings.difficulty.level(),
        settings.max_moves
    );
    let mut summary = MatchSummary::default();
    for game in 0..settings.games {
        let result = play_game(settings, game)?;
        summary.add(result);
        if settings.verbose {
            let outcome = match result {
                GameResult::FirstWin => "1-0",
                GameResult::SecondWin => "0-1",
                GameResult::Draw => "1/2",
            };
            println!(
                "Game {}/{}: {} - Score: {}-{}-{}",
                game + 1,
                settings.games,
                outcome,
                summary.first_wins,
                summary.second_wins,
                summary.draws
            );
        }
    }
    Ok(summary)
}

/// Plays a single game. Each side owns its session; every move is reported
/// to the other side's session so both repetition ledgers see the whole
/// game.
fn play_game(settings: &MatchSettings, game_index: u32) -> Result<GameResult, EngineError> {
    // Distinct seeds per game and per side keep opening variety across the
    // match while staying reproducible for a fixed base seed
    let seed_for = |offset: u64| {
        settings
            .session
            .seed
            .map(|seed| seed + u64::from(game_index) * 2 + offset)
    };
    let mut first = make_session(SessionConfig {
        seed: seed_for(0),
        ..settings.session.clone()
    });
    let mut second = make_session(SessionConfig {
        seed: seed_for(1),
        ..settings.session.clone()
    });

    let mut pos = Skirmish::start();
    for _ply in 0..settings.max_moves * 2 {
        if pos.legal_moves().is_empty() {
            // Checkmate or stalemate for the side to move
            return Ok(if !pos.in_check() {
                GameResult::Draw
            } else if pos.side_to_move() == Color::First {
                GameResult::SecondWin
            } else {
                GameResult::FirstWin
            });
        }

        let mover = pos.side_to_move();
        let best = match mover {
            Color::First => first.find_best_move(&pos, settings.difficulty)?,
            Color::Second => second.find_best_move(&pos, settings.difficulty)?,
        };
        let Some(mv) = best.mv else {
            return Ok(GameResult::Draw);
        };
        pos = pos.apply(&mv)?;

        // The opponent's ledger must see this position too
        match mover {
            Color::First => second.note_position(&pos),
            Color::Second => first.note_position(&pos),
        }
    }
    Ok(GameResult::Draw)
}

#[cfg(test)]
#[path = "selfplay_tests.rs"]
mod selfplay_tests;
