//! Bot-versus-bot match runner.
//!
//! One game is a loop of turns:
//!
//! ```text
//!   terminal board?        -> Win(survivor)
//!   ply cap reached?       -> PlyLimit
//!   side to move has a move -> apply it
//!   otherwise              -> pass; two passes in a row -> Stalemate
//! ```
//!
//! A pass consumes a ply, so every game ends within `max_plies` turns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use dipole_core::{Board, BotWeights, Bot, Color, Move, RandomMover, Strategy};

use crate::config::{ArenaConfig, PlayerKind};
use crate::stats::MatchStats;

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Color),
    /// Neither side could move on consecutive turns.
    Stalemate,
    /// Ply cap reached with both sides alive.
    PlyLimit,
}

/// Summary of a finished game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub plies: u32,
    pub passes: u32,
    pub captures: u32,
}

/// Build a player for `color`.
pub fn make_player(kind: PlayerKind, color: Color, weights: BotWeights, seed: u64) -> Box<dyn Strategy> {
    let rng = StdRng::seed_from_u64(seed);
    match kind {
        PlayerKind::Greedy => Box::new(Bot::new(color, weights, rng)),
        PlayerKind::Random => Box::new(RandomMover::new(color, rng)),
    }
}

/// Play one game from `board`, White first. `on_move` sees every applied
/// move together with the board after it.
pub fn play_game(
    mut board: Board,
    white: &mut dyn Strategy,
    black: &mut dyn Strategy,
    max_plies: u32,
    mut on_move: impl FnMut(Color, &Move, &Board),
) -> (GameRecord, Board) {
    let mut to_move = Color::White;
    let mut plies = 0;
    let mut passes = 0;
    let mut captures = 0;
    let mut consecutive_passes = 0;

    let outcome = loop {
        if board.is_terminal() {
            // Both sides empty only happens on a hand-built board.
            break board.winner().map_or(Outcome::Stalemate, Outcome::Win);
        }
        if plies >= max_plies {
            break Outcome::PlyLimit;
        }

        let player: &mut dyn Strategy = match to_move {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        match player.choose_move(&board) {
            Some(mov) => {
                captures += mov.captures.len() as u32;
                board.apply(&mov);
                on_move(to_move, &mov, &board);
                consecutive_passes = 0;
            }
            None => {
                log::debug!("{} has no legal move and passes", to_move);
                passes += 1;
                consecutive_passes += 1;
            }
        }
        plies += 1;

        if consecutive_passes >= 2 {
            break Outcome::Stalemate;
        }
        to_move = to_move.opponent();
    };

    (GameRecord { outcome, plies, passes, captures }, board)
}

/// Runs a series of games and accumulates statistics.
pub struct Arena {
    config: ArenaConfig,
    pub stats: MatchStats,
}

impl Arena {
    pub fn new(config: ArenaConfig) -> Self {
        Arena { config, stats: MatchStats::new() }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Play the whole series, stopping early once `running` goes false.
    /// Returns the number of games completed.
    pub fn run(&mut self, running: &Arc<AtomicBool>) -> anyhow::Result<u32> {
        let config = self.config.clone();
        let start = Board::with_config(&config.game)?;

        for game in 0..config.games {
            if !running.load(Ordering::SeqCst) {
                log::warn!("interrupted after {} games", game);
                return Ok(game);
            }

            let seed = config.seed.wrapping_add(game as u64);
            let mut white = make_player(config.white, Color::White, config.weights, seed);
            // Separate stream from White.
            let mut black =
                make_player(config.black, Color::Black, config.weights, seed ^ 0x9e37_79b9_7f4a_7c15);

            let show = config.show;
            let (record, last) =
                play_game(start.clone(), white.as_mut(), black.as_mut(), config.max_plies, |color, mov, board| {
                    if show {
                        println!("{} {}", color, mov);
                        println!("{}", board);
                    }
                });

            if show {
                println!("Game {}: {:?} after {} plies", game + 1, record.outcome, record.plies);
                println!("{}", last);
            }
            log::debug!("game {} seed={} {:?}", game + 1, seed, record);
            self.stats.record(&record);

            if self.stats.should_log(config.log_interval_secs) {
                self.stats.log_progress();
            }
        }
        Ok(config.games)
    }
}
