//! Match statistics tracking.

use std::time::Instant;

use dipole_core::Color;

use crate::arena::{GameRecord, Outcome};

/// Statistics collected over a series of games.
#[derive(Debug, Default)]
pub struct MatchStats {
    /// Games finished (interrupted games are not counted)
    pub games: u64,

    /// Breakdown of outcomes
    pub white_wins: u64,
    pub black_wins: u64,
    pub stalemates: u64,
    pub ply_limits: u64,

    /// Turns played, including passes
    pub total_plies: u64,
    /// Longest game in plies
    pub max_plies: u64,
    /// Turns where the side to move had no legal move
    pub passes: u64,
    /// Stacks removed by captures
    pub captures: u64,

    /// For rate calculation
    start_time: Option<Instant>,
    last_log_time: Option<Instant>,
    last_log_games: u64,
}

impl MatchStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_log_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Record a finished game
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        match game.outcome {
            Outcome::Win(Color::White) => self.white_wins += 1,
            Outcome::Win(Color::Black) => self.black_wins += 1,
            Outcome::Stalemate => self.stalemates += 1,
            Outcome::PlyLimit => self.ply_limits += 1,
        }
        self.total_plies += game.plies as u64;
        self.max_plies = self.max_plies.max(game.plies as u64);
        self.passes += game.passes as u64;
        self.captures += game.captures as u64;
    }

    /// Mean game length in plies
    pub fn mean_plies(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_plies as f64 / self.games as f64
        }
    }

    /// Get current games per second
    pub fn games_per_sec(&self) -> f64 {
        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                return self.games as f64 / elapsed;
            }
        }
        0.0
    }

    /// Check if we should log progress
    pub fn should_log(&self, interval_secs: u64) -> bool {
        if let Some(last) = self.last_log_time {
            last.elapsed().as_secs() >= interval_secs
        } else {
            true
        }
    }

    /// Log progress and reset log timer
    pub fn log_progress(&mut self) {
        let now = Instant::now();
        let elapsed_total = self.start_time.map(|s| s.elapsed().as_secs()).unwrap_or(0);

        // Rate since last log
        let rate = if let Some(last) = self.last_log_time {
            let elapsed = last.elapsed().as_secs_f64();
            let games = self.games - self.last_log_games;
            if elapsed > 0.0 {
                games as f64 / elapsed
            } else {
                0.0
            }
        } else {
            self.games_per_sec()
        };

        log::info!(
            "[{:02}:{:02}:{:02}] games={} rate={:.1}/s white={} black={} stalemate={} ply_limit={}",
            elapsed_total / 3600,
            (elapsed_total % 3600) / 60,
            elapsed_total % 60,
            self.games,
            rate,
            self.white_wins,
            self.black_wins,
            self.stalemates,
            self.ply_limits,
        );

        self.last_log_time = Some(now);
        self.last_log_games = self.games;
    }

    /// Print final summary
    pub fn print_summary(&self) {
        println!("Games played: {}", self.games);
        println!("  - White wins: {}", self.white_wins);
        println!("  - Black wins: {}", self.black_wins);
        println!("  - Stalemates: {}", self.stalemates);
        println!("  - Draws (ply limit): {}", self.ply_limits);
        println!("Mean length: {:.1} plies (max {})", self.mean_plies(), self.max_plies);
        println!("Passes: {}", self.passes);
        println!("Captures: {}", self.captures);

        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                println!("Average rate: {:.1} games/sec", self.games as f64 / elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(outcome: Outcome, plies: u32) -> GameRecord {
        GameRecord { outcome, plies, passes: 1, captures: 2 }
    }

    #[test]
    fn test_record_outcomes() {
        let mut stats = MatchStats::new();
        stats.record(&record(Outcome::Win(Color::White), 10));
        stats.record(&record(Outcome::Win(Color::Black), 20));
        stats.record(&record(Outcome::Stalemate, 4));
        stats.record(&record(Outcome::PlyLimit, 30));

        assert_eq!(stats.games, 4);
        assert_eq!(stats.white_wins, 1);
        assert_eq!(stats.black_wins, 1);
        assert_eq!(stats.stalemates, 1);
        assert_eq!(stats.ply_limits, 1);
        assert_eq!(stats.total_plies, 64);
        assert_eq!(stats.max_plies, 30);
        assert_eq!(stats.passes, 4);
        assert_eq!(stats.captures, 8);
        assert_eq!(stats.mean_plies(), 16.0);
    }

    #[test]
    fn test_mean_plies_empty() {
        assert_eq!(MatchStats::new().mean_plies(), 0.0);
    }
}
