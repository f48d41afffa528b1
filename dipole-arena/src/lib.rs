//! Headless match runner for Dipole bots.
//!
//! - [`config`]: JSON config file plus command-line overrides
//! - [`arena`]: turn loop with passing, stalemate and ply cap
//! - [`stats`]: outcome counters and progress logging

pub mod arena;
pub mod config;
pub mod stats;

pub use arena::{make_player, play_game, Arena, GameRecord, Outcome};
pub use config::{ArenaArgs, ArenaConfig, PlayerKind};
pub use stats::MatchStats;
