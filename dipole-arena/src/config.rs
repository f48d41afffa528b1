//! Arena configuration: a JSON file overlaid by command-line flags.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use dipole_core::{BotWeights, GameConfig};

/// Policy driving one side.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Greedy,
    Random,
}

impl FromStr for PlayerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "greedy" => Ok(PlayerKind::Greedy),
            "random" => Ok(PlayerKind::Random),
            other => bail!("unknown player kind '{}' (expected greedy or random)", other),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Greedy => write!(f, "greedy"),
            PlayerKind::Random => write!(f, "random"),
        }
    }
}

/// Everything a match series needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub game: GameConfig,
    pub weights: BotWeights,
    pub white: PlayerKind,
    pub black: PlayerKind,
    pub games: u32,
    /// Turns (including passes) before a game is abandoned.
    pub max_plies: u32,
    /// Base seed; game `i` seeds its players from `seed + i`.
    pub seed: u64,
    /// Print every move and the final board.
    pub show: bool,
    pub log_interval_secs: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            game: GameConfig::default(),
            weights: BotWeights::default(),
            white: PlayerKind::Greedy,
            black: PlayerKind::Greedy,
            games: 100,
            max_plies: 400,
            seed: 0,
            show: false,
            log_interval_secs: 5,
        }
    }
}

impl ArenaConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: ArenaConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.game.validate().context("invalid game section")?;
        Ok(config)
    }
}

/// Command-line flags for the `arena` binary.
#[derive(Debug, Default, PartialEq)]
pub struct ArenaArgs {
    pub config: Option<PathBuf>,
    pub games: Option<u32>,
    pub seed: Option<u64>,
    pub max_plies: Option<u32>,
    pub white: Option<PlayerKind>,
    pub black: Option<PlayerKind>,
    pub show: bool,
}

impl ArenaArgs {
    /// Parse flags (program name already stripped).
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = ArenaArgs::default();
        let mut iter = args.iter();
        while let Some(flag) = iter.next() {
            match flag.as_str() {
                "--show" => parsed.show = true,
                "--config" => parsed.config = Some(PathBuf::from(value(&mut iter, flag)?)),
                "--games" => parsed.games = Some(parse_value(&mut iter, flag)?),
                "--seed" => parsed.seed = Some(parse_value(&mut iter, flag)?),
                "--max-plies" => parsed.max_plies = Some(parse_value(&mut iter, flag)?),
                "--white" => parsed.white = Some(parse_value(&mut iter, flag)?),
                "--black" => parsed.black = Some(parse_value(&mut iter, flag)?),
                other => bail!("unknown argument '{}'", other),
            }
        }
        Ok(parsed)
    }

    /// Load the config file (if any) and apply flag overrides.
    pub fn resolve(&self) -> Result<ArenaConfig> {
        let mut config = match &self.config {
            Some(path) => ArenaConfig::load(path)?,
            None => ArenaConfig::default(),
        };
        if let Some(games) = self.games {
            config.games = games;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(max_plies) = self.max_plies {
            config.max_plies = max_plies;
        }
        if let Some(white) = self.white {
            config.white = white;
        }
        if let Some(black) = self.black {
            config.black = black;
        }
        config.show |= self.show;
        Ok(config)
    }
}

fn value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<&'a String> {
    iter.next().with_context(|| format!("{} needs a value", flag))
}

/// Next argument parsed as `T`.
pub fn parse_value<'a, T>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = value(iter, flag)?;
    raw.parse::<T>()
        .map_err(|e| anyhow::anyhow!("invalid value '{}' for {}: {}", raw, flag, e))
}
