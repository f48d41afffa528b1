//! Board geometry and bot tuning, passed explicitly to constructors.

use serde::{Deserialize, Serialize};

use crate::{Color, ConfigError, Pos};

/// Largest supported board edge.
pub const MAX_DIMENSION: u8 = 26;

/// Board geometry and starting layout.
///
/// Missing fields fall back to the standard game when deserializing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length N of the N×N board.
    pub dimension: u8,
    pub white_start: Pos,
    pub black_start: Pos,
    /// Tokens in each starting stack.
    pub start_size: u16,
}

impl GameConfig {
    /// Standard layout scaled to an N×N board: Black on row 0 just left of
    /// centre, White on row N-1 just right of centre. For N = 8 this is
    /// (0,3) and (7,4).
    pub fn for_dimension(dimension: u8) -> GameConfig {
        let half = dimension / 2;
        GameConfig {
            dimension,
            white_start: Pos::new(dimension.saturating_sub(1), half),
            black_start: Pos::new(0, half.saturating_sub(1)),
            start_size: 12,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_DIMENSION).contains(&self.dimension) {
            return Err(ConfigError::Dimension(self.dimension));
        }
        for (color, pos) in [(Color::White, self.white_start), (Color::Black, self.black_start)] {
            if pos.row >= self.dimension || pos.col >= self.dimension {
                return Err(ConfigError::StartOutOfBounds { color, pos, dimension: self.dimension });
            }
        }
        if self.white_start == self.black_start {
            return Err(ConfigError::SharedStart(self.white_start));
        }
        if self.start_size == 0 {
            return Err(ConfigError::ZeroStartSize);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::for_dimension(8)
    }
}

/// Linear weights of the greedy move heuristic.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BotWeights {
    /// Per captured stack.
    pub capture: i32,
    /// Per token moved.
    pub size: i32,
    /// Per row advanced toward the opponent's edge.
    pub forward: i32,
}

impl Default for BotWeights {
    fn default() -> Self {
        BotWeights { capture: 10, size: 1, forward: 1 }
    }
}
