//! Game configuration
//!
//! The shape the board, exit table and round machine are built from.
//! Loadable from JSON; validated once when a session starts.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TOTAL_ROUNDS, EXIT_CLEARANCE, TOP_CLEARANCE, WALL_MARGIN};
use crate::error::ConfigError;

/// One scoring exit: identifier plus point value, ordered left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitSpec {
    pub id: String,
    pub points: i64,
}

/// Full game configuration.
///
/// Entry slots mirror the exit slots, so `exits.len()` fixes both ends of
/// the board; `rows`/`cols` only shape the peg lattice in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in pixels
    pub width: f32,
    /// Board height in pixels
    pub height: f32,
    /// Peg rows between the entry and exit bands
    pub rows: usize,
    /// Peg columns per row, before staggering and wall trimming
    pub cols: usize,
    /// Scoring exits, left to right
    pub exits: Vec<ExitSpec>,
    /// Scored rounds before the double-or-nothing final
    pub total_rounds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        let exit = |id: &str, points| ExitSpec {
            id: id.to_owned(),
            points,
        };
        Self {
            width: 800.0,
            height: 600.0,
            rows: 7,
            cols: 7,
            exits: vec![
                exit("e1", 100),
                exit("e2", 200),
                exit("e3", 300),
                exit("e4", 400),
                exit("e5", 300),
                exit("e6", 200),
                exit("e7", 100),
            ],
            total_rounds: DEFAULT_TOTAL_ROUNDS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config can produce a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.width.is_finite() || !self.height.is_finite() || self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.width <= 2.0 * WALL_MARGIN || self.height <= TOP_CLEARANCE + EXIT_CLEARANCE {
            return Err(ConfigError::BoardTooSmall);
        }
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.exits.is_empty() {
            return Err(ConfigError::NoExits);
        }
        let mut seen = std::collections::HashSet::new();
        for exit in &self.exits {
            if !seen.insert(exit.id.as_str()) {
                return Err(ConfigError::DuplicateExitId(exit.id.clone()));
            }
        }
        if self.total_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        Ok(())
    }

    /// Number of entry slots (mirrors the exit slots).
    pub fn entry_count(&self) -> usize {
        self.exits.len()
    }
}
