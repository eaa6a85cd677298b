//! Static board geometry: staggered peg field, boundary extents, entry
//! slots and the exit table.
//!
//! Pegs live between a clearance band under the entry slots and a clearance
//! band above the exit sensors, so every token has a traversable path to at
//! least one exit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{ExitSpec, GameConfig};
use crate::consts::{
    BOTTOM_MARGIN, EXIT_CLEARANCE, EXIT_SENSOR_DEPTH, PEG_RADIUS, TOKEN_RADIUS, TOP_CLEARANCE,
    WALL_MARGIN,
};
use crate::error::GameError;

/// The obstacle field and its surrounding geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    width: f32,
    height: f32,
    pegs: Vec<Vec2>,
    peg_radius: f32,
    exit_count: usize,
}

impl Board {
    /// Generate the peg lattice for a validated config.
    ///
    /// Deterministic: the same config always yields the same layout. Odd
    /// rows are offset by half the column spacing to approximate a
    /// triangular lattice; pegs inside the side-wall margin are dropped.
    pub fn generate(config: &GameConfig) -> Self {
        let x_spacing = config.width / (config.cols as f32 + 1.0);
        let field_top = TOP_CLEARANCE;
        let field_bottom = config.height - EXIT_CLEARANCE;
        let y_spacing = (field_bottom - field_top) / config.rows as f32;

        let mut pegs = Vec::with_capacity(config.rows * config.cols);
        for row in 0..config.rows {
            let y = field_top + y_spacing * row as f32;
            let row_offset = if row % 2 == 1 { x_spacing / 2.0 } else { 0.0 };
            for col in 0..config.cols {
                let x = x_spacing * (col as f32 + 1.0) + row_offset;
                if x > WALL_MARGIN && x < config.width - WALL_MARGIN {
                    pegs.push(Vec2::new(x, y));
                }
            }
        }

        Self {
            width: config.width,
            height: config.height,
            pegs,
            peg_radius: PEG_RADIUS,
            exit_count: config.exits.len(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Peg centers, ordered by row then column.
    pub fn pegs(&self) -> &[Vec2] {
        &self.pegs
    }

    pub fn peg_radius(&self) -> f32 {
        self.peg_radius
    }

    /// Number of entry slots (mirrors the exit slots).
    pub fn entry_count(&self) -> usize {
        self.exit_count
    }

    /// Spawn point for a drop: the entry slot center, just under the top wall.
    pub fn entry_position(&self, entry: usize) -> Vec2 {
        let x = self.slot_width() * (entry as f32 + 0.5);
        Vec2::new(x, TOKEN_RADIUS + 2.0)
    }

    /// Width of one entry/exit slot.
    pub fn slot_width(&self) -> f32 {
        self.width / self.exit_count as f32
    }

    /// Exit slot containing the given x coordinate, clamped to the board.
    pub fn slot_at(&self, x: f32) -> usize {
        let slot = (x.max(0.0) / self.slot_width()) as usize;
        slot.min(self.exit_count - 1)
    }

    /// Top of the exit sensor band; a token at or below this line resolves.
    pub fn sensor_y(&self) -> f32 {
        self.height - EXIT_SENSOR_DEPTH
    }

    /// Floor line below the sensor band. With the side and top walls this
    /// fully encloses the token.
    pub fn floor_y(&self) -> f32 {
        self.height + BOTTOM_MARGIN
    }
}

/// A scoring exit at the bottom of the board. Fixed at construction, never
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    pub id: String,
    pub points: i64,
    /// Horizontal slot index, left to right
    pub slot: usize,
}

/// Fixed exit table, shared between the board sensors and the scoring
/// machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitTable {
    exits: Vec<Exit>,
}

impl ExitTable {
    /// Build the table from config order; slot indices follow that order.
    pub fn from_config(specs: &[ExitSpec]) -> Self {
        let exits = specs
            .iter()
            .enumerate()
            .map(|(slot, spec)| Exit {
                id: spec.id.clone(),
                points: spec.points,
                slot,
            })
            .collect();
        Self { exits }
    }

    /// Pure lookup by exit id.
    ///
    /// A miss means the board and the table disagree, which a correctly
    /// constructed session cannot produce; callers surface it as a
    /// configuration fault rather than defaulting.
    pub fn resolve(&self, exit_id: &str) -> Result<&Exit, GameError> {
        self.exits
            .iter()
            .find(|exit| exit.id == exit_id)
            .ok_or_else(|| GameError::UnknownExit(exit_id.to_owned()))
    }

    /// Exit for a sensor slot.
    pub fn by_slot(&self, slot: usize) -> Option<&Exit> {
        self.exits.get(slot)
    }

    pub fn len(&self) -> usize {
        self.exits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Exit> {
        self.exits.iter()
    }
}
