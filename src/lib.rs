//! Quiz Plinko - drop-board quiz game core
//!
//! Core modules:
//! - `sim`: deterministic drop simulation (board geometry, token physics, exit sensing)
//! - `state`: round/score state machine
//! - `session`: façade wiring the simulation to the round machine
//! - `questions`: question-selection capability and bundled in-memory bank
//! - `config`: board, exit table and round configuration
//!
//! The crate is headless: rendering and input live in the embedder, which
//! drives a [`session::GameSession`] and reads its events.

pub mod config;
pub mod error;
pub mod questions;
pub mod session;
pub mod sim;
pub mod state;

pub use config::{ExitSpec, GameConfig};
pub use error::{ConfigError, GameError};
pub use questions::{Answer, Question, QuestionBank, QuestionProvider, check_answer, check_text_answer};
pub use session::{GameEvent, GameSession, Snapshot};
pub use state::{RoundPhase, RoundState};

/// Game tuning constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Downward gravity in pixels/s² (screen coordinates, y grows downward)
    pub const GRAVITY: f32 = 900.0;

    /// Token defaults
    pub const TOKEN_RADIUS: f32 = 10.0;
    pub const TOKEN_RESTITUTION: f32 = 0.5;
    pub const TOKEN_FRICTION: f32 = 0.1;
    /// Speed cap; one step at this speed stays under the token radius, so a
    /// token cannot tunnel past a peg or through the sensor band
    pub const TOKEN_MAX_SPEED: f32 = 1200.0;
    /// Maximum horizontal launch perturbation (pixels/s)
    pub const ENTRY_JITTER: f32 = 25.0;

    /// Peg field
    pub const PEG_RADIUS: f32 = 5.0;
    /// Pegs closer than this to a side wall are dropped
    pub const WALL_MARGIN: f32 = 50.0;
    /// Vertical band above the first peg row, below the entry slots
    pub const TOP_CLEARANCE: f32 = 100.0;
    /// Vertical band between the last peg row and the exit sensors
    pub const EXIT_CLEARANCE: f32 = 80.0;

    /// Depth of the exit sensor band above the board bottom
    pub const EXIT_SENSOR_DEPTH: f32 = 30.0;
    /// The floor sits this far below the board bottom; together with the
    /// side and top walls it fully encloses the token
    pub const BOTTOM_MARGIN: f32 = 20.0;

    /// Step budget before an unresolved drop is forced to the nearest exit
    /// (30 seconds at 120 Hz)
    pub const MAX_DROP_TICKS: u32 = 120 * 30;

    /// Scored rounds before the double-or-nothing final
    pub const DEFAULT_TOTAL_ROUNDS: u32 = 5;
}
