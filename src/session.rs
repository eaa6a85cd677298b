//! Session façade
//!
//! Wires the board, drop simulator, exit table and round machine together
//! and emits presentation events. The session is the only writer of the
//! round state, and the exit it records always comes from the simulated
//! collision slot, never from a side channel.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::SIM_DT;
use crate::error::{ConfigError, GameError};
use crate::sim::{Board, DropSimulator, ExitTable, Token};
use crate::state::{RoundPhase, RoundState};

/// Immutable scoreboard view, emitted on every state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: i64,
    pub current_round: u32,
    pub total_rounds: u32,
    pub selected_exit: Option<String>,
    pub final_round_stake: i64,
}

/// Notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The scoreboard changed
    StateChanged(Snapshot),
    /// A drop resolved; emitted exactly once per drop
    ExitResolved { exit_id: String, points: i64 },
    /// The final round played out
    GameOver { final_score: i64 },
}

/// One complete game: board, simulator, exit table, round machine and the
/// pending event queue.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    exits: ExitTable,
    sim: DropSimulator,
    rounds: RoundState,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Validate the config and build a fresh session.
    ///
    /// All nondeterminism (launch jitter) derives from `seed`; the same
    /// seed and the same call sequence replay the same game.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::generate(&config);
        let exits = ExitTable::from_config(&config.exits);
        let rounds = RoundState::new(config.total_rounds);
        log::info!(
            "session started: {} pegs, {} exits, {} rounds, seed {seed}",
            board.pegs().len(),
            exits.len(),
            config.total_rounds
        );
        Ok(Self {
            board,
            exits,
            sim: DropSimulator::new(seed),
            rounds,
            events: Vec::new(),
        })
    }

    /// Drop a token at the given entry slot.
    ///
    /// Valid only while waiting for an entry; a drop already in flight is
    /// rejected rather than replaced, so each drop resolves exactly once.
    pub fn select_entry(&mut self, entry: usize) -> Result<(), GameError> {
        let phase = self.rounds.phase();
        if phase != RoundPhase::AwaitingEntry {
            return Err(GameError::InvalidTransition {
                action: "select_entry",
                phase,
            });
        }
        self.sim.start_drop(&self.board, entry)?;
        log::info!(
            "round {}: token dropped at entry {entry}",
            self.rounds.current_round()
        );
        Ok(())
    }

    /// Advance an in-flight drop by one timestep.
    ///
    /// On resolution the exit is looked up, recorded in the round machine
    /// and announced via [`GameEvent::ExitResolved`]. A sensor slot missing
    /// from the exit table is a configuration fault; it is logged and the
    /// drop is discarded instead of silently defaulting.
    pub fn tick(&mut self, dt: f32) {
        let Some(hit) = self.sim.tick(&self.board, dt) else {
            return;
        };
        let (exit_id, points) = match self.exits.by_slot(hit.slot) {
            Some(exit) => (exit.id.clone(), exit.points),
            None => {
                log::error!("sensor slot {} has no exit configured", hit.slot);
                return;
            }
        };
        if let Err(err) = self.rounds.record_exit(&exit_id, points) {
            log::error!("discarding resolved exit {exit_id}: {err}");
            return;
        }
        log::info!("drop resolved: exit {exit_id} ({points} points)");
        self.events.push(GameEvent::ExitResolved {
            exit_id,
            points,
        });
        self.push_snapshot();
    }

    /// Run the in-flight drop to resolution at the fixed timestep.
    ///
    /// For headless embedders; interactive ones call [`Self::tick`] per
    /// frame. Bounded by the simulator's step budget.
    pub fn run_drop_to_resolution(&mut self) {
        while self.sim.in_flight() {
            self.tick(SIM_DT);
        }
    }

    /// Score the answer to the current round's question.
    pub fn submit_answer(&mut self, correct: bool) -> Result<(), GameError> {
        self.rounds.submit_answer(correct)?;
        self.push_snapshot();
        Ok(())
    }

    /// Take the final stake and move on to the final question.
    pub fn accept_final_stake(&mut self) -> Result<(), GameError> {
        self.rounds.accept_final_stake()?;
        self.push_snapshot();
        Ok(())
    }

    /// Resolve the double-or-nothing final; returns the final score.
    pub fn play_final_round(&mut self, correct: bool) -> Result<i64, GameError> {
        let final_score = self.rounds.play_final_round(correct)?;
        self.push_snapshot();
        self.events.push(GameEvent::GameOver { final_score });
        log::info!("game over: final score {final_score}");
        Ok(final_score)
    }

    /// Current scoreboard view.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.rounds.score(),
            current_round: self.rounds.current_round(),
            total_rounds: self.rounds.total_rounds(),
            selected_exit: self.rounds.selected_exit().map(str::to_owned),
            final_round_stake: self.rounds.final_round_stake(),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.rounds.phase()
    }

    pub fn is_game_over(&self) -> bool {
        self.rounds.is_game_over()
    }

    pub fn entry_count(&self) -> usize {
        self.board.entry_count()
    }

    /// Board geometry, for drawing pegs and slots.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The fixed exit table, for scoreboard display and point lookups.
    pub fn exits(&self) -> &ExitTable {
        &self.exits
    }

    /// The live token, if a drop is in flight.
    pub fn token(&self) -> Option<&Token> {
        self.sim.token()
    }

    /// Take all pending events, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn push_snapshot(&mut self) {
        let snapshot = self.snapshot();
        self.events.push(GameEvent::StateChanged(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seed: u64) -> GameSession {
        GameSession::new(GameConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_resolution_emits_exit_then_snapshot() {
        let mut session = session(3);
        session.select_entry(2).unwrap();
        session.run_drop_to_resolution();

        let events = session.drain_events();
        assert_eq!(events.len(), 2);
        let GameEvent::ExitResolved { exit_id, points } = &events[0] else {
            panic!("expected ExitResolved first, got {:?}", events[0]);
        };
        assert_eq!(session.exits().resolve(exit_id).unwrap().points, *points);
        let GameEvent::StateChanged(snapshot) = &events[1] else {
            panic!("expected StateChanged second, got {:?}", events[1]);
        };
        assert_eq!(snapshot.selected_exit.as_deref(), Some(exit_id.as_str()));

        // Queue drained
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_select_entry_rejected_while_awaiting_answer() {
        let mut session = session(4);
        session.select_entry(0).unwrap();
        session.run_drop_to_resolution();
        assert_eq!(session.phase(), RoundPhase::AwaitingAnswer);
        assert!(matches!(
            session.select_entry(0),
            Err(GameError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_token_visible_only_in_flight() {
        let mut session = session(5);
        assert!(session.token().is_none());
        session.select_entry(1).unwrap();
        assert!(session.token().is_some());
        session.run_drop_to_resolution();
        assert!(session.token().is_none());
    }
}
