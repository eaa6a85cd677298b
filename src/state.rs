//! Round/score state machine
//!
//! Owns everything the scoreboard shows: cumulative score, round counter,
//! the exit selected by the current drop and the double-or-nothing stake.
//! All mutation goes through the transition methods; out-of-order calls are
//! rejected with [`GameError::InvalidTransition`] and leave the state
//! untouched.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Current phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for the player to pick an entry slot
    AwaitingEntry,
    /// A drop resolved; waiting for the answer to the round's question
    AwaitingAnswer,
    /// All scored rounds done; the final stake is on the table
    FinalStake,
    /// The player accepted the stake and is answering the final question
    FinalAnswer,
    /// Terminal; no further transitions are accepted
    GameOver,
}

/// The round/score state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    score: i64,
    current_round: u32,
    total_rounds: u32,
    selected_exit: Option<String>,
    selected_points: i64,
    final_round_stake: i64,
    phase: RoundPhase,
}

impl RoundState {
    /// Fresh game at round 1 with an empty score.
    pub fn new(total_rounds: u32) -> Self {
        Self {
            score: 0,
            current_round: 1,
            total_rounds,
            selected_exit: None,
            selected_points: 0,
            final_round_stake: 0,
            phase: RoundPhase::AwaitingEntry,
        }
    }

    /// Cumulative score. Unbounded in both directions: a wrong final answer
    /// can push it negative.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// 1-indexed round counter.
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Exit selected by the current round's drop, if one resolved.
    pub fn selected_exit(&self) -> Option<&str> {
        self.selected_exit.as_deref()
    }

    /// Stake for the double-or-nothing final. Zero until the last scored
    /// round completes.
    pub fn final_round_stake(&self) -> i64 {
        self.final_round_stake
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RoundPhase::GameOver
    }

    /// Record the exit a drop resolved to and wait for the answer.
    pub fn record_exit(&mut self, exit_id: &str, points: i64) -> Result<(), GameError> {
        if self.phase != RoundPhase::AwaitingEntry {
            return Err(GameError::InvalidTransition {
                action: "record_exit",
                phase: self.phase,
            });
        }
        self.selected_exit = Some(exit_id.to_owned());
        self.selected_points = points;
        self.phase = RoundPhase::AwaitingAnswer;
        Ok(())
    }

    /// Score the round's answer and advance.
    ///
    /// A correct answer adds the selected exit's points, a wrong one
    /// subtracts them. Completing the last scored round fixes the final
    /// stake at half the banked score (floored, never negative) and moves
    /// to [`RoundPhase::FinalStake`].
    pub fn submit_answer(&mut self, correct: bool) -> Result<(), GameError> {
        if self.phase != RoundPhase::AwaitingAnswer {
            return Err(GameError::InvalidTransition {
                action: "submit_answer",
                phase: self.phase,
            });
        }
        let points = self.selected_points;
        self.score += if correct { points } else { -points };
        self.selected_exit = None;
        self.selected_points = 0;

        if self.current_round == self.total_rounds {
            self.final_round_stake = self.score.div_euclid(2).max(0);
            self.phase = RoundPhase::FinalStake;
            log::info!(
                "final round armed: score {}, stake {}",
                self.score,
                self.final_round_stake
            );
        } else {
            self.current_round += 1;
            self.phase = RoundPhase::AwaitingEntry;
            log::info!("round {} of {}: score {}", self.current_round, self.total_rounds, self.score);
        }
        Ok(())
    }

    /// The player takes the final stake; the final question is now live.
    pub fn accept_final_stake(&mut self) -> Result<(), GameError> {
        if self.phase != RoundPhase::FinalStake {
            return Err(GameError::InvalidTransition {
                action: "accept_final_stake",
                phase: self.phase,
            });
        }
        self.phase = RoundPhase::FinalAnswer;
        Ok(())
    }

    /// Resolve the double-or-nothing final and end the game.
    ///
    /// Returns the final score. Valid from [`RoundPhase::FinalStake`] too,
    /// for embedders that skip the explicit stake acceptance step.
    pub fn play_final_round(&mut self, correct: bool) -> Result<i64, GameError> {
        if !matches!(self.phase, RoundPhase::FinalStake | RoundPhase::FinalAnswer) {
            return Err(GameError::InvalidTransition {
                action: "play_final_round",
                phase: self.phase,
            });
        }
        let stake = self.final_round_stake;
        self.score += if correct { stake } else { -stake };
        self.phase = RoundPhase::GameOver;
        Ok(self.score)
    }
}
