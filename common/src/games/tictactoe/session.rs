use crate::games::SessionRng;
use crate::log;

use super::board::winning_line;
use super::bot_controller::{BotInput, calculate_move};
use super::error::SessionError;
use super::game_state::TicTacToeGameState;
use super::scoreboard::Scoreboard;
use super::types::{Difficulty, GameMode, GameStatus, Mark, WinningLine};

pub const COMPUTER_MARK: Mark = Mark::O;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub index: usize,
    pub mark: Mark,
    pub status: GameStatus,
    pub winning_line: Option<WinningLine>,
}

/// A sequence of rounds in one mode. Only player-vs-player wins are scored.
#[derive(Debug, Clone)]
pub struct MatchSession {
    mode: GameMode,
    difficulty: Difficulty,
    game_state: TicTacToeGameState,
    scoreboard: Scoreboard,
    paused: bool,
}

impl MatchSession {
    pub fn new(mode: GameMode, difficulty: Difficulty, scoreboard: Scoreboard) -> Self {
        Self {
            mode,
            difficulty,
            game_state: TicTacToeGameState::new(),
            scoreboard,
            paused: false,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn game_state(&self) -> &TicTacToeGameState {
        &self.game_state
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_computer_turn(&self) -> bool {
        self.mode == GameMode::PlayerVsComputer
            && !self.paused
            && self.game_state.status() == GameStatus::InProgress
            && self.game_state.current_mark() == COMPUTER_MARK
    }

    pub fn play_human(&mut self, index: usize) -> Result<MoveOutcome, SessionError> {
        if self.paused {
            return Err(SessionError::Paused);
        }
        if self.mode == GameMode::PlayerVsComputer
            && self.game_state.current_mark() == COMPUTER_MARK
            && !self.game_state.status().is_terminal()
        {
            return Err(SessionError::NotYourTurn);
        }

        self.apply(index)
    }

    pub fn play_computer(&mut self, rng: &mut SessionRng) -> Result<MoveOutcome, SessionError> {
        if self.paused {
            return Err(SessionError::Paused);
        }
        if !self.is_computer_turn() {
            return Err(SessionError::NotComputerTurn);
        }

        let input = BotInput::from_game_state(&self.game_state);
        let index = calculate_move(self.difficulty, input, rng)
            .ok_or(SessionError::SearchOnTerminalBoard)?;
        log!("Computer ({:?}) plays cell {}", self.difficulty, index);

        self.apply(index)
    }

    /// Returns the new paused flag.
    pub fn toggle_pause(&mut self) -> Result<bool, SessionError> {
        if self.game_state.status().is_terminal() {
            return Err(SessionError::PauseUnavailable);
        }
        self.paused = !self.paused;
        Ok(self.paused)
    }

    pub fn restart_round(&mut self) {
        self.game_state.reset();
        self.paused = false;
    }

    fn apply(&mut self, index: usize) -> Result<MoveOutcome, SessionError> {
        let mark = self.game_state.current_mark();
        let status = self.game_state.place_mark(index)?;

        if let Some(winner) = status.winner() {
            log!("Round won by {} ({:?})", winner, self.mode);
            if self.mode == GameMode::PlayerVsPlayer {
                self.scoreboard.record_win(winner);
            }
        } else if status == GameStatus::Draw {
            log!("Round ended in a draw ({:?})", self.mode);
        }

        Ok(MoveOutcome {
            index,
            mark,
            status,
            winning_line: winning_line(self.game_state.board()),
        })
    }
}
