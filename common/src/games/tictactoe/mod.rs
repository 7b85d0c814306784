mod board;
mod bot_controller;
mod error;
mod game_state;
mod scoreboard;
mod session;
mod types;
mod win_detector;

pub use board::{Board, CELL_COUNT, CENTER, evaluate_terminal, get_available_moves, is_valid_move, winning_line};
pub use bot_controller::{BotInput, calculate_minimax_move, calculate_move};
pub use error::{MoveError, SessionError};
pub use game_state::TicTacToeGameState;
pub use scoreboard::{DEFAULT_O_NAME, DEFAULT_X_NAME, Scoreboard};
pub use session::{COMPUTER_MARK, MatchSession, MoveOutcome};
pub use types::{Difficulty, GameMode, GameStatus, Mark, SearchResult, WinningLine};
pub use win_detector::{LINES, check_win, check_win_with_line};
