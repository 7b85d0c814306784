use crate::games::SessionRng;

use super::board::{Board, CENTER, evaluate_terminal, get_available_moves};
use super::game_state::TicTacToeGameState;
use super::types::{Difficulty, GameStatus, Mark, SearchResult};

const WIN_SCORE: i32 = 10;

pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: *state.board(),
            current_mark: state.current_mark(),
        }
    }
}

/// Picks a cell for `input.current_mark`. `None` means there is no move to
/// make: the board is already won or full, or the mover is `Mark::Empty`.
pub fn calculate_move(
    difficulty: Difficulty,
    input: BotInput,
    rng: &mut SessionRng,
) -> Option<usize> {
    if input.current_mark == Mark::Empty || evaluate_terminal(&input.board).is_terminal() {
        return None;
    }

    match difficulty {
        Difficulty::Random => calculate_random_move(&input, rng),
        Difficulty::Optimal => calculate_minimax_move(&input).map(|result| result.index),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    let available_moves = get_available_moves(&input.board);
    rng.choose(&available_moves)
}

pub fn calculate_minimax_move(input: &BotInput) -> Option<SearchResult> {
    let bot_mark = input.current_mark;
    let opponent_mark = bot_mark.opponent()?;

    if input.board.is_empty() {
        return Some(SearchResult {
            index: CENTER,
            score: 0,
        });
    }

    let available_moves = get_available_moves(&input.board);
    let mut board = input.board;

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for index in available_moves {
        board.set(index, bot_mark);

        // Children that fail low against the current best return a bound that
        // can never beat it, so the chosen move matches an unpruned search.
        let score = minimax(
            &mut board,
            0,
            false,
            bot_mark,
            opponent_mark,
            best_score,
            i32::MAX,
        );

        board.set(index, Mark::Empty);

        if score > best_score {
            best_score = score;
            best_move = Some(SearchResult { index, score });
        }
    }

    best_move
}

fn score_terminal(status: GameStatus, bot_mark: Mark, depth: i32) -> Option<i32> {
    match status {
        GameStatus::InProgress => None,
        GameStatus::Draw => Some(0),
        status if status.winner() == Some(bot_mark) => Some(WIN_SCORE - depth),
        _ => Some(-WIN_SCORE + depth),
    }
}

fn minimax(
    board: &mut Board,
    depth: i32,
    is_maximizing: bool,
    bot_mark: Mark,
    opponent_mark: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if let Some(score) = score_terminal(evaluate_terminal(board), bot_mark, depth) {
        return score;
    }

    let moves = get_available_moves(board);

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in moves {
            board.set(index, bot_mark);
            let eval = minimax(board, depth + 1, false, bot_mark, opponent_mark, alpha, beta);
            board.set(index, Mark::Empty);

            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for index in moves {
            board.set(index, opponent_mark);
            let eval = minimax(board, depth + 1, true, bot_mark, opponent_mark, alpha, beta);
            board.set(index, Mark::Empty);

            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}
