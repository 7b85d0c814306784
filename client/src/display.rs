use common::tictactoe::{
    Board, GameMode, GameStatus, Mark, MatchSession, MoveError, Scoreboard, SessionError,
    WinningLine,
};

/// Board as three rows; empty cells show the 1-based number to type.
pub fn render_board(board: &Board) -> String {
    let mut lines = Vec::with_capacity(5);
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|column| {
                let index = row * 3 + column;
                match board.get(index) {
                    Mark::Empty => (index + 1).to_string(),
                    mark => mark.to_string(),
                }
            })
            .collect();
        lines.push(format!(" {} ", cells.join(" | ")));
        if row < 2 {
            lines.push("---+---+---".to_string());
        }
    }
    lines.join("\n")
}

fn player_label(session: &MatchSession, mark: Mark) -> String {
    match (session.mode(), session.scoreboard().name(mark)) {
        (GameMode::PlayerVsPlayer, Some(name)) => name.to_string(),
        _ => format!("Player {}", mark),
    }
}

pub fn render_status(session: &MatchSession) -> String {
    let state = session.game_state();
    match state.status() {
        GameStatus::InProgress if session.is_paused() => "Paused. Type p to resume.".to_string(),
        GameStatus::InProgress => {
            let mark = state.current_mark();
            format!("{}'s turn ({})", player_label(session, mark), mark)
        }
        GameStatus::Draw => "Game ended in a draw!".to_string(),
        status => match status.winner() {
            Some(winner) => format!("{} has won!", player_label(session, winner)),
            None => String::new(),
        },
    }
}

pub fn render_scoreboard(scoreboard: &Scoreboard) -> String {
    format!(
        "{} (X): {}  |  {} (O): {}",
        scoreboard.x_name, scoreboard.x_score, scoreboard.o_name, scoreboard.o_score
    )
}

pub fn render_winning_line(line: &WinningLine) -> String {
    let cells: Vec<String> = line.cells.iter().map(|index| (index + 1).to_string()).collect();
    format!("{} lines up cells {}", line.mark, cells.join("-"))
}

/// Player-facing text; cells are numbered from 1 like the board display.
pub fn describe_error(error: &SessionError) -> String {
    match error {
        SessionError::Move(MoveError::Occupied(index)) => {
            format!("Cell {} is already taken", index + 1)
        }
        SessionError::Move(MoveError::OutOfBounds(index)) => {
            format!("There is no cell {}", index + 1)
        }
        SessionError::Move(MoveError::GameOver) => {
            "The round is over. Type r to play again or m for the menu.".to_string()
        }
        other => {
            let mut text = other.to_string();
            if let Some(first) = text.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::tictactoe::Difficulty;

    fn pvp_session() -> MatchSession {
        MatchSession::new(
            GameMode::PlayerVsPlayer,
            Difficulty::Optimal,
            Scoreboard::new("Ann", "Bob"),
        )
    }

    #[test]
    fn test_empty_board_shows_cell_numbers() {
        let expected = " 1 | 2 | 3 \n---+---+---\n 4 | 5 | 6 \n---+---+---\n 7 | 8 | 9 ";
        assert_eq!(render_board(&Board::new()), expected);
    }

    #[test]
    fn test_marks_replace_numbers() {
        let mut board = Board::new();
        board.apply_move(4, Mark::X).unwrap();
        board.apply_move(0, Mark::O).unwrap();
        assert!(render_board(&board).contains(" O | 2 | 3 "));
        assert!(render_board(&board).contains(" 4 | X | 6 "));
    }

    #[test]
    fn test_pvp_status_uses_names() {
        let mut session = pvp_session();
        assert_eq!(render_status(&session), "Ann's turn (X)");
        for index in [0, 3, 1, 4, 2] {
            session.play_human(index).unwrap();
        }
        assert_eq!(render_status(&session), "Ann has won!");
    }

    #[test]
    fn test_pvc_status_uses_marks() {
        let session = MatchSession::new(
            GameMode::PlayerVsComputer,
            Difficulty::Random,
            Scoreboard::default(),
        );
        assert_eq!(render_status(&session), "Player X's turn (X)");
    }

    #[test]
    fn test_paused_status() {
        let mut session = pvp_session();
        session.toggle_pause().unwrap();
        assert!(render_status(&session).starts_with("Paused"));
    }

    #[test]
    fn test_winning_line_is_one_based() {
        let line = WinningLine::new(Mark::O, [2, 4, 6]);
        assert_eq!(render_winning_line(&line), "O lines up cells 3-5-7");
    }

    #[test]
    fn test_errors_use_one_based_cells() {
        let error = SessionError::Move(MoveError::Occupied(0));
        assert_eq!(describe_error(&error), "Cell 1 is already taken");
        assert_eq!(describe_error(&SessionError::Paused), "The game is paused");
    }

    #[test]
    fn test_scoreboard_line() {
        let mut scoreboard = Scoreboard::new("Ann", "Bob");
        scoreboard.record_win(Mark::O);
        assert_eq!(render_scoreboard(&scoreboard), "Ann (X): 0  |  Bob (O): 1");
    }
}
