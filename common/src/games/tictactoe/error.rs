use std::{error::Error, fmt::Display};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveError {
    OutOfBounds(usize),
    Occupied(usize),
    EmptyMark,
    GameOver,
}

impl Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::OutOfBounds(index) => {
                write!(f, "cell {index} is not on the board (expected 0..=8)")
            }
            MoveError::Occupied(index) => write!(f, "cell {index} is already marked"),
            MoveError::EmptyMark => write!(f, "cannot place an empty mark"),
            MoveError::GameOver => write!(f, "the round is already over"),
        }
    }
}

impl Error for MoveError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionError {
    Move(MoveError),
    Paused,
    NotYourTurn,
    NotComputerTurn,
    PauseUnavailable,
    SearchOnTerminalBoard,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use SessionError::*;
        if let Move(move_error) = self {
            move_error.fmt(f)
        } else {
            write!(f, "{}", match self {
                Paused => "the game is paused",
                NotYourTurn => "wait for the computer to move",
                NotComputerTurn => "it is not the computer's turn",
                PauseUnavailable => "cannot pause a finished round",
                SearchOnTerminalBoard => "no move left for the computer to play",
                Move(_) => unreachable!(),
            })
        }
    }
}

impl Error for SessionError {}

impl From<MoveError> for SessionError {
    fn from(e: MoveError) -> Self {
        SessionError::Move(e)
    }
}
