use std::str::FromStr;

use common::tictactoe::{CELL_COUNT, Difficulty, GameMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(usize),
    Pause,
    Restart,
    Menu,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim().to_ascii_lowercase();
        match input.as_str() {
            "p" | "pause" | "resume" => Ok(Command::Pause),
            "r" | "restart" => Ok(Command::Restart),
            "m" | "menu" => Ok(Command::Menu),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => match other.parse::<usize>() {
                Ok(cell @ 1..=CELL_COUNT) => Ok(Command::Play(cell - 1)),
                _ => Err(format!("Unknown command '{}', type 'h' for help", other)),
            },
        }
    }
}

pub const HELP: &str = "Commands: 1-9 play a cell, p pause/resume, r restart round, m back to menu, q quit";

pub fn parse_mode(input: &str) -> Option<GameMode> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "pvp" => Some(GameMode::PlayerVsPlayer),
        "2" | "pvc" => Some(GameMode::PlayerVsComputer),
        _ => None,
    }
}

pub fn parse_difficulty(input: &str) -> Option<Difficulty> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "easy" | "random" => Some(Difficulty::Random),
        "2" | "impossible" | "optimal" => Some(Difficulty::Optimal),
        _ => None,
    }
}
