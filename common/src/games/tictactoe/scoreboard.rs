use serde::{Deserialize, Serialize};

use super::types::Mark;

pub const DEFAULT_X_NAME: &str = "Player X";
pub const DEFAULT_O_NAME: &str = "Player O";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub x_name: String,
    pub o_name: String,
    pub x_score: u32,
    pub o_score: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl Scoreboard {
    pub fn new(x_name: &str, o_name: &str) -> Self {
        Self {
            x_name: name_or_default(x_name, DEFAULT_X_NAME),
            o_name: name_or_default(o_name, DEFAULT_O_NAME),
            x_score: 0,
            o_score: 0,
        }
    }

    /// Carries a saved tally over only when the same two players come back.
    pub fn resume(saved: Option<Scoreboard>, x_name: &str, o_name: &str) -> Self {
        let fresh = Self::new(x_name, o_name);
        match saved {
            Some(saved) if saved.x_name == fresh.x_name && saved.o_name == fresh.o_name => saved,
            _ => fresh,
        }
    }

    pub fn name(&self, mark: Mark) -> Option<&str> {
        match mark {
            Mark::X => Some(&self.x_name),
            Mark::O => Some(&self.o_name),
            Mark::Empty => None,
        }
    }

    pub fn score(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_score,
            Mark::O => self.o_score,
            Mark::Empty => 0,
        }
    }

    pub fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x_score += 1,
            Mark::O => self.o_score += 1,
            Mark::Empty => {}
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn name_or_default(name: &str, default: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_names_fall_back_to_defaults() {
        let board = Scoreboard::new("  ", "");
        assert_eq!(board.name(Mark::X), Some(DEFAULT_X_NAME));
        assert_eq!(board.name(Mark::O), Some(DEFAULT_O_NAME));
    }

    #[test]
    fn test_names_are_trimmed() {
        let board = Scoreboard::new(" Ann ", "Bob");
        assert_eq!(board.x_name, "Ann");
    }

    #[test]
    fn test_record_win() {
        let mut board = Scoreboard::new("Ann", "Bob");
        board.record_win(Mark::X);
        board.record_win(Mark::X);
        board.record_win(Mark::O);
        board.record_win(Mark::Empty);
        assert_eq!(board.score(Mark::X), 2);
        assert_eq!(board.score(Mark::O), 1);
    }

    #[test]
    fn test_resume_keeps_scores_for_same_players() {
        let mut saved = Scoreboard::new("Ann", "Bob");
        saved.record_win(Mark::O);
        let resumed = Scoreboard::resume(Some(saved.clone()), "Ann ", "Bob");
        assert_eq!(resumed, saved);
    }

    #[test]
    fn test_resume_resets_scores_for_new_players() {
        let mut saved = Scoreboard::new("Ann", "Bob");
        saved.record_win(Mark::X);
        let resumed = Scoreboard::resume(Some(saved), "Bob", "Ann");
        assert_eq!(resumed.score(Mark::X), 0);
        assert_eq!(resumed.x_name, "Bob");
    }

    #[test]
    fn test_resume_without_saved_state() {
        let resumed = Scoreboard::resume(None, "", "Eve");
        assert_eq!(resumed, Scoreboard::new("Player X", "Eve"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut board = Scoreboard::new("Ann", "Bob");
        board.record_win(Mark::X);
        board.reset();
        assert_eq!(board, Scoreboard::default());
    }
}
