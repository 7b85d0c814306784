use std::error::Error;
use std::io::Write;
use std::time::Duration;

use common::config::ConfigContentProvider;
use common::games::SessionRng;
use common::log;
use common::tictactoe::{
    Difficulty, GameMode, MatchSession, MoveOutcome, Scoreboard, SessionError,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::command::{Command, HELP, parse_difficulty, parse_mode};
use crate::config::{ClientConfigManager, save_scoreboard};
use crate::display::{
    describe_error, render_board, render_scoreboard, render_status, render_winning_line,
};

pub type LoopResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Answers given on the command line. Each one is used for the first match
/// only; after returning to the menu the player is asked again.
#[derive(Debug, Default, Clone)]
pub struct MatchPreset {
    pub mode: Option<GameMode>,
    pub difficulty: Option<Difficulty>,
    pub x_name: Option<String>,
    pub o_name: Option<String>,
}

enum MatchExit {
    Menu,
    Quit,
}

pub struct GameLoop<'a, R, W, P>
where
    P: ConfigContentProvider,
{
    input: Lines<R>,
    output: W,
    config_manager: &'a ClientConfigManager<P>,
    rng: SessionRng,
    move_delay: Duration,
}

impl<'a, R, W, P> GameLoop<'a, R, W, P>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    P: ConfigContentProvider,
{
    pub fn new(
        input: R,
        output: W,
        config_manager: &'a ClientConfigManager<P>,
        rng: SessionRng,
        move_delay: Duration,
    ) -> Self {
        Self {
            input: input.lines(),
            output,
            config_manager,
            rng,
            move_delay,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs matches until the player quits or input ends.
    pub async fn run(&mut self, mut preset: MatchPreset) -> LoopResult<()> {
        loop {
            let Some(session) = self.start_match(&mut preset).await? else {
                return Ok(());
            };

            match self.play_match(session).await? {
                MatchExit::Quit => return Ok(()),
                MatchExit::Menu => {
                    save_scoreboard(self.config_manager, None)?;
                    log!("Back to menu, saved scores cleared");
                }
            }
        }
    }

    async fn prompt(&mut self, text: &str) -> LoopResult<Option<String>> {
        write!(self.output, "{} ", text)?;
        self.output.flush()?;
        Ok(self.input.next_line().await?)
    }

    async fn prompt_choice<T: Copy>(
        &mut self,
        text: &str,
        default: Option<T>,
        parse: fn(&str) -> Option<T>,
    ) -> LoopResult<Option<T>> {
        loop {
            let Some(line) = self.prompt(text).await? else {
                return Ok(None);
            };
            if line.trim().is_empty()
                && let Some(value) = default
            {
                return Ok(Some(value));
            }
            match parse(&line) {
                Some(value) => return Ok(Some(value)),
                None => writeln!(self.output, "Please pick one of the listed options.")?,
            }
        }
    }

    async fn start_match(&mut self, preset: &mut MatchPreset) -> LoopResult<Option<MatchSession>> {
        let config = self.config_manager.get_config()?;

        let mode = match preset.mode.take() {
            Some(mode) => mode,
            None => {
                let text = "Choose a mode: 1) Player vs Player  2) Player vs Computer:";
                match self.prompt_choice(text, config.last_mode, parse_mode).await? {
                    Some(mode) => mode,
                    None => return Ok(None),
                }
            }
        };
        self.config_manager
            .update_config(|config| config.last_mode = Some(mode))?;

        let session = match mode {
            GameMode::PlayerVsPlayer => {
                let x_name = match preset.x_name.take() {
                    Some(name) => name,
                    None => match self.prompt("Player X name:").await? {
                        Some(name) => name,
                        None => return Ok(None),
                    },
                };
                let o_name = match preset.o_name.take() {
                    Some(name) => name,
                    None => match self.prompt("Player O name:").await? {
                        Some(name) => name,
                        None => return Ok(None),
                    },
                };

                let scoreboard = Scoreboard::resume(config.scoreboard, &x_name, &o_name);
                save_scoreboard(self.config_manager, Some(scoreboard.clone()))?;
                MatchSession::new(mode, config.difficulty, scoreboard)
            }
            GameMode::PlayerVsComputer => {
                let difficulty = match preset.difficulty.take() {
                    Some(difficulty) => difficulty,
                    None => {
                        let text = "Choose a difficulty: 1) Easy  2) Impossible:";
                        match self
                            .prompt_choice(text, Some(config.difficulty), parse_difficulty)
                            .await?
                        {
                            Some(difficulty) => difficulty,
                            None => return Ok(None),
                        }
                    }
                };
                self.config_manager
                    .update_config(|config| config.difficulty = difficulty)?;
                MatchSession::new(mode, difficulty, Scoreboard::default())
            }
        };

        log!(
            "Match started: {:?}, {:?}, seed {}",
            session.mode(),
            session.difficulty(),
            self.rng.seed()
        );
        writeln!(self.output, "{}", HELP)?;
        Ok(Some(session))
    }

    async fn play_match(&mut self, mut session: MatchSession) -> LoopResult<MatchExit> {
        self.show(&session)?;

        loop {
            if session.is_computer_turn() {
                tokio::time::sleep(self.move_delay).await;

                let mut rng = self.rng.clone();
                let (returned, rng, result) = tokio::task::spawn_blocking(move || {
                    let result = session.play_computer(&mut rng);
                    (session, rng, result)
                })
                .await?;
                session = returned;
                self.rng = rng;

                self.report(&session, result)?;
                continue;
            }

            let Some(line) = self.prompt(">").await? else {
                return Ok(MatchExit::Quit);
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Err(message) => writeln!(self.output, "{}", message)?,
                Ok(Command::Play(index)) => {
                    let result = session.play_human(index);
                    self.report(&session, result)?;
                }
                Ok(Command::Pause) => match session.toggle_pause() {
                    Ok(true) => writeln!(self.output, "Game paused. Type p to resume.")?,
                    Ok(false) => self.show(&session)?,
                    Err(error) => writeln!(self.output, "{}", describe_error(&error))?,
                },
                Ok(Command::Restart) => {
                    session.restart_round();
                    log!("Round restarted");
                    self.show(&session)?;
                }
                Ok(Command::Menu) => return Ok(MatchExit::Menu),
                Ok(Command::Help) => writeln!(self.output, "{}", HELP)?,
                Ok(Command::Quit) => return Ok(MatchExit::Quit),
            }
        }
    }

    fn report(
        &mut self,
        session: &MatchSession,
        result: Result<MoveOutcome, SessionError>,
    ) -> LoopResult<()> {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(error) => {
                writeln!(self.output, "{}", describe_error(&error))?;
                return Ok(());
            }
        };

        self.show(session)?;

        if outcome.status.is_terminal() {
            if let Some(line) = outcome.winning_line {
                writeln!(self.output, "{}", render_winning_line(&line))?;
            }
            if session.mode() == GameMode::PlayerVsPlayer && outcome.status.winner().is_some() {
                save_scoreboard(self.config_manager, Some(session.scoreboard().clone()))?;
            }
            writeln!(self.output, "Type r to play again, m for the menu, q to quit.")?;
        }
        Ok(())
    }

    fn show(&mut self, session: &MatchSession) -> LoopResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", render_board(session.game_state().board()))?;
        if session.mode() == GameMode::PlayerVsPlayer {
            writeln!(self.output, "{}", render_scoreboard(session.scoreboard()))?;
        }
        writeln!(self.output, "{}", render_status(session))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use common::config::{ConfigManager, MemoryContentConfigProvider, YamlConfigSerializer};
    use common::tictactoe::Mark;

    fn memory_manager(config: Option<Config>) -> ClientConfigManager<MemoryContentConfigProvider> {
        let manager = ConfigManager::new(
            MemoryContentConfigProvider::default(),
            YamlConfigSerializer::new(),
        );
        if let Some(config) = config {
            manager.set_config(&config).unwrap();
        }
        manager
    }

    async fn run_script(
        manager: &ClientConfigManager<MemoryContentConfigProvider>,
        preset: MatchPreset,
        script: &str,
    ) -> String {
        let mut game_loop = GameLoop::new(
            script.as_bytes(),
            Vec::new(),
            manager,
            SessionRng::new(17),
            Duration::ZERO,
        );
        game_loop.run(preset).await.unwrap();
        String::from_utf8(game_loop.into_output()).unwrap()
    }

    fn pvc_preset(difficulty: Difficulty) -> MatchPreset {
        MatchPreset {
            mode: Some(GameMode::PlayerVsComputer),
            difficulty: Some(difficulty),
            ..MatchPreset::default()
        }
    }

    #[tokio::test]
    async fn test_pvp_win_is_saved() {
        let manager = memory_manager(None);
        let output = run_script(&manager, MatchPreset::default(), "1\nAnn\nBob\n1\n4\n2\n5\n3\nq\n").await;

        assert!(output.contains("Ann has won!"));
        assert!(output.contains("X lines up cells 1-2-3"));
        let scoreboard = manager.get_config().unwrap().scoreboard.unwrap();
        assert_eq!(scoreboard.score(Mark::X), 1);
        assert_eq!(scoreboard.o_name, "Bob");
    }

    #[tokio::test]
    async fn test_pvp_resumes_saved_scores_for_same_names() {
        let mut saved = Scoreboard::new("Ann", "Bob");
        saved.record_win(Mark::X);
        saved.record_win(Mark::X);
        saved.record_win(Mark::O);
        let manager = memory_manager(Some(Config {
            scoreboard: Some(saved),
            ..Config::default()
        }));
        let preset = MatchPreset {
            mode: Some(GameMode::PlayerVsPlayer),
            x_name: Some("Ann".to_string()),
            o_name: Some("Bob".to_string()),
            ..MatchPreset::default()
        };

        let output = run_script(&manager, preset, "q\n").await;
        assert!(output.contains("Ann (X): 2  |  Bob (O): 1"));
    }

    #[tokio::test]
    async fn test_new_names_start_from_zero() {
        let mut saved = Scoreboard::new("Ann", "Bob");
        saved.record_win(Mark::X);
        let manager = memory_manager(Some(Config {
            scoreboard: Some(saved),
            ..Config::default()
        }));

        let output = run_script(&manager, MatchPreset::default(), "1\nCid\n\nq\n").await;
        assert!(output.contains("Cid (X): 0  |  Player O (O): 0"));
    }

    #[tokio::test]
    async fn test_menu_clears_saved_scores() {
        let manager = memory_manager(None);
        run_script(&manager, MatchPreset::default(), "1\nAnn\nBob\nm\n").await;
        let config = manager.get_config().unwrap();
        assert_eq!(config.scoreboard, None);
        assert_eq!(config.last_mode, Some(GameMode::PlayerVsPlayer));
    }

    #[tokio::test]
    async fn test_computer_answers_corner_with_center() {
        let manager = memory_manager(None);
        let output = run_script(&manager, pvc_preset(Difficulty::Optimal), "1\nq\n").await;
        assert!(output.contains(" X | 2 | 3 \n---+---+---\n 4 | O | 6 "));
        assert!(output.contains("Player X's turn (X)"));
    }

    #[tokio::test]
    async fn test_pause_blocks_human_moves() {
        let manager = memory_manager(None);
        let output = run_script(&manager, pvc_preset(Difficulty::Random), "p\n5\np\n5\nq\n").await;
        assert!(output.contains("Game paused"));
        assert!(output.contains("The game is paused"));
        assert!(output.contains(" 4 | X | 6 "));
    }

    #[tokio::test]
    async fn test_occupied_cell_is_reported() {
        let manager = memory_manager(None);
        let preset = MatchPreset {
            mode: Some(GameMode::PlayerVsPlayer),
            x_name: Some("Ann".to_string()),
            o_name: Some("Bob".to_string()),
            ..MatchPreset::default()
        };
        let output = run_script(&manager, preset, "5\n5\nq\n").await;
        assert!(output.contains("Cell 5 is already taken"));
    }

    #[tokio::test]
    async fn test_pvc_difficulty_is_remembered() {
        let manager = memory_manager(None);
        run_script(&manager, MatchPreset::default(), "2\n1\nq\n").await;
        let config = manager.get_config().unwrap();
        assert_eq!(config.difficulty, Difficulty::Random);
        assert_eq!(config.last_mode, Some(GameMode::PlayerVsComputer));
    }

    #[tokio::test]
    async fn test_empty_answers_take_saved_choices() {
        let manager = memory_manager(Some(Config {
            last_mode: Some(GameMode::PlayerVsComputer),
            difficulty: Difficulty::Optimal,
            ..Config::default()
        }));
        let output = run_script(&manager, MatchPreset::default(), "\n\n1\nq\n").await;
        assert!(output.contains(" 4 | O | 6 "));
    }

    #[tokio::test]
    async fn test_invalid_menu_answer_is_asked_again() {
        let manager = memory_manager(None);
        let output = run_script(&manager, MatchPreset::default(), "7\n").await;
        assert!(output.contains("Please pick one of the listed options."));
    }

    #[tokio::test]
    async fn test_restart_after_win() {
        let manager = memory_manager(None);
        let preset = MatchPreset {
            mode: Some(GameMode::PlayerVsPlayer),
            x_name: Some("Ann".to_string()),
            o_name: Some("Bob".to_string()),
            ..MatchPreset::default()
        };
        let output = run_script(&manager, preset, "1\n4\n2\n5\n3\n9\nr\nq\n").await;
        assert!(output.contains("The round is over"));
        assert!(output.contains("Ann (X): 1  |  Bob (O): 0\nAnn's turn (X)"));
    }
}
