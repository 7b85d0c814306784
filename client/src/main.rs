mod command;
mod config;
mod display;
mod game_loop;

use std::time::Duration;

use clap::{Parser, ValueEnum};
use common::games::SessionRng;
use common::logger::{self, LogTarget};
use common::log;
use common::tictactoe::{Difficulty, GameMode};

use config::{Config, get_config_manager};
use game_loop::{GameLoop, MatchPreset};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Pvp,
    Pvc,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Pvp => GameMode::PlayerVsPlayer,
            ModeArg::Pvc => GameMode::PlayerVsComputer,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    #[value(alias = "easy")]
    Random,
    #[value(alias = "impossible")]
    Optimal,
}

impl From<DifficultyArg> for Difficulty {
    fn from(difficulty: DifficultyArg) -> Self {
        match difficulty {
            DifficultyArg::Random => Difficulty::Random,
            DifficultyArg::Optimal => Difficulty::Optimal,
        }
    }
}

#[derive(Parser)]
#[command(name = "xo", about = "Tic-Tac-Toe against a friend or the computer")]
struct Args {
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,
    #[arg(long)]
    x_name: Option<String>,
    #[arg(long)]
    o_name: Option<String>,
    /// Config file, defaults to xo_config.yaml next to the executable
    #[arg(long)]
    config: Option<String>,
    /// Seed for the computer's random moves
    #[arg(long)]
    seed: Option<u64>,
    /// Pause before each computer move, overrides the config value
    #[arg(long)]
    move_delay_ms: Option<u64>,
    /// Delete the saved config and scores before starting
    #[arg(long)]
    reset: bool,
    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let config_manager = get_config_manager(args.config.as_deref());
    if args.reset {
        config_manager.clear_config()?;
    }
    let config: Config = config_manager.get_config()?;

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    let target = match config.log_file {
        Some(ref path) => LogTarget::File(path.clone()),
        None => LogTarget::Stderr,
    };
    logger::init_logger(prefix, target)?;

    let rng = args.seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
    let move_delay = Duration::from_millis(args.move_delay_ms.unwrap_or(config.move_delay_ms));
    log!("Starting with seed {}, move delay {:?}", rng.seed(), move_delay);

    let preset = MatchPreset {
        mode: args.mode.map(GameMode::from),
        difficulty: args.difficulty.map(Difficulty::from),
        x_name: args.x_name,
        o_name: args.o_name,
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut game_loop = GameLoop::new(stdin, std::io::stdout(), &config_manager, rng, move_delay);
    game_loop.run(preset).await?;

    log!("Goodbye");
    Ok(())
}
