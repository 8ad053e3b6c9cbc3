use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hexbreach_core::{Board, BoardConfig};

use input::Command;

mod input;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Board width, overrides the config file
    #[arg(long)]
    width: Option<u8>,

    /// Board height, overrides the config file
    #[arg(long)]
    height: Option<u8>,

    /// JSON file holding a board config
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn board_config(&self) -> anyhow::Result<BoardConfig> {
        let base = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Could not read {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Invalid board config in {}", path.display()))?
            }
            None => BoardConfig::default(),
        };
        let (height, width) = base.size;
        let size = (self.height.unwrap_or(height), self.width.unwrap_or(width));
        Ok(BoardConfig::new(size, self.seed.or(base.seed)))
    }
}

fn init_logging(filter: log::LevelFilter) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::filter::LevelFilter;

    let level = match filter {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    if tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init()
        .is_err()
    {
        eprintln!("Error initializing logger");
    }
}

fn draw(board: &Board, out: &mut impl Write) -> io::Result<()> {
    for line in render::render(board) {
        writeln!(out, "{line}")?;
    }
    write!(out, "> ")?;
    out.flush()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());

    let config = args.board_config()?;
    log::debug!("config: {config:?}");
    let mut board = Board::new(config).context("Could not generate a board")?;
    log::info!("seed: {:?}", board.seed());

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    draw(&board, &mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line?;
        match Command::parse(&line) {
            Some(Command::Quit) => break,
            Some(Command::New) => {
                board = Board::new(BoardConfig::new(config.size, None))
                    .context("Could not generate a board")?;
                log::info!("seed: {:?}", board.seed());
            }
            Some(command) => match command.target(&board) {
                Some(coords) if board.can_visit(coords) => {
                    let outcome = board.visit(coords);
                    log::debug!("visit {coords:?}: {outcome:?}");
                    if outcome.is_finished() {
                        log::info!("game over: {:?}", board.state());
                    }
                }
                Some(coords) => log::info!("{coords:?} cannot be visited"),
                None => log::info!("nothing at {line:?}"),
            },
            None => log::info!("unknown input {line:?}"),
        }
        draw(&board, &mut stdout)?;
    }
    Ok(())
}
