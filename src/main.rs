mod config;
mod script;
mod store;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use canvas::EngineCore;
use canvas::persist::{PersistError, SnapshotStore, load_state};
use canvas::viewport::Viewport;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError};
use crate::script::{ScriptError, Session};
use crate::store::FileStore;

const PROGRESS_EVERY: usize = 1000;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to {action} {path}: {source}")]
    Io { action: &'static str, path: String, source: io::Error },
    #[error("snapshot store: {0}")]
    Store(#[from] PersistError),
    #[error("script {0}")]
    Script(#[from] ScriptError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
}

#[derive(Parser, Debug)]
#[command(name = "journal", about = "Sticker journal page editor: replay input, inspect and export pages")]
struct Cli {
    #[arg(long, env = "JOURNAL_STORE_DIR", default_value = ".journal")]
    store_dir: PathBuf,

    #[arg(long, env = "JOURNAL_KEY", default_value = "journal")]
    key: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a JSON-lines input script to the stored page and save the result.
    Replay(ReplayArgs),
    /// Print the stored page.
    Show,
    /// Print the page as an export scene, without selection decoration.
    Export(ExportArgs),
    /// Delete the stored page.
    Reset,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(long, default_value = "-", help = "Input file path, or - for stdin")]
    input: String,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let mut store = FileStore::new(cli.store_dir);

    match cli.command {
        Command::Replay(args) => run_replay(&mut store, &cli.key, &config, &args),
        Command::Show => run_show(&store, &cli.key, &config),
        Command::Export(args) => run_export(&store, &cli.key, &config, &args),
        Command::Reset => run_reset(&mut store, &cli.key),
    }
}

fn run_replay(store: &mut FileStore, key: &str, config: &AppConfig, args: &ReplayArgs) -> Result<(), CliError> {
    let mut reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&args.input).map_err(|source| CliError::Io {
            action: "open",
            path: args.input.clone(),
            source,
        })?;
        Box::new(BufReader::new(file))
    };

    let mut session = Session::open(store, key, config);
    let mut line = String::new();
    let mut line_no = 0_usize;
    loop {
        line.clear();
        let bytes = reader.read_line(&mut line).map_err(|source| CliError::Io {
            action: "read",
            path: args.input.clone(),
            source,
        })?;
        if bytes == 0 {
            break;
        }
        line_no += 1;
        session.apply_line(&line, line_no)?;
        if line_no % PROGRESS_EVERY == 0 {
            let stats = session.stats();
            debug!(line_no, events = stats.events, stickers = session.engine().state().len(), "replay progress");
        }
    }

    let (page, stats) = session.finish()?;
    info!(events = stats.events, commits = stats.commits, saves = stats.saves, rejected = stats.rejected, "replayed");
    print_json(&page)
}

fn run_show(store: &FileStore, key: &str, config: &AppConfig) -> Result<(), CliError> {
    let engine = EngineCore::with_config(config.editor.clone(), load_state(store, key));
    print_json(engine.state())
}

fn run_export(store: &FileStore, key: &str, config: &AppConfig, args: &ExportArgs) -> Result<(), CliError> {
    if Viewport::new(args.width, args.height).is_none() {
        return Err(CliError::InvalidViewport { width: args.width, height: args.height });
    }
    let mut engine = EngineCore::with_config(config.editor.clone(), load_state(store, key));
    engine.set_viewport(args.width, args.height);
    engine.with_export_view(print_json)
}

fn run_reset(store: &mut FileStore, key: &str) -> Result<(), CliError> {
    store.remove(key)?;
    info!(key, dir = %store.dir().display(), "page removed");
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
