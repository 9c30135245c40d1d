//! Befunge interpreter CLI

use befunge::error::report_runtime_error;
use befunge::interp::StdHost;
use befunge::{Grid, Interpreter, LoadError, RunConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Bad command line
const EXIT_USAGE: u8 = 64;
/// Source file could not be read
const EXIT_NO_INPUT: u8 = 74;

#[derive(Parser)]
#[command(name = "befunge", version, about = "Befunge-93 interpreter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a Befunge program against stdin/stdout
    Run {
        /// Source file to run
        file: PathBuf,
        /// Seed for the `?` instruction
        #[arg(long)]
        seed: Option<u64>,
        /// Abort after this many steps
        #[arg(long)]
        max_steps: Option<u64>,
        /// Log every executed step to stderr
        #[arg(long)]
        trace: bool,
    },
    /// Load a program and dump its grid (debug)
    Grid {
        /// Source file to load
        file: PathBuf,
        /// Print the grid as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("befunge=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match cli.command {
        Command::Run { file, seed, max_steps, trace } => {
            init_logging(trace);
            run_file(&file, RunConfig { seed, max_steps })
        }
        Command::Grid { file, json } => {
            init_logging(false);
            dump_grid(&file, json)
        }
    }
}

fn read_source(path: &Path) -> Result<String, ExitCode> {
    std::fs::read_to_string(path).map_err(|e| {
        eprintln!("unable to read source file '{}': {e}", path.display());
        ExitCode::from(EXIT_NO_INPUT)
    })
}

fn load(path: &Path, source: &str) -> Result<Grid, ExitCode> {
    Grid::from_source(source).map_err(|e| {
        eprintln!("Error: {}: {e}", path.display());
        match e {
            LoadError::Io(_) => ExitCode::from(EXIT_NO_INPUT),
            LoadError::Empty => ExitCode::FAILURE,
        }
    })
}

fn run_file(path: &Path, config: RunConfig) -> ExitCode {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(code) => return code,
    };
    let grid = match load(path, &source) {
        Ok(grid) => grid,
        Err(code) => return code,
    };

    let stdin = std::io::stdin();
    let mut host = StdHost::new(stdin.lock(), std::io::stdout().lock());
    let mut interp = Interpreter::with_config(grid, &config);

    match interp.run(&mut host) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let filename = path.display().to_string();
            if report_runtime_error(&filename, &source, &err).is_err() {
                eprintln!("{err}");
            }
            ExitCode::FAILURE
        }
    }
}

fn dump_grid(path: &Path, json: bool) -> ExitCode {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(code) => return code,
    };
    let grid = match load(path, &source) {
        Ok(grid) => grid,
        Err(code) => return code,
    };

    if json {
        match serde_json::to_string_pretty(&grid) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{grid}");
    }
    ExitCode::SUCCESS
}
