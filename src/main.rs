//! Automaton -- an autonomous turn-based AI player.
//!
//! Reads protocol commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr, filtered by `RUST_LOG`.
//!
//! Usage:
//!   automaton [--config FILE]
//!
//! Options:
//!   --config FILE   JSON agent configuration (default: built-in defaults)

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use automaton::ai::NameTable;
use automaton::config::AiConfig;
use automaton::engine::Engine;
use automaton::protocol::parser::{parse_command, Command};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("automaton=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config() -> Result<AiConfig, String> {
    let args: Vec<String> = env::args().collect();
    let mut config = AiConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config needs a file")?;
                let json = fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
                config = AiConfig::from_json(&json).map_err(|e| format!("{}: {}", path, e))?;
            }
            other => warn!(arg = other, "ignoring unknown argument"),
        }
        i += 1;
    }
    Ok(config)
}

/// Runs the protocol loop until `quit` or end of input.
fn run(engine: &mut Engine) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = line?;
        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Ai => engine.handle_ai(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(&name, value.as_deref()),
            Command::NewGame => {
                if let Err(e) = engine.new_game() {
                    error!("newgame failed: {}", e);
                }
            }
            Command::Change { json } => {
                if let Err(e) = engine.apply_change(&json) {
                    warn!("bad change: {}", e);
                }
            }
            Command::Go => engine.handle_go(&mut out)?,
            Command::Quit => break,
        }
    }
    out.flush()
}

fn main() -> ExitCode {
    init_tracing();

    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        variant = config.variant.name(),
        difficulty = config.difficulty.name(),
        player = config.player.name(),
        "starting"
    );

    let mut engine = Engine::new(config, NameTable::default());
    match run(&mut engine) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("io error: {}", e);
            ExitCode::FAILURE
        }
    }
}
