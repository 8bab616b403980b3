//! Command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the main loop can dispatch on.

use tracing::warn;

/// A parsed host-to-agent command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the handshake.
    Ai,

    /// Synchronization ping; the agent must reply `readyok`.
    IsReady,

    /// Set an option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Build a fresh agent from the current configuration.
    NewGame,

    /// One change from the authoritative stream, as JSON.
    Change { json: String },

    /// Compute orders for the current planning phase.
    Go,

    /// Terminate the process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let mut tokens = trimmed.split_whitespace();
    let head = tokens.next()?;

    match head {
        "ai" => Some(Command::Ai),
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "go" => Some(Command::Go),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(&tokens.collect::<Vec<_>>()),
        "change" => parse_change(trimmed),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses the arguments of `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = args.iter().position(|&t| t == "value");
    let (name_parts, value_parts) = match value_idx {
        Some(vi) => (&args[1..vi], &args[vi + 1..]),
        None => (&args[1..], &args[args.len()..]),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }

    let name = name_parts.join(" ");
    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };
    Some(Command::SetOption { name, value })
}

/// Parses `change <json>`; everything after the keyword is the payload.
fn parse_change(line: &str) -> Option<Command> {
    let json = line.strip_prefix("change").map(str::trim).unwrap_or_default();
    if json.is_empty() {
        warn!("malformed change: expected 'change <json>'");
        return None;
    }
    Some(Command::Change {
        json: json.to_string(),
    })
}
