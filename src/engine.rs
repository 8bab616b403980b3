//! Engine session state.
//!
//! Holds the configuration, the name table and the agent built from them,
//! and answers protocol commands. Responses go to any `Write`; diagnostics
//! go through `tracing`.

use std::io::{self, Write};

use tracing::{debug, error, info, warn};

use crate::ai::{self, Ai, NameTable};
use crate::board::Change;
use crate::config::AiConfig;
use crate::protocol::notation::format_orders;
use crate::rules::RulesError;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub config: AiConfig,
    names: NameTable,
    agent: Option<Box<dyn Ai>>,
}

impl Engine {
    /// Creates an engine. No agent exists until `new_game` or the first
    /// change arrives.
    pub fn new(config: AiConfig, names: NameTable) -> Self {
        Engine {
            config,
            names,
            agent: None,
        }
    }

    pub fn agent(&self) -> Option<&dyn Ai> {
        self.agent.as_deref()
    }

    /// Builds a fresh agent from the current configuration.
    pub fn new_game(&mut self) -> Result<(), RulesError> {
        self.agent = None;
        let agent = ai::create(&self.config, &self.names)?;
        info!(
            player = agent.player().name(),
            name = %agent.descriptive_name(),
            "agent ready"
        );
        self.agent = Some(agent);
        Ok(())
    }

    /// Sets an option. Invalid options are logged and otherwise ignored;
    /// the new value takes effect at the next `newgame`.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) {
        if let Err(e) = self.config.set_option(name, value) {
            warn!(option = name, "{}", e);
        }
    }

    /// Decodes one change and feeds it to the agent.
    pub fn apply_change(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let change: Change = serde_json::from_str(json)?;
        if matches!(change, Change::Unknown) {
            debug!(json, "ignoring unknown change");
        }
        if let Some(agent) = self.ensure_agent() {
            agent.receive_changes(std::slice::from_ref(&change));
        }
        Ok(())
    }

    fn ensure_agent(&mut self) -> Option<&mut Box<dyn Ai>> {
        if self.agent.is_none() {
            if let Err(e) = self.new_game() {
                error!("cannot build agent: {}", e);
            }
        }
        self.agent.as_mut()
    }

    /// Handles the handshake: writes identity, options and `aiok`.
    pub fn handle_ai<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let name = self.names.display_name(self.config.character);
        writeln!(out, "id name {}", name)?;
        writeln!(
            out,
            "id descriptive {} ({} {})",
            name,
            self.config.difficulty,
            self.config.variant.name()
        )?;
        writeln!(
            out,
            "option name Variant type combo default {} var hungry var rampant",
            variant_option(self.config.variant)
        )?;
        writeln!(
            out,
            "option name Difficulty type combo default {} var easy var medium var hard",
            self.config.difficulty
        )?;
        writeln!(out, "option name Player type string default {}", self.config.player.name())?;
        writeln!(out, "option name Character type string default {}", self.config.character)?;
        writeln!(out, "option name Ruleset type string default {}", self.config.ruleset)?;
        writeln!(out, "option name Seed type string default")?;
        writeln!(out, "aiok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `go` command. Runs a planning pass if the agent wants
    /// one and writes `bestorders` followed by the turn's orders.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let line = match self.ensure_agent() {
            Some(agent) => {
                agent.prepare_orders();
                let text = format_orders(agent.orders(), agent.agent().bible());
                if text.is_empty() {
                    "bestorders".to_string()
                } else {
                    format!("bestorders {}", text)
                }
            }
            None => "bestorders".to_string(),
        };
        writeln!(out, "{}", line)?;
        out.flush()
    }
}

fn variant_option(variant: ai::Variant) -> &'static str {
    match variant {
        ai::Variant::Hungry => "hungry",
        ai::Variant::Rampant => "rampant",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{Difficulty, Variant};
    use crate::board::Player;

    fn engine() -> Engine {
        let config = AiConfig {
            seed: Some(1),
            difficulty: Difficulty::Hard,
            ..AiConfig::default()
        };
        Engine::new(config, NameTable::default())
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn new_engine_has_no_agent() {
        assert!(engine().agent().is_none());
    }

    #[test]
    fn handshake() {
        let engine = engine();
        let text = output(|out| engine.handle_ai(out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id name Alice");
        assert_eq!(lines[1], "id descriptive Alice (hard HungryAI)");
        assert!(lines.iter().any(|l| l.starts_with("option name Difficulty")));
        assert_eq!(lines.last(), Some(&"aiok"));
    }

    #[test]
    fn isready() {
        let engine = engine();
        assert_eq!(output(|out| engine.handle_isready(out)).trim(), "readyok");
    }

    #[test]
    fn options_apply_at_newgame() {
        let mut engine = engine();
        engine.set_option("Variant", Some("rampant"));
        engine.set_option("Player", Some("blue"));
        engine.set_option("Bogus", Some("1"));
        engine.new_game().unwrap();
        let agent = engine.agent().unwrap();
        assert_eq!(agent.variant(), Variant::Rampant);
        assert_eq!(agent.player(), Player::Blue);
    }

    #[test]
    fn bad_ruleset_leaves_no_agent() {
        let mut engine = engine();
        engine.set_option("Ruleset", Some("missing"));
        assert!(engine.new_game().is_err());
        assert!(engine.agent().is_none());
    }

    #[test]
    fn malformed_change_is_an_error() {
        let mut engine = engine();
        assert!(engine.apply_change("{ not json").is_err());
        assert!(engine.apply_change(r#"{"type":"firestorm"}"#).is_ok());
    }

    #[test]
    fn go_outside_planning_sends_no_orders() {
        let mut engine = engine();
        engine.apply_change(r#"{"type":"dimensions","rows":2,"cols":2}"#).unwrap();
        assert_eq!(output(|out| engine.handle_go(out)).trim(), "bestorders");
    }

    #[test]
    fn go_in_planning_sends_orders() {
        let mut engine = engine();
        let changes = [
            r#"{"type":"dimensions","rows":1,"cols":2}"#,
            r#"{"type":"tile","cell":{"row":0,"col":0},"tile":{"tile":10,"owner":"red","stacks":1,"power":1}}"#,
            r#"{"type":"tile","cell":{"row":0,"col":1},"tile":{"tile":0}}"#,
            r#"{"type":"funds","player":"red","money":50}"#,
            r#"{"type":"phase","phase":"resting"}"#,
            r#"{"type":"phase","phase":"planning"}"#,
        ];
        for json in changes {
            engine.apply_change(json).unwrap();
        }
        let text = output(|out| engine.handle_go(out));
        assert_eq!(text.trim(), "bestorders T 0,0 expand 0,1 farm");
    }
}
