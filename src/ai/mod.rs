//! Computer-controlled players.
//!
//! Every AI personality wraps the same `Agent` (board mirror, turn
//! bookkeeping, ruleset handles and random source) and differs only in which
//! option rules it runs and in what order. A planning pass looks like this:
//!
//! 1. the variant runs its rules against a fresh `Planner`, each rule
//!    appending weighted candidates and charging the shared budget;
//! 2. the selector ranks the candidates and keeps at most one per subject,
//!    up to the ruleset's per-turn order limit;
//! 3. lower difficulties randomly discard part of the selection.

pub mod agent;
pub mod hungry;
pub mod identity;
pub mod planner;
pub mod rampant;
pub mod rules;
pub mod selector;

use std::fmt;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{Change, Order, Player};
use crate::config::AiConfig;
use crate::rules::{Bible, RulesError, UnitType};

pub use agent::{Agent, Context};
pub use hungry::HungryAi;
pub use identity::NameTable;
pub use planner::{Candidate, Planner};
pub use rampant::RampantAi;

/// How strong an agent plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_name(s: &str) -> Option<Difficulty> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// How many selected orders survive degradation, or `None` for all.
    pub const fn keep(self) -> Option<usize> {
        match self {
            Difficulty::Easy => Some(1),
            Difficulty::Medium => Some(3),
            Difficulty::Hard => None,
        }
    }

    /// Maximum number of military units the agent will field.
    pub const fn max_military(self) -> Option<usize> {
        match self {
            Difficulty::Easy => Some(4),
            Difficulty::Medium => Some(10),
            Difficulty::Hard => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// AI personality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Grows its economy first and fights when it has to.
    #[default]
    Hungry,
    /// Builds an army and goes looking for enemy settlements.
    Rampant,
}

impl Variant {
    /// The name shown to other players.
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Hungry => "HungryAI",
            Variant::Rampant => "RampantAI",
        }
    }

    pub fn from_name(s: &str) -> Option<Variant> {
        match s.to_ascii_lowercase().as_str() {
            "hungry" | "hungryai" => Some(Variant::Hungry),
            "rampant" | "rampantai" => Some(Variant::Rampant),
            _ => None,
        }
    }
}

/// A computer-controlled player.
pub trait Ai: Send {
    fn agent(&self) -> &Agent;
    fn agent_mut(&mut self) -> &mut Agent;
    fn variant(&self) -> Variant;

    /// Whether this personality ever trains units of type `unit`.
    fn can_build(&self, unit: UnitType) -> bool;

    /// Runs one planning pass and records the resulting orders.
    fn process(&mut self);

    fn player(&self) -> Player {
        self.agent().player()
    }

    /// Feeds changes from the authoritative stream, in order.
    fn receive_changes(&mut self, changes: &[Change]) {
        self.agent_mut().receive(changes);
    }

    fn wants_to_prepare_orders(&self) -> bool {
        self.agent().turn().wants_to_prepare()
    }

    /// Runs the planning pass if the current phase asks for one.
    fn prepare_orders(&mut self) {
        if self.wants_to_prepare_orders() {
            self.process();
        }
    }

    /// The orders chosen during the current planning phase.
    fn orders(&self) -> &[Order] {
        self.agent().turn().new_orders()
    }

    fn max_orders(&self) -> usize {
        self.agent().max_orders()
    }

    fn max_military(&self) -> Option<usize> {
        self.agent().difficulty().max_military()
    }

    fn display_name(&self) -> &str {
        self.agent().name()
    }

    /// Display name, difficulty and personality, e.g. `Alice (medium HungryAI)`.
    fn descriptive_name(&self) -> String {
        format!(
            "{} ({} {})",
            self.display_name(),
            self.agent().difficulty(),
            self.variant().name()
        )
    }
}

/// Builds the agent described by `config`.
pub fn create(config: &AiConfig, names: &NameTable) -> Result<Box<dyn Ai>, RulesError> {
    let bible = Arc::new(Bible::named(&config.ruleset)?);
    Ok(create_with(config, names, bible))
}

/// Builds the agent described by `config` on an already loaded ruleset.
pub fn create_with(config: &AiConfig, names: &NameTable, bible: Arc<Bible>) -> Box<dyn Ai> {
    let rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let agent = Agent::new(
        config.player,
        config.difficulty,
        names.display_name(config.character),
        bible,
        rng,
    );
    match config.variant {
        Variant::Hungry => Box::new(HungryAi::new(agent)),
        Variant::Rampant => Box::new(RampantAi::new(agent)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_caps() {
        assert_eq!(Difficulty::Easy.keep(), Some(1));
        assert_eq!(Difficulty::Medium.keep(), Some(3));
        assert_eq!(Difficulty::Hard.keep(), None);
        assert_eq!(Difficulty::Easy.max_military(), Some(4));
        assert_eq!(Difficulty::Hard.max_military(), None);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(Difficulty::from_name("HARD"), Some(Difficulty::Hard));
        assert_eq!(Variant::from_name("RampantAI"), Some(Variant::Rampant));
        assert_eq!(Variant::from_name("timid"), None);
    }

    #[test]
    fn create_builds_the_configured_variant() {
        let config = AiConfig {
            variant: Variant::Rampant,
            difficulty: Difficulty::Hard,
            player: Player::Blue,
            character: 'b',
            seed: Some(7),
            ..AiConfig::default()
        };
        let ai = create(&config, &NameTable::default()).unwrap();
        assert_eq!(ai.variant(), Variant::Rampant);
        assert_eq!(ai.player(), Player::Blue);
        assert_eq!(ai.descriptive_name(), "Bob (hard RampantAI)");
        assert!(!ai.wants_to_prepare_orders());
    }

    #[test]
    fn unknown_ruleset_is_an_error() {
        let config = AiConfig {
            ruleset: "nonesuch".to_string(),
            ..AiConfig::default()
        };
        assert!(matches!(
            create(&config, &NameTable::default()),
            Err(RulesError::UnknownRuleset(_))
        ));
    }
}
