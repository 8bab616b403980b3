//! Agent configuration.
//!
//! An `AiConfig` can come from a JSON document (the binary's `--config`
//! flag) and be patched one option at a time by `setoption` commands.

use serde::Deserialize;
use thiserror::Error;

use crate::ai::{Difficulty, Variant};
use crate::board::Player;

/// Errors that can occur when reading or changing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option '{0}' needs a value")]
    MissingValue(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },

    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything needed to build an agent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AiConfig {
    pub variant: Variant,
    pub difficulty: Difficulty,
    pub player: Player,
    /// Single-letter tag that picks the display name.
    pub character: char,
    /// Name of the ruleset to load.
    pub ruleset: String,
    /// Seed for the agent's random source; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            variant: Variant::default(),
            difficulty: Difficulty::default(),
            player: Player::Red,
            character: 'a',
            ruleset: "default".to_string(),
            seed: None,
        }
    }
}

/// Option names accepted by `AiConfig::set_option`.
pub const OPTION_NAMES: [&str; 6] = ["Variant", "Difficulty", "Player", "Character", "Ruleset", "Seed"];

impl AiConfig {
    pub fn from_json(json: &str) -> Result<AiConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Changes one option by its protocol name. A `Seed` without a value
    /// goes back to entropy.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let invalid = |v: &str| ConfigError::InvalidValue {
            name: name.to_string(),
            value: v.to_string(),
        };

        if name == "Seed" {
            self.seed = match value {
                None => None,
                Some(v) => Some(v.parse().map_err(|_| invalid(v))?),
            };
            return Ok(());
        }
        if !OPTION_NAMES.contains(&name) {
            return Err(ConfigError::UnknownOption(name.to_string()));
        }

        let value = value.ok_or_else(|| ConfigError::MissingValue(name.to_string()))?;
        match name {
            "Variant" => self.variant = Variant::from_name(value).ok_or_else(|| invalid(value))?,
            "Difficulty" => self.difficulty = Difficulty::from_name(value).ok_or_else(|| invalid(value))?,
            "Player" => {
                self.player = Player::from_name(value)
                    .filter(|p| p.is_seated())
                    .ok_or_else(|| invalid(value))?
            }
            "Character" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => self.character = c.to_ascii_lowercase(),
                    _ => return Err(invalid(value)),
                }
            }
            "Ruleset" => self.ruleset = value.to_string(),
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }
}
