//! Ruleset lookups.
//!
//! Static type tables (tile types, unit types, costs, production rules) and
//! the per-agent resolution of the type names the decision rules use.

pub mod bible;
pub mod roster;

pub use bible::{Bible, RulesError, TileRule, TileType, UnitRule, UnitType};
pub use roster::Roster;
