//! Static ruleset tables.
//!
//! A `Bible` lists every tile and unit type of a ruleset together with the
//! costs and production rules the AI needs. Types are addressed through
//! compact handles (`TileType`, `UnitType`) whose numeric value is the
//! position of the type in the ruleset document. Name references inside the
//! document are checked once at load time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The ruleset embedded in the binary.
const DEFAULT_BIBLE: &str = include_str!("../../data/default.json");

/// Errors that can occur when loading a ruleset.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("unknown ruleset '{0}'")]
    UnknownRuleset(String),

    #[error("ruleset json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown type name '{0}'")]
    UnknownType(String),

    #[error("duplicate type name '{0}'")]
    DuplicateType(String),

    #[error("too many types: {0}")]
    TooManyTypes(usize),
}

/// Handle to a tile type in a particular `Bible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileType(pub u8);

/// Handle to a unit type in a particular `Bible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitType(pub u8);

/// Rules for one tile type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRule {
    pub name: String,
    pub walkable: bool,
    /// Free ground that a new building may be placed on.
    pub buildable: bool,
    pub ownable: bool,
    pub cost: i32,
    pub stacks_max: i8,
    pub produces: Vec<UnitType>,
    pub expands: Vec<TileType>,
    pub upgrades: Vec<TileType>,
    pub cultivates: Vec<TileType>,
}

/// Rules for one unit type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRule {
    pub name: String,
    pub cost: i32,
    pub air: bool,
    pub military: bool,
    pub speed: u8,
    pub captures: bool,
    pub settles: Vec<TileType>,
    pub shell_range: Option<u8>,
    pub bombard_range: Option<u8>,
    pub lockdown: bool,
    pub focus: bool,
}

#[derive(Debug, Deserialize)]
struct RawBible {
    name: String,
    #[serde(default = "default_order_limit")]
    new_order_limit: usize,
    tiles: Vec<RawTile>,
    units: Vec<RawUnit>,
}

#[derive(Debug, Deserialize)]
struct RawTile {
    name: String,
    #[serde(default)]
    walkable: bool,
    #[serde(default)]
    buildable: bool,
    #[serde(default)]
    ownable: bool,
    #[serde(default)]
    cost: i32,
    #[serde(default = "default_stacks")]
    stacks_max: i8,
    #[serde(default)]
    produces: Vec<String>,
    #[serde(default)]
    expands: Vec<String>,
    #[serde(default)]
    upgrades: Vec<String>,
    #[serde(default)]
    cultivates: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawUnit {
    name: String,
    #[serde(default)]
    cost: i32,
    #[serde(default)]
    air: bool,
    #[serde(default)]
    military: bool,
    #[serde(default = "default_speed")]
    speed: u8,
    #[serde(default)]
    captures: bool,
    #[serde(default)]
    settles: Vec<String>,
    #[serde(default)]
    shell_range: Option<u8>,
    #[serde(default)]
    bombard_range: Option<u8>,
    #[serde(default)]
    lockdown: bool,
    #[serde(default)]
    focus: bool,
}

fn default_order_limit() -> usize {
    5
}

fn default_stacks() -> i8 {
    1
}

fn default_speed() -> u8 {
    1
}

/// A compiled ruleset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bible {
    pub name: String,
    /// Maximum number of new orders a player may give per turn.
    pub new_order_limit: usize,
    tiles: Vec<TileRule>,
    units: Vec<UnitRule>,
    tile_names: HashMap<String, TileType>,
    unit_names: HashMap<String, UnitType>,
}

impl Bible {
    /// Looks up a built-in ruleset by name.
    pub fn named(name: &str) -> Result<Bible, RulesError> {
        match name {
            "default" => Bible::from_json(DEFAULT_BIBLE),
            other => Err(RulesError::UnknownRuleset(other.to_string())),
        }
    }

    /// Parses and validates a ruleset document.
    pub fn from_json(json: &str) -> Result<Bible, RulesError> {
        let raw: RawBible = serde_json::from_str(json)?;
        Bible::compile(raw)
    }

    fn compile(raw: RawBible) -> Result<Bible, RulesError> {
        if raw.tiles.len() > usize::from(u8::MAX) {
            return Err(RulesError::TooManyTypes(raw.tiles.len()));
        }
        if raw.units.len() > usize::from(u8::MAX) {
            return Err(RulesError::TooManyTypes(raw.units.len()));
        }

        let mut tile_names = HashMap::new();
        for (i, t) in raw.tiles.iter().enumerate() {
            if tile_names.insert(t.name.clone(), TileType(i as u8)).is_some() {
                return Err(RulesError::DuplicateType(t.name.clone()));
            }
        }
        let mut unit_names = HashMap::new();
        for (i, u) in raw.units.iter().enumerate() {
            if unit_names.insert(u.name.clone(), UnitType(i as u8)).is_some() {
                return Err(RulesError::DuplicateType(u.name.clone()));
            }
        }

        let tile_refs = |names: &[String]| -> Result<Vec<TileType>, RulesError> {
            names
                .iter()
                .map(|n| {
                    tile_names
                        .get(n)
                        .copied()
                        .ok_or_else(|| RulesError::UnknownType(n.clone()))
                })
                .collect()
        };
        let unit_refs = |names: &[String]| -> Result<Vec<UnitType>, RulesError> {
            names
                .iter()
                .map(|n| {
                    unit_names
                        .get(n)
                        .copied()
                        .ok_or_else(|| RulesError::UnknownType(n.clone()))
                })
                .collect()
        };

        let mut tiles = Vec::with_capacity(raw.tiles.len());
        for t in &raw.tiles {
            tiles.push(TileRule {
                name: t.name.clone(),
                walkable: t.walkable,
                buildable: t.buildable,
                ownable: t.ownable,
                cost: t.cost,
                stacks_max: t.stacks_max,
                produces: unit_refs(&t.produces)?,
                expands: tile_refs(&t.expands)?,
                upgrades: tile_refs(&t.upgrades)?,
                cultivates: tile_refs(&t.cultivates)?,
            });
        }

        let mut units = Vec::with_capacity(raw.units.len());
        for u in &raw.units {
            units.push(UnitRule {
                name: u.name.clone(),
                cost: u.cost,
                air: u.air,
                military: u.military,
                speed: u.speed,
                captures: u.captures,
                settles: tile_refs(&u.settles)?,
                shell_range: u.shell_range,
                bombard_range: u.bombard_range,
                lockdown: u.lockdown,
                focus: u.focus,
            });
        }

        Ok(Bible {
            name: raw.name,
            new_order_limit: raw.new_order_limit,
            tiles,
            units,
            tile_names,
            unit_names,
        })
    }

    /// Resolves a tile type name to its handle.
    pub fn tile_type(&self, name: &str) -> Option<TileType> {
        self.tile_names.get(name).copied()
    }

    /// Resolves a unit type name to its handle.
    pub fn unit_type(&self, name: &str) -> Option<UnitType> {
        self.unit_names.get(name).copied()
    }

    pub fn tile(&self, typ: TileType) -> Option<&TileRule> {
        self.tiles.get(usize::from(typ.0))
    }

    pub fn unit(&self, typ: UnitType) -> Option<&UnitRule> {
        self.units.get(usize::from(typ.0))
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Whether ground units may stand on tiles of this type.
    pub fn walkable(&self, typ: TileType) -> bool {
        self.tile(typ).is_some_and(|t| t.walkable)
    }

    pub fn buildable(&self, typ: TileType) -> bool {
        self.tile(typ).is_some_and(|t| t.buildable)
    }

    pub fn ownable(&self, typ: TileType) -> bool {
        self.tile(typ).is_some_and(|t| t.ownable)
    }

    /// Whether `typ` is a building that can produce any unit.
    pub fn produces_any(&self, typ: TileType) -> bool {
        self.tile(typ).is_some_and(|t| !t.produces.is_empty())
    }

    pub fn can_produce(&self, tile: TileType, unit: UnitType) -> bool {
        self.tile(tile).is_some_and(|t| t.produces.contains(&unit))
    }

    pub fn can_expand(&self, tile: TileType, into: TileType) -> bool {
        self.tile(tile).is_some_and(|t| t.expands.contains(&into))
    }

    pub fn can_upgrade(&self, tile: TileType, into: TileType) -> bool {
        self.tile(tile).is_some_and(|t| t.upgrades.contains(&into))
    }

    pub fn can_cultivate(&self, tile: TileType, into: TileType) -> bool {
        self.tile(tile).is_some_and(|t| t.cultivates.contains(&into))
    }

    pub fn can_settle(&self, unit: UnitType, into: TileType) -> bool {
        self.unit(unit).is_some_and(|u| u.settles.contains(&into))
    }

    pub fn tile_cost(&self, typ: TileType) -> i32 {
        self.tile(typ).map_or(0, |t| t.cost)
    }

    pub fn unit_cost(&self, typ: UnitType) -> i32 {
        self.unit(typ).map_or(0, |u| u.cost)
    }

    pub fn is_military(&self, typ: UnitType) -> bool {
        self.unit(typ).is_some_and(|u| u.military)
    }

    pub fn is_air(&self, typ: UnitType) -> bool {
        self.unit(typ).is_some_and(|u| u.air)
    }

    pub fn speed(&self, typ: UnitType) -> u8 {
        self.unit(typ).map_or(0, |u| u.speed)
    }

    pub fn tile_name(&self, typ: TileType) -> Option<&str> {
        self.tile(typ).map(|t| t.name.as_str())
    }

    pub fn unit_name(&self, typ: UnitType) -> Option<&str> {
        self.unit(typ).map(|u| u.name.as_str())
    }
}
