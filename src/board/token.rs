//! Players and the three occupant layers of a square.
//!
//! Every square independently holds at most one tile (terrain or building),
//! one ground unit and one air unit.

use serde::{Deserialize, Serialize};

use crate::rules::{TileType, UnitType};

/// Number of seats, excluding the neutral `None` owner.
pub const PLAYER_COUNT: usize = 8;

/// A player tag. `None` marks neutral or unowned occupants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    #[default]
    None,
    Red,
    Blue,
    Yellow,
    Teal,
    Black,
    Pink,
    Indigo,
    Purple,
}

/// All seated players in seat order.
pub const ALL_PLAYERS: [Player; PLAYER_COUNT] = [
    Player::Red,
    Player::Blue,
    Player::Yellow,
    Player::Teal,
    Player::Black,
    Player::Pink,
    Player::Indigo,
    Player::Purple,
];

impl Player {
    pub const fn name(self) -> &'static str {
        match self {
            Player::None => "none",
            Player::Red => "red",
            Player::Blue => "blue",
            Player::Yellow => "yellow",
            Player::Teal => "teal",
            Player::Black => "black",
            Player::Pink => "pink",
            Player::Indigo => "indigo",
            Player::Purple => "purple",
        }
    }

    pub fn from_name(s: &str) -> Option<Player> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Some(Player::None),
            "red" => Some(Player::Red),
            "blue" => Some(Player::Blue),
            "yellow" => Some(Player::Yellow),
            "teal" => Some(Player::Teal),
            "black" => Some(Player::Black),
            "pink" => Some(Player::Pink),
            "indigo" => Some(Player::Indigo),
            "purple" => Some(Player::Purple),
            _ => None,
        }
    }

    /// True for seated players, false for the neutral tag.
    pub const fn is_seated(self) -> bool {
        !matches!(self, Player::None)
    }

    /// True if `other` is a seated player different from `self`.
    pub fn is_enemy_of(self, other: Player) -> bool {
        other.is_seated() && other != self
    }
}

/// A tile occupant: terrain or a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileToken {
    #[serde(rename = "tile")]
    pub typ: TileType,
    #[serde(default)]
    pub owner: Player,
    #[serde(default)]
    pub stacks: i8,
    /// Number of active stacks; a building with no power does nothing.
    #[serde(default)]
    pub power: i8,
}

impl TileToken {
    /// Unowned terrain with no stacks.
    pub fn terrain(typ: TileType) -> Self {
        Self {
            typ,
            owner: Player::None,
            stacks: 0,
            power: 0,
        }
    }

    /// A fully powered building.
    pub fn building(typ: TileType, owner: Player, stacks: i8) -> Self {
        Self {
            typ,
            owner,
            stacks,
            power: stacks,
        }
    }

    pub fn is_active(&self) -> bool {
        self.power > 0
    }
}

/// A ground or air unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitToken {
    #[serde(rename = "unit")]
    pub typ: UnitType,
    pub owner: Player,
    #[serde(default = "one")]
    pub stacks: i8,
}

fn one() -> i8 {
    1
}

impl UnitToken {
    pub fn new(typ: UnitType, owner: Player, stacks: i8) -> Self {
        Self { typ, owner, stacks }
    }
}

/// Everything known about one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Square {
    #[serde(default)]
    pub tile: Option<TileToken>,
    #[serde(default)]
    pub ground: Option<UnitToken>,
    #[serde(default)]
    pub air: Option<UnitToken>,
}

impl Square {
    /// The tile if it is owned by `player`.
    pub fn tile_of(&self, player: Player) -> Option<TileToken> {
        self.tile.filter(|t| t.owner == player)
    }

    /// The ground unit if it is owned by `player`.
    pub fn ground_of(&self, player: Player) -> Option<UnitToken> {
        self.ground.filter(|u| u.owner == player)
    }

    /// True if a ground unit of another seated player stands here.
    pub fn has_enemy_ground(&self, player: Player) -> bool {
        self.ground.is_some_and(|u| player.is_enemy_of(u.owner))
    }

    pub fn has_enemy_unit(&self, player: Player) -> bool {
        self.has_enemy_ground(player) || self.air.is_some_and(|u| player.is_enemy_of(u.owner))
    }
}
