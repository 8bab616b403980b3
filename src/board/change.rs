//! Incoming change events.
//!
//! The rules engine describes everything that happens as an ordered stream of
//! `Change` events. The JSON form is tagged by a `"type"` field; tags this
//! build does not know decode to `Change::Unknown` and are ignored.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::order::{Descriptor, Order};
use super::state::{Daytime, Phase, Season};
use super::token::{Player, Square, TileToken, UnitToken};

/// Notices the rules engine attaches to rejected or odd orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    None,
    OrderInvalid,
    LackingMoney,
    DestinationOccupied,
    SubjectKilled,
    #[serde(other)]
    Unknown,
}

/// One authoritative state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Change {
    /// Board dimensions; clears everything known about the squares.
    Dimensions { rows: i16, cols: i16 },

    /// Full contents of a square that came into view.
    Reveal { cell: Cell, square: Square },

    /// A square went out of view.
    Obscure { cell: Cell },

    /// The tile of a square changed (built, captured, destroyed, grew).
    Tile {
        cell: Cell,
        tile: Option<TileToken>,
    },

    /// A unit appeared, changed or disappeared.
    Unit {
        subject: Descriptor,
        unit: Option<UnitToken>,
    },

    /// A unit relocated from `subject` to `target` within its layer.
    Moves { subject: Descriptor, target: Cell },

    Year { year: u16 },

    Season { season: Season },

    Daytime { daytime: Daytime },

    Phase { phase: Phase },

    /// Absolute money of a player.
    Funds { player: Player, money: i32 },

    /// Money gained by a player.
    Income { player: Player, amount: i32 },

    /// Money spent by a player.
    Expenditure { player: Player, amount: i32 },

    /// An order from a previous turn that is still being carried out.
    Unfinished { order: Order },

    /// The rules engine accepted one of this turn's orders.
    Confirmed { order: Order },

    Defeat { player: Player },

    GameOver,

    Notice {
        notice: Notice,
        #[serde(default)]
        subject: Option<Descriptor>,
    },

    #[serde(other)]
    Unknown,
}

impl Change {
    /// The cell this change refers to, if it refers to one.
    pub fn cell(&self) -> Option<Cell> {
        match self {
            Change::Reveal { cell, .. } | Change::Obscure { cell } | Change::Tile { cell, .. } => {
                Some(*cell)
            }
            Change::Unit { subject, .. } | Change::Moves { subject, .. } => Some(subject.cell),
            _ => None,
        }
    }
}
