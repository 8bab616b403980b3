//! Order types.
//!
//! An order names its subject (the occupant that carries it out) through a
//! `Descriptor`, and carries whatever target cell and payload its kind needs.
//! Orders are plain values: two orders are equal when subject, kind, target
//! and payload are equal.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Direction};
use crate::rules::{TileType, UnitType};

/// Which occupant layer of a cell a descriptor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Cell,
    Tile,
    Ground,
    Air,
}

impl Layer {
    /// Returns the single-character notation abbreviation.
    pub const fn abbr(self) -> char {
        match self {
            Layer::Cell => 'C',
            Layer::Tile => 'T',
            Layer::Ground => 'G',
            Layer::Air => 'A',
        }
    }

    pub fn from_abbr(s: &str) -> Option<Layer> {
        match s {
            "C" => Some(Layer::Cell),
            "T" => Some(Layer::Tile),
            "G" => Some(Layer::Ground),
            "A" => Some(Layer::Air),
            _ => None,
        }
    }
}

/// Identifies one occupant (or a bare cell) on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Descriptor {
    pub layer: Layer,
    pub cell: Cell,
}

impl Descriptor {
    pub const fn new(layer: Layer, cell: Cell) -> Self {
        Self { layer, cell }
    }

    pub const fn tile(cell: Cell) -> Self {
        Self::new(Layer::Tile, cell)
    }

    pub const fn ground(cell: Cell) -> Self {
        Self::new(Layer::Ground, cell)
    }

    pub const fn air(cell: Cell) -> Self {
        Self::new(Layer::Air, cell)
    }
}

/// A proposed action for one occupant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Order {
    /// No action.
    None,

    /// Walk a unit along `moves`; `target` is where the walk ends.
    Move {
        subject: Descriptor,
        target: Cell,
        moves: Vec<Direction>,
    },

    /// A building trains a unit.
    Produce { subject: Descriptor, unit: UnitType },

    /// A building places a new building on a neighbouring cell.
    Expand {
        subject: Descriptor,
        target: Cell,
        tile: TileType,
    },

    /// A building turns into a better building.
    Upgrade { subject: Descriptor, tile: TileType },

    /// A building converts the ground around it.
    Cultivate { subject: Descriptor, tile: TileType },

    /// A unit founds a building on the cell it stands on.
    Settle { subject: Descriptor, tile: TileType },

    /// A unit takes ownership of the building it stands on.
    Capture { subject: Descriptor },

    /// Ranged attack on the units in a cell.
    Shell { subject: Descriptor, target: Cell },

    /// Ranged attack on a cell and everything in it.
    Bombard { subject: Descriptor, target: Cell },

    /// A unit holds position and fires on whatever enters `target`.
    Lockdown { subject: Descriptor, target: Cell },

    /// A unit concentrates its attacks on `target`.
    Focus { subject: Descriptor, target: Cell },
}

impl Order {
    /// Builds a move order whose target follows from the subject and steps.
    pub fn moving(subject: Descriptor, moves: Vec<Direction>) -> Order {
        let target = subject.cell.walk(&moves);
        Order::Move {
            subject,
            target,
            moves,
        }
    }

    /// The occupant carrying out the order, if any.
    pub fn subject(&self) -> Option<Descriptor> {
        match self {
            Order::None => None,
            Order::Move { subject, .. }
            | Order::Produce { subject, .. }
            | Order::Expand { subject, .. }
            | Order::Upgrade { subject, .. }
            | Order::Cultivate { subject, .. }
            | Order::Settle { subject, .. }
            | Order::Capture { subject }
            | Order::Shell { subject, .. }
            | Order::Bombard { subject, .. }
            | Order::Lockdown { subject, .. }
            | Order::Focus { subject, .. } => Some(*subject),
        }
    }

    /// The cell the order acts upon, if it has one.
    pub fn target(&self) -> Option<Cell> {
        match self {
            Order::Move { target, .. }
            | Order::Expand { target, .. }
            | Order::Shell { target, .. }
            | Order::Bombard { target, .. }
            | Order::Lockdown { target, .. }
            | Order::Focus { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// The notation verb for this kind of order.
    pub const fn verb(&self) -> &'static str {
        match self {
            Order::None => "none",
            Order::Move { .. } => "move",
            Order::Produce { .. } => "produce",
            Order::Expand { .. } => "expand",
            Order::Upgrade { .. } => "upgrade",
            Order::Cultivate { .. } => "cultivate",
            Order::Settle { .. } => "settle",
            Order::Capture { .. } => "capture",
            Order::Shell { .. } => "shell",
            Order::Bombard { .. } => "bombard",
            Order::Lockdown { .. } => "lockdown",
            Order::Focus { .. } => "focus",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_derives_target() {
        let order = Order::moving(
            Descriptor::ground(Cell::new(2, 2)),
            vec![Direction::East, Direction::East, Direction::North],
        );
        assert_eq!(order.target(), Some(Cell::new(1, 4)));
        assert_eq!(order.subject(), Some(Descriptor::ground(Cell::new(2, 2))));
    }

    #[test]
    fn none_has_no_subject() {
        assert_eq!(Order::None.subject(), None);
        assert_eq!(Order::None.target(), None);
    }

    #[test]
    fn equality_is_structural() {
        let a = Order::Produce {
            subject: Descriptor::tile(Cell::new(1, 1)),
            unit: UnitType(2),
        };
        let b = Order::Produce {
            subject: Descriptor::tile(Cell::new(1, 1)),
            unit: UnitType(2),
        };
        let c = Order::Produce {
            subject: Descriptor::tile(Cell::new(1, 1)),
            unit: UnitType(3),
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn layer_abbr_roundtrip() {
        for layer in [Layer::Cell, Layer::Tile, Layer::Ground, Layer::Air] {
            let s = layer.abbr().to_string();
            assert_eq!(Layer::from_abbr(&s), Some(layer));
        }
        assert_eq!(Layer::from_abbr("X"), None);
    }

    #[test]
    fn order_json_is_tagged() {
        let order = Order::Capture {
            subject: Descriptor::ground(Cell::new(0, 1)),
        };
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains(r#""kind":"capture""#));
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
