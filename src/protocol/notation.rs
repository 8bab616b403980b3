//! Order notation.
//!
//! A compact text form for orders, used in the `bestorders` response. Each
//! order starts with its subject (a layer letter and a `row,col` cell),
//! followed by a verb and its arguments. Type names are looked up in the
//! ruleset; a handle the ruleset does not know is written as `#<number>`.
//! Orders in a list are separated by ` ; `.
//!
//! ```text
//! G 3,4 move e e s ; T 5,5 produce settler ; T 5,5 expand 5,6 farm
//! ```

use thiserror::Error;

use crate::board::{Cell, Descriptor, Direction, Layer, Order};
use crate::rules::{Bible, TileType, UnitType};

/// Errors that can occur when parsing order notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown layer '{0}'")]
    UnknownLayer(String),

    #[error("malformed cell '{0}'")]
    BadCell(String),

    #[error("unknown verb '{0}'")]
    UnknownVerb(String),

    #[error("unknown direction '{0}'")]
    UnknownDirection(String),

    #[error("unknown tile type '{0}'")]
    UnknownTileType(String),

    #[error("unknown unit type '{0}'")]
    UnknownUnitType(String),

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(String),

    #[error("unexpected trailing input '{0}'")]
    Trailing(String),
}

/// Cursor over the whitespace-separated tokens of one order.
struct Tokens<'s> {
    tokens: Vec<&'s str>,
    pos: usize,
}

impl<'s> Tokens<'s> {
    fn new(s: &'s str) -> Self {
        Tokens {
            tokens: s.split_whitespace().collect(),
            pos: 0,
        }
    }

    fn next(&mut self, expected: &str) -> Result<&'s str, NotationError> {
        let token = self
            .tokens
            .get(self.pos)
            .copied()
            .ok_or_else(|| NotationError::UnexpectedEnd(expected.to_string()))?;
        self.pos += 1;
        Ok(token)
    }

    fn rest(&mut self) -> &[&'s str] {
        let rest = &self.tokens[self.pos.min(self.tokens.len())..];
        self.pos = self.tokens.len();
        rest
    }

    fn finish(&self) -> Result<(), NotationError> {
        match self.tokens.get(self.pos) {
            None => Ok(()),
            Some(_) => Err(NotationError::Trailing(self.tokens[self.pos..].join(" "))),
        }
    }
}

/// Parses a single order.
pub fn parse_order(s: &str, bible: &Bible) -> Result<Order, NotationError> {
    let mut tokens = Tokens::new(s);
    let first = tokens.next("order")?;
    if first == "none" {
        tokens.finish()?;
        return Ok(Order::None);
    }

    let layer = Layer::from_abbr(first).ok_or_else(|| NotationError::UnknownLayer(first.to_string()))?;
    let cell = parse_cell(tokens.next("subject cell")?)?;
    let subject = Descriptor::new(layer, cell);

    let verb = tokens.next("verb")?;
    let order = match verb {
        "move" => {
            let moves = tokens
                .rest()
                .iter()
                .map(|t| Direction::from_abbr(t).ok_or_else(|| NotationError::UnknownDirection(t.to_string())))
                .collect::<Result<Vec<_>, _>>()?;
            Order::moving(subject, moves)
        }
        "produce" => Order::Produce {
            subject,
            unit: parse_unit_type(tokens.next("unit type")?, bible)?,
        },
        "expand" => {
            let target = parse_cell(tokens.next("target cell")?)?;
            let tile = parse_tile_type(tokens.next("tile type")?, bible)?;
            Order::Expand { subject, target, tile }
        }
        "upgrade" => Order::Upgrade {
            subject,
            tile: parse_tile_type(tokens.next("tile type")?, bible)?,
        },
        "cultivate" => Order::Cultivate {
            subject,
            tile: parse_tile_type(tokens.next("tile type")?, bible)?,
        },
        "settle" => Order::Settle {
            subject,
            tile: parse_tile_type(tokens.next("tile type")?, bible)?,
        },
        "capture" => Order::Capture { subject },
        "shell" => Order::Shell {
            subject,
            target: parse_cell(tokens.next("target cell")?)?,
        },
        "bombard" => Order::Bombard {
            subject,
            target: parse_cell(tokens.next("target cell")?)?,
        },
        "lockdown" => Order::Lockdown {
            subject,
            target: parse_cell(tokens.next("target cell")?)?,
        },
        "focus" => Order::Focus {
            subject,
            target: parse_cell(tokens.next("target cell")?)?,
        },
        other => return Err(NotationError::UnknownVerb(other.to_string())),
    };
    tokens.finish()?;
    Ok(order)
}

/// Parses a ` ; `-separated list of orders. An empty string is an empty list.
pub fn parse_orders(s: &str, bible: &Bible) -> Result<Vec<Order>, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(';').map(|part| parse_order(part.trim(), bible)).collect()
}

/// Formats a single order.
pub fn format_order(order: &Order, bible: &Bible) -> String {
    let Some(subject) = order.subject() else {
        return "none".to_string();
    };
    let head = format!("{} {}", format_descriptor(subject), order.verb());
    match order {
        Order::None => "none".to_string(),
        Order::Move { moves, .. } => {
            let mut s = head;
            for dir in moves {
                s.push(' ');
                s.push(dir.abbr());
            }
            s
        }
        Order::Produce { unit, .. } => format!("{} {}", head, unit_name(*unit, bible)),
        Order::Expand { target, tile, .. } => {
            format!("{} {} {}", head, target, tile_name(*tile, bible))
        }
        Order::Upgrade { tile, .. } | Order::Cultivate { tile, .. } | Order::Settle { tile, .. } => {
            format!("{} {}", head, tile_name(*tile, bible))
        }
        Order::Capture { .. } => head,
        Order::Shell { target, .. }
        | Order::Bombard { target, .. }
        | Order::Lockdown { target, .. }
        | Order::Focus { target, .. } => format!("{} {}", head, target),
    }
}

/// Formats a slice of orders as a ` ; `-separated string.
pub fn format_orders(orders: &[Order], bible: &Bible) -> String {
    orders
        .iter()
        .map(|o| format_order(o, bible))
        .collect::<Vec<_>>()
        .join(" ; ")
}

fn format_descriptor(desc: Descriptor) -> String {
    format!("{} {}", desc.layer.abbr(), desc.cell)
}

fn tile_name(typ: TileType, bible: &Bible) -> String {
    match bible.tile_name(typ) {
        Some(name) => name.to_string(),
        None => format!("#{}", typ.0),
    }
}

fn unit_name(typ: UnitType, bible: &Bible) -> String {
    match bible.unit_name(typ) {
        Some(name) => name.to_string(),
        None => format!("#{}", typ.0),
    }
}

fn parse_cell(token: &str) -> Result<Cell, NotationError> {
    let bad = || NotationError::BadCell(token.to_string());
    let (row, col) = token.split_once(',').ok_or_else(bad)?;
    let row = row.parse::<i16>().map_err(|_| bad())?;
    let col = col.parse::<i16>().map_err(|_| bad())?;
    Ok(Cell::new(row, col))
}

fn parse_tile_type(token: &str, bible: &Bible) -> Result<TileType, NotationError> {
    if let Some(num) = token.strip_prefix('#') {
        return num
            .parse::<u8>()
            .map(TileType)
            .map_err(|_| NotationError::UnknownTileType(token.to_string()));
    }
    bible
        .tile_type(token)
        .ok_or_else(|| NotationError::UnknownTileType(token.to_string()))
}

fn parse_unit_type(token: &str, bible: &Bible) -> Result<UnitType, NotationError> {
    if let Some(num) = token.strip_prefix('#') {
        return num
            .parse::<u8>()
            .map(UnitType)
            .map_err(|_| NotationError::UnknownUnitType(token.to_string()));
    }
    bible
        .unit_type(token)
        .ok_or_else(|| NotationError::UnknownUnitType(token.to_string()))
}
