//! The board mirror.
//!
//! A local copy of everything the agent has been told about the game:
//! occupants of every square, money, calendar and current phase. The mirror
//! is updated only through `Board::apply` and never judges whether a change
//! is legal; that is the rules engine's business. Applying the same
//! authoritative stream twice leaves the mirror in the same state.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::cell::{Cell, Grid};
use super::change::Change;
use super::order::{Descriptor, Layer};
use super::token::{Player, Square, TileToken, UnitToken};
use crate::rules::Bible;

/// The season of a game year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

/// The half of a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Daytime {
    #[default]
    Early,
    Late,
}

/// A stage of the turn cycle.
///
/// The cycle is Growth -> Resting -> Planning -> Action -> Decay and back to
/// Growth of the next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Growth,
    Resting,
    Planning,
    Action,
    Decay,
}

impl Phase {
    /// The phase that follows this one.
    pub const fn next(self) -> Phase {
        match self {
            Phase::Growth => Phase::Resting,
            Phase::Resting => Phase::Planning,
            Phase::Planning => Phase::Action,
            Phase::Action => Phase::Decay,
            Phase::Decay => Phase::Growth,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Phase::Growth => "growth",
            Phase::Resting => "resting",
            Phase::Planning => "planning",
            Phase::Action => "action",
            Phase::Decay => "decay",
        }
    }
}

/// Local copy of the game state as seen by one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    squares: Vec<Square>,
    /// The player whose view this is.
    pub player: Player,
    pub year: u16,
    pub season: Season,
    pub daytime: Daytime,
    pub phase: Phase,
    pub money: i32,
    pub defeated: bool,
    pub game_over: bool,
}

impl Board {
    /// Creates an empty board of the given size.
    pub fn new(rows: i16, cols: i16, player: Player) -> Self {
        let grid = Grid::new(rows, cols);
        Board {
            grid,
            squares: vec![Square::default(); grid.len()],
            player,
            year: 0,
            season: Season::default(),
            daytime: Daytime::default(),
            phase: Phase::default(),
            money: 0,
            defeated: false,
            game_over: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The square at a playable cell, or `None` for edge cells.
    pub fn square(&self, cell: Cell) -> Option<&Square> {
        self.grid.index(cell).map(|i| &self.squares[i])
    }

    pub fn tile(&self, cell: Cell) -> Option<TileToken> {
        self.square(cell).and_then(|s| s.tile)
    }

    /// The unit a descriptor refers to.
    pub fn unit(&self, desc: Descriptor) -> Option<UnitToken> {
        let sq = self.square(desc.cell)?;
        match desc.layer {
            Layer::Ground => sq.ground,
            Layer::Air => sq.air,
            Layer::Tile | Layer::Cell => None,
        }
    }

    /// Squares with their cells, in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = (Cell, &Square)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .map(move |(i, sq)| (self.grid.cell(i), sq))
    }

    /// Tiles owned by `player`.
    pub fn tiles_of(&self, player: Player) -> impl Iterator<Item = (Cell, TileToken)> + '_ {
        self.squares()
            .filter_map(move |(cell, sq)| sq.tile_of(player).map(|t| (cell, t)))
    }

    /// Ground and air units owned by `player`, with their descriptors.
    pub fn units_of(&self, player: Player) -> impl Iterator<Item = (Descriptor, UnitToken)> + '_ {
        self.squares().flat_map(move |(cell, sq)| {
            let ground = sq
                .ground
                .filter(|u| u.owner == player)
                .map(|u| (Descriptor::ground(cell), u));
            let air = sq
                .air
                .filter(|u| u.owner == player)
                .map(|u| (Descriptor::air(cell), u));
            ground.into_iter().chain(air)
        })
    }

    /// Cells within `radius_sq` of `center`, in row-major order.
    pub fn area(&self, center: Cell, radius_sq: i32) -> impl Iterator<Item = Cell> + '_ {
        self.grid.area(center, radius_sq)
    }

    /// The standard rule for whether a ground unit may step onto a cell: the
    /// tile must be walkable and no ground unit may stand there.
    pub fn is_walkable(&self, cell: Cell, bible: &Bible) -> bool {
        match self.square(cell) {
            Some(sq) => sq.ground.is_none() && sq.tile.is_some_and(|t| bible.walkable(t.typ)),
            None => false,
        }
    }

    /// Applies one change from the authoritative stream.
    pub fn apply(&mut self, change: &Change) {
        match change {
            Change::Dimensions { rows, cols } => {
                self.grid = Grid::new(*rows, *cols);
                self.squares = vec![Square::default(); self.grid.len()];
            }
            Change::Reveal { cell, square } => {
                if let Some(sq) = self.locate(*cell) {
                    *sq = *square;
                }
            }
            Change::Obscure { cell } => {
                if let Some(sq) = self.locate(*cell) {
                    *sq = Square::default();
                }
            }
            Change::Tile { cell, tile } => {
                if let Some(sq) = self.locate(*cell) {
                    sq.tile = *tile;
                }
            }
            Change::Unit { subject, unit } => {
                if let Some(slot) = self.unit_slot(*subject) {
                    *slot = *unit;
                }
            }
            Change::Moves { subject, target } => self.relocate(*subject, *target),
            Change::Year { year } => self.year = *year,
            Change::Season { season } => self.season = *season,
            Change::Daytime { daytime } => self.daytime = *daytime,
            Change::Phase { phase } => self.phase = *phase,
            Change::Funds { player, money } => {
                if *player == self.player {
                    self.money = *money;
                }
            }
            Change::Income { player, amount } => {
                if *player == self.player {
                    self.money = self.money.saturating_add(*amount);
                }
            }
            Change::Expenditure { player, amount } => {
                if *player == self.player {
                    self.money = self.money.saturating_sub(*amount);
                }
            }
            Change::Defeat { player } => {
                if *player == self.player {
                    self.defeated = true;
                }
            }
            Change::GameOver => self.game_over = true,
            Change::Unfinished { .. }
            | Change::Confirmed { .. }
            | Change::Notice { .. }
            | Change::Unknown => {}
        }
    }

    fn relocate(&mut self, subject: Descriptor, target: Cell) {
        let Some(unit) = self.unit_slot(subject).and_then(|slot| slot.take()) else {
            debug!(cell = %subject.cell, "move of an unknown unit ignored");
            return;
        };
        if let Some(slot) = self.unit_slot(Descriptor::new(subject.layer, target)) {
            *slot = Some(unit);
            return;
        }
        // Put it back rather than lose it.
        if let Some(slot) = self.unit_slot(subject) {
            *slot = Some(unit);
        }
    }

    fn unit_slot(&mut self, desc: Descriptor) -> Option<&mut Option<UnitToken>> {
        let sq = self.locate(desc.cell)?;
        match desc.layer {
            Layer::Ground => Some(&mut sq.ground),
            Layer::Air => Some(&mut sq.air),
            Layer::Tile | Layer::Cell => None,
        }
    }

    /// Resolves a cell named by a change. Out-of-bounds cells are a
    /// programming error upstream.
    fn locate(&mut self, cell: Cell) -> Option<&mut Square> {
        match self.grid.index(cell) {
            Some(i) => Some(&mut self.squares[i]),
            None => {
                debug_assert!(false, "change refers to out-of-bounds cell {cell}");
                error!(cell = %cell, "change refers to out-of-bounds cell");
                None
            }
        }
    }
}
