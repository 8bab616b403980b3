//! Board representation and game-state types.
//!
//! Contains the grid geometry, the occupant layers, orders, the incoming
//! change stream and the board mirror that applies it.

pub mod cell;
pub mod change;
pub mod order;
pub mod state;
pub mod token;

pub use cell::{Cell, Direction, Grid};
pub use change::{Change, Notice};
pub use order::{Descriptor, Layer, Order};
pub use state::{Board, Daytime, Phase, Season};
pub use token::{Player, Square, TileToken, UnitToken, ALL_PLAYERS, PLAYER_COUNT};
