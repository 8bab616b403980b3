//! Spatial search over the board.
//!
//! Flood fills answer "how far is the nearest X" and "which way to X" for
//! every cell at once. Agents run several independent fills per turn; each
//! is a fresh instance.

pub mod floodfill;

pub use floodfill::{Approach, FloodFill, FloodFillResult};
