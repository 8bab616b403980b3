//! Line protocol handling.
//!
//! This module implements the text notation for orders and the command
//! parser for the main loop.

pub mod notation;
pub mod parser;

pub use notation::{format_order, format_orders, parse_order, parse_orders, NotationError};
pub use parser::{parse_command, Command};
