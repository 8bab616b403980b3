//! Automaton engine library.
//!
//! Exposes the board mirror, ruleset, flood fills, turn bookkeeping, the AI
//! agents and the protocol modules for use by integration tests and the
//! binary entry point.

pub mod ai;
pub mod board;
pub mod config;
pub mod engine;
pub mod host;
pub mod pathing;
pub mod protocol;
pub mod rules;
pub mod turn;
