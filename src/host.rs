//! Driving several agents at once.
//!
//! Agents share no mutable state, so a host controlling more than one
//! player can run their turn passes on a rayon pool. Each agent's own pass
//! stays sequential.

use rayon::prelude::*;
use tracing::debug;

use crate::ai::Ai;
use crate::board::{Change, Order, Player};

/// Feeds the same batch of changes to every agent.
pub fn broadcast(ais: &mut [Box<dyn Ai>], changes: &[Change]) {
    ais.par_iter_mut().for_each(|ai| ai.receive_changes(changes));
}

/// Runs the turn pass of every agent that wants one, in parallel.
pub fn prepare_all(ais: &mut [Box<dyn Ai>]) {
    ais.par_iter_mut().for_each(|ai| ai.prepare_orders());
    debug!(agents = ais.len(), "prepared orders");
}

/// Collects the current orders of every agent, keyed by player.
pub fn collect_orders(ais: &[Box<dyn Ai>]) -> Vec<(Player, Vec<Order>)> {
    ais.iter().map(|ai| (ai.player(), ai.orders().to_vec())).collect()
}
