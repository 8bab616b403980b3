//! Turning candidates into the turn's order list.

use std::collections::HashSet;

use rand::seq::{index, SliceRandom};
use rand::Rng;

use super::planner::Candidate;
use crate::board::Order;

/// Picks at most `limit` orders from `candidates`, at most one per subject.
///
/// The list is shuffled before a stable sort by descending priority, so
/// candidates of equal priority are taken in random order. `Order::None`
/// candidates are dropped.
pub fn select<R: Rng + ?Sized>(mut candidates: Vec<Candidate>, limit: usize, rng: &mut R) -> Vec<Order> {
    candidates.shuffle(rng);
    candidates.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut subjects = HashSet::new();
    let mut orders = Vec::new();
    for candidate in candidates {
        if orders.len() >= limit {
            break;
        }
        let Some(subject) = candidate.order.subject() else {
            continue;
        };
        if subjects.insert(subject) {
            orders.push(candidate.order);
        }
    }
    orders
}

/// Randomly keeps `keep` of the selected orders, preserving their ranking.
/// `None` keeps everything.
pub fn degrade<R: Rng + ?Sized>(orders: Vec<Order>, keep: Option<usize>, rng: &mut R) -> Vec<Order> {
    let Some(keep) = keep else {
        return orders;
    };
    if orders.len() <= keep {
        return orders;
    }
    let mut kept = index::sample(rng, orders.len(), keep).into_vec();
    kept.sort_unstable();
    let mut slots: Vec<Option<Order>> = orders.into_iter().map(Some).collect();
    kept.into_iter().filter_map(|i| slots[i].take()).collect()
}
