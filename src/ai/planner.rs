//! Per-turn scratch state shared by the option rules.
//!
//! A `Planner` lives for exactly one planning pass. Rules run one after
//! another against the same planner, and whatever money, production slots
//! or target cells an earlier rule commits is no longer available to later
//! rules. The order in which a personality runs its rules is therefore
//! part of its behaviour.

use std::collections::{HashMap, HashSet};

use crate::board::{Cell, Descriptor, Order};
use crate::rules::UnitType;

/// A candidate order with its priority. Higher priorities are chosen first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub order: Order,
    pub priority: i32,
}

/// Running budget for one planning pass.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    candidates: Vec<Candidate>,
    money: i32,
    queued_money: i32,
    queued_units: HashMap<UnitType, usize>,
    military: usize,
    max_military: Option<usize>,
    claimed: HashSet<Cell>,
    tasked: HashSet<Descriptor>,
}

impl Planner {
    /// Starts a pass with `money` to spend and `military` units already
    /// on the board.
    pub fn new(money: i32, military: usize, max_military: Option<usize>) -> Self {
        Planner {
            money,
            military,
            max_military,
            ..Planner::default()
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }

    /// Money not yet committed by earlier candidates.
    pub fn available(&self) -> i32 {
        self.money - self.queued_money
    }

    pub fn queued_money(&self) -> i32 {
        self.queued_money
    }

    pub fn can_afford(&self, cost: i32) -> bool {
        cost <= self.available()
    }

    /// Units of type `unit` queued for production this pass.
    pub fn queued(&self, unit: UnitType) -> usize {
        self.queued_units.get(&unit).copied().unwrap_or(0)
    }

    /// Military units on the board plus those queued this pass.
    pub fn military(&self) -> usize {
        self.military
    }

    /// True while another military unit fits under the cap.
    pub fn military_room(&self) -> bool {
        self.max_military.map_or(true, |max| self.military < max)
    }

    /// True if some earlier candidate already claimed `cell` as its target.
    pub fn is_claimed(&self, cell: Cell) -> bool {
        self.claimed.contains(&cell)
    }

    /// True if `subject` already has a candidate this pass.
    pub fn is_tasked(&self, subject: Descriptor) -> bool {
        self.tasked.contains(&subject)
    }

    /// Records a candidate.
    pub fn propose(&mut self, order: Order, priority: i32) {
        if let Some(subject) = order.subject() {
            self.tasked.insert(subject);
        }
        self.candidates.push(Candidate { order, priority });
    }

    /// Commits money to the most recent candidate.
    pub fn spend(&mut self, cost: i32) {
        self.queued_money += cost;
    }

    /// Reserves `cell` as a target. Returns false if it was already taken.
    pub fn claim(&mut self, cell: Cell) -> bool {
        self.claimed.insert(cell)
    }

    /// Commits a unit to the production queue.
    pub fn queue_unit(&mut self, unit: UnitType, cost: i32, military: bool) {
        *self.queued_units.entry(unit).or_insert(0) += 1;
        self.queued_money += cost;
        if military {
            self.military += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(row: i16, col: i16) -> Order {
        Order::Capture {
            subject: Descriptor::ground(Cell::new(row, col)),
        }
    }

    #[test]
    fn spending_reduces_what_later_rules_see() {
        let mut plan = Planner::new(20, 0, None);
        assert!(plan.can_afford(20));
        plan.spend(15);
        assert_eq!(plan.available(), 5);
        assert!(!plan.can_afford(10));
    }

    #[test]
    fn queued_units_count_toward_the_military_cap() {
        let mut plan = Planner::new(100, 3, Some(4));
        assert!(plan.military_room());
        plan.queue_unit(UnitType(1), 10, true);
        assert!(!plan.military_room());
        assert_eq!(plan.queued(UnitType(1)), 1);
        assert_eq!(plan.queued(UnitType(2)), 0);
        plan.queue_unit(UnitType(0), 10, false);
        assert_eq!(plan.military(), 4);
        assert_eq!(plan.available(), 80);
    }

    #[test]
    fn proposing_marks_the_subject() {
        let mut plan = Planner::new(0, 0, None);
        plan.propose(capture(1, 1), 5);
        plan.propose(Order::None, 0);
        assert!(plan.is_tasked(Descriptor::ground(Cell::new(1, 1))));
        assert!(!plan.is_tasked(Descriptor::ground(Cell::new(1, 2))));
        assert_eq!(plan.candidates().len(), 2);
    }

    #[test]
    fn cells_are_claimed_once() {
        let mut plan = Planner::new(0, 0, None);
        assert!(plan.claim(Cell::new(0, 0)));
        assert!(!plan.claim(Cell::new(0, 0)));
        assert!(plan.is_claimed(Cell::new(0, 0)));
    }
}
