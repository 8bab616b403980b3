//! Turn bookkeeping coupled to phase transitions.
//!
//! `TurnState` tracks the orders an agent carries between turns and the
//! orders it proposed this turn, and decides when the agent may compute.
//! Entering a phase does the following:
//!
//! - Resting: unfinished orders from earlier turns are settled and dropped.
//! - Planning: this turn's order list is cleared and the agent may prepare.
//! - Action: the count of orders confirmed by the rules engine restarts.
//! - Decay: if fewer orders were confirmed than proposed, the shortfall is recorded and reported.

use tracing::{debug, error};

use crate::board::{Change, Descriptor, Notice, Order, Phase, Player};

/// Per-agent bookkeeping across the turn cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnState {
    phase: Option<Phase>,
    unfinished: Vec<Order>,
    new_orders: Vec<Order>,
    prepared: bool,
    confirmed: usize,
    unconfirmed: usize,
    rejected: usize,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current phase, once the stream has announced one.
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Orders from earlier turns that the rules engine is still executing.
    pub fn unfinished_orders(&self) -> &[Order] {
        &self.unfinished
    }

    /// Orders proposed during this turn's planning phase.
    pub fn new_orders(&self) -> &[Order] {
        &self.new_orders
    }

    pub fn confirmed(&self) -> usize {
        self.confirmed
    }

    /// Proposed orders still unconfirmed when this turn's Decay began.
    pub fn unconfirmed(&self) -> usize {
        self.unconfirmed
    }

    /// `OrderInvalid` notices received since this turn's Planning began.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// True if the rules engine dropped or rejected any order this turn.
    pub fn has_protocol_errors(&self) -> bool {
        self.unconfirmed > 0 || self.rejected > 0
    }

    /// True once orders have been prepared this planning phase.
    pub fn prepared(&self) -> bool {
        self.prepared
    }

    /// True if `subject` is still carrying out an unfinished order.
    pub fn is_busy(&self, subject: Descriptor) -> bool {
        self.unfinished.iter().any(|o| o.subject() == Some(subject))
    }

    /// True in the planning phase until orders have been prepared.
    pub fn wants_to_prepare(&self) -> bool {
        self.phase == Some(Phase::Planning) && !self.prepared
    }

    /// Records this turn's order list.
    pub fn finish(&mut self, orders: Vec<Order>) {
        self.new_orders = orders;
        self.prepared = true;
    }

    /// Updates the bookkeeping for one change of the authoritative stream.
    pub fn observe(&mut self, change: &Change, player: Player) {
        match change {
            Change::Phase { phase } => self.enter(*phase, player),
            Change::Unfinished { order } => self.unfinished.push(order.clone()),
            Change::Confirmed { .. } => self.confirmed += 1,
            Change::Notice {
                notice: Notice::OrderInvalid,
                subject,
            } => {
                self.rejected += 1;
                error!(player = player.name(), subject = ?subject, "rules engine rejected an order");
            }
            Change::Notice { notice, subject } => {
                debug!(player = player.name(), notice = ?notice, subject = ?subject, "notice");
            }
            _ => {}
        }
    }

    fn enter(&mut self, phase: Phase, player: Player) {
        if let Some(current) = self.phase {
            if current == phase {
                // Replayed transition; the bookkeeping already happened.
                return;
            }
            if current.next() != phase {
                debug_assert!(
                    false,
                    "phase {} reached from {}",
                    phase.name(),
                    current.name()
                );
                error!(
                    player = player.name(),
                    from = current.name(),
                    to = phase.name(),
                    "phase reached out of order"
                );
            }
        }
        self.phase = Some(phase);

        match phase {
            Phase::Resting => self.unfinished.clear(),
            Phase::Planning => {
                self.new_orders.clear();
                self.prepared = false;
                self.unconfirmed = 0;
                self.rejected = 0;
            }
            Phase::Action => self.confirmed = 0,
            Phase::Decay => {
                self.unconfirmed = self.new_orders.len().saturating_sub(self.confirmed);
                if self.confirmed != self.new_orders.len() {
                    error!(
                        player = player.name(),
                        proposed = self.new_orders.len(),
                        confirmed = self.confirmed,
                        "not every proposed order was confirmed"
                    );
                }
            }
            Phase::Growth => {}
        }
    }
}
