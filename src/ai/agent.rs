//! State shared by every AI personality.

use std::sync::Arc;

use rand::rngs::SmallRng;
use tracing::debug;

use super::planner::Planner;
use super::selector;
use super::Difficulty;
use crate::board::{Board, Cell, Change, Descriptor, Player, TileToken, UnitToken};
use crate::rules::{Bible, Roster};
use crate::turn::TurnState;

/// The part of an AI that is the same for every personality: what it knows
/// about the game, where it is in the turn, and its random source.
#[derive(Debug, Clone)]
pub struct Agent {
    player: Player,
    difficulty: Difficulty,
    name: String,
    bible: Arc<Bible>,
    roster: Roster,
    board: Board,
    turn: TurnState,
    rng: SmallRng,
}

impl Agent {
    /// Creates an agent with an empty board. Type names the personalities
    /// rely on are resolved here, once.
    pub fn new(player: Player, difficulty: Difficulty, name: String, bible: Arc<Bible>, rng: SmallRng) -> Self {
        let roster = Roster::resolve(&bible);
        Agent {
            player,
            difficulty,
            name,
            bible,
            roster,
            board: Board::new(0, 0, player),
            turn: TurnState::new(),
            rng,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bible(&self) -> &Bible {
        &self.bible
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// The ruleset's cap on new orders per turn. Selection runs against
    /// this cap at every difficulty.
    pub fn order_limit(&self) -> usize {
        self.bible.new_order_limit
    }

    /// Most orders this agent emits in a turn: the ruleset's cap, lowered
    /// to what survives degradation at this difficulty.
    pub fn max_orders(&self) -> usize {
        let limit = self.order_limit();
        self.difficulty.keep().map_or(limit, |keep| keep.min(limit))
    }

    /// Applies changes from the authoritative stream in order.
    pub fn receive(&mut self, changes: &[Change]) {
        for change in changes {
            self.turn.observe(change, self.player);
            self.board.apply(change);
        }
    }

    /// Runs a full planning pass: `generate` fills a fresh planner, the
    /// candidates are selected and degraded, and the result is recorded as
    /// this turn's orders.
    pub fn plan<F>(&mut self, generate: F)
    where
        F: FnOnce(&Context<'_>, &mut Planner, &mut SmallRng),
    {
        let limit = self.order_limit();
        let keep = self.difficulty.keep();
        let Agent {
            player,
            difficulty,
            bible,
            roster,
            board,
            turn,
            rng,
            ..
        } = self;

        let ctx = Context {
            board: &*board,
            bible: &**bible,
            roster: &*roster,
            turn: &*turn,
            player: *player,
            difficulty: *difficulty,
        };
        let mut plan = Planner::new(board.money, ctx.military_count(), difficulty.max_military());
        generate(&ctx, &mut plan, &mut *rng);

        let candidates = plan.into_candidates();
        let count = candidates.len();
        let selected = selector::select(candidates, limit, &mut *rng);
        let orders = selector::degrade(selected, keep, rng);
        debug!(
            player = player.name(),
            candidates = count,
            orders = orders.len(),
            "planning pass finished"
        );
        turn.finish(orders);
    }
}

/// Read-only view of an agent handed to the option rules.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub board: &'a Board,
    pub bible: &'a Bible,
    pub roster: &'a Roster,
    pub turn: &'a TurnState,
    pub player: Player,
    pub difficulty: Difficulty,
}

impl<'a> Context<'a> {
    /// Tiles this player owns that have power.
    pub fn active_tiles(&self) -> impl Iterator<Item = (Cell, TileToken)> + 'a {
        self.board.tiles_of(self.player).filter(|(_, t)| t.is_active())
    }

    /// Units this player owns, ground first within each cell.
    pub fn units(&self) -> impl Iterator<Item = (Descriptor, UnitToken)> + 'a {
        self.board.units_of(self.player)
    }

    /// True if `subject` is still executing an order from an earlier turn.
    pub fn is_busy(&self, subject: Descriptor) -> bool {
        self.turn.is_busy(subject)
    }

    pub fn military_count(&self) -> usize {
        self.units()
            .filter(|(_, u)| self.bible.is_military(u.typ))
            .count()
    }
}
