//! Multi-source breadth-first flood fill.
//!
//! A `FloodFill` is configured with three predicates over squares:
//! which cells are sources, which cells may never be crossed, and which
//! cells a unit may walk on. `execute` then searches outward from every
//! source at once and records, for each reached cell, the number of steps to
//! the nearest source and the direction to step toward it.
//!
//! Sources are seeded in row-major order and neighbours are always visited
//! in `Direction::CARDINALS` order (east, south, west, north). When two
//! sources are equally close, the one discovered first wins. Rules that scan
//! "the closest target" depend on this order staying fixed.

use std::collections::VecDeque;

use crate::board::{Board, Cell, Direction, Grid, Square};
use crate::rules::Bible;

type Predicate<'a> = Box<dyn Fn(Cell, &Square) -> bool + 'a>;

/// A configured but not yet executed flood fill.
pub struct FloodFill<'a> {
    board: &'a Board,
    include: Predicate<'a>,
    exclude: Option<Predicate<'a>>,
    walkable: Predicate<'a>,
}

impl<'a> FloodFill<'a> {
    /// A flood fill with no sources and the standard walkability rule.
    pub fn new(board: &'a Board, bible: &'a Bible) -> Self {
        FloodFill {
            board,
            include: Box::new(|_, _| false),
            exclude: None,
            walkable: Box::new(move |_, sq| {
                sq.ground.is_none() && sq.tile.is_some_and(|t| bible.walkable(t.typ))
            }),
        }
    }

    /// Sets the source predicate.
    pub fn include(mut self, pred: impl Fn(Cell, &Square) -> bool + 'a) -> Self {
        self.include = Box::new(pred);
        self
    }

    /// Sets the predicate for cells the search may never enter or start from.
    pub fn exclude(mut self, pred: impl Fn(Cell, &Square) -> bool + 'a) -> Self {
        self.exclude = Some(Box::new(pred));
        self
    }

    /// Replaces the walkability predicate.
    pub fn walkable(mut self, pred: impl Fn(Cell, &Square) -> bool + 'a) -> Self {
        self.walkable = Box::new(pred);
        self
    }

    /// Treats cells holding ground units as walkable, as long as the tile is.
    pub fn include_occupied(self, bible: &'a Bible) -> Self {
        self.walkable(move |_, sq| sq.tile.is_some_and(|t| bible.walkable(t.typ)))
    }

    fn excluded(&self, cell: Cell, sq: &Square) -> bool {
        self.exclude.as_ref().is_some_and(|pred| pred(cell, sq))
    }

    /// Runs the search.
    pub fn execute(&self) -> FloodFillResult {
        let grid = *self.board.grid();
        let mut nodes = vec![Node::UNREACHED; grid.len()];
        let mut queue = VecDeque::new();

        for (cell, sq) in self.board.squares() {
            if (self.include)(cell, sq) && !self.excluded(cell, sq) {
                if let Some(i) = grid.index(cell) {
                    nodes[i] = Node {
                        reached: true,
                        steps: 0,
                        back: Direction::None,
                    };
                    queue.push_back(cell);
                }
            }
        }

        while let Some(cell) = queue.pop_front() {
            let Some(here) = grid.index(cell).map(|i| nodes[i]) else {
                continue;
            };
            for dir in Direction::CARDINALS {
                let next = cell.neighbor(dir);
                let (Some(i), Some(sq)) = (grid.index(next), self.board.square(next)) else {
                    continue;
                };
                if nodes[i].reached || self.excluded(next, sq) || !(self.walkable)(next, sq) {
                    continue;
                }
                nodes[i] = Node {
                    reached: true,
                    steps: here.steps + 1,
                    back: dir.flip(),
                };
                queue.push_back(next);
            }
        }

        FloodFillResult { grid, nodes }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    reached: bool,
    steps: u32,
    back: Direction,
}

impl Node {
    const UNREACHED: Node = Node {
        reached: false,
        steps: 0,
        back: Direction::None,
    };
}

/// The first move toward the nearest source from a cell next to the
/// search frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Approach {
    pub first: Direction,
    /// Total steps to the source, including the first one.
    pub steps: u32,
}

/// Distances and back-pointers produced by `FloodFill::execute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloodFillResult {
    grid: Grid,
    nodes: Vec<Node>,
}

impl FloodFillResult {
    fn node(&self, cell: Cell) -> Option<&Node> {
        self.grid.index(cell).map(|i| &self.nodes[i])
    }

    /// Whether the search reached `cell`.
    pub fn reachable(&self, cell: Cell) -> bool {
        self.node(cell).is_some_and(|n| n.reached)
    }

    /// Steps from `cell` to the nearest source, if reached.
    pub fn steps(&self, cell: Cell) -> Option<u32> {
        self.node(cell).filter(|n| n.reached).map(|n| n.steps)
    }

    /// The move to make from `cell` toward its nearest source.
    /// `Direction::None` at a source and at unreached cells.
    pub fn step(&self, cell: Cell) -> Direction {
        self.node(cell).map_or(Direction::None, |n| n.back)
    }

    /// True if `cell` is one of the sources.
    pub fn is_source(&self, cell: Cell) -> bool {
        self.steps(cell) == Some(0)
    }

    /// The full shortest path from `cell` to its nearest source.
    pub fn path(&self, cell: Cell) -> Vec<Direction> {
        let mut moves = Vec::new();
        let mut at = cell;
        loop {
            let dir = self.step(at);
            if dir == Direction::None {
                break;
            }
            moves.push(dir);
            at = at.neighbor(dir);
        }
        moves
    }

    /// Best first step for an occupant standing on `cell`, which itself is
    /// usually not walkable for the search. Looks at the four neighbours in
    /// `Direction::CARDINALS` order and keeps the first closest one.
    pub fn approach(&self, cell: Cell) -> Option<Approach> {
        let mut best: Option<Approach> = None;
        for dir in Direction::CARDINALS {
            if let Some(steps) = self.steps(cell.neighbor(dir)) {
                if best.map_or(true, |b| steps + 1 < b.steps) {
                    best = Some(Approach {
                        first: dir,
                        steps: steps + 1,
                    });
                }
            }
        }
        best
    }

    /// Up to `max_moves` steps from `cell` toward the nearest source.
    pub fn route(&self, cell: Cell, max_moves: usize) -> Vec<Direction> {
        let Some(approach) = self.approach(cell) else {
            return Vec::new();
        };
        let mut moves = vec![approach.first];
        let mut at = cell.neighbor(approach.first);
        while moves.len() < max_moves {
            let dir = self.step(at);
            if dir == Direction::None {
                break;
            }
            moves.push(dir);
            at = at.neighbor(dir);
        }
        moves.truncate(max_moves);
        moves
    }
}
