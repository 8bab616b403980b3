//! Grid coordinates.
//!
//! A `Cell` is a plain coordinate with no identity beyond its row and column.
//! The `Grid` knows the playable bounds: anything outside them is an edge
//! cell. Neighbour iteration always follows `Direction::CARDINALS`, which is
//! the fixed order flood fills and target scans rely on for tie-breaking.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four cardinal directions, or no movement at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    None,
    East,
    South,
    West,
    North,
}

impl Direction {
    /// Neighbour iteration order used everywhere on the board.
    pub const CARDINALS: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    /// Row and column offset of one step in this direction.
    pub const fn offset(self) -> (i16, i16) {
        match self {
            Direction::None => (0, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::North => (-1, 0),
        }
    }

    /// The opposite direction. `None` flips to itself.
    pub const fn flip(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::North => Direction::South,
        }
    }

    /// Returns the single-letter notation abbreviation.
    pub const fn abbr(self) -> char {
        match self {
            Direction::None => 'x',
            Direction::East => 'e',
            Direction::South => 's',
            Direction::West => 'w',
            Direction::North => 'n',
        }
    }

    /// Parses a direction from its notation abbreviation.
    pub fn from_abbr(s: &str) -> Option<Direction> {
        match s {
            "x" => Some(Direction::None),
            "e" => Some(Direction::East),
            "s" => Some(Direction::South),
            "w" => Some(Direction::West),
            "n" => Some(Direction::North),
            _ => None,
        }
    }
}

/// A grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i16,
    pub col: i16,
}

impl Cell {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// The adjacent coordinate in the given direction. The result may lie
    /// outside the grid; check it with `Grid::contains`.
    pub const fn neighbor(self, dir: Direction) -> Cell {
        let (dr, dc) = dir.offset();
        Cell {
            row: self.row.saturating_add(dr),
            col: self.col.saturating_add(dc),
        }
    }

    /// Follows a sequence of steps from this cell.
    pub fn walk(self, steps: &[Direction]) -> Cell {
        steps.iter().fold(self, |cell, &dir| cell.neighbor(dir))
    }

    /// Squared euclidean distance, the metric used by area queries.
    pub fn distance_sq(self, other: Cell) -> i32 {
        let dr = i32::from(self.row) - i32::from(other.row);
        let dc = i32::from(self.col) - i32::from(other.col);
        dr * dr + dc * dc
    }

    /// The direction of an orthogonally adjacent cell, if `other` is one.
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        Direction::CARDINALS
            .into_iter()
            .find(|&dir| self.neighbor(dir) == other)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Playable bounds of a rectangular board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    rows: i16,
    cols: i16,
}

impl Grid {
    /// Creates a grid. Negative dimensions are clamped to zero.
    pub fn new(rows: i16, cols: i16) -> Self {
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
        }
    }

    pub fn rows(&self) -> i16 {
        self.rows
    }

    pub fn cols(&self) -> i16 {
        self.cols
    }

    /// Number of playable cells.
    pub fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the cell lies inside the playable bounds.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.row < self.rows && cell.col >= 0 && cell.col < self.cols
    }

    /// True if the cell is out of playable bounds.
    pub fn is_edge(&self, cell: Cell) -> bool {
        !self.contains(cell)
    }

    /// Dense row-major index of a playable cell.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row as usize * self.cols as usize + cell.col as usize)
        } else {
            None
        }
    }

    /// Inverse of `index`. The index must be below `len()`.
    pub fn cell(&self, index: usize) -> Cell {
        let cols = self.cols.max(1) as usize;
        Cell::new((index / cols) as i16, (index % cols) as i16)
    }

    /// All playable cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len()).map(move |i| self.cell(i))
    }

    /// Playable cells whose squared distance to `center` is at most
    /// `radius_sq`, in row-major order. Includes `center` itself.
    pub fn area(&self, center: Cell, radius_sq: i32) -> impl Iterator<Item = Cell> + '_ {
        self.ring(center, 0, radius_sq)
    }

    /// Playable cells whose squared distance to `center` lies in
    /// `min_sq..=max_sq`, in row-major order.
    pub fn ring(&self, center: Cell, min_sq: i32, max_sq: i32) -> impl Iterator<Item = Cell> + '_ {
        let reach = (f64::from(max_sq.max(0))).sqrt() as i16;
        let rows = (center.row - reach)..=(center.row + reach);
        rows.flat_map(move |row| {
            ((center.col - reach)..=(center.col + reach)).map(move |col| Cell::new(row, col))
        })
        .filter(move |&cell| {
            let d = cell.distance_sq(center);
            d >= min_sq && d <= max_sq && self.contains(cell)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_offsets() {
        let c = Cell::new(3, 4);
        assert_eq!(c.neighbor(Direction::East), Cell::new(3, 5));
        assert_eq!(c.neighbor(Direction::South), Cell::new(4, 4));
        assert_eq!(c.neighbor(Direction::West), Cell::new(3, 3));
        assert_eq!(c.neighbor(Direction::North), Cell::new(2, 4));
        assert_eq!(c.neighbor(Direction::None), c);
    }

    #[test]
    fn flip_is_involution() {
        for dir in Direction::CARDINALS {
            assert_eq!(dir.flip().flip(), dir);
            assert_eq!(Cell::new(5, 5).neighbor(dir).neighbor(dir.flip()), Cell::new(5, 5));
        }
    }

    #[test]
    fn walk_follows_steps() {
        let start = Cell::new(0, 0);
        let end = start.walk(&[Direction::East, Direction::East, Direction::South]);
        assert_eq!(end, Cell::new(1, 2));
    }

    #[test]
    fn edge_predicate() {
        let grid = Grid::new(4, 6);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(3, 5)));
        assert!(grid.is_edge(Cell::new(-1, 0)));
        assert!(grid.is_edge(Cell::new(4, 0)));
        assert!(grid.is_edge(Cell::new(0, 6)));
    }

    #[test]
    fn index_roundtrip() {
        let grid = Grid::new(4, 6);
        for (i, cell) in grid.cells().enumerate() {
            assert_eq!(grid.index(cell), Some(i));
            assert_eq!(grid.cell(i), cell);
        }
        assert_eq!(grid.index(Cell::new(4, 0)), None);
    }

    #[test]
    fn area_radius_one_is_plus_shape() {
        let grid = Grid::new(5, 5);
        let cells: Vec<Cell> = grid.area(Cell::new(2, 2), 1).collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(1, 2),
                Cell::new(2, 1),
                Cell::new(2, 2),
                Cell::new(2, 3),
                Cell::new(3, 2),
            ]
        );
    }

    #[test]
    fn area_is_clipped_to_bounds() {
        let grid = Grid::new(5, 5);
        let cells: Vec<Cell> = grid.area(Cell::new(0, 0), 2).collect();
        assert_eq!(cells, vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]);
    }

    #[test]
    fn ring_excludes_center() {
        let grid = Grid::new(5, 5);
        let cells: Vec<Cell> = grid.ring(Cell::new(2, 2), 1, 2).collect();
        assert_eq!(cells.len(), 8);
        assert!(!cells.contains(&Cell::new(2, 2)));
    }

    #[test]
    fn direction_to_adjacent() {
        let c = Cell::new(2, 2);
        assert_eq!(c.direction_to(Cell::new(2, 3)), Some(Direction::East));
        assert_eq!(c.direction_to(Cell::new(1, 2)), Some(Direction::North));
        assert_eq!(c.direction_to(Cell::new(3, 3)), None);
    }
}
