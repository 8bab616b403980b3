//! Property-based tests for flood fills and order selection.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use automaton::ai::selector::select;
use automaton::ai::Candidate;
use automaton::board::{Board, Cell, Change, Descriptor, Direction, Order, Player, TileToken};
use automaton::pathing::FloodFill;
use automaton::rules::Bible;

const SIDE: usize = 8;

/// Builds a board from a layout code per cell: 0 grass, 1 mountain, 2 city.
fn board(bible: &Bible, rows: i16, cols: i16, layout: &[u8]) -> Board {
    let grass = bible.tile_type("grass").unwrap();
    let mountain = bible.tile_type("mountain").unwrap();
    let city = bible.tile_type("city").unwrap();
    let mut board = Board::new(rows, cols, Player::Red);
    for row in 0..rows {
        for col in 0..cols {
            let tile = match layout[row as usize * SIDE + col as usize] {
                1 => TileToken::terrain(mountain),
                2 => TileToken::building(city, Player::Red, 1),
                _ => TileToken::terrain(grass),
            };
            board.apply(&Change::Tile {
                cell: Cell::new(row, col),
                tile: Some(tile),
            });
        }
    }
    board
}

fn cells(rows: i16, cols: i16) -> impl Iterator<Item = Cell> {
    (0..rows).flat_map(move |r| (0..cols).map(move |c| Cell::new(r, c)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Sources sit at distance zero and every path walks back to a source
    /// in exactly the recorded number of steps, over cells that are
    /// walkable and not excluded.
    #[test]
    fn prop_paths_end_at_sources(
        rows in 1i16..=8,
        cols in 1i16..=8,
        layout in prop::collection::vec(0u8..3, SIDE * SIDE),
        mask in prop::collection::vec(prop::bool::weighted(0.2), SIDE * SIDE),
    ) {
        let bible = Bible::named("default").unwrap();
        let city = bible.tile_type("city").unwrap();
        let board = board(&bible, rows, cols, &layout);
        let blocked = |cell: Cell| mask[cell.row as usize * SIDE + cell.col as usize];
        let fill = FloodFill::new(&board, &bible)
            .include(move |_, sq| sq.tile.is_some_and(|t| t.typ == city))
            .exclude(|cell, _| blocked(cell))
            .execute();

        for cell in cells(rows, cols) {
            let is_city = board.tile(cell).is_some_and(|t| t.typ == city);
            prop_assert_eq!(fill.is_source(cell), is_city && !blocked(cell));
            if fill.is_source(cell) {
                prop_assert_eq!(fill.step(cell), Direction::None);
            }
            let Some(steps) = fill.steps(cell) else {
                prop_assert_eq!(fill.step(cell), Direction::None);
                continue;
            };
            let path = fill.path(cell);
            prop_assert_eq!(path.len() as u32, steps);
            let mut at = cell;
            for &dir in &path {
                prop_assert!(board.is_walkable(at, &bible) && !blocked(at), "{} on the path from {}", at, cell);
                at = at.neighbor(dir);
            }
            prop_assert!(!blocked(at));
            prop_assert!(fill.is_source(at));
        }
    }

    /// Neighbouring reached cells differ by at most one step.
    #[test]
    fn prop_distances_are_consistent(
        rows in 1i16..=8,
        cols in 1i16..=8,
        layout in prop::collection::vec(0u8..3, SIDE * SIDE),
    ) {
        let bible = Bible::named("default").unwrap();
        let city = bible.tile_type("city").unwrap();
        let board = board(&bible, rows, cols, &layout);
        let fill = FloodFill::new(&board, &bible)
            .include(move |_, sq| sq.tile.is_some_and(|t| t.typ == city))
            .execute();

        for cell in cells(rows, cols) {
            let Some(here) = fill.steps(cell) else { continue };
            for dir in Direction::CARDINALS {
                if let Some(there) = fill.steps(cell.neighbor(dir)) {
                    prop_assert!(here.abs_diff(there) <= 1);
                }
            }
        }
    }

    /// Excluded cells are never reached, not even as sources.
    #[test]
    fn prop_excluded_cells_are_unreachable(
        rows in 1i16..=8,
        cols in 1i16..=8,
        layout in prop::collection::vec(0u8..3, SIDE * SIDE),
        mask in prop::collection::vec(any::<bool>(), SIDE * SIDE),
    ) {
        let bible = Bible::named("default").unwrap();
        let city = bible.tile_type("city").unwrap();
        let board = board(&bible, rows, cols, &layout);
        let blocked = |cell: Cell| mask[cell.row as usize * SIDE + cell.col as usize];
        let fill = FloodFill::new(&board, &bible)
            .include(move |_, sq| sq.tile.is_some_and(|t| t.typ == city))
            .exclude(|cell, _| blocked(cell))
            .execute();

        for cell in cells(rows, cols) {
            if blocked(cell) {
                prop_assert!(!fill.reachable(cell));
            }
        }
    }

    /// Selection never repeats a subject, never exceeds the limit and
    /// takes each subject's best candidate in priority order.
    #[test]
    fn prop_selection_is_unique_and_capped(
        raw in prop::collection::vec((0i16..6, -5i32..5, 0u8..3), 0..24),
        limit in 0usize..8,
        seed in any::<u64>(),
    ) {
        let candidates: Vec<Candidate> = raw
            .iter()
            .map(|&(col, priority, kind)| {
                let subject = Descriptor::ground(Cell::new(0, col));
                let order = match kind {
                    0 => Order::None,
                    1 => Order::Capture { subject },
                    _ => Order::Lockdown { subject, target: Cell::new(1, col) },
                };
                Candidate { order, priority }
            })
            .collect();

        let best = |subject: Descriptor| {
            candidates
                .iter()
                .filter(|c| c.order.subject() == Some(subject))
                .map(|c| c.priority)
                .max()
        };
        let distinct: HashSet<Descriptor> =
            candidates.iter().filter_map(|c| c.order.subject()).collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let orders = select(candidates.clone(), limit, &mut rng);

        prop_assert_eq!(orders.len(), limit.min(distinct.len()));
        let subjects: Vec<Descriptor> = orders.iter().filter_map(Order::subject).collect();
        prop_assert_eq!(subjects.len(), orders.len());
        let unique: HashSet<&Descriptor> = subjects.iter().collect();
        prop_assert_eq!(unique.len(), subjects.len());

        let picked: Vec<i32> = orders
            .iter()
            .map(|o| {
                candidates
                    .iter()
                    .filter(|c| &c.order == o)
                    .map(|c| c.priority)
                    .max()
                    .unwrap_or(i32::MIN)
            })
            .collect();
        for (order, priority) in orders.iter().zip(&picked) {
            prop_assert_eq!(Some(*priority), order.subject().and_then(best));
        }
        prop_assert!(picked.windows(2).all(|w| w[0] >= w[1]));
    }
}
