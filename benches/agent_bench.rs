use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use automaton::ai::{self, Ai, Difficulty, NameTable, Variant};
use automaton::board::{Board, Cell, Change, Descriptor, Phase, Player, TileToken, UnitToken};
use automaton::config::AiConfig;
use automaton::host;
use automaton::pathing::FloodFill;
use automaton::protocol::format_orders;
use automaton::rules::Bible;

const SIZE: i16 = 40;

/// A mid-game board: grass with mountain ridges, a handful of cities per
/// side and some troops in the middle.
fn midgame(bible: &Bible) -> Vec<Change> {
    let grass = bible.tile_type("grass").unwrap();
    let mountain = bible.tile_type("mountain").unwrap();
    let city = bible.tile_type("city").unwrap();
    let militia = bible.unit_type("militia").unwrap();
    let tank = bible.unit_type("tank").unwrap();

    let mut changes = vec![Change::Dimensions { rows: SIZE, cols: SIZE }];
    for row in 0..SIZE {
        for col in 0..SIZE {
            let ridge = col % 9 == 4 && row % 7 != 0;
            let typ = if ridge { mountain } else { grass };
            changes.push(Change::Tile {
                cell: Cell::new(row, col),
                tile: Some(TileToken::terrain(typ)),
            });
        }
    }
    for i in 0..6 {
        changes.push(Change::Tile {
            cell: Cell::new(3 + i * 6, 2),
            tile: Some(TileToken::building(city, Player::Red, 2)),
        });
        changes.push(Change::Tile {
            cell: Cell::new(3 + i * 6, SIZE - 3),
            tile: Some(TileToken::building(city, Player::Blue, 2)),
        });
        changes.push(Change::Unit {
            subject: Descriptor::ground(Cell::new(2 + i * 6, 12)),
            unit: Some(UnitToken::new(tank, Player::Red, 2)),
        });
        changes.push(Change::Unit {
            subject: Descriptor::ground(Cell::new(2 + i * 6, 27)),
            unit: Some(UnitToken::new(militia, Player::Blue, 2)),
        });
    }
    for player in [Player::Red, Player::Blue] {
        changes.push(Change::Funds { player, money: 200 });
    }
    changes.push(Change::Phase { phase: Phase::Resting });
    changes.push(Change::Phase { phase: Phase::Planning });
    changes
}

fn agent(variant: Variant, player: Player, changes: &[Change]) -> Box<dyn Ai> {
    let config = AiConfig {
        variant,
        player,
        difficulty: Difficulty::Hard,
        seed: Some(7),
        ..AiConfig::default()
    };
    let mut ai = ai::create(&config, &NameTable::default()).unwrap();
    ai.receive_changes(changes);
    ai
}

fn bench_flood_fill(c: &mut Criterion) {
    let bible = Bible::named("default").unwrap();
    let city = bible.tile_type("city").unwrap();
    let mut board = Board::new(0, 0, Player::Red);
    for change in midgame(&bible) {
        board.apply(&change);
    }

    c.bench_function("flood_fill_from_cities_40x40", |b| {
        b.iter(|| {
            FloodFill::new(black_box(&board), &bible)
                .include(|_, sq| sq.tile.is_some_and(|t| t.typ == city && t.owner == Player::Blue))
                .execute()
        })
    });
}

fn bench_hungry_turn(c: &mut Criterion) {
    let bible = Bible::named("default").unwrap();
    let changes = midgame(&bible);
    c.bench_function("hungry_turn_40x40", |b| {
        b.iter_batched(
            || agent(Variant::Hungry, Player::Red, &changes),
            |mut ai| {
                ai.prepare_orders();
                ai
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_rampant_turn(c: &mut Criterion) {
    let bible = Bible::named("default").unwrap();
    let changes = midgame(&bible);
    c.bench_function("rampant_turn_40x40", |b| {
        b.iter_batched(
            || agent(Variant::Rampant, Player::Red, &changes),
            |mut ai| {
                ai.prepare_orders();
                ai
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_parallel_turns(c: &mut Criterion) {
    let bible = Bible::named("default").unwrap();
    let changes = midgame(&bible);
    c.bench_function("two_agents_in_parallel_40x40", |b| {
        b.iter_batched(
            || {
                vec![
                    agent(Variant::Hungry, Player::Red, &changes),
                    agent(Variant::Rampant, Player::Blue, &changes),
                ]
            },
            |mut ais| {
                host::prepare_all(&mut ais);
                ais
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_format_orders(c: &mut Criterion) {
    let bible = Bible::named("default").unwrap();
    let mut ai = agent(Variant::Rampant, Player::Red, &midgame(&bible));
    ai.prepare_orders();
    c.bench_function("format_orders", |b| {
        b.iter(|| format_orders(black_box(ai.orders()), &bible))
    });
}

criterion_group!(
    benches,
    bench_flood_fill,
    bench_hungry_turn,
    bench_rampant_turn,
    bench_parallel_turns,
    bench_format_orders,
);
criterion_main!(benches);
