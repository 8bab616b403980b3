//! Option rules.
//!
//! Each rule looks at one kind of occupant, decides what it could usefully
//! do this turn and proposes candidates to the planner. Rules that cost
//! money or production slots check the planner's budget first and charge it
//! when they propose, so a rule sees whatever earlier rules left over.
//!
//! Movement rules leave alone units that are still carrying out an earlier
//! order. Reactive rules (defence, focus, shelling, bombardment) do not.
//! No rule ever proposes a second candidate for a subject that already has
//! one this pass.
//!
//! Target selection follows one pattern throughout: gather candidate cells,
//! score them, keep the best, and on equal scores keep whichever came first.
//! Expansion shuffles its neighbour order so that ties do not always favour
//! the same direction.

use rand::seq::SliceRandom;
use rand::Rng;

use super::agent::Context;
use super::planner::Planner;
use crate::board::{Cell, Descriptor, Direction, Layer, Order, Square};
use crate::pathing::{FloodFill, FloodFillResult};
use crate::rules::{TileType, UnitType};

/// No settlement may lie this close (squared distance) to a new one.
const SETTLE_SPACING_SQ: i32 = 8;
/// Enemy ground units this close to a settlement threaten it.
const THREAT_RADIUS_SQ: i32 = 5;
/// Defenders further than this many steps away stay where they are.
const DEFEND_REACH: u32 = 6;
/// Radius in which lockdown looks for enemy units.
const LOCKDOWN_RADIUS_SQ: i32 = 8;
/// Extra bombardment score for an enemy building in the target cell.
const BUILDING_BONUS: i32 = 2;

/// Units standing on a building of another player take it over.
pub fn capture(ctx: &Context<'_>, plan: &mut Planner, priority: i32) {
    for (subject, unit) in ctx.units() {
        if subject.layer != Layer::Ground || plan.is_tasked(subject) {
            continue;
        }
        if !ctx.bible.unit(unit.typ).is_some_and(|u| u.captures) {
            continue;
        }
        let Some(tile) = ctx.board.tile(subject.cell) else {
            continue;
        };
        if tile.owner == ctx.player || !ctx.bible.ownable(tile.typ) {
            continue;
        }
        plan.propose(Order::Capture { subject }, priority);
    }
}

/// Settlers found a town where they stand if the site is good, and walk to
/// the nearest good site otherwise.
pub fn settle(ctx: &Context<'_>, plan: &mut Planner, priority: i32) {
    let Some(town) = ctx.roster.town else {
        return;
    };
    let cost = ctx.bible.tile_cost(town);
    let mut sites: Option<FloodFillResult> = None;
    // Towns founded this pass; the board does not show them yet.
    let mut founded: Vec<Cell> = Vec::new();

    for (subject, unit) in ctx.units() {
        if subject.layer != Layer::Ground || plan.is_tasked(subject) {
            continue;
        }
        if !ctx.bible.can_settle(unit.typ, town) {
            continue;
        }
        let here = subject.cell;
        let spaced = founded.iter().all(|&c| c.distance_sq(here) > SETTLE_SPACING_SQ);
        if spaced && is_settle_site(ctx, here) && !plan.is_claimed(here) {
            if plan.can_afford(cost) {
                plan.claim(here);
                plan.propose(Order::Settle { subject, tile: town }, priority);
                plan.spend(cost);
                founded.push(here);
            }
            continue;
        }
        if ctx.is_busy(subject) {
            continue;
        }
        let fill = sites.get_or_insert_with(|| settle_sites(ctx));
        let moves = fill.route(subject.cell, usize::from(ctx.bible.speed(unit.typ)));
        propose_move(ctx, plan, subject, moves, priority - 1);
    }
}

/// Buildings at full strength upgrade when money allows.
pub fn upgrade(ctx: &Context<'_>, plan: &mut Planner, priority: i32) {
    for (cell, tile) in ctx.active_tiles() {
        let subject = Descriptor::tile(cell);
        if plan.is_tasked(subject) {
            continue;
        }
        let Some(rule) = ctx.bible.tile(tile.typ) else {
            continue;
        };
        if tile.stacks < rule.stacks_max {
            continue;
        }
        let into = rule
            .upgrades
            .iter()
            .copied()
            .find(|&t| plan.can_afford(ctx.bible.tile_cost(t)));
        if let Some(into) = into {
            plan.propose(Order::Upgrade { subject, tile: into }, priority);
            plan.spend(ctx.bible.tile_cost(into));
        }
    }
}

/// Buildings that can place `into` do so on the best free neighbouring cell.
pub fn expand<R: Rng + ?Sized>(ctx: &Context<'_>, plan: &mut Planner, rng: &mut R, into: TileType, priority: i32) {
    let cost = ctx.bible.tile_cost(into);
    for (cell, tile) in ctx.active_tiles() {
        if !plan.can_afford(cost) {
            return;
        }
        let subject = Descriptor::tile(cell);
        if plan.is_tasked(subject) || !ctx.bible.can_expand(tile.typ, into) {
            continue;
        }

        let mut dirs = Direction::CARDINALS;
        dirs.shuffle(rng);
        let mut best: Option<(Cell, i32)> = None;
        for dir in dirs {
            let target = cell.neighbor(dir);
            if !is_free_ground(ctx, plan, target) {
                continue;
            }
            let score = expansion_score(ctx, target);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((target, score));
            }
        }

        if let Some((target, _)) = best {
            plan.claim(target);
            plan.propose(Order::Expand { subject, target, tile: into }, priority);
            plan.spend(cost);
        }
    }
}

/// Farms turn the free ground around them into soil.
pub fn cultivate(ctx: &Context<'_>, plan: &mut Planner, priority: i32) {
    let Some(soil) = ctx.roster.soil else {
        return;
    };
    for (cell, tile) in ctx.active_tiles() {
        let subject = Descriptor::tile(cell);
        if plan.is_tasked(subject) || !ctx.bible.can_cultivate(tile.typ, soil) {
            continue;
        }
        let ground = ctx
            .board
            .area(cell, 2)
            .filter(|&c| c != cell && is_free_ground(ctx, &*plan, c))
            .count();
        if ground == 0 {
            continue;
        }
        let cost = ctx.bible.tile_cost(soil) * ground as i32;
        if plan.can_afford(cost) {
            plan.propose(Order::Cultivate { subject, tile: soil }, priority);
            plan.spend(cost);
        }
    }
}

/// Buildings that can train `unit` do so until `limit` are queued this
/// pass, money runs out or the military cap is reached.
pub fn produce(ctx: &Context<'_>, plan: &mut Planner, unit: UnitType, limit: usize, priority: i32) {
    let cost = ctx.bible.unit_cost(unit);
    let military = ctx.bible.is_military(unit);
    let air = ctx.bible.is_air(unit);

    for (cell, tile) in ctx.active_tiles() {
        if plan.queued(unit) >= limit || !plan.can_afford(cost) {
            return;
        }
        if military && !plan.military_room() {
            return;
        }
        let subject = Descriptor::tile(cell);
        if plan.is_tasked(subject) || !ctx.bible.can_produce(tile.typ, unit) {
            continue;
        }
        if !has_room(ctx, cell, air) {
            continue;
        }
        plan.propose(Order::Produce { subject, unit }, priority);
        plan.queue_unit(unit, cost, military);
    }
}

/// Military ground units near a threatened settlement move to it.
pub fn defend(ctx: &Context<'_>, plan: &mut Planner, priority: i32) {
    let board = ctx.board;
    let player = ctx.player;
    let threatened: Vec<Cell> = board
        .tiles_of(player)
        .filter(|(_, t)| is_settlement(ctx, t.typ))
        .map(|(c, _)| c)
        .filter(|&c| {
            board
                .area(c, THREAT_RADIUS_SQ)
                .any(|a| board.square(a).is_some_and(|sq| sq.has_enemy_ground(player)))
        })
        .collect();
    if threatened.is_empty() {
        return;
    }

    let fill = FloodFill::new(board, ctx.bible)
        .include(move |cell, _| threatened.contains(&cell))
        .execute();

    for (subject, unit) in ctx.units() {
        if subject.layer != Layer::Ground || plan.is_tasked(subject) {
            continue;
        }
        if !ctx.bible.is_military(unit.typ) || fill.is_source(subject.cell) {
            continue;
        }
        let Some(approach) = fill.approach(subject.cell) else {
            continue;
        };
        if approach.steps > DEFEND_REACH {
            continue;
        }
        let moves = fill.route(subject.cell, usize::from(ctx.bible.speed(unit.typ)));
        propose_move(ctx, plan, subject, moves, priority);
    }
}

/// Idle military units head for the nearest enemy settlement or unit.
/// Closer units get higher priority. `max_moves` limits how far a unit
/// walks in one turn below its speed.
pub fn advance(ctx: &Context<'_>, plan: &mut Planner, priority: i32, max_moves: Option<usize>) {
    let view = *ctx;
    let ground = FloodFill::new(ctx.board, ctx.bible)
        .include(move |_, sq| is_enemy_target(&view, sq))
        .include_occupied(ctx.bible)
        .execute();
    let air = if ctx.units().any(|(d, _)| d.layer == Layer::Air) {
        Some(
            FloodFill::new(ctx.board, ctx.bible)
                .include(move |_, sq| is_enemy_target(&view, sq))
                .walkable(|_, sq| sq.tile.is_some() && sq.air.is_none())
                .execute(),
        )
    } else {
        None
    };

    for (subject, unit) in ctx.units() {
        if plan.is_tasked(subject) || ctx.is_busy(subject) || !ctx.bible.is_military(unit.typ) {
            continue;
        }
        let fill = match subject.layer {
            Layer::Air => match &air {
                Some(fill) => fill,
                None => continue,
            },
            _ => &ground,
        };
        if fill.is_source(subject.cell) {
            continue;
        }
        let Some(approach) = fill.approach(subject.cell) else {
            continue;
        };
        let speed = usize::from(ctx.bible.speed(unit.typ));
        let moves = fill.route(subject.cell, max_moves.map_or(speed, |m| m.min(speed)));
        let closeness = approach.steps.min(50) as i32;
        propose_move(ctx, plan, subject, moves, priority - closeness);
    }
}

/// Units with a shelling range fire on the enemy ground stack in range
/// with the most stacks.
pub fn shell(ctx: &Context<'_>, plan: &mut Planner, priority: i32) {
    for (subject, unit) in ctx.units() {
        if plan.is_tasked(subject) {
            continue;
        }
        let Some(range) = ctx.bible.unit(unit.typ).and_then(|u| u.shell_range) else {
            continue;
        };
        let target = best_target(ctx, subject, range, |sq| {
            sq.ground
                .filter(|u| ctx.player.is_enemy_of(u.owner))
                .map_or(0, |u| i32::from(u.stacks))
        });
        if let Some(target) = target {
            plan.propose(Order::Shell { subject, target }, priority);
        }
    }
}

/// Units with a bombardment range hit the cell in range holding the most
/// enemy stacks, counting an enemy building extra.
pub fn bombard(ctx: &Context<'_>, plan: &mut Planner, priority: i32) {
    for (subject, unit) in ctx.units() {
        if plan.is_tasked(subject) {
            continue;
        }
        let Some(range) = ctx.bible.unit(unit.typ).and_then(|u| u.bombard_range) else {
            continue;
        };
        let target = best_target(ctx, subject, range, |sq| {
            let mut score = enemy_stacks(ctx, sq);
            if sq.tile.is_some_and(|t| ctx.player.is_enemy_of(t.owner)) {
                score += BUILDING_BONUS;
            }
            score
        });
        if let Some(target) = target {
            plan.propose(Order::Bombard { subject, target }, priority);
        }
    }
}

/// Idle units that can lock down face the nearest enemy ground unit.
pub fn lockdown(ctx: &Context<'_>, plan: &mut Planner, priority: i32) {
    for (subject, unit) in ctx.units() {
        if subject.layer != Layer::Ground || plan.is_tasked(subject) || ctx.is_busy(subject) {
            continue;
        }
        if !ctx.bible.unit(unit.typ).is_some_and(|u| u.lockdown) {
            continue;
        }
        let here = subject.cell;
        let mut nearest: Option<(Cell, i32)> = None;
        for cell in ctx.board.area(here, LOCKDOWN_RADIUS_SQ) {
            if !ctx.board.square(cell).is_some_and(|sq| sq.has_enemy_ground(ctx.player)) {
                continue;
            }
            let d = cell.distance_sq(here);
            if nearest.map_or(true, |(_, best)| d < best) {
                nearest = Some((cell, d));
            }
        }
        let Some((enemy, _)) = nearest else {
            continue;
        };
        let facing = Direction::CARDINALS
            .into_iter()
            .map(|dir| here.neighbor(dir))
            .filter(|&c| ctx.board.grid().contains(c))
            .min_by_key(|&c| c.distance_sq(enemy));
        if let Some(target) = facing {
            plan.propose(Order::Lockdown { subject, target }, priority);
        }
    }
}

/// Units that can focus pick the strongest adjacent enemy ground stack.
pub fn focus(ctx: &Context<'_>, plan: &mut Planner, priority: i32) {
    for (subject, unit) in ctx.units() {
        if plan.is_tasked(subject) || !ctx.bible.unit(unit.typ).is_some_and(|u| u.focus) {
            continue;
        }
        let mut best: Option<(Cell, i8)> = None;
        for dir in Direction::CARDINALS {
            let cell = subject.cell.neighbor(dir);
            let Some(enemy) = ctx
                .board
                .square(cell)
                .and_then(|sq| sq.ground)
                .filter(|u| ctx.player.is_enemy_of(u.owner))
            else {
                continue;
            };
            if best.map_or(true, |(_, stacks)| enemy.stacks > stacks) {
                best = Some((cell, enemy.stacks));
            }
        }
        if let Some((target, _)) = best {
            plan.propose(Order::Focus { subject, target }, priority);
        }
    }
}

/// Proposes a move along `moves`, dropping trailing steps whose end cell is
/// already claimed or held by one of our own units in the same layer.
fn propose_move(ctx: &Context<'_>, plan: &mut Planner, subject: Descriptor, mut moves: Vec<Direction>, priority: i32) {
    while !moves.is_empty() {
        let dest = subject.cell.walk(&moves);
        let own = ctx
            .board
            .unit(Descriptor::new(subject.layer, dest))
            .is_some_and(|u| u.owner == ctx.player);
        if !own && !plan.is_claimed(dest) {
            break;
        }
        moves.pop();
    }
    if moves.is_empty() {
        return;
    }
    plan.claim(subject.cell.walk(&moves));
    plan.propose(Order::moving(subject, moves), priority);
}

fn settle_sites<'a>(ctx: &Context<'a>) -> FloodFillResult {
    let view = *ctx;
    let player = ctx.player;
    FloodFill::new(ctx.board, ctx.bible)
        .include(move |cell, _| is_settle_site(&view, cell))
        .exclude(move |_, sq| sq.has_enemy_unit(player))
        .execute()
}

fn is_settle_site(ctx: &Context<'_>, cell: Cell) -> bool {
    let Some(tile) = ctx.board.tile(cell) else {
        return false;
    };
    if tile.owner.is_seated() || !ctx.bible.buildable(tile.typ) {
        return false;
    }
    !ctx.board
        .area(cell, SETTLE_SPACING_SQ)
        .any(|c| ctx.board.tile(c).is_some_and(|t| is_settlement(ctx, t.typ)))
}

fn is_settlement(ctx: &Context<'_>, typ: TileType) -> bool {
    ctx.roster.settlements().any(|s| s == typ)
}

fn is_enemy_target(ctx: &Context<'_>, sq: &Square) -> bool {
    let enemy_settlement = sq
        .tile
        .is_some_and(|t| ctx.player.is_enemy_of(t.owner) && is_settlement(ctx, t.typ));
    enemy_settlement || sq.has_enemy_ground(ctx.player)
}

/// Unowned buildable ground with no ground unit that no candidate claimed.
fn is_free_ground(ctx: &Context<'_>, plan: &Planner, cell: Cell) -> bool {
    if plan.is_claimed(cell) {
        return false;
    }
    ctx.board.square(cell).is_some_and(|sq| {
        sq.ground.is_none() && sq.tile.is_some_and(|t| !t.owner.is_seated() && ctx.bible.buildable(t.typ))
    })
}

fn expansion_score(ctx: &Context<'_>, target: Cell) -> i32 {
    let mut score = 0;
    for cell in ctx.board.area(target, 5) {
        let Some(sq) = ctx.board.square(cell) else {
            continue;
        };
        if cell.distance_sq(target) <= 2 && sq.tile_of(ctx.player).is_some() {
            score += 1;
        }
        if sq.has_enemy_ground(ctx.player) {
            score -= 3;
        }
    }
    score
}

/// Whether a new unit has somewhere to appear.
fn has_room(ctx: &Context<'_>, cell: Cell, air: bool) -> bool {
    let Some(sq) = ctx.board.square(cell) else {
        return false;
    };
    if air {
        return sq.air.is_none();
    }
    sq.ground.is_none()
        || Direction::CARDINALS
            .into_iter()
            .any(|dir| ctx.board.is_walkable(cell.neighbor(dir), ctx.bible))
}

fn enemy_stacks(ctx: &Context<'_>, sq: &Square) -> i32 {
    [sq.ground, sq.air]
        .into_iter()
        .flatten()
        .filter(|u| ctx.player.is_enemy_of(u.owner))
        .map(|u| i32::from(u.stacks))
        .sum()
}

/// The cell within `range` of the subject with the highest positive score.
/// A range of zero means the subject's own cell. Cells holding one of our
/// own units, other than the subject, are never targeted.
fn best_target(ctx: &Context<'_>, subject: Descriptor, range: u8, score: impl Fn(&Square) -> i32) -> Option<Cell> {
    let max_sq = i32::from(range) * i32::from(range);
    let min_sq = if range == 0 { 0 } else { 1 };
    let mut best: Option<(Cell, i32)> = None;
    for cell in ctx.board.grid().ring(subject.cell, min_sq, max_sq) {
        let Some(sq) = ctx.board.square(cell) else {
            continue;
        };
        let friendly = [(Layer::Ground, sq.ground), (Layer::Air, sq.air)]
            .into_iter()
            .filter(|&(layer, _)| Descriptor::new(layer, cell) != subject)
            .any(|(_, u)| u.is_some_and(|u| u.owner == ctx.player));
        if friendly {
            continue;
        }
        let s = score(sq);
        if s > 0 && best.map_or(true, |(_, b)| s > b) {
            best = Some((cell, s));
        }
    }
    best.map(|(cell, _)| cell)
}
