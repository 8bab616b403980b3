//! The military personality.

use rand::rngs::SmallRng;

use super::agent::{Agent, Context};
use super::planner::Planner;
use super::rules;
use super::{Ai, Difficulty, Variant};
use crate::rules::{Roster, UnitType};

const FOCUS: i32 = 70;
const SHELL: i32 = 65;
const BOMBARD: i32 = 60;
const DEFEND: i32 = 55;
const CAPTURE: i32 = 50;
const PRODUCE: i32 = 40;
const EXPAND: i32 = 30;
const ADVANCE: i32 = 25;
const LOCKDOWN: i32 = 5;

/// Units of one type queued per turn.
const UNITS_PER_TURN: usize = 2;

/// Arms first: fights whatever is in reach, trains soldiers with all its
/// money, adds barracks and industry, and marches on enemy settlements.
#[derive(Debug, Clone)]
pub struct RampantAi {
    agent: Agent,
}

impl RampantAi {
    pub fn new(agent: Agent) -> Self {
        RampantAi { agent }
    }
}

/// Unit types in the order they are trained. Heavier units only come with
/// higher difficulties.
fn army(roster: &Roster, difficulty: Difficulty) -> Vec<UnitType> {
    let mut units = vec![roster.rifleman, roster.militia];
    if difficulty != Difficulty::Easy {
        units.insert(0, roster.gunner);
        units.insert(0, roster.tank);
    }
    if difficulty == Difficulty::Hard {
        units.insert(0, roster.zeppelin);
    }
    units.into_iter().flatten().collect()
}

fn generate(ctx: &Context<'_>, plan: &mut Planner, rng: &mut SmallRng) {
    let roster = ctx.roster;
    rules::focus(ctx, plan, FOCUS);
    rules::shell(ctx, plan, SHELL);
    rules::bombard(ctx, plan, BOMBARD);
    rules::defend(ctx, plan, DEFEND);
    rules::capture(ctx, plan, CAPTURE);
    for (rank, unit) in army(roster, ctx.difficulty).into_iter().enumerate() {
        rules::produce(ctx, plan, unit, UNITS_PER_TURN, PRODUCE - rank as i32);
    }
    for into in [roster.barracks, roster.industry].into_iter().flatten() {
        rules::expand(ctx, plan, rng, into, EXPAND);
    }
    rules::advance(ctx, plan, ADVANCE, None);
    rules::lockdown(ctx, plan, LOCKDOWN);
}

impl Ai for RampantAi {
    fn agent(&self) -> &Agent {
        &self.agent
    }

    fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }

    fn variant(&self) -> Variant {
        Variant::Rampant
    }

    fn can_build(&self, unit: UnitType) -> bool {
        army(self.agent.roster(), self.agent.difficulty()).contains(&unit)
    }

    fn process(&mut self) {
        self.agent.plan(generate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Change, Descriptor, Order, Phase, Player, TileToken, UnitToken};
    use crate::rules::Bible;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn rampant(difficulty: Difficulty) -> RampantAi {
        let bible = Arc::new(Bible::named("default").unwrap());
        RampantAi::new(Agent::new(
            Player::Red,
            difficulty,
            "Rosa".to_string(),
            bible,
            SmallRng::seed_from_u64(21),
        ))
    }

    #[test]
    fn army_grows_with_difficulty() {
        let bible = Bible::named("default").unwrap();
        let roster = Roster::resolve(&bible);
        assert_eq!(army(&roster, Difficulty::Easy).len(), 2);
        assert_eq!(army(&roster, Difficulty::Medium).len(), 4);
        assert_eq!(army(&roster, Difficulty::Hard).len(), 5);
        assert_eq!(army(&roster, Difficulty::Hard)[0], roster.zeppelin.unwrap());
    }

    #[test]
    fn never_trains_settlers() {
        let ai = rampant(Difficulty::Hard);
        let settler = ai.agent().bible().unit_type("settler").unwrap();
        assert!(!ai.can_build(settler));
    }

    #[test]
    fn fights_before_it_marches() {
        let mut ai = rampant(Difficulty::Hard);
        let bible = ai.agent().bible().clone();
        let grass = bible.tile_type("grass").unwrap();
        let tank = bible.unit_type("tank").unwrap();
        let militia = bible.unit_type("militia").unwrap();

        let mut changes = vec![Change::Dimensions { rows: 3, cols: 3 }];
        for row in 0..3 {
            for col in 0..3 {
                changes.push(Change::Tile {
                    cell: Cell::new(row, col),
                    tile: Some(TileToken::terrain(grass)),
                });
            }
        }
        changes.extend([
            Change::Unit {
                subject: Descriptor::ground(Cell::new(1, 1)),
                unit: Some(UnitToken::new(tank, Player::Red, 1)),
            },
            Change::Unit {
                subject: Descriptor::ground(Cell::new(1, 2)),
                unit: Some(UnitToken::new(militia, Player::Blue, 3)),
            },
            Change::Phase { phase: Phase::Resting },
            Change::Phase { phase: Phase::Planning },
        ]);
        ai.receive_changes(&changes);
        ai.prepare_orders();
        assert_eq!(
            ai.orders(),
            &[Order::Focus {
                subject: Descriptor::ground(Cell::new(1, 1)),
                target: Cell::new(1, 2),
            }]
        );
    }
}
