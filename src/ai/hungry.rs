//! The economic personality.

use rand::rngs::SmallRng;

use super::agent::{Agent, Context};
use super::planner::Planner;
use super::rules;
use super::{Ai, Variant};
use crate::rules::UnitType;

const CAPTURE: i32 = 60;
const SETTLE: i32 = 50;
const UPGRADE: i32 = 45;
const EXPAND: i32 = 40;
const CULTIVATE: i32 = 35;
const PRODUCE_SETTLER: i32 = 30;
const PRODUCE_MILITIA: i32 = 25;
const DEFEND: i32 = 20;
const ADVANCE: i32 = 10;

/// Settlers queued per turn.
const SETTLERS_PER_TURN: usize = 1;
/// Militia queued per turn.
const MILITIA_PER_TURN: usize = 2;

/// Grows first: takes buildings, founds towns, builds farms and settlers,
/// and only walks its militia toward the enemy one step at a time.
#[derive(Debug, Clone)]
pub struct HungryAi {
    agent: Agent,
}

impl HungryAi {
    pub fn new(agent: Agent) -> Self {
        HungryAi { agent }
    }
}

fn generate(ctx: &Context<'_>, plan: &mut Planner, rng: &mut SmallRng) {
    let roster = ctx.roster;
    rules::capture(ctx, plan, CAPTURE);
    rules::settle(ctx, plan, SETTLE);
    rules::upgrade(ctx, plan, UPGRADE);
    for into in [roster.farm, roster.town].into_iter().flatten() {
        rules::expand(ctx, plan, rng, into, EXPAND);
    }
    rules::cultivate(ctx, plan, CULTIVATE);
    if let Some(settler) = roster.settler {
        rules::produce(ctx, plan, settler, SETTLERS_PER_TURN, PRODUCE_SETTLER);
    }
    if let Some(militia) = roster.militia {
        rules::produce(ctx, plan, militia, MILITIA_PER_TURN, PRODUCE_MILITIA);
    }
    rules::defend(ctx, plan, DEFEND);
    rules::advance(ctx, plan, ADVANCE, Some(1));
}

impl Ai for HungryAi {
    fn agent(&self) -> &Agent {
        &self.agent
    }

    fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }

    fn variant(&self) -> Variant {
        Variant::Hungry
    }

    fn can_build(&self, unit: UnitType) -> bool {
        let roster = self.agent.roster();
        roster.settler == Some(unit) || roster.militia == Some(unit)
    }

    fn process(&mut self) {
        self.agent.plan(generate);
    }
}
