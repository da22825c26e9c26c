use super::{DecisionContext, Strategy, log_decision};
use flip7_core::model::decision::Decision;

/// Scales its appetite for risk with the gap to the best opponent's
/// cumulative score.
#[derive(Debug, Clone)]
pub struct Adaptive {
    name: String,
}

const FAR_BEHIND: i64 = 50;
const BEHIND: i64 = 20;
const MAX_RISK: f64 = 0.6;

impl Adaptive {
    pub fn new() -> Self {
        Self::named("Adaptive")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn choose(ctx: &DecisionContext) -> (Decision, &'static str) {
        let own = i64::from(ctx.player.game_score());
        let leader = i64::from(ctx.table.max_opponent_score(ctx.player.id()));
        let deficit = leader - own;

        let summary = ctx.summary();
        let score = summary.running_score;

        if deficit > FAR_BEHIND {
            if summary.distinct >= 3 {
                return (Decision::Hit, "far_behind_spread");
            }
            if score < 40 {
                return (Decision::Hit, "far_behind_low_score");
            }
        } else if deficit > BEHIND {
            if summary.distinct >= 4 {
                return (Decision::Hit, "behind_spread");
            }
            if score < 35 {
                return (Decision::Hit, "behind_low_score");
            }
        } else {
            if summary.distinct >= 6 {
                return (Decision::Hit, "close_chase_flip7");
            }
            if score >= 25 {
                return (Decision::Stand, "close_bank");
            }
        }

        match ctx.bust_risk() {
            None => (Decision::Stand, "no_numbers_left"),
            Some(risk) if risk > MAX_RISK => (Decision::Stand, "risk_too_high"),
            Some(_) => (Decision::Hit, "acceptable_risk"),
        }
    }
}

impl Default for Adaptive {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Adaptive {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, ctx: &DecisionContext) -> Decision {
        let (decision, reason) = Self::choose(ctx);
        log_decision(ctx, &self.name, decision, reason);
        decision
    }
}
