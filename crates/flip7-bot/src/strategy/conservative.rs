use super::{DecisionContext, Strategy, log_decision};
use flip7_core::model::decision::Decision;

/// Banks moderate scores as soon as the deck turns against the hand, but
/// always chases the seventh distinct value.
#[derive(Debug, Clone)]
pub struct Conservative {
    name: String,
}

impl Conservative {
    pub fn new() -> Self {
        Self::named("Conservative")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn choose(ctx: &DecisionContext) -> (Decision, &'static str) {
        let summary = ctx.summary();
        if summary.distinct == 6 {
            return (Decision::Hit, "chase_flip7");
        }

        let Some(risk) = ctx.bust_risk() else {
            return (Decision::Stand, "no_numbers_left");
        };

        let score = summary.running_score;
        if (score >= 35 && risk > 0.3) || (score >= 25 && risk > 0.5) {
            (Decision::Stand, "risk_too_high")
        } else {
            (Decision::Hit, "acceptable_risk")
        }
    }
}

impl Default for Conservative {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Conservative {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, ctx: &DecisionContext) -> Decision {
        let (decision, reason) = Self::choose(ctx);
        log_decision(ctx, &self.name, decision, reason);
        decision
    }
}
