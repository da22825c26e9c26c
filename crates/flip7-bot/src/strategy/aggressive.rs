use super::{DecisionContext, Strategy, log_decision};
use flip7_core::model::decision::Decision;

/// Commits to a Flip 7 attempt from four distinct values onward and only
/// banks large scores.
#[derive(Debug, Clone)]
pub struct Aggressive {
    name: String,
}

impl Aggressive {
    pub fn new() -> Self {
        Self::named("Aggressive")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn choose(ctx: &DecisionContext) -> (Decision, &'static str) {
        let summary = ctx.summary();
        if summary.distinct >= 4 {
            return (Decision::Hit, "chase_flip7");
        }

        let Some(risk) = ctx.bust_risk() else {
            return (Decision::Stand, "no_numbers_left");
        };

        let score = summary.running_score;
        if (score >= 45 && risk > 0.4) || (score >= 60 && risk > 0.2) {
            (Decision::Stand, "risk_too_high")
        } else {
            (Decision::Hit, "acceptable_risk")
        }
    }
}

impl Default for Aggressive {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Aggressive {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, ctx: &DecisionContext) -> Decision {
        let (decision, reason) = Self::choose(ctx);
        log_decision(ctx, &self.name, decision, reason);
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::Aggressive;
    use crate::strategy::test_support::Fixture;
    use flip7_core::model::card::Card;
    use flip7_core::model::decision::Decision;

    #[test]
    fn four_distinct_values_always_hit() {
        let fixture = Fixture::numbers(&[9, 10, 11, 12]).remaining(&[9, 10]);
        assert_eq!(fixture.decide(&Aggressive::new()), Decision::Hit);
    }

    #[test]
    fn big_score_hits_while_risk_is_moderate() {
        // 46 points; 23 of 79 undealt numbers bust.
        let fixture = Fixture::new(&[Card::Number(12), Card::Number(11), Card::Multiplier]);
        assert_eq!(fixture.decide(&Aggressive::new()), Decision::Hit);
    }

    #[test]
    fn big_score_stands_when_risk_passes_forty_percent() {
        let fixture = Fixture::new(&[Card::Number(12), Card::Number(11), Card::Multiplier])
            .remaining(&[12, 12, 11, 2]);
        assert_eq!(fixture.decide(&Aggressive::new()), Decision::Stand);
    }

    #[test]
    fn huge_score_stands_at_lower_risk() {
        let fixture = Fixture::new(&[
            Card::Number(12),
            Card::Number(11),
            Card::Modifier(3),
            Card::Modifier(3),
            Card::Modifier(2),
            Card::Multiplier,
        ]);
        assert_eq!(fixture.decide(&Aggressive::new()), Decision::Stand);
    }

    #[test]
    fn empty_deck_stands() {
        let fixture = Fixture::numbers(&[3]).remaining(&[]);
        assert_eq!(fixture.decide(&Aggressive::new()), Decision::Stand);
    }
}
