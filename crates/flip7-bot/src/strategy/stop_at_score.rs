use super::{DecisionContext, Strategy, log_decision};
use flip7_core::model::decision::Decision;

/// Stands once the running score reaches a fixed threshold.
#[derive(Debug, Clone)]
pub struct StopAtScore {
    name: String,
    threshold: u32,
}

impl StopAtScore {
    pub fn new(threshold: u32) -> Self {
        Self::named(format!("Stop at {threshold}"), threshold)
    }

    pub fn named(name: impl Into<String>, threshold: u32) -> Self {
        Self {
            name: name.into(),
            threshold,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Strategy for StopAtScore {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, ctx: &DecisionContext) -> Decision {
        let (decision, reason) = if ctx.summary().running_score >= self.threshold {
            (Decision::Stand, "threshold_reached")
        } else {
            (Decision::Hit, "below_threshold")
        };
        log_decision(ctx, &self.name, decision, reason);
        decision
    }
}
