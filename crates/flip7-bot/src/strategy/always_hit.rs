use super::{DecisionContext, Strategy, log_decision};
use flip7_core::model::decision::Decision;

/// Draws until the round ends through a bust or a Flip 7.
#[derive(Debug, Clone)]
pub struct AlwaysHit {
    name: String,
}

impl AlwaysHit {
    pub fn new() -> Self {
        Self::named("Always Hit")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for AlwaysHit {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for AlwaysHit {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, ctx: &DecisionContext) -> Decision {
        log_decision(ctx, &self.name, Decision::Hit, "always");
        Decision::Hit
    }
}
