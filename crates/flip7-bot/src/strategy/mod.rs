mod adaptive;
mod aggressive;
mod always_hit;
mod analysis;
mod conservative;
pub mod kind;
mod stop_at_score;

pub use adaptive::Adaptive;
pub use aggressive::Aggressive;
pub use always_hit::AlwaysHit;
pub use analysis::{HandSummary, bust_risk};
pub use conservative::Conservative;
pub use kind::{SpecError, StrategyKind, StrategySpec, default_lineup};
pub use stop_at_score::StopAtScore;

use flip7_core::game::view::TableView;
use flip7_core::model::decision::Decision;
use flip7_core::model::player::PlayerState;
use flip7_core::model::shoe::RemainingCounts;
use tracing::{Level, event};

/// Everything a strategy may look at when it is asked to act.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub player: &'a PlayerState,
    pub table: TableView<'a>,
    pub remaining: &'a RemainingCounts,
}

impl<'a> DecisionContext<'a> {
    pub fn new(
        player: &'a PlayerState,
        table: TableView<'a>,
        remaining: &'a RemainingCounts,
    ) -> Self {
        Self {
            player,
            table,
            remaining,
        }
    }

    pub fn summary(&self) -> HandSummary {
        HandSummary::of(self.player.hand())
    }

    /// Share of undealt number cards that would bust this player, or `None`
    /// when no number cards remain.
    pub fn bust_risk(&self) -> Option<f64> {
        bust_risk(self.player.hand().number_mask(), self.remaining)
    }
}

/// Hit-or-stand decision maker. Implementations hold no mutable state, so
/// one instance can serve every game of a run.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &str;

    fn decide(&self, ctx: &DecisionContext) -> Decision;
}

pub(crate) fn log_decision(ctx: &DecisionContext, strategy: &str, decision: Decision, reason: &str) {
    if !tracing::enabled!(target: "flip7_bot::decision", Level::TRACE) {
        return;
    }

    let summary = ctx.summary();
    let risk = ctx.bust_risk().unwrap_or(f64::NAN);
    event!(
        target: "flip7_bot::decision",
        Level::TRACE,
        strategy,
        player = %ctx.player.id(),
        distinct = summary.distinct,
        running_score = summary.running_score,
        game_score = ctx.player.game_score(),
        remaining = ctx.remaining.total(),
        risk,
        decision = %decision,
        reason,
    );
}
