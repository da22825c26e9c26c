pub mod strategy;

pub use strategy::{
    Adaptive, Aggressive, AlwaysHit, Conservative, DecisionContext, HandSummary, SpecError,
    StopAtScore, Strategy, StrategyKind, StrategySpec, default_lineup,
};
