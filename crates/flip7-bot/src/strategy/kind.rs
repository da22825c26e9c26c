use super::{Adaptive, Aggressive, AlwaysHit, Conservative, StopAtScore, Strategy};
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    AlwaysHit,
    StopAtScore,
    Conservative,
    Aggressive,
    Adaptive,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::AlwaysHit,
        StrategyKind::StopAtScore,
        StrategyKind::Conservative,
        StrategyKind::Aggressive,
        StrategyKind::Adaptive,
    ];

    pub const fn description(self) -> &'static str {
        match self {
            StrategyKind::AlwaysHit => "Always takes another card until bust or Flip 7",
            StrategyKind::StopAtScore => "Stops when reaching X points in a round",
            StrategyKind::Conservative => "Uses risk assessment based on cards seen",
            StrategyKind::Aggressive => "Aggressively goes for Flip 7",
            StrategyKind::Adaptive => "Adapts strategy based on opponents' scores",
        }
    }

    pub const fn requires_threshold(self) -> bool {
        matches!(self, StrategyKind::StopAtScore)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrategyKind::AlwaysHit => "always_hit",
            StrategyKind::StopAtScore => "stop_at_score",
            StrategyKind::Conservative => "conservative",
            StrategyKind::Aggressive => "aggressive",
            StrategyKind::Adaptive => "adaptive",
        })
    }
}

/// Declarative description of one seat's strategy, as written in a config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategySpec {
    pub kind: StrategyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl StrategySpec {
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            threshold: None,
            name: None,
        }
    }

    pub fn stop_at(threshold: u32) -> Self {
        Self {
            kind: StrategyKind::StopAtScore,
            threshold: Some(threshold),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn validate(&self) -> Result<(), SpecError> {
        match (self.kind.requires_threshold(), self.threshold) {
            (true, None) => Err(SpecError::MissingThreshold { kind: self.kind }),
            (false, Some(threshold)) => Err(SpecError::UnusedThreshold {
                kind: self.kind,
                threshold,
            }),
            _ => Ok(()),
        }
    }

    /// Name shown in reports: the explicit name, else the strategy default.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_ref() {
            return name.clone();
        }
        match (self.kind, self.threshold) {
            (StrategyKind::AlwaysHit, _) => "Always Hit".to_string(),
            (StrategyKind::StopAtScore, Some(threshold)) => format!("Stop at {threshold}"),
            (StrategyKind::StopAtScore, None) => "Stop at ?".to_string(),
            (StrategyKind::Conservative, _) => "Conservative".to_string(),
            (StrategyKind::Aggressive, _) => "Aggressive".to_string(),
            (StrategyKind::Adaptive, _) => "Adaptive".to_string(),
        }
    }

    pub fn build(&self) -> Result<Box<dyn Strategy>, SpecError> {
        self.validate()?;
        let name = self.display_name();
        let strategy: Box<dyn Strategy> = match self.kind {
            StrategyKind::AlwaysHit => Box::new(AlwaysHit::named(name)),
            StrategyKind::StopAtScore => {
                let threshold = self
                    .threshold
                    .ok_or(SpecError::MissingThreshold { kind: self.kind })?;
                Box::new(StopAtScore::named(name, threshold))
            }
            StrategyKind::Conservative => Box::new(Conservative::named(name)),
            StrategyKind::Aggressive => Box::new(Aggressive::named(name)),
            StrategyKind::Adaptive => Box::new(Adaptive::named(name)),
        };
        Ok(strategy)
    }
}

/// The seven-seat lineup used when no strategies are configured.
pub fn default_lineup() -> Vec<StrategySpec> {
    vec![
        StrategySpec::new(StrategyKind::AlwaysHit),
        StrategySpec::stop_at(25),
        StrategySpec::stop_at(30),
        StrategySpec::stop_at(40),
        StrategySpec::new(StrategyKind::Conservative),
        StrategySpec::new(StrategyKind::Aggressive),
        StrategySpec::new(StrategyKind::Adaptive),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("strategy '{kind}' requires a threshold")]
    MissingThreshold { kind: StrategyKind },
    #[error("strategy '{kind}' does not take a threshold (got {threshold})")]
    UnusedThreshold { kind: StrategyKind, threshold: u32 },
}
