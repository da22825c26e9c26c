use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use flip7_bot::strategy::{StrategySpec, default_lineup};
use flip7_core::model::score::DEFAULT_TARGET_SCORE;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

pub const DEFAULT_GAMES: usize = 1_000;
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;
pub const DEFAULT_MAX_ROUNDS: u32 = 10_000;
const DEFAULT_RUN_ID: &str = "flip7";
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root simulation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "default_run_id")]
    pub run_id: String,
    #[serde(default = "default_games")]
    pub games: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_target_score")]
    pub target_score: u32,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    #[serde(default = "default_lineup")]
    pub strategies: Vec<StrategySpec>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub outputs: OutputsConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            run_id: default_run_id(),
            games: DEFAULT_GAMES,
            seed: None,
            target_score: DEFAULT_TARGET_SCORE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_rounds: DEFAULT_MAX_ROUNDS,
            strategies: default_lineup(),
            logging: LoggingConfig::default(),
            outputs: OutputsConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimulationConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        for (field, value) in [
            ("games", self.games),
            ("progress_interval", self.progress_interval),
            ("target_score", self.target_score as usize),
            ("max_rounds", self.max_rounds as usize),
        ] {
            if value == 0 {
                return Err(ValidationError::InvalidField {
                    field: field.to_string(),
                    message: "must be greater than zero".to_string(),
                });
            }
        }
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        validate_strategies(&self.strategies)?;
        Ok(())
    }

    /// Resolve output templates (`{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            summary_json: self
                .outputs
                .summary_json
                .as_deref()
                .map(|template| resolve_template(&self.run_id, template)),
            log_file: resolve_template(&self.run_id, &self.logging.file),
        }
    }
}

fn default_run_id() -> String {
    DEFAULT_RUN_ID.to_string()
}

fn default_games() -> usize {
    DEFAULT_GAMES
}

fn default_target_score() -> u32 {
    DEFAULT_TARGET_SCORE
}

fn default_progress_interval() -> usize {
    DEFAULT_PROGRESS_INTERVAL
}

fn default_max_rounds() -> u32 {
    DEFAULT_MAX_ROUNDS
}

/// Output artifact configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct OutputsConfig {
    #[serde(default)]
    pub summary_json: Option<String>,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        let Some(template) = self.summary_json.as_ref() else {
            return Ok(());
        };

        if template.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "outputs.summary_json".to_string(),
                message: "path must not be empty".to_string(),
            });
        }

        if resolve_template(run_id, template).components().count() == 0 {
            return Err(ValidationError::InvalidField {
                field: "outputs.summary_json".to_string(),
                message: "resolved path is invalid".to_string(),
            });
        }
        Ok(())
    }
}

/// Logging configuration defaults to console output at `info`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            file: default_log_file(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self.file.trim().is_empty() {
            self.file = default_log_file();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "out/{run_id}/simulation.jsonl".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_strategies(strategies: &[StrategySpec]) -> Result<(), ValidationError> {
    if strategies.is_empty() {
        return Err(ValidationError::InvalidField {
            field: "strategies".to_string(),
            message: "at least one strategy must be specified".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (index, spec) in strategies.iter().enumerate() {
        spec.validate()
            .map_err(|err| ValidationError::InvalidField {
                field: format!("strategies[{index}]"),
                message: err.to_string(),
            })?;

        let name = spec.display_name();
        if name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: format!("strategies[{index}].name"),
                message: "strategy name must not be empty".to_string(),
            });
        }

        if !seen.insert(name.clone()) {
            return Err(ValidationError::InvalidField {
                field: "strategies".to_string(),
                message: format!("strategy name '{name}' defined more than once"),
            });
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub summary_json: Option<PathBuf>,
    pub log_file: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
