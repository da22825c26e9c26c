use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::simulation::GameOutcome;

const CONFIDENCE_Z: f64 = 1.96; // 95% CI

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Accumulates per-seat totals across games.
pub struct AnalyticsCollector {
    seats: Vec<SeatAccumulator>,
    games: usize,
}

impl AnalyticsCollector {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            seats: names.into_iter().map(SeatAccumulator::new).collect(),
            games: 0,
        }
    }

    pub fn record_game(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        for (seat, acc) in self.seats.iter_mut().enumerate() {
            acc.total_score += u64::from(outcome.final_scores.get(seat).copied().unwrap_or(0));
            acc.flip7s += outcome.flip7s.get(seat).copied().unwrap_or(0);
            acc.busts += outcome.busts.get(seat).copied().unwrap_or(0);
            if outcome.winner.index() == seat {
                acc.wins += 1;
            }
        }
    }

    /// Produce reports sorted by wins, most first. Equal win counts keep
    /// seat order.
    pub fn finalize(self, master_seed: u64) -> SimulationSummary {
        let games = self.games;
        let z = z_score();
        let mut reports: Vec<StrategyReport> = self
            .seats
            .into_iter()
            .enumerate()
            .map(|(seat, acc)| acc.into_report(seat, games, z))
            .collect();
        reports.sort_by(|a, b| b.wins.cmp(&a.wins));

        SimulationSummary {
            games,
            master_seed,
            reports,
        }
    }
}

struct SeatAccumulator {
    name: String,
    wins: u32,
    total_score: u64,
    flip7s: u32,
    busts: u32,
}

impl SeatAccumulator {
    fn new(name: String) -> Self {
        Self {
            name,
            wins: 0,
            total_score: 0,
            flip7s: 0,
            busts: 0,
        }
    }

    fn into_report(self, seat: usize, games: usize, z: f64) -> StrategyReport {
        let (average_score, win_rate) = if games == 0 {
            (0.0, 0.0)
        } else {
            (
                self.total_score as f64 / games as f64,
                f64::from(self.wins) / games as f64,
            )
        };
        let (ci_low, ci_high) = wilson_interval(self.wins, games, z);

        StrategyReport {
            name: self.name,
            seat,
            wins: self.wins,
            total_score: self.total_score,
            average_score,
            flip7s: self.flip7s,
            busts: self.busts,
            win_rate,
            win_rate_ci95: (ci_low, ci_high),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyReport {
    pub name: String,
    pub seat: usize,
    pub wins: u32,
    pub total_score: u64,
    pub average_score: f64,
    pub flip7s: u32,
    pub busts: u32,
    pub win_rate: f64,
    pub win_rate_ci95: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub games: usize,
    pub master_seed: u64,
    pub reports: Vec<StrategyReport>,
}

impl SimulationSummary {
    /// Fixed-width results table.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n=== Flip 7 Simulation Results ===");
        let _ = writeln!(out, "Total Games: {}\n", self.games);
        let _ = writeln!(
            out,
            "{:<20} {:>8} {:>8} {:>12} {:>8} {:>8}",
            "Algorithm", "Wins", "Win%", "Avg Score", "Flip 7s", "Busts"
        );
        let _ = writeln!(
            out,
            "{:<20} {:>8} {:>8} {:>12} {:>8} {:>8}",
            "=========", "====", "====", "=========", "=======", "====="
        );
        for report in &self.reports {
            let _ = writeln!(
                out,
                "{:<20} {:>8} {:>7.1}% {:>11.1} {:>8} {:>8}",
                report.name,
                report.wins,
                report.win_rate * 100.0,
                report.average_score,
                report.flip7s,
                report.busts,
            );
        }
        out
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| AnalyticsError::Io {
                context: "creating summary directory",
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| AnalyticsError::Io {
            context: "writing summary json",
            source,
        })
    }
}

fn z_score() -> f64 {
    Normal::new(0.0, 1.0)
        .map(|normal| normal.inverse_cdf(0.975))
        .unwrap_or(CONFIDENCE_Z)
}

/// Wilson score interval for `wins` successes out of `games` trials.
fn wilson_interval(wins: u32, games: usize, z: f64) -> (f64, f64) {
    if games == 0 {
        return (0.0, 0.0);
    }
    let n = games as f64;
    let p = f64::from(wins) / n;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let margin = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;
    ((center - margin).max(0.0), (center + margin).min(1.0))
}
