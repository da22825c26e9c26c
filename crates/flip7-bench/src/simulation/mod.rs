use flip7_bot::strategy::{DecisionContext, SpecError, Strategy};
use flip7_core::game::match_state::{
    ActionError, ActionOutcome, HitOutcome, MatchState, RoundError,
};
use flip7_core::model::player::PlayerId;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, SimulationSummary};
use crate::config::{SimulationConfig, ValidationError};

/// Plays complete games between the configured strategies, one seat each.
pub struct SimulationRunner {
    config: SimulationConfig,
    strategies: Vec<Box<dyn Strategy>>,
}

/// Progress notification handed to `run_with_progress` callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// Result of one finished game, indexed by seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    pub game: usize,
    pub seed: u64,
    pub winner: PlayerId,
    pub rounds: u32,
    pub final_scores: Vec<u32>,
    pub flip7s: Vec<u32>,
    pub busts: Vec<u32>,
}

impl SimulationRunner {
    /// Build a runner, validating the configuration and instantiating one
    /// strategy per seat.
    pub fn new(mut config: SimulationConfig) -> Result<Self, RunnerError> {
        config.validate()?;
        let strategies = config
            .strategies
            .iter()
            .map(|spec| spec.build())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { config, strategies })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn strategy_names(&self) -> Vec<String> {
        self.strategies
            .iter()
            .map(|strategy| strategy.name().to_string())
            .collect()
    }

    pub fn run(&self) -> Result<SimulationSummary, RunnerError> {
        self.run_with_progress(|_| {})
    }

    /// Play every configured game. `on_progress` fires each time the number
    /// of completed games is a multiple of `progress_interval`.
    pub fn run_with_progress<F>(&self, mut on_progress: F) -> Result<SimulationSummary, RunnerError>
    where
        F: FnMut(Progress),
    {
        let total = self.config.games;
        let master_seed = self.config.seed.unwrap_or_else(rand::random);
        let mut seeds = StdRng::seed_from_u64(master_seed);
        let mut analytics = AnalyticsCollector::new(self.strategy_names());

        event!(
            target: "flip7_bench::game",
            Level::INFO,
            run_id = %self.config.run_id,
            games = total,
            players = self.strategies.len(),
            master_seed,
            "simulation started"
        );

        for game in 0..total {
            let outcome = self.play_game(game, seeds.next_u64())?;
            analytics.record_game(&outcome);

            let completed = game + 1;
            if completed % self.config.progress_interval == 0 {
                on_progress(Progress { completed, total });
            }
        }

        let summary = analytics.finalize(master_seed);
        event!(
            target: "flip7_bench::game",
            Level::INFO,
            run_id = %self.config.run_id,
            games = summary.games,
            leader = summary.reports.first().map(|r| r.name.as_str()).unwrap_or(""),
            "simulation finished"
        );
        Ok(summary)
    }

    /// Play one game to completion from `seed`.
    pub fn play_game(&self, game: usize, seed: u64) -> Result<GameOutcome, RunnerError> {
        let seats = self.strategies.len();
        let mut state = MatchState::with_seed(seats, seed);
        let mut flip7s = vec![0u32; seats];
        let mut busts = vec![0u32; seats];

        loop {
            if state.round_number() >= self.config.max_rounds {
                return Err(RunnerError::RoundLimit {
                    game,
                    max_rounds: self.config.max_rounds,
                });
            }

            state.start_new_round();
            state.create_deck();
            state.deal_initial_card();
            self.play_round(&mut state, game)?;

            let tally = state.score_round()?;
            for result in &tally.results {
                let seat = result.id.index();
                if result.flip7 {
                    flip7s[seat] += 1;
                }
                if result.bust {
                    busts[seat] += 1;
                }
            }

            let Some(leader) = tally.leader() else {
                return Err(RunnerError::NoPlayers);
            };

            event!(
                target: "flip7_bench::round",
                Level::DEBUG,
                game,
                round = tally.round,
                leader = %leader.id,
                leader_score = leader.game_score,
                flip7 = tally.results.iter().any(|r| r.flip7),
                busts = tally.results.iter().filter(|r| r.bust).count(),
            );

            if leader.game_score >= self.config.target_score {
                let outcome = GameOutcome {
                    game,
                    seed,
                    winner: leader.id,
                    rounds: tally.round,
                    final_scores: tally.results.iter().map(|r| r.game_score).collect(),
                    flip7s,
                    busts,
                };
                event!(
                    target: "flip7_bench::game",
                    Level::DEBUG,
                    game,
                    seed,
                    winner = %outcome.winner,
                    strategy = self.strategies[outcome.winner.index()].name(),
                    rounds = outcome.rounds,
                    "game finished"
                );
                return Ok(outcome);
            }
        }
    }

    /// Visit seats in order, one decision per active player per pass, until
    /// the round is over. A hit that finds no card leaves the player active
    /// for the next pass.
    fn play_round(&self, state: &mut MatchState, game: usize) -> Result<(), RunnerError> {
        while !state.is_round_over() {
            let mut progressed = false;
            for (seat, strategy) in self.strategies.iter().enumerate() {
                if state.is_round_over() {
                    break;
                }

                let id = PlayerId::new(seat);
                let decision = {
                    let player = state.player(id).ok_or(ActionError::UnknownPlayer(id))?;
                    if !player.is_active() {
                        continue;
                    }
                    let remaining = state.cards_remaining();
                    let ctx = DecisionContext::new(player, state.view(), &remaining);
                    strategy.decide(&ctx)
                };

                match state.apply(id, decision)? {
                    ActionOutcome::Hit(HitOutcome::NoCard) => {
                        event!(
                            target: "flip7_bench::round",
                            Level::DEBUG,
                            game,
                            round = state.round_number(),
                            player = %id,
                            "hit found no card"
                        );
                    }
                    _ => progressed = true,
                }
            }

            // Every hit came back empty and nothing reached the discard pile,
            // so another pass would replay this one.
            if !progressed && !state.is_round_over() {
                self.stand_stalled_players(state, game)?;
            }
        }
        Ok(())
    }

    fn stand_stalled_players(&self, state: &mut MatchState, game: usize) -> Result<(), RunnerError> {
        let stalled: Vec<PlayerId> = state
            .players()
            .iter()
            .filter(|player| player.is_active())
            .map(|player| player.id())
            .collect();
        for id in stalled {
            event!(
                target: "flip7_bench::round",
                Level::WARN,
                game,
                round = state.round_number(),
                player = %id,
                exhausted = state.shoe().is_exhausted(),
                "deck and discard pile exhausted; forcing stand"
            );
            state.stand(id)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),
    #[error("{0}")]
    Strategy(#[from] SpecError),
    #[error("illegal action: {0}")]
    Action(#[from] ActionError),
    #[error("round scoring failed: {0}")]
    Round(#[from] RoundError),
    #[error("game {game} exceeded {max_rounds} rounds without a winner")]
    RoundLimit { game: usize, max_rounds: u32 },
    #[error("game has no players")]
    NoPlayers,
}
