mod permutations;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::analytics::{AnalyticsCollector, AnalyticsError};
use crate::config::{AgentConfig, BenchmarkConfig, ResolvedOutputs};
use jest_bot::{BotStyle, Policy, Table};
use jest_core::{Game, GameError, GameObserver, GameOutcome, NullObserver, PlayerId, TracingObserver};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

pub use permutations::SeatPermutations;

/// Primary entry point for orchestrating tournaments.
pub struct TournamentRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: Vec<AgentBlueprint>,
    seat_permutations: SeatPermutations,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub permutations: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
}

impl TournamentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let agents = AgentBlueprint::from_configs(&config.agents)?;

        let max = SeatPermutations::max_for(agents.len());
        if config.games.permutations > max {
            return Err(RunnerError::PermutationLimit {
                requested: config.games.permutations,
                max,
            });
        }

        let seat_permutations = SeatPermutations::new(agents.len(), config.games.permutations);

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            agents,
            seat_permutations,
        })
    }

    /// Execute the tournament, streaming one JSONL row per game to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let permutations = self.seat_permutations.as_slice();
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut rows_written = 0usize;
        let mut analytics = AnalyticsCollector::new(&self.config)?;

        for game_index in 0..self.config.games.count {
            let base_seed = rng.next_u64();

            for (perm_index, perm) in permutations.iter().enumerate() {
                let record = self.play_game(game_index, perm_index, base_seed, perm)?;
                analytics.record_game(&record)?;
                write_game_row(&mut writer, &self.config, base_seed, &record)?;
                rows_written += 1;
            }
        }

        writer.flush()?;

        let summary = analytics.finalize()?;
        summary.write_markdown(&self.outputs.summary_md)?;

        let telemetry_path = self
            .logging_enabled
            .then(|| self.outputs.summary_dir().join("telemetry.jsonl"));

        Ok(RunSummary {
            games_played: self.config.games.count,
            permutations: permutations.len(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
        })
    }

    fn play_game(
        &self,
        game_index: usize,
        permutation_index: usize,
        base_seed: u64,
        permutation: &[usize],
    ) -> Result<GameRecord, RunnerError> {
        let mut agents = Vec::with_capacity(permutation.len());
        for (seat_idx, agent_idx) in permutation.iter().copied().enumerate() {
            let agent = self
                .agents
                .get(agent_idx)
                .ok_or(RunnerError::InvalidPermutation {
                    index: seat_idx,
                    agent_index: agent_idx,
                })?;
            agents.push((agent_idx, agent));
        }

        let names: Vec<&str> = agents.iter().map(|(_, agent)| agent.name.as_str()).collect();
        let policies: Vec<Box<dyn Policy>> = agents
            .iter()
            .map(|(agent_idx, agent)| agent.spawn_policy(base_seed, *agent_idx))
            .collect();
        let mut table = Table::new(policies);

        let mut tracing_observer = TracingObserver;
        let mut null_observer = NullObserver;
        let observer: &mut dyn GameObserver = if self.logging_enabled {
            &mut tracing_observer
        } else {
            &mut null_observer
        };

        let mut game = Game::initialize(
            names.iter().copied(),
            self.config.rules.extension,
            self.config.rules.variant,
            base_seed,
            observer,
        )?;
        let outcome = game.play_to_completion(&mut table, observer)?;

        if self.logging_enabled && tracing::enabled!(target: "jest_bench::game", Level::INFO) {
            let leader = outcome
                .standings
                .first()
                .map(|standing| standing.name.as_str())
                .unwrap_or("-");
            event!(
                target: "jest_bench::game",
                Level::INFO,
                run_id = %self.config.run_id,
                game_index = game_index as u32,
                permutation_index = permutation_index as u32,
                rounds = outcome.rounds_played,
                leader,
                unresolved_tie = outcome.has_unresolved_tie()
            );
        }

        Ok(GameRecord::from_outcome(
            game_index,
            permutation_index,
            &agents,
            &outcome,
        ))
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_row(
    writer: &mut BufWriter<File>,
    config: &BenchmarkConfig,
    base_seed: u64,
    record: &GameRecord,
) -> Result<(), RunnerError> {
    let row = GameLogRow {
        run_id: &config.run_id,
        game_id: record.game_id(),
        game_index: record.game_index,
        permutation_index: record.permutation_index,
        game_seed: base_seed,
        variant: config.rules.variant.to_string(),
        extension: config.rules.extension.map(|ext| ext.name()),
        rounds_played: record.rounds_played,
        unresolved_tie: record.unresolved_tie,
        seats: &record.seat_results,
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Everything the analytics and the JSONL log need from one finished game.
pub struct GameRecord {
    pub game_index: usize,
    pub permutation_index: usize,
    pub rounds_played: u32,
    pub unresolved_tie: bool,
    pub seat_results: Vec<SeatResult>,
}

impl GameRecord {
    fn from_outcome(
        game_index: usize,
        permutation_index: usize,
        agents: &[(usize, &AgentBlueprint)],
        outcome: &GameOutcome,
    ) -> Self {
        let seat_results = agents
            .iter()
            .enumerate()
            .map(|(seat_idx, (_, agent))| {
                let seat = PlayerId::new(seat_idx as u8);
                let standing = outcome.standings.iter().find(|s| s.player == seat);
                let base_score = outcome
                    .base_scores
                    .iter()
                    .find(|score| score.player == seat)
                    .map(|score| score.breakdown.total)
                    .unwrap_or(0);
                let trophies = outcome
                    .awards
                    .iter()
                    .filter(|award| award.winner == Some(seat))
                    .map(|award| award.trophy.to_string())
                    .collect();
                SeatResult {
                    seat: seat.to_string(),
                    agent_name: agent.name.clone(),
                    style: agent.style,
                    base_score,
                    score: outcome.final_score(seat).unwrap_or(base_score),
                    rank: standing.map(|s| s.rank).unwrap_or(agents.len()),
                    tied: standing.is_some_and(|s| s.tied),
                    trophies,
                }
            })
            .collect();

        Self {
            game_index,
            permutation_index,
            rounds_played: outcome.rounds_played,
            unresolved_tie: outcome.has_unresolved_tie(),
            seat_results,
        }
    }

    pub fn game_id(&self) -> String {
        format!("G{:05}_P{:02}", self.game_index, self.permutation_index)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatResult {
    pub seat: String,
    #[serde(rename = "bot")]
    pub agent_name: String,
    pub style: BotStyle,
    pub base_score: i32,
    pub score: i32,
    pub rank: usize,
    pub tied: bool,
    pub trophies: Vec<String>,
}

#[derive(Serialize)]
struct GameLogRow<'a> {
    run_id: &'a str,
    game_id: String,
    game_index: usize,
    permutation_index: usize,
    game_seed: u64,
    variant: String,
    extension: Option<&'static str>,
    rounds_played: u32,
    unresolved_tie: bool,
    seats: &'a [SeatResult],
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{0}")]
    Agent(#[from] AgentError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game execution failed: {0}")]
    Game(#[from] GameError),
    #[error("requested {requested} seat permutations exceeds maximum of {max}")]
    PermutationLimit { requested: usize, max: usize },
    #[error("permutation index {index} references invalid agent index {agent_index}")]
    InvalidPermutation { index: usize, agent_index: usize },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid parameter for agent '{name}': {message}")]
    InvalidParam { name: String, message: String },
}

struct AgentBlueprint {
    name: String,
    style: BotStyle,
    options: AgentOptions,
}

impl AgentBlueprint {
    fn from_configs(configs: &[AgentConfig]) -> Result<Vec<Self>, AgentError> {
        configs.iter().map(Self::from_config).collect()
    }

    fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        Ok(Self {
            name: config.name.clone(),
            style: config.style,
            options: AgentOptions::from_params(&config.name, &config.params)?,
        })
    }

    /// A fixed `seed` param pins the policy's randomness across games; otherwise
    /// it follows the game seed, offset by agent so equal styles differ.
    fn spawn_policy(&self, game_seed: u64, agent_idx: usize) -> Box<dyn Policy> {
        let seed = self
            .options
            .seed
            .unwrap_or(game_seed)
            .wrapping_add(agent_idx as u64);
        self.style.build(seed)
    }
}

#[derive(Debug, Default)]
struct AgentOptions {
    seed: Option<u64>,
}

impl AgentOptions {
    fn from_params(name: &str, params: &serde_yaml::Value) -> Result<Self, AgentError> {
        if params.is_null() {
            return Ok(Self::default());
        }

        let mapping = params
            .as_mapping()
            .ok_or_else(|| AgentError::InvalidParam {
                name: name.to_string(),
                message: "expected mapping for agent params".to_string(),
            })?;

        let mut options = Self::default();
        for (key, value) in mapping {
            match key.as_str() {
                Some("seed") => {
                    let seed = value.as_u64().ok_or_else(|| AgentError::InvalidParam {
                        name: name.to_string(),
                        message: "seed must be a non-negative integer".to_string(),
                    })?;
                    options.seed = Some(seed);
                }
                Some(other) => {
                    return Err(AgentError::InvalidParam {
                        name: name.to_string(),
                        message: format!("unknown parameter '{other}'"),
                    });
                }
                None => {
                    return Err(AgentError::InvalidParam {
                        name: name.to_string(),
                        message: "parameter keys must be strings".to_string(),
                    });
                }
            }
        }

        Ok(options)
    }
}
