use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::state_machine::ClockMatch;
use crate::types::*;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum MatchInput {
    Frame(HandFrame),
    Tick,
    Skip,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoggedInput {
    pub ts_ms: u64,
    pub input: MatchInput,
}

/// Every input a match saw, plus the rounds it produced, for deterministic replay.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchLog {
    pub seed: u64,
    pub config: GameConfig,
    pub inputs: Vec<LoggedInput>,
    pub rounds: Vec<RoundRecord>,
}

#[derive(Debug, Error)]
pub enum LogError {
    #[error("log i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("log is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl MatchLog {
    pub fn to_json(&self) -> Result<String, LogError> { Ok(serde_json::to_string(self)?) }
    pub fn from_json(s: &str) -> Result<Self, LogError> { Ok(serde_json::from_str(s)?) }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LogError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

pub fn load_log(path: impl AsRef<Path>) -> Result<MatchLog, LogError> {
    let content = fs::read_to_string(path)?;
    MatchLog::from_json(&content)
}

/// A [`ClockMatch`] that writes down every input it is fed.
#[derive(Clone, Debug)]
pub struct MatchRecorder {
    machine: ClockMatch,
    seed: u64,
    inputs: Vec<LoggedInput>,
}

impl MatchRecorder {
    pub fn new(mut config: GameConfig) -> Result<Self, ConfigError> {
        let seed = *config.seed.get_or_insert_with(rand::random);
        let machine = ClockMatch::new(config)?;
        Ok(Self { machine, seed, inputs: Vec::new() })
    }

    pub fn machine(&self) -> &ClockMatch { &self.machine }

    pub fn on_frame(&mut self, now_ms: u64, frame: &HandFrame) -> RoundOutcome {
        self.inputs.push(LoggedInput { ts_ms: now_ms, input: MatchInput::Frame(frame.clone()) });
        self.machine.on_frame(now_ms, frame)
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.inputs.push(LoggedInput { ts_ms: now_ms, input: MatchInput::Tick });
        self.machine.tick(now_ms)
    }

    pub fn skip_round(&mut self, now_ms: u64) -> bool {
        self.inputs.push(LoggedInput { ts_ms: now_ms, input: MatchInput::Skip });
        self.machine.skip_round(now_ms)
    }

    pub fn log(&self) -> MatchLog {
        MatchLog {
            seed: self.seed,
            config: self.machine.config.clone(),
            inputs: self.inputs.clone(),
            rounds: self.machine.round_results.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("logged config is invalid: {0}")]
    Config(#[from] ConfigError),
    #[error("expected {expected} rounds, replay produced {actual}")]
    RoundCount { expected: usize, actual: usize },
    #[error("round {round} differs from the log")]
    RoundMismatch { round: u32 },
}

pub fn replay_match(log: &MatchLog) -> Result<(), ReplayError> {
    let config = GameConfig { seed: Some(log.seed), ..log.config.clone() };
    let mut dm = ClockMatch::new(config)?;
    for logged in &log.inputs {
        match &logged.input {
            MatchInput::Frame(frame) => { dm.on_frame(logged.ts_ms, frame); }
            MatchInput::Tick => { dm.tick(logged.ts_ms); }
            MatchInput::Skip => { dm.skip_round(logged.ts_ms); }
        }
    }
    if dm.round_results.len() != log.rounds.len() {
        return Err(ReplayError::RoundCount { expected: log.rounds.len(), actual: dm.round_results.len() });
    }
    for (replayed, logged) in dm.round_results.iter().zip(&log.rounds) {
        if replayed != logged {
            return Err(ReplayError::RoundMismatch { round: logged.round });
        }
    }
    Ok(())
}
