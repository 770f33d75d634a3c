use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Policy;

pub const WIN_POINTS: u32 = 10;
pub const TASK_POOL_SIZE: usize = 120;
pub const MINUTE_TOLERANCE: u8 = 2;
pub const FIRST_TO_SOLVE_DELAY_MS: u64 = 900;
pub const COOPERATIVE_DELAY_MS: u64 = 1200;
pub const PLAYER_SPLIT_X: f32 = 0.5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("win_points must be at least 1")]
    WinPoints,
    #[error("pool_size must be at least 1")]
    PoolSize,
    #[error("split_x {0} must lie strictly between 0 and 1")]
    SplitX(f32),
}

/// How the next target is drawn.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TargetDraw {
    /// Pop from a pre-drawn pool, refilled with `pool_size` draws when empty.
    Pool,
    /// Fresh uniform draw every round.
    Direct,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub policy: Policy,
    pub draw: TargetDraw,
    pub seed: Option<u64>,
    pub win_points: u32,
    pub pool_size: usize,
    pub minute_tolerance: u8,
    pub first_to_solve_delay_ms: u64,
    pub cooperative_delay_ms: u64,
    pub split_x: f32,
}

impl Default for GameConfig {
    fn default() -> Self { Self::first_to_solve() }
}

impl GameConfig {
    pub fn first_to_solve() -> Self {
        Self {
            policy: Policy::FirstToSolve,
            draw: TargetDraw::Pool,
            seed: None,
            win_points: WIN_POINTS,
            pool_size: TASK_POOL_SIZE,
            minute_tolerance: MINUTE_TOLERANCE,
            first_to_solve_delay_ms: FIRST_TO_SOLVE_DELAY_MS,
            cooperative_delay_ms: COOPERATIVE_DELAY_MS,
            split_x: PLAYER_SPLIT_X,
        }
    }

    pub fn cooperative() -> Self {
        Self { policy: Policy::Cooperative, draw: TargetDraw::Direct, ..Self::first_to_solve() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pause between a resolved round and the next target.
    pub fn transition_delay_ms(&self) -> u64 {
        match self.policy {
            Policy::FirstToSolve => self.first_to_solve_delay_ms,
            Policy::Cooperative => self.cooperative_delay_ms,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_points == 0 { return Err(ConfigError::WinPoints); }
        if self.pool_size == 0 { return Err(ConfigError::PoolSize); }
        if !(self.split_x > 0.0 && self.split_x < 1.0) { return Err(ConfigError::SplitX(self.split_x)); }
        Ok(())
    }

    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        let a = GameConfig::first_to_solve();
        assert_eq!(a.draw, TargetDraw::Pool);
        assert_eq!(a.transition_delay_ms(), 900);
        let b = GameConfig::cooperative();
        assert_eq!(b.draw, TargetDraw::Direct);
        assert_eq!(b.transition_delay_ms(), 1200);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg = GameConfig::from_json(r#"{ "win_points": 3, "seed": 7 }"#).unwrap();
        assert_eq!(cfg.win_points, 3);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.pool_size, TASK_POOL_SIZE);
        assert_eq!(cfg.policy, Policy::FirstToSolve);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(GameConfig::from_json(r#"{ "pool_size": 0 }"#), Err(ConfigError::PoolSize)));
        assert!(matches!(GameConfig::from_json(r#"{ "win_points": 0 }"#), Err(ConfigError::WinPoints)));
        assert!(matches!(GameConfig::from_json(r#"{ "split_x": 1.5 }"#), Err(ConfigError::SplitX(_))));
        assert!(matches!(GameConfig::from_json("not json"), Err(ConfigError::Parse(_))));
    }
}
