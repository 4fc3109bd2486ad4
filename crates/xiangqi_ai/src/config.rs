//! Search configuration, loadable from TOML.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use mcts_engine::{MctsParams, PlayoutParams};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Strategy of the last search phase, once no forced line was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    Mcts,
    AlphaBeta,
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mcts" => Ok(Strategy::Mcts),
            "alpha-beta" | "alphabeta" => Ok(Strategy::AlphaBeta),
            other => Err(ConfigError::Invalid(format!("unknown strategy '{other}'"))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Mcts => write!(f, "mcts"),
            Strategy::AlphaBeta => write!(f, "alpha-beta"),
        }
    }
}

/// Budgets and tunables of one AI move decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Total budget of a move decision
    pub total_time_ms: u64,
    pub check_escape_time_ms: u64,
    pub mate_time_ms: u64,
    /// Deepest mate-in-N tried; mate in one is always tried first
    pub max_mate_depth: u32,
    pub strategy: Strategy,
    pub exploration: f64,
    pub distance_weight: f64,
    pub playout_plies: u32,
    pub greedy_playout_rate: f64,
    pub alpha_beta_depth: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let mcts = MctsParams::default();
        Self {
            total_time_ms: 180_000,
            check_escape_time_ms: 20_000,
            mate_time_ms: 80_000,
            max_mate_depth: 2,
            strategy: Strategy::Mcts,
            exploration: mcts.exploration,
            distance_weight: mcts.distance_weight,
            playout_plies: mcts.playout.max_plies,
            greedy_playout_rate: mcts.playout.greedy_rate,
            alpha_beta_depth: 4,
            max_iterations: None,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Parses and validates a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_mate_depth == 0 {
            return Err(ConfigError::Invalid("max_mate_depth must be at least 1".into()));
        }
        if !(self.exploration.is_finite() && self.exploration >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            )));
        }
        if !self.distance_weight.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "distance_weight must be finite, got {}",
                self.distance_weight
            )));
        }
        if !(0.0..=1.0).contains(&self.greedy_playout_rate) {
            return Err(ConfigError::Invalid(format!(
                "greedy_playout_rate must lie in [0, 1], got {}",
                self.greedy_playout_rate
            )));
        }
        if self.alpha_beta_depth == 0 {
            return Err(ConfigError::Invalid("alpha_beta_depth must be at least 1".into()));
        }
        Ok(())
    }

    pub fn total_time(&self) -> Duration {
        Duration::from_millis(self.total_time_ms)
    }

    pub fn check_escape_time(&self) -> Duration {
        Duration::from_millis(self.check_escape_time_ms)
    }

    pub fn mate_time(&self) -> Duration {
        Duration::from_millis(self.mate_time_ms)
    }

    pub fn mcts_params(&self) -> MctsParams {
        MctsParams {
            exploration: self.exploration,
            distance_weight: self.distance_weight,
            playout: PlayoutParams {
                max_plies: self.playout_plies,
                greedy_rate: self.greedy_playout_rate,
            },
        }
    }

    /// Changes one option by its protocol name. Returns false for unknown
    /// names and for values that do not parse or would be invalid; the
    /// config is left unchanged in that case.
    pub fn set_option(&mut self, name: &str, value: &str) -> bool {
        let mut next = self.clone();
        let parsed = match name {
            "TotalTime" => value.parse().map(|ms| next.total_time_ms = ms).is_ok(),
            "MateDepth" => value.parse().map(|n| next.max_mate_depth = n).is_ok(),
            "Strategy" => value.parse().map(|s| next.strategy = s).is_ok(),
            "Exploration" => value.parse().map(|c| next.exploration = c).is_ok(),
            "Seed" => value.parse().map(|s| next.seed = Some(s)).is_ok(),
            _ => false,
        };
        if !parsed || next.validate().is_err() {
            return false;
        }
        *self = next;
        true
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
