use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::generator::WalkCfg;

pub const ENV_TICK_MS: &str = "VITALS_TICK_MS";
pub const ENV_HISTORY_MS: &str = "VITALS_HISTORY_MS";
pub const ENV_HISTORY_CAPACITY: &str = "VITALS_HISTORY_CAPACITY";
pub const ENV_SEED_TICKS: &str = "VITALS_SEED_TICKS";
pub const ENV_THRESHOLD: &str = "VITALS_THRESHOLD";
pub const ENV_EXCURSION_P: &str = "VITALS_EXCURSION_P";
pub const ENV_SEED: &str = "VITALS_SEED";

/// Longest accepted tick or history interval: one day.
pub const MAX_INTERVAL_MS: u64 = 86_400_000;
/// Longest time window a full history buffer may cover: about ten years.
pub const MAX_HISTORY_SPAN_MS: u64 = 3_650 * MAX_INTERVAL_MS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub tick_interval_ms: u64,
    pub history_interval_ms: u64,
    pub history_capacity: usize,
    /// Synthetic points back-filled into a new subject's history.
    pub seed_ticks: usize,
    pub stress_threshold: f32,
    pub excursion_probability: f32,
    pub rng_seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2_000,
            history_interval_ms: 600_000,
            history_capacity: 30,
            seed_ticks: 20,
            stress_threshold: 50.0,
            excursion_probability: 0.2,
            rng_seed: None,
        }
    }
}

impl SimConfig {
    /// Single-user dashboard: one history point per tick.
    pub fn single_subject() -> Self {
        let base = Self::default();
        Self {
            history_interval_ms: base.tick_interval_ms,
            ..base
        }
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn walk_cfg(&self) -> WalkCfg {
        WalkCfg::with_excursion_p(self.excursion_probability)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        if self.tick_interval_ms > MAX_INTERVAL_MS {
            return Err(ConfigError::IntervalTooLarge {
                key: "tick_interval_ms",
                ms: self.tick_interval_ms,
                max_ms: MAX_INTERVAL_MS,
            });
        }
        if self.history_interval_ms > MAX_INTERVAL_MS {
            return Err(ConfigError::IntervalTooLarge {
                key: "history_interval_ms",
                ms: self.history_interval_ms,
                max_ms: MAX_INTERVAL_MS,
            });
        }
        let span = u64::try_from(self.history_capacity)
            .ok()
            .and_then(|cap| cap.checked_mul(self.history_interval_ms));
        if span.is_none_or(|ms| ms > MAX_HISTORY_SPAN_MS) {
            return Err(ConfigError::HistorySpanTooLarge {
                history_ms: self.history_interval_ms,
                capacity: self.history_capacity,
                max_ms: MAX_HISTORY_SPAN_MS,
            });
        }
        if self.history_interval_ms < self.tick_interval_ms {
            return Err(ConfigError::HistoryFasterThanTick {
                history_ms: self.history_interval_ms,
                tick_ms: self.tick_interval_ms,
            });
        }
        if !(0.0..=1.0).contains(&self.excursion_probability) {
            return Err(ConfigError::ExcursionProbability(self.excursion_probability));
        }
        if !(0.0..=100.0).contains(&self.stress_threshold) {
            return Err(ConfigError::Threshold(self.stress_threshold));
        }
        Ok(())
    }

    /// Overlay `VITALS_*` variables from the process environment.
    pub fn from_env(base: SimConfig) -> Result<Self, ConfigError> {
        Self::from_lookup(base, |key| env::var(key).ok())
    }

    /// Overlay values produced by `lookup`, then validate.
    pub fn from_lookup<F>(base: SimConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = base;

        if let Some(v) = parse_key(&lookup, ENV_TICK_MS)? {
            cfg.tick_interval_ms = v;
        }
        if let Some(v) = parse_key(&lookup, ENV_HISTORY_MS)? {
            cfg.history_interval_ms = v;
        }
        if let Some(v) = parse_key(&lookup, ENV_HISTORY_CAPACITY)? {
            cfg.history_capacity = v;
        }
        if let Some(v) = parse_key(&lookup, ENV_SEED_TICKS)? {
            cfg.seed_ticks = v;
        }
        if let Some(v) = parse_key(&lookup, ENV_THRESHOLD)? {
            cfg.stress_threshold = v;
        }
        if let Some(v) = parse_key(&lookup, ENV_EXCURSION_P)? {
            cfg.excursion_probability = v;
        }
        if let Some(v) = parse_key(&lookup, ENV_SEED)? {
            cfg.rng_seed = Some(v);
        }

        if let Err(err) = cfg.validate() {
            warn!(%err, "configuration overrides rejected");
            return Err(err);
        }
        debug!(?cfg, "configuration resolved");
        Ok(cfg)
    }
}

fn parse_key<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse() {
        Ok(v) => Ok(Some(v)),
        Err(_) => {
            warn!(key, value = %raw, "unparsable configuration override");
            Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            })
        }
    }
}
