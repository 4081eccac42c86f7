use thiserror::Error;

/// Configuration is the only fallible surface; the simulation itself is total.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("history capacity must be greater than zero")]
    ZeroHistoryCapacity,

    #[error("history interval {history_ms}ms is shorter than the tick interval {tick_ms}ms")]
    HistoryFasterThanTick { history_ms: u64, tick_ms: u64 },

    #[error("{key} of {ms}ms exceeds the {max_ms}ms limit")]
    IntervalTooLarge { key: &'static str, ms: u64, max_ms: u64 },

    #[error("history span of {capacity} points every {history_ms}ms exceeds the {max_ms}ms limit")]
    HistorySpanTooLarge {
        history_ms: u64,
        capacity: usize,
        max_ms: u64,
    },

    #[error("excursion probability {0} is outside 0..=1")]
    ExcursionProbability(f32),

    #[error("stress threshold {0} is outside 0..=100")]
    Threshold(f32),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}
