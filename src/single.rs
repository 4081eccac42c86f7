//! Single-subject dashboard session: one reading, its stress score and a
//! rolling history, advanced by an external tick driver.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::generator::VitalsSource;
use crate::history::{self, HistoryBuffer, HistoryCadence, HistoryPoint};
use crate::stress;
use crate::vitals::VitalsSample;

pub const DEFAULT_START: VitalsSample = VitalsSample {
    heart_rate: 75.0,
    oxygen_level: 98.5,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleSnapshot {
    pub tick: u64,
    pub vitals: VitalsSample,
    pub stress_level: f32,
    pub history: Vec<HistoryPoint>,
}

pub struct SingleSession<S: VitalsSource> {
    cfg: SimConfig,
    source: S,
    clock: SimClock,
    cadence: HistoryCadence,
    vitals: VitalsSample,
    stress_level: f32,
    history: HistoryBuffer,
    ticks: u64,
}

impl<S: VitalsSource> SingleSession<S> {
    /// Starts from the resting reading with an empty history.
    pub fn new(cfg: SimConfig, source: S) -> Self {
        Self::starting_from(cfg, source, DEFAULT_START, SimClock::default())
    }

    pub fn starting_from(cfg: SimConfig, source: S, start: VitalsSample, clock: SimClock) -> Self {
        let vitals = VitalsSample::clamped(start.heart_rate, start.oxygen_level);
        Self {
            cadence: HistoryCadence::new(cfg.history_interval_ms),
            history: HistoryBuffer::new(cfg.history_capacity),
            stress_level: stress::score(&vitals),
            vitals,
            cfg,
            source,
            clock,
            ticks: 0,
        }
    }

    /// Starts from a randomized baseline with a back-filled history.
    pub fn seeded(cfg: SimConfig, mut source: S) -> Self {
        let clock = SimClock::default();
        let baseline = source.baseline();
        let (history, current) = history::seed_history(
            &mut source,
            baseline,
            cfg.seed_ticks,
            cfg.history_capacity,
            clock.now(),
            cfg.history_interval_ms,
        );
        let mut session = Self::starting_from(cfg, source, current, clock);
        session.history = history;
        session
    }

    pub fn tick(&mut self) -> SingleSnapshot {
        let tick_ms = self.cfg.tick_interval_ms;
        let now = self.clock.advance_ms(tick_ms);
        self.ticks += 1;

        self.vitals = self.source.advance(&self.vitals);
        self.stress_level = stress::score(&self.vitals);

        let recorded = self.cadence.on_tick(tick_ms);
        if recorded {
            self.history
                .record(HistoryPoint::with_stress(self.vitals, self.stress_level, now));
        }

        debug!(
            tick = self.ticks,
            heart_rate = self.vitals.heart_rate,
            oxygen = self.vitals.oxygen_level,
            stress = self.stress_level,
            recorded,
            "single tick"
        );

        self.snapshot()
    }

    pub fn snapshot(&self) -> SingleSnapshot {
        SingleSnapshot {
            tick: self.ticks,
            vitals: self.vitals,
            stress_level: self.stress_level,
            history: self.history.to_vec(),
        }
    }

    pub fn vitals(&self) -> VitalsSample {
        self.vitals
    }

    pub fn stress_level(&self) -> f32 {
        self.stress_level
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}
