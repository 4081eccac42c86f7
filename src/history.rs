//! Fixed-capacity rolling history of vitals + stress.
//!
//! Law: after any sequence of `record` calls the buffer holds the most recent
//! `min(n, capacity)` points in append order. The oldest point leaves first.

use std::collections::VecDeque;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::generator::VitalsSource;
use crate::stress;
use crate::vitals::VitalsSample;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: String,
    pub vitals: VitalsSample,
    pub stress_level: f32,
}

impl HistoryPoint {
    pub fn new(vitals: VitalsSample, at: NaiveDateTime) -> Self {
        Self::with_stress(vitals, stress::score(&vitals), at)
    }

    pub fn with_stress(vitals: VitalsSample, stress_level: f32, at: NaiveDateTime) -> Self {
        Self {
            timestamp: clock::history_label(at),
            vitals,
            stress_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer {
    points: VecDeque<HistoryPoint>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `point`, returning whatever fell off the front.
    pub fn record(&mut self, point: HistoryPoint) -> Option<HistoryPoint> {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front()
        } else {
            None
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }

    /// Oldest first.
    pub fn to_vec(&self) -> Vec<HistoryPoint> {
        self.points.iter().cloned().collect()
    }
}

/// Decides on which ticks a history point is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCadence {
    pub interval_ms: u64,
    since_last_ms: u64,
}

impl HistoryCadence {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            since_last_ms: 0,
        }
    }

    pub fn on_tick(&mut self, tick_ms: u64) -> bool {
        self.since_last_ms = self.since_last_ms.saturating_add(tick_ms);
        if self.since_last_ms >= self.interval_ms {
            self.since_last_ms -= self.interval_ms;
            true
        } else {
            false
        }
    }
}

/// Synthetic back-fill so a chart is non-empty at startup.
///
/// Runs `source` offline from `baseline` for at most `capacity - 1` steps,
/// stamping points `interval_ms` apart and ending at `end`. Returns the
/// buffer and the last sample of the trajectory.
pub fn seed_history<S: VitalsSource + ?Sized>(
    source: &mut S,
    baseline: VitalsSample,
    ticks: usize,
    capacity: usize,
    end: NaiveDateTime,
    interval_ms: u64,
) -> (HistoryBuffer, VitalsSample) {
    let mut buffer = HistoryBuffer::new(capacity);
    let ticks = ticks.min(buffer.capacity() - 1);

    let mut current = baseline;
    for i in 0..ticks {
        if i > 0 {
            current = source.advance(&current);
        }
        let back = (ticks - 1 - i) as u64;
        let at = clock::rewind_ms(end, interval_ms.saturating_mul(back));
        buffer.record(HistoryPoint::new(current, at));
    }

    (buffer, current)
}
