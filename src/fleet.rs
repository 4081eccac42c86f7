//! Multi-subject (admin) session.
//!
//! Owns every [`Subject`] and its history. Each tick advances active subjects,
//! reports rising-edge threshold crossings to an [`AlertSink`], appends history
//! on the configured cadence and recomputes [`FleetStats`]. Inactive subjects
//! are never touched.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::alerts::AlertSink;
use crate::clock::{self, SimClock};
use crate::config::SimConfig;
use crate::generator::VitalsSource;
use crate::history::{self, HistoryCadence, HistoryPoint};
use crate::stress;
use crate::subject::{Role, Status, Subject, SubjectId, SubjectSeed};

/// True only on the transition from `<= threshold` to `> threshold`.
pub fn detect_crossing(prev_stress: f32, new_stress: f32, threshold: f32) -> bool {
    prev_stress <= threshold && new_stress > threshold
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FleetStats {
    pub total_subjects: usize,
    pub active_subjects: usize,
    pub average_stress: f32,
}

/// Average is over active subjects only; 0 when none are active.
pub fn fleet_stats(subjects: &[Subject]) -> FleetStats {
    let active: Vec<&Subject> = subjects.iter().filter(|s| s.is_active()).collect();
    let total_stress: f32 = active.iter().map(|s| s.current_stress.unwrap_or(0.0)).sum();
    let average_stress = if active.is_empty() {
        0.0
    } else {
        total_stress / active.len() as f32
    };

    FleetStats {
        total_subjects: subjects.len(),
        active_subjects: active.len(),
        average_stress,
    }
}

#[derive(Debug, Clone)]
pub struct FleetSnapshot {
    pub tick: u64,
    pub at: NaiveDateTime,
    pub subjects: Vec<Subject>,
    pub stats: FleetStats,
    pub crossings: usize,
}

pub struct FleetSession<S: VitalsSource> {
    cfg: SimConfig,
    source: S,
    clock: SimClock,
    cadence: HistoryCadence,
    subjects: Vec<Subject>,
    stats: FleetStats,
    ticks: u64,
}

impl<S: VitalsSource> FleetSession<S> {
    pub fn new(cfg: SimConfig, source: S) -> Self {
        Self::with_clock(cfg, source, SimClock::default())
    }

    pub fn with_clock(cfg: SimConfig, source: S, clock: SimClock) -> Self {
        let cadence = HistoryCadence::new(cfg.history_interval_ms);
        Self {
            cfg,
            source,
            clock,
            cadence,
            subjects: Vec::new(),
            stats: FleetStats::default(),
            ticks: 0,
        }
    }

    /// Build a session from roster entries. Entries with vitals get a
    /// synthetic back-filled history that ends on their given reading, stamped
    /// at the session's current time.
    pub fn with_roster(cfg: SimConfig, source: S, roster: Vec<SubjectSeed>) -> Self {
        let mut session = Self::new(cfg, source);
        for seed in roster {
            let mut subject = Subject::new(
                seed.id,
                seed.name,
                seed.email,
                seed.role,
                session.cfg.history_capacity,
            );
            subject.status = seed.status;
            if let Some(vitals) = seed.vitals {
                let now = session.clock.now();
                let interval_ms = session.cfg.history_interval_ms;
                if session.cfg.seed_ticks > 0 {
                    let baseline = session.source.baseline();
                    let (mut buffer, _) = history::seed_history(
                        &mut session.source,
                        baseline,
                        session.cfg.seed_ticks - 1,
                        session.cfg.history_capacity,
                        clock::rewind_ms(now, interval_ms),
                        interval_ms,
                    );
                    buffer.record(HistoryPoint::with_stress(vitals, seed.stress, now));
                    subject.history = buffer;
                }
                subject.current_vitals = Some(vitals);
                subject.current_stress = Some(seed.stress);
            }
            session.subjects.push(subject);
        }
        session.stats = fleet_stats(&session.subjects);
        session
    }

    /// Adds an active subject with a randomized baseline and seeded history.
    /// Returns `None` when `id` is already taken.
    pub fn add_subject(
        &mut self,
        id: SubjectId,
        name: &str,
        email: &str,
        role: Role,
    ) -> Option<&Subject> {
        if self.subjects.iter().any(|s| s.id == id) {
            return None;
        }

        let mut subject = Subject::new(id, name, email, role, self.cfg.history_capacity);
        let baseline = self.source.baseline();
        let (buffer, current) = history::seed_history(
            &mut self.source,
            baseline,
            self.cfg.seed_ticks,
            self.cfg.history_capacity,
            self.clock.now(),
            self.cfg.history_interval_ms,
        );
        subject.history = buffer;
        subject.current_vitals = Some(current);
        subject.current_stress = Some(stress::score(&current));

        info!(subject = id, name, "subject added");
        self.subjects.push(subject);
        self.stats = fleet_stats(&self.subjects);
        self.subjects.last()
    }

    /// Returns `false` when no subject has `id`.
    pub fn set_status(&mut self, id: SubjectId, status: Status) -> bool {
        let Some(idx) = self.subjects.iter().position(|s| s.id == id) else {
            return false;
        };

        if status == Status::Active && self.subjects[idx].current_vitals.is_none() {
            let baseline = self.source.baseline();
            let subject = &mut self.subjects[idx];
            subject.current_vitals = Some(baseline);
            subject.current_stress = Some(stress::score(&baseline));
        }
        self.subjects[idx].status = status;
        info!(subject = id, ?status, "subject status changed");

        self.stats = fleet_stats(&self.subjects);
        true
    }

    pub fn tick<A: AlertSink + ?Sized>(&mut self, sink: &mut A) -> FleetSnapshot {
        let tick_ms = self.cfg.tick_interval_ms;
        let threshold = self.cfg.stress_threshold;
        let now = self.clock.advance_ms(tick_ms);
        let record = self.cadence.on_tick(tick_ms);
        self.ticks += 1;

        let mut crossings = 0;
        for subject in self.subjects.iter_mut().filter(|s| s.is_active()) {
            let Some(current) = subject.current_vitals else {
                continue;
            };

            let next = self.source.advance(&current);
            let stress = stress::score(&next);
            let prev = subject.current_stress.unwrap_or(0.0);
            subject.current_vitals = Some(next);
            subject.current_stress = Some(stress);

            if detect_crossing(prev, stress, threshold) {
                crossings += 1;
                sink.on_crossing(subject.to_ref(), stress, now);
            }
            if record {
                subject.history.record(HistoryPoint::with_stress(next, stress, now));
            }
        }

        self.stats = fleet_stats(&self.subjects);
        if record {
            info!(
                tick = self.ticks,
                at = %clock::history_label(now),
                subjects = self.stats.active_subjects,
                "history recorded"
            );
        }
        debug!(
            tick = self.ticks,
            active = self.stats.active_subjects,
            avg_stress = self.stats.average_stress,
            recorded = record,
            crossings,
            "fleet tick"
        );

        let mut snap = self.snapshot();
        snap.crossings = crossings;
        snap
    }

    pub fn snapshot(&self) -> FleetSnapshot {
        FleetSnapshot {
            tick: self.ticks,
            at: self.clock.now(),
            subjects: self.subjects.clone(),
            stats: self.stats,
            crossings: 0,
        }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn stats(&self) -> FleetStats {
        self.stats
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
