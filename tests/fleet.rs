use std::collections::VecDeque;

use vitals_sim_core::alerts::AlertLog;
use vitals_sim_core::config::{self, SimConfig};
use vitals_sim_core::fleet::{self, FleetSession};
use vitals_sim_core::generator::{RandomWalk, VitalsSource, WalkCfg};
use vitals_sim_core::subject::{self, Role, Status, SubjectSeed};
use vitals_sim_core::vitals::VitalsSample;

/// Replays fixed readings; holds the last reading once the script runs out.
struct Scripted {
    script: VecDeque<VitalsSample>,
}

impl Scripted {
    // With oxygen at 98 the score reduces to `heart_rate - 70`.
    fn from_stress(levels: &[f32]) -> Self {
        Self {
            script: levels
                .iter()
                .map(|s| VitalsSample::clamped(70.0 + s, 98.0))
                .collect(),
        }
    }
}

impl VitalsSource for Scripted {
    fn advance(&mut self, current: &VitalsSample) -> VitalsSample {
        self.script.pop_front().unwrap_or(*current)
    }

    fn baseline(&mut self) -> VitalsSample {
        VitalsSample::clamped(75.0, 98.0)
    }
}

fn no_seed_cfg() -> SimConfig {
    SimConfig {
        seed_ticks: 0,
        ..SimConfig::default()
    }
}

fn lone_subject(stress: f32) -> Vec<SubjectSeed> {
    vec![SubjectSeed {
        id: 1,
        name: "Alex Doe",
        email: "user@example.com",
        role: Role::User,
        status: Status::Active,
        vitals: Some(VitalsSample::clamped(70.0 + stress, 98.0)),
        stress,
    }]
}

#[test]
fn crossing_is_edge_triggered() {
    let levels = [40.0, 45.0, 55.0, 58.0, 48.0, 62.0];
    let fired = levels
        .windows(2)
        .filter(|w| fleet::detect_crossing(w[0], w[1], 50.0))
        .count();
    assert_eq!(fired, 2);

    assert!(!fleet::detect_crossing(50.0, 50.0, 50.0));
    assert!(fleet::detect_crossing(50.0, 50.1, 50.0));
    assert!(!fleet::detect_crossing(51.0, 80.0, 50.0));
}

#[test]
fn session_emits_one_alert_per_crossing() {
    let source = Scripted::from_stress(&[45.0, 55.0, 58.0, 48.0, 62.0]);
    let mut session = FleetSession::with_roster(no_seed_cfg(), source, lone_subject(40.0));
    let mut log = AlertLog::new();

    let crossings: Vec<usize> = (0..5).map(|_| session.tick(&mut log).crossings).collect();

    assert_eq!(crossings, vec![0, 1, 0, 0, 1]);
    assert_eq!(log.len(), 2);
    assert_eq!(log.unread_count(), 2);
    assert!(log.events().iter().all(|e| e.subject.id == 1));
    assert!((log.events()[0].stress_level - 55.0).abs() < 1e-3);
    assert!((log.events()[1].stress_level - 62.0).abs() < 1e-3);
}

#[test]
fn sustained_high_stress_alerts_once() {
    let source = Scripted::from_stress(&[60.0, 70.0, 80.0, 75.0, 65.0]);
    let mut session = FleetSession::with_roster(no_seed_cfg(), source, lone_subject(10.0));
    let mut log = AlertLog::new();
    for _ in 0..10 {
        session.tick(&mut log);
    }
    assert_eq!(log.len(), 1);
}

#[test]
fn roster_average_excludes_inactive() {
    let walk = RandomWalk::seeded(1, WalkCfg::default());
    let session = FleetSession::with_roster(SimConfig::default(), walk, subject::default_roster());
    let stats = session.stats();

    assert_eq!(stats.total_subjects, 6);
    assert_eq!(stats.active_subjects, 5);
    let expected = (10.0 + 25.0 + 8.0 + 75.0 + 5.0) / 5.0;
    assert!((stats.average_stress - expected).abs() < 1e-4, "got {}", stats.average_stress);
}

#[test]
fn inactive_subject_is_frozen() {
    let walk = RandomWalk::seeded(2, WalkCfg::default());
    let mut session = FleetSession::with_roster(SimConfig::default(), walk, subject::default_roster());
    assert!(session.set_status(1, Status::Inactive));

    let bob = session.subject(4).cloned();
    let alex = session.subject(1).cloned();
    let mut log = AlertLog::new();
    for _ in 0..10 {
        session.tick(&mut log);
    }

    assert_eq!(session.subject(4).cloned(), bob);
    assert_eq!(session.subject(1).cloned(), alex);
    assert!(log.events().iter().all(|e| e.subject.id != 1 && e.subject.id != 4));
}

#[test]
fn active_subjects_stay_in_bounds() {
    let walk = RandomWalk::seeded(3, WalkCfg::with_excursion_p(0.9));
    let mut session = FleetSession::with_roster(SimConfig::default(), walk, subject::default_roster());
    let mut log = AlertLog::new();
    for _ in 0..2_000 {
        let snap = session.tick(&mut log);
        for s in snap.subjects.iter().filter(|s| s.is_active()) {
            let v = s.current_vitals.expect("active roster subjects have vitals");
            assert!(v.in_bounds());
            let stress = s.current_stress.unwrap_or(-1.0);
            assert!((0.0..=100.0).contains(&stress));
        }
    }
}

#[test]
fn history_follows_the_slower_cadence() {
    let cfg = SimConfig {
        history_interval_ms: 6_000,
        ..no_seed_cfg()
    };
    let walk = RandomWalk::seeded(4, WalkCfg::default());
    let mut session = FleetSession::with_roster(cfg, walk, subject::default_roster());
    let mut log = AlertLog::new();

    for _ in 0..9 {
        session.tick(&mut log);
    }

    for s in session.subjects() {
        let expected = if s.is_active() { 3 } else { 0 };
        assert_eq!(s.history.len(), expected, "subject {}", s.id);
    }
}

#[test]
fn history_is_bounded_by_capacity() {
    let cfg = SimConfig {
        history_interval_ms: 2_000,
        history_capacity: 5,
        ..SimConfig::default()
    };
    let walk = RandomWalk::seeded(8, WalkCfg::default());
    let mut session = FleetSession::with_roster(cfg, walk, subject::default_roster());
    let mut log = AlertLog::new();
    for _ in 0..40 {
        session.tick(&mut log);
    }
    assert!(session.subjects().iter().all(|s| s.history.len() <= 5));
    assert_eq!(session.subject(2).map(|s| s.history.len()), Some(5));
}

#[test]
fn roster_history_is_seeded() {
    let walk = RandomWalk::seeded(5, WalkCfg::default());
    let session = FleetSession::with_roster(SimConfig::default(), walk, subject::default_roster());
    assert_eq!(session.subject(1).map(|s| s.history.len()), Some(20));
    assert_eq!(session.subject(4).map(|s| s.history.len()), Some(0));
    assert_eq!(session.subject(4).and_then(|s| s.current_vitals), None);

    let alice = session.subject(5).expect("roster has Alice");
    let last = alice.history.latest().expect("seeded history");
    assert_eq!(Some(last.vitals), alice.current_vitals);
    assert_eq!(Some(last.stress_level), alice.current_stress);
    assert_eq!(last.timestamp, "09:00:00");

    let labels: Vec<&str> = alice.history.iter().map(|p| p.timestamp.as_str()).collect();
    assert_eq!(labels[labels.len() - 2], "08:50:00");
}

#[test]
fn add_subject_rejects_duplicate_ids() {
    let walk = RandomWalk::seeded(6, WalkCfg::default());
    let mut session = FleetSession::with_roster(SimConfig::default(), walk, subject::default_roster());

    assert!(session.add_subject(3, "Dup", "dup@example.com", Role::User).is_none());

    let added = session
        .add_subject(7, "Dana Lee", "dana@example.com", Role::User)
        .cloned()
        .expect("fresh id is accepted");
    assert_eq!(added.status, Status::Active);
    assert_eq!(added.history.len(), 20);
    let v = added.current_vitals.expect("seeded vitals");
    assert!(v.in_bounds());
    assert_eq!(added.history.latest().map(|p| p.vitals), Some(v));
    assert_eq!(session.stats().total_subjects, 7);
    assert_eq!(session.stats().active_subjects, 6);
}

#[test]
fn reactivating_without_vitals_assigns_a_baseline() {
    let walk = RandomWalk::seeded(9, WalkCfg::default());
    let mut session = FleetSession::with_roster(SimConfig::default(), walk, subject::default_roster());

    assert!(session.set_status(4, Status::Active));
    let bob = session.subject(4).cloned().expect("bob exists");
    let v = bob.current_vitals.expect("baseline assigned");
    assert!((70.0..=90.0).contains(&v.heart_rate));
    assert!(bob.current_stress.is_some());
    assert_eq!(session.stats().active_subjects, 6);

    assert!(!session.set_status(42, Status::Active));
}

#[test]
fn no_active_subjects_average_zero() {
    let walk = RandomWalk::seeded(10, WalkCfg::default());
    let mut session = FleetSession::with_roster(SimConfig::default(), walk, subject::default_roster());
    for id in 1..=6 {
        session.set_status(id, Status::Inactive);
    }
    let mut log = AlertLog::new();
    let snap = session.tick(&mut log);
    assert_eq!(snap.stats.active_subjects, 0);
    assert_eq!(snap.stats.average_stress, 0.0);
    assert_eq!(snap.stats.total_subjects, 6);
}

#[test]
fn largest_valid_timing_runs_without_overflow() {
    let cfg = SimConfig {
        tick_interval_ms: config::MAX_INTERVAL_MS,
        history_interval_ms: config::MAX_INTERVAL_MS,
        history_capacity: 3_650,
        seed_ticks: 3_650,
        ..SimConfig::default()
    };
    cfg.validate().expect("limits are inclusive");

    let walk = RandomWalk::seeded(12, WalkCfg::default());
    let mut session = FleetSession::with_roster(cfg, walk, subject::default_roster());
    let mut log = AlertLog::new();
    for _ in 0..5 {
        session.tick(&mut log);
    }
    assert_eq!(session.subject(1).map(|s| s.history.len()), Some(3_650));
}
