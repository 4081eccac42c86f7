use chrono::NaiveDate;

use vitals_sim_core::clock::SimClock;
use vitals_sim_core::generator::{RandomWalk, WalkCfg};
use vitals_sim_core::history::{self, HistoryBuffer, HistoryPoint};
use vitals_sim_core::vitals::VitalsSample;

fn point(hr: f32, clock: &mut SimClock) -> HistoryPoint {
    let at = clock.advance_ms(2_000);
    HistoryPoint::new(VitalsSample::clamped(hr, 98.0), at)
}

#[test]
fn length_never_exceeds_capacity() {
    let mut clock = SimClock::default();
    let mut buffer = HistoryBuffer::new(30);
    for i in 0..100 {
        buffer.record(point(60.0 + i as f32 % 90.0, &mut clock));
        assert!(buffer.len() <= 30);
    }
    assert_eq!(buffer.len(), 30);
}

#[test]
fn overflow_evicts_oldest_and_keeps_order() {
    let mut clock = SimClock::default();
    let mut buffer = HistoryBuffer::new(30);
    let points: Vec<HistoryPoint> = (0..31).map(|i| point(60.0 + i as f32, &mut clock)).collect();

    let mut evicted = Vec::new();
    for p in points.iter().cloned() {
        if let Some(old) = buffer.record(p) {
            evicted.push(old);
        }
    }

    assert_eq!(evicted, vec![points[0].clone()]);
    assert!(!buffer.iter().any(|p| *p == points[0]));
    assert_eq!(buffer.to_vec(), points[1..].to_vec());
    assert_eq!(buffer.latest(), points.last());
}

#[test]
fn zero_capacity_is_treated_as_one() {
    let mut clock = SimClock::default();
    let mut buffer = HistoryBuffer::new(0);
    buffer.record(point(70.0, &mut clock));
    buffer.record(point(71.0, &mut clock));
    assert_eq!(buffer.capacity(), 1);
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.latest().map(|p| p.vitals.heart_rate), Some(71.0));
}

#[test]
fn point_carries_stress_and_label() {
    let at = NaiveDate::from_ymd_opt(2024, 7, 28)
        .and_then(|d| d.and_hms_opt(14, 3, 9))
        .unwrap();
    let p = HistoryPoint::new(VitalsSample::clamped(140.0, 92.0), at);
    assert_eq!(p.timestamp, "14:03:09");
    assert!((p.stress_level - 100.0).abs() < 1e-3);
}

#[test]
fn seeding_fills_below_capacity_and_ends_at_start() {
    let mut walk = RandomWalk::seeded(5, WalkCfg::default());
    let end = SimClock::default().now();
    let baseline = VitalsSample::clamped(80.0, 97.0);

    let (buffer, last) = history::seed_history(&mut walk, baseline, 3, 30, end, 600_000);

    assert_eq!(buffer.len(), 3);
    let labels: Vec<&str> = buffer.iter().map(|p| p.timestamp.as_str()).collect();
    assert_eq!(labels, vec!["08:40:00", "08:50:00", "09:00:00"]);
    assert_eq!(buffer.iter().next().map(|p| p.vitals), Some(baseline));
    assert_eq!(buffer.latest().map(|p| p.vitals), Some(last));
    assert!(buffer.iter().all(|p| p.vitals.in_bounds()));
}

#[test]
fn seeding_stays_strictly_below_capacity() {
    let mut walk = RandomWalk::seeded(6, WalkCfg::default());
    let end = SimClock::default().now();
    let (buffer, _) =
        history::seed_history(&mut walk, VitalsSample::clamped(75.0, 98.0), 500, 30, end, 2_000);
    assert_eq!(buffer.len(), 29);
}

#[test]
fn recorded_stress_is_chronological() {
    let mut clock = SimClock::default();
    let mut buffer = HistoryBuffer::new(5);
    for hr in [70.0, 105.0, 140.0] {
        buffer.record(point(hr, &mut clock));
    }
    let series: Vec<f32> = buffer.iter().map(|p| p.stress_level).collect();
    assert_eq!(series.len(), 3);
    assert!(series.windows(2).all(|w| w[0] < w[1]));
}
