//! Bounded random walk that drives simulated vitals.
//!
//! Each tick either takes a "stress excursion" (heart rate pushed up, oxygen
//! pushed down) or drifts back toward the resting band. The result is always
//! clamped into the physiological window.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::vitals::VitalsSample;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkCfg {
    pub excursion_p: f32,
    pub hr_jitter: f32,
    pub o2_jitter: f32,
    pub hr_boost: f32,
    pub o2_penalty: f32,
    pub hr_high: f32,
    pub hr_low: f32,
    pub hr_pull: f32,
    pub o2_floor: f32,
    pub o2_pull: f32,
}

impl Default for WalkCfg {
    fn default() -> Self {
        Self {
            excursion_p: 0.2,
            hr_jitter: 2.0,
            o2_jitter: 0.1,
            hr_boost: 5.0,
            o2_penalty: 0.3,
            hr_high: 80.0,
            hr_low: 70.0,
            hr_pull: 2.0,
            o2_floor: 98.0,
            o2_pull: 0.2,
        }
    }
}

impl WalkCfg {
    pub fn with_excursion_p(excursion_p: f32) -> Self {
        Self {
            excursion_p,
            ..Self::default()
        }
        .sanitized()
    }

    /// Probabilities into 0..=1, magnitudes non-negative.
    pub fn sanitized(mut self) -> Self {
        self.excursion_p = if self.excursion_p.is_nan() {
            0.0
        } else {
            self.excursion_p.clamp(0.0, 1.0)
        };
        self.hr_jitter = self.hr_jitter.abs();
        self.o2_jitter = self.o2_jitter.abs();
        self.hr_boost = self.hr_boost.abs();
        self.o2_penalty = self.o2_penalty.abs();
        self.hr_pull = self.hr_pull.abs();
        self.o2_pull = self.o2_pull.abs();
        self
    }
}

/// Advance `current` by one tick. Pure apart from the draws taken from `rng`.
pub fn step<R: Rng + ?Sized>(rng: &mut R, current: &VitalsSample, cfg: &WalkCfg) -> VitalsSample {
    let cfg = cfg.sanitized();
    let excursion = rng.gen_bool(f64::from(cfg.excursion_p));

    let mut hr_delta = rng.gen_range(-cfg.hr_jitter..=cfg.hr_jitter);
    let mut o2_delta = rng.gen_range(-cfg.o2_jitter..=cfg.o2_jitter);

    if excursion {
        hr_delta += rng.gen_range(0.0..=cfg.hr_boost);
        o2_delta -= rng.gen_range(0.0..=cfg.o2_penalty);
    } else {
        if current.heart_rate > cfg.hr_high {
            hr_delta -= rng.gen_range(0.0..=cfg.hr_pull);
        }
        if current.heart_rate < cfg.hr_low {
            hr_delta += rng.gen_range(0.0..=cfg.hr_pull);
        }
        if current.oxygen_level < cfg.o2_floor {
            o2_delta += rng.gen_range(0.0..=cfg.o2_pull);
        }
    }

    VitalsSample::clamped(current.heart_rate + hr_delta, current.oxygen_level + o2_delta)
}

/// Per-subject starting point so subjects are visually distinguishable.
pub fn random_baseline<R: Rng + ?Sized>(rng: &mut R) -> VitalsSample {
    VitalsSample::clamped(rng.gen_range(70.0..=90.0), rng.gen_range(96.0..=99.0))
}

/// Where sessions get their next reading from.
pub trait VitalsSource {
    fn advance(&mut self, current: &VitalsSample) -> VitalsSample;
    fn baseline(&mut self) -> VitalsSample;
}

/// The production source: [`step`] over an owned RNG.
#[derive(Debug, Clone)]
pub struct RandomWalk<R = StdRng> {
    pub cfg: WalkCfg,
    rng: R,
}

impl<R: Rng> RandomWalk<R> {
    pub fn new(rng: R, cfg: WalkCfg) -> Self {
        Self {
            cfg: cfg.sanitized(),
            rng,
        }
    }
}

impl RandomWalk<StdRng> {
    pub fn seeded(seed: u64, cfg: WalkCfg) -> Self {
        Self::new(StdRng::seed_from_u64(seed), cfg)
    }

    pub fn from_entropy(cfg: WalkCfg) -> Self {
        Self::new(StdRng::from_entropy(), cfg)
    }
}

impl<R: Rng> VitalsSource for RandomWalk<R> {
    fn advance(&mut self, current: &VitalsSample) -> VitalsSample {
        step(&mut self.rng, current, &self.cfg)
    }

    fn baseline(&mut self) -> VitalsSample {
        random_baseline(&mut self.rng)
    }
}
