use serde::{Deserialize, Serialize};

pub const HEART_RATE_MIN: f32 = 60.0;
pub const HEART_RATE_MAX: f32 = 150.0;
pub const OXYGEN_MIN: f32 = 92.0;
pub const OXYGEN_MAX: f32 = 100.0;

/// One heart-rate / blood-oxygen reading.
///
/// Every constructor in this crate goes through [`VitalsSample::clamped`], so a
/// sample held by a session is always inside the physiological window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsSample {
    pub heart_rate: f32,
    pub oxygen_level: f32,
}

impl VitalsSample {
    pub fn clamped(heart_rate: f32, oxygen_level: f32) -> Self {
        Self {
            heart_rate: clamp_range(heart_rate, HEART_RATE_MIN, HEART_RATE_MAX),
            oxygen_level: clamp_range(oxygen_level, OXYGEN_MIN, OXYGEN_MAX),
        }
    }

    pub fn in_bounds(&self) -> bool {
        (HEART_RATE_MIN..=HEART_RATE_MAX).contains(&self.heart_rate)
            && (OXYGEN_MIN..=OXYGEN_MAX).contains(&self.oxygen_level)
    }
}

pub fn clamp01(v: f32) -> f32 {
    clamp_range(v, 0.0, 1.0)
}

// NaN collapses to the lower bound so a bad delta can never escape the window.
pub fn clamp_range(v: f32, lo: f32, hi: f32) -> f32 {
    if v.is_nan() || v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}
