use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vitals::{VitalsSample, clamp_range, clamp01};

const HR_BASELINE: f32 = 70.0;
const HR_SPAN: f32 = 140.0 - HR_BASELINE;
const O2_BASELINE: f32 = 96.0;
const O2_SPAN: f32 = O2_BASELINE - 92.0;
const HR_WEIGHT: f32 = 0.7;
const O2_WEIGHT: f32 = 0.3;

/// Maps a reading to a 0..=100 stress score.
///
/// Heart rate above 70 bpm and oxygen below 96% each contribute a normalized
/// 0..1 term; the weighted sum is scaled to a percentage.
pub fn score(vitals: &VitalsSample) -> f32 {
    let hr_score = clamp01((vitals.heart_rate - HR_BASELINE) / HR_SPAN);
    let o2_score = clamp01((O2_BASELINE - vitals.oxygen_level) / O2_SPAN);
    clamp_range((HR_WEIGHT * hr_score + O2_WEIGHT * o2_score) * 100.0, 0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressCategory {
    Relaxed,
    Moderate,
    High,
}

impl StressCategory {
    pub fn from_score(score: f32) -> Self {
        if score < 30.0 {
            StressCategory::Relaxed
        } else if score < 60.0 {
            StressCategory::Moderate
        } else {
            StressCategory::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StressCategory::Relaxed => "Relaxed",
            StressCategory::Moderate => "Moderate",
            StressCategory::High => "High Stress",
        }
    }
}

impl fmt::Display for StressCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
