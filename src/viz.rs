use crate::fleet::FleetStats;
use crate::history::HistoryPoint;
use crate::single::SingleSnapshot;
use crate::stress::StressCategory;
use crate::subject::{Status, Subject};
use crate::vitals;

const LABEL_WIDTH: usize = 22;
const VALUE_WIDTH: usize = 34;
const BAR_WIDTH: usize = 20;

pub static GLYPHS: &[char] = &[' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn bar(value_0_1: f32, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let clamped = vitals::clamp01(value_0_1);
    if clamped <= 0.0 {
        return String::new();
    }
    let filled = (clamped * width as f32).round() as usize;
    "#".repeat(filled.min(width))
}

/// One glyph per point, scaled from the 0..=100 stress score.
pub fn stress_sparkline(points: &[HistoryPoint]) -> String {
    let top = GLYPHS.len() - 1;
    points
        .iter()
        .map(|p| {
            let level = vitals::clamp01(p.stress_level / 100.0);
            GLYPHS[((level * top as f32).round() as usize).min(top)]
        })
        .collect()
}

/// Single-user dashboard card.
pub fn vitals_table(snap: &SingleSnapshot) -> Vec<String> {
    let border = format!(
        "+{}+{}+",
        "-".repeat(LABEL_WIDTH + 2),
        "-".repeat(VALUE_WIDTH + 2)
    );
    vec![
        border.clone(),
        format_row("Metric", "Value"),
        border.clone(),
        format_row("Heart Rate", &format!("{:.0} BPM", snap.vitals.heart_rate)),
        format_row("Oxygen Level", &format!("{:.1} SpO2 %", snap.vitals.oxygen_level)),
        format_row("Stress", &stress_entry(Some(snap.stress_level))),
        format_row(
            "Status",
            StressCategory::from_score(snap.stress_level).label(),
        ),
        format_row("History", &stress_sparkline(&snap.history)),
        border,
    ]
}

/// Admin view: one row per subject plus the fleet summary.
pub fn fleet_table(subjects: &[Subject], stats: &FleetStats) -> Vec<String> {
    let mut lines = Vec::with_capacity(subjects.len() + 6);
    let border = format!("+{}+", "-".repeat(79));

    lines.push(border.clone());
    lines.push(format!(
        "| {:<16} | {:<8} | {:>5} | {:>6} | {:<30} |",
        "Name", "Status", "HR", "SpO2", "Stress"
    ));
    lines.push(border.clone());

    for subject in subjects {
        let live = subject.status == Status::Active;
        let (hr, o2) = match subject.current_vitals {
            Some(v) if live => (format!("{:.0}", v.heart_rate), format!("{:.1}", v.oxygen_level)),
            _ => ("N/A".to_string(), "N/A".to_string()),
        };
        let stress = if live {
            stress_entry(subject.current_stress)
        } else {
            "N/A".to_string()
        };
        lines.push(format!(
            "| {:<16} | {:<8} | {:>5} | {:>6} | {:<30} |",
            truncate(&subject.name, 16),
            format!("{:?}", subject.status),
            hr,
            o2,
            stress
        ));
    }

    lines.push(border.clone());
    let summary = format!(
        "total={} active={} avg_stress={:.1}%",
        stats.total_subjects, stats.active_subjects, stats.average_stress
    );
    lines.push(format!("| {:<77} |", summary));
    lines.push(border);
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

fn stress_entry(stress: Option<f32>) -> String {
    let Some(value) = stress else {
        return "N/A".to_string();
    };
    let bar = bar(value / 100.0, BAR_WIDTH);
    if bar.is_empty() {
        format!("{:>5.1}%", value)
    } else {
        format!("{:>5.1}%  {:<width$}", value, bar, width = BAR_WIDTH)
    }
}

fn format_row(label: &str, value: &str) -> String {
    format!(
        "| {:<label$} | {:<value$} |",
        label,
        value,
        label = LABEL_WIDTH,
        value = VALUE_WIDTH
    )
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
