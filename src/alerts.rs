use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clock;
use crate::subject::SubjectRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AlertId(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub id: AlertId,
    pub subject: SubjectRef,
    pub stress_level: f32,
    pub timestamp: String,
    pub read: bool,
}

/// Receives one call per upward threshold crossing.
pub trait AlertSink {
    fn on_crossing(&mut self, subject: SubjectRef, stress_level: f32, at: NaiveDateTime);
}

/// Append-only notification log. Entries are never removed; the only mutation
/// after creation is [`AlertLog::mark_all_read`].
#[derive(Debug, Clone, Default)]
pub struct AlertLog {
    events: Vec<AlertEvent>,
    next_id: u64,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, subject: SubjectRef, stress_level: f32, at: NaiveDateTime) -> AlertId {
        let id = AlertId(self.next_id);
        self.next_id += 1;
        info!(
            alert = id.0,
            subject = subject.id,
            name = %subject.name,
            stress = stress_level,
            "high stress alert"
        );
        self.events.push(AlertEvent {
            id,
            subject,
            stress_level,
            timestamp: clock::alert_label(at),
            read: false,
        });
        id
    }

    pub fn mark_all_read(&mut self) {
        for event in self.events.iter_mut().filter(|e| !e.read) {
            event.read = true;
        }
    }

    pub fn unread_count(&self) -> usize {
        self.events.iter().filter(|e| !e.read).count()
    }

    /// Chronological, oldest first.
    pub fn events(&self) -> &[AlertEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl AlertSink for AlertLog {
    fn on_crossing(&mut self, subject: SubjectRef, stress_level: f32, at: NaiveDateTime) {
        self.append(subject, stress_level, at);
    }
}

pub fn summary_lines(log: &AlertLog) -> Vec<String> {
    let mut lines = vec![format!(
        "[alerts] total={}, unread={}",
        log.len(),
        log.unread_count()
    )];
    for event in log.events() {
        lines.push(format!(
            "[alerts] {} {} {} stress={:.0}%",
            if event.read { " " } else { "*" },
            event.timestamp,
            event.subject.name,
            event.stress_level
        ));
    }
    let status = if log.unread_count() == 0 {
        "OK ✅"
    } else {
        "ATTENTION ⚠️"
    };
    lines.push(format!("[alerts] status: {}", status));
    lines
}

pub fn print_summary(log: &AlertLog) {
    println!();
    for line in summary_lines(log) {
        println!("{}", line);
    }
}
