use serde::{Deserialize, Serialize};

use crate::history::HistoryBuffer;
use crate::vitals::VitalsSample;

pub type SubjectId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Active,
    Inactive,
}

/// A monitored person in the fleet view.
///
/// `current_vitals` and `current_stress` are `None` until the subject has been
/// given a reading; consumers render that as "no data", not as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
    pub current_vitals: Option<VitalsSample>,
    pub current_stress: Option<f32>,
    pub history: HistoryBuffer,
}

impl Subject {
    pub fn new(id: SubjectId, name: &str, email: &str, role: Role, capacity: usize) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role,
            status: Status::Active,
            current_vitals: None,
            current_stress: None,
            history: HistoryBuffer::new(capacity),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    pub fn to_ref(&self) -> SubjectRef {
        SubjectRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// By-value identity snapshot handed to the alert log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRef {
    pub id: SubjectId,
    pub name: String,
}

/// Roster entry before history is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectSeed {
    pub id: SubjectId,
    pub name: &'static str,
    pub email: &'static str,
    pub role: Role,
    pub status: Status,
    pub vitals: Option<VitalsSample>,
    pub stress: f32,
}

pub fn default_roster() -> Vec<SubjectSeed> {
    let v = |hr, o2| Some(VitalsSample::clamped(hr, o2));
    vec![
        SubjectSeed {
            id: 1,
            name: "Alex Doe",
            email: "user@example.com",
            role: Role::User,
            status: Status::Active,
            vitals: v(75.0, 98.5),
            stress: 10.0,
        },
        SubjectSeed {
            id: 2,
            name: "Jane Smith",
            email: "jane@example.com",
            role: Role::User,
            status: Status::Active,
            vitals: v(85.0, 97.5),
            stress: 25.0,
        },
        SubjectSeed {
            id: 3,
            name: "Admin User",
            email: "admin@example.com",
            role: Role::Admin,
            status: Status::Active,
            vitals: v(72.0, 99.0),
            stress: 8.0,
        },
        SubjectSeed {
            id: 4,
            name: "Bob Johnson",
            email: "bob@example.com",
            role: Role::User,
            status: Status::Inactive,
            vitals: None,
            stress: 0.0,
        },
        SubjectSeed {
            id: 5,
            name: "Alice Williams",
            email: "alice@example.com",
            role: Role::User,
            status: Status::Active,
            vitals: v(110.0, 96.0),
            stress: 75.0,
        },
        SubjectSeed {
            id: 6,
            name: "Charlie Brown",
            email: "charlie@example.com",
            role: Role::User,
            status: Status::Active,
            vitals: v(68.0, 98.2),
            stress: 5.0,
        },
    ]
}
