//! Simulated personal-health vitals: a bounded random-walk generator, a
//! stress scorer, rolling history buffers, single- and multi-subject sessions
//! and an edge-triggered high-stress alert log.

pub mod alerts;
pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod fleet;
pub mod generator;
pub mod history;
pub mod single;
pub mod stress;
pub mod subject;
pub mod vitals;
pub mod viz;
