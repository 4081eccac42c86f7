//! Periodic tick drivers. Thin adapters: all state changes happen inside the
//! sessions' synchronous `tick()`; these loops only decide when to call it.

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::alerts::AlertSink;
use crate::fleet::{FleetSession, FleetSnapshot};
use crate::generator::VitalsSource;
use crate::single::{SingleSession, SingleSnapshot};

fn interval_for(tick: std::time::Duration) -> time::Interval {
    let mut interval = time::interval(tick);
    // A slow consumer delays the next tick instead of bursting to catch up.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

fn reached(ticks: u64, max_ticks: Option<u64>) -> bool {
    max_ticks.is_some_and(|max| ticks >= max)
}

/// Ticks `session` until `shutdown` turns true (or its sender drops), or
/// `max_ticks` have run. Returns the session for inspection.
pub async fn run_single<S, F>(
    mut session: SingleSession<S>,
    mut shutdown: watch::Receiver<bool>,
    max_ticks: Option<u64>,
    mut on_tick: F,
) -> SingleSession<S>
where
    S: VitalsSource,
    F: FnMut(&SingleSnapshot),
{
    let mut interval = interval_for(session.config().tick_duration());
    // First tick of a tokio interval completes immediately.
    interval.tick().await;
    let mut ticks = 0;

    info!("single-subject driver started");
    while !reached(ticks, max_ticks) && !*shutdown.borrow() {
        tokio::select! {
            _ = interval.tick() => {
                let snap = session.tick();
                ticks += 1;
                on_tick(&snap);
            }
            changed = shutdown.changed() => {
                if changed.is_err() {
                    debug!("shutdown sender dropped");
                    break;
                }
            }
        }
    }
    info!(ticks, "single-subject driver stopped");
    session
}

pub async fn run_fleet<S, A, F>(
    mut session: FleetSession<S>,
    mut sink: A,
    mut shutdown: watch::Receiver<bool>,
    max_ticks: Option<u64>,
    mut on_tick: F,
) -> (FleetSession<S>, A)
where
    S: VitalsSource,
    A: AlertSink,
    F: FnMut(&FleetSnapshot, &A),
{
    let mut interval = interval_for(session.config().tick_duration());
    interval.tick().await;
    let mut ticks = 0;

    info!(subjects = session.subjects().len(), "fleet driver started");
    while !reached(ticks, max_ticks) && !*shutdown.borrow() {
        tokio::select! {
            _ = interval.tick() => {
                let snap = session.tick(&mut sink);
                ticks += 1;
                on_tick(&snap, &sink);
            }
            changed = shutdown.changed() => {
                if changed.is_err() {
                    debug!("shutdown sender dropped");
                    break;
                }
            }
        }
    }
    info!(ticks, "fleet driver stopped");
    (session, sink)
}
