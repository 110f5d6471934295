//! Shared timer state for the serve mode

use std::{
    sync::{Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{
    driver::{self, TickReport},
    timer::{Profile, TimerError, TimerSnapshot, TimerState},
};

/// Failures of the shared state layer
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to lock {0}")]
    Poisoned(&'static str),
    #[error(transparent)]
    Rejected(#[from] TimerError),
}

/// Published whenever a countdown fires its interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptEvent {
    pub at: DateTime<Utc>,
    pub snapshot: TimerSnapshot,
}

#[derive(Debug, Default)]
struct LastAction {
    name: Option<String>,
    at: Option<DateTime<Utc>>,
}

/// Owns the single timer instance and serializes every operation on it
#[derive(Debug)]
pub struct AppState {
    timer: Mutex<TimerState>,
    last_action: Mutex<LastAction>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    pub tick_period: Duration,
    interrupt_tx: broadcast::Sender<InterruptEvent>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
}

impl AppState {
    /// Create an AppState holding an initialized timer
    pub fn new(port: u16, host: String, profile: Profile, tick_period: Duration) -> Self {
        let timer = TimerState::new(profile);
        let (interrupt_tx, _) = broadcast::channel(16);
        let (snapshot_tx, _) = watch::channel(timer.snapshot());

        Self {
            timer: Mutex::new(timer),
            last_action: Mutex::new(LastAction::default()),
            start_time: Instant::now(),
            port,
            host,
            tick_period,
            interrupt_tx,
            snapshot_tx,
        }
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, TimerState>, StateError> {
        self.timer.lock().map_err(|_| StateError::Poisoned("timer state"))
    }

    /// Run `op` against the timer under the lock and publish the result
    fn apply<T, F>(&self, action: &str, op: F) -> Result<(T, TimerSnapshot), StateError>
    where
        F: FnOnce(&mut TimerState) -> Result<T, TimerError>,
    {
        let mut timer = self.lock_timer()?;
        let out = op(&mut timer)?;
        let snapshot = timer.snapshot();
        drop(timer);

        self.record_action(action);
        self.snapshot_tx.send_replace(snapshot);
        Ok((out, snapshot))
    }

    fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last) => {
                last.name = Some(action.to_string());
                last.at = Some(Utc::now());
            }
            Err(_) => warn!("Failed to record last action: {}", action),
        }
    }

    /// Configure a countdown of `duration` ticks
    pub fn configure_countdown(&self, duration: i64) -> Result<TimerSnapshot, StateError> {
        let (_, snapshot) = self.apply("countdown", |timer| timer.configure_countdown(duration))?;
        info!("Countdown configured for {} ticks", duration);
        Ok(snapshot)
    }

    /// Switch the timer into stopwatch mode
    pub fn configure_stopwatch(&self) -> Result<TimerSnapshot, StateError> {
        let (_, snapshot) = self.apply("stopwatch", |timer| {
            timer.configure_stopwatch();
            Ok(())
        })?;
        info!("Stopwatch started");
        Ok(snapshot)
    }

    /// Return the timer to its initial state
    pub fn reset(&self) -> Result<TimerSnapshot, StateError> {
        let (_, snapshot) = self.apply("reset", |timer| {
            timer.reset();
            Ok(())
        })?;
        info!("Timer reset");
        Ok(snapshot)
    }

    /// Run one driver iteration and broadcast a fired interrupt
    pub fn tick(&self) -> Result<TickReport, StateError> {
        let mut timer = self.lock_timer()?;
        let report = driver::tick(&mut timer);
        drop(timer);

        self.snapshot_tx.send_replace(report.snapshot);

        if report.interrupt_fired {
            let event = InterruptEvent {
                at: Utc::now(),
                snapshot: report.snapshot,
            };
            if self.interrupt_tx.send(event).is_err() {
                debug!("Interrupt fired with no subscribers");
            }
        }

        Ok(report)
    }

    /// Get the current timer fields
    pub fn snapshot(&self) -> Result<TimerSnapshot, StateError> {
        Ok(self.lock_timer()?.snapshot())
    }

    /// Receive every interrupt fired from now on
    pub fn subscribe_interrupts(&self) -> broadcast::Receiver<InterruptEvent> {
        self.interrupt_tx.subscribe()
    }

    /// Latest snapshot published by a command or tick, read without taking
    /// the timer lock
    pub fn published_snapshot(&self) -> TimerSnapshot {
        *self.snapshot_tx.borrow()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        self.last_action
            .lock()
            .map(|last| (last.name.clone(), last.at))
            .unwrap_or((None, None))
    }
}
