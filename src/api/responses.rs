//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    driver::TickReport,
    timer::{Step, TimerSnapshot},
};

/// API response structure for timer commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a rejected-command response
    pub fn rejected(message: String, timer: TimerSnapshot) -> Self {
        Self::new("rejected", message, timer)
    }
}

/// Result of a manual tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickResponse {
    pub step: Step,
    pub interrupt_fired: bool,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl From<TickReport> for TickResponse {
    fn from(report: TickReport) -> Self {
        Self {
            step: report.step,
            interrupt_fired: report.interrupt_fired,
            timestamp: Utc::now(),
            timer: report.snapshot,
        }
    }
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub tick_ms: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
