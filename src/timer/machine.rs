//! Timer state machine
//!
//! Every operation is a total function of the current state and its
//! arguments. Calls that do not apply to the current mode are no-ops, the
//! way a hardware timer register ignores commands it cannot honour.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use super::profile::Profile;

/// Operating mode of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Stopped; counter is idle
    #[default]
    Disabled,
    /// Counting down toward zero, may fire an interrupt
    Countdown,
    /// Counting up, saturates at the profile bound
    Stopwatch,
}

/// Result of an advance operation
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Counter moved by one
    Applied,
    /// Guard failed, nothing changed
    Ignored,
    /// Stopwatch already at its bound, nothing changed
    Saturated,
}

impl Step {
    /// Whether the counter moved
    pub fn is_applied(self) -> bool {
        self == Step::Applied
    }
}

/// Rejected timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("countdown duration {duration} is outside 1..={max}")]
    DurationOutOfRange { duration: i64, max: u16 },
}

/// State of a single software timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    value: u16,
    interrupt_flag: bool,
    mode: Mode,
    max_duration: u16,
}

/// Point-in-time copy of the timer fields for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub value: u16,
    pub enabled: bool,
    pub interrupt_flag: bool,
    pub mode: Mode,
    pub max_duration: u16,
}

impl TimerState {
    /// Create an initialized, disabled timer for the given profile
    pub fn new(profile: Profile) -> Self {
        Self::with_max_duration(profile.max_duration())
    }

    fn with_max_duration(max_duration: u16) -> Self {
        Self {
            value: 0,
            interrupt_flag: false,
            mode: Mode::Disabled,
            max_duration,
        }
    }

    /// Current counter value
    pub fn value(&self) -> u16 {
        self.value
    }

    /// A timer is running in any mode other than `Disabled`
    pub fn enabled(&self) -> bool {
        self.mode != Mode::Disabled
    }

    /// Whether a countdown has fired since the last configure or reset
    pub fn interrupt_flag(&self) -> bool {
        self.interrupt_flag
    }

    /// Current operating mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Upper bound fixed by the profile
    pub fn max_duration(&self) -> u16 {
        self.max_duration
    }

    /// Copy out the fields for display
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            value: self.value,
            enabled: self.enabled(),
            interrupt_flag: self.interrupt_flag,
            mode: self.mode,
            max_duration: self.max_duration,
        }
    }

    /// Load a countdown and start it.
    ///
    /// `duration` must be in `1..=max_duration`; anything else is rejected
    /// and leaves every field untouched.
    pub fn configure_countdown(&mut self, duration: i64) -> Result<(), TimerError> {
        let value = u16::try_from(duration)
            .ok()
            .filter(|d| (1..=self.max_duration).contains(d))
            .ok_or(TimerError::DurationOutOfRange {
                duration,
                max: self.max_duration,
            })?;

        self.value = value;
        self.interrupt_flag = false;
        self.mode = Mode::Countdown;
        debug!("Timer configured for countdown from {}", value);
        Ok(())
    }

    /// Start counting up from zero
    pub fn configure_stopwatch(&mut self) {
        self.value = 0;
        self.interrupt_flag = false;
        self.mode = Mode::Stopwatch;
        debug!("Timer configured as stopwatch");
    }

    /// Count down by one. Only applies to a running countdown above zero.
    pub fn decrement(&mut self) -> Step {
        if self.mode != Mode::Countdown || self.value == 0 {
            return Step::Ignored;
        }

        self.value -= 1;
        trace!("Countdown at {}", self.value);
        Step::Applied
    }

    /// Count up by one. Only applies to a running stopwatch.
    pub fn increment(&mut self) -> Step {
        if self.mode != Mode::Stopwatch {
            return Step::Ignored;
        }
        if self.value >= self.max_duration {
            return Step::Saturated;
        }

        self.value += 1;
        trace!("Stopwatch at {}", self.value);
        Step::Applied
    }

    /// Fire the interrupt if a countdown has reached zero.
    ///
    /// Firing latches the interrupt flag and disables the timer, so a second
    /// call returns `false` without touching anything.
    pub fn check_and_trigger_interrupt(&mut self) -> bool {
        if self.mode != Mode::Countdown || self.value != 0 {
            return false;
        }

        self.interrupt_flag = true;
        self.mode = Mode::Disabled;
        debug!("Countdown expired, interrupt latched");
        true
    }

    /// Return to the freshly initialized state
    pub fn reset(&mut self) {
        *self = Self::with_max_duration(self.max_duration);
        debug!("Timer reset");
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}
