//! Software timer core
//!
//! A countdown/stopwatch state machine modelled on a polled hardware timer.
//! The timer is an ordinary caller-owned value; callers that share it across
//! tasks must serialize access themselves.

pub mod machine;
pub mod profile;

pub use machine::{Mode, Step, TimerError, TimerSnapshot, TimerState};
pub use profile::{Profile, COMPACT_MAX_DURATION, MAX_DURATION};
