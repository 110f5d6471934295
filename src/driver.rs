//! Polling driver for the timer state machine

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::timer::{Mode, Profile, Step, TimerSnapshot, TimerState};

/// Outcome of one polling iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub step: Step,
    pub interrupt_fired: bool,
    pub snapshot: TimerSnapshot,
}

/// Summary of a finished demonstration run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSummary {
    pub configured: bool,
    pub ticks: u32,
    pub interrupts: u32,
    pub final_state: TimerSnapshot,
}

/// Run one polling-loop iteration: advance in the current mode, then check
/// for an expired countdown
pub fn tick(timer: &mut TimerState) -> TickReport {
    let step = match timer.mode() {
        Mode::Countdown => timer.decrement(),
        Mode::Stopwatch => timer.increment(),
        Mode::Disabled => Step::Ignored,
    };
    let interrupt_fired = timer.check_and_trigger_interrupt();

    TickReport {
        step,
        interrupt_fired,
        snapshot: timer.snapshot(),
    }
}

/// Console demonstration: run a countdown of `duration` to completion, then
/// reset the timer
pub fn run_demo(profile: Profile, duration: i64) -> DemoSummary {
    let mut timer = TimerState::new(profile);
    info!("Initializing timer (max duration {})", timer.max_duration());

    let configured = match timer.configure_countdown(duration) {
        Ok(()) => {
            info!("Timer set to {}", duration);
            true
        }
        Err(e) => {
            warn!("Failed to set timer: {}", e);
            false
        }
    };

    let mut ticks = 0;
    let mut interrupts = 0;
    // A countdown needs at most max_duration decrements plus the firing tick
    let limit = u32::from(timer.max_duration()) + 1;

    while timer.enabled() && ticks < limit {
        let report = tick(&mut timer);
        ticks += 1;

        if report.step.is_applied() {
            info!("Timer decremented: {}", report.snapshot.value);
        }
        if report.interrupt_fired {
            interrupts += 1;
            info!("Interrupt triggered!");
        }
    }

    info!("Resetting timer...");
    timer.reset();

    let final_state = timer.snapshot();
    info!(
        "Timer reset. Enabled: {}, Value: {}, Interrupt: {}",
        final_state.enabled, final_state.value, final_state.interrupt_flag
    );

    DemoSummary {
        configured,
        ticks,
        interrupts,
        final_state,
    }
}
