//! Periodic timer tick background task

use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{state::AppState, timer::Step};

/// Background task that drives the shared timer once per tick period
pub async fn timer_tick_task(state: Arc<AppState>) {
    if state.tick_period.is_zero() {
        info!("Tick period is zero, periodic ticking disabled");
        return;
    }

    info!("Starting timer tick task ({}ms period)", state.tick_period.as_millis());

    let mut ticker = interval(state.tick_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match state.tick() {
            Ok(report) => {
                if report.step != Step::Ignored {
                    debug!(
                        "Tick {:?}: mode={:?}, value={}",
                        report.step, report.snapshot.mode, report.snapshot.value
                    );
                }
                if report.interrupt_fired {
                    info!("Countdown expired, interrupt triggered");
                }
            }
            Err(e) => {
                error!("Timer tick failed: {}", e);
                break;
            }
        }
    }
}
