//! Soft Timer - a software countdown/stopwatch timer for embedded-style polling
//!
//! The core is [`timer::TimerState`], a mode-guarded state machine. The
//! [`driver`] runs it in a polling loop, and the serve mode shares one timer
//! behind a mutex with a periodic tick task and an HTTP control surface.

pub mod api;
pub mod config;
pub mod driver;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use timer::{Mode, Profile, Step, TimerError, TimerState, MAX_DURATION};
pub use utils::signals::shutdown_signal;
