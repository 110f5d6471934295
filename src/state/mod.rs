//! State management module
//!
//! Shared ownership of the timer for the HTTP host and its tick task.

pub mod app_state;

pub use app_state::{AppState, InterruptEvent, StateError};
