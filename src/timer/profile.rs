//! Deployment profiles selecting the timer's upper bound

use serde::{Deserialize, Serialize};

/// Upper bound of the standard profile (8-bit counter register)
pub const MAX_DURATION: u16 = 255;

/// Upper bound of the compact profile
pub const COMPACT_MAX_DURATION: u16 = 10;

/// Deployment profile, fixes `MAX_DURATION` for a timer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Full 8-bit range
    #[default]
    Standard,
    /// Small range used by constrained targets and demos
    Compact,
}

impl Profile {
    /// Maximum counter value for this profile
    pub const fn max_duration(self) -> u16 {
        match self {
            Profile::Standard => MAX_DURATION,
            Profile::Compact => COMPACT_MAX_DURATION,
        }
    }
}
