//! Timing constants of the transition contract.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay between construction and the mount-in reveal, in milliseconds.
pub const DEFAULT_MOUNT_DELAY_MS: u64 = 50;

/// Delay between hiding the old step and showing the new one, in milliseconds.
pub const DEFAULT_FADE_DELAY_MS: u64 = 200;

/// Delays that decide when [`Visual`](super::Visual) changes.
///
/// Deserializes from the `[transition]` table of the host configuration;
/// missing fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionTiming {
    pub mount_delay_ms: u64,
    pub fade_delay_ms: u64,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            mount_delay_ms: DEFAULT_MOUNT_DELAY_MS,
            fade_delay_ms: DEFAULT_FADE_DELAY_MS,
        }
    }
}

impl TransitionTiming {
    pub fn new(mount_delay: Duration, fade_delay: Duration) -> Self {
        Self {
            mount_delay_ms: mount_delay.as_millis() as u64,
            fade_delay_ms: fade_delay.as_millis() as u64,
        }
    }

    pub fn mount_delay(&self) -> Duration {
        Duration::from_millis(self.mount_delay_ms)
    }

    pub fn fade_delay(&self) -> Duration {
        Duration::from_millis(self.fade_delay_ms)
    }
}
