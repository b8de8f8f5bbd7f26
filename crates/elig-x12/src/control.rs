//! Shared control-number generation
//!
//! Interchange, group, and transaction control numbers, and trace references,
//! must be unique within a trading-partner session. A single atomic counter
//! guards against collisions when requests are built concurrently.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Atomically incremented source of control numbers and trace references
#[derive(Debug)]
pub struct ControlNumbers {
    next: AtomicU64,
}

impl ControlNumbers {
    /// Seed from the current epoch time so restarts do not replay numbers
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(1);
        Self::with_seed(seed)
    }

    /// Seed explicitly (deterministic tests, externally persisted sequences)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }

    fn take(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Next 9-digit interchange/group control number
    pub fn next_control(&self) -> String {
        format!("{:09}", self.take() % 1_000_000_000)
    }

    /// Next 10-character trace reference
    pub fn next_trace(&self) -> String {
        format!("{:010}", self.take() % 10_000_000_000)
    }
}

impl Default for ControlNumbers {
    fn default() -> Self {
        Self::new()
    }
}
