//! Hourly usage synthesis for one simulated day.
//!
//! This module provides:
//! - Constrained-random allocation of a daily minute total into hourly buckets
//! - Derived run-time (uptime) buckets with boundary-hour rules
//! - The packed focus-minutes bitfield codec
//! - A generator composing the three into one payload

mod allocator;
mod focus;
mod generator;
mod run_time;

pub use allocator::{allocate, allocate_strict};
pub use focus::{decode_focus, encode_focus, FocusBuffer, FOCUS_BUFFER_LEN};
pub use generator::{generate, HourlyUsage};
pub use run_time::{derive_run_time, derive_run_time_in};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Minutes of activity per hour of day, index = hour (0-23).
pub type HourlyBuckets = [u32; 24];

/// Number of hours in a day.
pub const HOURS_PER_DAY: usize = 24;

/// Ceiling for any single hourly bucket.
pub const MINUTES_PER_HOUR: u32 = 60;

/// An inclusive range of hours within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    start: u8,
    end: u8,
}

impl HourWindow {
    /// The whole day, hours 0 through 23.
    pub const FULL_DAY: HourWindow = HourWindow { start: 0, end: 23 };

    /// Create a window from inclusive start and end hours.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidParameter`] unless
    /// `start <= end <= 23`.
    pub fn new(start: u8, end: u8) -> Result<Self> {
        if end > 23 {
            return Err(CoreError::invalid_parameter(
                "end_hour",
                format!("must be at most 23, got {end}"),
            ));
        }
        if start > end {
            return Err(CoreError::invalid_parameter(
                "start_hour",
                format!("must not exceed end_hour ({start} > {end})"),
            ));
        }
        Ok(Self { start, end })
    }

    /// First hour of the window.
    pub fn start(&self) -> u8 {
        self.start
    }

    /// Last hour of the window, inclusive.
    pub fn end(&self) -> u8 {
        self.end
    }

    /// Number of hours covered by the window.
    pub fn width(&self) -> u8 {
        self.end - self.start + 1
    }

    /// Largest minute total the window can hold.
    pub fn capacity_minutes(&self) -> u32 {
        self.width() as u32 * MINUTES_PER_HOUR
    }

    /// Whether the given hour of day falls inside the window.
    pub fn contains(&self, hour: usize) -> bool {
        (self.start as usize..=self.end as usize).contains(&hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_bounds_validated() {
        assert!(HourWindow::new(8, 17).is_ok());
        assert!(HourWindow::new(0, 0).is_ok());
        assert!(HourWindow::new(23, 23).is_ok());
        assert!(HourWindow::new(9, 8).is_err());
        assert!(HourWindow::new(0, 24).is_err());
    }

    #[test]
    fn window_capacity() {
        let window = HourWindow::new(8, 17).unwrap();
        assert_eq!(window.width(), 10);
        assert_eq!(window.capacity_minutes(), 600);
        assert!(window.contains(8));
        assert!(window.contains(17));
        assert!(!window.contains(7));
        assert!(!window.contains(18));
    }
}
