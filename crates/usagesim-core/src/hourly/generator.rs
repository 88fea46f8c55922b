//! One-call generation of a day's use-time, run-time, and focus payload.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{allocate, derive_run_time_in, encode_focus, FocusBuffer, HourWindow, HourlyBuckets};
use crate::rng::rand_between;

/// A synthesized day of hourly usage for one user and one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyUsage {
    /// Minutes of active use per hour.
    pub use_time: HourlyBuckets,
    /// Minutes the host ran per hour, always covering `use_time`.
    pub run_time: HourlyBuckets,
    /// Packed per-minute focus bitmap; `None` when the day has no activity.
    pub focus_minutes: Option<FocusBuffer>,
}

impl HourlyUsage {
    /// Total minutes of active use across the day.
    pub fn minutes_in_use(&self) -> u32 {
        self.use_time.iter().sum()
    }

    /// Total minutes of host uptime across the day.
    pub fn uptime_minutes(&self) -> u32 {
        self.run_time.iter().sum()
    }
}

/// Generate one day of hourly usage.
///
/// Draws a daily total uniformly from `min_minutes..=max_minutes` (an
/// inverted pair is normalized), allocates it across `window`, derives the
/// run-time buckets within the same window, and packs the focus bitmap.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    min_minutes: u32,
    max_minutes: u32,
    window: HourWindow,
) -> HourlyUsage {
    let total = rand_between(rng, min_minutes as i64, max_minutes as i64) as u32;
    let use_time = allocate(rng, total, window);
    let run_time = derive_run_time_in(rng, &use_time, window);
    let focus_minutes = encode_focus(&use_time);

    HourlyUsage {
        use_time,
        run_time,
        focus_minutes,
    }
}
