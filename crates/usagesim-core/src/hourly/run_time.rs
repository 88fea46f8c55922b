//! Run-time (uptime) buckets derived from hourly use-time buckets.
//!
//! The host is modeled as continuously powered on between the first and last
//! active hour of the day; the boundary hours get a partial-boot draw that is
//! never below the minutes actually used in them.

use rand::Rng;

use super::{HourWindow, HourlyBuckets, HOURS_PER_DAY, MINUTES_PER_HOUR};

/// Derive run-time buckets from use-time buckets over the full day.
///
/// For each hour: 0 outside the first..=last active span, 60 strictly inside
/// it, and a uniform draw in `[use_minutes, 60]` at the two boundary hours.
/// An all-zero input yields an all-zero output.
pub fn derive_run_time<R: Rng + ?Sized>(rng: &mut R, use_time: &HourlyBuckets) -> HourlyBuckets {
    derive_run_time_in(rng, use_time, HourWindow::FULL_DAY)
}

/// Derive run-time buckets, forcing hours outside `window` to 0.
///
/// The window bound takes precedence over the first/last-active-hour rule:
/// an hour inside the active span but outside the caller's window still
/// reports 0. Use-time values above 60 are treated as a full hour.
pub fn derive_run_time_in<R: Rng + ?Sized>(
    rng: &mut R,
    use_time: &HourlyBuckets,
    window: HourWindow,
) -> HourlyBuckets {
    let mut run_time = [0u32; HOURS_PER_DAY];

    let first = use_time.iter().position(|&m| m != 0);
    let last = use_time.iter().rposition(|&m| m != 0);
    let (first, last) = match (first, last) {
        (Some(first), Some(last)) => (first, last),
        _ => return run_time,
    };

    for (hour, slot) in run_time.iter_mut().enumerate() {
        if !window.contains(hour) {
            continue;
        }
        let used = use_time[hour].min(MINUTES_PER_HOUR);
        *slot = if hour == first || hour == last {
            rng.gen_range(used..=MINUTES_PER_HOUR)
        } else if hour > first && hour < last {
            MINUTES_PER_HOUR
        } else {
            0
        };
    }

    run_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hourly::allocate;
    use crate::rng::rng_from_seed;

    #[test]
    fn all_zero_input_gives_all_zero_output() {
        let mut rng = rng_from_seed(Some(1));
        assert_eq!(derive_run_time(&mut rng, &[0u32; 24]), [0u32; 24]);
    }

    #[test]
    fn interior_hours_are_fully_powered() {
        let mut use_time = [0u32; 24];
        use_time[9] = 10;
        use_time[10] = 0;
        use_time[11] = 5;
        use_time[14] = 30;

        let mut rng = rng_from_seed(Some(2));
        let run_time = derive_run_time(&mut rng, &use_time);

        // first = 9, last = 14; everything strictly between runs the full hour
        for hour in 10..14 {
            assert_eq!(run_time[hour], 60, "hour {hour}");
        }
    }

    #[test]
    fn boundary_hours_run_at_least_as_long_as_used() {
        let mut use_time = [0u32; 24];
        use_time[8] = 42;
        use_time[16] = 17;

        for seed in 0..100 {
            let mut rng = rng_from_seed(Some(seed));
            let run_time = derive_run_time(&mut rng, &use_time);
            assert!((42..=60).contains(&run_time[8]));
            assert!((17..=60).contains(&run_time[16]));
        }
    }

    #[test]
    fn hours_outside_active_span_are_zero() {
        let mut use_time = [0u32; 24];
        use_time[10] = 20;
        use_time[12] = 20;

        let mut rng = rng_from_seed(Some(3));
        let run_time = derive_run_time(&mut rng, &use_time);

        for hour in (0..10).chain(13..24) {
            assert_eq!(run_time[hour], 0, "hour {hour}");
        }
    }

    #[test]
    fn single_active_hour_is_both_boundaries() {
        let mut use_time = [0u32; 24];
        use_time[13] = 55;

        let mut rng = rng_from_seed(Some(4));
        let run_time = derive_run_time(&mut rng, &use_time);
        assert!((55..=60).contains(&run_time[13]));
        assert_eq!(run_time.iter().sum::<u32>(), run_time[13]);
    }

    #[test]
    fn window_bound_overrides_active_span() {
        let mut use_time = [0u32; 24];
        use_time[6] = 10;
        use_time[12] = 10;

        let window = HourWindow::new(8, 17).unwrap();
        let mut rng = rng_from_seed(Some(5));
        let run_time = derive_run_time_in(&mut rng, &use_time, window);

        // Hour 6 is the first active hour but sits outside the window.
        assert_eq!(run_time[6], 0);
        // Hours 8..12 are interior to the active span and inside the window.
        for hour in 8..12 {
            assert_eq!(run_time[hour], 60, "hour {hour}");
        }
        assert!((10..=60).contains(&run_time[12]));
    }

    #[test]
    fn run_time_always_covers_use_time() {
        let window = HourWindow::new(7, 19).unwrap();
        for seed in 0..50 {
            let mut rng = rng_from_seed(Some(seed));
            let use_time = allocate(&mut rng, 300, window);
            let run_time = derive_run_time_in(&mut rng, &use_time, window);
            for hour in 0..24 {
                if use_time[hour] > 0 {
                    assert!(run_time[hour] >= use_time[hour], "hour {hour}");
                }
            }
        }
    }
}
