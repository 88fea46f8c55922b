//! Daily usage driver: walks a date range and synthesizes one usage record
//! per user per working day.
//!
//! Users are dealt into tiers (light/medium/heavy, plus an idle "none" share)
//! and trend plans by per-day percentage quotas, then each record draws its
//! daily thresholds from the precomputed week row and its hourly payload from
//! the generator. Persistence is the caller's concern; the driver only emits
//! plain records.

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{day_span, excluded_day, week_of};
use crate::config::SimulationConfig;
use crate::error::{CoreError, Result};
use crate::hourly::{generate, FocusBuffer, HourlyBuckets};
use crate::plan::{self, MetricBounds, PlanKind, UsagePlanTable};
use crate::rng::{rand_between, random_uuid};

/// Upper bound for the synthetic application startup time, milliseconds.
const STARTUP_TIME_MAX_MS: i64 = 1000;

/// A user's activity-intensity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageTier {
    Light,
    Medium,
    Heavy,
}

/// Percentage split of users across tiers; `none` users produce no usage on
/// their assigned days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierMix {
    #[serde(default = "default_light_pct")]
    pub light: f64,
    #[serde(default = "default_medium_pct")]
    pub medium: f64,
    #[serde(default = "default_heavy_pct")]
    pub heavy: f64,
    #[serde(default = "default_none_pct")]
    pub none: f64,
}

fn default_light_pct() -> f64 {
    40.0
}
fn default_medium_pct() -> f64 {
    35.0
}
fn default_heavy_pct() -> f64 {
    20.0
}
fn default_none_pct() -> f64 {
    5.0
}

impl Default for TierMix {
    fn default() -> Self {
        Self {
            light: default_light_pct(),
            medium: default_medium_pct(),
            heavy: default_heavy_pct(),
            none: default_none_pct(),
        }
    }
}

/// Percentage split of users across the four trend plans, plus the share of
/// the range after which the flatten plan stops escalating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanMix {
    #[serde(default = "default_ramp_up_pct")]
    pub ramp_up: f64,
    #[serde(default = "default_flatten_pct")]
    pub flatten: f64,
    #[serde(default = "default_read_only_pct")]
    pub read_only: f64,
    #[serde(default = "default_ramp_down_pct")]
    pub ramp_down: f64,
    /// Percentage of the week count at which the flatten plan levels off.
    #[serde(default = "default_flatten_at_pct")]
    pub flatten_at: f64,
}

fn default_ramp_up_pct() -> f64 {
    40.0
}
fn default_flatten_pct() -> f64 {
    25.0
}
fn default_read_only_pct() -> f64 {
    20.0
}
fn default_ramp_down_pct() -> f64 {
    15.0
}
fn default_flatten_at_pct() -> f64 {
    50.0
}

impl Default for PlanMix {
    fn default() -> Self {
        Self {
            ramp_up: default_ramp_up_pct(),
            flatten: default_flatten_pct(),
            read_only: default_read_only_pct(),
            ramp_down: default_ramp_down_pct(),
            flatten_at: default_flatten_at_pct(),
        }
    }
}

/// Cooperative cancellation and progress reporting.
///
/// The driver checks [`JobHandle::is_stopped`] and reports progress only
/// between units of work (one user-day); the generation routines themselves
/// stay cancellation-unaware.
pub trait JobHandle {
    /// Whether the job should stop at the next unit boundary.
    fn is_stopped(&self) -> bool {
        false
    }

    /// Progress callback, `percent` in 0..=100.
    fn on_progress(&mut self, percent: f64, message: &str) {
        let _ = (percent, message);
    }
}

/// A handle that never stops and swallows progress.
pub struct NoopJobHandle;

impl JobHandle for NoopJobHandle {}

/// One synthesized usage record: one user, one application, one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUsageRecord {
    pub id: Uuid,
    /// Opaque user identifier supplied by the caller.
    pub user: String,
    pub usage_date: NaiveDate,
    /// Day of week, Sunday = 0.
    pub day_of_week: u32,
    pub minutes_in_use: u32,
    pub uptime_minutes: u32,
    /// 0 whenever `minutes_in_use` is 0.
    pub keystrokes: u64,
    /// 0 whenever `minutes_in_use` is 0.
    pub mouse_clicks: u64,
    pub times_started: u32,
    /// Synthetic application startup time in milliseconds.
    pub startup_time: u32,
    pub utc_offset: i32,
    pub thin_client: bool,
    pub use_time: HourlyBuckets,
    pub run_time: HourlyBuckets,
    pub focus_minutes: Option<FocusBuffer>,
}

/// Outcome of one driver run: the records plus counters for the job log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub records: Vec<DailyUsageRecord>,
    pub days_processed: u32,
    pub weekend_days_skipped: u32,
    /// User-days that landed in the "none" tier quota.
    pub idle_user_days: u32,
}

/// Per-day tier quota counters, rebuilt each simulated day.
struct TierQuota {
    light: usize,
    medium: usize,
    heavy: usize,
    none: usize,
}

impl TierQuota {
    fn for_users(user_count: usize, mix: &TierMix) -> Self {
        let share = |pct: f64| (user_count as f64 * pct / 100.0).round() as usize;
        let mut light = share(mix.light);
        // A lone user must still generate something.
        if light == 0 {
            light = 1;
        }
        Self {
            light,
            medium: share(mix.medium),
            heavy: share(mix.heavy),
            none: share(mix.none),
        }
    }

    /// Drain quotas in tier order; `None` marks an idle user-day. Exhausted
    /// quotas fall back to light so rounding gaps never strand a user.
    fn take(&mut self) -> Option<UsageTier> {
        if self.light > 0 {
            self.light -= 1;
            Some(UsageTier::Light)
        } else if self.medium > 0 {
            self.medium -= 1;
            Some(UsageTier::Medium)
        } else if self.heavy > 0 {
            self.heavy -= 1;
            Some(UsageTier::Heavy)
        } else if self.none > 0 {
            self.none -= 1;
            None
        } else {
            Some(UsageTier::Light)
        }
    }
}

/// Per-day plan quota counters, rebuilt each simulated day.
struct PlanQuota {
    ramp_up: usize,
    flatten: usize,
    read_only: usize,
    ramp_down: usize,
}

impl PlanQuota {
    fn for_users(user_count: usize, mix: &PlanMix) -> Self {
        let share = |pct: f64| (user_count as f64 * pct / 100.0).round() as usize;
        Self {
            ramp_up: share(mix.ramp_up),
            flatten: share(mix.flatten),
            read_only: share(mix.read_only),
            ramp_down: share(mix.ramp_down),
        }
    }

    /// Drain quotas in plan order; when every quota is spent the first plan
    /// absorbs the remainder.
    fn take(&mut self) -> PlanKind {
        if self.ramp_up > 0 {
            self.ramp_up -= 1;
            PlanKind::RampUp
        } else if self.flatten > 0 {
            self.flatten -= 1;
            PlanKind::RampUpFlatten
        } else if self.read_only > 0 {
            self.read_only -= 1;
            PlanKind::ReadOnly
        } else if self.ramp_down > 0 {
            self.ramp_down -= 1;
            PlanKind::RampDown
        } else {
            PlanKind::RampUp
        }
    }
}

/// The daily usage driver.
pub struct UsageSimulator {
    config: SimulationConfig,
}

impl UsageSimulator {
    /// Create a driver over a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`crate::error::ConfigError`] when the
    /// configuration fails validation.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this driver runs with.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Precompute the plan table for the configured date range.
    pub fn plan_table(&self) -> UsagePlanTable {
        let num_weeks = self.config.num_weeks();
        plan::build(
            &self.config.bounds,
            num_weeks,
            self.config.flatten_week(num_weeks),
        )
    }

    /// Walk the date range and emit one record per active user per day.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Cancelled`] when `handle` requests a stop, or
    /// [`CoreError::InvalidParameter`] for an empty user list.
    pub fn run<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        users: &[String],
        handle: &mut dyn JobHandle,
    ) -> Result<SimulationReport> {
        if users.is_empty() {
            return Err(CoreError::invalid_parameter(
                "users",
                "at least one user is required",
            ));
        }

        let cfg = &self.config;
        let days = day_span(cfg.dates.start, cfg.dates.end);
        let window = cfg.window()?;
        let table = self.plan_table();

        let mut report = SimulationReport {
            records: Vec::new(),
            days_processed: 0,
            weekend_days_skipped: 0,
            idle_user_days: 0,
        };

        for (offset, date) in cfg.dates.start.iter_days().take(days as usize).enumerate() {
            let day = offset as i64 + 1;

            if excluded_day(date, cfg.dates.exclude_weekends) {
                report.weekend_days_skipped += 1;
                continue;
            }

            let week = week_of(day, days);
            let mut tier_quota = TierQuota::for_users(users.len(), &cfg.tiers);
            let mut plan_quota = PlanQuota::for_users(users.len(), &cfg.plans);

            for user in users {
                if handle.is_stopped() {
                    return Err(CoreError::Cancelled);
                }

                let kind = plan_quota.take();
                let Some(tier) = tier_quota.take() else {
                    report.idle_user_days += 1;
                    continue;
                };

                // week_of is clamped to the table's final week, so the row
                // always exists.
                let row = table
                    .row(kind, week)
                    .copied()
                    .unwrap_or_else(|| *table.plans[0].weeks.last().expect("non-empty table"));
                let (mins, keys, mous) = row.tier_ranges(tier);

                let (min_minutes, max_minutes) = rounded_range(mins);
                let usage = generate(rng, min_minutes, max_minutes, window);
                let minutes_in_use = usage.minutes_in_use();

                report.records.push(DailyUsageRecord {
                    id: random_uuid(rng),
                    user: user.clone(),
                    usage_date: date,
                    day_of_week: date.weekday().num_days_from_sunday(),
                    minutes_in_use,
                    uptime_minutes: usage.uptime_minutes(),
                    keystrokes: if minutes_in_use > 0 {
                        draw_count(rng, keys)
                    } else {
                        0
                    },
                    mouse_clicks: if minutes_in_use > 0 {
                        draw_count(rng, mous)
                    } else {
                        0
                    },
                    times_started: rand_between(
                        rng,
                        cfg.activity.min_times_started as i64,
                        cfg.activity.max_times_started as i64,
                    ) as u32,
                    startup_time: rand_between(rng, 0, STARTUP_TIME_MAX_MS) as u32,
                    utc_offset: 0,
                    thin_client: false,
                    use_time: usage.use_time,
                    run_time: usage.run_time,
                    focus_minutes: usage.focus_minutes,
                });
            }

            report.days_processed += 1;
            let percent = day as f64 / days as f64 * 100.0;
            handle.on_progress(
                percent,
                &format!("{day} of {days} days simulated ({date})"),
            );
            log::debug!("day {day}/{days} ({date}): week {week}");
        }

        log::info!(
            "simulation produced {} records over {} days ({} weekend days skipped, {} idle user-days)",
            report.records.len(),
            report.days_processed,
            report.weekend_days_skipped,
            report.idle_user_days,
        );
        Ok(report)
    }
}

/// Round a threshold pair to non-negative whole minutes.
fn rounded_range(bounds: MetricBounds) -> (u32, u32) {
    let lo = bounds.min.round().max(0.0) as u32;
    let hi = bounds.max.round().max(0.0) as u32;
    (lo, hi)
}

/// Draw an interaction count from a threshold pair, tolerating inverted
/// ramp-down pairs and flooring at zero.
fn draw_count<R: Rng + ?Sized>(rng: &mut R, bounds: MetricBounds) -> u64 {
    rand_between(rng, bounds.min.round() as i64, bounds.max.round() as i64).max(0) as u64
}
