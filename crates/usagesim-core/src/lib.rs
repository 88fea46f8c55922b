//! # Usagesim Core Library
//!
//! This library provides the core logic for synthesizing realistic endpoint
//! usage telemetry. It is CLI-first: every operation is available through the
//! standalone `usagesim` binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Hourly engine**: Distributes a daily minute total over an hour window,
//!   derives machine run time from it, and packs per-minute focus activity
//!   into a 180-byte bitfield
//! - **Plan tables**: Week-indexed usage plans (ramp-up, flatten, read-only,
//!   ramp-down) that escalate per-tier metric bounds
//! - **Simulation driver**: Walks a date range, assigns tiers and plans to
//!   users by percentage quota, and emits daily usage records
//! - **Config**: TOML-based configuration with validated date, hour, and
//!   percentage settings
//!
//! ## Key Components
//!
//! - [`hourly::generate`]: One user-day of hourly use time, run time, and
//!   focus minutes
//! - [`UsagePlanTable`]: Per-plan, per-week metric bounds
//! - [`UsageSimulator`]: The full multi-user, multi-day driver
//! - [`SimulationConfig`]: Configuration management

pub mod calendar;
pub mod config;
pub mod error;
pub mod hourly;
pub mod plan;
pub mod rng;
pub mod simulate;

pub use config::{ActivityConfig, DatesConfig, HoursConfig, SimulationConfig};
pub use error::{ConfigError, CoreError};
pub use hourly::{allocate, generate, FocusBuffer, HourWindow, HourlyBuckets, HourlyUsage};
pub use plan::{MetricBounds, PlanKind, TierBounds, UsageBounds, UsagePlanRow, UsagePlanTable};
pub use simulate::{
    DailyUsageRecord, JobHandle, NoopJobHandle, PlanMix, SimulationReport, TierMix, UsageSimulator,
    UsageTier,
};
