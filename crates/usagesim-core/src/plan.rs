//! Multi-week usage-intensity trend plans.
//!
//! Before a simulation runs, per-week numeric thresholds are precomputed for
//! four trend shapes (ramp-up, ramp-up-then-flatten, read-only, ramp-down)
//! across the light/medium/heavy user tiers and the minutes/keystrokes/mouse
//! metrics. Each week row carries 18 threshold fields whose identities match
//! the review table downstream tooling reads; consumers select a `(min, max)`
//! pair from a row and draw daily values inside it.

use serde::{Deserialize, Serialize};

use crate::simulate::UsageTier;

/// Number of distinct trend plans.
pub const NUM_PLANS: usize = 4;

/// Fixed read-only keystroke thresholds, light/medium/heavy. These never
/// follow the configured bounds: a read-only user barely types no matter how
/// heavy their viewing is.
const READ_ONLY_KEYS: [(f64, f64); 3] = [(5.0, 10.0), (10.0, 15.0), (15.0, 20.0)];

/// One of the four week-over-week trend shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    /// Usage and interactions climb linearly toward the configured maxima.
    RampUp,
    /// Climbs like [`PlanKind::RampUp`], then holds steady from the flatten week on.
    RampUpFlatten,
    /// Usage climbs but keystrokes stay pinned at read-only levels.
    ReadOnly,
    /// Usage and interactions descend linearly from the configured maxima.
    RampDown,
}

impl PlanKind {
    /// All plans, in their fixed 1-4 order.
    pub const ALL: [PlanKind; NUM_PLANS] = [
        PlanKind::RampUp,
        PlanKind::RampUpFlatten,
        PlanKind::ReadOnly,
        PlanKind::RampDown,
    ];

    /// The plan's 1-based number as reported in week rows.
    pub fn number(self) -> u32 {
        match self {
            PlanKind::RampUp => 1,
            PlanKind::RampUpFlatten => 2,
            PlanKind::ReadOnly => 3,
            PlanKind::RampDown => 4,
        }
    }
}

/// A `(min, max)` pair for one metric of one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBounds {
    pub min: f64,
    pub max: f64,
}

impl MetricBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Configured bounds for one usage tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBounds {
    pub minutes: MetricBounds,
    pub keystrokes: MetricBounds,
    pub mouse_clicks: MetricBounds,
}

/// Configured bounds for all three tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageBounds {
    pub light: TierBounds,
    pub medium: TierBounds,
    pub heavy: TierBounds,
}

/// One week of one plan: 18 threshold fields.
///
/// Field names carry the tier/metric identities (`lu`/`mu`/`hu` =
/// light/medium/heavy; `mins`/`keys`/`mous` = minutes/keystrokes/mouse
/// clicks). Under [`PlanKind::RampDown`] a pair's "max" falls one decrement
/// step below its "min"; the identities are preserved anyway because
/// downstream consumers key on the field, not the numeric ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsagePlanRow {
    /// 1-based week number.
    pub week: u32,
    /// 1-based plan number.
    pub plan: u32,
    pub lu_min_mins: f64,
    pub lu_max_mins: f64,
    pub mu_min_mins: f64,
    pub mu_max_mins: f64,
    pub hu_min_mins: f64,
    pub hu_max_mins: f64,
    pub lu_min_keys: f64,
    pub lu_max_keys: f64,
    pub mu_min_keys: f64,
    pub mu_max_keys: f64,
    pub hu_min_keys: f64,
    pub hu_max_keys: f64,
    pub lu_min_mous: f64,
    pub lu_max_mous: f64,
    pub mu_min_mous: f64,
    pub mu_max_mous: f64,
    pub hu_min_mous: f64,
    pub hu_max_mous: f64,
}

impl UsagePlanRow {
    /// The week's `(minutes, keystrokes, mouse_clicks)` ranges for one tier.
    pub fn tier_ranges(&self, tier: UsageTier) -> (MetricBounds, MetricBounds, MetricBounds) {
        match tier {
            UsageTier::Light => (
                MetricBounds::new(self.lu_min_mins, self.lu_max_mins),
                MetricBounds::new(self.lu_min_keys, self.lu_max_keys),
                MetricBounds::new(self.lu_min_mous, self.lu_max_mous),
            ),
            UsageTier::Medium => (
                MetricBounds::new(self.mu_min_mins, self.mu_max_mins),
                MetricBounds::new(self.mu_min_keys, self.mu_max_keys),
                MetricBounds::new(self.mu_min_mous, self.mu_max_mous),
            ),
            UsageTier::Heavy => (
                MetricBounds::new(self.hu_min_mins, self.hu_max_mins),
                MetricBounds::new(self.hu_min_keys, self.hu_max_keys),
                MetricBounds::new(self.hu_min_mous, self.hu_max_mous),
            ),
        }
    }
}

/// All week rows for one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsagePlan {
    pub kind: PlanKind,
    pub weeks: Vec<UsagePlanRow>,
}

/// The full four-plan table for a simulation's date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsagePlanTable {
    pub num_weeks: u32,
    pub plans: Vec<UsagePlan>,
}

impl UsagePlanTable {
    /// The row for a 1-based week of one plan; `None` for week 0 or past the
    /// table's final week.
    pub fn row(&self, kind: PlanKind, week: u32) -> Option<&UsagePlanRow> {
        self.plans
            .iter()
            .find(|p| p.kind == kind)
            .and_then(|p| p.weeks.get(week.checked_sub(1)? as usize))
    }
}

/// Running `(min, max)` state for one (tier, metric) pair.
///
/// Each plan advances nine of these week by week; an emitted row is a
/// snapshot copy of their current values, never an alias into the running
/// state.
#[derive(Debug, Clone, Copy)]
struct Escalator {
    cur_min: f64,
    cur_max: f64,
    bounds: MetricBounds,
}

impl Escalator {
    fn new(bounds: MetricBounds) -> Self {
        Self {
            cur_min: bounds.min,
            cur_max: 0.0,
            bounds,
        }
    }

    fn step(&self, num_weeks: u32) -> f64 {
        (self.bounds.max - self.bounds.min) / num_weeks as f64
    }

    /// Linear climb toward the configured maximum, snapping the max onto it
    /// in the final week.
    fn ramp_up(&mut self, week: u32, num_weeks: u32) {
        let step = self.step(num_weeks);
        if week > 1 {
            self.cur_min += step;
        }
        self.cur_max = if week == num_weeks {
            self.bounds.max
        } else {
            self.cur_min + step
        };
    }

    /// Linear descent from the configured maximum. The pair's max trails one
    /// step below its min every week, inverting the usual ordering.
    fn ramp_down(&mut self, week: u32, num_weeks: u32) {
        let step = self.step(num_weeks);
        if week == 1 {
            self.cur_min = self.bounds.max;
        } else {
            self.cur_min -= step;
        }
        self.cur_max = self.cur_min - step;
    }

    /// Pin the pair to fixed values regardless of week or config.
    fn pin(&mut self, min: f64, max: f64) {
        self.cur_min = min;
        self.cur_max = max;
    }
}

/// The nine escalators one plan carries across its weeks.
struct PlanAccumulator {
    lu_mins: Escalator,
    mu_mins: Escalator,
    hu_mins: Escalator,
    lu_keys: Escalator,
    mu_keys: Escalator,
    hu_keys: Escalator,
    lu_mous: Escalator,
    mu_mous: Escalator,
    hu_mous: Escalator,
}

impl PlanAccumulator {
    fn new(bounds: &UsageBounds) -> Self {
        Self {
            lu_mins: Escalator::new(bounds.light.minutes),
            mu_mins: Escalator::new(bounds.medium.minutes),
            hu_mins: Escalator::new(bounds.heavy.minutes),
            lu_keys: Escalator::new(bounds.light.keystrokes),
            mu_keys: Escalator::new(bounds.medium.keystrokes),
            hu_keys: Escalator::new(bounds.heavy.keystrokes),
            lu_mous: Escalator::new(bounds.light.mouse_clicks),
            mu_mous: Escalator::new(bounds.medium.mouse_clicks),
            hu_mous: Escalator::new(bounds.heavy.mouse_clicks),
        }
    }

    fn minutes_and_mouse(&mut self) -> [&mut Escalator; 6] {
        [
            &mut self.lu_mins,
            &mut self.mu_mins,
            &mut self.hu_mins,
            &mut self.lu_mous,
            &mut self.mu_mous,
            &mut self.hu_mous,
        ]
    }

    fn all(&mut self) -> [&mut Escalator; 9] {
        [
            &mut self.lu_mins,
            &mut self.mu_mins,
            &mut self.hu_mins,
            &mut self.lu_keys,
            &mut self.mu_keys,
            &mut self.hu_keys,
            &mut self.lu_mous,
            &mut self.mu_mous,
            &mut self.hu_mous,
        ]
    }

    /// Apply one week's update rule for the given plan.
    fn advance(&mut self, kind: PlanKind, week: u32, num_weeks: u32, flatten_week: u32) {
        match kind {
            PlanKind::RampUp => {
                for esc in self.all() {
                    esc.ramp_up(week, num_weeks);
                }
            }
            PlanKind::RampUpFlatten => {
                // Escalate only until the flatten week; afterwards every pair
                // holds its last computed state, including in the final week.
                if week < flatten_week || week == 1 {
                    for esc in self.all() {
                        esc.ramp_up(week, num_weeks);
                    }
                }
            }
            PlanKind::ReadOnly => {
                for esc in self.minutes_and_mouse() {
                    esc.ramp_up(week, num_weeks);
                }
                let [lu, mu, hu] = READ_ONLY_KEYS;
                self.lu_keys.pin(lu.0, lu.1);
                self.mu_keys.pin(mu.0, mu.1);
                self.hu_keys.pin(hu.0, hu.1);
            }
            PlanKind::RampDown => {
                for esc in self.all() {
                    esc.ramp_down(week, num_weeks);
                }
            }
        }
    }

    /// Snapshot the current state into a week row.
    fn row(&self, kind: PlanKind, week: u32) -> UsagePlanRow {
        UsagePlanRow {
            week,
            plan: kind.number(),
            lu_min_mins: self.lu_mins.cur_min,
            lu_max_mins: self.lu_mins.cur_max,
            mu_min_mins: self.mu_mins.cur_min,
            mu_max_mins: self.mu_mins.cur_max,
            hu_min_mins: self.hu_mins.cur_min,
            hu_max_mins: self.hu_mins.cur_max,
            lu_min_keys: self.lu_keys.cur_min,
            lu_max_keys: self.lu_keys.cur_max,
            mu_min_keys: self.mu_keys.cur_min,
            mu_max_keys: self.mu_keys.cur_max,
            hu_min_keys: self.hu_keys.cur_min,
            hu_max_keys: self.hu_keys.cur_max,
            lu_min_mous: self.lu_mous.cur_min,
            lu_max_mous: self.lu_mous.cur_max,
            mu_min_mous: self.mu_mous.cur_min,
            mu_max_mous: self.mu_mous.cur_max,
            hu_min_mous: self.hu_mous.cur_min,
            hu_max_mous: self.hu_mous.cur_max,
        }
    }
}

/// Build the four-plan table.
///
/// `num_weeks` is floored at 1, making the per-week step division safe.
/// `flatten_week` is the 1-based week at which [`PlanKind::RampUpFlatten`]
/// stops escalating; the other plans ignore it. Configured `min > max` pairs
/// are not rejected and simply produce descending sequences.
pub fn build(bounds: &UsageBounds, num_weeks: u32, flatten_week: u32) -> UsagePlanTable {
    let num_weeks = num_weeks.max(1);
    let mut plans = Vec::with_capacity(NUM_PLANS);

    for kind in PlanKind::ALL {
        let mut acc = PlanAccumulator::new(bounds);
        let mut weeks = Vec::with_capacity(num_weeks as usize);
        for week in 1..=num_weeks {
            acc.advance(kind, week, num_weeks, flatten_week);
            weeks.push(acc.row(kind, week));
        }
        log::debug!(
            "plan {} computed for {num_weeks} week(s)",
            kind.number()
        );
        plans.push(UsagePlan { kind, weeks });
    }

    UsagePlanTable { num_weeks, plans }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_bounds() -> UsageBounds {
        UsageBounds {
            light: TierBounds {
                minutes: MetricBounds::new(10.0, 60.0),
                keystrokes: MetricBounds::new(100.0, 1000.0),
                mouse_clicks: MetricBounds::new(50.0, 500.0),
            },
            medium: TierBounds {
                minutes: MetricBounds::new(60.0, 240.0),
                keystrokes: MetricBounds::new(1000.0, 5000.0),
                mouse_clicks: MetricBounds::new(500.0, 2500.0),
            },
            heavy: TierBounds {
                minutes: MetricBounds::new(240.0, 480.0),
                keystrokes: MetricBounds::new(5000.0, 15000.0),
                mouse_clicks: MetricBounds::new(2500.0, 8000.0),
            },
        }
    }

    fn mins_pairs(plan: &UsagePlan) -> Vec<(f64, f64)> {
        plan.weeks
            .iter()
            .map(|r| (r.lu_min_mins, r.lu_max_mins))
            .collect()
    }

    #[test]
    fn ramp_up_is_non_decreasing_and_snaps_to_max() {
        let table = build(&test_bounds(), 4, 2);
        let plan = &table.plans[0];
        assert_eq!(plan.kind, PlanKind::RampUp);

        let pairs = mins_pairs(plan);
        for w in 1..pairs.len() {
            assert!(pairs[w].0 >= pairs[w - 1].0, "week {} min decreased", w + 1);
            assert!(pairs[w].1 >= pairs[w - 1].1, "week {} max decreased", w + 1);
        }
        assert_eq!(pairs[0].0, 10.0);
        assert_eq!(pairs.last().unwrap().1, 60.0);
    }

    #[test]
    fn ramp_up_first_week_offsets_max_by_one_step() {
        let table = build(&test_bounds(), 4, 2);
        let row = table.row(PlanKind::RampUp, 1).unwrap();
        // step for light minutes = (60 - 10) / 4 = 12.5
        assert_eq!(row.lu_min_mins, 10.0);
        assert_eq!(row.lu_max_mins, 22.5);
    }

    #[test]
    fn flatten_plan_holds_from_flatten_week() {
        let table = build(&test_bounds(), 4, 2);
        let plan = &table.plans[1];
        assert_eq!(plan.kind, PlanKind::RampUpFlatten);

        // Week 1 escalates; weeks 2..=4 are identical snapshots.
        assert_ne!(plan.weeks[0].lu_max_mins, 0.0);
        for w in 2..4 {
            let frozen = UsagePlanRow {
                week: plan.weeks[w].week,
                ..plan.weeks[1]
            };
            assert_eq!(plan.weeks[w], frozen, "week {} drifted", w + 1);
        }
    }

    #[test]
    fn flatten_plan_escalates_before_flatten_week() {
        let table = build(&test_bounds(), 6, 4);
        let plan = &table.plans[1];
        assert!(plan.weeks[1].lu_min_mins > plan.weeks[0].lu_min_mins);
        assert!(plan.weeks[2].lu_min_mins > plan.weeks[1].lu_min_mins);
        assert_eq!(plan.weeks[4].lu_min_mins, plan.weeks[3].lu_min_mins);
    }

    #[test]
    fn read_only_keystrokes_ignore_config() {
        let table = build(&test_bounds(), 5, 2);
        for row in &table.plans[2].weeks {
            assert_eq!((row.lu_min_keys, row.lu_max_keys), (5.0, 10.0));
            assert_eq!((row.mu_min_keys, row.mu_max_keys), (10.0, 15.0));
            assert_eq!((row.hu_min_keys, row.hu_max_keys), (15.0, 20.0));
        }
        // Minutes still ramp like plan 1.
        let first = &table.plans[2].weeks[0];
        let last = table.plans[2].weeks.last().unwrap();
        assert!(last.lu_min_mins > first.lu_min_mins);
    }

    #[test]
    fn ramp_down_is_non_increasing_with_inverted_pairs() {
        let table = build(&test_bounds(), 4, 2);
        let plan = &table.plans[3];
        assert_eq!(plan.kind, PlanKind::RampDown);

        let pairs = mins_pairs(plan);
        assert_eq!(pairs[0].0, 60.0);
        for w in 1..pairs.len() {
            assert!(pairs[w].0 <= pairs[w - 1].0, "week {} min increased", w + 1);
            assert!(pairs[w].1 <= pairs[w - 1].1, "week {} max increased", w + 1);
        }
        // The pair's max always trails one step (12.5) below its min.
        for (min, max) in pairs {
            assert!((min - max - 12.5).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_weeks_is_floored_to_one() {
        let table = build(&test_bounds(), 0, 0);
        assert_eq!(table.num_weeks, 1);
        assert_eq!(table.plans[0].weeks.len(), 1);
        // Single-week ramp-up snaps straight to the configured max.
        assert_eq!(table.plans[0].weeks[0].lu_max_mins, 60.0);
    }

    #[test]
    fn table_has_four_plans_in_order() {
        let table = build(&test_bounds(), 3, 2);
        let numbers: Vec<u32> = table.plans.iter().map(|p| p.kind.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        for plan in &table.plans {
            assert_eq!(plan.weeks.len(), 3);
            for (i, row) in plan.weeks.iter().enumerate() {
                assert_eq!(row.week, i as u32 + 1);
                assert_eq!(row.plan, plan.kind.number());
            }
        }
    }

    #[test]
    fn row_lookup() {
        let table = build(&test_bounds(), 4, 2);
        assert!(table.row(PlanKind::ReadOnly, 4).is_some());
        assert!(table.row(PlanKind::ReadOnly, 5).is_none());
        assert_eq!(table.row(PlanKind::RampDown, 2).unwrap().week, 2);
    }
}
