use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use usagesim_core::rng::rng_from_seed;
use usagesim_core::simulate::NoopJobHandle;
use usagesim_core::{SimulationConfig, UsageSimulator};

#[derive(Args)]
pub struct SimulateArgs {
    /// Config file to drive the simulation
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of synthetic users
    #[arg(long, default_value_t = 10)]
    pub users: u32,
    /// Seed for reproducible output; overrides the config's seed
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print counters instead of the full record set
    #[arg(long)]
    pub summary: bool,
}

#[derive(Serialize)]
struct Summary {
    users: u32,
    records: usize,
    days_processed: u32,
    weekend_days_skipped: u32,
    idle_user_days: u32,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = SimulationConfig::load_or_default(args.config.as_deref())?;
    let seed = args.seed.or(cfg.seed);

    let users: Vec<String> = (1..=args.users).map(|i| format!("user{i:04}")).collect();

    let sim = UsageSimulator::new(cfg)?;
    let mut rng = rng_from_seed(seed);
    let report = sim.run(&mut rng, &users, &mut NoopJobHandle)?;

    let json = if args.summary {
        serde_json::to_string_pretty(&Summary {
            users: args.users,
            records: report.records.len(),
            days_processed: report.days_processed,
            weekend_days_skipped: report.weekend_days_skipped,
            idle_user_days: report.idle_user_days,
        })?
    } else {
        serde_json::to_string_pretty(&report.records)?
    };
    println!("{json}");
    Ok(())
}
