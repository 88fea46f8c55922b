use std::path::PathBuf;

use clap::Args;
use usagesim_core::plan::build;
use usagesim_core::SimulationConfig;

#[derive(Args)]
pub struct PlansArgs {
    /// Config file to read bounds and date range from
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the number of plan weeks
    #[arg(long)]
    pub weeks: Option<u32>,
    /// Override the week at which the flatten plan levels off
    #[arg(long)]
    pub flatten_week: Option<u32>,
}

pub fn run(args: PlansArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = SimulationConfig::load_or_default(args.config.as_deref())?;
    cfg.validate()?;

    let num_weeks = args.weeks.unwrap_or_else(|| cfg.num_weeks());
    let flatten_week = args
        .flatten_week
        .unwrap_or_else(|| cfg.flatten_week(num_weeks));

    let table = build(&cfg.bounds, num_weeks, flatten_week);
    let json = serde_json::to_string_pretty(&table)?;
    println!("{json}");
    Ok(())
}
