use clap::Args;
use usagesim_core::hourly::{generate, HourWindow};
use usagesim_core::rng::rng_from_seed;

#[derive(Args)]
pub struct HourlyArgs {
    /// Minimum daily minutes in use
    #[arg(long, default_value_t = 60)]
    pub min: u32,
    /// Maximum daily minutes in use
    #[arg(long, default_value_t = 480)]
    pub max: u32,
    /// First active hour (0-23)
    #[arg(long, default_value_t = 8)]
    pub start_hour: u8,
    /// Last active hour (0-23, inclusive)
    #[arg(long, default_value_t = 17)]
    pub end_hour: u8,
    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of payloads to generate
    #[arg(long, default_value_t = 1)]
    pub count: u32,
}

pub fn run(args: HourlyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let window = HourWindow::new(args.start_hour, args.end_hour)?;
    let mut rng = rng_from_seed(args.seed);

    let payloads: Vec<_> = (0..args.count)
        .map(|_| generate(&mut rng, args.min, args.max, window))
        .collect();

    let json = if payloads.len() == 1 {
        serde_json::to_string_pretty(&payloads[0])?
    } else {
        serde_json::to_string_pretty(&payloads)?
    };
    println!("{json}");
    Ok(())
}
