use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "usagesim", version, about = "Synthetic usage telemetry generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate single-day hourly usage payloads
    Hourly(commands::hourly::HourlyArgs),
    /// Print the four-plan usage table
    Plans(commands::plans::PlansArgs),
    /// Run the daily usage simulation
    Simulate(commands::simulate::SimulateArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Hourly(args) => commands::hourly::run(args),
        Commands::Plans(args) => commands::plans::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
