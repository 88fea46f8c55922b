use std::path::PathBuf;

use clap::Subcommand;
use usagesim_core::SimulationConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a default config file
    Init {
        /// Target path; defaults to the standard location
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config as JSON
    Show {
        /// Config file to read
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Print the default config file location
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Init { path, force } => {
            let path = match path {
                Some(path) => path,
                None => SimulationConfig::default_path()?,
            };
            if path.exists() && !force {
                eprintln!("config already exists at {} (use --force)", path.display());
                std::process::exit(1);
            }
            let config = SimulationConfig::default();
            config.save(&path)?;
            println!("config written to {}", path.display());
        }
        ConfigAction::Show { path } => {
            let config = SimulationConfig::load_or_default(path.as_deref())?;
            config.validate()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Path => {
            println!("{}", SimulationConfig::default_path()?.display());
        }
    }
    Ok(())
}
