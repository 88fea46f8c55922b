pub mod config;
pub mod hourly;
pub mod plans;
pub mod simulate;
