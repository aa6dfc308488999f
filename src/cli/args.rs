use crate::core::ShutdownPolicy;
use crate::report::ReportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fleet_pipeline")]
#[command(about = "A concurrent pipeline that rates, filters and sorts vehicle records")]
#[command(version)]
pub struct Cli {
    /// Default log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rate every record of a JSON file and write the sorted survivors
    Run {
        /// Input JSON file (array of {"make", "year", "mileage"})
        input: PathBuf,

        /// Output report file
        #[arg(short, long, default_value = "results.txt")]
        output: PathBuf,

        /// Number of worker tasks (defaults to the CPU count)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Capacity of the bounded work queue
        #[arg(short = 'c', long, default_value = "15")]
        capacity: usize,

        /// Records whose age is at or above this value are filtered out
        #[arg(short = 't', long, default_value = "26")]
        threshold: i32,

        /// Reference year for the age calculation (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Mileage that counts as one year of age
        #[arg(long, default_value = "20000")]
        mileage_unit: f64,

        /// How workers are told that input is exhausted
        #[arg(long, value_enum, default_value_t = ShutdownPolicy::SentinelPerWorker)]
        shutdown: ShutdownPolicy,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
}
