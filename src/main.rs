use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fleet_pipeline::cli::{execute_run, Cli, Commands, RunConfig};

fn setup_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.parse()?)
        .from_env_lossy();

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(&cli.log_level)?;

    let result = match cli.command {
        Commands::Run {
            input,
            output,
            workers,
            capacity,
            threshold,
            year,
            mileage_unit,
            shutdown,
            format,
            quiet,
        } => {
            execute_run(RunConfig {
                input,
                output,
                workers,
                capacity,
                threshold,
                year,
                mileage_unit,
                shutdown,
                format,
                quiet,
            })
            .await
        }
    };

    if let Err(error) = result {
        tracing::error!("Application finished with an error: {:?}", error);
        eprintln!("❌ エラー: {error:#}");
        std::process::exit(1);
    }

    Ok(())
}
