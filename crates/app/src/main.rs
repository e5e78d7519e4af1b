//! apiprobe binary.

use std::process::ExitCode;

use apiprobe::{Cli, Command, run};
use apiprobe_infrastructure::HarnessConfig;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Run(args) => match HarnessConfig::from_env() {
            Ok(config) => run(&args, config).await,
            Err(e) => Err(e.into()),
        },
    };

    match outcome {
        Ok(summary) => {
            println!("{summary}");
            if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
