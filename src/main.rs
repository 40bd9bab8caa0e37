// ABOUTME: Entry point for the slotctl CLI application.
// ABOUTME: Parses arguments and dispatches to the rolling-update handler.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use slotctl::output::{Output, OutputMode};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);

    let result = match cli.command {
        Commands::RollingUpdate {
            service,
            next_service,
            image,
            timeout,
            step_interval,
            count,
            cluster,
            region,
            endpoint,
            token,
            on_timeout,
        } => {
            commands::rolling_update(
                commands::RollingUpdateArgs {
                    service,
                    next_service,
                    image,
                    timeout,
                    step_interval,
                    count,
                    cluster,
                    region,
                    endpoint,
                    token,
                    on_timeout,
                },
                &mut output,
            )
            .await
        }
    };

    if let Err(e) = result {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}
