mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_batch, run_extract};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Extract {
            input,
            motion_events,
            url,
            max_elements,
            no_interactions: _,
            fast,
            emit,
            out,
            format,
        } => {
            run_extract(
                &raw_args,
                args.config,
                args.verbose,
                input,
                motion_events,
                url,
                max_elements,
                fast,
                emit,
                out,
                format,
            )
            .await
        }
        Commands::Batch {
            inputs,
            out_dir,
            emit,
            jobs,
            format,
        } => run_batch(args.config, args.verbose, inputs, out_dir, emit, jobs, format).await,
    }
}

/// Logs go to stderr; stdout carries the JSON envelope. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
