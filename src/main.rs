//! skillpath - skill graph recommendations, learning pathways and progression

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skillpath::app::AppContext;
use skillpath::cli::output::{emit_json, response_error};
use skillpath::cli::Cli;
use skillpath::Result;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.output_format.is_machine_readable() {
                // Structured error goes to stdout with the rest of the JSON
                if emit_json(&response_error(&e)).is_err() {
                    eprintln!("Error: {e}");
                }
            } else {
                let structured = e.to_structured();
                eprintln!("Error: {e}");
                eprintln!("  {}", structured.suggestion);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    skillpath::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    // Quiet installs no subscriber at all, so RUST_LOG cannot turn logs back on
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skillpath=info",
        1 => "info,skillpath=debug",
        2 => "debug,skillpath=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.output_format.is_machine_readable() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
