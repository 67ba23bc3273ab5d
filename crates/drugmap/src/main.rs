use std::process::ExitCode;

use clap::Parser;
use console::style;

use drugmap::cli::{self, Cli};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{} [{}] {}: {e:#}",
                style("error:").red().bold(),
                cli::error_kind(&e),
                cli.path.display()
            );
            ExitCode::FAILURE
        }
    }
}
