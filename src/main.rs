//! Shopcart CLI

use std::{io, process::ExitCode};

use clap::Parser;
use shopcart::{cli, config::Config, observability};

#[expect(
    clippy::print_stderr,
    reason = "errors are reported to the terminal before exiting"
)]
fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(error) = observability::init_subscriber(&config.logging) {
        eprintln!("{error}");

        return ExitCode::FAILURE;
    }

    match cli::run(&config, io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "command failed");
            eprintln!("error: {error}");

            ExitCode::FAILURE
        }
    }
}
