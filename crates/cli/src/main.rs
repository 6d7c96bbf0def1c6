//! `cicd` command-line entry point.

#![allow(clippy::print_stdout)]

mod cli;
mod commands;
mod tracing;

use crate::tracing::{TracingConfig, init_tracing};

fn main() -> miette::Result<()> {
    let cli = cli::parse();

    init_tracing(TracingConfig {
        format: cli.log_format,
        level: cli.log_level.into(),
        filter: cli.log_filter,
    })?;

    commands::run(cli.command)
}
