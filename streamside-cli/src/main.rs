//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use env_logger::{Builder, Env, Target};
use streamside_cli::CliError;

fn main() -> eyre::Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .init();
    match streamside_cli::run() {
        // Help and version requests are reported by clap itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        other => Ok(other?),
    }
}
