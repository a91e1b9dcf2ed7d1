//! Command-line interface for the Streamside catalog.
//!
//! Every subcommand reads or writes a SQLite catalog (`catalog.db` unless
//! `--catalog-db` says otherwise) and prints its result to stdout as JSON.
//! Options layer CLI flags over `STREAMSIDE_CMDS_*` environment variables
//! and configuration files.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod listing;
mod output;
mod recommend;
mod seed;

pub use error::CliError;

use listing::{BrowseArgs, HighlightsArgs};
use recommend::{PlayArgs, RecommendArgs};
use seed::SeedArgs;

pub(crate) const ARG_CATALOG_DB: &str = "catalog-db";
pub(crate) const ARG_SEED_PATH: &str = "path";
pub(crate) const ARG_SAMPLE: &str = "sample";
pub(crate) const ARG_VIDEO: &str = "video";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_FILTER: &str = "filter";
pub(crate) const ENV_SEED_PATH: &str = "STREAMSIDE_CMDS_SEED_PATH";
pub(crate) const ENV_RECOMMEND_VIDEO: &str = "STREAMSIDE_CMDS_RECOMMEND_VIDEO";
pub(crate) const ENV_PLAY_VIDEO: &str = "STREAMSIDE_CMDS_PLAY_VIDEO";
pub(crate) const DEFAULT_CATALOG_DB: &str = "catalog.db";
/// Number of related videos shown alongside a played video.
pub(crate) const PLAYER_RELATED_LIMIT: usize = 3;

/// Run the Streamside CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration layering, or
/// the selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Seed(args) => seed::run_seed(args, &mut stdout),
        Command::Recommend(args) => recommend::run_recommend(args, &mut stdout),
        Command::Play(args) => recommend::run_play(args, &mut stdout),
        Command::Browse(args) => listing::run_browse(args, &mut stdout),
        Command::Highlights(args) => listing::run_highlights(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "streamside",
    about = "Catalog, browsing, and recommendation tools for Streamside",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a catalog seed into the SQLite catalog.
    Seed(SeedArgs),
    /// Rank videos related to a reference video.
    Recommend(RecommendArgs),
    /// Record a play and show the video with related titles.
    Play(PlayArgs),
    /// List category rows for a browse filter.
    Browse(BrowseArgs),
    /// Show the featured videos, category rows, and top picks.
    Highlights(HighlightsArgs),
}

/// Resolve the catalog path, falling back to `catalog.db`.
pub(crate) fn catalog_path(configured: Option<Utf8PathBuf>) -> Utf8PathBuf {
    configured.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CATALOG_DB))
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match streamside_data::fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write `payload` as pretty-printed JSON followed by a newline.
pub(crate) fn write_json<T>(writer: &mut dyn Write, payload: &T) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let rendered = serde_json::to_string_pretty(payload).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(rendered.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
