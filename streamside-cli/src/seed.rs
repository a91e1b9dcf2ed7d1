//! Seed command implementation for the Streamside CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use streamside_data::{
    CatalogSeed, SeedReport, load_catalog_seed, persist_catalog_to_sqlite, sample_catalog,
};

use crate::{
    ARG_CATALOG_DB, ARG_SAMPLE, ARG_SEED_PATH, CliError, ENV_SEED_PATH, catalog_path,
    require_existing, write_json,
};

/// CLI arguments for the `seed` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "seed",
    long_about = "Load categories and videos from a JSON seed file into the \
                 SQLite catalog. Entries are matched by slug, so seeding the \
                 same file twice leaves the catalog unchanged. Pass --sample \
                 to load the bundled technology and science catalog instead.",
    about = "Load a catalog seed"
)]
#[ortho_config(prefix = "STREAMSIDE")]
pub(crate) struct SeedArgs {
    /// Path to a JSON catalog seed.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) path: Option<Utf8PathBuf>,
    /// Load the bundled sample catalog.
    #[arg(long = ARG_SAMPLE)]
    #[serde(default)]
    pub(crate) sample: bool,
    /// SQLite catalog to write (defaults to `catalog.db`).
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl SeedArgs {
    fn into_config(self) -> Result<SeedConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SeedConfig::try_from(merged)
    }
}

/// Where the seed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SeedSource {
    /// The bundled sample catalog.
    Sample,
    /// A JSON file on disk.
    File(Utf8PathBuf),
}

/// Resolved `seed` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeedConfig {
    pub(crate) source: SeedSource,
    pub(crate) catalog_db: Utf8PathBuf,
}

impl TryFrom<SeedArgs> for SeedConfig {
    type Error = CliError;

    fn try_from(args: SeedArgs) -> Result<Self, Self::Error> {
        let source = match (args.sample, args.path) {
            (true, Some(_)) => {
                return Err(CliError::ConflictingArguments {
                    first: ARG_SEED_PATH,
                    second: ARG_SAMPLE,
                });
            }
            (true, None) => SeedSource::Sample,
            (false, Some(path)) => SeedSource::File(path),
            (false, None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_SEED_PATH,
                    env: ENV_SEED_PATH,
                });
            }
        };
        Ok(Self {
            source,
            catalog_db: catalog_path(args.catalog_db),
        })
    }
}

#[derive(Debug, Serialize)]
struct SeedSummary<'a> {
    catalog_db: &'a str,
    categories_created: usize,
    categories_existing: usize,
    videos_created: usize,
    videos_existing: usize,
}

pub(crate) fn run_seed(args: SeedArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_seed_with(&config, writer)
}

pub(crate) fn run_seed_with(config: &SeedConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let seed = load_seed(&config.source)?;
    let report: SeedReport =
        persist_catalog_to_sqlite(&config.catalog_db, &seed, chrono::Utc::now())?;
    write_json(
        writer,
        &SeedSummary {
            catalog_db: config.catalog_db.as_str(),
            categories_created: report.categories_created,
            categories_existing: report.categories_existing,
            videos_created: report.videos_created,
            videos_existing: report.videos_existing,
        },
    )
}

fn load_seed(source: &SeedSource) -> Result<CatalogSeed, CliError> {
    match source {
        SeedSource::Sample => Ok(sample_catalog()?),
        SeedSource::File(path) => {
            require_existing(path, ARG_SEED_PATH)?;
            Ok(load_catalog_seed(path)?)
        }
    }
}
