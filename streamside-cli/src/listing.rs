//! Browse and highlights commands for the Streamside CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use streamside_core::{BrowseFilter, browse, highlights};

use crate::output::{FeaturedCard, Row, VideoCard, cards, rows};
use crate::recommend::open_store;
use crate::{ARG_CATALOG_DB, ARG_FILTER, CliError, catalog_path, write_json};

/// CLI arguments for the `browse` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "browse",
    long_about = "List every active category with its videos, narrowed by \
                 a filter: all, series, movie, documentary, new (added in \
                 the last 30 days), or mylist (rated 85% or higher).",
    about = "List category rows"
)]
#[ortho_config(prefix = "STREAMSIDE")]
pub(crate) struct BrowseArgs {
    /// Filter applied to every row (defaults to `all`).
    #[arg(long = ARG_FILTER, value_name = "name")]
    #[serde(default)]
    pub(crate) filter: Option<String>,
    /// SQLite catalog to read (defaults to `catalog.db`).
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl BrowseArgs {
    fn into_config(self) -> Result<BrowseConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        BrowseConfig::try_from(merged)
    }
}

/// Resolved `browse` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BrowseConfig {
    pub(crate) filter: BrowseFilter,
    pub(crate) catalog_db: Utf8PathBuf,
}

impl TryFrom<BrowseArgs> for BrowseConfig {
    type Error = CliError;

    fn try_from(args: BrowseArgs) -> Result<Self, Self::Error> {
        let filter = match args.filter {
            Some(value) => value
                .parse::<BrowseFilter>()
                .map_err(|_| CliError::UnknownFilter { value })?,
            None => BrowseFilter::default(),
        };
        Ok(Self {
            filter,
            catalog_db: catalog_path(args.catalog_db),
        })
    }
}

/// CLI arguments for the `highlights` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "highlights",
    about = "Show featured videos, category rows, and top picks"
)]
#[ortho_config(prefix = "STREAMSIDE")]
pub(crate) struct HighlightsArgs {
    /// SQLite catalog to read (defaults to `catalog.db`).
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

#[derive(Debug, Serialize)]
struct BrowseOutput<'a> {
    filter: &'static str,
    title: &'static str,
    subtitle: &'static str,
    rows: Vec<Row<'a>>,
}

#[derive(Debug, Serialize)]
struct HighlightsOutput<'a> {
    featured: Vec<FeaturedCard<'a>>,
    rows: Vec<Row<'a>>,
    top_picks: Vec<VideoCard<'a>>,
    all_videos: Vec<VideoCard<'a>>,
}

pub(crate) fn run_browse(args: BrowseArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_browse_with(&config, chrono::Utc::now(), writer)
}

pub(crate) fn run_browse_with(
    config: &BrowseConfig,
    now: chrono::DateTime<chrono::Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let store = open_store(&config.catalog_db)?;
    let listed = browse(&store, config.filter, now)?;
    write_json(
        writer,
        &BrowseOutput {
            filter: config.filter.as_str(),
            title: config.filter.title(),
            subtitle: config.filter.subtitle(),
            rows: rows(&listed),
        },
    )
}

pub(crate) fn run_highlights(args: HighlightsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    run_highlights_with(&catalog_path(merged.catalog_db), writer)
}

pub(crate) fn run_highlights_with(
    catalog_db: &camino::Utf8Path,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let store = open_store(catalog_db)?;
    let page = highlights(&store)?;
    write_json(
        writer,
        &HighlightsOutput {
            featured: page.featured.iter().map(FeaturedCard::from).collect(),
            rows: rows(&page.rows),
            top_picks: cards(&page.top_picks),
            all_videos: cards(&page.all_videos),
        },
    )
}
