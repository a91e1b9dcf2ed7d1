//! Recommendation and playback commands for the Streamside CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use streamside_core::{CatalogStore, SqliteCatalogStore, SqliteCatalogStoreError};
use streamside_data::record_view;
use streamside_scorer::{RecommendationLimit, RelatedVideosError, related_videos};

use crate::output::{Recommendation, VideoDetail};
use crate::{
    ARG_CATALOG_DB, ARG_LIMIT, ARG_VIDEO, CliError, ENV_PLAY_VIDEO, ENV_RECOMMEND_VIDEO,
    PLAYER_RELATED_LIMIT, catalog_path, require_existing, write_json,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "recommend",
    long_about = "Rank the active videos that share a category with the \
                 reference video by category overlap, rating similarity, \
                 popularity, and recency, and print the best matches with \
                 their score components.",
    about = "Rank videos related to a reference video"
)]
#[ortho_config(prefix = "STREAMSIDE")]
pub(crate) struct RecommendArgs {
    /// Identifier of the reference video.
    #[arg(long = ARG_VIDEO, value_name = "id")]
    #[serde(default)]
    pub(crate) video: Option<u64>,
    /// Maximum number of related videos (defaults to 6).
    #[arg(long = ARG_LIMIT, value_name = "n", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) limit: Option<i64>,
    /// SQLite catalog to read (defaults to `catalog.db`).
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl RecommendArgs {
    fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    pub(crate) video: u64,
    pub(crate) limit: RecommendationLimit,
    pub(crate) catalog_db: Utf8PathBuf,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let video = args.video.ok_or(CliError::MissingArgument {
            field: ARG_VIDEO,
            env: ENV_RECOMMEND_VIDEO,
        })?;
        let limit = args
            .limit
            .map(RecommendationLimit::try_from)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            video,
            limit,
            catalog_db: catalog_path(args.catalog_db),
        })
    }
}

/// CLI arguments for the `play` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "play",
    long_about = "Record a play of an active video, then print the video \
                 with three related titles.",
    about = "Record a play and show related titles"
)]
#[ortho_config(prefix = "STREAMSIDE")]
pub(crate) struct PlayArgs {
    /// Identifier of the video to play.
    #[arg(long = ARG_VIDEO, value_name = "id")]
    #[serde(default)]
    pub(crate) video: Option<u64>,
    /// SQLite catalog to update (defaults to `catalog.db`).
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl PlayArgs {
    fn into_config(self) -> Result<PlayConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlayConfig::try_from(merged)
    }
}

/// Resolved `play` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlayConfig {
    pub(crate) video: u64,
    pub(crate) catalog_db: Utf8PathBuf,
}

impl TryFrom<PlayArgs> for PlayConfig {
    type Error = CliError;

    fn try_from(args: PlayArgs) -> Result<Self, Self::Error> {
        let video = args.video.ok_or(CliError::MissingArgument {
            field: ARG_VIDEO,
            env: ENV_PLAY_VIDEO,
        })?;
        Ok(Self {
            video,
            catalog_db: catalog_path(args.catalog_db),
        })
    }
}

#[derive(Debug, Serialize)]
struct RecommendOutput<'a> {
    video: u64,
    related: Vec<Recommendation<'a>>,
}

#[derive(Debug, Serialize)]
struct PlayOutput<'a> {
    video: VideoDetail<'a>,
    related: Vec<Recommendation<'a>>,
}

pub(crate) fn run_recommend(args: RecommendArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_recommend_with(&config, writer)
}

pub(crate) fn run_recommend_with(
    config: &RecommendConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let store = open_store(&config.catalog_db)?;
    let ranked = related_videos(&store, config.video, config.limit)?;
    write_json(
        writer,
        &RecommendOutput {
            video: config.video,
            related: ranked.iter().map(Recommendation::from).collect(),
        },
    )
}

pub(crate) fn run_play(args: PlayArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_play_with(&config, writer)
}

pub(crate) fn run_play_with(config: &PlayConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    require_existing(&config.catalog_db, ARG_CATALOG_DB)?;
    record_view(&config.catalog_db, config.video)?;
    let store = open_store(&config.catalog_db)?;
    let video = store
        .video(config.video)?
        .ok_or(RelatedVideosError::<SqliteCatalogStoreError>::UnknownVideo { id: config.video })?;
    let related = related_videos(
        &store,
        config.video,
        RecommendationLimit::new(PLAYER_RELATED_LIMIT),
    )?;
    write_json(
        writer,
        &PlayOutput {
            video: VideoDetail::from(&video),
            related: related.iter().map(Recommendation::from).collect(),
        },
    )
}

pub(crate) fn open_store(path: &camino::Utf8Path) -> Result<SqliteCatalogStore, CliError> {
    require_existing(path, ARG_CATALOG_DB)?;
    Ok(SqliteCatalogStore::open(path.as_std_path())?)
}
