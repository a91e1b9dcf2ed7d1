//! Error types surfaced by the Streamside CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use streamside_core::SqliteCatalogStoreError;
use streamside_data::{LoadSeedError, PersistCatalogError, RecordViewError};
use streamside_scorer::{RecommendError, RelatedVideosError};
use thiserror::Error;

/// Errors emitted by the Streamside CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// Two options that exclude each other were both given.
    #[error("--{first} and --{second} cannot be combined")]
    ConflictingArguments {
        /// First flag name.
        first: &'static str,
        /// Second flag name.
        second: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The browse filter is not recognised.
    #[error(
        "unknown browse filter {value:?} (expected all, series, movie, documentary, new or mylist)"
    )]
    UnknownFilter {
        /// Value supplied by the user.
        value: String,
    },
    /// The recommendation limit is invalid.
    #[error(transparent)]
    Recommend(#[from] RecommendError),
    /// Reading the catalog seed failed.
    #[error(transparent)]
    LoadSeed(#[from] LoadSeedError),
    /// Writing the catalog seed failed.
    #[error(transparent)]
    PersistCatalog(#[from] PersistCatalogError),
    /// Opening or querying the catalog failed.
    #[error(transparent)]
    Catalog(#[from] SqliteCatalogStoreError),
    /// Ranking related videos failed.
    #[error(transparent)]
    Related(#[from] RelatedVideosError<SqliteCatalogStoreError>),
    /// Recording a play failed.
    #[error(transparent)]
    RecordView(#[from] RecordViewError),
    /// Serializing command output failed.
    #[error("failed to serialize command output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write command output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
