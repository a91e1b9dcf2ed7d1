//! Facade crate for the Streamside catalog and recommendation engine.
//!
//! This crate re-exports the catalog domain types and the similarity scorer,
//! and exposes the SQLite store and catalog seeding behind feature flags.

#![forbid(unsafe_code)]

pub use streamside_core::{
    AgeRating, BrowseFilter, BrowseRow, CatalogStore, Category, Highlights, Video, VideoError,
    VideoType, browse, highlights,
};
pub use streamside_scorer::{
    RecommendError, RecommendationLimit, RelatedVideosError, ScoreBreakdown, ScoredVideo,
    SimilarityScorer, SimilarityWeights, recommend, related_videos,
};

#[cfg(feature = "store-sqlite")]
pub use streamside_core::{SqliteCatalogStore, SqliteCatalogStoreError};

#[cfg(feature = "data")]
pub use streamside_data::{
    CatalogSeed, PersistCatalogError, RecordViewError, SeedReport, load_catalog_seed,
    persist_catalog_to_sqlite, record_view, sample_catalog,
};
