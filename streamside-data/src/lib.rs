//! Write-side tooling for the Streamside catalog.
//!
//! Responsibilities:
//! - Read catalog seeds from JSON and provide the bundled sample catalog.
//! - Apply seeds to a SQLite catalog idempotently, matching rows by slug.
//! - Record plays against the catalog.
//!
//! Boundaries:
//! - Domain types and the read-side store live in `streamside-core`.
//! - The schema is owned by `streamside_core::store::schema`.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use chrono::Utc;
//! use streamside_data::{persist_catalog_to_sqlite, sample_catalog};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let seed = sample_catalog()?;
//! let report = persist_catalog_to_sqlite(Utf8Path::new("catalog.db"), &seed, Utc::now())?;
//! assert_eq!(report.videos_created + report.videos_existing, seed.videos.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod fs;
mod persist;
mod seed;
mod views;

pub use persist::{PersistCatalogError, SeedReport, persist_catalog_to_sqlite};
pub use seed::{
    CatalogSeed, CategorySeed, LoadSeedError, VideoSeed, load_catalog_seed, sample_catalog,
};
pub use views::{RecordViewError, record_view};

#[cfg(test)]
mod tests;
