//! Data access traits for the catalog.
//!
//! The `CatalogStore` trait defines read-only queries over a consistent
//! snapshot of videos and categories. The recommendation scorer and the browse
//! queries depend only on this trait, so they can run against SQLite or an
//! in-memory fixture alike.

use crate::{Category, Video};

#[cfg(feature = "store-sqlite")]
pub mod schema;
#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteCatalogStore, SqliteCatalogStoreError};

/// Read-only access to persisted catalog entries.
///
/// Every query that returns videos lists them newest first (by `created_at`
/// descending, then by ascending id), which is the catalog's default order.
/// Ranking code relies on that order being deterministic because ties keep
/// their input position.
///
/// # Examples
///
/// ```rust
/// use streamside_core::{CatalogStore, Video};
///
/// fn related_titles<S: CatalogStore>(
///     store: &S,
///     reference: &Video,
/// ) -> Result<Vec<String>, S::Error> {
///     Ok(store
///         .candidate_pool(reference)?
///         .into_iter()
///         .map(|video| video.title)
///         .collect())
/// }
/// ```
pub trait CatalogStore {
    /// Error raised when the backing store cannot answer a query.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return the video with `id`, whether active or not.
    ///
    /// # Errors
    /// Returns [`Self::Error`] when the store cannot be read.
    fn video(&self, id: u64) -> Result<Option<Video>, Self::Error>;

    /// Return the recommendation candidate pool for `reference`.
    ///
    /// The pool holds every active video that shares at least one category
    /// with the reference, excluding the reference itself, each at most once.
    ///
    /// # Errors
    /// Returns [`Self::Error`] when the store cannot be read.
    fn candidate_pool(&self, reference: &Video) -> Result<Vec<Video>, Self::Error>;

    /// Return active categories ordered by display order, then name.
    ///
    /// # Errors
    /// Returns [`Self::Error`] when the store cannot be read.
    fn categories(&self) -> Result<Vec<Category>, Self::Error>;

    /// Return the active videos in a category.
    ///
    /// # Errors
    /// Returns [`Self::Error`] when the store cannot be read.
    fn category_videos(&self, category_id: u64) -> Result<Vec<Video>, Self::Error>;

    /// Return every active video.
    ///
    /// # Errors
    /// Returns [`Self::Error`] when the store cannot be read.
    fn active_videos(&self) -> Result<Vec<Video>, Self::Error>;
}

/// Sort videos into the catalog's default order: newest first, then by id.
///
/// Only in-memory stores sort in Rust; SQLite orders in the query.
#[cfg(any(test, feature = "test-support"))]
pub(crate) fn sort_newest_first(videos: &mut [Video]) {
    videos.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
