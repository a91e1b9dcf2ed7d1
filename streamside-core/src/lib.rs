//! Core domain types for the Streamside catalog.
//!
//! Videos and categories are plain value snapshots. Read access goes through
//! the [`CatalogStore`] trait so the recommendation scorer and the browse
//! queries never depend on a concrete database.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use streamside_core::{Video, VideoType};
//!
//! let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
//! let video = Video::new(1, "Neural Networks Explained", created)
//!     .with_video_type(VideoType::Short)
//!     .with_categories([4, 5])
//!     .with_rating(90);
//!
//! assert_eq!(video.slug, "neural-networks-explained");
//! assert_eq!(video.rating_display(), "90%");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod browse;
pub mod category;
pub mod classification;
pub mod store;
pub mod video;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use browse::{BrowseFilter, BrowseRow, Highlights, browse, highlights};
pub use category::Category;
pub use classification::{AgeRating, VideoType};
pub use store::CatalogStore;
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteCatalogStore, SqliteCatalogStoreError};
pub use video::{Video, VideoError, slugify};
