//! Content-based recommendations for the Streamside catalog.
//!
//! Given a reference video and a pool of candidates that share at least one
//! category with it, the [`SimilarityScorer`] assigns every candidate an
//! additive score built from four signals:
//!
//! - **Category overlap** (40 points): the share of the reference's
//!   categories the candidate also carries.
//! - **Rating similarity** (30 points): how close the two ratings are.
//! - **Popularity** (20 points): the candidate's view count, saturating at
//!   1000 views.
//! - **Recency** (10 points): how close the two creation dates are, fading to
//!   zero over a year.
//!
//! Candidates are ranked by descending score with a stable sort and the
//! result is truncated to a [`RecommendationLimit`]. Scoring itself performs
//! no I/O; [`related_videos`] adapts it to any
//! [`CatalogStore`](streamside_core::CatalogStore).
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use streamside_core::Video;
//! use streamside_scorer::{RecommendationLimit, recommend};
//!
//! let jan = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
//! let old = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
//! let reference = Video::new(1, "Reference", jan).with_categories([1, 2]).with_rating(90);
//! let x = Video::new(2, "X", jan).with_categories([1]).with_rating(90).with_view_count(1000);
//! let y = Video::new(3, "Y", old).with_rating(40);
//!
//! let ranked = recommend(&reference, vec![y, x], RecommendationLimit::new(2));
//! let ids: Vec<_> = ranked.iter().map(|video| video.id).collect();
//! assert_eq!(ids, [2, 3]);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use streamside_core::{CatalogStore, Video};

mod error;
mod limit;
mod scorer;
mod weights;

pub use error::{RecommendError, RelatedVideosError};
pub use limit::RecommendationLimit;
pub use scorer::{ScoreBreakdown, ScoredVideo, SimilarityScorer};
pub use weights::SimilarityWeights;

/// Rank `candidates` by similarity to `reference` with the default weights.
///
/// The caller supplies a pool that is already filtered to active videos
/// sharing a category with the reference, excluding the reference itself.
#[must_use]
pub fn recommend<I>(reference: &Video, candidates: I, limit: RecommendationLimit) -> Vec<Video>
where
    I: IntoIterator<Item = Video>,
{
    SimilarityScorer::default().recommend(reference, candidates, limit)
}

/// Look up `video_id` in `store` and rank its candidate pool with the
/// default weights.
///
/// # Errors
/// See [`SimilarityScorer::related`].
pub fn related_videos<S>(
    store: &S,
    video_id: u64,
    limit: RecommendationLimit,
) -> Result<Vec<ScoredVideo>, RelatedVideosError<S::Error>>
where
    S: CatalogStore + ?Sized,
{
    SimilarityScorer::default().related(store, video_id, limit)
}

#[cfg(test)]
mod tests;
