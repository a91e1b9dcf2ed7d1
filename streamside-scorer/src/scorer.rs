//! Content-based similarity scoring and ranking.
#![forbid(unsafe_code)]

use serde::Serialize;
use streamside_core::{CatalogStore, Video};
use streamside_core::video::MAX_RATING;

use crate::{RecommendError, RecommendationLimit, RelatedVideosError, SimilarityWeights};

/// Per-signal contributions to a candidate's similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    /// Share of the reference's categories the candidate carries.
    pub category: f64,
    /// Closeness of the two ratings.
    pub rating: f64,
    /// Saturating view count signal. Negative view counts subtract.
    pub popularity: f64,
    /// Closeness of the two creation dates.
    pub recency: f64,
}

impl ScoreBreakdown {
    /// Sum of the four components. The total is not clamped.
    #[expect(
        clippy::float_arithmetic,
        reason = "the similarity score is a sum of floating-point components"
    )]
    #[must_use]
    pub fn total(&self) -> f64 {
        self.category + self.rating + self.popularity + self.recency
    }
}

/// A candidate video paired with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredVideo {
    /// Candidate video.
    pub video: Video,
    /// Score components relative to the reference video.
    pub breakdown: ScoreBreakdown,
}

impl ScoredVideo {
    /// Total similarity score.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.breakdown.total()
    }
}

/// Ranks candidate videos by similarity to a reference video.
///
/// The scorer is stateless apart from its weights, so a single instance can
/// be shared across threads.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use streamside_core::Video;
/// use streamside_scorer::{RecommendationLimit, SimilarityScorer};
///
/// let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
/// let reference = Video::new(1, "Reference", created).with_categories([1, 2]).with_rating(90);
/// let close = Video::new(2, "Close", created).with_categories([1]).with_rating(90);
///
/// let scorer = SimilarityScorer::default();
/// let ranked = scorer.rank(&reference, vec![close], RecommendationLimit::DEFAULT);
/// assert_eq!(ranked.len(), 1);
/// assert!((ranked[0].score() - 60.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimilarityScorer {
    weights: SimilarityWeights,
}

impl SimilarityScorer {
    /// Build a scorer from validated weights.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidWeights`] when the weights fail
    /// [`SimilarityWeights::validate`].
    pub fn new(weights: SimilarityWeights) -> Result<Self, RecommendError> {
        Ok(Self {
            weights: weights.validate()?,
        })
    }

    /// Weights used by this scorer.
    #[must_use]
    pub const fn weights(&self) -> &SimilarityWeights {
        &self.weights
    }

    /// Score `candidate` against `reference`.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "similarity scoring blends bounded ratios of catalog counts"
    )]
    #[must_use]
    pub fn score(&self, reference: &Video, candidate: &Video) -> ScoreBreakdown {
        let weights = &self.weights;

        let shared = reference.shared_category_count(candidate) as f64;
        let reference_categories = reference.categories.len().max(1) as f64;
        let category = shared / reference_categories * weights.category;

        let max_rating = f64::from(MAX_RATING);
        let rating_gap = (f64::from(reference.rating_percentage)
            - f64::from(candidate.rating_percentage))
        .abs();
        let rating = ((max_rating - rating_gap) / max_rating).max(0.0_f64) * weights.rating;

        let views = candidate.view_count as f64;
        let popularity =
            (views / weights.popularity_saturation).min(1.0_f64) * weights.popularity;

        let days_apart = calendar_days_apart(reference, candidate) as f64;
        let window = weights.recency_window_days;
        let recency = ((window - days_apart) / window).max(0.0_f64) * weights.recency;

        ScoreBreakdown {
            category,
            rating,
            popularity,
            recency,
        }
    }

    /// Score every candidate and keep the best `limit`, highest first.
    ///
    /// Sorting is stable, so equally scored candidates keep their input
    /// order.
    #[must_use]
    pub fn rank<I>(
        &self,
        reference: &Video,
        candidates: I,
        limit: RecommendationLimit,
    ) -> Vec<ScoredVideo>
    where
        I: IntoIterator<Item = Video>,
    {
        let mut scored: Vec<ScoredVideo> = candidates
            .into_iter()
            .map(|video| {
                let breakdown = self.score(reference, &video);
                ScoredVideo { video, breakdown }
            })
            .collect();
        let pool_size = scored.len();
        scored.sort_by(|a, b| b.score().total_cmp(&a.score()));
        scored.truncate(limit.get());
        log::debug!(
            "ranked {pool_size} candidates for video {}, kept {}",
            reference.id,
            scored.len()
        );
        scored
    }

    /// Rank candidates and return only the videos.
    #[must_use]
    pub fn recommend<I>(
        &self,
        reference: &Video,
        candidates: I,
        limit: RecommendationLimit,
    ) -> Vec<Video>
    where
        I: IntoIterator<Item = Video>,
    {
        self.rank(reference, candidates, limit)
            .into_iter()
            .map(|scored| scored.video)
            .collect()
    }

    /// Rank the catalog's candidate pool for the video with `video_id`.
    ///
    /// # Errors
    /// Returns [`RelatedVideosError::UnknownVideo`] when no such video
    /// exists, [`RelatedVideosError::InactiveReference`] when it is not
    /// active, and [`RelatedVideosError::Store`] when the store fails.
    pub fn related<S>(
        &self,
        store: &S,
        video_id: u64,
        limit: RecommendationLimit,
    ) -> Result<Vec<ScoredVideo>, RelatedVideosError<S::Error>>
    where
        S: CatalogStore + ?Sized,
    {
        let reference = store
            .video(video_id)
            .map_err(RelatedVideosError::Store)?
            .ok_or(RelatedVideosError::UnknownVideo { id: video_id })?;
        if !reference.is_active {
            return Err(RelatedVideosError::InactiveReference { id: video_id });
        }
        let pool = store
            .candidate_pool(&reference)
            .map_err(RelatedVideosError::Store)?;
        Ok(self.rank(&reference, pool, limit))
    }
}

/// Whole UTC calendar days between the two creation dates.
fn calendar_days_apart(reference: &Video, candidate: &Video) -> i64 {
    reference
        .created_at
        .date_naive()
        .signed_duration_since(candidate.created_at.date_naive())
        .num_days()
        .abs()
}
