//! Tunable weights for the similarity score.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::RecommendError;

/// Relative weighting of the four similarity signals.
///
/// The defaults give a maximum total of 100: category overlap dominates,
/// followed by rating similarity, popularity, and recency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    /// Points awarded when every reference category is shared.
    pub category: f64,
    /// Points awarded when the ratings are identical.
    pub rating: f64,
    /// Points awarded once a candidate reaches the popularity saturation.
    pub popularity: f64,
    /// Points awarded when both videos were added on the same day.
    pub recency: f64,
    /// View count at which the popularity signal saturates.
    pub popularity_saturation: f64,
    /// Days after which the recency signal drops to zero.
    pub recency_window_days: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            category: 40.0_f64,
            rating: 30.0_f64,
            popularity: 20.0_f64,
            recency: 10.0_f64,
            popularity_saturation: 1000.0_f64,
            recency_window_days: 365.0_f64,
        }
    }
}

impl SimilarityWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidWeights`] when a weight is negative
    /// or not finite, or when the saturation or window is not positive.
    pub fn validate(self) -> Result<Self, RecommendError> {
        let weights = [self.category, self.rating, self.popularity, self.recency];
        let spans = [self.popularity_saturation, self.recency_window_days];
        let weights_ok = weights
            .iter()
            .all(|weight| weight.is_finite() && weight.is_sign_positive());
        let spans_ok = spans
            .iter()
            .all(|span| span.is_finite() && *span > 0.0_f64);
        if weights_ok && spans_ok {
            Ok(self)
        } else {
            Err(RecommendError::InvalidWeights)
        }
    }
}
