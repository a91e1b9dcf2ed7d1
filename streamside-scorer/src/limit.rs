//! Bounded result sizes for recommendation queries.
#![forbid(unsafe_code)]

use crate::RecommendError;

/// Maximum number of related videos returned by a query.
///
/// Limits are never negative. Converting from a signed integer rejects
/// negative values instead of clamping them.
///
/// # Examples
/// ```
/// use streamside_scorer::{RecommendError, RecommendationLimit};
///
/// assert_eq!(RecommendationLimit::default().get(), 6);
/// assert_eq!(RecommendationLimit::try_from(3_i64).map(RecommendationLimit::get), Ok(3));
/// assert_eq!(
///     RecommendationLimit::try_from(-1_i64),
///     Err(RecommendError::NegativeLimit { limit: -1 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecommendationLimit(usize);

impl RecommendationLimit {
    /// Number of related videos returned when no limit is given.
    pub const DEFAULT: Self = Self(6);

    /// Wrap an unsigned limit.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self(limit)
    }

    /// Return the wrapped limit.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for RecommendationLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<usize> for RecommendationLimit {
    fn from(limit: usize) -> Self {
        Self(limit)
    }
}

impl TryFrom<i64> for RecommendationLimit {
    type Error = RecommendError;

    fn try_from(limit: i64) -> Result<Self, Self::Error> {
        if limit < 0 {
            return Err(RecommendError::NegativeLimit { limit });
        }
        usize::try_from(limit)
            .map(Self)
            .map_err(|_| RecommendError::LimitTooLarge { limit })
    }
}

impl std::fmt::Display for RecommendationLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
