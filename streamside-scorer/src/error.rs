//! Error types raised while ranking related videos.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised when configuring or invoking the similarity scorer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    /// A recommendation limit below zero was requested.
    #[error("recommendation limit must not be negative (got {limit})")]
    NegativeLimit {
        /// Requested limit.
        limit: i64,
    },
    /// A recommendation limit does not fit the platform's `usize`.
    #[error("recommendation limit {limit} is too large")]
    LimitTooLarge {
        /// Requested limit.
        limit: i64,
    },
    /// Similarity weights were negative, non-finite, or left the
    /// saturation and recency window without a positive span.
    #[error("similarity weights must be finite and non-negative with positive spans")]
    InvalidWeights,
}

/// Errors raised while looking up related videos through a catalog store.
#[derive(Debug, Error)]
pub enum RelatedVideosError<E>
where
    E: std::error::Error + 'static,
{
    /// The reference video does not exist.
    #[error("video {id} does not exist")]
    UnknownVideo {
        /// Requested identifier.
        id: u64,
    },
    /// The reference video exists but is not active.
    #[error("video {id} is not active")]
    InactiveReference {
        /// Requested identifier.
        id: u64,
    },
    /// The catalog store failed to answer a query.
    #[error("catalog store query failed")]
    Store(#[source] E),
}
