//! Unit coverage for similarity scoring and ranking.
#![forbid(unsafe_code)]

use rstest::{fixture, rstest};
use streamside_core::Video;
use streamside_core::test_support::{MemoryCatalog, timestamp};

use crate::{
    RecommendError, RecommendationLimit, RelatedVideosError, SimilarityScorer, SimilarityWeights,
    recommend, related_videos,
};

#[expect(
    clippy::float_arithmetic,
    reason = "test compares floating-point scores within a tolerance"
)]
fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9_f64,
        "expected approximately {expected}, got {actual}"
    );
}

fn ids(videos: &[Video]) -> Vec<u64> {
    videos.iter().map(|video| video.id).collect()
}

#[fixture]
fn reference() -> Video {
    Video::new(1, "Reference", timestamp(2025, 1, 1))
        .with_categories([1, 2])
        .with_rating(90)
}

#[fixture]
fn close_match() -> Video {
    Video::new(2, "X", timestamp(2025, 1, 1))
        .with_categories([1])
        .with_rating(90)
        .with_view_count(1000)
}

#[fixture]
fn distant_match() -> Video {
    Video::new(3, "Y", timestamp(2023, 1, 1)).with_rating(40)
}

#[rstest]
fn close_match_scores_eighty(reference: Video, close_match: Video) {
    let breakdown = SimilarityScorer::default().score(&reference, &close_match);
    assert_close(breakdown.category, 20.0);
    assert_close(breakdown.rating, 30.0);
    assert_close(breakdown.popularity, 20.0);
    assert_close(breakdown.recency, 10.0);
    assert_close(breakdown.total(), 80.0);
}

#[rstest]
fn distant_match_scores_fifteen(reference: Video, distant_match: Video) {
    let breakdown = SimilarityScorer::default().score(&reference, &distant_match);
    assert_close(breakdown.category, 0.0);
    assert_close(breakdown.rating, 15.0);
    assert_close(breakdown.popularity, 0.0);
    assert_close(breakdown.recency, 0.0);
    assert_close(breakdown.total(), 15.0);
}

#[rstest]
fn ranking_puts_best_match_first(reference: Video, close_match: Video, distant_match: Video) {
    let ranked = recommend(
        &reference,
        vec![distant_match, close_match],
        RecommendationLimit::new(2),
    );
    assert_eq!(ids(&ranked), vec![2, 3]);
}

#[rstest]
fn empty_pool_yields_empty_result(reference: Video) {
    assert!(recommend(&reference, Vec::new(), RecommendationLimit::DEFAULT).is_empty());
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(2, 2)]
#[case(10, 2)]
fn result_length_is_bounded_by_limit_and_pool(
    reference: Video,
    close_match: Video,
    distant_match: Video,
    #[case] limit: usize,
    #[case] expected: usize,
) {
    let ranked = recommend(
        &reference,
        vec![close_match, distant_match],
        RecommendationLimit::new(limit),
    );
    assert_eq!(ranked.len(), expected);
}

#[rstest]
fn ties_keep_input_order(reference: Video) {
    let twins = (10..15).map(|id| {
        Video::new(id, format!("Twin {id}"), timestamp(2025, 1, 1))
            .with_categories([1])
            .with_rating(90)
    });
    let ranked = recommend(&reference, twins, RecommendationLimit::DEFAULT);
    assert_eq!(ids(&ranked), vec![10, 11, 12, 13, 14]);
}

#[rstest]
#[case(90, 30.0)]
#[case(40, 15.0)]
#[case(0, 3.0)]
fn rating_similarity_fades_linearly(reference: Video, #[case] rating: u8, #[case] expected: f64) {
    let candidate = Video::new(2, "Candidate", timestamp(2025, 1, 1)).with_rating(rating);
    let breakdown = SimilarityScorer::default().score(&reference, &candidate);
    assert_close(breakdown.rating, expected);
}

#[test]
fn hundred_point_rating_gap_scores_zero() {
    let reference = Video::new(1, "Top", timestamp(2025, 1, 1)).with_rating(100);
    let candidate = Video::new(2, "Bottom", timestamp(2025, 1, 1)).with_rating(0);
    let breakdown = SimilarityScorer::default().score(&reference, &candidate);
    assert_close(breakdown.rating, 0.0);
}

#[test]
fn empty_reference_categories_do_not_divide_by_zero() {
    let reference = Video::new(1, "Uncategorised", timestamp(2025, 1, 1));
    let candidate = Video::new(2, "Tagged", timestamp(2025, 1, 1)).with_categories([1]);
    let breakdown = SimilarityScorer::default().score(&reference, &candidate);
    assert_close(breakdown.category, 0.0);
}

#[rstest]
fn full_overlap_scores_at_least_no_overlap(reference: Video) {
    let full = Video::new(2, "Full", timestamp(2025, 1, 1)).with_categories([1, 2]);
    let none = Video::new(3, "None", timestamp(2025, 1, 1)).with_categories([9]);
    let scorer = SimilarityScorer::default();
    assert!(scorer.score(&reference, &full).total() >= scorer.score(&reference, &none).total());
    assert_close(scorer.score(&reference, &full).category, 40.0);
}

#[rstest]
#[case(0, 0.0)]
#[case(500, 10.0)]
#[case(5000, 20.0)]
#[case(-500, -10.0)]
fn popularity_saturates_and_may_go_negative(
    reference: Video,
    #[case] views: i64,
    #[case] expected: f64,
) {
    let candidate = Video::new(2, "Candidate", timestamp(2025, 1, 1)).with_view_count(views);
    let breakdown = SimilarityScorer::default().score(&reference, &candidate);
    assert_close(breakdown.popularity, expected);
}

#[rstest]
#[case(timestamp(2025, 1, 1), 10.0)]
#[case(timestamp(2024, 1, 2), 0.0)]
#[case(timestamp(2023, 1, 1), 0.0)]
fn recency_fades_over_the_window(
    reference: Video,
    #[case] created_at: chrono::DateTime<chrono::Utc>,
    #[case] expected: f64,
) {
    let candidate = Video::new(2, "Candidate", created_at);
    let breakdown = SimilarityScorer::default().score(&reference, &candidate);
    assert_close(breakdown.recency, expected);
}

#[test]
#[expect(
    clippy::float_arithmetic,
    reason = "expected value is a fraction of the recency weight"
)]
fn recency_counts_calendar_days() {
    let reference = Video::new(1, "Late", timestamp(2025, 1, 1) + chrono::Duration::hours(23));
    let candidate = Video::new(2, "Early", timestamp(2025, 1, 2) + chrono::Duration::hours(1));
    let breakdown = SimilarityScorer::default().score(&reference, &candidate);
    assert_close(breakdown.recency, 10.0 * 364.0 / 365.0);
}

#[rstest]
#[case(-1)]
#[case(i64::MIN)]
fn negative_limits_are_rejected(#[case] limit: i64) {
    assert_eq!(
        RecommendationLimit::try_from(limit),
        Err(RecommendError::NegativeLimit { limit })
    );
}

#[test]
fn zero_limit_is_accepted() {
    assert_eq!(
        RecommendationLimit::try_from(0_i64),
        Ok(RecommendationLimit::new(0))
    );
}

#[rstest]
#[case(SimilarityWeights { category: -1.0, ..SimilarityWeights::default() })]
#[case(SimilarityWeights { rating: f64::NAN, ..SimilarityWeights::default() })]
#[case(SimilarityWeights { popularity_saturation: 0.0, ..SimilarityWeights::default() })]
#[case(SimilarityWeights { recency_window_days: f64::INFINITY, ..SimilarityWeights::default() })]
fn invalid_weights_are_rejected(#[case] weights: SimilarityWeights) {
    assert_eq!(
        SimilarityScorer::new(weights),
        Err(RecommendError::InvalidWeights)
    );
}

#[rstest]
fn custom_weights_change_the_ranking(reference: Video, close_match: Video) {
    let popularity_only = SimilarityWeights {
        category: 0.0,
        rating: 0.0,
        recency: 0.0,
        ..SimilarityWeights::default()
    };
    let scorer = SimilarityScorer::new(popularity_only).expect("valid weights");
    assert_close(scorer.score(&reference, &close_match).total(), 20.0);
}

fn catalog() -> MemoryCatalog {
    MemoryCatalog::with_videos(vec![
        Video::new(1, "Reference", timestamp(2025, 1, 1))
            .with_categories([1, 2])
            .with_rating(90),
        Video::new(2, "Sibling", timestamp(2025, 1, 1))
            .with_categories([1])
            .with_rating(90)
            .with_view_count(1000),
        Video::new(3, "Cousin", timestamp(2024, 6, 1))
            .with_categories([2])
            .with_rating(60),
        Video::new(4, "Stranger", timestamp(2025, 1, 1)).with_categories([7]),
        Video::new(5, "Retired", timestamp(2025, 1, 1))
            .with_categories([1])
            .with_active(false),
    ])
}

#[test]
fn related_videos_ranks_the_candidate_pool() {
    let ranked = related_videos(&catalog(), 1, RecommendationLimit::DEFAULT).expect("ranked");
    let ranked_ids: Vec<_> = ranked.iter().map(|scored| scored.video.id).collect();
    assert_eq!(ranked_ids, vec![2, 3]);
}

#[test]
fn related_videos_rejects_unknown_reference() {
    let result = related_videos(&catalog(), 42, RecommendationLimit::DEFAULT);
    assert!(matches!(
        result,
        Err(RelatedVideosError::UnknownVideo { id: 42 })
    ));
}

#[test]
fn related_videos_rejects_inactive_reference() {
    let result = related_videos(&catalog(), 5, RecommendationLimit::DEFAULT);
    assert!(matches!(
        result,
        Err(RelatedVideosError::InactiveReference { id: 5 })
    ));
}
