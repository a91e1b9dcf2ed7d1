//! Catalog entries and their validation rules.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AgeRating, VideoType};

/// Inclusive bounds for a release year.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

/// Highest permitted rating percentage.
pub const MAX_RATING: u8 = 100;

/// Spoken language recorded when none is given.
pub const DEFAULT_LANGUAGE: &str = "English";

/// A movie, series, documentary, or short in the catalog.
///
/// The scoring-relevant fields are `categories`, `rating_percentage`,
/// `view_count`, `created_at`, and `is_active`. The remaining fields describe
/// the entry for listing and playback.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use streamside_core::Video;
///
/// let created = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
/// let video = Video::new(7, "Data Science Revolution", created)
///     .with_duration_minutes(92)
///     .with_view_count(1_500);
///
/// assert_eq!(video.duration_display(), "1h 32m");
/// assert!(video.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Video {
    /// Unique identifier.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Synopsis.
    pub description: String,
    /// Kind of entry.
    pub video_type: VideoType,
    /// Poster image URL.
    pub thumbnail: String,
    /// Wide banner image URL for the hero rotation. May be empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hero_image: String,
    /// Playback URL.
    pub video_url: String,
    /// Trailer URL. May be empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub trailer_url: String,
    /// Release year.
    pub year: i32,
    /// Running time in minutes.
    pub duration_minutes: i32,
    /// Audience rating as a percentage in `0..=100`.
    pub rating_percentage: u8,
    /// Audience classification.
    pub age_rating: AgeRating,
    /// Director credit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub director: String,
    /// Comma-separated cast names.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cast: String,
    /// Spoken language.
    #[cfg_attr(feature = "serde", serde(default = "default_language"))]
    pub language: String,
    /// Comma-separated free-form tags.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: String,
    /// Identifiers of the categories the video belongs to.
    pub categories: BTreeSet<u64>,
    /// Whether the video rotates through the hero banner.
    pub is_featured: bool,
    /// Whether the video is visible at all.
    pub is_active: bool,
    /// Number of recorded plays.
    pub view_count: i64,
    /// When the entry was added to the catalog.
    pub created_at: DateTime<Utc>,
}

/// Errors returned by [`Video::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VideoError {
    /// The title was blank.
    #[error("video title must not be empty")]
    EmptyTitle,
    /// The slug was blank.
    #[error("video slug must not be empty")]
    EmptySlug,
    /// The rating exceeded 100%.
    #[error("rating {rating}% is outside 0..=100")]
    RatingOutOfRange {
        /// Rejected rating.
        rating: u8,
    },
    /// The view count was negative.
    #[error("view count {view_count} must not be negative")]
    NegativeViewCount {
        /// Rejected view count.
        view_count: i64,
    },
    /// The release year fell outside 1900..=2100.
    #[error("release year {year} is outside 1900..=2100")]
    YearOutOfRange {
        /// Rejected year.
        year: i32,
    },
    /// The running time was negative.
    #[error("duration {minutes} minutes must not be negative")]
    NegativeDuration {
        /// Rejected duration.
        minutes: i32,
    },
}

impl Video {
    /// Construct an active, unfeatured video with catalog defaults.
    ///
    /// The slug is derived from the title and the release year from
    /// `created_at`; both can be overridden with the `with_*` helpers.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let display_title: String = title.into();
        Self {
            id,
            slug: slugify(&display_title),
            title: display_title,
            description: String::new(),
            video_type: VideoType::default(),
            thumbnail: String::new(),
            hero_image: String::new(),
            video_url: String::new(),
            trailer_url: String::new(),
            year: created_at.year(),
            duration_minutes: 0,
            rating_percentage: 0,
            age_rating: AgeRating::default(),
            director: String::new(),
            cast: String::new(),
            language: default_language(),
            tags: String::new(),
            categories: BTreeSet::new(),
            is_featured: false,
            is_active: true,
            view_count: 0,
            created_at,
        }
    }

    /// Replace the category memberships.
    #[must_use]
    pub fn with_categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        self.categories = categories.into_iter().collect();
        self
    }

    /// Set the rating percentage.
    #[must_use]
    pub const fn with_rating(mut self, rating_percentage: u8) -> Self {
        self.rating_percentage = rating_percentage;
        self
    }

    /// Set the recorded view count.
    #[must_use]
    pub const fn with_view_count(mut self, view_count: i64) -> Self {
        self.view_count = view_count;
        self
    }

    /// Set the kind of entry.
    #[must_use]
    pub const fn with_video_type(mut self, video_type: VideoType) -> Self {
        self.video_type = video_type;
        self
    }

    /// Set the audience classification.
    #[must_use]
    pub const fn with_age_rating(mut self, age_rating: AgeRating) -> Self {
        self.age_rating = age_rating;
        self
    }

    /// Set the running time.
    #[must_use]
    pub const fn with_duration_minutes(mut self, duration_minutes: i32) -> Self {
        self.duration_minutes = duration_minutes;
        self
    }

    /// Set the release year.
    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Override the derived slug.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Set the poster image URL.
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    /// Set the hero banner image URL.
    #[must_use]
    pub fn with_hero_image(mut self, hero_image: impl Into<String>) -> Self {
        self.hero_image = hero_image.into();
        self
    }

    /// Set the trailer URL.
    #[must_use]
    pub fn with_trailer_url(mut self, trailer_url: impl Into<String>) -> Self {
        self.trailer_url = trailer_url.into();
        self
    }

    /// Set the director and cast credits.
    #[must_use]
    pub fn with_credits(mut self, director: impl Into<String>, cast: impl Into<String>) -> Self {
        self.director = director.into();
        self.cast = cast.into();
        self
    }

    /// Set the spoken language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the comma-separated tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Mark the video active or hidden.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Mark the video as featured in the hero banner.
    #[must_use]
    pub const fn with_featured(mut self, is_featured: bool) -> Self {
        self.is_featured = is_featured;
        self
    }

    /// Check the invariants the catalog enforces on write.
    ///
    /// # Errors
    /// Returns the first [`VideoError`] found.
    pub fn validate(&self) -> Result<(), VideoError> {
        if self.title.trim().is_empty() {
            return Err(VideoError::EmptyTitle);
        }
        if self.slug.trim().is_empty() {
            return Err(VideoError::EmptySlug);
        }
        if self.rating_percentage > MAX_RATING {
            return Err(VideoError::RatingOutOfRange {
                rating: self.rating_percentage,
            });
        }
        if self.view_count < 0 {
            return Err(VideoError::NegativeViewCount {
                view_count: self.view_count,
            });
        }
        if !YEAR_RANGE.contains(&self.year) {
            return Err(VideoError::YearOutOfRange { year: self.year });
        }
        if self.duration_minutes < 0 {
            return Err(VideoError::NegativeDuration {
                minutes: self.duration_minutes,
            });
        }
        Ok(())
    }

    /// Format the running time as `"2h 15m"`, or `"45m"` under an hour.
    #[must_use]
    pub fn duration_display(&self) -> String {
        let hours = self.duration_minutes.div_euclid(60);
        let minutes = self.duration_minutes.rem_euclid(60);
        if hours > 0 {
            format!("{hours}h {minutes}m")
        } else {
            format!("{minutes}m")
        }
    }

    /// Format the rating as a percentage, e.g. `"98%"`.
    #[must_use]
    pub fn rating_display(&self) -> String {
        format!("{}%", self.rating_percentage)
    }

    /// Number of categories shared with `other`.
    #[must_use]
    pub fn shared_category_count(&self, other: &Self) -> usize {
        self.categories.intersection(&other.categories).count()
    }
}

/// Derive a lowercase, hyphen-separated slug from free text.
///
/// # Examples
/// ```
/// use streamside_core::slugify;
///
/// assert_eq!(slugify("Quantum Computing: Next Frontier"), "quantum-computing-next-frontier");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn video() -> Video {
        let created = Utc
            .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        Video::new(1, "AI Documentary: The Future", created)
            .with_duration_minutes(135)
            .with_rating(98)
    }

    #[rstest]
    fn new_video_derives_slug_and_year(video: Video) {
        assert_eq!(video.slug, "ai-documentary-the-future");
        assert_eq!(video.year, 2025);
        assert!(video.is_active);
        assert!(!video.is_featured);
        assert_eq!(video.language, DEFAULT_LANGUAGE);
        assert!(video.director.is_empty());
    }

    #[rstest]
    #[case(135, "2h 15m")]
    #[case(60, "1h 0m")]
    #[case(45, "45m")]
    #[case(0, "0m")]
    fn duration_display_formats_hours(video: Video, #[case] minutes: i32, #[case] expected: &str) {
        assert_eq!(video.with_duration_minutes(minutes).duration_display(), expected);
    }

    #[rstest]
    fn rating_display_appends_percent(video: Video) {
        assert_eq!(video.rating_display(), "98%");
    }

    #[rstest]
    fn validate_accepts_catalog_defaults(video: Video) {
        assert_eq!(video.validate(), Ok(()));
    }

    #[rstest]
    fn validate_rejects_rating_above_hundred(video: Video) {
        let err = video.with_rating(101).validate().unwrap_err();
        assert_eq!(err, VideoError::RatingOutOfRange { rating: 101 });
    }

    #[rstest]
    fn validate_rejects_negative_views(video: Video) {
        let err = video.with_view_count(-1).validate().unwrap_err();
        assert_eq!(err, VideoError::NegativeViewCount { view_count: -1 });
    }

    #[rstest]
    #[case(1899)]
    #[case(2101)]
    fn validate_rejects_year_outside_range(video: Video, #[case] year: i32) {
        let err = video.with_year(year).validate().unwrap_err();
        assert_eq!(err, VideoError::YearOutOfRange { year });
    }

    #[rstest]
    fn validate_rejects_blank_title(mut video: Video) {
        video.title = "   ".into();
        assert_eq!(video.validate(), Err(VideoError::EmptyTitle));
    }

    #[rstest]
    fn shared_categories_counts_intersection(video: Video) {
        let left = video.clone().with_categories([1, 2, 3]);
        let right = video.with_categories([2, 3, 4]);
        assert_eq!(left.shared_category_count(&right), 2);
    }

    #[rstest]
    #[case("Machine Learning Masterclass", "machine-learning-masterclass")]
    #[case("  Leading & trailing  ", "leading-trailing")]
    #[case("PG-13", "pg-13")]
    #[case("", "")]
    fn slugify_collapses_separators(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }
}
