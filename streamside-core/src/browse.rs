//! Listing queries composed from [`CatalogStore`] primitives.
//!
//! [`browse`] builds the per-category rows of the browse page for a
//! [`BrowseFilter`]; [`highlights`] gathers the featured banner, the
//! per-category home rows, and the top picks.

use chrono::{DateTime, Duration, Utc};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{CatalogStore, Category, Video, VideoType};

/// Maximum number of videos in a browse row.
pub const BROWSE_ROW_LIMIT: usize = 12;
/// Maximum number of videos in a home row.
pub const HOME_ROW_LIMIT: usize = 6;
/// Maximum number of featured videos in the hero rotation.
pub const FEATURED_LIMIT: usize = 5;
/// Maximum number of top picks.
pub const TOP_PICK_LIMIT: usize = 6;
/// Maximum number of videos in the fallback row when no category has any.
pub const FALLBACK_ROW_LIMIT: usize = 12;
/// Minimum rating for top picks and the "My List" view.
pub const HIGHLY_RATED: u8 = 85;
/// How far back the "New & Popular" view looks.
pub const NEW_RELEASE_WINDOW_DAYS: i64 = 30;

/// Filter applied to every category row on the browse page.
///
/// # Examples
/// ```
/// use streamside_core::BrowseFilter;
///
/// let filter: BrowseFilter = "series".parse().unwrap();
/// assert_eq!(filter, BrowseFilter::Series);
/// assert_eq!(filter.title(), "TV Shows");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowseFilter {
    /// Every active video.
    #[default]
    All,
    /// Series only.
    Series,
    /// Movies only.
    Movies,
    /// Documentaries only.
    Documentaries,
    /// Recently added videos, or the most watched when nothing is recent.
    New,
    /// Highly rated videos.
    MyList,
}

impl BrowseFilter {
    /// Return the query-string identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Series => "series",
            Self::Movies => "movie",
            Self::Documentaries => "documentary",
            Self::New => "new",
            Self::MyList => "mylist",
        }
    }

    /// Page heading for the filter.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Series => "TV Shows",
            Self::Movies => "Movies",
            Self::New => "New & Popular",
            Self::MyList => "My List",
            Self::All | Self::Documentaries => "Browse All Content",
        }
    }

    /// Page subheading for the filter.
    #[must_use]
    pub const fn subtitle(self) -> &'static str {
        match self {
            Self::Series => "Watch the latest series and TV shows",
            Self::Movies => "Explore our collection of movies",
            Self::New => "Recently added content and trending now",
            Self::MyList => "Your saved favorites",
            Self::All | Self::Documentaries => {
                "Discover thousands of shows and movies across all genres"
            }
        }
    }

    /// Narrow and reorder one category's videos.
    ///
    /// `videos` must arrive newest first, as every [`CatalogStore`] query
    /// returns them.
    #[must_use]
    pub fn apply(self, mut videos: Vec<Video>, now: DateTime<Utc>) -> Vec<Video> {
        match self {
            Self::All => videos,
            Self::Series => retain_type(videos, VideoType::Series),
            Self::Movies => retain_type(videos, VideoType::Movie),
            Self::Documentaries => retain_type(videos, VideoType::Documentary),
            Self::New => {
                let cutoff = now - Duration::days(NEW_RELEASE_WINDOW_DAYS);
                let recent: Vec<_> = videos
                    .iter()
                    .filter(|video| video.created_at >= cutoff)
                    .cloned()
                    .collect();
                if recent.is_empty() {
                    sort_most_watched(&mut videos);
                    videos
                } else {
                    recent
                }
            }
            Self::MyList => {
                videos.retain(|video| video.rating_percentage >= HIGHLY_RATED);
                videos.sort_by(|a, b| b.rating_percentage.cmp(&a.rating_percentage));
                videos
            }
        }
    }
}

impl std::fmt::Display for BrowseFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BrowseFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "series" => Ok(Self::Series),
            "movie" => Ok(Self::Movies),
            "documentary" => Ok(Self::Documentaries),
            "new" => Ok(Self::New),
            "mylist" => Ok(Self::MyList),
            _ => Err(format!("unknown browse filter '{s}'")),
        }
    }
}

/// One category and the videos listed under it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BrowseRow {
    /// Category heading the row.
    pub category: Category,
    /// Videos in display order.
    pub videos: Vec<Video>,
}

/// Content for the landing page.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Highlights {
    /// Featured videos for the hero rotation, newest first.
    pub featured: Vec<Video>,
    /// Short per-category rows.
    pub rows: Vec<BrowseRow>,
    /// Highly rated videos ordered by views, then rating.
    pub top_picks: Vec<Video>,
    /// Every active video, filled only when no category row has content.
    pub all_videos: Vec<Video>,
}

/// Build the browse page rows for `filter`.
///
/// Categories are visited in listing order; rows left empty by the filter
/// are skipped and the remainder hold at most [`BROWSE_ROW_LIMIT`] videos.
/// `now` anchors the "New & Popular" window.
///
/// # Errors
/// Propagates store failures.
pub fn browse<S>(
    store: &S,
    filter: BrowseFilter,
    now: DateTime<Utc>,
) -> Result<Vec<BrowseRow>, S::Error>
where
    S: CatalogStore + ?Sized,
{
    let mut rows = Vec::new();
    for category in store.categories()? {
        let mut videos = filter.apply(store.category_videos(category.id)?, now);
        if videos.is_empty() {
            continue;
        }
        videos.truncate(BROWSE_ROW_LIMIT);
        rows.push(BrowseRow { category, videos });
    }
    log::debug!("browse filter {filter} produced {} rows", rows.len());
    Ok(rows)
}

/// Gather the landing page content.
///
/// # Errors
/// Propagates store failures.
pub fn highlights<S>(store: &S) -> Result<Highlights, S::Error>
where
    S: CatalogStore + ?Sized,
{
    let active = store.active_videos()?;

    let featured = active
        .iter()
        .filter(|video| video.is_featured)
        .take(FEATURED_LIMIT)
        .cloned()
        .collect();

    let mut top_picks: Vec<_> = active
        .iter()
        .filter(|video| video.rating_percentage >= HIGHLY_RATED)
        .cloned()
        .collect();
    sort_most_watched(&mut top_picks);
    top_picks.truncate(TOP_PICK_LIMIT);

    let mut rows = Vec::new();
    for category in store.categories()? {
        let mut videos = store.category_videos(category.id)?;
        if videos.is_empty() {
            continue;
        }
        videos.truncate(HOME_ROW_LIMIT);
        rows.push(BrowseRow { category, videos });
    }

    let all_videos = if rows.is_empty() {
        active.into_iter().take(FALLBACK_ROW_LIMIT).collect()
    } else {
        Vec::new()
    };

    Ok(Highlights {
        featured,
        rows,
        top_picks,
        all_videos,
    })
}

fn retain_type(mut videos: Vec<Video>, video_type: VideoType) -> Vec<Video> {
    videos.retain(|video| video.video_type == video_type);
    videos
}

/// Order by view count, then rating, both descending.
fn sort_most_watched(videos: &mut [Video]) {
    videos.sort_by(|a, b| {
        b.view_count
            .cmp(&a.view_count)
            .then_with(|| b.rating_percentage.cmp(&a.rating_percentage))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryCatalog, timestamp};
    use rstest::{fixture, rstest};
    use std::str::FromStr;

    fn ids(videos: &[Video]) -> Vec<u64> {
        videos.iter().map(|video| video.id).collect()
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        timestamp(2026, 3, 1)
    }

    #[fixture]
    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new(
            vec![
                Category::new(1, "Trending").with_display_order(1),
                Category::new(2, "Documentaries").with_display_order(4),
                Category::new(3, "Hidden").with_active(false),
            ],
            vec![
                Video::new(1, "AI Documentary", timestamp(2026, 2, 20))
                    .with_video_type(VideoType::Documentary)
                    .with_categories([1, 2])
                    .with_rating(98)
                    .with_view_count(50)
                    .with_featured(true),
                Video::new(2, "Masterclass", timestamp(2025, 6, 1))
                    .with_video_type(VideoType::Series)
                    .with_categories([1])
                    .with_rating(95)
                    .with_view_count(900),
                Video::new(3, "Ocean Depths", timestamp(2024, 6, 1))
                    .with_video_type(VideoType::Documentary)
                    .with_categories([2])
                    .with_rating(70)
                    .with_view_count(400),
                Video::new(4, "Hidden Gem", timestamp(2025, 1, 1))
                    .with_categories([3])
                    .with_rating(99),
                Video::new(5, "Pulled Title", timestamp(2026, 2, 28))
                    .with_categories([1])
                    .with_active(false),
            ],
        )
    }

    #[rstest]
    #[case("", BrowseFilter::All)]
    #[case("movie", BrowseFilter::Movies)]
    #[case("documentary", BrowseFilter::Documentaries)]
    #[case("MyList", BrowseFilter::MyList)]
    fn filter_parses_query_values(#[case] raw: &str, #[case] expected: BrowseFilter) {
        assert_eq!(BrowseFilter::from_str(raw), Ok(expected));
    }

    #[test]
    fn unknown_filter_is_rejected() {
        assert!(BrowseFilter::from_str("trending").is_err());
    }

    #[rstest]
    fn all_filter_lists_active_categories_in_order(catalog: MemoryCatalog, now: DateTime<Utc>) {
        let rows = browse(&catalog, BrowseFilter::All, now).expect("browse");
        let names: Vec<_> = rows.iter().map(|row| row.category.name.as_str()).collect();
        assert_eq!(names, ["Trending", "Documentaries"]);
        let trending = rows.first().expect("trending row");
        assert_eq!(ids(&trending.videos), vec![1, 2]);
    }

    #[rstest]
    fn type_filter_skips_rows_without_matches(catalog: MemoryCatalog, now: DateTime<Utc>) {
        let rows = browse(&catalog, BrowseFilter::Series, now).expect("browse");
        assert_eq!(rows.len(), 1);
        let row = rows.first().expect("series row");
        assert_eq!(row.category.name, "Trending");
        assert_eq!(ids(&row.videos), vec![2]);
    }

    #[rstest]
    fn new_filter_keeps_recent_videos(catalog: MemoryCatalog, now: DateTime<Utc>) {
        let rows = browse(&catalog, BrowseFilter::New, now).expect("browse");
        let trending = rows.first().expect("trending row");
        assert_eq!(ids(&trending.videos), vec![1]);
    }

    #[rstest]
    fn new_filter_falls_back_to_most_watched(catalog: MemoryCatalog) {
        let later = timestamp(2027, 1, 1);
        let rows = browse(&catalog, BrowseFilter::New, later).expect("browse");
        let trending = rows.first().expect("trending row");
        assert_eq!(ids(&trending.videos), vec![2, 1]);
    }

    #[rstest]
    fn my_list_keeps_highly_rated_by_rating(catalog: MemoryCatalog, now: DateTime<Utc>) {
        let rows = browse(&catalog, BrowseFilter::MyList, now).expect("browse");
        let names: Vec<_> = rows.iter().map(|row| row.category.name.as_str()).collect();
        assert_eq!(names, ["Trending", "Documentaries"]);
        let trending = rows.first().expect("trending row");
        assert_eq!(ids(&trending.videos), vec![1, 2]);
    }

    #[rstest]
    fn browse_rows_are_capped(now: DateTime<Utc>) {
        let videos = (1..=20).map(|id| {
            Video::new(id, format!("Episode {id}"), timestamp(2025, 1, 1)).with_categories([1])
        });
        let catalog = MemoryCatalog::new(vec![Category::new(1, "Trending")], videos);
        let rows = browse(&catalog, BrowseFilter::All, now).expect("browse");
        let row = rows.first().expect("row");
        assert_eq!(row.videos.len(), BROWSE_ROW_LIMIT);
    }

    #[rstest]
    fn highlights_collect_featured_rows_and_picks(catalog: MemoryCatalog) {
        let page = highlights(&catalog).expect("highlights");
        assert_eq!(ids(&page.featured), vec![1]);
        assert_eq!(ids(&page.top_picks), vec![2, 1, 4]);
        assert_eq!(page.rows.len(), 2);
        assert!(page.all_videos.is_empty());
    }

    #[test]
    fn highlights_include_rows_for_any_category_slug() {
        let catalog = MemoryCatalog::new(
            vec![
                Category::new(1, "Trending").with_display_order(1),
                Category::new(2, "Science").with_display_order(2),
            ],
            vec![
                Video::new(1, "Space Exploration", timestamp(2025, 1, 1)).with_categories([2]),
                Video::new(2, "Code Breakers", timestamp(2025, 2, 1)).with_categories([1]),
            ],
        );
        let page = highlights(&catalog).expect("highlights");
        let slugs: Vec<_> = page.rows.iter().map(|row| row.category.slug.as_str()).collect();
        assert_eq!(slugs, ["trending", "science"]);
    }

    #[test]
    fn highlights_fall_back_to_all_videos_without_rows() {
        let catalog = MemoryCatalog::with_videos(vec![
            Video::new(1, "Loose", timestamp(2025, 1, 1)),
            Video::new(2, "Newer", timestamp(2025, 2, 1)),
        ]);
        let page = highlights(&catalog).expect("highlights");
        assert!(page.rows.is_empty());
        assert_eq!(ids(&page.all_videos), vec![2, 1]);
    }
}
