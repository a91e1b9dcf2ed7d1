//! JSON projections printed by the CLI.

use serde::Serialize;
use streamside_core::{BrowseRow, Category, Video};
use streamside_scorer::{ScoreBreakdown, ScoredVideo};

/// Card-sized view of a video.
#[derive(Debug, Serialize)]
pub(crate) struct VideoCard<'a> {
    pub(crate) id: u64,
    pub(crate) title: &'a str,
    pub(crate) slug: &'a str,
    pub(crate) thumbnail: &'a str,
    pub(crate) video_type: &'static str,
    pub(crate) year: i32,
    pub(crate) rating: String,
    pub(crate) duration: String,
    pub(crate) age_rating: &'static str,
    pub(crate) view_count: i64,
}

impl<'a> From<&'a Video> for VideoCard<'a> {
    fn from(video: &'a Video) -> Self {
        Self {
            id: video.id,
            title: &video.title,
            slug: &video.slug,
            thumbnail: &video.thumbnail,
            video_type: video.video_type.label(),
            year: video.year,
            rating: video.rating_display(),
            duration: video.duration_display(),
            age_rating: video.age_rating.as_str(),
            view_count: video.view_count,
        }
    }
}

/// Player page view of a video.
#[derive(Debug, Serialize)]
pub(crate) struct VideoDetail<'a> {
    #[serde(flatten)]
    pub(crate) card: VideoCard<'a>,
    pub(crate) description: &'a str,
    pub(crate) video_url: &'a str,
    pub(crate) trailer_url: &'a str,
    pub(crate) director: &'a str,
    pub(crate) cast: &'a str,
    pub(crate) language: &'a str,
}

impl<'a> From<&'a Video> for VideoDetail<'a> {
    fn from(video: &'a Video) -> Self {
        Self {
            card: VideoCard::from(video),
            description: &video.description,
            video_url: &video.video_url,
            trailer_url: &video.trailer_url,
            director: &video.director,
            cast: &video.cast,
            language: &video.language,
        }
    }
}

/// Hero banner slide for a featured video.
#[derive(Debug, Serialize)]
pub(crate) struct FeaturedCard<'a> {
    #[serde(flatten)]
    pub(crate) card: VideoCard<'a>,
    pub(crate) description: &'a str,
    pub(crate) hero_image: &'a str,
}

impl<'a> From<&'a Video> for FeaturedCard<'a> {
    fn from(video: &'a Video) -> Self {
        Self {
            card: VideoCard::from(video),
            description: &video.description,
            hero_image: &video.hero_image,
        }
    }
}

/// A ranked related video with its score components.
#[derive(Debug, Serialize)]
pub(crate) struct Recommendation<'a> {
    pub(crate) id: u64,
    pub(crate) title: &'a str,
    pub(crate) thumbnail: &'a str,
    pub(crate) score: f64,
    pub(crate) components: ScoreBreakdown,
}

impl<'a> From<&'a ScoredVideo> for Recommendation<'a> {
    fn from(scored: &'a ScoredVideo) -> Self {
        Self {
            id: scored.video.id,
            title: &scored.video.title,
            thumbnail: &scored.video.thumbnail,
            score: scored.score(),
            components: scored.breakdown,
        }
    }
}

/// Category heading for a row.
#[derive(Debug, Serialize)]
pub(crate) struct CategoryHeading<'a> {
    pub(crate) name: &'a str,
    pub(crate) slug: &'a str,
    pub(crate) description: &'a str,
}

impl<'a> From<&'a Category> for CategoryHeading<'a> {
    fn from(category: &'a Category) -> Self {
        Self {
            name: &category.name,
            slug: &category.slug,
            description: &category.description,
        }
    }
}

/// A category row of video cards.
#[derive(Debug, Serialize)]
pub(crate) struct Row<'a> {
    pub(crate) category: CategoryHeading<'a>,
    pub(crate) videos: Vec<VideoCard<'a>>,
}

impl<'a> From<&'a BrowseRow> for Row<'a> {
    fn from(row: &'a BrowseRow) -> Self {
        Self {
            category: CategoryHeading::from(&row.category),
            videos: cards(&row.videos),
        }
    }
}

pub(crate) fn cards(videos: &[Video]) -> Vec<VideoCard<'_>> {
    videos.iter().map(VideoCard::from).collect()
}

pub(crate) fn rows(rows: &[BrowseRow]) -> Vec<Row<'_>> {
    rows.iter().map(Row::from).collect()
}
