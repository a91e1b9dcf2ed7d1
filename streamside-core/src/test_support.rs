//! Test-only, in-memory `CatalogStore` implementation and fixture helpers
//! used by unit and behaviour tests.

use std::convert::Infallible;

use chrono::{DateTime, NaiveDate, Utc};

use crate::category::sort_for_listing;
use crate::store::sort_newest_first;
use crate::{CatalogStore, Category, Video};

/// In-memory `CatalogStore` implementation used in tests.
///
/// Queries perform linear scans and are intended only for small catalogs.
#[derive(Default, Debug, Clone)]
pub struct MemoryCatalog {
    categories: Vec<Category>,
    videos: Vec<Video>,
}

impl MemoryCatalog {
    /// Create a catalog from categories and videos.
    #[must_use]
    pub fn new<C, V>(categories: C, videos: V) -> Self
    where
        C: IntoIterator<Item = Category>,
        V: IntoIterator<Item = Video>,
    {
        Self {
            categories: categories.into_iter().collect(),
            videos: videos.into_iter().collect(),
        }
    }

    /// Create a catalog holding only videos.
    #[must_use]
    pub fn with_videos<V>(videos: V) -> Self
    where
        V: IntoIterator<Item = Video>,
    {
        Self::new(Vec::new(), videos)
    }

    fn select<F>(&self, predicate: F) -> Vec<Video>
    where
        F: Fn(&Video) -> bool,
    {
        let mut videos: Vec<_> = self
            .videos
            .iter()
            .filter(|video| predicate(video))
            .cloned()
            .collect();
        sort_newest_first(&mut videos);
        videos
    }
}

impl CatalogStore for MemoryCatalog {
    type Error = Infallible;

    fn video(&self, id: u64) -> Result<Option<Video>, Self::Error> {
        Ok(self.videos.iter().find(|video| video.id == id).cloned())
    }

    fn candidate_pool(&self, reference: &Video) -> Result<Vec<Video>, Self::Error> {
        Ok(self.select(|video| {
            video.is_active
                && video.id != reference.id
                && video.shared_category_count(reference) > 0
        }))
    }

    fn categories(&self) -> Result<Vec<Category>, Self::Error> {
        let mut categories: Vec<_> = self
            .categories
            .iter()
            .filter(|category| category.is_active)
            .cloned()
            .collect();
        sort_for_listing(&mut categories);
        Ok(categories)
    }

    fn category_videos(&self, category_id: u64) -> Result<Vec<Video>, Self::Error> {
        Ok(self.select(|video| video.is_active && video.categories.contains(&category_id)))
    }

    fn active_videos(&self) -> Result<Vec<Video>, Self::Error> {
        Ok(self.select(|video| video.is_active))
    }
}

/// Midnight UTC on the given calendar date.
///
/// # Panics
/// Panics when the date does not exist; fixtures are expected to be valid.
#[must_use]
pub fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"))
}

/// Write categories and videos into a fresh catalog database.
///
/// # Errors
/// Propagates any `rusqlite` failure.
#[cfg(feature = "store-sqlite")]
pub fn write_sqlite_catalog(
    path: &std::path::Path,
    categories: &[Category],
    videos: &[Video],
) -> rusqlite::Result<()> {
    let connection = rusqlite::Connection::open(path)?;
    crate::store::schema::initialise_schema(&connection)?;

    for category in categories {
        connection.execute(
            "INSERT INTO categories (id, name, slug, description, display_order, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                sql_id(category.id)?,
                &category.name,
                &category.slug,
                &category.description,
                category.display_order,
                category.is_active,
                DateTime::<Utc>::UNIX_EPOCH,
            ),
        )?;
    }

    for video in videos {
        let video_id = sql_id(video.id)?;
        connection.execute(
            "INSERT INTO videos (id, title, slug, description, video_type, thumbnail, video_url,
                year, duration_minutes, rating_percentage, age_rating, is_featured, is_active,
                view_count, created_at, updated_at, hero_image, trailer_url, director,
                cast_names, language, tags)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?15,
                ?16, ?17, ?18, ?19, ?20, ?21)",
            rusqlite::params![
                video_id,
                video.title,
                video.slug,
                video.description,
                video.video_type.as_str(),
                video.thumbnail,
                video.video_url,
                video.year,
                video.duration_minutes,
                video.rating_percentage,
                video.age_rating.as_str(),
                video.is_featured,
                video.is_active,
                video.view_count,
                video.created_at,
                video.hero_image,
                video.trailer_url,
                video.director,
                video.cast,
                video.language,
                video.tags,
            ],
        )?;
        for category_id in &video.categories {
            connection.execute(
                "INSERT INTO video_categories (video_id, category_id) VALUES (?1, ?2)",
                (video_id, sql_id(*category_id)?),
            )?;
        }
    }

    Ok(())
}

#[cfg(feature = "store-sqlite")]
fn sql_id(id: u64) -> rusqlite::Result<i64> {
    i64::try_from(id).map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))
}
