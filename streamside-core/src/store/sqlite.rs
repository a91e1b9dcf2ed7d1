//! SQLite-backed catalog store.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OpenFlags, Params, Row};
use thiserror::Error;

use crate::{AgeRating, Category, Video, VideoType};

use super::CatalogStore;
use super::schema::has_catalog_schema;

const VIDEO_COLUMNS: &str = "v.id, v.title, v.slug, v.description, v.video_type, v.thumbnail, \
     v.video_url, v.year, v.duration_minutes, v.rating_percentage, v.age_rating, \
     v.is_featured, v.is_active, v.view_count, v.created_at, v.hero_image, v.trailer_url, \
     v.director, v.cast_names, v.language, v.tags";

const CATEGORY_IDS_SQL: &str =
    "SELECT category_id FROM video_categories WHERE video_id = ?1 ORDER BY category_id";

const ACTIVE_CATEGORIES_SQL: &str = "SELECT id, name, slug, description, display_order, is_active \
     FROM categories WHERE is_active = 1 ORDER BY display_order ASC, name ASC";

/// Error raised when reading the catalog database.
#[derive(Debug, Error)]
pub enum SqliteCatalogStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// The database does not contain the catalog tables.
    #[error("database at {path} has no catalog tables; seed it first")]
    MissingSchema {
        /// Location of the SQLite database on disk.
        path: PathBuf,
    },
    /// Preparing or executing a query failed.
    #[error("failed to {operation}: {source}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A requested identifier does not fit an SQLite integer.
    #[error("identifier {id} exceeds the SQLite integer range")]
    IdOutOfRange {
        /// Identifier that failed the conversion.
        id: u64,
    },
    /// A stored identifier was negative.
    #[error("stored identifier {id} is negative")]
    NegativeId {
        /// Identifier read from SQLite.
        id: i64,
    },
    /// A stored video type was not one of the enumerated values.
    #[error("video {id} has unknown video type '{value}'")]
    InvalidVideoType {
        /// Identifier of the affected video.
        id: u64,
        /// Raw value read from SQLite.
        value: String,
    },
    /// A stored age rating was not one of the enumerated values.
    #[error("video {id} has unknown age rating '{value}'")]
    InvalidAgeRating {
        /// Identifier of the affected video.
        id: u64,
        /// Raw value read from SQLite.
        value: String,
    },
    /// A stored rating did not fit a percentage.
    #[error("video {id} has rating {value} outside 0..=100")]
    RatingOutOfRange {
        /// Identifier of the affected video.
        id: u64,
        /// Raw value read from SQLite.
        value: i64,
    },
    /// Another thread panicked while holding the connection.
    #[error("catalog connection lock was poisoned")]
    ConnectionPoisoned,
}

/// Read-only catalog store backed by a SQLite database.
///
/// Queries run on demand against a single read-only connection guarded by a
/// mutex, so the store can be shared across threads.
pub struct SqliteCatalogStore {
    connection: Mutex<Connection>,
    path: PathBuf,
}

impl fmt::Debug for SqliteCatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCatalogStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteCatalogStore {
    /// Open a catalog database read-only.
    ///
    /// # Errors
    /// Returns [`SqliteCatalogStoreError::OpenDatabase`] when SQLite refuses
    /// the file and [`SqliteCatalogStoreError::MissingSchema`] when the
    /// catalog tables are absent.
    pub fn open<P>(database_path: P) -> Result<Self, SqliteCatalogStoreError>
    where
        P: AsRef<Path>,
    {
        let path = database_path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteCatalogStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;

        let ready = has_catalog_schema(&connection).map_err(query_error("inspect schema"))?;
        if !ready {
            return Err(SqliteCatalogStoreError::MissingSchema {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            connection: Mutex::new(connection),
            path: path.to_path_buf(),
        })
    }

    /// Location of the backing database.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteCatalogStoreError> {
        self.connection
            .lock()
            .map_err(|_| SqliteCatalogStoreError::ConnectionPoisoned)
    }

    fn query_videos<P: Params>(
        &self,
        operation: &'static str,
        sql: &str,
        params: P,
    ) -> Result<Vec<Video>, SqliteCatalogStoreError> {
        let connection = self.lock()?;
        let raw_rows = {
            let mut statement = connection
                .prepare_cached(sql)
                .map_err(query_error(operation))?;
            let rows = statement
                .query_map(params, RawVideo::from_row)
                .map_err(query_error(operation))?;
            rows.collect::<Result<Vec<_>, _>>()
                .map_err(query_error(operation))?
        };

        raw_rows
            .into_iter()
            .map(|raw| raw.into_video(&connection))
            .collect()
    }
}

impl CatalogStore for SqliteCatalogStore {
    type Error = SqliteCatalogStoreError;

    fn video(&self, id: u64) -> Result<Option<Video>, Self::Error> {
        let sql_id = to_sql_id(id)?;
        let mut videos = self.query_videos(
            "look up video",
            &video_query("WHERE v.id = ?1"),
            [sql_id],
        )?;
        Ok(videos.pop())
    }

    fn candidate_pool(&self, reference: &Video) -> Result<Vec<Video>, Self::Error> {
        let sql_id = to_sql_id(reference.id)?;
        self.query_videos(
            "load candidate pool",
            &video_query(
                "WHERE v.is_active = 1 AND v.id != ?1 AND EXISTS (
                    SELECT 1 FROM video_categories AS vc
                    JOIN video_categories AS rc ON rc.category_id = vc.category_id
                    WHERE vc.video_id = v.id AND rc.video_id = ?1
                )",
            ),
            [sql_id],
        )
    }

    fn categories(&self) -> Result<Vec<Category>, Self::Error> {
        let connection = self.lock()?;
        let mut statement = connection
            .prepare_cached(ACTIVE_CATEGORIES_SQL)
            .map_err(query_error("load categories"))?;
        let rows = statement
            .query_map((), |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, i32>(4)?,
                    row.get::<_, bool>(5)?,
                ))
            })
            .map_err(query_error("load categories"))?;

        let mut categories = Vec::new();
        for row in rows {
            let (raw_id, name, slug, description, display_order, is_active) =
                row.map_err(query_error("read category row"))?;
            categories.push(Category {
                id: from_sql_id(raw_id)?,
                name,
                slug,
                description,
                display_order,
                is_active,
            });
        }
        Ok(categories)
    }

    fn category_videos(&self, category_id: u64) -> Result<Vec<Video>, Self::Error> {
        let sql_id = to_sql_id(category_id)?;
        self.query_videos(
            "load category videos",
            &video_query(
                "WHERE v.is_active = 1 AND EXISTS (
                    SELECT 1 FROM video_categories AS vc
                    WHERE vc.video_id = v.id AND vc.category_id = ?1
                )",
            ),
            [sql_id],
        )
    }

    fn active_videos(&self) -> Result<Vec<Video>, Self::Error> {
        self.query_videos(
            "load active videos",
            &video_query("WHERE v.is_active = 1"),
            (),
        )
    }
}

/// Column values of a `videos` row before enum and id conversion.
struct RawVideo {
    id: i64,
    title: String,
    slug: String,
    description: String,
    video_type: String,
    thumbnail: String,
    video_url: String,
    year: i32,
    duration_minutes: i32,
    rating_percentage: i64,
    age_rating: String,
    is_featured: bool,
    is_active: bool,
    view_count: i64,
    created_at: DateTime<Utc>,
    hero_image: String,
    trailer_url: String,
    director: String,
    cast: String,
    language: String,
    tags: String,
}

impl RawVideo {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            slug: row.get(2)?,
            description: row.get(3)?,
            video_type: row.get(4)?,
            thumbnail: row.get(5)?,
            video_url: row.get(6)?,
            year: row.get(7)?,
            duration_minutes: row.get(8)?,
            rating_percentage: row.get(9)?,
            age_rating: row.get(10)?,
            is_featured: row.get(11)?,
            is_active: row.get(12)?,
            view_count: row.get(13)?,
            created_at: row.get(14)?,
            hero_image: row.get(15)?,
            trailer_url: row.get(16)?,
            director: row.get(17)?,
            cast: row.get(18)?,
            language: row.get(19)?,
            tags: row.get(20)?,
        })
    }

    fn into_video(self, connection: &Connection) -> Result<Video, SqliteCatalogStoreError> {
        let id = from_sql_id(self.id)?;
        let video_type: VideoType = self.video_type.parse().map_err(|_: String| {
            SqliteCatalogStoreError::InvalidVideoType {
                id,
                value: self.video_type.clone(),
            }
        })?;
        let age_rating: AgeRating = self.age_rating.parse().map_err(|_: String| {
            SqliteCatalogStoreError::InvalidAgeRating {
                id,
                value: self.age_rating.clone(),
            }
        })?;
        let rating_percentage = u8::try_from(self.rating_percentage)
            .ok()
            .filter(|rating| *rating <= crate::video::MAX_RATING)
            .ok_or(SqliteCatalogStoreError::RatingOutOfRange {
                id,
                value: self.rating_percentage,
            })?;
        let categories = load_category_ids(connection, self.id)?;

        Ok(Video {
            id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            video_type,
            thumbnail: self.thumbnail,
            hero_image: self.hero_image,
            video_url: self.video_url,
            trailer_url: self.trailer_url,
            year: self.year,
            duration_minutes: self.duration_minutes,
            rating_percentage,
            age_rating,
            director: self.director,
            cast: self.cast,
            language: self.language,
            tags: self.tags,
            categories,
            is_featured: self.is_featured,
            is_active: self.is_active,
            view_count: self.view_count,
            created_at: self.created_at,
        })
    }
}

fn video_query(filter: &str) -> String {
    format!("SELECT {VIDEO_COLUMNS} FROM videos AS v {filter} ORDER BY v.created_at DESC, v.id ASC")
}

fn load_category_ids(
    connection: &Connection,
    video_id: i64,
) -> Result<std::collections::BTreeSet<u64>, SqliteCatalogStoreError> {
    let mut statement = connection
        .prepare_cached(CATEGORY_IDS_SQL)
        .map_err(query_error("load video categories"))?;
    let rows = statement
        .query_map([video_id], |row| row.get::<_, i64>(0))
        .map_err(query_error("load video categories"))?;

    let mut categories = std::collections::BTreeSet::new();
    for row in rows {
        let raw_id = row.map_err(query_error("read video category row"))?;
        categories.insert(from_sql_id(raw_id)?);
    }
    Ok(categories)
}

fn query_error(operation: &'static str) -> impl Fn(rusqlite::Error) -> SqliteCatalogStoreError {
    move |source| SqliteCatalogStoreError::Query { operation, source }
}

fn to_sql_id(id: u64) -> Result<i64, SqliteCatalogStoreError> {
    i64::try_from(id).map_err(|_| SqliteCatalogStoreError::IdOutOfRange { id })
}

fn from_sql_id(id: i64) -> Result<u64, SqliteCatalogStoreError> {
    u64::try_from(id).map_err(|_| SqliteCatalogStoreError::NegativeId { id })
}
