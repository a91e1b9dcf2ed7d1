//! SQLite persistence for catalog seeds.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Error as SqliteError, OptionalExtension, Transaction};
use streamside_core::VideoError;
use streamside_core::store::schema::initialise_schema;
use thiserror::Error;

use crate::fs::ensure_parent_dir;
use crate::seed::{CatalogSeed, CategorySeed, VideoSeed};

/// Counts of rows created or found while applying a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    /// Categories inserted by this run.
    pub categories_created: usize,
    /// Categories whose slug was already present.
    pub categories_existing: usize,
    /// Videos inserted by this run.
    pub videos_created: usize,
    /// Videos whose slug was already present.
    pub videos_existing: usize,
}

/// Errors raised when persisting a catalog seed to SQLite.
#[derive(Debug, Error)]
pub enum PersistCatalogError {
    /// Failed to create the parent directory for the database.
    #[error("failed to create parent directory for {path}")]
    CreateDirectory {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Enabling SQLite foreign keys failed.
    #[error("failed to enable SQLite foreign keys")]
    ForeignKeys {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning the transaction failed.
    #[error("failed to begin catalog seeding transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating the catalog tables failed.
    #[error("failed to create catalog schema")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A category entry lacks a name or slug.
    #[error("category '{slug}' needs a non-empty name and slug")]
    InvalidCategory {
        /// Slug of the offending entry.
        slug: String,
    },
    /// A video entry breaks the catalog's video rules.
    #[error("video '{slug}' is invalid")]
    InvalidVideo {
        /// Slug of the offending entry.
        slug: String,
        /// Rule the entry violates.
        #[source]
        source: VideoError,
    },
    /// A video refers to a category slug that is not in the catalog.
    #[error("video '{video}' refers to unknown category '{category}'")]
    UnknownCategory {
        /// Slug of the video.
        video: String,
        /// Slug that could not be resolved.
        category: String,
    },
    /// Reading or writing a row failed.
    #[error("failed to {operation}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Committing the transaction failed.
    #[error("failed to commit catalog seeding transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Persist a catalog seed to a SQLite database on disk.
///
/// Categories and videos are matched by slug: entries already present are
/// left untouched and counted as existing, so applying the same seed twice
/// changes nothing. Category links are added for new and existing videos
/// alike. Parent directories and the catalog schema are created when
/// missing, and the whole seed is applied in one transaction. New videos
/// record `now` as their creation time.
///
/// Category references are stricter than get-or-create: a video naming a
/// category slug that is neither in the seed nor in the database aborts the
/// whole seed instead of silently dropping the link.
///
/// # Errors
/// Returns [`PersistCatalogError`] when the database cannot be prepared,
/// when an entry is invalid or names an unknown category, or when a write
/// fails. Nothing is written in that case.
pub fn persist_catalog_to_sqlite(
    path: &Utf8Path,
    seed: &CatalogSeed,
    now: DateTime<Utc>,
) -> Result<SeedReport, PersistCatalogError> {
    ensure_parent_dir(path).map_err(|source| PersistCatalogError::CreateDirectory {
        path: path.to_path_buf(),
        source,
    })?;
    let mut connection =
        Connection::open(path.as_std_path()).map_err(|source| PersistCatalogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    connection
        .pragma_update(None, "foreign_keys", true)
        .map_err(|source| PersistCatalogError::ForeignKeys { source })?;

    let transaction = connection
        .transaction()
        .map_err(|source| PersistCatalogError::BeginTransaction { source })?;
    initialise_schema(&transaction).map_err(|source| PersistCatalogError::CreateSchema { source })?;

    let mut report = SeedReport::default();
    for category in &seed.categories {
        if upsert_category(&transaction, category, now)? {
            report.categories_created += 1;
        } else {
            report.categories_existing += 1;
        }
    }
    for video in &seed.videos {
        if upsert_video(&transaction, video, now)? {
            report.videos_created += 1;
        } else {
            report.videos_existing += 1;
        }
    }

    transaction
        .commit()
        .map_err(|source| PersistCatalogError::Commit { source })?;
    log::info!(
        "seeded {path}: {} new and {} existing categories, {} new and {} existing videos",
        report.categories_created,
        report.categories_existing,
        report.videos_created,
        report.videos_existing
    );
    Ok(report)
}

/// Insert the category unless its slug exists. Returns whether it was new.
fn upsert_category(
    transaction: &Transaction<'_>,
    category: &CategorySeed,
    now: DateTime<Utc>,
) -> Result<bool, PersistCatalogError> {
    if category.name.trim().is_empty() || category.slug.trim().is_empty() {
        return Err(PersistCatalogError::InvalidCategory {
            slug: category.slug.clone(),
        });
    }
    if id_for_slug(transaction, "categories", &category.slug)?.is_some() {
        log::debug!("category '{}' already exists", category.slug);
        return Ok(false);
    }
    transaction
        .execute(
            "INSERT INTO categories (name, slug, description, display_order, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4, 1, ?5)",
            (
                &category.name,
                &category.slug,
                &category.description,
                category.order,
                now,
            ),
        )
        .map_err(|source| PersistCatalogError::Query {
            operation: "insert category",
            source,
        })?;
    log::debug!("created category '{}'", category.slug);
    Ok(true)
}

/// Insert the video unless its slug exists, then link its categories.
/// Returns whether the video was new.
fn upsert_video(
    transaction: &Transaction<'_>,
    seed: &VideoSeed,
    now: DateTime<Utc>,
) -> Result<bool, PersistCatalogError> {
    let video = seed.to_video(now);
    video
        .validate()
        .map_err(|source| PersistCatalogError::InvalidVideo {
            slug: seed.slug.clone(),
            source,
        })?;

    let existing = id_for_slug(transaction, "videos", &seed.slug)?;
    let (video_id, created) = if let Some(video_id) = existing {
        log::debug!("video '{}' already exists", seed.slug);
        (video_id, false)
    } else {
        transaction
            .execute(
                "INSERT INTO videos (title, slug, description, video_type, thumbnail, video_url,
                    year, duration_minutes, rating_percentage, age_rating, is_featured, is_active,
                    view_count, created_at, updated_at, hero_image, trailer_url, director,
                    cast_names, language, tags)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14,
                    ?15, ?16, ?17, ?18, ?19, ?20)",
                rusqlite::params![
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
            )
            .map_err(|source| PersistCatalogError::Query {
                operation: "insert video",
                source,
            })?;
        log::debug!("created video '{}'", seed.slug);
        (transaction.last_insert_rowid(), true)
    };

    for category_slug in &seed.category_slugs {
        let category_id = id_for_slug(transaction, "categories", category_slug)?.ok_or_else(
            || PersistCatalogError::UnknownCategory {
                video: seed.slug.clone(),
                category: category_slug.clone(),
            },
        )?;
        transaction
            .execute(
                "INSERT OR IGNORE INTO video_categories (video_id, category_id) VALUES (?1, ?2)",
                (video_id, category_id),
            )
            .map_err(|source| PersistCatalogError::Query {
                operation: "link video to category",
                source,
            })?;
    }
    Ok(created)
}

fn id_for_slug(
    transaction: &Transaction<'_>,
    table: &'static str,
    slug: &str,
) -> Result<Option<i64>, PersistCatalogError> {
    let sql = format!("SELECT id FROM {table} WHERE slug = ?1");
    transaction
        .query_row(&sql, [slug], |row| row.get(0))
        .optional()
        .map_err(|source| PersistCatalogError::Query {
            operation: "look up slug",
            source,
        })
}
