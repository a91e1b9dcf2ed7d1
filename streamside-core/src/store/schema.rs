//! SQLite schema shared by the catalog reader and the seeding tools.

use rusqlite::Connection;

/// Tables that must exist for a database to count as a catalog.
pub const CATALOG_TABLES: [&str; 3] = ["categories", "videos", "video_categories"];

/// DDL creating the catalog tables when missing.
///
/// Timestamps are stored as UTC text so ordering by `created_at` is a plain
/// string comparison.
pub const CATALOG_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    slug TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL DEFAULT '',
    display_order INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS videos (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL DEFAULT '',
    video_type TEXT NOT NULL DEFAULT 'movie',
    thumbnail TEXT NOT NULL DEFAULT '',
    hero_image TEXT NOT NULL DEFAULT '',
    video_url TEXT NOT NULL DEFAULT '',
    trailer_url TEXT NOT NULL DEFAULT '',
    year INTEGER NOT NULL,
    duration_minutes INTEGER NOT NULL DEFAULT 0,
    rating_percentage INTEGER NOT NULL CHECK (rating_percentage BETWEEN 0 AND 100),
    age_rating TEXT NOT NULL DEFAULT 'PG',
    director TEXT NOT NULL DEFAULT '',
    cast_names TEXT NOT NULL DEFAULT '',
    language TEXT NOT NULL DEFAULT 'English',
    tags TEXT NOT NULL DEFAULT '',
    is_featured INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    view_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS video_categories (
    video_id INTEGER NOT NULL REFERENCES videos (id) ON DELETE CASCADE,
    category_id INTEGER NOT NULL REFERENCES categories (id) ON DELETE CASCADE,
    PRIMARY KEY (video_id, category_id)
);
CREATE INDEX IF NOT EXISTS video_categories_by_category
    ON video_categories (category_id, video_id);
CREATE INDEX IF NOT EXISTS videos_by_created_at ON videos (created_at DESC, id);
";

/// Create the catalog tables and indexes if they are missing.
///
/// # Errors
/// Propagates any `rusqlite` failure while executing the DDL.
pub fn initialise_schema(connection: &Connection) -> rusqlite::Result<()> {
    connection.execute_batch(CATALOG_SCHEMA)
}

/// Report whether every catalog table exists.
///
/// # Errors
/// Propagates any `rusqlite` failure while inspecting `sqlite_master`.
pub fn has_catalog_schema(connection: &Connection) -> rusqlite::Result<bool> {
    let mut statement = connection
        .prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    for table in CATALOG_TABLES {
        let count: i64 = statement.query_row([table], |row| row.get(0))?;
        if count == 0 {
            return Ok(false);
        }
    }
    Ok(true)
}
