//! Play counting for catalog videos.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use rusqlite::{Connection, Error as SqliteError, OpenFlags, OptionalExtension};
use thiserror::Error;

use crate::fs::file_is_file;

/// Errors raised when recording a play.
#[derive(Debug, Error)]
pub enum RecordViewError {
    /// The catalog database does not exist.
    #[error("catalog database {path} does not exist")]
    MissingDatabase {
        /// Requested database path.
        path: Utf8PathBuf,
    },
    /// Opening the database failed.
    #[error("failed to open SQLite database at {path}")]
    Open {
        /// Requested database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Probing the database path failed.
    #[error("failed to inspect {path}")]
    Inspect {
        /// Requested database path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The identifier cannot be stored as an SQLite integer.
    #[error("video id {id} exceeds SQLite i64 range")]
    IdOutOfRange {
        /// Requested identifier.
        id: u64,
    },
    /// No video has the identifier.
    #[error("video {id} does not exist")]
    UnknownVideo {
        /// Requested identifier.
        id: u64,
    },
    /// The video exists but is hidden.
    #[error("video {id} is not active")]
    InactiveVideo {
        /// Requested identifier.
        id: u64,
    },
    /// Updating or reading the view count failed.
    #[error("failed to {operation}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Increment the view count of an active video and return the new count.
///
/// Only the view count changes; the video's other fields and its
/// `updated_at` stamp are left alone.
///
/// # Errors
/// Returns [`RecordViewError::UnknownVideo`] or
/// [`RecordViewError::InactiveVideo`] when the video cannot be played, and
/// other [`RecordViewError`] variants when the database is unavailable.
pub fn record_view(path: &Utf8Path, video_id: u64) -> Result<i64, RecordViewError> {
    let exists = file_is_file(path).map_err(|source| RecordViewError::Inspect {
        path: path.to_path_buf(),
        source,
    })?;
    if !exists {
        return Err(RecordViewError::MissingDatabase {
            path: path.to_path_buf(),
        });
    }
    let connection = Connection::open_with_flags(
        path.as_std_path(),
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| RecordViewError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let sql_id =
        i64::try_from(video_id).map_err(|_| RecordViewError::IdOutOfRange { id: video_id })?;

    let updated: Option<i64> = connection
        .query_row(
            "UPDATE videos SET view_count = view_count + 1
             WHERE id = ?1 AND is_active = 1
             RETURNING view_count",
            [sql_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|source| RecordViewError::Query {
            operation: "increment view count",
            source,
        })?;
    if let Some(view_count) = updated {
        log::info!("recorded play of video {video_id}; {view_count} views");
        return Ok(view_count);
    }

    let active: Option<bool> = connection
        .query_row("SELECT is_active FROM videos WHERE id = ?1", [sql_id], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|source| RecordViewError::Query {
            operation: "look up video",
            source,
        })?;
    match active {
        Some(_) => Err(RecordViewError::InactiveVideo { id: video_id }),
        None => Err(RecordViewError::UnknownVideo { id: video_id }),
    }
}
