//! Test helpers for building seeded catalogs and capturing command output.

use super::*;
use chrono::{TimeZone, Utc};
use streamside_data::{persist_catalog_to_sqlite, sample_catalog};
use tempfile::TempDir;

/// Temporary workspace holding a catalog seeded with the bundled sample.
pub(super) struct SeededCatalog {
    _dir: TempDir,
    root: Utf8PathBuf,
    db: Utf8PathBuf,
}

impl SeededCatalog {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let db = root.join("catalog.db");
        let seed = sample_catalog().expect("bundled sample");
        persist_catalog_to_sqlite(&db, &seed, seeded_at()).expect("seed catalog");
        Self {
            _dir: dir,
            root,
            db,
        }
    }

    pub(super) fn db(&self) -> &Utf8Path {
        &self.db
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Time at which the sample catalog is seeded.
pub(super) fn seeded_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Parse the JSON a command wrote into `buffer`.
pub(super) fn parse_output(buffer: &[u8]) -> serde_json::Value {
    serde_json::from_slice(buffer).expect("command output should be JSON")
}

/// Collect the `id` fields of a JSON array.
pub(super) fn ids(value: &serde_json::Value) -> Vec<u64> {
    value
        .as_array()
        .expect("JSON array")
        .iter()
        .map(|entry| entry["id"].as_u64().expect("numeric id"))
        .collect()
}
