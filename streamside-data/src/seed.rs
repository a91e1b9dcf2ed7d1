//! Catalog seed documents.
//!
//! A seed is a JSON document listing categories and videos. Videos refer to
//! categories by slug so a seed can be written by hand and applied to any
//! catalog database.

use std::io::{BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use streamside_core::video::DEFAULT_LANGUAGE;
use streamside_core::{AgeRating, Video, VideoError, VideoType};
use thiserror::Error;

use crate::fs::open_utf8_file;

const SAMPLE_CATALOG: &str = include_str!("../data/sample_catalog.json");

/// Categories and videos to load into a catalog database.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    /// Categories in the seed.
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
    /// Videos in the seed.
    #[serde(default)]
    pub videos: Vec<VideoSeed>,
}

/// A category entry in a [`CatalogSeed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySeed {
    /// Display name.
    pub name: String,
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Position among the category rows.
    #[serde(default)]
    pub order: i32,
}

/// A video entry in a [`CatalogSeed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSeed {
    /// Display title.
    pub title: String,
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Synopsis.
    #[serde(default)]
    pub description: String,
    /// Kind of entry.
    #[serde(default)]
    pub video_type: VideoType,
    /// Poster image URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Hero banner image URL.
    #[serde(default)]
    pub hero_image: String,
    /// Playback URL.
    #[serde(default)]
    pub video_url: String,
    /// Trailer URL.
    #[serde(default)]
    pub trailer_url: String,
    /// Release year.
    pub year: i32,
    /// Running time in minutes.
    #[serde(default)]
    pub duration_minutes: i32,
    /// Audience rating percentage.
    pub rating_percentage: u8,
    /// Audience classification.
    #[serde(default)]
    pub age_rating: AgeRating,
    /// Director credit.
    #[serde(default)]
    pub director: String,
    /// Comma-separated cast names.
    #[serde(default)]
    pub cast: String,
    /// Spoken language.
    #[serde(default = "default_language")]
    pub language: String,
    /// Comma-separated tags.
    #[serde(default)]
    pub tags: String,
    /// Whether the video rotates through the hero banner.
    #[serde(default)]
    pub is_featured: bool,
    /// Whether the video is visible.
    #[serde(default = "visible")]
    pub is_active: bool,
    /// Initial play count.
    #[serde(default)]
    pub view_count: i64,
    /// Slugs of the categories the video belongs to.
    #[serde(default)]
    pub category_slugs: Vec<String>,
}

const fn visible() -> bool {
    true
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_owned()
}

impl VideoSeed {
    /// Build an unsaved catalog video from the seed entry.
    ///
    /// The returned video has id `0` and no categories; both are assigned
    /// when the seed is persisted.
    #[must_use]
    pub fn to_video(&self, created_at: DateTime<Utc>) -> Video {
        let mut video = Video::new(0, self.title.clone(), created_at)
            .with_slug(self.slug.clone())
            .with_video_type(self.video_type)
            .with_thumbnail(self.thumbnail.clone())
            .with_hero_image(self.hero_image.clone())
            .with_trailer_url(self.trailer_url.clone())
            .with_credits(self.director.clone(), self.cast.clone())
            .with_language(self.language.clone())
            .with_tags(self.tags.clone())
            .with_year(self.year)
            .with_duration_minutes(self.duration_minutes)
            .with_rating(self.rating_percentage)
            .with_age_rating(self.age_rating)
            .with_featured(self.is_featured)
            .with_active(self.is_active)
            .with_view_count(self.view_count);
        video.description.clone_from(&self.description);
        video.video_url.clone_from(&self.video_url);
        video
    }

    /// Validate the entry with the catalog's video rules.
    ///
    /// # Errors
    /// Returns the first [`VideoError`] the entry violates.
    pub fn validate(&self) -> Result<(), VideoError> {
        self.to_video(DateTime::<Utc>::UNIX_EPOCH).validate()
    }
}

/// Errors raised while reading a catalog seed.
#[derive(Debug, Error)]
pub enum LoadSeedError {
    /// Opening the seed file failed.
    #[error("failed to open catalog seed at {path}")]
    Open {
        /// Requested seed path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Reading the seed file failed.
    #[error("failed to read catalog seed at {path}")]
    Read {
        /// Requested seed path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The seed file is not a valid catalog document.
    #[error("failed to parse catalog seed at {path}")]
    Parse {
        /// Requested seed path.
        path: Utf8PathBuf,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The bundled sample catalog is malformed.
    #[error("failed to parse the bundled sample catalog")]
    Sample {
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

/// Read a catalog seed from a JSON file.
///
/// # Errors
/// Returns [`LoadSeedError`] when the file cannot be opened or read, or does
/// not hold a catalog document.
pub fn load_catalog_seed(path: &Utf8Path) -> Result<CatalogSeed, LoadSeedError> {
    let file = open_utf8_file(path).map_err(|source| LoadSeedError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut contents = String::new();
    BufReader::new(file)
        .read_to_string(&mut contents)
        .map_err(|source| LoadSeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let seed: CatalogSeed =
        serde_json::from_str(&contents).map_err(|source| LoadSeedError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!(
        "loaded {} categories and {} videos from {path}",
        seed.categories.len(),
        seed.videos.len()
    );
    Ok(seed)
}

/// Return the bundled sample catalog of technology and science titles.
///
/// # Errors
/// Returns [`LoadSeedError::Sample`] if the bundled document is malformed.
pub fn sample_catalog() -> Result<CatalogSeed, LoadSeedError> {
    serde_json::from_str(SAMPLE_CATALOG).map_err(|source| LoadSeedError::Sample { source })
}
