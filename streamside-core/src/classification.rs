//! Enumerated categorical values for catalog entries.
//!
//! The allowed values are fixed at compile time so storage and presentation
//! layers never have to reflect over a schema to discover them.
//!
//! # Examples
//! ```
//! use streamside_core::{AgeRating, VideoType};
//!
//! assert_eq!(VideoType::Series.as_str(), "series");
//! assert_eq!(VideoType::Series.label(), "TV Series");
//! assert_eq!("PG-13".parse::<AgeRating>(), Ok(AgeRating::Pg13));
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VideoType {
    /// Feature film.
    #[default]
    Movie,
    /// Episodic television series.
    Series,
    /// Documentary feature.
    Documentary,
    /// Short film.
    Short,
}

impl VideoType {
    /// Every supported video type, in display order.
    pub const ALL: [Self; 4] = [Self::Movie, Self::Series, Self::Documentary, Self::Short];

    /// Return the stored lowercase identifier.
    ///
    /// # Examples
    /// ```
    /// use streamside_core::VideoType;
    ///
    /// assert_eq!(VideoType::Documentary.as_str(), "documentary");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Documentary => "documentary",
            Self::Short => "short",
        }
    }

    /// Return the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Series => "TV Series",
            Self::Documentary => "Documentary",
            Self::Short => "Short Film",
        }
    }
}

impl std::fmt::Display for VideoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VideoType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            "documentary" => Ok(Self::Documentary),
            "short" => Ok(Self::Short),
            _ => Err(format!("unknown video type '{s}'")),
        }
    }
}

/// Audience classification of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AgeRating {
    /// General audiences.
    #[cfg_attr(feature = "serde", serde(rename = "G"))]
    G,
    /// Parental guidance suggested.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "PG"))]
    Pg,
    /// Parents strongly cautioned.
    #[cfg_attr(feature = "serde", serde(rename = "PG-13"))]
    Pg13,
    /// Restricted.
    #[cfg_attr(feature = "serde", serde(rename = "R"))]
    R,
    /// Adults only.
    #[cfg_attr(feature = "serde", serde(rename = "NC-17"))]
    Nc17,
}

impl AgeRating {
    /// Return the stored identifier, e.g. `PG-13`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::G => "G",
            Self::Pg => "PG",
            Self::Pg13 => "PG-13",
            Self::R => "R",
            Self::Nc17 => "NC-17",
        }
    }

    /// Return the long-form label shown next to the rating.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::G => "G - General",
            Self::Pg => "PG - Parental Guidance",
            Self::Pg13 => "PG-13",
            Self::R => "R - Restricted",
            Self::Nc17 => "NC-17",
        }
    }
}

impl std::fmt::Display for AgeRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgeRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "G" => Ok(Self::G),
            "PG" => Ok(Self::Pg),
            "PG-13" => Ok(Self::Pg13),
            "R" => Ok(Self::R),
            "NC-17" => Ok(Self::Nc17),
            _ => Err(format!("unknown age rating '{s}'")),
        }
    }
}
