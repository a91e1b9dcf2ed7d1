//! Categories group videos into browsable rows.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::slugify;

/// A named grouping of videos such as "Trending" or "Documentaries".
///
/// Categories carry no scoring attributes beyond their identity; rows are
/// listed by ascending `display_order`, then by name.
///
/// # Examples
/// ```
/// use streamside_core::Category;
///
/// let category = Category::new(3, "New Releases").with_display_order(3);
/// assert_eq!(category.slug, "new-releases");
/// assert!(category.is_active);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Category {
    /// Unique identifier.
    pub id: u64,
    /// Unique display name.
    pub name: String,
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Optional free-form description.
    pub description: String,
    /// Position on listing pages; lower values come first.
    pub display_order: i32,
    /// Whether the category is shown at all.
    pub is_active: bool,
}

impl Category {
    /// Construct an active category with a slug derived from `name`.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        let display_name: String = name.into();
        Self {
            id,
            slug: slugify(&display_name),
            name: display_name,
            description: String::new(),
            display_order: 0,
            is_active: true,
        }
    }

    /// Override the derived slug.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Set the listing position.
    #[must_use]
    pub const fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the category active or hidden.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// Sort categories by display order, then name.
#[cfg(any(test, feature = "test-support"))]
pub(crate) fn sort_for_listing(categories: &mut [Category]) {
    categories.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.cmp(&b.name))
    });
}
