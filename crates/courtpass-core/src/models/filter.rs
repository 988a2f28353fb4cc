//! Filter state and declared filter categories

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Known filter names, in the order auto-detection tries them.
pub const FILTER_NAMES: [&str; 6] = [
    "Giftboxes",
    "For Her",
    "For Him",
    "Flowers",
    "Electronics",
    "Popular",
];

/// Order used to pick a display label among several active sub-options.
pub const DISPLAY_PRIORITY: [&str; 7] = [
    "New",
    "Popular",
    "For Him",
    "For Her",
    "Giftboxes",
    "Flowers",
    "Electronics",
];

/// UI-driven search and filter selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_text: String,
    pub selected_filters: BTreeSet<String>,
}

impl FilterState {
    #[must_use]
    pub fn with_search(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            selected_filters: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_filters<I, S>(filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_text: String::new(),
            selected_filters: filters.into_iter().map(Into::into).collect(),
        }
    }
}

/// A dropdown category and the sub-options it groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilterItem {
    pub category: &'static str,
    pub options: &'static [&'static str],
}

pub const CATEGORY_FILTERS: [CategoryFilterItem; 3] = [
    CategoryFilterItem {
        category: "Giftboxes",
        options: &["Giftboxes", "Flowers"],
    },
    CategoryFilterItem {
        category: "For Her",
        options: &["For Her", "For Him"],
    },
    CategoryFilterItem {
        category: "Popular",
        options: &["Popular", "New"],
    },
];

/// Sub-options declared for `category`; an undeclared category is its own only option.
pub fn category_options(category: &str) -> Vec<&str> {
    CATEGORY_FILTERS
        .iter()
        .find(|item| item.category == category)
        .map_or_else(|| vec![category], |item| item.options.to_vec())
}
