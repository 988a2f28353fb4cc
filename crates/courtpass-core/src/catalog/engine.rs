//! Pure filter/search functions over the catalog.
//!
//! Nothing here holds state: the same catalog and `FilterState` always give
//! the same ordered result.

use std::collections::BTreeSet;

use crate::models::{category_options, FilterState, GiftItem, DISPLAY_PRIORITY, FILTER_NAMES};

/// Synonyms per lowercased filter name, consulted after exact and substring checks.
const SYNONYMS: [(&str, &[&str]); 6] = [
    (
        "for him",
        &["him", "men", "male", "man", "masculine", "boys", "guys"],
    ),
    (
        "for her",
        &["her", "women", "female", "woman", "feminine", "girls", "ladies"],
    ),
    (
        "popular",
        &["popular", "best", "top", "trending", "hot", "favorite"],
    ),
    ("giftboxes", &["gift", "box", "boxes", "package", "bundle"]),
    (
        "flowers",
        &["flower", "flowers", "bloom", "bouquet", "floral"],
    ),
    (
        "electronics",
        &["tech", "gadget", "electronics", "electronic", "device"],
    ),
];

/// Filters and search text actually applied for a `FilterState`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveQuery {
    pub filters: BTreeSet<String>,
    pub search_text: String,
    pub auto_detected: Option<&'static str>,
}

impl EffectiveQuery {
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.search_text.is_empty()
    }
}

/// Infer a filter name from free-text search. First declared filter that
/// matches wins.
pub fn detect_filter(search_text: &str) -> Option<&'static str> {
    let term = search_text.trim().to_lowercase();
    if term.is_empty() {
        return None;
    }

    let detected = FILTER_NAMES
        .into_iter()
        .find(|filter| matches_category(&term, &filter.to_lowercase()));
    if let Some(filter) = detected {
        tracing::debug!("Auto-detected filter: '{}' -> '{}'", term, filter);
    }
    detected
}

fn matches_category(term: &str, category: &str) -> bool {
    if term == category || category.contains(term) {
        return true;
    }
    SYNONYMS
        .iter()
        .find(|(name, _)| *name == category)
        .is_some_and(|(_, synonyms)| {
            synonyms.iter().any(|synonym| {
                term == *synonym || term.contains(synonym) || synonym.contains(term)
            })
        })
}

/// Resolve effective filters and search text.
///
/// Explicit selections always win. With none selected, a search that maps to a
/// filter becomes that filter and stops acting as substring search.
pub fn resolve_query(state: &FilterState) -> EffectiveQuery {
    if !state.selected_filters.is_empty() {
        return EffectiveQuery {
            filters: state.selected_filters.clone(),
            search_text: state.search_text.trim().to_string(),
            auto_detected: None,
        };
    }

    match detect_filter(&state.search_text) {
        Some(filter) => EffectiveQuery {
            filters: BTreeSet::from([filter.to_string()]),
            search_text: String::new(),
            auto_detected: Some(filter),
        },
        None => EffectiveQuery {
            filters: BTreeSet::new(),
            search_text: state.search_text.trim().to_string(),
            auto_detected: None,
        },
    }
}

/// `popular`/`new` test the item flags; any other name is a category substring.
pub fn item_matches_filter(item: &GiftItem, filter: &str) -> bool {
    let filter = filter.to_lowercase();
    match filter.as_str() {
        "popular" => item.is_popular,
        "new" => item.is_new,
        _ => item.category.to_lowercase().contains(&filter),
    }
}

fn item_matches_search(item: &GiftItem, search_lower: &str) -> bool {
    item.title.to_lowercase().contains(search_lower)
        || item.category.to_lowercase().contains(search_lower)
}

/// Items passing every effective filter and the effective search, in catalog order.
pub fn visible_items(catalog: &[GiftItem], state: &FilterState) -> Vec<GiftItem> {
    let query = resolve_query(state);
    let search_lower = query.search_text.to_lowercase();

    catalog
        .iter()
        .filter(|item| {
            query
                .filters
                .iter()
                .all(|filter| item_matches_filter(item, filter))
        })
        .filter(|item| search_lower.is_empty() || item_matches_search(item, &search_lower))
        .cloned()
        .collect()
}

/// Label for a category dropdown given the effective filters.
pub fn display_text(category: &str, effective: &BTreeSet<String>) -> String {
    display_text_with_options(category, &category_options(category), effective)
}

fn display_text_with_options(
    category: &str,
    options: &[&str],
    effective: &BTreeSet<String>,
) -> String {
    if effective.contains(category) {
        return category.to_string();
    }

    let active: BTreeSet<&str> = options
        .iter()
        .copied()
        .filter(|option| effective.contains(*option))
        .collect();
    if active.is_empty() {
        return category.to_string();
    }

    DISPLAY_PRIORITY
        .into_iter()
        .find(|candidate| active.contains(candidate))
        .or_else(|| active.first().copied())
        .unwrap_or(category)
        .to_string()
}

/// A category counts as active when it, or any of its sub-options, is effective.
pub fn is_filter_active(category: &str, effective: &BTreeSet<String>) -> bool {
    effective.contains(category)
        || category_options(category)
            .iter()
            .any(|option| effective.contains(*option))
}
