//! Browsing state for the gifts screen.

use std::collections::{BTreeSet, HashMap};

use super::engine::{self, EffectiveQuery};
use super::favorites::Favorites;
use super::seed_catalog;
use crate::models::{FilterState, GiftId, GiftItem};

/// Single owner of the catalog, the filter state, favorites and the
/// dropdown-label memo.
#[derive(Debug, Clone)]
pub struct GiftBrowser {
    catalog: Vec<GiftItem>,
    state: FilterState,
    favorites: Favorites,
    label_cache: HashMap<String, String>,
    label_cache_filters: BTreeSet<String>,
}

impl Default for GiftBrowser {
    fn default() -> Self {
        Self::new(seed_catalog())
    }
}

impl GiftBrowser {
    pub fn new(catalog: Vec<GiftItem>) -> Self {
        Self {
            catalog,
            state: FilterState::default(),
            favorites: Favorites::new(),
            label_cache: HashMap::new(),
            label_cache_filters: BTreeSet::new(),
        }
    }

    pub fn catalog(&self) -> &[GiftItem] {
        &self.catalog
    }

    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn item(&self, id: GiftId) -> Option<&GiftItem> {
        self.catalog.iter().find(|item| item.id == id)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
    }

    /// Toggle an explicit filter. Picking a filter clears the search box.
    pub fn select_filter(&mut self, filter: &str) {
        if self.state.selected_filters.remove(filter) {
            tracing::debug!(
                "Filter '{}' removed. Active filters: {:?}",
                filter,
                self.state.selected_filters
            );
        } else {
            self.state.selected_filters.insert(filter.to_string());
            tracing::debug!(
                "Filter '{}' added. Active filters: {:?}",
                filter,
                self.state.selected_filters
            );
        }
        self.state.search_text.clear();
    }

    pub fn clear_search(&mut self) {
        self.state.search_text.clear();
    }

    pub fn clear_filters(&mut self) {
        self.state.selected_filters.clear();
    }

    /// "View all": drop both filters and search.
    pub fn reset(&mut self) {
        self.clear_filters();
        self.clear_search();
    }

    pub fn query(&self) -> EffectiveQuery {
        engine::resolve_query(&self.state)
    }

    pub fn effective_filters(&self) -> BTreeSet<String> {
        self.query().filters
    }

    pub fn effective_search_text(&self) -> String {
        self.query().search_text
    }

    pub fn visible_items(&self) -> Vec<GiftItem> {
        engine::visible_items(&self.catalog, &self.state)
    }

    pub fn has_active_filters(&self) -> bool {
        !self.query().is_empty()
    }

    /// Effective filters plus one for a non-empty effective search.
    pub fn active_filters_count(&self) -> usize {
        let query = self.query();
        query.filters.len() + usize::from(!query.search_text.is_empty())
    }

    pub fn is_filter_active(&self, category: &str) -> bool {
        engine::is_filter_active(category, &self.effective_filters())
    }

    /// Dropdown label for `category`, memoized until the effective filters change.
    pub fn filter_display_text(&mut self, category: &str) -> String {
        let effective = self.effective_filters();
        if effective != self.label_cache_filters {
            self.label_cache.clear();
            self.label_cache_filters = effective;
        }
        if let Some(cached) = self.label_cache.get(category) {
            return cached.clone();
        }

        let label = engine::display_text(category, &self.label_cache_filters);
        self.label_cache
            .insert(category.to_string(), label.clone());
        label
    }

    pub fn toggle_favorite(&mut self, id: GiftId) -> bool {
        self.favorites.toggle(id)
    }

    pub fn is_favorite(&self, id: GiftId) -> bool {
        self.favorites.contains(&id)
    }

    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }
}
