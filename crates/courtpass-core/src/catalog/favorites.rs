use std::collections::BTreeSet;

use crate::models::GiftId;

/// Favorited gift ids for the lifetime of the owning session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: BTreeSet<GiftId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership and return whether the item is now a favorite.
    pub fn toggle(&mut self, id: GiftId) -> bool {
        let now_favorite = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        tracing::debug!("Favorite {} -> {}", id, now_favorite);
        now_favorite
    }

    pub fn contains(&self, id: &GiftId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GiftId> {
        self.ids.iter()
    }
}
