//! Gift catalog model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a gift item, using UUID v7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GiftId(Uuid);

impl GiftId {
    /// Create a new unique gift ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for GiftId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GiftId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A static catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftItem {
    pub id: GiftId,
    pub title: String,
    /// Display price, e.g. "355 USD"
    pub price: String,
    pub delivery_days: u32,
    pub is_popular: bool,
    pub is_new: bool,
    pub category: String,
    pub image_ref: String,
}

impl GiftItem {
    /// Create a catalog entry with no popular/new flags set
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        price: impl Into<String>,
        delivery_days: u32,
        category: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: GiftId::new(),
            title: title.into(),
            price: price.into(),
            delivery_days,
            is_popular: false,
            is_new: false,
            category: category.into(),
            image_ref: image_ref.into(),
        }
    }

    #[must_use]
    pub fn popular(mut self) -> Self {
        self.is_popular = true;
        self
    }

    #[must_use]
    pub fn fresh(mut self) -> Self {
        self.is_new = true;
        self
    }
}
