//! Gift catalog: seeded items, filter/search engine and the browsing state
//! that ties them together.

mod browser;
mod engine;
mod favorites;

use crate::models::GiftItem;

pub use browser::GiftBrowser;
pub use engine::{
    detect_filter, display_text, is_filter_active, item_matches_filter, resolve_query,
    visible_items, EffectiveQuery,
};
pub use favorites::Favorites;

/// The fixed catalog shipped with the client, in display order.
pub fn seed_catalog() -> Vec<GiftItem> {
    vec![
        GiftItem::new("Premium Gift Box", "355 USD", 2, "Giftboxes", "gift_0").popular(),
        GiftItem::new("Luxury Perfume Set", "189 USD", 3, "For Her", "gift_1"),
        GiftItem::new("Classic Leather Wallet", "120 USD", 2, "For Him", "gift_2").popular(),
        GiftItem::new("Spring Rose Bouquet", "79 USD", 1, "Flowers", "gift_3").fresh(),
        GiftItem::new("Wireless Earbuds", "149 USD", 2, "Electronics", "gift_4")
            .popular()
            .fresh(),
        GiftItem::new("Silk Scarf", "95 USD", 4, "For Her", "gift_5").popular(),
        GiftItem::new("Chocolate Tasting Box", "65 USD", 1, "Giftboxes", "gift_6").fresh(),
        GiftItem::new("Smart Watch", "299 USD", 3, "Electronics", "gift_7"),
        GiftItem::new("Grooming Kit", "85 USD", 2, "For Him", "gift_8").fresh(),
        GiftItem::new("Mixed Tulips", "59 USD", 1, "Flowers", "gift_9").popular(),
    ]
}
