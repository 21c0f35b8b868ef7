//! Initial shop stock table. Copied into `ShopState` on every fresh game;
//! restock rules only ever top a seed back up toward its max.

use crate::shared::*;

pub fn populate_shop_catalog(catalog: &mut ShopCatalog) {
    for (id, stock, max_stock, restock_amount) in initial_stock_table() {
        catalog.initial_stock.insert(
            id.to_string(),
            SeedStock {
                stock,
                max_stock,
                restock_amount,
            },
        );
    }
}

/// (seed id, starting stock, max stock, restock amount)
fn initial_stock_table() -> Vec<(&'static str, u32, u32, u32)> {
    vec![
        ("carrot", 7, 10, 5),
        ("tomato", 6, 8, 4),
        ("corn", 4, 6, 3),
        ("squash", 5, 7, 3),
        ("potato", 6, 8, 4),
        ("lettuce", 8, 10, 5),
        ("onion", 6, 8, 4),
        ("garlic", 4, 6, 3),
        ("broccoli", 3, 5, 2),
        ("cauliflower", 2, 4, 2),
        ("cucumber", 6, 8, 4),
        ("radish", 8, 10, 5),
        ("spinach", 7, 9, 4),
        ("winter_greens", 4, 6, 3),
        ("zucchini", 5, 7, 3),
        ("peas", 8, 10, 5),
        ("herbs", 6, 8, 4),
        ("cabbage", 5, 7, 3),
        ("celery", 6, 8, 4),
        // Rare seeds: scarce stock, slow restock
        ("bell_pepper", 4, 5, 2),
        ("watermelon", 2, 3, 1),
        ("asparagus", 3, 4, 2),
        ("artichoke", 2, 3, 1),
        ("kiwi", 2, 3, 1),
        // Legendary seeds: nearly sold out by default
        ("pumpkin", 1, 2, 1),
        ("grapes", 3, 4, 2),
        ("apple", 4, 5, 2),
        ("pineapple", 1, 2, 1),
        ("mango", 2, 3, 1),
        ("dragonfruit", 1, 1, 1),
    ]
}
