//! Plant catalog — every plantable type with cost, timing, value, season,
//! visual stage markers, and rarity tier.

use crate::shared::*;

fn def(
    id: &str,
    name: &str,
    cost: u64,
    growth_ms: u64,
    harvest_value: u64,
    season: SeasonAvailability,
    stages: [&str; STAGE_COUNT],
    rarity: Rarity,
) -> PlantDef {
    PlantDef {
        id: id.to_string(),
        name: name.to_string(),
        cost,
        growth_ms,
        harvest_value,
        season,
        stages: stages.iter().map(|s| s.to_string()).collect(),
        rarity,
    }
}

pub fn populate_plants(registry: &mut PlantRegistry) {
    use Rarity::{Common, Legendary, Rare};
    use Season::*;
    use SeasonAvailability::{All, Only};

    let defs = vec![
        // Spring
        def("carrot", "Carrot", 5, 10_000, 8, Only(Spring), ["🌱", "🌿", "🥕", "🥕", "🥕"], Common),
        def("lettuce", "Lettuce", 3, 8_000, 5, Only(Spring), ["🌱", "🌿", "🥬", "🥬", "🥬"], Common),
        def("radish", "Radish", 4, 12_000, 7, Only(Spring), ["🌱", "🌿", "🥬", "🥬", "🥬"], Common),
        def("spinach", "Spinach", 6, 15_000, 10, Only(Spring), ["🌱", "🌿", "🥬", "🥬", "🥬"], Common),
        def("peas", "Peas", 7, 18_000, 12, Only(Spring), ["🫛", "🫛", "🫛", "🫛", "🫛"], Common),
        // Summer
        def("tomato", "Tomato", 8, 20_000, 15, Only(Summer), ["🌱", "🌿", "🍅", "🍅", "🍅"], Common),
        def("corn", "Corn", 12, 25_000, 20, Only(Summer), ["🌱", "🌿", "🌽", "🌽", "🌽"], Common),
        def("cucumber", "Cucumber", 6, 16_000, 11, Only(Summer), ["🌱", "🌿", "🥒", "🥒", "🥒"], Common),
        def("zucchini", "Zucchini", 9, 22_000, 16, Only(Summer), ["🌱", "🌿", "🥬", "🥬", "🥬"], Common),
        def("bell_pepper", "Bell Pepper", 10, 22_000, 18, Only(Summer), ["🫑", "🫑", "🫑", "🫑", "🫑"], Rare),
        // Fall
        def("pumpkin", "Pumpkin", 25, 35_000, 45, Only(Fall), ["🎃", "🎃", "🎃", "🎃", "🎃"], Legendary),
        def("squash", "Squash", 15, 28_000, 25, Only(Fall), ["🌱", "🌿", "🥬", "🥬", "🥬"], Common),
        def("broccoli", "Broccoli", 11, 24_000, 19, Only(Fall), ["🌱", "🌿", "🥦", "🥦", "🥦"], Common),
        def("cauliflower", "Cauliflower", 14, 26_000, 22, Only(Fall), ["🌱", "🌿", "🥬", "🥬", "🥬"], Common),
        def("cabbage", "Cabbage", 8, 20_000, 14, Only(Fall), ["🌱", "🌿", "🥬", "🥬", "🥬"], Common),
        // Winter
        def("winter_greens", "Winter Greens", 20, 30_000, 35, Only(Winter), ["🌱", "🌿", "🥬", "🥬", "🥬"], Common),
        def("herbs", "Herbs", 15, 25_000, 28, Only(Winter), ["🌿", "🌿", "🌿", "🌿", "🌿"], Common),
        // Any season
        def("onion", "Onion", 4, 14_000, 6, All, ["🧅", "🧅", "🧅", "🧅", "🧅"], Common),
        def("garlic", "Garlic", 5, 16_000, 8, All, ["🧄", "🧄", "🧄", "🧄", "🧄"], Common),
        def("potato", "Potato", 7, 18_000, 12, All, ["🥔", "🥔", "🥔", "🥔", "🥔"], Common),
        def("celery", "Celery", 6, 15_000, 9, All, ["🌱", "🌿", "🥬", "🥬", "🥬"], Common),
        // Rare
        def("watermelon", "Watermelon", 20, 30_000, 35, Only(Summer), ["🌱", "🌿", "🍉", "🍉", "🍉"], Rare),
        def("asparagus", "Asparagus", 13, 26_000, 21, Only(Spring), ["🌱", "🌿", "🥬", "🥬", "🥬"], Rare),
        def("artichoke", "Artichoke", 16, 32_000, 28, Only(Fall), ["🌱", "🌿", "🥬", "🥬", "🥬"], Rare),
        def("kiwi", "Kiwi", 22, 34_000, 38, Only(Fall), ["🌱", "🌿", "🥝", "🥝", "🥝"], Rare),
        // Legendary
        def("grapes", "Grapes", 18, 35_000, 30, All, ["🌱", "🌿", "🍇", "🍇", "🍇"], Legendary),
        def("apple", "Apple", 15, 32_000, 25, All, ["🌱", "🌿", "🍎", "🍎", "🍎"], Legendary),
        def("pineapple", "Pineapple", 30, 50_000, 50, All, ["🌱", "🌿", "🍍", "🍍", "🍍"], Legendary),
        def("mango", "Mango", 28, 48_000, 45, All, ["🌱", "🌿", "🥭", "🥭", "🥭"], Legendary),
        def("dragonfruit", "Dragonfruit", 35, 60_000, 60, All, ["🌱", "🌿", "🌳", "🌳", "🐉"], Legendary),
    ];

    for d in defs {
        registry.plants.insert(d.id.clone(), d);
    }
}
