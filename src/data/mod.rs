//! Data layer — populates the plant registry and shop catalog at startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills the registries
//! from the hard-coded game-design data in submodules, then transitions the
//! game into GameState::MainMenu. All domain plugins can safely read them
//! once GameState has advanced past Loading.

pub mod plants;
pub mod shop;

use crate::shared::*;
use bevy::prelude::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Single system that populates every registry and then transitions to
/// MainMenu.
fn load_all_data(
    mut plant_registry: ResMut<PlantRegistry>,
    mut shop_catalog: ResMut<ShopCatalog>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("[Data] populating registries…");

    plants::populate_plants(&mut plant_registry);
    info!("  Plants loaded: {}", plant_registry.plants.len());

    shop::populate_shop_catalog(&mut shop_catalog);
    info!("  Shop listings loaded: {}", shop_catalog.initial_stock.len());

    info!("[Data] all registries populated. Transitioning to MainMenu.");
    next_state.set(GameState::MainMenu);
}
