//! Garden domain — cell grid, growth engine, player actions, sprinklers.
//!
//! All simulation math lives in pure functions (`growth`, `actions`,
//! `sprinklers`) over the shared resources; the systems registered here
//! wrap them, translate requests from events, and emit toasts. The silent
//! background catch-up calls the same pure functions with no event side.

use crate::shared::*;
use bevy::prelude::*;

pub mod actions;
pub mod growth;
pub mod sprinklers;

pub struct GardenPlugin;

impl Plugin for GardenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                // Action requests
                actions::handle_plant_seed,
                actions::handle_water_cell,
                actions::handle_fertilize_cell,
                actions::handle_harvest_cell,
                actions::handle_remove_plant,
                actions::handle_expand_garden,
                sprinklers::handle_place_sprinkler,
                sprinklers::handle_remove_sprinkler,
                // Per-frame advancement
                sprinklers::expire_placed_sprinklers,
                growth::update_growth,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}
