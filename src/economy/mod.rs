//! Economy domain — seed stock and restocking, sprinkler purchases, and
//! tool upgrades.
//!
//! Communicates with other domains exclusively through crate::shared
//! events/resources.

use crate::shared::*;
use bevy::prelude::*;

pub mod shop;
pub mod tools;

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                shop::process_restock,
                shop::handle_buy_sprinkler,
                tools::handle_upgrade_tool,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}
