//! Stat bookkeeping: achievement counters and lifetime play statistics,
//! both fed from the garden's domain events.

use crate::shared::*;
use bevy::prelude::*;

/// Update the counters achievement conditions read.
pub fn track_achievement_stats(
    mut harvested: EventReader<PlantHarvestedEvent>,
    mut planted: EventReader<PlantPlantedEvent>,
    mut watered: EventReader<CellWateredEvent>,
    mut fertilized: EventReader<CellFertilizedEvent>,
    mut matured: EventReader<PlantMaturedEvent>,
    mut stats: ResMut<AchievementStats>,
) {
    for ev in harvested.read() {
        stats.total_harvests += 1;
        stats.total_money += ev.value;
        match ev.rarity {
            Rarity::Rare => stats.rare_harvests += 1,
            Rarity::Legendary => stats.legendary_harvests += 1,
            Rarity::Common => {}
        }
    }
    for ev in planted.read() {
        stats.plants_planted += 1;
        stats.different_plants.insert(ev.plant_id.clone());
    }
    for _ in watered.read() {
        stats.plants_watered += 1;
    }
    for _ in fertilized.read() {
        stats.plants_fertilized += 1;
    }
    for ev in matured.read() {
        if ev.elapsed_ms <= SPEED_GROWER_WINDOW_MS {
            stats.speed_grower = true;
        }
    }
}

/// Update the lifetime statistics panel data.
pub fn track_game_stats(
    mut harvested: EventReader<PlantHarvestedEvent>,
    mut watered: EventReader<CellWateredEvent>,
    mut fertilized: EventReader<CellFertilizedEvent>,
    mut stats: ResMut<GameStats>,
) {
    for ev in harvested.read() {
        stats.total_harvested += 1;
        stats.total_money_earned += ev.value;
        *stats.harvests_by_plant.entry(ev.plant_id.clone()).or_insert(0) += 1;
        if ev.value > stats.best_harvest {
            stats.best_harvest = ev.value;
        }
    }
    for _ in watered.read() {
        stats.total_water_used += 1;
    }
    for _ in fertilized.read() {
        stats.total_fertilizer_used += 1;
    }
}

/// Track the longest continuous session. `session_start_ms` is stamped on
/// the first frame after load/new-game (it resets to zero there).
pub fn track_session_length(clock: Res<GameClock>, mut stats: ResMut<GameStats>) {
    let now = clock.now();
    if now == 0 {
        return;
    }
    if stats.session_start_ms == 0 || stats.session_start_ms > now {
        stats.session_start_ms = now;
        return;
    }
    let session = now - stats.session_start_ms;
    if session > stats.longest_session_ms {
        stats.longest_session_ms = session;
    }
}
