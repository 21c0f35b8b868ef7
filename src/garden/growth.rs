//! Growth engine.
//!
//! A plant's discrete stage is a pure function of elapsed wall-clock time
//! against its catalog growth duration. The effect modifiers (water,
//! fertilizer, sprinkler coverage, weather, season) feed a separately
//! tracked per-cell multiplier used for display; they do not bend the stage
//! formula. That mirrors the shipped behavior and is deliberate — see
//! DESIGN.md before "fixing" it.

use crate::shared::*;
use bevy::prelude::*;

/// Discrete growth stage in `[0, stage_count - 1]`.
///
/// `progress >= 1` clamps to the final stage, so the stage is monotonic
/// non-decreasing in elapsed time and maturity is exactly
/// `elapsed >= growth_ms`.
pub fn growth_stage(planted_at_ms: u64, growth_ms: u64, now: u64, stage_count: usize) -> u8 {
    let last = stage_count.saturating_sub(1) as u8;
    if growth_ms == 0 {
        return last;
    }
    let elapsed = now.saturating_sub(planted_at_ms);
    if elapsed >= growth_ms {
        last
    } else {
        ((elapsed as f64 / growth_ms as f64) * stage_count as f64) as u8
    }
}

/// Harvest payout: `floor(base * stage_multiplier * (1 + harvest_bonus))`.
pub fn harvest_value(base_value: u64, stage: u8, harvest_bonus: f64) -> u64 {
    let stage_mult = STAGE_MULTIPLIERS
        .get(stage as usize)
        .copied()
        .unwrap_or(1.0);
    (base_value as f64 * stage_mult * (1.0 + harvest_bonus)) as u64
}

/// Effective (display) growth multiplier for one cell.
pub fn effective_multiplier(
    cell: &Cell,
    sprinkler_bonus: f64,
    weather: Weather,
    season_multiplier: f64,
) -> f64 {
    let base = match (cell.watered, cell.fertilized) {
        (false, false) => GROWTH_MULT_BASE,
        (true, false) => GROWTH_MULT_WATERED,
        (false, true) => GROWTH_MULT_FERTILIZED,
        (true, true) => GROWTH_MULT_BOTH,
    };
    (base + sprinkler_bonus) * weather.growth_multiplier() * season_multiplier
}

/// A plant that reached full maturity during this advance.
#[derive(Debug, Clone, PartialEq)]
pub struct Matured {
    pub row: usize,
    pub col: usize,
    pub plant_id: PlantId,
    /// Planting-to-detection time, used for the speed-grower check.
    pub elapsed_ms: u64,
}

/// Advance every cell: expire water/fertilizer effect windows, refresh
/// growth stages and maturity flags, and recompute the display multiplier.
/// Identical in foreground and silent catch-up; only the caller decides
/// whether the returned maturations become notifications.
pub fn advance_garden(
    garden: &mut GardenState,
    sprinklers: &SprinklerState,
    registry: &PlantRegistry,
    weather: Weather,
    season_multiplier: f64,
    now: u64,
) -> Vec<Matured> {
    let mut matured = Vec::new();

    for row in 0..garden.size {
        for col in 0..garden.size {
            let sprinkler_bonus = sprinklers.growth_bonus_at(row, col);
            let Some(cell) = garden.cell_mut(row, col) else {
                continue;
            };

            if cell.watered {
                let expired = cell
                    .watered_at
                    .map_or(true, |at| now.saturating_sub(at) >= WATER_EFFECT_MS);
                if expired {
                    cell.watered = false;
                    cell.watered_at = None;
                }
            }
            if cell.fertilized {
                let expired = cell
                    .fertilized_at
                    .map_or(true, |at| now.saturating_sub(at) >= FERTILIZER_EFFECT_MS);
                if expired {
                    cell.fertilized = false;
                    cell.fertilized_at = None;
                }
            }

            if let Some(plant) = cell.plant.as_mut() {
                if let Some(def) = registry.get(&plant.plant_id) {
                    let stage =
                        growth_stage(plant.planted_at_ms, def.growth_ms, now, def.stage_count());
                    if stage > plant.growth_stage {
                        plant.growth_stage = stage;
                    }
                    if stage as usize == def.stage_count() - 1 && !plant.is_fully_grown {
                        plant.is_fully_grown = true;
                        matured.push(Matured {
                            row,
                            col,
                            plant_id: plant.plant_id.clone(),
                            elapsed_ms: now.saturating_sub(plant.planted_at_ms),
                        });
                    }
                }
            }

            cell.growth_multiplier = if cell.plant.is_some() {
                effective_multiplier(cell, sprinkler_bonus, weather, season_multiplier)
            } else {
                0.0
            };
        }
    }

    matured
}

/// Foreground wrapper: advances the garden and reports maturations.
pub fn update_growth(
    clock: Res<GameClock>,
    registry: Res<PlantRegistry>,
    sprinklers: Res<SprinklerState>,
    weather: Res<WeatherState>,
    season: Res<SeasonState>,
    mut garden: ResMut<GardenState>,
    mut matured_events: EventWriter<PlantMaturedEvent>,
) {
    let matured = advance_garden(
        &mut garden,
        &sprinklers,
        &registry,
        weather.current,
        season.multiplier,
        clock.now(),
    );
    for m in matured {
        debug!("[Garden] {} matured at ({}, {})", m.plant_id, m.row, m.col);
        matured_events.send(PlantMaturedEvent {
            plant_id: m.plant_id,
            elapsed_ms: m.elapsed_ms,
        });
    }
}
