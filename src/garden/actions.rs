//! Action API — the externally invoked mutators a UI or headless driver
//! calls between ticks. Every function validates first and returns a typed
//! [`ActionError`] on failure; nothing here panics or partially applies.

use crate::garden::growth;
use crate::shared::*;
use bevy::prelude::*;

/// Result of a successful harvest, for notification and stat tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestOutcome {
    pub plant_id: PlantId,
    pub value: u64,
    pub stage: u8,
    pub rarity: Rarity,
}

// ─────────────────────────────────────────────────────────────────────────────
// Pure mutators
// ─────────────────────────────────────────────────────────────────────────────

/// Buy one seed from the shop and plant it at (row, col).
///
/// Validation order follows the shipped game: listing exists, season allows
/// it, stock remains, funds suffice, and the cell holds neither a plant nor
/// a sprinkler.
#[allow(clippy::too_many_arguments)]
pub fn plant_seed(
    garden: &mut GardenState,
    shop: &mut ShopState,
    resources: &mut PlayerResources,
    registry: &PlantRegistry,
    sprinklers: &SprinklerState,
    current_season: Season,
    row: usize,
    col: usize,
    seed_id: &str,
    now: u64,
) -> Result<(), ActionError> {
    if !garden.in_bounds(row, col) {
        return Err(ActionError::InvalidCoordinate);
    }
    let def = registry.get(seed_id).ok_or(ActionError::UnknownPlant)?;
    let Some(stock) = shop.seeds.get_mut(seed_id) else {
        return Err(ActionError::OutOfStock);
    };
    if !def.season.allows(current_season) {
        return Err(ActionError::SeasonMismatch);
    }
    if stock.stock == 0 {
        return Err(ActionError::OutOfStock);
    }
    if resources.money < def.cost {
        return Err(ActionError::InsufficientFunds);
    }
    if garden.cell(row, col).map_or(false, |c| c.plant.is_some()) {
        return Err(ActionError::CellOccupied);
    }
    if sprinklers.at(row, col).is_some() {
        return Err(ActionError::CellOccupied);
    }

    resources.money -= def.cost;
    stock.stock -= 1;

    let cell = garden.cell_mut(row, col).ok_or(ActionError::InvalidCoordinate)?;
    *cell = Cell {
        plant: Some(PlantInstance {
            plant_id: def.id.clone(),
            planted_at_ms: now,
            growth_stage: 0,
            is_fully_grown: false,
        }),
        ..Cell::default()
    };
    Ok(())
}

/// Spend one unit of water on a planted cell. The effect window and the
/// re-application cooldown run independently.
pub fn water_cell(
    garden: &mut GardenState,
    resources: &mut PlayerResources,
    row: usize,
    col: usize,
    now: u64,
) -> Result<(), ActionError> {
    if !garden.in_bounds(row, col) {
        return Err(ActionError::InvalidCoordinate);
    }
    let cell = garden.cell_mut(row, col).ok_or(ActionError::InvalidCoordinate)?;
    if cell.plant.is_none() {
        return Err(ActionError::NotPlanted);
    }
    if now < cell.water_cooldown_until {
        return Err(ActionError::Cooldown);
    }
    if resources.water == 0 {
        return Err(ActionError::NoResource);
    }

    resources.water -= 1;
    cell.watered = true;
    cell.watered_at = Some(now);
    cell.water_cooldown_until = now + WATER_COOLDOWN_MS;
    Ok(())
}

/// Spend one unit of fertilizer on a planted cell. Symmetric with
/// [`water_cell`], on the 12 s cooldown / 20 s window pair.
pub fn fertilize_cell(
    garden: &mut GardenState,
    resources: &mut PlayerResources,
    row: usize,
    col: usize,
    now: u64,
) -> Result<(), ActionError> {
    if !garden.in_bounds(row, col) {
        return Err(ActionError::InvalidCoordinate);
    }
    let cell = garden.cell_mut(row, col).ok_or(ActionError::InvalidCoordinate)?;
    if cell.plant.is_none() {
        return Err(ActionError::NotPlanted);
    }
    if now < cell.fertilizer_cooldown_until {
        return Err(ActionError::Cooldown);
    }
    if resources.fertilizer == 0 {
        return Err(ActionError::NoResource);
    }

    resources.fertilizer -= 1;
    cell.fertilized = true;
    cell.fertilized_at = Some(now);
    cell.fertilizer_cooldown_until = now + FERTILIZER_COOLDOWN_MS;
    Ok(())
}

/// Harvest whatever is planted, at whatever stage it reached. Immature
/// plants yield the partial stage-multiplier value on purpose; the harvest
/// tool always succeeds on a planted cell. Pays into money AND score, then
/// clears the cell completely.
pub fn harvest_cell(
    garden: &mut GardenState,
    resources: &mut PlayerResources,
    registry: &PlantRegistry,
    harvest_bonus: f64,
    row: usize,
    col: usize,
    now: u64,
) -> Result<HarvestOutcome, ActionError> {
    if !garden.in_bounds(row, col) {
        return Err(ActionError::InvalidCoordinate);
    }
    let cell = garden.cell_mut(row, col).ok_or(ActionError::InvalidCoordinate)?;
    let plant = cell.plant.as_ref().ok_or(ActionError::NotPlanted)?;
    let def = registry.get(&plant.plant_id).ok_or(ActionError::UnknownPlant)?;

    let stage = growth::growth_stage(plant.planted_at_ms, def.growth_ms, now, def.stage_count());
    let value = growth::harvest_value(def.harvest_value, stage, harvest_bonus);

    resources.money += value;
    resources.score += value;

    let outcome = HarvestOutcome {
        plant_id: plant.plant_id.clone(),
        value,
        stage,
        rarity: def.rarity,
    };
    *cell = Cell::default();
    Ok(outcome)
}

/// Dig out a plant with no refund; the cell resets to empty.
pub fn remove_plant(
    garden: &mut GardenState,
    row: usize,
    col: usize,
) -> Result<PlantId, ActionError> {
    if !garden.in_bounds(row, col) {
        return Err(ActionError::InvalidCoordinate);
    }
    let cell = garden.cell_mut(row, col).ok_or(ActionError::InvalidCoordinate)?;
    let plant = cell.plant.take().ok_or(ActionError::NotPlanted)?;
    *cell = Cell::default();
    Ok(plant.plant_id)
}

/// Buy one ring of expansion. The grid is reinitialized, which discards
/// every cell's contents — longstanding shipped behavior, kept as-is (see
/// DESIGN.md). Cost escalates ×1.3, floored.
pub fn expand_garden(
    garden: &mut GardenState,
    resources: &mut PlayerResources,
) -> Result<usize, ActionError> {
    if garden.size >= GARDEN_SIZE_MAX {
        return Err(ActionError::AlreadyMaxSize);
    }
    if resources.money < garden.expansion_cost {
        return Err(ActionError::InsufficientFunds);
    }

    resources.money -= garden.expansion_cost;
    let new_size = garden.size + 1;
    garden.reinitialize(new_size);
    garden.expansion_cost = (garden.expansion_cost as f64 * EXPANSION_COST_FACTOR) as u64;
    Ok(new_size)
}

// ─────────────────────────────────────────────────────────────────────────────
// Event-handler systems
// ─────────────────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn handle_plant_seed(
    mut events: EventReader<PlantSeedEvent>,
    clock: Res<GameClock>,
    registry: Res<PlantRegistry>,
    sprinklers: Res<SprinklerState>,
    season: Res<SeasonState>,
    mut garden: ResMut<GardenState>,
    mut shop: ResMut<ShopState>,
    mut resources: ResMut<PlayerResources>,
    mut planted: EventWriter<PlantPlantedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        match plant_seed(
            &mut garden,
            &mut shop,
            &mut resources,
            &registry,
            &sprinklers,
            season.current,
            ev.row,
            ev.col,
            &ev.seed,
            clock.now(),
        ) {
            Ok(()) => {
                let name = registry.get(&ev.seed).map(|d| d.name.clone()).unwrap_or_default();
                planted.send(PlantPlantedEvent {
                    plant_id: ev.seed.clone(),
                });
                toasts.send(ToastEvent {
                    message: format!("{name} planted!"),
                });
            }
            Err(e) => {
                toasts.send(ToastEvent {
                    message: e.to_string(),
                });
            }
        }
    }
}

pub fn handle_water_cell(
    mut events: EventReader<WaterCellEvent>,
    clock: Res<GameClock>,
    mut garden: ResMut<GardenState>,
    mut resources: ResMut<PlayerResources>,
    mut watered: EventWriter<CellWateredEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        match water_cell(&mut garden, &mut resources, ev.row, ev.col, clock.now()) {
            Ok(()) => {
                watered.send(CellWateredEvent);
                toasts.send(ToastEvent {
                    message: "Watered! Growth boosted!".to_string(),
                });
            }
            Err(e) => {
                toasts.send(ToastEvent {
                    message: e.to_string(),
                });
            }
        }
    }
}

pub fn handle_fertilize_cell(
    mut events: EventReader<FertilizeCellEvent>,
    clock: Res<GameClock>,
    mut garden: ResMut<GardenState>,
    mut resources: ResMut<PlayerResources>,
    mut fertilized: EventWriter<CellFertilizedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        match fertilize_cell(&mut garden, &mut resources, ev.row, ev.col, clock.now()) {
            Ok(()) => {
                fertilized.send(CellFertilizedEvent);
                toasts.send(ToastEvent {
                    message: "Fertilized! Growth boosted!".to_string(),
                });
            }
            Err(e) => {
                toasts.send(ToastEvent {
                    message: e.to_string(),
                });
            }
        }
    }
}

pub fn handle_harvest_cell(
    mut events: EventReader<HarvestCellEvent>,
    clock: Res<GameClock>,
    registry: Res<PlantRegistry>,
    tools: Res<ToolState>,
    mut garden: ResMut<GardenState>,
    mut resources: ResMut<PlayerResources>,
    mut harvested: EventWriter<PlantHarvestedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        match harvest_cell(
            &mut garden,
            &mut resources,
            &registry,
            tools.harvest_bonus,
            ev.row,
            ev.col,
            clock.now(),
        ) {
            Ok(outcome) => {
                info!(
                    "[Garden] harvested {} for {} at stage {}",
                    outcome.plant_id, outcome.value, outcome.stage
                );
                toasts.send(ToastEvent {
                    message: format!("Harvested for {} coins!", outcome.value),
                });
                harvested.send(PlantHarvestedEvent {
                    plant_id: outcome.plant_id,
                    value: outcome.value,
                    stage: outcome.stage,
                    rarity: outcome.rarity,
                });
            }
            Err(e) => {
                toasts.send(ToastEvent {
                    message: e.to_string(),
                });
            }
        }
    }
}

pub fn handle_remove_plant(
    mut events: EventReader<RemovePlantEvent>,
    mut garden: ResMut<GardenState>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        match remove_plant(&mut garden, ev.row, ev.col) {
            Ok(_) => {
                toasts.send(ToastEvent {
                    message: "Plant removed.".to_string(),
                });
            }
            Err(e) => {
                toasts.send(ToastEvent {
                    message: e.to_string(),
                });
            }
        }
    }
}

pub fn handle_expand_garden(
    mut events: EventReader<ExpandGardenEvent>,
    mut garden: ResMut<GardenState>,
    mut resources: ResMut<PlayerResources>,
    mut expanded: EventWriter<GardenExpandedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for _ in events.read() {
        match expand_garden(&mut garden, &mut resources) {
            Ok(new_size) => {
                info!("[Garden] expanded to {new_size}x{new_size}");
                expanded.send(GardenExpandedEvent { new_size });
                toasts.send(ToastEvent {
                    message: format!("Garden expanded to {new_size}x{new_size}!"),
                });
            }
            Err(e) => {
                toasts.send(ToastEvent {
                    message: e.to_string(),
                });
            }
        }
    }
}
