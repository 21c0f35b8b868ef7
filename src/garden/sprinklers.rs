//! Sprinkler placement, coverage, and expiry.
//!
//! Sprinklers live on the grid by coordinate, never inside a cell: one may
//! share a coordinate with an empty cell but not with a plant. They expire
//! silently (the unit is lost); manual removal refunds one to inventory.

use crate::shared::*;
use bevy::prelude::*;

// ─────────────────────────────────────────────────────────────────────────────
// Pure mutators
// ─────────────────────────────────────────────────────────────────────────────

/// Place one sprinkler from inventory at (row, col), armed until
/// `now + duration`.
pub fn place_sprinkler(
    sprinklers: &mut SprinklerState,
    shop: &mut ShopState,
    garden: &GardenState,
    row: usize,
    col: usize,
    kind: SprinklerKind,
    now: u64,
) -> Result<(), ActionError> {
    if !garden.in_bounds(row, col) {
        return Err(ActionError::InvalidCoordinate);
    }
    if shop.sprinkler_count(kind) == 0 {
        return Err(ActionError::NoInventory);
    }
    if garden.cell(row, col).map_or(false, |c| c.plant.is_some()) {
        return Err(ActionError::CellOccupied);
    }
    if sprinklers.at(row, col).is_some() {
        return Err(ActionError::CellOccupied);
    }

    sprinklers.placed.push(PlacedSprinkler {
        kind,
        row,
        col,
        placed_at_ms: now,
        expires_at_ms: now + kind.duration_ms(),
    });
    *shop.sprinkler_inventory.entry(kind).or_insert(0) -= 1;
    Ok(())
}

/// Pick a placed sprinkler back up, refunding one unit to inventory.
pub fn remove_sprinkler(
    sprinklers: &mut SprinklerState,
    shop: &mut ShopState,
    row: usize,
    col: usize,
) -> Result<SprinklerKind, ActionError> {
    let idx = sprinklers
        .placed
        .iter()
        .position(|s| s.row == row && s.col == col)
        .ok_or(ActionError::UnknownSprinkler)?;
    let removed = sprinklers.placed.swap_remove(idx);
    *shop.sprinkler_inventory.entry(removed.kind).or_insert(0) += 1;
    Ok(removed.kind)
}

/// Drop every sprinkler whose time is up. Expiry is a loss — no refund,
/// unlike manual removal. Returns how many expired.
pub fn expire_sprinklers(sprinklers: &mut SprinklerState, now: u64) -> usize {
    let before = sprinklers.placed.len();
    sprinklers.placed.retain(|s| now < s.expires_at_ms);
    before - sprinklers.placed.len()
}

// ─────────────────────────────────────────────────────────────────────────────
// Event-handler systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_place_sprinkler(
    mut events: EventReader<PlaceSprinklerEvent>,
    clock: Res<GameClock>,
    garden: Res<GardenState>,
    mut sprinklers: ResMut<SprinklerState>,
    mut shop: ResMut<ShopState>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        match place_sprinkler(
            &mut sprinklers,
            &mut shop,
            &garden,
            ev.row,
            ev.col,
            ev.kind,
            clock.now(),
        ) {
            Ok(()) => {
                info!("[Garden] {} placed at ({}, {})", ev.kind.name(), ev.row, ev.col);
                toasts.send(ToastEvent {
                    message: format!("{} placed!", ev.kind.name()),
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

pub fn handle_remove_sprinkler(
    mut events: EventReader<RemoveSprinklerEvent>,
    mut sprinklers: ResMut<SprinklerState>,
    mut shop: ResMut<ShopState>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        match remove_sprinkler(&mut sprinklers, &mut shop, ev.row, ev.col) {
            Ok(kind) => {
                toasts.send(ToastEvent {
                    message: format!("{} returned to inventory.", kind.name()),
                });
            }
            Err(_) => {
                toasts.send(ToastEvent {
                    message: "No sprinkler there.".to_string(),
                });
            }
        }
    }
}

pub fn expire_placed_sprinklers(clock: Res<GameClock>, mut sprinklers: ResMut<SprinklerState>) {
    let expired = expire_sprinklers(&mut sprinklers, clock.now());
    if expired > 0 {
        info!("[Garden] {expired} sprinkler(s) expired");
    }
}
