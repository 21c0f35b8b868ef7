//! Shop stock management: interval-driven rarity-gated restock and
//! sprinkler purchases.

use crate::shared::*;
use bevy::prelude::*;
use rand::Rng;

/// Top seeds back up toward their max once the restock interval elapses.
///
/// Common seeds always restock; rare and legendary seeds only pass their
/// chance gate, rolled independently per seed per restock event. Stock
/// never exceeds `max_stock`. Returns the seeds restocked and by how much.
pub fn restock_shop(
    shop: &mut ShopState,
    registry: &PlantRegistry,
    tuning: &SimTuning,
    now: u64,
    rng: &mut impl Rng,
) -> Vec<(PlantId, u32)> {
    if now.saturating_sub(shop.last_restock_ms) < tuning.restock_interval_ms {
        return Vec::new();
    }
    shop.last_restock_ms = now;

    let mut restocked = Vec::new();
    for (id, entry) in shop.seeds.iter_mut() {
        if entry.stock >= entry.max_stock {
            continue;
        }
        let rarity = registry.get(id).map(|d| d.rarity).unwrap_or(Rarity::Common);
        let passes = match rarity {
            Rarity::Common => true,
            Rarity::Rare => rng.gen::<f64>() <= tuning.rare_restock_chance,
            Rarity::Legendary => rng.gen::<f64>() <= tuning.legendary_restock_chance,
        };
        if !passes {
            continue;
        }
        let amount = entry.restock_amount.min(entry.max_stock - entry.stock);
        entry.stock += amount;
        restocked.push((id.clone(), amount));
    }
    restocked
}

/// Buy one sprinkler into inventory. Purchase and placement are separate
/// acts; this never touches the grid.
pub fn buy_sprinkler(
    shop: &mut ShopState,
    resources: &mut PlayerResources,
    kind: SprinklerKind,
) -> Result<(), ActionError> {
    if resources.money < kind.price() {
        return Err(ActionError::InsufficientFunds);
    }
    resources.money -= kind.price();
    *shop.sprinkler_inventory.entry(kind).or_insert(0) += 1;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn process_restock(
    clock: Res<GameClock>,
    tuning: Res<SimTuning>,
    registry: Res<PlantRegistry>,
    mut shop: ResMut<ShopState>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let restocked = restock_shop(
        &mut shop,
        &registry,
        &tuning,
        clock.now(),
        &mut rand::thread_rng(),
    );
    if !restocked.is_empty() {
        info!("[Shop] restocked {} seed type(s)", restocked.len());
        toasts.send(ToastEvent {
            message: "Shop restocked!".to_string(),
        });
    }
}

pub fn handle_buy_sprinkler(
    mut events: EventReader<BuySprinklerEvent>,
    mut shop: ResMut<ShopState>,
    mut resources: ResMut<PlayerResources>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        match buy_sprinkler(&mut shop, &mut resources, ev.kind) {
            Ok(()) => {
                info!("[Shop] bought {}", ev.kind.name());
                toasts.send(ToastEvent {
                    message: format!("{} purchased!", ev.kind.name()),
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
