//! Tool upgrades. Each tool climbs from level 1 to 5 on an escalating cost
//! curve; the water and fertilizer tools pay a one-time resource reward per
//! upgrade, and the harvest tool grows the cumulative harvest bonus.

use crate::shared::*;
use bevy::prelude::*;

/// Upgrade one tool a level. Returns the new level.
pub fn upgrade_tool(
    tools: &mut ToolState,
    resources: &mut PlayerResources,
    tool: ToolKind,
) -> Result<u8, ActionError> {
    let level = tools.level(tool);
    if level >= MAX_TOOL_LEVEL {
        return Err(ActionError::MaxLevel);
    }
    let cost = tools.upgrade_cost(tool);
    if resources.money < cost {
        return Err(ActionError::InsufficientFunds);
    }

    resources.money -= cost;
    let new_level = level + 1;
    tools.levels.insert(tool, new_level);
    tools
        .upgrade_costs
        .insert(tool, (cost as f64 * TOOL_COST_FACTOR) as u64);

    match tool {
        ToolKind::Water => resources.water += WATER_UPGRADE_REWARD,
        ToolKind::Fertilizer => resources.fertilizer += FERTILIZER_UPGRADE_REWARD,
        ToolKind::Harvest => tools.harvest_bonus += HARVEST_UPGRADE_BONUS,
        ToolKind::Shovel => {}
    }
    Ok(new_level)
}

pub fn handle_upgrade_tool(
    mut events: EventReader<UpgradeToolEvent>,
    mut tools: ResMut<ToolState>,
    mut resources: ResMut<PlayerResources>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        match upgrade_tool(&mut tools, &mut resources, ev.tool) {
            Ok(new_level) => {
                info!("[Economy] {} upgraded to level {new_level}", ev.tool.name());
                toasts.send(ToastEvent {
                    message: format!("{} upgraded to level {new_level}!", ev.tool.name()),
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
