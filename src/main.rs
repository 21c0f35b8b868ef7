mod climate;
mod clock;
mod data;
mod economy;
mod garden;
mod progress;
mod save;
mod session;
mod shared;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use std::time::Duration;

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(16))),
        )
        .add_plugins(StatesPlugin)
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<GameClock>()
        .init_resource::<SimTuning>()
        .init_resource::<PlantRegistry>()
        .init_resource::<ShopCatalog>()
        .init_resource::<PlayerResources>()
        .init_resource::<GardenState>()
        .init_resource::<ShopState>()
        .init_resource::<SprinklerState>()
        .init_resource::<WeatherState>()
        .init_resource::<SeasonState>()
        .init_resource::<ToolState>()
        .init_resource::<ChallengeBoard>()
        .init_resource::<Achievements>()
        .init_resource::<AchievementStats>()
        .init_resource::<GameStats>()
        .init_resource::<GameFlags>()
        .init_resource::<Selection>()
        .init_resource::<ActiveSaveSlot>()
        // Events
        .add_event::<ToastEvent>()
        .add_event::<PlantSeedEvent>()
        .add_event::<WaterCellEvent>()
        .add_event::<FertilizeCellEvent>()
        .add_event::<HarvestCellEvent>()
        .add_event::<RemovePlantEvent>()
        .add_event::<BuySprinklerEvent>()
        .add_event::<PlaceSprinklerEvent>()
        .add_event::<RemoveSprinklerEvent>()
        .add_event::<UpgradeToolEvent>()
        .add_event::<ExpandGardenEvent>()
        .add_event::<PlantPlantedEvent>()
        .add_event::<PlantHarvestedEvent>()
        .add_event::<PlantMaturedEvent>()
        .add_event::<CellWateredEvent>()
        .add_event::<CellFertilizedEvent>()
        .add_event::<GardenExpandedEvent>()
        .add_event::<SeasonChangedEvent>()
        .add_event::<WeatherChangedEvent>()
        .add_event::<ChallengeCompletedEvent>()
        .add_event::<AchievementUnlockedEvent>()
        .add_event::<GameWonEvent>()
        .add_event::<SaveRequestEvent>()
        .add_event::<LoadRequestEvent>()
        .add_event::<NewGameEvent>()
        .add_event::<SaveCompleteEvent>()
        .add_event::<LoadCompleteEvent>()
        .add_event::<ForceLogoutEvent>()
        .add_event::<PauseEvent>()
        .add_event::<ResumeEvent>()
        .add_event::<VisitRequestEvent>()
        .add_event::<VisitResponseEvent>()
        // Domain plugins
        .add_plugins(clock::ClockPlugin)
        .add_plugins(climate::ClimatePlugin)
        .add_plugins(garden::GardenPlugin)
        .add_plugins(economy::EconomyPlugin)
        .add_plugins(progress::ProgressPlugin)
        .add_plugins(save::SavePlugin)
        .add_plugins(session::SessionPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        .run();
}
