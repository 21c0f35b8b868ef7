//! Achievement definitions and unlock checking.
//!
//! Unlocks are monotonic: once an id is in the unlocked set it stays there.
//! The pure [`check_achievements`] function is shared between the
//! foreground system (which emits unlock events) and the silent background
//! catch-up pass (which does not).

use crate::shared::*;
use bevy::prelude::*;

pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
}

pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstHarvest,
        name: "First Harvest",
        description: "Harvest your first plant",
    },
    AchievementDef {
        id: AchievementId::MoneyMaker,
        name: "Money Maker",
        description: "Earn 100 coins from harvests",
    },
    AchievementDef {
        id: AchievementId::PlantMaster,
        name: "Plant Master",
        description: "Plant 10 different types of seeds",
    },
    AchievementDef {
        id: AchievementId::WaterWizard,
        name: "Water Wizard",
        description: "Water plants 20 times",
    },
    AchievementDef {
        id: AchievementId::FertilizerFanatic,
        name: "Fertilizer Fanatic",
        description: "Fertilize plants 15 times",
    },
    AchievementDef {
        id: AchievementId::SpeedGrower,
        name: "Speed Grower",
        description: "Grow a plant to maturity within 30 seconds",
    },
    AchievementDef {
        id: AchievementId::RareCollector,
        name: "Rare Collector",
        description: "Harvest 5 rare plants",
    },
    AchievementDef {
        id: AchievementId::LegendaryFarmer,
        name: "Legendary Farmer",
        description: "Harvest 3 legendary plants",
    },
];

pub fn def_for(id: AchievementId) -> &'static AchievementDef {
    ACHIEVEMENTS
        .iter()
        .find(|d| d.id == id)
        .expect("every AchievementId has a definition")
}

/// Whether the stats satisfy an achievement's unlock condition.
pub fn evaluate_condition(id: AchievementId, stats: &AchievementStats) -> bool {
    match id {
        AchievementId::FirstHarvest => stats.total_harvests >= 1,
        AchievementId::MoneyMaker => stats.total_money >= 100,
        AchievementId::PlantMaster => stats.different_plants.len() >= 10,
        AchievementId::WaterWizard => stats.plants_watered >= 20,
        AchievementId::FertilizerFanatic => stats.plants_fertilized >= 15,
        AchievementId::SpeedGrower => stats.speed_grower,
        AchievementId::RareCollector => stats.rare_harvests >= 5,
        AchievementId::LegendaryFarmer => stats.legendary_harvests >= 3,
    }
}

/// Unlock everything newly earned; returns the ids unlocked by this call.
pub fn check_achievements(
    achievements: &mut Achievements,
    stats: &AchievementStats,
) -> Vec<AchievementId> {
    let mut newly = Vec::new();
    for def in ACHIEVEMENTS {
        if !achievements.is_unlocked(def.id) && evaluate_condition(def.id, stats) {
            achievements.unlocked.insert(def.id);
            newly.push(def.id);
        }
    }
    newly
}

pub fn check_achievements_system(
    stats: Res<AchievementStats>,
    mut achievements: ResMut<Achievements>,
    mut unlocked: EventWriter<AchievementUnlockedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for id in check_achievements(&mut achievements, &stats) {
        let def = def_for(id);
        info!("[Progress] achievement unlocked: {}", def.name);
        unlocked.send(AchievementUnlockedEvent { id });
        toasts.send(ToastEvent {
            message: format!("Achievement unlocked: {}!", def.name),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_has_a_definition() {
        for id in [
            AchievementId::FirstHarvest,
            AchievementId::MoneyMaker,
            AchievementId::PlantMaster,
            AchievementId::WaterWizard,
            AchievementId::FertilizerFanatic,
            AchievementId::SpeedGrower,
            AchievementId::RareCollector,
            AchievementId::LegendaryFarmer,
        ] {
            assert_eq!(def_for(id).id, id);
        }
        assert_eq!(ACHIEVEMENTS.len(), 8);
    }

    #[test]
    fn test_first_harvest_unlocks_at_one() {
        let mut stats = AchievementStats::default();
        assert!(!evaluate_condition(AchievementId::FirstHarvest, &stats));
        stats.total_harvests = 1;
        assert!(evaluate_condition(AchievementId::FirstHarvest, &stats));
    }

    #[test]
    fn test_plant_master_counts_distinct_types() {
        let mut stats = AchievementStats::default();
        for i in 0..9 {
            stats.different_plants.insert(format!("plant_{i}"));
        }
        assert!(!evaluate_condition(AchievementId::PlantMaster, &stats));
        stats.different_plants.insert("plant_9".to_string());
        assert!(evaluate_condition(AchievementId::PlantMaster, &stats));
    }

    #[test]
    fn test_check_reports_each_unlock_once() {
        let mut achievements = Achievements::default();
        let mut stats = AchievementStats::default();
        stats.total_harvests = 1;
        stats.total_money = 150;

        let first = check_achievements(&mut achievements, &stats);
        assert_eq!(first.len(), 2, "first harvest and money maker together");

        let second = check_achievements(&mut achievements, &stats);
        assert!(second.is_empty(), "already unlocked, nothing new");
    }

    #[test]
    fn test_unlocks_are_monotonic() {
        let mut achievements = Achievements::default();
        let mut stats = AchievementStats::default();
        stats.speed_grower = true;
        check_achievements(&mut achievements, &stats);
        assert!(achievements.is_unlocked(AchievementId::SpeedGrower));

        // Stats regressing must never re-lock.
        stats.speed_grower = false;
        check_achievements(&mut achievements, &stats);
        assert!(achievements.is_unlocked(AchievementId::SpeedGrower));
    }
}
