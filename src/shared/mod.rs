//! Shared resources, events, and states for Bloomfield.
//!
//! This is the type contract. Every domain plugin imports from here, and
//! domains talk to each other through these events and resources. The one
//! exception is the save domain's background catch-up, which calls the
//! other domains' pure advance functions directly so silent and foreground
//! progression share one computation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    MainMenu,
    Playing,
    Paused,
}

// ═══════════════════════════════════════════════════════════════════════
// CLOCK
// ═══════════════════════════════════════════════════════════════════════

/// Epoch-millisecond clock driving every timer in the simulation.
///
/// The foreground driver sets it from the wall clock each frame; tests and
/// the background catch-up pass set it directly. All subsystems compare
/// absolute timestamps against `now_ms`, which is what lets a large offline
/// gap replay exactly like a sequence of small ones.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GameClock {
    pub now_ms: u64,
}

impl GameClock {
    pub fn now(&self) -> u64 {
        self.now_ms
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CLIMATE — seasons and weather
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }

    pub fn from_index(i: usize) -> Self {
        match i % 4 {
            0 => Season::Spring,
            1 => Season::Summer,
            2 => Season::Fall,
            _ => Season::Winter,
        }
    }

    /// Season-wide growth multiplier, tracked for the display multiplier.
    pub fn growth_multiplier(self) -> f64 {
        match self {
            Season::Spring => 1.2,
            Season::Summer => 1.0,
            Season::Fall => 0.8,
            Season::Winter => 0.6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

/// Which season(s) a seed can be planted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonAvailability {
    All,
    Only(Season),
}

impl SeasonAvailability {
    pub fn allows(self, season: Season) -> bool {
        match self {
            SeasonAvailability::All => true,
            SeasonAvailability::Only(s) => s == season,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunny,
    Rainy,
    Cloudy,
    Stormy,
}

impl Weather {
    /// Fixed rotation order; the weather timer advances along it and wraps.
    pub fn next(self) -> Self {
        match self {
            Weather::Sunny => Weather::Rainy,
            Weather::Rainy => Weather::Cloudy,
            Weather::Cloudy => Weather::Stormy,
            Weather::Stormy => Weather::Sunny,
        }
    }

    pub fn growth_multiplier(self) -> f64 {
        match self {
            Weather::Sunny => 1.0,
            Weather::Rainy => 1.5,
            Weather::Cloudy => 0.8,
            Weather::Stormy => 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Rainy => "Rainy",
            Weather::Cloudy => "Cloudy",
            Weather::Stormy => "Stormy",
        }
    }
}

/// Current season, the 1-based day within it, and the derived multiplier.
///
/// `start_ms` is set once on the first advance of a fresh game; every later
/// value is pure arithmetic on (now - start_ms).
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SeasonState {
    pub current: Season,
    pub day: u32,
    pub multiplier: f64,
    pub start_ms: Option<u64>,
}

impl Default for SeasonState {
    fn default() -> Self {
        Self {
            current: Season::Spring,
            day: 1,
            multiplier: Season::Spring.growth_multiplier(),
            start_ms: None,
        }
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct WeatherState {
    pub current: Weather,
    pub last_change_ms: u64,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            current: Weather::Sunny,
            last_change_ms: 0,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLANT CATALOG
// ═══════════════════════════════════════════════════════════════════════

pub type PlantId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

/// Immutable plant type definition. Loaded once into [`PlantRegistry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantDef {
    pub id: PlantId,
    pub name: String,
    pub cost: u64,
    pub growth_ms: u64,
    pub harvest_value: u64,
    pub season: SeasonAvailability,
    /// Visual marker per growth stage; length is the stage count.
    pub stages: Vec<String>,
    pub rarity: Rarity,
}

impl PlantDef {
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

#[derive(Resource, Debug, Default)]
pub struct PlantRegistry {
    pub plants: HashMap<PlantId, PlantDef>,
}

impl PlantRegistry {
    pub fn get(&self, id: &str) -> Option<&PlantDef> {
        self.plants.get(id)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// GARDEN — cells and plant instances
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantInstance {
    pub plant_id: PlantId,
    pub planted_at_ms: u64,
    pub growth_stage: u8,
    pub is_fully_grown: bool,
}

/// One garden cell. The watered/fertilized overlays expire on fixed windows
/// independent of the cooldowns that gate re-application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub plant: Option<PlantInstance>,
    pub watered: bool,
    pub watered_at: Option<u64>,
    pub water_cooldown_until: u64,
    pub fertilized: bool,
    pub fertilized_at: Option<u64>,
    pub fertilizer_cooldown_until: u64,
    /// Display-only effective growth multiplier; see the growth engine.
    pub growth_multiplier: f64,
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GardenState {
    pub cells: Vec<Vec<Cell>>,
    pub size: usize,
    pub expansion_cost: u64,
}

impl Default for GardenState {
    fn default() -> Self {
        Self::with_size(GARDEN_SIZE_START)
    }
}

impl GardenState {
    pub fn with_size(size: usize) -> Self {
        Self {
            cells: vec![vec![Cell::default(); size]; size],
            size,
            expansion_cost: EXPANSION_COST_START,
        }
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// Rebuild the grid at `size`, discarding all cell contents.
    pub fn reinitialize(&mut self, size: usize) {
        self.size = size;
        self.cells = vec![vec![Cell::default(); size]; size];
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPRINKLERS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprinklerKind {
    Basic,
    Advanced,
    Premium,
    Legendary,
}

impl SprinklerKind {
    pub const ALL: [SprinklerKind; 4] = [
        SprinklerKind::Basic,
        SprinklerKind::Advanced,
        SprinklerKind::Premium,
        SprinklerKind::Legendary,
    ];

    pub fn price(self) -> u64 {
        match self {
            SprinklerKind::Basic => 50,
            SprinklerKind::Advanced => 150,
            SprinklerKind::Premium => 300,
            SprinklerKind::Legendary => 500,
        }
    }

    /// Effect radius in cells, Chebyshev distance.
    pub fn range(self) -> i64 {
        match self {
            SprinklerKind::Basic => 1,
            SprinklerKind::Advanced | SprinklerKind::Premium => 2,
            SprinklerKind::Legendary => 3,
        }
    }

    pub fn growth_bonus(self) -> f64 {
        match self {
            SprinklerKind::Basic => 0.2,
            SprinklerKind::Advanced => 0.4,
            SprinklerKind::Premium => 0.6,
            SprinklerKind::Legendary => 0.8,
        }
    }

    pub fn water_bonus(self) -> f64 {
        match self {
            SprinklerKind::Basic => 0.0,
            SprinklerKind::Advanced => 0.1,
            SprinklerKind::Premium => 0.2,
            SprinklerKind::Legendary => 0.3,
        }
    }

    pub fn fertilizer_bonus(self) -> f64 {
        match self {
            SprinklerKind::Basic | SprinklerKind::Advanced => 0.0,
            SprinklerKind::Premium => 0.1,
            SprinklerKind::Legendary => 0.2,
        }
    }

    pub fn duration_ms(self) -> u64 {
        match self {
            SprinklerKind::Basic => 120_000,
            SprinklerKind::Advanced => 180_000,
            SprinklerKind::Premium => 240_000,
            SprinklerKind::Legendary => 300_000,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SprinklerKind::Basic => "Basic Sprinkler",
            SprinklerKind::Advanced => "Advanced Sprinkler",
            SprinklerKind::Premium => "Premium Sprinkler",
            SprinklerKind::Legendary => "Legendary Sprinkler",
        }
    }
}

/// A sprinkler placed on the grid. Coexists with an empty cell, never with
/// a planted one. Expires silently; manual removal refunds one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedSprinkler {
    pub kind: SprinklerKind,
    pub row: usize,
    pub col: usize,
    pub placed_at_ms: u64,
    pub expires_at_ms: u64,
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SprinklerState {
    pub placed: Vec<PlacedSprinkler>,
}

impl SprinklerState {
    pub fn at(&self, row: usize, col: usize) -> Option<&PlacedSprinkler> {
        self.placed.iter().find(|s| s.row == row && s.col == col)
    }

    /// Sum of growth bonuses from every sprinkler covering (row, col).
    pub fn growth_bonus_at(&self, row: usize, col: usize) -> f64 {
        self.placed
            .iter()
            .filter(|s| {
                let dr = (s.row as i64 - row as i64).abs();
                let dc = (s.col as i64 - col as i64).abs();
                dr.max(dc) <= s.kind.range()
            })
            .map(|s| s.kind.growth_bonus())
            .sum()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER RESOURCES & SHOP
// ═══════════════════════════════════════════════════════════════════════

/// Clamp a possibly-negative persisted number to zero on read.
fn de_clamped_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = i64::deserialize(deserializer)?;
    Ok(v.max(0) as u64)
}

/// Spendable resources. Unsigned by construction; snapshots that carry
/// negative values (older saves, hand-edited files) are clamped to zero on
/// every read rather than rejected.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResources {
    #[serde(deserialize_with = "de_clamped_u64")]
    pub money: u64,
    #[serde(deserialize_with = "de_clamped_u64")]
    pub water: u64,
    #[serde(deserialize_with = "de_clamped_u64")]
    pub fertilizer: u64,
    #[serde(deserialize_with = "de_clamped_u64")]
    pub score: u64,
}

impl Default for PlayerResources {
    fn default() -> Self {
        Self {
            money: STARTING_MONEY,
            water: STARTING_WATER,
            fertilizer: STARTING_FERTILIZER,
            score: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedStock {
    pub stock: u32,
    pub max_stock: u32,
    pub restock_amount: u32,
}

/// Mutable shop state: per-seed stock, last restock time, and the player's
/// unplaced sprinkler inventory (purchase and placement are separate acts).
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopState {
    pub seeds: HashMap<PlantId, SeedStock>,
    pub last_restock_ms: u64,
    pub sprinkler_inventory: HashMap<SprinklerKind, u32>,
}

impl ShopState {
    pub fn sprinkler_count(&self, kind: SprinklerKind) -> u32 {
        self.sprinkler_inventory.get(&kind).copied().unwrap_or(0)
    }
}

/// Immutable initial stock table, populated by the data layer and copied
/// into [`ShopState`] on every fresh game.
#[derive(Resource, Debug, Default)]
pub struct ShopCatalog {
    pub initial_stock: HashMap<PlantId, SeedStock>,
}

// ═══════════════════════════════════════════════════════════════════════
// TOOLS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Water,
    Fertilizer,
    Shovel,
    Harvest,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Water,
        ToolKind::Fertilizer,
        ToolKind::Shovel,
        ToolKind::Harvest,
    ];

    pub fn base_upgrade_cost(self) -> u64 {
        match self {
            ToolKind::Water => 50,
            ToolKind::Fertilizer => 75,
            ToolKind::Shovel => 100,
            ToolKind::Harvest => 60,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Water => "Watering Can",
            ToolKind::Fertilizer => "Fertilizer Spreader",
            ToolKind::Shovel => "Shovel",
            ToolKind::Harvest => "Harvest Basket",
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    pub levels: HashMap<ToolKind, u8>,
    pub upgrade_costs: HashMap<ToolKind, u64>,
    /// Cumulative harvest-value bonus from harvest-tool upgrades.
    pub harvest_bonus: f64,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            levels: ToolKind::ALL.iter().map(|t| (*t, 1)).collect(),
            upgrade_costs: ToolKind::ALL
                .iter()
                .map(|t| (*t, t.base_upgrade_cost()))
                .collect(),
            harvest_bonus: 0.0,
        }
    }
}

impl ToolState {
    pub fn level(&self, tool: ToolKind) -> u8 {
        self.levels.get(&tool).copied().unwrap_or(1)
    }

    pub fn upgrade_cost(&self, tool: ToolKind) -> u64 {
        self.upgrade_costs
            .get(&tool)
            .copied()
            .unwrap_or_else(|| tool.base_upgrade_cost())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CHALLENGES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    Harvest,
    Plant,
    Water,
    Money,
    Rare,
    Legendary,
    Expansion,
}

/// Period key deciding when a challenge regenerates: the day or week index
/// (floor of epoch time over the period length) it was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengePeriod {
    Day(u64),
    Week(u64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub kind: ChallengeKind,
    pub target: u64,
    pub progress: u64,
    pub reward: u64,
    pub completed: bool,
    pub period: ChallengePeriod,
    pub description: String,
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeBoard {
    pub daily: Option<Challenge>,
    pub weekly: Option<Challenge>,
    pub completed: Vec<Challenge>,
}

// ═══════════════════════════════════════════════════════════════════════
// ACHIEVEMENTS & STATS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstHarvest,
    MoneyMaker,
    PlantMaster,
    WaterWizard,
    FertilizerFanatic,
    SpeedGrower,
    RareCollector,
    LegendaryFarmer,
}

/// Unlock set. Monotonic: ids are only ever inserted, never removed.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Achievements {
    pub unlocked: HashSet<AchievementId>,
}

impl Achievements {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains(&id)
    }
}

/// Cumulative counters the achievement conditions are evaluated against.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementStats {
    pub total_harvests: u64,
    pub total_money: u64,
    pub plants_planted: u64,
    pub plants_watered: u64,
    pub plants_fertilized: u64,
    pub rare_harvests: u64,
    pub legendary_harvests: u64,
    pub different_plants: HashSet<PlantId>,
    pub speed_grower: bool,
}

/// Lifetime play statistics, separate from achievement bookkeeping.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStats {
    pub total_harvested: u64,
    pub total_money_earned: u64,
    pub total_water_used: u64,
    pub total_fertilizer_used: u64,
    pub harvests_by_plant: HashMap<PlantId, u64>,
    pub best_harvest: u64,
    pub longest_session_ms: u64,
    pub session_start_ms: u64,
}

// ═══════════════════════════════════════════════════════════════════════
// FLAGS, SELECTION, SAVE SLOT
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFlags {
    pub sound_enabled: bool,
    pub has_used_creative_mode: bool,
    pub has_won: bool,
}

impl Default for GameFlags {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            has_used_creative_mode: false,
            has_won: false,
        }
    }
}

/// Volatile UI-adjacent selection state. Never persisted; reset on load,
/// new game, and tick-driver recovery.
#[derive(Resource, Debug, Clone, Default)]
pub struct Selection {
    pub seed: Option<PlantId>,
    pub sprinkler: Option<SprinklerKind>,
    pub tool: Option<ToolKind>,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSaveSlot {
    pub slot: u32,
}

impl Default for ActiveSaveSlot {
    fn default() -> Self {
        Self { slot: 1 }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TUNING — interval configuration with on-disk override
// ═══════════════════════════════════════════════════════════════════════

/// Timer tuning. Defaults match the shipped game; a `tuning.ron` file next
/// to the executable can override individual fields.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimTuning {
    pub weather_change_interval_ms: u64,
    pub restock_interval_ms: u64,
    pub autosave_interval_ms: u64,
    pub season_length_days: u64,
    pub rare_restock_chance: f64,
    pub legendary_restock_chance: f64,
    pub catchup_interval_ms: u64,
    pub catchup_write_guard_ms: u64,
}

impl Default for SimTuning {
    fn default() -> Self {
        Self {
            weather_change_interval_ms: WEATHER_CHANGE_INTERVAL_MS,
            restock_interval_ms: RESTOCK_INTERVAL_MS,
            autosave_interval_ms: AUTOSAVE_INTERVAL_MS,
            season_length_days: SEASON_LENGTH_DAYS,
            rare_restock_chance: RARE_RESTOCK_CHANCE,
            legendary_restock_chance: LEGENDARY_RESTOCK_CHANCE,
            catchup_interval_ms: CATCHUP_INTERVAL_MS,
            catchup_write_guard_ms: CATCHUP_WRITE_GUARD_MS,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════

/// Typed failure for every Action-API mutator. Always local and non-fatal;
/// a UI shows the message and the loop continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("not enough money")]
    InsufficientFunds,
    #[error("seed is out of stock")]
    OutOfStock,
    #[error("seed cannot be planted this season")]
    SeasonMismatch,
    #[error("cell is already occupied")]
    CellOccupied,
    #[error("still on cooldown")]
    Cooldown,
    #[error("no resource left")]
    NoResource,
    #[error("nothing is planted there")]
    NotPlanted,
    #[error("none left in inventory")]
    NoInventory,
    #[error("tool is already at max level")]
    MaxLevel,
    #[error("garden is already at maximum size")]
    AlreadyMaxSize,
    #[error("coordinate is outside the garden")]
    InvalidCoordinate,
    #[error("unknown plant type")]
    UnknownPlant,
    #[error("no sprinkler at that cell")]
    UnknownSprinkler,
}

/// Snapshot load/save failure. Load failures are recovered by discarding
/// the snapshot and starting a fresh game for the slot, never by crashing.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is corrupt: {0}")]
    Corrupt(String),
    #[error("snapshot belongs to slot {found}, expected slot {expected}")]
    SlotMismatch { expected: u32, found: u32 },
    #[error("save file io: {0}")]
    Io(#[from] std::io::Error),
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Player-facing notification. Only emitted in foreground (normal) mode;
/// the silent catch-up path performs identical computation without these.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
}

// ─── Action requests (UI/driver → garden & economy) ───────────────────

#[derive(Event, Debug, Clone)]
pub struct PlantSeedEvent {
    pub row: usize,
    pub col: usize,
    pub seed: PlantId,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct WaterCellEvent {
    pub row: usize,
    pub col: usize,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct FertilizeCellEvent {
    pub row: usize,
    pub col: usize,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct HarvestCellEvent {
    pub row: usize,
    pub col: usize,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct RemovePlantEvent {
    pub row: usize,
    pub col: usize,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct BuySprinklerEvent {
    pub kind: SprinklerKind,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PlaceSprinklerEvent {
    pub row: usize,
    pub col: usize,
    pub kind: SprinklerKind,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct RemoveSprinklerEvent {
    pub row: usize,
    pub col: usize,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct UpgradeToolEvent {
    pub tool: ToolKind,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ExpandGardenEvent;

// ─── Domain notifications (garden/climate → progress & UI) ─────────────

#[derive(Event, Debug, Clone)]
pub struct PlantPlantedEvent {
    pub plant_id: PlantId,
}

#[derive(Event, Debug, Clone)]
pub struct PlantHarvestedEvent {
    pub plant_id: PlantId,
    pub value: u64,
    pub stage: u8,
    pub rarity: Rarity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct CellWateredEvent;

#[derive(Event, Debug, Clone, Copy)]
pub struct CellFertilizedEvent;

/// A plant reached full maturity this frame; `elapsed_ms` is measured from
/// planting to detection.
#[derive(Event, Debug, Clone)]
pub struct PlantMaturedEvent {
    pub plant_id: PlantId,
    pub elapsed_ms: u64,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct GardenExpandedEvent {
    pub new_size: usize,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SeasonChangedEvent {
    pub season: Season,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct WeatherChangedEvent {
    pub weather: Weather,
}

#[derive(Event, Debug, Clone)]
pub struct ChallengeCompletedEvent {
    pub description: String,
    pub reward: u64,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct AchievementUnlockedEvent {
    pub id: AchievementId,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct GameWonEvent;

// ─── Persistence ───────────────────────────────────────────────────────

/// Request a save of the active slot.
#[derive(Event, Debug, Clone, Copy)]
pub struct SaveRequestEvent;

#[derive(Event, Debug, Clone, Copy)]
pub struct LoadRequestEvent {
    pub slot: u32,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct NewGameEvent {
    pub slot: u32,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SaveCompleteEvent {
    pub slot: u32,
    pub success: bool,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct LoadCompleteEvent {
    pub slot: u32,
    /// False when the snapshot was missing/corrupt and a fresh game was
    /// initialized instead.
    pub from_snapshot: bool,
}

// ─── Collaborator signals (session layer) ──────────────────────────────

/// Externally delivered "force logout": save best-effort, then stop.
#[derive(Event, Debug, Clone, Copy)]
pub struct ForceLogoutEvent;

/// Suspend the simulation loop: Playing -> Paused. Gameplay systems are
/// gated on Playing, so nothing advances until the matching resume.
#[derive(Event, Debug, Clone, Copy)]
pub struct PauseEvent;

#[derive(Event, Debug, Clone, Copy)]
pub struct ResumeEvent;

#[derive(Event, Debug, Clone)]
pub struct VisitRequestEvent {
    pub from: String,
}

#[derive(Event, Debug, Clone)]
pub struct VisitResponseEvent {
    pub from: String,
    pub accepted: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const STAGE_COUNT: usize = 5;
pub const STAGE_MULTIPLIERS: [f64; STAGE_COUNT] = [0.1, 0.3, 0.6, 0.8, 1.0];
pub const STAGE_NAMES: [&str; STAGE_COUNT] = ["seed", "sprout", "small", "medium", "mature"];

pub const STARTING_MONEY: u64 = 100;
pub const STARTING_WATER: u64 = 50;
pub const STARTING_FERTILIZER: u64 = 20;

pub const GARDEN_SIZE_START: usize = 8;
pub const GARDEN_SIZE_MAX: usize = 12;
pub const EXPANSION_COST_START: u64 = 5_000;
pub const EXPANSION_COST_FACTOR: f64 = 1.3;

pub const WATER_EFFECT_MS: u64 = 15_000;
pub const WATER_COOLDOWN_MS: u64 = 8_000;
pub const FERTILIZER_EFFECT_MS: u64 = 20_000;
pub const FERTILIZER_COOLDOWN_MS: u64 = 12_000;

// Display-multiplier bases: unwatered, watered, fertilized, both.
pub const GROWTH_MULT_BASE: f64 = 0.3;
pub const GROWTH_MULT_WATERED: f64 = 1.8;
pub const GROWTH_MULT_FERTILIZED: f64 = 2.5;
pub const GROWTH_MULT_BOTH: f64 = 3.2;

pub const WEATHER_CHANGE_INTERVAL_MS: u64 = 300_000;
pub const RESTOCK_INTERVAL_MS: u64 = 180_000;
pub const AUTOSAVE_INTERVAL_MS: u64 = 60_000;
pub const SEASON_LENGTH_DAYS: u64 = 30;
pub const DAY_MS: u64 = 86_400_000;
pub const WEEK_MS: u64 = 7 * DAY_MS;

pub const RARE_RESTOCK_CHANCE: f64 = 0.15;
pub const LEGENDARY_RESTOCK_CHANCE: f64 = 0.08;

pub const MAX_TOOL_LEVEL: u8 = 5;
pub const TOOL_COST_FACTOR: f64 = 1.5;
pub const WATER_UPGRADE_REWARD: u64 = 10;
pub const FERTILIZER_UPGRADE_REWARD: u64 = 5;
pub const HARVEST_UPGRADE_BONUS: f64 = 0.1;

pub const WIN_SCORE: u64 = 10_000;
pub const SPEED_GROWER_WINDOW_MS: u64 = 30_000;

pub const NUM_SAVE_SLOTS: u32 = 3;
pub const SAVE_VERSION: u32 = 1;
pub const CATCHUP_INTERVAL_MS: u64 = 5_000;
pub const CATCHUP_WRITE_GUARD_MS: u64 = 60_000;
