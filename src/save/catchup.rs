//! Silent background catch-up for non-active save slots.
//!
//! Instead of instantiating a second simulation, the catch-up pass loads a
//! slot's snapshot (a deep copy by deserialization), runs the same pure
//! advance functions the foreground uses with the current clock, and
//! writes the result back. No events, no toasts — only the computation.
//!
//! Two guards protect the foreground session: the scheduler never touches
//! the active slot, and a slot whose last save is younger than the write
//! guard is skipped entirely so a just-made foreground change can never be
//! clobbered.

use crate::climate::{advance_season, advance_weather};
use crate::economy::shop::restock_shop;
use crate::garden::growth::advance_garden;
use crate::garden::sprinklers::expire_sprinklers;
use crate::progress::achievements::check_achievements;
use crate::progress::challenges::refresh_board;
use crate::save::{read_save, write_save};
use crate::shared::*;
use bevy::prelude::*;
use rand::Rng;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No snapshot exists for the slot.
    NoSave,
    /// The slot was saved too recently; writing now could clobber a
    /// foreground change.
    RecentSave,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatchUpReport {
    pub matured: usize,
    pub expired_sprinklers: usize,
    pub restocked_seeds: usize,
    pub weather_changed: bool,
    pub season_changed: bool,
    pub achievements_unlocked: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatchUpOutcome {
    Skipped(SkipReason),
    Advanced(CatchUpReport),
}

/// Advance one slot's snapshot to `now` and persist it.
pub fn catch_up_slot(
    dir: &Path,
    slot: u32,
    now: u64,
    tuning: &SimTuning,
    registry: &PlantRegistry,
    rng: &mut impl Rng,
) -> Result<CatchUpOutcome, SnapshotError> {
    let mut file = match read_save(dir, slot) {
        Ok(f) => f,
        Err(SnapshotError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(CatchUpOutcome::Skipped(SkipReason::NoSave));
        }
        Err(e) => return Err(e),
    };

    if now.saturating_sub(file.save_time_ms) < tuning.catchup_write_guard_ms {
        return Ok(CatchUpOutcome::Skipped(SkipReason::RecentSave));
    }

    let mut report = CatchUpReport::default();

    report.expired_sprinklers = expire_sprinklers(&mut file.sprinklers, now);
    report.season_changed =
        advance_season(&mut file.season, now, tuning.season_length_days).is_some();
    report.weather_changed =
        advance_weather(&mut file.weather, now, tuning.weather_change_interval_ms).is_some();

    let matured = advance_garden(
        &mut file.garden,
        &file.sprinklers,
        registry,
        file.weather.current,
        file.season.multiplier,
        now,
    );
    for m in &matured {
        if m.elapsed_ms <= SPEED_GROWER_WINDOW_MS {
            file.achievement_stats.speed_grower = true;
        }
    }
    report.matured = matured.len();

    report.restocked_seeds = restock_shop(&mut file.shop, registry, tuning, now, rng).len();
    refresh_board(&mut file.challenges, now, rng);
    report.achievements_unlocked =
        check_achievements(&mut file.achievements, &file.achievement_stats).len();

    file.save_time_ms = now;
    write_save(dir, &file)?;
    Ok(CatchUpOutcome::Advanced(report))
}

/// Foreground scheduler: every catch-up interval, advance every slot
/// except the active one.
pub fn run_catchup(
    clock: Res<GameClock>,
    tuning: Res<SimTuning>,
    dir: Res<super::SaveDirectory>,
    active: Res<ActiveSaveSlot>,
    registry: Res<PlantRegistry>,
    mut last_run: Local<u64>,
) {
    let now = clock.now();
    if now.saturating_sub(*last_run) < tuning.catchup_interval_ms {
        return;
    }
    *last_run = now;

    let mut rng = rand::thread_rng();
    for slot in 1..=NUM_SAVE_SLOTS {
        if slot == active.slot {
            continue;
        }
        match catch_up_slot(&dir.path, slot, now, &tuning, &registry, &mut rng) {
            Ok(CatchUpOutcome::Advanced(report)) => {
                debug!("[Save] slot {slot} caught up: {report:?}");
            }
            Ok(CatchUpOutcome::Skipped(_)) => {}
            Err(e) => {
                warn!("[Save] catch-up for slot {slot} failed: {e}");
            }
        }
    }
}
