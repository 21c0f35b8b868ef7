//! Climate domain — weather rotation and season/day progression.
//!
//! Both subsystems are pure `advance` functions over their state plus the
//! current clock; the Bevy systems here wrap them and emit change events.
//! The background catch-up pass calls the same functions directly, which is
//! what keeps silent and foreground behavior identical.

use crate::shared::*;
use bevy::prelude::*;

pub struct ClimatePlugin;

impl Plugin for ClimatePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (update_weather, update_season).run_if(in_state(GameState::Playing)),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pure advance functions
// ─────────────────────────────────────────────────────────────────────────────

/// Rotate the weather one step along the fixed enum order once the change
/// interval has elapsed. Returns the new weather when a change happened.
///
/// A zero `last_change_ms` marks a state that has never ticked; the first
/// advance only arms the timer.
pub fn advance_weather(state: &mut WeatherState, now: u64, interval_ms: u64) -> Option<Weather> {
    if state.last_change_ms == 0 {
        state.last_change_ms = now;
        return None;
    }
    if now.saturating_sub(state.last_change_ms) >= interval_ms {
        state.current = state.current.next();
        state.last_change_ms = now;
        Some(state.current)
    } else {
        None
    }
}

/// Recompute season and day-in-season from elapsed time. The very first
/// advance of a fresh game pins `start_ms` and starts at Spring, day 1;
/// everything after that is arithmetic on (now - start_ms).
///
/// Returns the new season when the season index rolled over.
pub fn advance_season(
    state: &mut SeasonState,
    now: u64,
    season_length_days: u64,
) -> Option<Season> {
    let Some(start) = state.start_ms else {
        state.start_ms = Some(now);
        state.current = Season::Spring;
        state.day = 1;
        state.multiplier = Season::Spring.growth_multiplier();
        return None;
    };

    let days_since_start = now.saturating_sub(start) / DAY_MS;
    let season = Season::from_index((days_since_start / season_length_days) as usize);
    state.day = (days_since_start % season_length_days) as u32 + 1;

    if season != state.current {
        state.current = season;
        state.multiplier = season.growth_multiplier();
        Some(season)
    } else {
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Foreground systems
// ─────────────────────────────────────────────────────────────────────────────

fn update_weather(
    clock: Res<GameClock>,
    tuning: Res<SimTuning>,
    mut weather: ResMut<WeatherState>,
    mut changed: EventWriter<WeatherChangedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if let Some(new_weather) = advance_weather(
        &mut weather,
        clock.now(),
        tuning.weather_change_interval_ms,
    ) {
        info!("[Climate] weather changed to {}", new_weather.name());
        changed.send(WeatherChangedEvent {
            weather: new_weather,
        });
        toasts.send(ToastEvent {
            message: format!("The weather turned {}", new_weather.name().to_lowercase()),
        });
    }
}

fn update_season(
    clock: Res<GameClock>,
    tuning: Res<SimTuning>,
    mut season: ResMut<SeasonState>,
    mut changed: EventWriter<SeasonChangedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if let Some(new_season) = advance_season(&mut season, clock.now(), tuning.season_length_days) {
        info!(
            "[Climate] season changed to {} (day {})",
            new_season.name(),
            season.day
        );
        changed.send(SeasonChangedEvent { season: new_season });
        toasts.send(ToastEvent {
            message: format!("{} has arrived!", new_season.name()),
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
