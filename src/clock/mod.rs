//! Clock domain — drives [`GameClock`] from the wall clock and loads the
//! interval tuning overrides.
//!
//! Everything timer-shaped in the simulation compares absolute epoch
//! milliseconds against `GameClock::now_ms`. The foreground app refreshes
//! it once per frame here; tests and the background catch-up pass set it by
//! hand instead of adding this plugin.

use crate::shared::*;
use bevy::prelude::*;
use std::time::{SystemTime, UNIX_EPOCH};

pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_tuning)
            .add_systems(First, advance_clock);
    }
}

/// Current wall-clock time as epoch milliseconds.
pub fn unix_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn advance_clock(mut clock: ResMut<GameClock>) {
    clock.now_ms = unix_now_ms();
}

/// Overrides [`SimTuning`] from a `tuning.ron` file next to the executable,
/// when one exists. Missing or unreadable file keeps the defaults.
fn load_tuning(mut tuning: ResMut<SimTuning>) {
    let path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.join("tuning.ron")));
    let Some(path) = path else {
        return;
    };
    if !path.exists() {
        return;
    }
    match std::fs::read_to_string(&path) {
        Ok(text) => match ron::from_str::<SimTuning>(&text) {
            Ok(loaded) => {
                *tuning = loaded;
                info!("[Clock] tuning overrides loaded from {}", path.display());
            }
            Err(e) => {
                warn!("[Clock] ignoring malformed tuning.ron: {e}");
            }
        },
        Err(e) => {
            warn!("[Clock] could not read tuning.ron: {e}");
        }
    }
}
