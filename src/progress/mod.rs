//! Progress domain — daily/weekly challenges, achievements, lifetime
//! stats, and the win condition.
//!
//! Listens to domain notification events from the garden and climate
//! plugins; never mutates garden state itself.

use crate::shared::*;
use bevy::prelude::*;

pub mod achievements;
pub mod challenges;
pub mod stats;

pub struct ProgressPlugin;

impl Plugin for ProgressPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                challenges::refresh_challenge_board,
                challenges::track_challenge_progress,
                stats::track_achievement_stats,
                stats::track_game_stats,
                stats::track_session_length,
                achievements::check_achievements_system,
                check_win,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// One-time win gate: reached the score threshold without ever touching
/// creative mode. The flag is terminal and never auto-reverts.
fn check_win(
    resources: Res<PlayerResources>,
    mut flags: ResMut<GameFlags>,
    mut won: EventWriter<GameWonEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if flags.has_won || flags.has_used_creative_mode {
        return;
    }
    if resources.score >= WIN_SCORE {
        flags.has_won = true;
        info!("[Progress] win condition reached at score {}", resources.score);
        won.send(GameWonEvent);
        toasts.send(ToastEvent {
            message: "You won! Your garden is legendary!".to_string(),
        });
    }
}
