//! Session domain — contracts with the external collaborators.
//!
//! Auth, moderation, and the multiplayer relay live outside this crate.
//! What the simulation owes them is small: accept a force-logout signal
//! (best-effort save, then stop the loop), accept garden-visit requests
//! and let the player answer them, pause and resume the gameplay loop,
//! and expose the read-only snapshot accessor (`save::collect_snapshot`)
//! for pushing garden views to peers.

use crate::save::{collect_snapshot, write_save, LastSaveTime, SaveDirectory, SimState};
use crate::shared::*;
use bevy::app::AppExit;
use bevy::prelude::*;

/// Visit requests awaiting a player response, keyed by requester name.
#[derive(Resource, Debug, Default)]
pub struct PendingVisits {
    pub from: Vec<String>,
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingVisits>()
            .add_systems(
                Update,
                (handle_force_logout, handle_visit_request, handle_visit_response),
            )
            .add_systems(Update, handle_pause.run_if(in_state(GameState::Playing)))
            .add_systems(Update, handle_resume.run_if(in_state(GameState::Paused)));
    }
}

/// Playing -> Paused. Every gameplay system runs under a Playing gate, so
/// the whole simulation holds still until resume.
fn handle_pause(
    mut events: EventReader<PauseEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if events.read().next().is_some() {
        info!("[Session] paused");
        next_state.set(GameState::Paused);
    }
}

fn handle_resume(
    mut events: EventReader<ResumeEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if events.read().next().is_some() {
        info!("[Session] resumed");
        next_state.set(GameState::Playing);
    }
}

/// Moderation said stop: persist what we can, then exit the loop. The save
/// is best-effort — a failed write must not block the logout.
fn handle_force_logout(
    mut events: EventReader<ForceLogoutEvent>,
    clock: Res<GameClock>,
    dir: Res<SaveDirectory>,
    active: Res<ActiveSaveSlot>,
    state: SimState,
    mut last_save: ResMut<LastSaveTime>,
    mut exit: EventWriter<AppExit>,
) {
    if events.read().next().is_none() {
        return;
    }
    warn!("[Session] force logout received");
    let now = clock.now();
    let file = collect_snapshot(&state, active.slot, now);
    match write_save(&dir.path, &file) {
        Ok(()) => last_save.0 = now,
        Err(e) => warn!("[Session] final save failed: {e}"),
    }
    exit.send(AppExit::Success);
}

fn handle_visit_request(
    mut events: EventReader<VisitRequestEvent>,
    mut pending: ResMut<PendingVisits>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        if pending.from.contains(&ev.from) {
            continue;
        }
        info!("[Session] visit request from {}", ev.from);
        pending.from.push(ev.from.clone());
        toasts.send(ToastEvent {
            message: format!("{} wants to visit your garden!", ev.from),
        });
    }
}

fn handle_visit_response(
    mut events: EventReader<VisitResponseEvent>,
    mut pending: ResMut<PendingVisits>,
) {
    for ev in events.read() {
        pending.from.retain(|name| name != &ev.from);
        info!(
            "[Session] visit from {} {}",
            ev.from,
            if ev.accepted { "accepted" } else { "declined" }
        );
    }
}
