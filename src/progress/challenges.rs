//! Daily and weekly challenges.
//!
//! Each period a challenge is drawn uniformly at random from a fixed
//! candidate list and stays stable until its period key (day or week index
//! of the epoch clock) rolls over. Completion pays the reward immediately
//! and archives the challenge.

use crate::shared::*;
use bevy::prelude::*;
use rand::Rng;

/// (kind, target, reward)
const DAILY_CANDIDATES: &[(ChallengeKind, u64, u64)] = &[
    (ChallengeKind::Harvest, 10, 50),
    (ChallengeKind::Plant, 15, 30),
    (ChallengeKind::Water, 20, 25),
    (ChallengeKind::Money, 200, 40),
    (ChallengeKind::Rare, 3, 75),
];

const WEEKLY_CANDIDATES: &[(ChallengeKind, u64, u64)] = &[
    (ChallengeKind::Harvest, 50, 200),
    (ChallengeKind::Plant, 75, 150),
    (ChallengeKind::Money, 1_000, 300),
    (ChallengeKind::Legendary, 5, 500),
    (ChallengeKind::Expansion, 1, 400),
];

fn describe(kind: ChallengeKind, target: u64) -> String {
    match kind {
        ChallengeKind::Harvest => format!("Harvest {target} plants"),
        ChallengeKind::Plant => format!("Plant {target} seeds"),
        ChallengeKind::Water => format!("Water plants {target} times"),
        ChallengeKind::Money => format!("Earn {target} coins from harvests"),
        ChallengeKind::Rare => format!("Harvest {target} rare plants"),
        ChallengeKind::Legendary => format!("Harvest {target} legendary plants"),
        ChallengeKind::Expansion => format!("Expand your garden {target} time(s)"),
    }
}

pub fn day_index(now: u64) -> u64 {
    now / DAY_MS
}

pub fn week_index(now: u64) -> u64 {
    now / WEEK_MS
}

fn pick(candidates: &[(ChallengeKind, u64, u64)], period: ChallengePeriod, rng: &mut impl Rng) -> Challenge {
    let (kind, target, reward) = candidates[rng.gen_range(0..candidates.len())];
    Challenge {
        kind,
        target,
        progress: 0,
        reward,
        completed: false,
        period,
        description: describe(kind, target),
    }
}

pub fn generate_daily(now: u64, rng: &mut impl Rng) -> Challenge {
    pick(DAILY_CANDIDATES, ChallengePeriod::Day(day_index(now)), rng)
}

pub fn generate_weekly(now: u64, rng: &mut impl Rng) -> Challenge {
    pick(WEEKLY_CANDIDATES, ChallengePeriod::Week(week_index(now)), rng)
}

/// Regenerate whichever board slots are missing or belong to an elapsed
/// period. Returns true when anything regenerated.
pub fn refresh_board(board: &mut ChallengeBoard, now: u64, rng: &mut impl Rng) -> bool {
    let mut changed = false;

    let daily_stale = match &board.daily {
        None => true,
        Some(c) => c.period != ChallengePeriod::Day(day_index(now)),
    };
    if daily_stale {
        board.daily = Some(generate_daily(now, rng));
        changed = true;
    }

    let weekly_stale = match &board.weekly {
        None => true,
        Some(c) => c.period != ChallengePeriod::Week(week_index(now)),
    };
    if weekly_stale {
        board.weekly = Some(generate_weekly(now, rng));
        changed = true;
    }

    changed
}

/// Advance both active challenges matching `kind` by `amount`; challenges
/// that reach their target are marked completed, archived, and returned so
/// the caller can pay their rewards.
pub fn record_progress(board: &mut ChallengeBoard, kind: ChallengeKind, amount: u64) -> Vec<Challenge> {
    let mut done = Vec::new();
    for slot in [&mut board.daily, &mut board.weekly] {
        if let Some(ch) = slot {
            if ch.kind != kind || ch.completed {
                continue;
            }
            ch.progress += amount;
            if ch.progress >= ch.target {
                ch.completed = true;
                done.push(ch.clone());
            }
        }
    }
    board.completed.extend(done.iter().cloned());
    done
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn refresh_challenge_board(clock: Res<GameClock>, mut board: ResMut<ChallengeBoard>) {
    if refresh_board(&mut board, clock.now(), &mut rand::thread_rng()) {
        info!("[Progress] challenge board refreshed");
    }
}

/// Feed domain events into challenge progress and pay completions.
#[allow(clippy::too_many_arguments)]
pub fn track_challenge_progress(
    mut harvested: EventReader<PlantHarvestedEvent>,
    mut planted: EventReader<PlantPlantedEvent>,
    mut watered: EventReader<CellWateredEvent>,
    mut expanded: EventReader<GardenExpandedEvent>,
    mut board: ResMut<ChallengeBoard>,
    mut resources: ResMut<PlayerResources>,
    mut completed_events: EventWriter<ChallengeCompletedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let mut completed = Vec::new();

    for ev in harvested.read() {
        completed.extend(record_progress(&mut board, ChallengeKind::Harvest, 1));
        completed.extend(record_progress(&mut board, ChallengeKind::Money, ev.value));
        match ev.rarity {
            Rarity::Rare => {
                completed.extend(record_progress(&mut board, ChallengeKind::Rare, 1));
            }
            Rarity::Legendary => {
                completed.extend(record_progress(&mut board, ChallengeKind::Legendary, 1));
            }
            Rarity::Common => {}
        }
    }
    for _ in planted.read() {
        completed.extend(record_progress(&mut board, ChallengeKind::Plant, 1));
    }
    for _ in watered.read() {
        completed.extend(record_progress(&mut board, ChallengeKind::Water, 1));
    }
    for _ in expanded.read() {
        completed.extend(record_progress(&mut board, ChallengeKind::Expansion, 1));
    }

    for ch in completed {
        resources.money += ch.reward;
        info!("[Progress] challenge complete: {} (+{})", ch.description, ch.reward);
        completed_events.send(ChallengeCompletedEvent {
            description: ch.description.clone(),
            reward: ch.reward,
        });
        toasts.send(ToastEvent {
            message: format!("Challenge complete: {} (+{} coins)", ch.description, ch.reward),
        });
    }
}
