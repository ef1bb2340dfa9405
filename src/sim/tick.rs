//! Fixed timestep simulation tick
//!
//! Core game loop that advances the match deterministically.

use glam::Vec3;
use rand::Rng;

use super::actor::Actor;
use super::clock::FrameClock;
use super::collectible::{CollectState, Collectible, CollectibleKind, roll_points};
use super::collision::{actors_overlap, find_claimant, nearest_available, separate};
use super::state::{GameEvent, GamePhase, GameState, Outcome};
use crate::consts::*;
use crate::ground_distance;
use crate::settings::secs_to_ticks;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New player movement direction (keyboard/touch); `None` keeps the last one
    pub move_dir: Option<Vec3>,
    /// Pause toggle
    pub pause: bool,
    /// Start a fresh match
    pub restart: bool,
    /// Demo mode - the player walks to collectibles on its own
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart {
        restart(state);
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Player direction: autopilot or input
    let player_dir = if input.autopilot {
        Some(autopilot_direction(state))
    } else {
        input.move_dir
    };
    if let Some(dir) = player_dir {
        if let Some(player) = state.actors.iter_mut().find(|a| a.id.is_player()) {
            player.set_move_direction(dir);
        }
    }

    update_npcs(state);

    let platform = state.platform;
    for actor in &mut state.actors {
        actor.step(&platform, dt);
    }

    expire_hits(state);
    detect_hits(state);
    collect(state);
    advance_collectibles(state, dt);

    state.spawn_timer = state.spawn_timer.saturating_sub(1);
    if state.spawn_timer == 0 {
        spawn_collectible(state);
        state.spawn_timer = state.rules.spawn_interval_ticks();
    }

    check_win(state);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Run the ticks a rendered frame owes
///
/// One-shot inputs (pause, restart) are consumed by the first tick that runs;
/// if the frame runs no ticks they stay pending for the next frame.
pub fn step_frame(
    state: &mut GameState,
    clock: &mut FrameClock,
    input: &mut TickInput,
    frame_dt: f32,
) -> u32 {
    let ticks = clock.advance(frame_dt);
    for _ in 0..ticks {
        tick(state, input, SIM_DT);
        input.pause = false;
        input.restart = false;
    }
    ticks
}

/// Replace the match with a fresh one, keeping rules and difficulty
pub fn restart(state: &mut GameState) {
    // Next seed comes from an LCG step so replays of a session stay reproducible
    let seed = state
        .seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state = GameState::new(seed, state.rules.clone(), state.difficulty);
    log::info!("Match restarted with seed {}", seed);
}

/// Steer toward the nearest unclaimed collectible
fn autopilot_direction(state: &GameState) -> Vec3 {
    let Some(player) = state.player() else {
        return Vec3::ZERO;
    };
    nearest_available(player.pos, &state.collectibles)
        .map(|c| crate::flatten(c.pos - player.pos).normalize_or_zero())
        .unwrap_or(Vec3::ZERO)
}

fn update_npcs(state: &mut GameState) {
    let GameState {
        actors,
        collectibles,
        platform,
        rng,
        ..
    } = state;

    for actor in actors.iter_mut() {
        // Stunned NPCs don't plan
        if actor.hit.active {
            continue;
        }
        let dir = match actor.brain.as_mut() {
            Some(brain) => brain.think(actor.pos, collectibles, platform, rng),
            None => continue,
        };
        actor.set_move_direction(dir);
    }
}

/// Clear hit flags that have run their course
fn expire_hits(state: &mut GameState) {
    let now = state.time_ticks;
    let mut cleared = Vec::new();
    for actor in &mut state.actors {
        if actor.hit.expired(now, HIT_DURATION_TICKS) {
            actor.hit.clear();
            actor.hit_cooldown = HIT_COOLDOWN_TICKS;
            cleared.push(actor.id);
        }
    }
    for actor in cleared {
        state.push_event(GameEvent::HitCleared { actor });
    }
}

/// Flag and knock apart every pair of actors that bumped into each other
fn detect_hits(state: &mut GameState) {
    let now = state.time_ticks;
    let platform = state.platform;
    let mut hits = Vec::new();

    let n = state.actors.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (left, right) = state.actors.split_at_mut(j);
            let a: &mut Actor = &mut left[i];
            let b: &mut Actor = &mut right[0];
            if !(a.can_be_hit() && b.can_be_hit()) || !actors_overlap(a, b) {
                continue;
            }
            let contact = (a.pos + b.pos) * 0.5;
            a.hit.trigger(now);
            b.hit.trigger(now);
            separate(a, b, &platform);
            hits.push(GameEvent::Hit {
                a: a.id,
                b: b.id,
                pos: contact,
            });
        }
    }
    for event in hits {
        state.push_event(event);
    }
}

/// Hand every reachable collectible to its claimant and award points
///
/// Points are rolled and awarded once, when the collect animation starts.
fn collect(state: &mut GameState) {
    let mut started = Vec::new();
    {
        let GameState {
            actors,
            collectibles,
            rng,
            ..
        } = state;

        for c in collectibles.iter_mut() {
            let Some(idx) = find_claimant(c, actors) else {
                continue;
            };
            let points = roll_points(c.kind, rng);
            let actor = &mut actors[idx];
            actor.score = actor.score.saturating_add(points);
            actor.collected += 1;
            c.state = CollectState::Collecting {
                by: actor.id,
                progress: 0.0,
            };
            started.push(GameEvent::CollectStarted {
                id: c.id,
                kind: c.kind,
                by: actor.id,
                points,
            });
        }
    }
    for event in started {
        state.push_event(event);
    }
}

/// Age collectibles, finish collect animations and despawn stale ones
fn advance_collectibles(state: &mut GameState, dt: f32) {
    let mut events = Vec::new();
    state.collectibles.retain_mut(|c| {
        if c.advance(dt) {
            if let Some(by) = c.collected_by() {
                events.push(GameEvent::Collected { id: c.id, by });
            }
            false
        } else if c.expired() {
            events.push(GameEvent::Despawned { id: c.id });
            false
        } else {
            true
        }
    });
    for event in events {
        state.push_event(event);
    }
}

/// Try to place one new collectible
///
/// Returns the new id, or `None` if the platform is full or no clear spot was
/// found.
pub fn spawn_collectible(state: &mut GameState) -> Option<u32> {
    if state.collectibles.len() >= state.rules.max_collectibles {
        return None;
    }

    let kind = if state.rng.random::<f32>() < state.rules.eyeball_chance {
        CollectibleKind::Eyeball
    } else {
        CollectibleKind::Mushroom
    };

    for _ in 0..SPAWN_ATTEMPTS {
        let pos = state.platform.random_point(&mut state.rng, ACTOR_RADIUS);
        if !spot_is_clear(state, pos) {
            continue;
        }
        let lifetime_secs = match kind {
            CollectibleKind::Mushroom => state.rules.mushroom_lifetime_secs,
            CollectibleKind::Eyeball => state.rules.eyeball_lifetime_secs,
        };
        let id = state.next_entity_id();
        state
            .collectibles
            .push(Collectible::new(id, kind, pos, secs_to_ticks(lifetime_secs)));
        state.push_event(GameEvent::Spawned { id, kind, pos });
        return Some(id);
    }

    log::debug!("No clear spot for a {} this time", kind.as_str());
    None
}

fn spot_is_clear(state: &GameState, pos: Vec3) -> bool {
    state
        .actors
        .iter()
        .all(|a| ground_distance(a.pos, pos) >= SPAWN_CLEARANCE)
        && state
            .collectibles
            .iter()
            .all(|c| ground_distance(c.pos, pos) >= SPAWN_CLEARANCE)
}

/// End the match when someone reaches the win score or the clock runs out
pub fn check_win(state: &mut GameState) {
    if state.outcome.is_some() {
        return;
    }

    let win_score = state.rules.win_score;
    // Highest score at or above the target; earlier actors win ties
    let mut best: Option<&Actor> = None;
    for actor in state.actors.iter().filter(|a| a.score >= win_score) {
        if best.is_none_or(|b| actor.score > b.score) {
            best = Some(actor);
        }
    }

    let outcome = if let Some(winner) = best {
        Outcome::Winner(winner.id)
    } else if state
        .rules
        .match_ticks()
        .is_some_and(|limit| state.time_ticks >= limit)
    {
        state.leader().map(Outcome::Winner).unwrap_or(Outcome::Draw)
    } else {
        return;
    };

    match outcome {
        Outcome::Winner(id) => log::info!(
            "Game over at t={:.1}s: {} wins with {} points",
            state.elapsed_secs(),
            id,
            state.actor(id).map(|a| a.score).unwrap_or(0)
        ),
        Outcome::Draw => log::info!("Game over at t={:.1}s: draw", state.elapsed_secs()),
    }

    state.outcome = Some(outcome);
    state.phase = GamePhase::GameOver;
    state.push_event(GameEvent::GameOver { outcome });
}
