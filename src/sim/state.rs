//! Game state and core simulation types
//!
//! Everything the front end reads each frame lives here. The state is fully
//! serializable (including the RNG) so snapshots reproduce exactly.

use std::collections::VecDeque;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId};
use super::arena::Platform;
use super::collectible::{Collectible, CollectibleKind};
use super::npc::NpcBrain;
use crate::consts::*;
use crate::settings::{Difficulty, Rules};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Someone won (or the clock ran out)
    GameOver,
}

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(ActorId),
    Draw,
}

/// Something the presentation layer may want to animate or play a sound for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned {
        id: u32,
        kind: CollectibleKind,
        pos: Vec3,
    },
    CollectStarted {
        id: u32,
        kind: CollectibleKind,
        by: ActorId,
        points: u32,
    },
    Collected {
        id: u32,
        by: ActorId,
    },
    /// Uncollected collectible timed out
    Despawned {
        id: u32,
    },
    Hit {
        a: ActorId,
        b: ActorId,
        pos: Vec3,
    },
    HitCleared {
        actor: ActorId,
    },
    GameOver {
        outcome: Outcome,
    },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Match seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (spawns, points, NPC decisions)
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    pub rules: Rules,
    pub difficulty: Difficulty,
    pub platform: Platform,
    /// Player first, then NPCs by index
    pub actors: Vec<Actor>,
    /// Active collectibles (sorted by id for determinism)
    pub collectibles: Vec<Collectible>,
    /// Ticks until the next spawn attempt
    pub spawn_timer: u32,
    /// Set once the match is over
    pub outcome: Option<Outcome>,
    /// Pending events for the presentation layer (not persisted)
    #[serde(skip)]
    pub events: VecDeque<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new match with the given seed
    pub fn new(seed: u64, rules: Rules, difficulty: Difficulty) -> Self {
        let platform = Platform::default();
        let mut actors = Vec::with_capacity(1 + rules.npc_count as usize);
        actors.push(Actor::player(Vec3::ZERO));

        // NPCs start evenly spread on a ring halfway to the edge
        let ring = platform.apothem() * 0.5;
        let npc_count = rules.npc_count.max(1) as f32;
        for i in 0..rules.npc_count {
            let angle = std::f32::consts::FRAC_PI_2 + std::f32::consts::TAU * i as f32 / npc_count;
            let pos = Vec3::new(ring * angle.cos(), 0.0, ring * angle.sin());
            actors.push(Actor::npc(i, pos, NpcBrain::for_difficulty(difficulty)));
        }

        let spawn_timer = rules.spawn_interval_ticks();

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            rules,
            difficulty,
            platform,
            actors,
            collectibles: Vec::new(),
            spawn_timer,
            outcome: None,
            events: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    pub fn player(&self) -> Option<&Actor> {
        self.actor(ActorId::Player)
    }

    /// (actor, score) pairs in actor order
    pub fn scores(&self) -> Vec<(ActorId, u32)> {
        self.actors.iter().map(|a| (a.id, a.score)).collect()
    }

    /// Highest scorer, `None` if the top score is shared
    pub fn leader(&self) -> Option<ActorId> {
        let top = self.actors.iter().map(|a| a.score).max()?;
        let mut leaders = self.actors.iter().filter(|a| a.score == top);
        let first = leaders.next()?;
        if leaders.next().is_some() {
            None
        } else {
            Some(first.id)
        }
    }

    /// Seconds of play so far
    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    /// Seconds until the match clock runs out, `None` when unlimited
    pub fn remaining_secs(&self) -> Option<f32> {
        self.rules
            .match_ticks()
            .map(|limit| limit.saturating_sub(self.time_ticks) as f32 * SIM_DT)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Queue an event, dropping the oldest when the queue is full
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_EVENTS {
            self.events.pop_front();
        }
        log::debug!("t={} {:?}", self.time_ticks, event);
        self.events.push_back(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Ensure collectibles are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.actors.sort_by_key(|a| a.id);
        self.collectibles.sort_by_key(|c| c.id);
    }
}
