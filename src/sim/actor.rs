//! Player and NPC actors

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::arena::Platform;
use super::npc::NpcBrain;
use crate::consts::*;
use crate::{flatten, heading_of};

/// Who an actor is. Ordering is the tie-break order (player first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActorId {
    Player,
    Npc(u8),
}

impl ActorId {
    pub fn is_player(&self) -> bool {
        matches!(self, ActorId::Player)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorId::Player => write!(f, "player"),
            ActorId::Npc(i) => write!(f, "npc{}", i + 1),
        }
    }
}

/// Hit flag + the tick it was raised on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitState {
    pub active: bool,
    pub at_tick: u64,
}

impl HitState {
    pub fn trigger(&mut self, tick: u64) {
        self.active = true;
        self.at_tick = tick;
    }

    pub fn clear(&mut self) {
        self.active = false;
    }

    /// True once an active hit has lasted `duration` ticks
    pub fn expired(&self, tick: u64, duration: u64) -> bool {
        self.active && tick.saturating_sub(self.at_tick) >= duration
    }
}

/// A character on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub pos: Vec3,
    /// Desired movement (ground plane, length ≤ 1)
    pub move_dir: Vec3,
    /// Yaw in radians, follows the last non-zero movement
    pub heading: f32,
    /// Run speed (units/s)
    pub speed: f32,
    pub score: u32,
    /// Number of collectibles picked up
    pub collected: u32,
    pub hit: HitState,
    /// Ticks before this actor can be hit again
    #[serde(default)]
    pub hit_cooldown: u32,
    /// Wander AI, `None` for the player
    pub brain: Option<NpcBrain>,
}

impl Actor {
    pub fn player(pos: Vec3) -> Self {
        Self {
            id: ActorId::Player,
            pos: flatten(pos),
            move_dir: Vec3::ZERO,
            heading: 0.0,
            speed: PLAYER_SPEED,
            score: 0,
            collected: 0,
            hit: HitState::default(),
            hit_cooldown: 0,
            brain: None,
        }
    }

    pub fn npc(index: u8, pos: Vec3, brain: NpcBrain) -> Self {
        let pos = flatten(pos);
        Self {
            id: ActorId::Npc(index),
            // Face the platform centre at spawn
            heading: heading_of(-pos),
            speed: NPC_SPEED * brain.speed_scale,
            brain: Some(brain),
            ..Self::player(pos)
        }
    }

    /// Set the desired movement direction (input or AI)
    pub fn set_move_direction(&mut self, dir: Vec3) {
        let dir = flatten(dir);
        self.move_dir = if dir.length_squared() > 1.0 {
            dir.normalize()
        } else {
            dir
        };
    }

    /// Whether this actor is currently moving on its own
    pub fn is_moving(&self) -> bool {
        !self.hit.active && self.move_dir.length_squared() > 1e-6
    }

    /// A stunned actor can't pick anything up
    pub fn can_collect(&self) -> bool {
        !self.hit.active
    }

    /// A hit-eligible actor: not stunned and not cooling down
    pub fn can_be_hit(&self) -> bool {
        !self.hit.active && self.hit_cooldown == 0
    }

    /// Integrate movement for one tick, staying on the platform
    pub fn step(&mut self, platform: &Platform, dt: f32) {
        if self.hit_cooldown > 0 {
            self.hit_cooldown -= 1;
        }
        if !self.is_moving() {
            return;
        }
        let next = self.pos + self.move_dir * self.speed * dt;
        self.pos = platform.clamp(next, ACTOR_RADIUS);
        self.heading = heading_of(self.move_dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_move_direction_normalized() {
        let mut actor = Actor::player(Vec3::ZERO);
        actor.set_move_direction(Vec3::new(3.0, 9.0, 4.0));
        assert!((actor.move_dir.length() - 1.0).abs() < 1e-5);
        assert_eq!(actor.move_dir.y, 0.0);

        // Analog input below full tilt is kept
        actor.set_move_direction(Vec3::new(0.5, 0.0, 0.0));
        assert!((actor.move_dir.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_step_moves_and_turns() {
        let platform = Platform::default();
        let mut actor = Actor::player(Vec3::ZERO);
        actor.set_move_direction(Vec3::X);
        actor.step(&platform, 1.0);
        assert!((actor.pos.x - PLAYER_SPEED).abs() < 1e-5);
        assert!((actor.heading - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_hit_actor_does_not_move() {
        let platform = Platform::default();
        let mut actor = Actor::player(Vec3::ZERO);
        actor.set_move_direction(Vec3::X);
        actor.hit.trigger(10);
        actor.step(&platform, 1.0);
        assert_eq!(actor.pos, Vec3::ZERO);
        assert!(!actor.can_collect());
    }

    #[test]
    fn test_hit_state_expiry() {
        let mut hit = HitState::default();
        assert!(!hit.expired(100, 10));
        hit.trigger(100);
        assert!(!hit.expired(109, 10));
        assert!(hit.expired(110, 10));
        hit.clear();
        assert!(!hit.expired(200, 10));
    }

    #[test]
    fn test_actor_id_display_and_order() {
        assert_eq!(ActorId::Player.to_string(), "player");
        assert_eq!(ActorId::Npc(1).to_string(), "npc2");
        assert!(ActorId::Player < ActorId::Npc(0));
        assert!(ActorId::Npc(0) < ActorId::Npc(1));
    }

    proptest! {
        #[test]
        fn walking_never_leaves_platform(
            dx in -1.0f32..1.0,
            dz in -1.0f32..1.0,
            ticks in 1usize..2000,
        ) {
            let platform = Platform::default();
            let mut actor = Actor::player(Vec3::ZERO);
            actor.set_move_direction(Vec3::new(dx, 0.0, dz));
            for _ in 0..ticks {
                actor.step(&platform, SIM_DT);
            }
            prop_assert!(platform.contains_inset(actor.pos, ACTOR_RADIUS));
        }
    }
}
