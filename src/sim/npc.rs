//! NPC wandering
//!
//! NPCs alternate between strolling to random spots, idling, and running at
//! collectibles. Greed decides how often they pick a collectible over a
//! random stroll.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Platform;
use super::collectible::Collectible;
use super::collision::nearest_available;
use crate::consts::*;
use crate::ground_distance;
use crate::settings::Difficulty;

/// What an NPC is walking toward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WanderTarget {
    Point(Vec3),
    Collectible(u32),
}

/// Per-NPC wander state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcBrain {
    pub target: Option<WanderTarget>,
    /// Ticks left standing still
    pub idle_ticks: u32,
    /// Chance (0-1) to chase a collectible when picking a new target
    pub greed: f32,
    /// Multiplier on the NPC base speed
    pub speed_scale: f32,
    /// Idle pause range (ticks) after reaching a point
    pub idle_range: (u32, u32),
}

impl NpcBrain {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            target: None,
            idle_ticks: 0,
            greed: difficulty.npc_greed(),
            speed_scale: difficulty.npc_speed_scale(),
            idle_range: difficulty.npc_idle_range(),
        }
    }

    /// Decide this tick's movement direction
    pub fn think<R: Rng>(
        &mut self,
        pos: Vec3,
        collectibles: &[Collectible],
        platform: &Platform,
        rng: &mut R,
    ) -> Vec3 {
        if self.idle_ticks > 0 {
            self.idle_ticks -= 1;
            return Vec3::ZERO;
        }

        // Resolve the current target to a position, dropping stale ones
        let goal = match self.target {
            Some(WanderTarget::Collectible(id)) => {
                let still_there = collectibles
                    .iter()
                    .find(|c| c.id == id && c.is_available())
                    .map(|c| c.pos);
                if still_there.is_none() {
                    self.target = None;
                }
                still_there
            }
            Some(WanderTarget::Point(p)) => {
                if ground_distance(pos, p) < NPC_ARRIVE_DIST {
                    self.target = None;
                    let (lo, hi) = self.idle_range;
                    self.idle_ticks = rng.random_range(lo..=hi.max(lo));
                    return Vec3::ZERO;
                }
                Some(p)
            }
            None => None,
        };

        let goal = match goal {
            Some(goal) => goal,
            None => self.pick_target(pos, collectibles, platform, rng),
        };

        let to_goal = crate::flatten(goal - pos);
        to_goal.normalize_or_zero()
    }

    /// Choose a new target and return its position
    fn pick_target<R: Rng>(
        &mut self,
        pos: Vec3,
        collectibles: &[Collectible],
        platform: &Platform,
        rng: &mut R,
    ) -> Vec3 {
        if rng.random::<f32>() < self.greed {
            if let Some(c) = nearest_available(pos, collectibles) {
                self.target = Some(WanderTarget::Collectible(c.id));
                return c.pos;
            }
        }

        let mut point = platform.random_point(rng, ACTOR_RADIUS);
        for _ in 0..8 {
            if ground_distance(point, pos) >= NPC_MIN_TARGET_DIST {
                break;
            }
            point = platform.random_point(rng, ACTOR_RADIUS);
        }
        self.target = Some(WanderTarget::Point(point));
        point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collectible::{CollectState, CollectibleKind};
    use crate::sim::ActorId;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn greedy() -> NpcBrain {
        NpcBrain {
            greed: 1.0,
            ..NpcBrain::for_difficulty(Difficulty::Normal)
        }
    }

    #[test]
    fn test_idle_npc_stands_still() {
        let mut brain = greedy();
        brain.idle_ticks = 2;
        let mut rng = Pcg32::seed_from_u64(1);
        let platform = Platform::default();

        assert_eq!(brain.think(Vec3::ZERO, &[], &platform, &mut rng), Vec3::ZERO);
        assert_eq!(brain.idle_ticks, 1);
    }

    #[test]
    fn test_greedy_npc_chases_nearest_collectible() {
        let mut brain = greedy();
        let mut rng = Pcg32::seed_from_u64(1);
        let platform = Platform::default();
        let near = Collectible::new(5, CollectibleKind::Mushroom, Vec3::new(2.0, 0.0, 0.0), 600);
        let far = Collectible::new(6, CollectibleKind::Eyeball, Vec3::new(-8.0, 0.0, 0.0), 600);

        let dir = brain.think(Vec3::ZERO, &[far, near], &platform, &mut rng);
        assert_eq!(brain.target, Some(WanderTarget::Collectible(5)));
        assert!((dir - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_claimed_target_is_dropped() {
        let mut brain = greedy();
        brain.target = Some(WanderTarget::Collectible(5));
        let mut rng = Pcg32::seed_from_u64(1);
        let platform = Platform::default();
        let mut taken = Collectible::new(5, CollectibleKind::Mushroom, Vec3::new(2.0, 0.0, 0.0), 600);
        taken.state = CollectState::Collecting {
            by: ActorId::Player,
            progress: 0.2,
        };

        brain.think(Vec3::ZERO, &[taken], &platform, &mut rng);
        // Nothing else to chase, so the NPC strolls somewhere instead
        assert!(matches!(brain.target, Some(WanderTarget::Point(_))));
    }

    #[test]
    fn test_reaching_point_starts_idle() {
        let mut brain = NpcBrain {
            idle_range: (5, 5),
            ..greedy()
        };
        brain.target = Some(WanderTarget::Point(Vec3::new(0.1, 0.0, 0.0)));
        let mut rng = Pcg32::seed_from_u64(3);
        let platform = Platform::default();

        let dir = brain.think(Vec3::ZERO, &[], &platform, &mut rng);
        assert_eq!(dir, Vec3::ZERO);
        assert_eq!(brain.idle_ticks, 5);
        assert!(brain.target.is_none());
    }

    #[test]
    fn test_wander_point_is_on_platform() {
        let mut brain = NpcBrain {
            greed: 0.0,
            ..greedy()
        };
        let mut rng = Pcg32::seed_from_u64(11);
        let platform = Platform::default();

        brain.think(Vec3::ZERO, &[], &platform, &mut rng);
        match brain.target {
            Some(WanderTarget::Point(p)) => assert!(platform.contains_inset(p, ACTOR_RADIUS)),
            other => panic!("expected a wander point, got {:?}", other),
        }
    }
}
