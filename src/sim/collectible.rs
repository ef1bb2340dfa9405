//! Collectibles: common mushrooms and rare eyeballs

use std::ops::RangeInclusive;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::ActorId;
use crate::consts::COLLECT_DURATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Mushroom,
    Eyeball,
}

impl CollectibleKind {
    /// Points awarded on pickup
    pub fn points_range(&self) -> RangeInclusive<u32> {
        match self {
            CollectibleKind::Mushroom => 5..=12,
            CollectibleKind::Eyeball => 20..=40,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectibleKind::Mushroom => "mushroom",
            CollectibleKind::Eyeball => "eyeball",
        }
    }
}

/// Roll a randomized point total for a pickup
pub fn roll_points<R: Rng>(kind: CollectibleKind, rng: &mut R) -> u32 {
    rng.random_range(kind.points_range())
}

/// Whether a collectible can still be picked up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollectState {
    Available,
    /// Claimed; `progress` runs 0 → 1 over the collect animation
    Collecting { by: ActorId, progress: f32 },
}

/// An in-world pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub pos: Vec3,
    pub state: CollectState,
    /// Ticks since spawn
    pub age_ticks: u32,
    /// Ticks before despawning if nobody claims it
    pub lifetime_ticks: u32,
}

impl Collectible {
    pub fn new(id: u32, kind: CollectibleKind, pos: Vec3, lifetime_ticks: u32) -> Self {
        Self {
            id,
            kind,
            pos,
            state: CollectState::Available,
            age_ticks: 0,
            lifetime_ticks,
        }
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self.state, CollectState::Available)
    }

    /// Actor collecting this, if claimed
    pub fn collected_by(&self) -> Option<ActorId> {
        match self.state {
            CollectState::Collecting { by, .. } => Some(by),
            CollectState::Available => None,
        }
    }

    /// Advance age and collect animation; returns true once the animation finishes
    pub fn advance(&mut self, dt: f32) -> bool {
        self.age_ticks = self.age_ticks.saturating_add(1);
        match &mut self.state {
            CollectState::Collecting { progress, .. } => {
                *progress = (*progress + dt / COLLECT_DURATION).min(1.0);
                *progress >= 1.0
            }
            CollectState::Available => false,
        }
    }

    /// Unclaimed and past its lifetime
    pub fn expired(&self) -> bool {
        self.is_available() && self.age_ticks >= self.lifetime_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_points_within_range() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let m = roll_points(CollectibleKind::Mushroom, &mut rng);
            assert!(CollectibleKind::Mushroom.points_range().contains(&m));
            let e = roll_points(CollectibleKind::Eyeball, &mut rng);
            assert!(CollectibleKind::Eyeball.points_range().contains(&e));
        }
    }

    #[test]
    fn test_collect_animation_completes() {
        let mut c = Collectible::new(1, CollectibleKind::Mushroom, Vec3::ZERO, 1000);
        assert!(!c.advance(SIM_DT));

        c.state = CollectState::Collecting {
            by: ActorId::Npc(0),
            progress: 0.0,
        };
        assert_eq!(c.collected_by(), Some(ActorId::Npc(0)));

        let ticks = (COLLECT_DURATION / SIM_DT).ceil() as usize;
        let mut finished_at = None;
        for i in 0..ticks + 2 {
            if c.advance(SIM_DT) {
                finished_at = Some(i + 1);
                break;
            }
        }
        let finished_at = finished_at.expect("animation should finish");
        assert!(finished_at >= ticks - 1 && finished_at <= ticks + 1);
    }

    #[test]
    fn test_expiry_only_when_available() {
        let mut c = Collectible::new(1, CollectibleKind::Eyeball, Vec3::ZERO, 2);
        c.advance(SIM_DT);
        assert!(!c.expired());
        c.advance(SIM_DT);
        assert!(c.expired());

        c.state = CollectState::Collecting {
            by: ActorId::Player,
            progress: 0.1,
        };
        assert!(!c.expired());
    }
}
