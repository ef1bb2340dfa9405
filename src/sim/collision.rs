//! Distance checks between actors and collectibles
//!
//! Everything here works on the ground plane; height never matters.

use glam::Vec3;

use super::actor::Actor;
use super::arena::Platform;
use super::collectible::Collectible;
use crate::consts::*;
use crate::{flatten, ground_distance};

/// Two actors are close enough to count as a hit
#[inline]
pub fn actors_overlap(a: &Actor, b: &Actor) -> bool {
    ground_distance(a.pos, b.pos) < HIT_DISTANCE
}

/// Knock two colliding actors apart
///
/// Both are pushed along the line between them until they are
/// `HIT_DISTANCE + KNOCKBACK` apart and clamped back onto the platform. When
/// the platform edge swallows part of one actor's push, the shortfall is
/// handed to the other one so the pair still ends up clear of each other.
/// Actors standing on the exact same spot split along X.
pub fn separate(a: &mut Actor, b: &mut Actor, platform: &Platform) {
    let delta = flatten(b.pos - a.pos);
    let dist = delta.length();
    let axis = if dist > 1e-4 { delta / dist } else { Vec3::X };
    let target = HIT_DISTANCE + KNOCKBACK;

    let push = ((target - dist) * 0.5).max(0.0);
    a.pos = platform.clamp(a.pos - axis * push, ACTOR_RADIUS);
    b.pos = platform.clamp(b.pos + axis * push, ACTOR_RADIUS);

    // Gap measured along the push axis never exceeds the real distance
    let short = target - flatten(b.pos - a.pos).dot(axis);
    if short > 0.0 {
        a.pos = platform.clamp(a.pos - axis * short, ACTOR_RADIUS);
    }
    let short = target - flatten(b.pos - a.pos).dot(axis);
    if short > 0.0 {
        b.pos = platform.clamp(b.pos + axis * short, ACTOR_RADIUS);
    }
}

/// Index of the actor that gets to pick up `collectible`, if any
///
/// The nearest eligible actor within `PICKUP_RADIUS` wins. Equal distances go
/// to whoever comes first in `actors` (the player is always first).
pub fn find_claimant(collectible: &Collectible, actors: &[Actor]) -> Option<usize> {
    if !collectible.is_available() {
        return None;
    }
    let mut best: Option<(usize, f32)> = None;
    for (i, actor) in actors.iter().enumerate() {
        if !actor.can_collect() {
            continue;
        }
        let dist = ground_distance(actor.pos, collectible.pos);
        if dist >= PICKUP_RADIUS {
            continue;
        }
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}

/// Nearest collectible nobody has claimed yet
pub fn nearest_available(pos: Vec3, collectibles: &[Collectible]) -> Option<&Collectible> {
    collectibles
        .iter()
        .filter(|c| c.is_available())
        .min_by(|a, b| {
            ground_distance(pos, a.pos)
                .partial_cmp(&ground_distance(pos, b.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
