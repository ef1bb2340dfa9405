//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (actors by id, collectibles by id)
//! - No rendering or platform dependencies

pub mod actor;
pub mod arena;
pub mod clock;
pub mod collectible;
pub mod collision;
pub mod npc;
pub mod session;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorId, HitState};
pub use arena::Platform;
pub use clock::FrameClock;
pub use collectible::{CollectState, Collectible, CollectibleKind};
pub use collision::{actors_overlap, find_claimant, nearest_available};
pub use npc::{NpcBrain, WanderTarget};
pub use session::{MatchResult, Session};
pub use state::{GameEvent, GamePhase, GameState, Outcome};
pub use tick::{TickInput, check_win, spawn_collectible, step_frame, tick};
