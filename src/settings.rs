//! Game settings and match rules
//!
//! Persisted separately from high scores through platform storage.

use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, ArenaResult};
use crate::platform::storage;

/// NPC difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Multiplier on NPC base speed
    pub fn npc_speed_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Normal => 0.9,
            Difficulty::Hard => 1.1,
        }
    }

    /// Probability an NPC goes after a collectible instead of wandering
    pub fn npc_greed(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.35,
            Difficulty::Normal => 0.6,
            Difficulty::Hard => 0.85,
        }
    }

    /// Idle pause (ticks) after an NPC reaches a wander point
    pub fn npc_idle_range(&self) -> (u32, u32) {
        match self {
            Difficulty::Easy => (60, 180),
            Difficulty::Normal => (30, 120),
            Difficulty::Hard => (10, 45),
        }
    }
}

/// Match rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// First actor to reach this score wins
    pub win_score: u32,
    /// Match length in seconds (0 = no time limit)
    pub match_secs: u32,
    /// Seconds between spawn attempts
    pub spawn_interval_secs: f32,
    /// Cap on collectibles on the platform at once
    pub max_collectibles: usize,
    /// Chance (0-1) a spawn is an eyeball instead of a mushroom
    pub eyeball_chance: f32,
    /// Seconds an uncollected mushroom stays before despawning
    pub mushroom_lifetime_secs: f32,
    /// Seconds an uncollected eyeball stays before despawning
    pub eyeball_lifetime_secs: f32,
    /// Number of autonomous opponents
    pub npc_count: u8,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            win_score: 100,
            match_secs: 180,
            spawn_interval_secs: 1.5,
            max_collectibles: 12,
            eyeball_chance: 0.08,
            mushroom_lifetime_secs: 15.0,
            eyeball_lifetime_secs: 8.0,
            npc_count: 2,
        }
    }
}

impl Rules {
    /// Reject rules that would make a match unplayable
    pub fn validate(&self) -> ArenaResult<()> {
        if self.win_score == 0 {
            return Err(ArenaError::InvalidRules("win_score must be positive".into()));
        }
        if !(self.spawn_interval_secs > 0.0) {
            return Err(ArenaError::InvalidRules(format!(
                "spawn_interval_secs must be positive, got {}",
                self.spawn_interval_secs
            )));
        }
        if self.max_collectibles == 0 {
            return Err(ArenaError::InvalidRules(
                "max_collectibles must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.eyeball_chance) {
            return Err(ArenaError::InvalidRules(format!(
                "eyeball_chance must be within 0..=1, got {}",
                self.eyeball_chance
            )));
        }
        if !(self.mushroom_lifetime_secs > 0.0 && self.eyeball_lifetime_secs > 0.0) {
            return Err(ArenaError::InvalidRules(
                "collectible lifetimes must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Spawn interval in simulation ticks (at least 1)
    pub fn spawn_interval_ticks(&self) -> u32 {
        secs_to_ticks(self.spawn_interval_secs).max(1)
    }

    /// Match length in ticks, `None` when unlimited
    pub fn match_ticks(&self) -> Option<u64> {
        (self.match_secs > 0)
            .then(|| self.match_secs as u64 * crate::consts::TICKS_PER_SEC as u64)
    }
}

/// Convert seconds to whole simulation ticks
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs * crate::consts::TICKS_PER_SEC as f32).round().max(0.0) as u32
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// NPC difficulty
    pub difficulty: Difficulty,
    /// Match rules
    pub rules: Rules,

    // === Presentation hints (read by the front end) ===
    /// Flash/shake on actor hits
    pub hit_effects: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Reduced motion (minimize shake, flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            rules: Rules::default(),
            hit_effects: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "hex_arena_settings";

    /// Create settings for a difficulty level
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Effective hit effects (respects reduced_motion)
    pub fn effective_hit_effects(&self) -> bool {
        self.hit_effects && !self.reduced_motion
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> ArenaResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.rules.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> ArenaResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load settings from storage, falling back to defaults
    pub fn load() -> Self {
        match storage::load_json::<Settings>(Self::STORAGE_KEY) {
            Ok(Some(settings)) => match settings.rules.validate() {
                Ok(()) => {
                    log::info!("Loaded settings ({})", settings.difficulty.as_str());
                    settings
                }
                Err(e) => {
                    log::warn!("Stored settings rejected: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to storage
    pub fn save(&self) {
        match storage::save_json(Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}
