//! Browser bindings
//!
//! The JS front end owns rendering and input. Each animation frame it calls
//! `frame(dt)`, then reads `snapshot_json()` and `drain_events_json()`.

use wasm_bindgen::prelude::*;

use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{GameState, MatchResult, Session};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed (hot reload)
        return;
    }
    log::info!("Hex Arena core loaded");
}

/// One running match, owned by the page
#[wasm_bindgen]
pub struct ArenaHandle {
    session: Session,
    settings: Settings,
}

#[wasm_bindgen]
impl ArenaHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> ArenaHandle {
        let settings = Settings::load();
        let state = GameState::new(seed, settings.rules.clone(), settings.difficulty);
        log::info!(
            "Game initialized with seed: {} ({})",
            seed,
            settings.difficulty.as_str()
        );
        ArenaHandle {
            session: Session::new(state),
            settings,
        }
    }

    /// Advance by one rendered frame; returns the number of ticks run
    pub fn frame(&mut self, dt_secs: f32) -> u32 {
        let ticks = self.session.frame(dt_secs);
        if let Some(result) = self.session.take_result() {
            record_result(&result);
        }
        ticks
    }

    /// Movement from keyboard/touch, on the ground plane
    pub fn set_move(&mut self, x: f32, z: f32) {
        self.session.set_move(x, z);
    }

    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.session.set_autopilot(on);
        log::info!("Autopilot: {}", on);
    }

    /// Interpolation factor between the last two ticks
    pub fn alpha(&self) -> f32 {
        self.session.alpha()
    }

    pub fn hit_effects(&self) -> bool {
        self.settings.effective_hit_effects()
    }

    /// Full state as JSON (`{}` if serialization fails)
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.state).unwrap_or_else(|e| {
            log::warn!("Snapshot failed: {}", e);
            "{}".to_string()
        })
    }

    /// Pending events as a JSON array
    pub fn drain_events_json(&mut self) -> String {
        let events = self.session.state.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Event export failed: {}", e);
            "[]".to_string()
        })
    }

    /// Current high score table as JSON
    pub fn highscores_json(&self) -> String {
        serde_json::to_string(&HighScores::load()).unwrap_or_else(|e| {
            log::warn!("High score export failed: {}", e);
            "{}".to_string()
        })
    }
}

fn record_result(result: &MatchResult) {
    let mut scores = HighScores::load();
    if let Some(rank) = scores.add_score(result.score, result.won, result.secs, super::now_ms()) {
        log::info!("New high score #{}: {}", rank, result.score);
        scores.save();
    }
}
