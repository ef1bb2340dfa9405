//! A running match as seen by a front end
//!
//! Bundles the state with its frame clock and pending input, and reports each
//! finished match exactly once so callers can record it.

use glam::Vec3;

use super::actor::ActorId;
use super::clock::FrameClock;
use super::state::{GameState, Outcome};
use super::tick::{TickInput, restart, step_frame};

/// The player's side of a finished match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub score: u32,
    pub won: bool,
    pub secs: f32,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    clock: FrameClock,
    input: TickInput,
    /// Seed of the last match handed out by `take_result`
    reported_seed: Option<u64>,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            clock: FrameClock::new(),
            input: TickInput::default(),
            reported_seed: None,
        }
    }

    /// Advance by one rendered frame; returns the number of ticks run
    pub fn frame(&mut self, dt_secs: f32) -> u32 {
        step_frame(&mut self.state, &mut self.clock, &mut self.input, dt_secs)
    }

    /// Movement from keyboard/touch, on the ground plane
    pub fn set_move(&mut self, x: f32, z: f32) {
        self.input.move_dir = Some(Vec3::new(x, 0.0, z));
    }

    /// Queue a pause toggle for the next tick
    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
    }

    /// Start a fresh match right away
    ///
    /// Applied immediately rather than on the next tick, so a frame too short
    /// to tick never sees the old finished match again.
    pub fn restart(&mut self) {
        restart(&mut self.state);
        self.clock.reset();
        self.input.pause = false;
        self.input.restart = false;
    }

    /// Interpolation factor between the last two ticks
    pub fn alpha(&self) -> f32 {
        self.clock.alpha()
    }

    /// The player's result, once per finished match
    pub fn take_result(&mut self) -> Option<MatchResult> {
        if !self.state.is_over() || self.reported_seed == Some(self.state.seed) {
            return None;
        }
        self.reported_seed = Some(self.state.seed);
        let player = self.state.actor(ActorId::Player)?;
        Some(MatchResult {
            score: player.score,
            won: self.state.outcome == Some(Outcome::Winner(ActorId::Player)),
            secs: self.state.elapsed_secs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::{Difficulty, Rules};
    use crate::sim::collectible::{Collectible, CollectibleKind};
    use crate::sim::state::GamePhase;

    /// A session one pickup away from the player winning
    fn about_to_win() -> Session {
        let rules = Rules {
            spawn_interval_secs: 10_000.0,
            match_secs: 0,
            ..Default::default()
        };
        let mut state = GameState::new(4, rules, Difficulty::Normal);
        for actor in &mut state.actors {
            if let Some(brain) = actor.brain.as_mut() {
                brain.idle_ticks = u32::MAX;
            }
        }
        state.actors[0].score = state.rules.win_score - 1;
        let id = state.next_entity_id();
        state
            .collectibles
            .push(Collectible::new(id, CollectibleKind::Mushroom, Vec3::ZERO, 10_000));
        Session::new(state)
    }

    #[test]
    fn test_result_reported_once() {
        let mut session = about_to_win();
        assert_eq!(session.take_result(), None);

        session.frame(SIM_DT);
        assert_eq!(session.state.phase, GamePhase::GameOver);

        let result = session.take_result().expect("finished match");
        assert!(result.won);
        assert!(result.score >= session.state.rules.win_score);

        session.frame(SIM_DT);
        assert_eq!(session.take_result(), None);
    }

    #[test]
    fn test_restart_with_short_frame_does_not_report_again() {
        let mut session = about_to_win();
        session.frame(SIM_DT);
        assert!(session.take_result().is_some());

        // A 120 Hz frame runs no tick; the old match must not come back
        session.restart();
        assert_eq!(session.frame(SIM_DT * 0.5), 0);
        assert_eq!(session.state.phase, GamePhase::Playing);
        assert_eq!(session.state.time_ticks, 0);
        assert_eq!(session.take_result(), None);
    }

    #[test]
    fn test_next_match_is_reported_after_restart() {
        let mut session = about_to_win();
        session.frame(SIM_DT);
        assert!(session.take_result().is_some());

        session.restart();
        let win = session.state.rules.win_score;
        session.state.actors[0].score = win;
        session.frame(SIM_DT);
        assert!(session.state.is_over());
        assert!(session.take_result().is_some());
    }

    #[test]
    fn test_pending_pause_dropped_by_restart() {
        let mut session = about_to_win();
        session.toggle_pause();
        session.restart();
        session.frame(SIM_DT);
        assert_eq!(session.state.phase, GamePhase::Playing);
    }
}
