//! Deterministic decision policy used to drive headless sessions.
//! This module exists so balance runs and fuzzing share one repeatable player.
//! It does not own any rules; it only picks among actions the session accepts.

use game_core::{Session, SessionAction};

#[derive(Clone, Debug)]
pub struct Autopilot {
    /// Fights to take on a layer before climbing.
    pub fights_per_layer: u32,
    /// Climb early once health falls to this percentage of max or below.
    pub retreat_health_percent: u32,
    fights_this_layer: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(2, 40)
    }
}

impl Autopilot {
    pub fn new(fights_per_layer: u32, retreat_health_percent: u32) -> Self {
        Self { fights_per_layer, retreat_health_percent, fights_this_layer: 0 }
    }

    /// The next action for `session`. Always valid while the session is running.
    pub fn next_action(&mut self, session: &Session) -> SessionAction {
        if !session.pending_candidates().is_empty() {
            return SessionAction::Absorb { index: self.preferred_candidate(session) };
        }
        if session.evolution_roll_pending() {
            return SessionAction::Evolve;
        }
        if !session.available_fusions().is_empty() {
            return SessionAction::Fuse { index: 0 };
        }

        let player = session.player();
        let health_percent = u64::from(player.health()) * 100 / u64::from(player.max_health());
        if self.fights_this_layer >= self.fights_per_layer
            || health_percent <= u64::from(self.retreat_health_percent)
        {
            self.fights_this_layer = 0;
            return SessionAction::Ascend;
        }
        self.fights_this_layer += 1;
        SessionAction::Explore
    }

    /// Prefers a candidate that unlocks a fusion with something already known.
    fn preferred_candidate(&self, session: &Session) -> usize {
        let known = &session.player().skills;
        session
            .pending_candidates()
            .iter()
            .position(|candidate| {
                known.iter().any(|skill| session.fusions().lookup(skill, candidate).is_some())
            })
            .unwrap_or(0)
    }
}
