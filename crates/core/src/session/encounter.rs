//! Exploration encounters and their post-battle rewards.
//! This module exists to sequence spawn, fight, absorb offer and evolution roll.
//! It does not own the battle loop itself or enemy generation details.

use std::sync::Arc;

use tracing::{debug, info};

use super::*;
use crate::combat::{self, BattleOutcome};
use crate::creature::Enemy;

impl Session {
    /// Spawns an enemy at the current depth and fights it.
    ///
    /// A victory opens an absorb offer and one evolution roll; any offer left
    /// over from an earlier victory is discarded first. A defeat ends the run.
    pub fn explore<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<EncounterResult> {
        self.ensure_running()?;

        let depth = self.player.depth_layer;
        let mut enemy = Enemy::spawn(depth, &self.catalog, &self.rules, rng)?;
        debug!(enemy = %enemy.name, depth, health = enemy.max_health(), "enemy spawned");
        let enemy_skills = enemy.skills.identities().map(str::to_owned).collect();
        let enemy_max_health = enemy.max_health();
        let battle = combat::resolve(&mut self.player, &mut enemy, rng)?;

        self.clear_pending();
        self.encounters += 1;
        self.log.push(LogEvent::EnemySpawned {
            name: enemy.name.clone(),
            depth_layer: depth,
            max_health: enemy_max_health,
            skills: enemy_skills,
        });
        self.log.push(LogEvent::BattleResolved {
            outcome: battle.outcome,
            turns: battle.turn_count(),
        });

        match battle.outcome {
            BattleOutcome::PlayerVictory => {
                let candidates = self.absorb_candidates(&enemy);
                self.pending_absorb = Some(candidates.clone());
                self.evolution_roll_pending = true;
                debug!(
                    enemy = %enemy.name,
                    candidates = ?Self::skill_names(&candidates),
                    "enemy defeated"
                );
                Ok(EncounterResult::Victory {
                    enemy,
                    battle,
                    candidates,
                    evolution_roll_available: true,
                })
            }
            BattleOutcome::PlayerDefeat => {
                self.outcome = Some(RunOutcome::Defeat);
                info!(enemy = %enemy.name, depth, encounters = self.encounters, "player defeated");
                Ok(EncounterResult::Defeat { enemy, battle })
            }
        }
    }

    fn absorb_candidates(&self, enemy: &Enemy) -> Vec<SkillRef> {
        let unknown: Vec<SkillRef> = enemy
            .skills
            .iter()
            .filter(|skill| !self.player.skills.contains(&skill.identity))
            .map(Arc::clone)
            .collect();
        if unknown.is_empty() { enemy.skill_refs() } else { unknown }
    }

    /// Learns candidate `index` of the pending offer and closes the offer.
    pub fn absorb(&mut self, index: usize) -> Result<AbsorbResult> {
        self.ensure_running()?;

        let available = self.pending_candidates().len();
        let Some(skill) = self.pending_candidates().get(index).map(Arc::clone) else {
            return Err(EngineError::SelectionOutOfRange { index, available });
        };

        self.pending_absorb = None;
        let newly_learned = self.player.absorb_skill(Arc::clone(&skill));
        self.log.push(LogEvent::SkillAbsorbed { identity: skill.identity.clone(), newly_learned });
        debug!(skill = %skill.identity, newly_learned, "skill absorbed");
        Ok(AbsorbResult { skill, newly_learned })
    }

    /// Spends the evolution roll earned by the last victory, if there is one.
    ///
    /// Consumes exactly one draw when a roll is pending and none otherwise.
    pub fn maybe_evolve<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<Evolution> {
        if !self.evolution_roll_pending || self.is_finished() {
            return None;
        }
        self.evolution_roll_pending = false;

        let evolved = rng.chance(self.rules.evolution_chance);
        if evolved {
            self.player.evolve(self.rules.evolution_health_bonus);
        }
        let max_health = self.player.max_health();
        self.log.push(LogEvent::EvolutionRolled { evolved, max_health });
        debug!(evolved, max_health, "evolution rolled");
        evolved.then_some(Evolution { max_health })
    }
}
