use serde::{Deserialize, Serialize};

use crate::content::SkillCatalog;
use crate::error::{EngineError, Result};

/// Tunable session constants. Every field falls back to its default when omitted
/// from a rules file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    pub starting_max_health: u32,
    pub starting_skill_count: usize,
    pub starting_depth: i32,
    /// Shallowest playable layer; ascending from here reaches the surface.
    pub final_depth: i32,
    pub ascend_heal: u32,
    pub evolution_chance: f64,
    pub evolution_health_bonus: u32,
    pub enemy_base_health: u32,
    pub enemy_health_per_layer: u32,
    pub enemy_scaling_offset: i32,
    pub min_enemy_skills: u32,
    pub max_enemy_skills: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_max_health: 15,
            starting_skill_count: 2,
            starting_depth: -10,
            final_depth: -1,
            ascend_heal: 3,
            evolution_chance: 0.2,
            evolution_health_bonus: 5,
            enemy_base_health: 5,
            enemy_health_per_layer: 2,
            enemy_scaling_offset: 10,
            min_enemy_skills: 1,
            max_enemy_skills: 2,
        }
    }
}

impl Rules {
    /// Problems that would make a session misbehave, in field order.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.starting_max_health == 0 {
            problems.push("starting_max_health must be positive".to_owned());
        }
        if self.starting_skill_count == 0 {
            problems.push("starting_skill_count must be at least 1".to_owned());
        }
        if self.starting_depth > self.final_depth {
            problems.push("starting_depth must not be above final_depth".to_owned());
        }
        if !(0.0..=1.0).contains(&self.evolution_chance) {
            problems.push("evolution_chance must be within 0.0..=1.0".to_owned());
        }
        if self.enemy_base_health == 0 {
            problems.push("enemy_base_health must be positive".to_owned());
        }
        if self.min_enemy_skills == 0 || self.min_enemy_skills > self.max_enemy_skills {
            problems.push("enemy skill range must satisfy 1 <= min <= max".to_owned());
        }
        problems
    }

    /// [`Rules::validate`] plus the limits `catalog` imposes on skill counts.
    pub fn validate_for(&self, catalog: &SkillCatalog) -> Vec<String> {
        let mut problems = self.validate();
        if self.starting_skill_count > catalog.len() {
            problems.push(format!(
                "starting_skill_count {} exceeds the {} catalog skills",
                self.starting_skill_count,
                catalog.len()
            ));
        }
        if self.max_enemy_skills as usize > catalog.len() {
            problems.push(format!(
                "max_enemy_skills {} exceeds the {} catalog skills",
                self.max_enemy_skills,
                catalog.len()
            ));
        }
        problems
    }

    pub fn ensure_valid_for(&self, catalog: &SkillCatalog) -> Result<()> {
        let problems = self.validate_for(catalog);
        if problems.is_empty() { Ok(()) } else { Err(EngineError::InvalidRules { problems }) }
    }
}
