//! Combatant state shared by the player and enemies.
//! This module exists to hold health bookkeeping, known skills and the attack formula.
//! It does not decide when absorption or evolution happen; the session does.

use std::sync::Arc;

use crate::content::{SkillCatalog, SkillRef};
use crate::error::Result;
use crate::random::RandomSource;
use crate::rules::Rules;

pub const ATTACK_ROLL_MIN: u32 = 1;
pub const ATTACK_ROLL_MAX: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vitals {
    health: u32,
    max_health: u32,
}

impl Vitals {
    /// Full health. A zero maximum is raised to one.
    pub fn new(max_health: u32) -> Self {
        let max_health = max_health.max(1);
        Self { health: max_health, max_health }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Returns how much health was actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    pub fn raise_max_and_restore(&mut self, bonus: u32) {
        self.max_health = self.max_health.saturating_add(bonus);
        self.health = self.max_health;
    }
}

/// Known skills, unique by identity, in the order they were learned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillSet {
    skills: Vec<SkillRef>,
}

impl SkillSet {
    pub fn from_skills(skills: impl IntoIterator<Item = SkillRef>) -> Self {
        let mut set = Self::default();
        for skill in skills {
            set.absorb(skill);
        }
        set
    }

    /// Inserts `skill` unless one with the same identity is already known.
    pub fn absorb(&mut self, skill: SkillRef) -> bool {
        if self.contains(&skill.identity) {
            return false;
        }
        self.skills.push(skill);
        true
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.position(identity).is_some()
    }

    pub fn position(&self, identity: &str) -> Option<usize> {
        self.skills.iter().position(|skill| skill.identity == identity)
    }

    pub fn remove(&mut self, identity: &str) -> Option<SkillRef> {
        let index = self.position(identity)?;
        Some(self.skills.remove(index))
    }

    pub fn as_slice(&self) -> &[SkillRef] {
        &self.skills
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillRef> {
        self.skills.iter()
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|skill| skill.identity.as_str())
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// The capability set combat needs from either side of a fight.
pub trait Combatant {
    fn name(&self) -> &str;
    fn vitals(&self) -> &Vitals;
    fn vitals_mut(&mut self) -> &mut Vitals;
    fn skills(&self) -> &SkillSet;

    fn is_alive(&self) -> bool {
        self.vitals().is_alive()
    }

    fn take_damage(&mut self, amount: u32) {
        self.vitals_mut().take_damage(amount);
    }

    /// `known skills * roll(1..=3)`, one draw per call. Skill categories do not matter.
    fn attack_power<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u32 {
        let roll = rng.random_int(ATTACK_ROLL_MIN, ATTACK_ROLL_MAX);
        self.skills().len() as u32 * roll
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub vitals: Vitals,
    pub skills: SkillSet,
    pub depth_layer: i32,
}

impl Player {
    pub const NAME: &'static str = "You";

    /// A fresh player at the starting depth with randomly sampled starting skills.
    pub fn spawn<R: RandomSource + ?Sized>(
        catalog: &SkillCatalog,
        rules: &Rules,
        rng: &mut R,
    ) -> Result<Self> {
        let skills = catalog.sample_skills(rules.starting_skill_count, rng)?;
        Ok(Self::with_skills(rules.starting_max_health, rules.starting_depth, skills))
    }

    pub fn with_skills(
        max_health: u32,
        depth_layer: i32,
        skills: impl IntoIterator<Item = SkillRef>,
    ) -> Self {
        Self {
            name: Self::NAME.to_owned(),
            vitals: Vitals::new(max_health),
            skills: SkillSet::from_skills(skills),
            depth_layer,
        }
    }

    pub fn absorb_skill(&mut self, skill: SkillRef) -> bool {
        self.skills.absorb(skill)
    }

    pub fn evolve(&mut self, health_bonus: u32) {
        self.vitals.raise_max_and_restore(health_bonus);
    }

    pub fn health(&self) -> u32 {
        self.vitals.health()
    }

    pub fn max_health(&self) -> u32 {
        self.vitals.max_health()
    }
}

impl Combatant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn skills(&self) -> &SkillSet {
        &self.skills
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub name: String,
    pub vitals: Vitals,
    pub skills: SkillSet,
}

/// `base + max(0, -depth - offset) * per_layer`. Flat across the playable depths
/// -10..=-1 with the default rules; it grows below layer -10.
pub fn enemy_max_health(depth_layer: i32, rules: &Rules) -> u32 {
    let below_threshold = (-i64::from(depth_layer) - i64::from(rules.enemy_scaling_offset)).max(0);
    let bonus = below_threshold.saturating_mul(i64::from(rules.enemy_health_per_layer));
    u32::try_from(i64::from(rules.enemy_base_health).saturating_add(bonus)).unwrap_or(u32::MAX)
}

impl Enemy {
    /// Rolls a fresh enemy. Draw order: name, skill count, skill sample.
    pub fn spawn<R: RandomSource + ?Sized>(
        depth_layer: i32,
        catalog: &SkillCatalog,
        rules: &Rules,
        rng: &mut R,
    ) -> Result<Self> {
        let name = catalog.random_enemy_name(rng).to_owned();
        let count = rng.random_int(rules.min_enemy_skills, rules.max_enemy_skills);
        let skills = catalog.sample_skills(count as usize, rng)?;
        Ok(Self {
            name,
            vitals: Vitals::new(enemy_max_health(depth_layer, rules)),
            skills: SkillSet::from_skills(skills),
        })
    }

    pub fn health(&self) -> u32 {
        self.vitals.health()
    }

    pub fn max_health(&self) -> u32 {
        self.vitals.max_health()
    }

    pub fn skill_refs(&self) -> Vec<SkillRef> {
        self.skills.iter().map(Arc::clone).collect()
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn skills(&self) -> &SkillSet {
        &self.skills
    }
}
