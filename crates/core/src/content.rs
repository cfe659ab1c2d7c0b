//! Built-in skill and monster content plus the catalog that samples from it.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::random::RandomSource;

pub mod keys {
    pub const FIREBALL: &str = "Fireball";
    pub const THREAD_SHOT: &str = "Thread Shot";
    pub const ACID_GLOB: &str = "Acid Glob";
    pub const WATER_JET: &str = "Water Jet";
    pub const ELECTRIC_CURRENT: &str = "Electric Current";
    pub const STONE_SHARD: &str = "Stone Shard";
    pub const WIND_BURST: &str = "Wind Burst";
    pub const SHADOW_SNEAK: &str = "Shadow Sneak";

    pub const ACIDIC_WEB: &str = "Acidic Web";
    pub const CONDUCTIVE_SPRAY: &str = "Conductive Spray";
    pub const FLAMING_CYCLONE: &str = "Flaming Cyclone";
}

pub const MONSTER_NAMES: [&str; 6] = ["Goblin", "Slime", "Spider", "Bat", "Kobold", "Imp"];

/// An ability. The identity is the only field that takes part in equality.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Skill {
    pub identity: String,
    pub description: String,
    pub category: String,
}

impl Skill {
    pub fn new(
        identity: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self { identity: identity.into(), description: description.into(), category: category.into() }
    }

    pub fn same_identity(&self, other: &Skill) -> bool {
        self.identity == other.identity
    }
}

impl PartialEq for Skill {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Skill {}

pub type SkillRef = Arc<Skill>;

pub(crate) fn basic_skills() -> Vec<Skill> {
    vec![
        Skill::new(keys::FIREBALL, "Hurl a small orb of fire.", "Fire"),
        Skill::new(keys::THREAD_SHOT, "Shoot a sticky thread that briefly snares foes.", "Wind"),
        Skill::new(keys::ACID_GLOB, "Spit a glob of acid that corrodes armour.", "Venom"),
        Skill::new(keys::WATER_JET, "Send a focused jet of water at high pressure.", "Water"),
        Skill::new(keys::ELECTRIC_CURRENT, "Emit a surge of electricity.", "Lightning"),
        Skill::new(keys::STONE_SHARD, "Launch a sharp shard of rock.", "Earth"),
        Skill::new(keys::WIND_BURST, "Release a concussive blast of air.", "Wind"),
        Skill::new(keys::SHADOW_SNEAK, "Momentarily fade into shadows, avoiding harm.", "Dark"),
    ]
}

/// Immutable registry of the basic skills and monster names enemies are built from.
#[derive(Clone, Debug)]
pub struct SkillCatalog {
    skills: Vec<SkillRef>,
    monster_names: Vec<String>,
}

impl SkillCatalog {
    pub fn new(skills: Vec<Skill>, monster_names: Vec<String>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for skill in &skills {
            if !seen.insert(skill.identity.as_str()) {
                return Err(EngineError::DuplicateSkill { identity: skill.identity.clone() });
            }
        }
        if monster_names.is_empty() {
            return Err(EngineError::EmptyNamePool);
        }
        Ok(Self { skills: skills.into_iter().map(Arc::new).collect(), monster_names })
    }

    pub fn builtin() -> Self {
        Self {
            skills: basic_skills().into_iter().map(Arc::new).collect(),
            monster_names: MONSTER_NAMES.iter().map(|name| (*name).to_owned()).collect(),
        }
    }

    pub fn list_basic_skills(&self) -> &[SkillRef] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn skill(&self, identity: &str) -> Option<&SkillRef> {
        self.skills.iter().find(|skill| skill.identity == identity)
    }

    pub fn monster_names(&self) -> &[String] {
        &self.monster_names
    }

    /// Draws `count` distinct skills without replacement.
    ///
    /// Uses a partial Fisher-Yates shuffle: one `choose_index` draw per sampled
    /// skill, over a shrinking range.
    pub fn sample_skills<R: RandomSource + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<SkillRef>> {
        if count > self.skills.len() {
            return Err(EngineError::InsufficientCatalog {
                requested: count,
                available: self.skills.len(),
            });
        }
        let mut order: Vec<usize> = (0..self.skills.len()).collect();
        for slot in 0..count {
            let pick = slot + rng.choose_index(order.len() - slot);
            order.swap(slot, pick);
        }
        Ok(order[..count].iter().map(|&index| Arc::clone(&self.skills[index])).collect())
    }

    pub fn random_enemy_name<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &str {
        &self.monster_names[rng.choose_index(self.monster_names.len())]
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, seeded};

    #[test]
    fn builtin_catalog_lists_eight_unique_skills() {
        let catalog = SkillCatalog::builtin();
        let skills = catalog.list_basic_skills();
        assert_eq!(skills.len(), 8);
        let identities: BTreeSet<&str> = skills.iter().map(|s| s.identity.as_str()).collect();
        assert_eq!(identities.len(), 8);
        assert_eq!(skills[0].identity, keys::FIREBALL);
        assert_eq!(skills[7].identity, keys::SHADOW_SNEAK);
    }

    #[test]
    fn sampling_never_repeats_an_identity() {
        let catalog = SkillCatalog::builtin();
        let mut rng = seeded(4242);
        for count in 0..=catalog.len() {
            let sample = catalog.sample_skills(count, &mut rng).expect("count fits catalog");
            let unique: BTreeSet<&str> = sample.iter().map(|s| s.identity.as_str()).collect();
            assert_eq!(sample.len(), count);
            assert_eq!(unique.len(), count);
        }
    }

    #[test]
    fn sampling_more_than_catalog_fails() {
        let catalog = SkillCatalog::builtin();
        let err = catalog.sample_skills(9, &mut seeded(1)).unwrap_err();
        assert_eq!(err, EngineError::InsufficientCatalog { requested: 9, available: 8 });
    }

    #[test]
    fn sampling_consumes_one_draw_per_skill() {
        let catalog = SkillCatalog::builtin();
        let mut rng = ScriptedRandom::new([2, 0, 5], 0);
        let sample = catalog.sample_skills(3, &mut rng).expect("three fit");
        assert_eq!(rng.draws(), 3);
        let names: Vec<&str> = sample.iter().map(|s| s.identity.as_str()).collect();
        // slot 0 takes index 2, slot 1 keeps index 1, slot 2 takes 2 + 5 = 7.
        assert_eq!(names, [keys::ACID_GLOB, keys::THREAD_SHOT, keys::SHADOW_SNEAK]);
    }

    #[test]
    fn skills_compare_by_identity_only() {
        let left = Skill::new("Bite", "A bite.", "Beast");
        let right = Skill::new("Bite", "Another description.", "Venom");
        assert_eq!(left, right);
        assert_ne!(left, Skill::new("Claw", "A bite.", "Beast"));
    }

    #[test]
    fn custom_catalog_rejects_duplicates_and_empty_names() {
        let dup = vec![Skill::new("Bite", "", "Beast"), Skill::new("Bite", "", "Beast")];
        assert_eq!(
            SkillCatalog::new(dup, vec!["Rat".into()]).unwrap_err(),
            EngineError::DuplicateSkill { identity: "Bite".into() }
        );
        assert_eq!(
            SkillCatalog::new(vec![Skill::new("Bite", "", "Beast")], Vec::new()).unwrap_err(),
            EngineError::EmptyNamePool
        );
    }

    #[test]
    fn enemy_names_come_from_the_pool() {
        let catalog = SkillCatalog::builtin();
        let mut rng = ScriptedRandom::new([3], 0);
        assert_eq!(catalog.random_enemy_name(&mut rng), "Bat");
        assert_eq!(catalog.random_enemy_name(&mut rng), "Goblin");
    }
}
