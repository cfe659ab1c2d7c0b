//! Commutative pairwise fusion rules.
//! This module exists to keep the unordered-pair keying in one place.
//! It does not own the removal and insertion of skills on a creature; the session does that.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::content::{Skill, SkillRef, keys};
use crate::creature::SkillSet;
use crate::error::{EngineError, Result};

/// Order-independent key: the two identities stored in sorted order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PairKey {
    low: String,
    high: String,
}

impl PairKey {
    fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self { low: a.to_owned(), high: b.to_owned() }
        } else {
            Self { low: b.to_owned(), high: a.to_owned() }
        }
    }
}

/// One fusion the player could perform right now, by position in its skill list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FusionCandidate {
    pub first: usize,
    pub second: usize,
    pub first_skill: SkillRef,
    pub second_skill: SkillRef,
    pub result: SkillRef,
}

#[derive(Clone, Debug, Default)]
pub struct FusionTable {
    rules: BTreeMap<PairKey, SkillRef>,
}

impl FusionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The curated default rules.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        let defaults = [
            (
                keys::THREAD_SHOT,
                keys::ACID_GLOB,
                Skill::new(
                    keys::ACIDIC_WEB,
                    "Fires a sticky web that deals damage over time and slows victims.",
                    "Venom",
                ),
            ),
            (
                keys::WATER_JET,
                keys::ELECTRIC_CURRENT,
                Skill::new(
                    keys::CONDUCTIVE_SPRAY,
                    "A stream of water that electrocutes multiple foes.",
                    "Water/Lightning",
                ),
            ),
            (
                keys::FIREBALL,
                keys::WIND_BURST,
                Skill::new(
                    keys::FLAMING_CYCLONE,
                    "A fiery vortex that pulls in enemies while burning them.",
                    "Fire/Wind",
                ),
            ),
        ];
        for (a, b, result) in defaults {
            table.rules.insert(PairKey::new(a, b), Arc::new(result));
        }
        table
    }

    /// Registers `a + b => result`, replacing any existing rule for the pair.
    ///
    /// Returns the replaced result so callers can see that an overwrite happened.
    pub fn register(
        &mut self,
        a: &Skill,
        b: &Skill,
        result: impl Into<SkillRef>,
    ) -> Result<Option<SkillRef>> {
        self.register_identities(&a.identity, &b.identity, result)
    }

    pub fn register_identities(
        &mut self,
        a: &str,
        b: &str,
        result: impl Into<SkillRef>,
    ) -> Result<Option<SkillRef>> {
        if a == b {
            return Err(EngineError::InvalidFusion { identity: a.to_owned() });
        }
        Ok(self.rules.insert(PairKey::new(a, b), result.into()))
    }

    pub fn lookup(&self, a: &Skill, b: &Skill) -> Option<&SkillRef> {
        self.lookup_identities(&a.identity, &b.identity)
    }

    pub fn lookup_identities(&self, a: &str, b: &str) -> Option<&SkillRef> {
        if a == b {
            return None;
        }
        self.rules.get(&PairKey::new(a, b))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every fusable pair among `known`, ordered by ascending `(first, second)`.
    pub fn find_all_fusions(&self, known: &SkillSet) -> Vec<FusionCandidate> {
        let skills = known.as_slice();
        let mut candidates = Vec::new();
        for (first, first_skill) in skills.iter().enumerate() {
            for (second, second_skill) in skills.iter().enumerate().skip(first + 1) {
                if let Some(result) = self.lookup(first_skill, second_skill) {
                    candidates.push(FusionCandidate {
                        first,
                        second,
                        first_skill: Arc::clone(first_skill),
                        second_skill: Arc::clone(second_skill),
                        result: Arc::clone(result),
                    });
                }
            }
        }
        candidates
    }
}
