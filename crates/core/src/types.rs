use serde::{Deserialize, Serialize};

use crate::combat::{BattleOutcome, BattleReport};
use crate::content::SkillRef;
use crate::creature::Enemy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The player climbed out past the shallowest layer.
    Victory,
    Defeat,
}

/// One player decision, in the form the journal records and replay feeds back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAction {
    Explore,
    Absorb { index: usize },
    Evolve,
    Fuse { index: usize },
    Ascend,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    EnemySpawned { name: String, depth_layer: i32, max_health: u32, skills: Vec<String> },
    BattleResolved { outcome: BattleOutcome, turns: u32 },
    SkillAbsorbed { identity: String, newly_learned: bool },
    EvolutionRolled { evolved: bool, max_health: u32 },
    SkillsFused { consumed: [String; 2], result: String },
    Ascended { depth_layer: i32, healed: u32 },
    SurfaceReached,
}

#[derive(Clone, Debug)]
pub enum EncounterResult {
    Victory {
        enemy: Enemy,
        battle: BattleReport,
        /// Enemy skills the player lacks, or every enemy skill if it lacks none.
        candidates: Vec<SkillRef>,
        evolution_roll_available: bool,
    },
    /// The run is over.
    Defeat { enemy: Enemy, battle: BattleReport },
}

impl EncounterResult {
    pub fn battle(&self) -> &BattleReport {
        match self {
            Self::Victory { battle, .. } | Self::Defeat { battle, .. } => battle,
        }
    }

    pub fn enemy(&self) -> &Enemy {
        match self {
            Self::Victory { enemy, .. } | Self::Defeat { enemy, .. } => enemy,
        }
    }

    pub fn is_victory(&self) -> bool {
        matches!(self, Self::Victory { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbsorbResult {
    pub skill: SkillRef,
    pub newly_learned: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evolution {
    pub max_health: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FusionApplication {
    pub consumed: [SkillRef; 2],
    pub result: SkillRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FusionOutcome {
    Applied(FusionApplication),
    NoFusionAvailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AscendResult {
    Ascended { depth_layer: i32, healed: u32 },
    /// Terminal: the session ends in victory and the depth stays put.
    SurfaceReached,
}

#[derive(Clone, Debug)]
pub enum ActionResult {
    Explore(EncounterResult),
    Absorb(AbsorbResult),
    Evolve(Option<Evolution>),
    Fuse(FusionOutcome),
    Ascend(AscendResult),
}
