pub mod combat;
pub mod content;
pub mod creature;
pub mod error;
pub mod fusion;
pub mod journal;
pub mod random;
pub mod replay;
pub mod rules;
pub mod session;
pub mod types;

pub use combat::{BattleOutcome, BattleReport, Side, TurnEvent};
pub use content::{Skill, SkillCatalog, SkillRef};
pub use creature::{Combatant, Enemy, Player, SkillSet, Vitals};
pub use error::EngineError;
pub use fusion::{FusionCandidate, FusionTable};
pub use journal::{InputJournal, InputRecord};
pub use random::{RandomSource, ScriptedRandom};
pub use replay::*;
pub use rules::Rules;
pub use session::Session;
pub use types::*;
