use std::result;

use thiserror::Error;

/// Every way a rules-engine operation can refuse to act.
///
/// Rejections are atomic: when an operation returns one of these, no player,
/// fusion table or session state has been touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// More distinct skills were requested than the catalog holds. Content bug.
    #[error("requested {requested} distinct skills but the catalog only holds {available}")]
    InsufficientCatalog { requested: usize, available: usize },

    /// A fusion rule pairing a skill with itself. Content bug.
    #[error("skill '{identity}' cannot be fused with itself")]
    InvalidFusion { identity: String },

    /// A selection index that does not match any offered candidate.
    #[error("selection {index} is out of range ({available} candidates offered)")]
    SelectionOutOfRange { index: usize, available: usize },

    #[error("skill '{identity}' is registered more than once")]
    DuplicateSkill { identity: String },

    #[error("the monster name pool is empty")]
    EmptyNamePool,

    #[error("{name} knows no skills and cannot deal damage")]
    UnarmedCombatant { name: String },

    #[error("{name} has no health left and cannot fight")]
    CombatantDown { name: String },

    #[error("the session has already ended")]
    SessionFinished,

    /// Rules that would break a session, one message per problem.
    #[error("invalid rules: {}", .problems.join("; "))]
    InvalidRules { problems: Vec<String> },
}

impl EngineError {
    /// Whether the presentation layer can simply re-prompt.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::SelectionOutOfRange { .. })
    }
}

pub type Result<T> = result::Result<T, EngineError>;
