use thiserror::Error;
use tracing::debug;

use crate::content::SkillCatalog;
use crate::error::EngineError;
use crate::fusion::FusionTable;
use crate::journal::InputJournal;
use crate::random;
use crate::rules::Rules;
use crate::session::Session;
use crate::types::RunOutcome;

#[derive(Error, Debug, PartialEq)]
pub enum ReplayError {
    #[error("could not start the session: {0}")]
    Setup(EngineError),
    #[error("input {seq} was rejected: {source}")]
    Rejected { seq: u64, source: EngineError },
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub final_outcome: Option<RunOutcome>,
    pub final_depth: i32,
    pub final_snapshot_hash: u64,
    pub actions_applied: usize,
}

/// Rebuilds a run with the built-in content and default rules from its seed
/// and feeds every journaled action back in order.
pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    replay_with_rules(journal, Rules::default())
}

/// Same as [`replay_to_end`] for a run recorded under custom rules.
pub fn replay_with_rules(
    journal: &InputJournal,
    rules: Rules,
) -> Result<ReplayResult, ReplayError> {
    let mut rng = random::seeded(journal.seed);
    let mut session =
        Session::with_content(SkillCatalog::builtin(), FusionTable::builtin(), rules, &mut rng)
            .map_err(ReplayError::Setup)?;

    for record in &journal.inputs {
        session
            .apply(record.action, &mut rng)
            .map_err(|source| ReplayError::Rejected { seq: record.seq, source })?;
        debug!(seq = record.seq, action = ?record.action, "replayed input");
    }

    Ok(ReplayResult {
        final_outcome: session.outcome(),
        final_depth: session.depth_layer(),
        final_snapshot_hash: session.snapshot_hash(),
        actions_applied: journal.inputs.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionAction;

    #[test]
    fn empty_journal_reproduces_the_starting_state() {
        let journal = InputJournal::new(99);
        let result = replay_to_end(&journal).expect("nothing to reject");

        let session = Session::new(&mut random::seeded(99)).expect("session");
        assert_eq!(result.final_snapshot_hash, session.snapshot_hash());
        assert_eq!(result.final_outcome, None);
        assert_eq!(result.final_depth, -10);
        assert_eq!(result.actions_applied, 0);
    }

    #[test]
    fn replay_matches_a_live_session_driven_by_the_same_inputs() {
        let seed = 2024;
        let mut rng = random::seeded(seed);
        let mut live = Session::new(&mut rng).expect("session");
        let mut journal = InputJournal::new(seed);

        for action in [SessionAction::Ascend, SessionAction::Ascend, SessionAction::Explore] {
            live.apply(action, &mut rng).expect("action applies");
            journal.append(action);
        }

        let result = replay_to_end(&journal).expect("replay");
        assert_eq!(result.final_snapshot_hash, live.snapshot_hash());
        assert_eq!(result.final_depth, live.depth_layer());
    }

    #[test]
    fn custom_rules_must_be_supplied_to_reproduce_a_run() {
        let seed = 31;
        let rules = Rules { starting_max_health: 50, ascend_heal: 10, ..Rules::default() };
        let mut rng = random::seeded(seed);
        let mut live = Session::with_content(
            SkillCatalog::builtin(),
            FusionTable::builtin(),
            rules.clone(),
            &mut rng,
        )
        .expect("session");
        let mut journal = InputJournal::new(seed);
        live.apply(SessionAction::Ascend, &mut rng).expect("ascend");
        journal.append(SessionAction::Ascend);

        let matching = replay_with_rules(&journal, rules).expect("replay");
        assert_eq!(matching.final_snapshot_hash, live.snapshot_hash());
        let default = replay_to_end(&journal).expect("replay");
        assert_ne!(default.final_snapshot_hash, live.snapshot_hash());
    }

    #[test]
    fn rejected_input_reports_its_sequence_number() {
        let mut journal = InputJournal::new(5);
        journal.append(SessionAction::Ascend);
        journal.append(SessionAction::Absorb { index: 0 });

        let err = replay_to_end(&journal).unwrap_err();
        assert_eq!(
            err,
            ReplayError::Rejected {
                seq: 1,
                source: EngineError::SelectionOutOfRange { index: 0, available: 0 },
            }
        );
    }
}
