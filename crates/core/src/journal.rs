use serde::{Deserialize, Serialize};

use crate::types::SessionAction;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Everything needed to reproduce a run: the seed and each accepted action in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub seed: u64,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub action: SessionAction,
}

impl InputJournal {
    pub fn new(seed: u64) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: env!("CARGO_PKG_VERSION").to_string(),
            seed,
            inputs: Vec::new(),
        }
    }

    pub fn append(&mut self, action: SessionAction) -> u64 {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, action });
        seq
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_follow_append_order() {
        let mut journal = InputJournal::new(7);
        assert_eq!(journal.append(SessionAction::Explore), 0);
        assert_eq!(journal.append(SessionAction::Absorb { index: 1 }), 1);
        assert_eq!(journal.inputs[1].action, SessionAction::Absorb { index: 1 });
    }

    #[test]
    fn json_keeps_seed_and_actions() {
        let mut journal = InputJournal::new(1234);
        journal.append(SessionAction::Explore);
        journal.append(SessionAction::Fuse { index: 0 });
        journal.append(SessionAction::Ascend);

        let raw = journal.to_json().expect("serializable");
        let loaded = InputJournal::from_json(&raw).expect("parses back");
        assert_eq!(loaded, journal);
    }
}
