use std::fs;

use game_core::random::seeded;
use game_core::{FusionTable, InputJournal, Rules, Session, SkillCatalog, replay_to_end};
use odyssey_tools::autopilot::Autopilot;
use odyssey_tools::rules_file::load_rules;

fn recorded_run(seed: u64, max_actions: usize) -> (Session, InputJournal) {
    let mut rng = seeded(seed);
    let mut session = Session::new(&mut rng).expect("session starts");
    let mut journal = InputJournal::new(seed);
    let mut pilot = Autopilot::default();

    for _ in 0..max_actions {
        if session.is_finished() {
            break;
        }
        let action = pilot.next_action(&session);
        session.apply(action, &mut rng).expect("autopilot only issues valid actions");
        journal.append(action);
    }
    (session, journal)
}

#[test]
fn autopilot_journal_written_to_disk_replays_identically() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("run.json");

    for seed in [1_u64, 17, 4242] {
        let (session, journal) = recorded_run(seed, 400);
        fs::write(&path, journal.to_json().expect("serializable")).expect("write journal");

        let raw = fs::read_to_string(&path).expect("read journal");
        let loaded = InputJournal::from_json(&raw).expect("parses");
        let result = replay_to_end(&loaded).expect("replay succeeds");

        assert_eq!(result.final_snapshot_hash, session.snapshot_hash(), "seed {seed}");
        assert_eq!(result.final_outcome, session.outcome(), "seed {seed}");
        assert_eq!(result.actions_applied, journal.inputs.len());
    }
}

#[test]
fn autopilot_sessions_keep_health_bounded_under_custom_rules() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("rules.toml");
    fs::write(&path, "starting_max_health = 40\nevolution_chance = 1.0\n").expect("write rules");
    let rules: Rules = load_rules(&path).expect("valid rules");

    let mut rng = seeded(9);
    let mut session =
        Session::with_content(SkillCatalog::builtin(), FusionTable::builtin(), rules, &mut rng)
            .expect("session starts");
    let mut pilot = Autopilot::default();
    for _ in 0..300 {
        if session.is_finished() {
            break;
        }
        let action = pilot.next_action(&session);
        session.apply(action, &mut rng).expect("valid action");
        assert!(session.player().health() <= session.player().max_health());
        assert!(session.player().max_health() >= 40);
    }
}
