use odyssey_core::random::seeded;
use odyssey_core::{InputJournal, Session, SessionAction, replay_to_end};

/// Explore until the run ends or the budget is spent, taking the first offer
/// and every fusion, climbing after each third encounter.
fn scripted_run(seed: u64, budget: usize) -> InputJournal {
    let mut rng = seeded(seed);
    let mut session = Session::new(&mut rng).expect("session starts");
    let mut journal = InputJournal::new(seed);

    for step in 0..budget {
        if session.is_finished() {
            break;
        }
        let action = if !session.pending_candidates().is_empty() {
            SessionAction::Absorb { index: 0 }
        } else if session.evolution_roll_pending() {
            SessionAction::Evolve
        } else if !session.available_fusions().is_empty() {
            SessionAction::Fuse { index: 0 }
        } else if step % 4 == 3 {
            SessionAction::Ascend
        } else {
            SessionAction::Explore
        };
        session.apply(action, &mut rng).expect("scripted action is always valid");
        journal.append(action);
    }
    journal
}

#[test]
fn test_determinism_identical_seeds_produce_same_hash() {
    let journal1 = scripted_run(12345, 60);
    let journal2 = scripted_run(12345, 60);
    assert_eq!(journal1, journal2, "same seed must choose the same actions");

    let result1 = replay_to_end(&journal1).expect("Replay 1 failed");
    let result2 = replay_to_end(&journal2).expect("Replay 2 failed");

    assert_eq!(
        result1.final_snapshot_hash, result2.final_snapshot_hash,
        "Identical runs must produce identical hashes"
    );
    assert_eq!(result1.final_depth, result2.final_depth);
    assert_eq!(result1.final_outcome, result2.final_outcome);
}

#[test]
fn test_determinism_different_seeds_produce_different_hashes() {
    let hashes: Vec<u64> = (0..8)
        .map(|seed| replay_to_end(&scripted_run(seed, 12)).expect("replay").final_snapshot_hash)
        .collect();
    let first = hashes[0];
    assert!(
        hashes.iter().any(|hash| *hash != first),
        "Different seeds should produce different outcomes or hashes"
    );
}

#[test]
fn test_deterministic_smoke_fixed_seed_stable_log_sequence() {
    fn run_trace(seed: u64) -> Vec<String> {
        let mut rng = seeded(seed);
        let mut session = Session::new(&mut rng).expect("session starts");
        for _ in 0..10 {
            if session.is_finished() {
                break;
            }
            session.explore(&mut rng).expect("explore");
            if !session.is_finished() {
                session.absorb(0).expect("first candidate is always offered");
                session.maybe_evolve(&mut rng);
            }
        }
        session.log().iter().map(|event| format!("{event:?}")).collect()
    }

    let left = run_trace(777);
    let right = run_trace(777);
    assert!(!left.is_empty());
    assert_eq!(left, right, "same seed should produce the same log trace");
}
