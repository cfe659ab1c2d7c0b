use std::sync::Arc;

use odyssey_core::random::seeded;
use odyssey_core::{
    BattleOutcome, Combatant, EngineError, Enemy, FusionTable, Player, Side, Skill, SkillCatalog,
    SkillSet, Vitals, combat,
};
use proptest::prelude::*;

fn catalog() -> SkillCatalog {
    SkillCatalog::builtin()
}

proptest! {
    #[test]
    fn fusion_lookup_is_commutative(a in 0usize..8, b in 0usize..8) {
        let catalog = catalog();
        let table = FusionTable::builtin();
        let skills = catalog.list_basic_skills();
        prop_assert_eq!(
            table.lookup(&skills[a], &skills[b]).map(|s| s.identity.clone()),
            table.lookup(&skills[b], &skills[a]).map(|s| s.identity.clone())
        );
    }

    #[test]
    fn registered_rules_resolve_in_either_order(a in "[a-z]{1,6}", b in "[A-Z]{1,6}") {
        let mut table = FusionTable::new();
        table.register_identities(&a, &b, Skill::new("Result", "", "Test")).expect("distinct");
        prop_assert!(table.lookup_identities(&b, &a).is_some());
        prop_assert!(table.lookup_identities(&a, &b).is_some());
    }

    #[test]
    fn self_fusion_always_fails(name in "[A-Za-z ]{1,12}") {
        let skill = Skill::new(name.clone(), "", "Test");
        let err = FusionTable::new().register(&skill, &skill, Skill::new("X", "", "Test"));
        prop_assert_eq!(err.unwrap_err(), EngineError::InvalidFusion { identity: name });
    }

    #[test]
    fn health_stays_within_bounds(max in 1u32..200, hits in proptest::collection::vec(0u32..50, 0..40)) {
        let mut vitals = Vitals::new(max);
        for hit in hits {
            vitals.take_damage(hit);
            prop_assert!(vitals.health() <= vitals.max_health());
        }
        vitals.heal(u32::MAX);
        prop_assert_eq!(vitals.health(), vitals.max_health());
    }

    #[test]
    fn absorbing_twice_changes_nothing(picks in proptest::collection::vec(0usize..8, 1..12)) {
        let catalog = catalog();
        let skills = catalog.list_basic_skills();
        let mut set = SkillSet::default();
        for &pick in &picks {
            set.absorb(Arc::clone(&skills[pick]));
            let snapshot = set.clone();
            prop_assert!(!set.absorb(Arc::clone(&skills[pick])));
            prop_assert_eq!(&set, &snapshot);
        }
    }

    #[test]
    fn combat_ends_with_exactly_one_winner(
        seed in any::<u64>(),
        player_health in 1u32..60,
        player_skills in 1usize..=8,
        enemy_health in 1u32..60,
        enemy_skills in 1usize..=8,
    ) {
        let catalog = catalog();
        let mut rng = seeded(seed);
        let mut player = Player::with_skills(
            player_health,
            -10,
            catalog.sample_skills(player_skills, &mut rng).expect("fits"),
        );
        let mut enemy = Enemy {
            name: "Slime".into(),
            vitals: Vitals::new(enemy_health),
            skills: SkillSet::from_skills(catalog.sample_skills(enemy_skills, &mut rng).expect("fits")),
        };

        let report = combat::resolve(&mut player, &mut enemy, &mut rng).expect("both armed");

        prop_assert!(player.is_alive() != enemy.is_alive());
        match report.outcome {
            BattleOutcome::PlayerVictory => {
                prop_assert!(!enemy.is_alive());
                prop_assert_eq!(report.turns.last().map(|t| t.attacker), Some(Side::Player));
            }
            BattleOutcome::PlayerDefeat => {
                prop_assert!(!player.is_alive());
                prop_assert_eq!(report.turns.last().map(|t| t.attacker), Some(Side::Enemy));
            }
        }
        prop_assert!(report.turns.iter().all(|t| t.damage >= 1));
    }
}
