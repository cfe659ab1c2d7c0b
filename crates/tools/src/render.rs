//! Plain-text rendering of structured engine results for terminal front ends.

use game_core::{
    AscendResult, BattleReport, EncounterResult, FusionCandidate, Session, Side, SkillRef,
};

pub fn status_line(session: &Session) -> String {
    let player = session.player();
    format!(
        "Current Layer: {}  |  HP: {}/{}",
        player.depth_layer,
        player.health(),
        player.max_health()
    )
}

pub fn skill_line(skill: &SkillRef) -> String {
    format!("{} ({}) - {}", skill.identity, skill.category, skill.description)
}

/// Numbered absorb offer; shown even when only one skill is on offer.
pub fn absorb_menu(candidates: &[SkillRef]) -> Vec<String> {
    candidates
        .iter()
        .enumerate()
        .map(|(number, skill)| format!("  {}. {}", number + 1, skill_line(skill)))
        .collect()
}

/// Maps a one-based menu entry to an index, rejecting anything outside `1..=options`.
pub fn parse_selection(raw: &str, options: usize) -> Option<usize> {
    let number = raw.trim().parse::<usize>().ok()?;
    (1..=options).contains(&number).then(|| number - 1)
}

pub fn encounter_intro(encounter: &EncounterResult) -> String {
    let enemy = encounter.enemy();
    let skills: Vec<&str> = enemy.skills.identities().collect();
    format!(
        "--- A wild {} appears! ---\nIt has {} HP and knows: {}",
        enemy.name,
        enemy.max_health(),
        skills.join(", ")
    )
}

pub fn battle_lines(enemy_name: &str, battle: &BattleReport) -> Vec<String> {
    battle
        .turns
        .iter()
        .map(|event| match event.attacker {
            Side::Player => format!(
                "You hit the {enemy_name} for {} damage.  (Enemy HP: {}/{})",
                event.damage, event.defender_health, event.defender_max_health
            ),
            Side::Enemy => format!(
                "The {enemy_name} hits you for {} damage.  (Your HP: {}/{})",
                event.damage, event.defender_health, event.defender_max_health
            ),
        })
        .collect()
}

pub fn fusion_menu(candidates: &[FusionCandidate]) -> Vec<String> {
    candidates
        .iter()
        .enumerate()
        .map(|(number, candidate)| {
            format!(
                "  {}. {} + {} => {}",
                number + 1,
                candidate.first_skill.identity,
                candidate.second_skill.identity,
                candidate.result.identity
            )
        })
        .collect()
}

pub fn ascend_message(result: &AscendResult) -> String {
    match result {
        AscendResult::Ascended { depth_layer, healed } => format!(
            "You climb up to Layer {depth_layer}.  The air feels a bit lighter.  You regain {healed} health."
        ),
        AscendResult::SurfaceReached => {
            "You push aside a crumbling tomb door and step out into the sunlight!".to_owned()
        }
    }
}
