//! Turn-exchange battle resolution.
//! This module exists to run one fight to completion and record every blow.
//! It does not own what happens to the loser or the winner afterwards.

use serde::{Deserialize, Serialize};

use crate::creature::Combatant;
use crate::error::{EngineError, Result};
use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    PlayerVictory,
    PlayerDefeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub turn: u32,
    pub attacker: Side,
    pub damage: u32,
    pub defender_health: u32,
    pub defender_max_health: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub turns: Vec<TurnEvent>,
}

impl BattleReport {
    pub fn damage_dealt_by(&self, side: Side) -> u32 {
        self.turns.iter().filter(|event| event.attacker == side).map(|event| event.damage).sum()
    }

    pub fn turn_count(&self) -> u32 {
        self.turns.last().map_or(0, |event| event.turn)
    }
}

fn ensure_can_fight<C: Combatant>(combatant: &C) -> Result<()> {
    if !combatant.is_alive() {
        return Err(EngineError::CombatantDown { name: combatant.name().to_owned() });
    }
    if combatant.skills().is_empty() {
        return Err(EngineError::UnarmedCombatant { name: combatant.name().to_owned() });
    }
    Ok(())
}

/// Fights until one side drops. The player strikes first each turn and a
/// defeated enemy never retaliates.
///
/// Both sides must be alive and know at least one skill, so every blow deals at
/// least one damage and the loop always ends. Preconditions are checked before
/// any randomness is drawn.
pub fn resolve<P, E, R>(player: &mut P, enemy: &mut E, rng: &mut R) -> Result<BattleReport>
where
    P: Combatant,
    E: Combatant,
    R: RandomSource + ?Sized,
{
    ensure_can_fight(player)?;
    ensure_can_fight(enemy)?;

    let mut turns = Vec::new();
    let mut turn = 0;
    loop {
        turn += 1;

        let player_damage = player.attack_power(rng);
        enemy.take_damage(player_damage);
        turns.push(TurnEvent {
            turn,
            attacker: Side::Player,
            damage: player_damage,
            defender_health: enemy.vitals().health(),
            defender_max_health: enemy.vitals().max_health(),
        });
        if !enemy.is_alive() {
            return Ok(BattleReport { outcome: BattleOutcome::PlayerVictory, turns });
        }

        let enemy_damage = enemy.attack_power(rng);
        player.take_damage(enemy_damage);
        turns.push(TurnEvent {
            turn,
            attacker: Side::Enemy,
            damage: enemy_damage,
            defender_health: player.vitals().health(),
            defender_max_health: player.vitals().max_health(),
        });
        if !player.is_alive() {
            return Ok(BattleReport { outcome: BattleOutcome::PlayerDefeat, turns });
        }
    }
}
