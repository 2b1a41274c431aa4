//! The turn-based battle simulator.
//!
//! Deterministic except for the injected random source, which is drawn once
//! per round for the dodge check. Seeding the RNG replays an identical log
//! and result.

use rand::Rng;
use tracing::debug;

use crate::balance::*;
use crate::combat::types::{CombatResult, CombatSide, Combatant};
use crate::stats::CharacterStats;

fn starting_hp(stats: &CharacterStats) -> u32 {
    (stats.vitality * HP_PER_VITALITY).round().max(0.0) as u32
}

fn dodge_chance(stats: &CharacterStats) -> f64 {
    (stats.agility * DODGE_PER_AGILITY).min(DODGE_CHANCE_CAP)
}

fn hit_damage(active: &CharacterStats, passive: &CharacterStats) -> u32 {
    let raw = active.strength * DAMAGE_PER_STRENGTH - passive.vitality * MITIGATION_PER_VITALITY;
    (raw.round().max(MIN_DAMAGE as f64)) as u32
}

/// Resolves a battle between two frozen stat blocks in a single pass.
///
/// Both sides start at VIT x 10 hit points. The higher-Agility side acts
/// first, with ties favoring the attacker. Each round the active side swings
/// once; the passive side dodges with 2% chance per Agility point (capped at
/// 90%), otherwise takes `max(1, round(STR*2 - VIT*0.5))` damage. Turns
/// alternate until one side drops to 0 HP or the round cap is hit, which
/// resolves as a loss for the attacker.
pub fn simulate(attacker: &Combatant, defender: &Combatant, rng: &mut impl Rng) -> CombatResult {
    let mut attacker_hp = starting_hp(&attacker.stats);
    let mut defender_hp = starting_hp(&defender.stats);

    // Ties favor the left-hand argument.
    let mut attacker_active = attacker.stats.agility >= defender.stats.agility;

    let mut log = Vec::new();
    log.push(format!(
        "{} ({} HP) engages {} ({} HP)",
        attacker.name, attacker_hp, defender.name, defender_hp
    ));

    let mut rounds = 0;
    while attacker_hp > 0 && defender_hp > 0 && rounds < MAX_COMBAT_ROUNDS {
        rounds += 1;

        let (active, passive) = if attacker_active {
            (attacker, defender)
        } else {
            (defender, attacker)
        };

        if rng.gen::<f64>() < dodge_chance(&passive.stats) {
            log.push(format!(
                "Round {}: {} dodges {}'s attack",
                rounds, passive.name, active.name
            ));
        } else {
            let damage = hit_damage(&active.stats, &passive.stats);
            let passive_hp = if attacker_active {
                &mut defender_hp
            } else {
                &mut attacker_hp
            };
            *passive_hp = passive_hp.saturating_sub(damage);
            log.push(format!(
                "Round {}: {} hits {} for {} damage ({} HP left)",
                rounds, active.name, passive.name, damage, passive_hp
            ));
        }

        attacker_active = !attacker_active;
    }

    // The round cap with both sides alive counts as an attacker loss.
    let winner = if attacker_hp > 0 && defender_hp == 0 {
        CombatSide::Attacker
    } else {
        CombatSide::Defender
    };

    let winner_name = match winner {
        CombatSide::Attacker => &attacker.name,
        CombatSide::Defender => &defender.name,
    };
    log.push(format!("{} wins after {} rounds", winner_name, rounds));

    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        rounds,
        winner = %winner_name,
        "combat resolved"
    );

    CombatResult {
        winner,
        rounds,
        attacker_hp,
        defender_hp,
        log,
    }
}
