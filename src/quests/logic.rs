//! The quest state machine: Idle -> Active -> Idle.
//!
//! Polling before the duration elapses reports remaining time without
//! mutating state; the first poll at or past the duration performs exactly
//! one completion transition (combat resolution, reward grant, loot roll,
//! history append, pool refill).

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::character::{Character, HistoryEntry, HistoryKind, Outcome};
use crate::combat::logic::simulate;
use crate::combat::types::{generate_enemy_name, CombatResult, Combatant};
use crate::error::EngineError;
use crate::items::OwnedItem;
use crate::loot::roll_loot;
use crate::quests::types::{ActiveQuest, QuestTemplate};
use crate::rules::GameRules;
use crate::stats::{effective_stats, CharacterStats};

/// What became of the loot roll on a completed quest. A full inventory
/// suppresses the drop without failing the completion.
#[derive(Debug, Clone, PartialEq)]
pub enum LootOutcome {
    None,
    Granted(OwnedItem),
    InventoryFull,
}

/// Everything the calling layer persists or renders after a completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReport {
    pub quest_name: String,
    pub outcome: Outcome,
    pub xp_gained: u64,
    pub gold_gained: u64,
    pub levels_gained: u32,
    pub loot: LootOutcome,
    pub combat: Option<CombatResult>,
}

/// Result of polling the active quest.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestStatus {
    InProgress { time_left_secs: i64 },
    Completed(CompletionReport),
}

/// Level-scaled random stat roll for a quest enemy, frozen at acceptance
/// time so later polls replay against the same opponent.
pub fn generate_quest_enemy(level: u32, rng: &mut impl Rng) -> Combatant {
    let level = level as f64;
    let base = (level * 0.8 + rng.gen::<f64>() * level * 0.4).floor();

    let stats = CharacterStats {
        strength: base + rng.gen_range(0..=2) as f64,
        agility: base + rng.gen_range(0..=2) as f64,
        intellect: base + rng.gen_range(0..=1) as f64,
        vitality: base + rng.gen_range(0..=3) as f64,
    };

    Combatant::new(generate_enemy_name(rng), stats)
}

/// Starts a quest from a template.
///
/// Fails if the character lacks the energy or already has a quest running.
/// Energy is deducted up front and is not refunded on cancel.
pub fn start_quest(
    character: &mut Character,
    template: &QuestTemplate,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<(), EngineError> {
    if character.energy < template.energy_cost {
        return Err(EngineError::InsufficientEnergy);
    }
    if character.active_quest.is_some() {
        return Err(EngineError::QuestAlreadyActive);
    }

    character.spend_energy(template.energy_cost)?;

    let enemy = template
        .is_combat
        .then(|| generate_quest_enemy(character.level, rng));

    character.active_quest = Some(ActiveQuest::from_template(
        template,
        now.timestamp(),
        enemy,
    ));

    debug!(
        character = %character.name,
        quest = %template.name,
        path = template.path.label(),
        tier = template.tier,
        "quest started"
    );
    Ok(())
}

/// Polls the active quest; completes it once the duration has elapsed.
///
/// Idempotent before expiry. The completion transition clears the active
/// quest, so a second post-expiry call fails with `NoActiveQuest`.
pub fn poll_quest(
    rules: &GameRules,
    character: &mut Character,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<QuestStatus, EngineError> {
    let (elapsed, duration) = {
        let active = character
            .active_quest
            .as_ref()
            .ok_or(EngineError::NoActiveQuest)?;
        (now.timestamp() - active.started_at, active.duration_secs)
    };

    if elapsed < duration {
        return Ok(QuestStatus::InProgress {
            time_left_secs: duration - elapsed,
        });
    }

    let active = character
        .active_quest
        .take()
        .ok_or(EngineError::NoActiveQuest)?;

    let combat = active.enemy.as_ref().map(|enemy| {
        let player = Combatant::new(
            character.name.clone(),
            effective_stats(rules, character),
        );
        simulate(&player, enemy, rng)
    });

    let succeeded = combat.as_ref().map_or(true, CombatResult::attacker_won);

    let (xp_gained, gold_gained, levels_gained) = if succeeded {
        let levels = character.grant_xp(active.xp_reward);
        character.gold += active.gold_reward;
        (active.xp_reward, active.gold_reward, levels)
    } else {
        (0, 0, 0)
    };

    let loot = roll_completion_loot(rules, character, &active, succeeded, rng);

    let outcome = match (&combat, succeeded) {
        (Some(_), true) => Outcome::Victory,
        (Some(_), false) => Outcome::Defeat,
        (None, _) => Outcome::Completed,
    };

    character.history.push(HistoryEntry {
        kind: HistoryKind::Quest,
        name: active.name.clone(),
        outcome,
        player_hp: combat.as_ref().map_or(0, |c| c.attacker_hp),
        opponent_hp: combat.as_ref().map_or(0, |c| c.defender_hp),
        opponent: active.enemy.as_ref().map(|e| e.name.clone()),
        mmr_delta: None,
        timestamp: now.timestamp(),
    });

    // Refill the pool slot for this path/tier with a fresh random pick.
    if let Some(replacement) = rules.quests_for(active.path, active.tier).choose(rng) {
        character
            .quest_pools
            .replace(active.path, active.tier, (*replacement).clone());
    }

    debug!(
        character = %character.name,
        quest = %active.name,
        ?outcome,
        xp_gained,
        gold_gained,
        "quest completed"
    );

    Ok(QuestStatus::Completed(CompletionReport {
        quest_name: active.name,
        outcome,
        xp_gained,
        gold_gained,
        levels_gained,
        loot,
        combat,
    }))
}

/// Abandons the active quest. Spent energy is not refunded.
pub fn cancel_quest(character: &mut Character) -> Result<(), EngineError> {
    let active = character
        .active_quest
        .take()
        .ok_or(EngineError::NoActiveQuest)?;
    debug!(character = %character.name, quest = %active.name, "quest cancelled");
    Ok(())
}

fn roll_completion_loot(
    rules: &GameRules,
    character: &mut Character,
    active: &ActiveQuest,
    succeeded: bool,
    rng: &mut impl Rng,
) -> LootOutcome {
    // Only combat wins drop loot.
    if !active.is_combat || !succeeded {
        return LootOutcome::None;
    }

    let chance = if active.rare_loot {
        rules.rare_loot_chance
    } else {
        rules.standard_loot_chance
    };
    if rng.gen::<f64>() >= chance {
        return LootOutcome::None;
    }

    let Some(owned) = roll_loot(rules, character.level, rng) else {
        return LootOutcome::None;
    };

    if !character.inventory_has_room(rules) {
        return LootOutcome::InventoryFull;
    }
    character.inventory.push(owned);
    LootOutcome::Granted(owned)
}
