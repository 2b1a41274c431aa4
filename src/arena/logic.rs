//! Opponent discovery and match resolution.
//!
//! The caller supplies the roster of other characters as in-memory
//! snapshots; filtering, shuffling, and selection all happen here. Daily
//! fight and refresh counters reset lazily against UTC midnight on every
//! access.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::arena::types::{MatchReport, OpponentListing};
use crate::character::{Character, HistoryEntry, HistoryKind, Outcome};
use crate::combat::logic::simulate;
use crate::combat::types::Combatant;
use crate::error::EngineError;
use crate::rules::GameRules;
use crate::stats::{combat_score, equipment_bonus_totals, stats_for_class};

fn listing(rules: &GameRules, candidate: &Character) -> OpponentListing {
    let base = stats_for_class(rules, &candidate.class_name, candidate.level);
    let equip = equipment_bonus_totals(rules, &candidate.equipment);
    OpponentListing {
        id: candidate.id,
        name: candidate.name.clone(),
        level: candidate.level,
        mmr: candidate.mmr,
        combat_score: combat_score(candidate.level, &base, &equip),
    }
}

fn banded_pool<'a>(
    character: &Character,
    roster: &'a [Character],
    band: i32,
) -> Vec<&'a Character> {
    roster
        .iter()
        .filter(|c| {
            c.id != character.id && c.arena_entered && (c.mmr - character.mmr).abs() <= band
        })
        .collect()
}

/// Lists 3..=5 shuffled opponents (fewer if the pool is smaller) drawn from
/// arena-entered characters within the standard MMR band.
pub fn list_opponents(
    rules: &GameRules,
    character: &Character,
    roster: &[Character],
    rng: &mut impl Rng,
) -> Vec<OpponentListing> {
    let mut pool = banded_pool(character, roster, rules.arena.opponent_band);
    if pool.is_empty() {
        return Vec::new();
    }

    pool.shuffle(rng);
    let lo = pool.len().min(rules.arena.min_opponents);
    let hi = pool.len().min(rules.arena.max_opponents);
    let count = rng.gen_range(lo..=hi);

    pool.truncate(count);
    pool.into_iter().map(|c| listing(rules, c)).collect()
}

/// Re-rolls the opponent listing, consuming one of the day's refreshes.
pub fn refresh_opponents(
    rules: &GameRules,
    character: &mut Character,
    roster: &[Character],
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<Vec<OpponentListing>, EngineError> {
    character.daily_refreshes.refresh(now);
    if character.daily_refreshes.count >= rules.arena.daily_refresh_cap {
        return Err(EngineError::NoRefreshesRemaining);
    }
    character.daily_refreshes.count += 1;
    Ok(list_opponents(rules, character, roster, rng))
}

/// Finds one opponent by widening the MMR band progressively, falling back
/// to any arena-entered character before giving up.
pub fn find_ranked_opponent(
    rules: &GameRules,
    character: &Character,
    roster: &[Character],
    rng: &mut impl Rng,
) -> Result<OpponentListing, EngineError> {
    for band in rules.arena.ranked_bands {
        let pool = banded_pool(character, roster, band);
        if let Some(candidate) = pool.choose(rng) {
            return Ok(listing(rules, candidate));
        }
    }

    let anyone: Vec<&Character> = roster
        .iter()
        .filter(|c| c.id != character.id && c.arena_entered)
        .collect();
    anyone
        .choose(rng)
        .map(|c| listing(rules, c))
        .ok_or(EngineError::NoOpponents)
}

/// Resolves a match between the initiator and an opponent.
///
/// Applies the flat rating swing, bumps win/loss and both daily fight
/// counters, and appends mirrored history entries. The caller must persist
/// both characters atomically.
pub fn resolve_match(
    rules: &GameRules,
    character: &mut Character,
    opponent: &mut Character,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<MatchReport, EngineError> {
    if character.id == opponent.id {
        return Err(EngineError::CannotFightSelf);
    }

    character.daily_fights.refresh(now);
    if character.daily_fights.count >= rules.arena.daily_fight_cap {
        return Err(EngineError::DailyFightLimitReached);
    }

    let initiator = Combatant::new(
        character.name.clone(),
        crate::stats::effective_stats(rules, character),
    );
    let challenged = Combatant::new(
        opponent.name.clone(),
        crate::stats::effective_stats(rules, opponent),
    );
    let combat = simulate(&initiator, &challenged, rng);
    let initiator_won = combat.attacker_won();

    let delta = rules.arena.mmr_delta;
    let (initiator_delta, opponent_delta) = if initiator_won {
        character.mmr += delta;
        opponent.mmr -= delta;
        character.wins += 1;
        opponent.losses += 1;
        (delta, -delta)
    } else {
        character.mmr -= delta;
        opponent.mmr += delta;
        character.losses += 1;
        opponent.wins += 1;
        (-delta, delta)
    };

    // Both sides burn a daily fight regardless of who initiated.
    character.daily_fights.count += 1;
    opponent.daily_fights.refresh(now);
    opponent.daily_fights.count += 1;

    character.arena_entered = true;
    opponent.arena_entered = true;

    let timestamp = now.timestamp();
    character.history.push(HistoryEntry {
        kind: HistoryKind::Arena,
        name: opponent.name.clone(),
        outcome: if initiator_won {
            Outcome::Victory
        } else {
            Outcome::Defeat
        },
        player_hp: combat.attacker_hp,
        opponent_hp: combat.defender_hp,
        opponent: Some(opponent.name.clone()),
        mmr_delta: Some(initiator_delta),
        timestamp,
    });
    opponent.history.push(HistoryEntry {
        kind: HistoryKind::Arena,
        name: character.name.clone(),
        outcome: if initiator_won {
            Outcome::Defeat
        } else {
            Outcome::Victory
        },
        player_hp: combat.defender_hp,
        opponent_hp: combat.attacker_hp,
        opponent: Some(character.name.clone()),
        mmr_delta: Some(opponent_delta),
        timestamp,
    });

    let winner_id = if initiator_won {
        character.id
    } else {
        opponent.id
    };

    debug!(
        initiator = %character.name,
        opponent = %opponent.name,
        initiator_won,
        initiator_mmr = character.mmr,
        opponent_mmr = opponent.mmr,
        "arena match resolved"
    );

    Ok(MatchReport {
        winner_id,
        initiator_won,
        initiator_mmr_delta: initiator_delta,
        opponent_mmr_delta: opponent_delta,
        combat,
    })
}
