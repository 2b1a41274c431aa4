//! Shared balance constants for the progression and combat engine.
//!
//! All core balance numbers live here and feed the default `GameRules`
//! tables. Change once, test everywhere.

// =============================================================================
// LEVELING
// =============================================================================

/// XP required to go from level 1 to level 2.
pub const XP_THRESHOLD_BASE: u64 = 100;

/// Additional XP required per level beyond the first.
pub const XP_THRESHOLD_PER_LEVEL: u64 = 50;

// =============================================================================
// COMBAT - How attributes convert to combat numbers
// =============================================================================

/// Hit points per point of Vitality.
pub const HP_PER_VITALITY: f64 = 10.0;

/// Dodge chance per point of the defender's Agility.
pub const DODGE_PER_AGILITY: f64 = 0.02;

/// Dodge chance is capped so no build becomes unhittable.
pub const DODGE_CHANCE_CAP: f64 = 0.9;

/// Damage per point of the active side's Strength.
pub const DAMAGE_PER_STRENGTH: f64 = 2.0;

/// Damage soaked per point of the passive side's Vitality.
pub const MITIGATION_PER_VITALITY: f64 = 0.5;

/// A landed hit always deals at least this much damage.
pub const MIN_DAMAGE: u32 = 1;

/// Safety cap on combat length. Hitting the cap with both sides alive
/// resolves as a loss for the attacker.
pub const MAX_COMBAT_ROUNDS: u32 = 1000;

// =============================================================================
// RARITY - Per-level percentage-point increments and bonus multipliers
// =============================================================================

pub const UNCOMMON_PER_LEVEL: f64 = 1.5;
pub const RARE_PER_LEVEL: f64 = 0.5;
pub const EPIC_PER_LEVEL: f64 = 1.0;
pub const LEGENDARY_PER_LEVEL: f64 = 0.2;

pub const COMMON_MULTIPLIER: f64 = 1.0;
pub const UNCOMMON_MULTIPLIER: f64 = 1.2;
pub const RARE_MULTIPLIER: f64 = 1.5;
pub const EPIC_MULTIPLIER: f64 = 2.0;
pub const LEGENDARY_MULTIPLIER: f64 = 3.0;

// =============================================================================
// LOOT
// =============================================================================

/// Loot roll success chance when the quest carries the rare-loot flag.
pub const RARE_LOOT_CHANCE: f64 = 0.9;

/// Loot roll success chance for standard combat quests.
pub const STANDARD_LOOT_CHANCE: f64 = 0.5;

pub const INVENTORY_CAPACITY: usize = 50;

// =============================================================================
// QUESTS
// =============================================================================

/// Number of quest tiers per risk path. Each character keeps exactly one
/// available quest per tier per path.
pub const QUEST_TIERS: u8 = 3;

// =============================================================================
// ARENA
// =============================================================================

pub const STARTING_MMR: i32 = 1000;

/// Flat rating swing per match: winner gains it, loser drops it.
pub const MMR_DELTA: i32 = 30;

pub const DAILY_FIGHT_CAP: u32 = 5;
pub const DAILY_REFRESH_CAP: u32 = 3;

/// MMR half-width of the opponent listing band.
pub const OPPONENT_MMR_BAND: i32 = 200;

/// Progressive half-widths for ranked opponent search, narrowest first.
pub const RANKED_MMR_BANDS: [i32; 4] = [100, 200, 400, 800];

pub const MIN_OPPONENTS_LISTED: usize = 3;
pub const MAX_OPPONENTS_LISTED: usize = 5;

// =============================================================================
// CHARACTER
// =============================================================================

pub const MAX_ENERGY: u32 = 100;

/// Combat/quest outcome history per character, oldest evicted.
pub const HISTORY_CAPACITY: usize = 100;

/// Weight of character level in the display-only combat score.
pub const COMBAT_SCORE_LEVEL_WEIGHT: f64 = 2.0;
