//! Weighted rarity distribution and loot rolls.
//!
//! The distribution is a percentage table over the five rarity tiers that
//! always sums to exactly 100. Four tiers scale linearly with character
//! level; common absorbs the remainder, with a fixed claw-back order when
//! the scaled tiers overflow 100.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::items::{OwnedItem, Rarity};
use crate::rules::GameRules;

/// Percentage weights per rarity tier. Iteration order is fixed
/// (common through legendary) so weighted picks are reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RarityWeights {
    pub common: f64,
    pub uncommon: f64,
    pub rare: f64,
    pub epic: f64,
    pub legendary: f64,
}

impl RarityWeights {
    pub fn get(&self, rarity: Rarity) -> f64 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
        }
    }

    pub fn entries(&self) -> [(Rarity, f64); 5] {
        [
            (Rarity::Common, self.common),
            (Rarity::Uncommon, self.uncommon),
            (Rarity::Rare, self.rare),
            (Rarity::Epic, self.epic),
            (Rarity::Legendary, self.legendary),
        ]
    }

    pub fn total(&self) -> f64 {
        self.common + self.uncommon + self.rare + self.epic + self.legendary
    }
}

/// Rarity weights for a character level. Higher levels shift weight from
/// common toward the rarer tiers; the total is always exactly 100 and no
/// tier ever goes negative.
pub fn distribution(rules: &GameRules, level: u32) -> RarityWeights {
    let level = level as f64;
    let increments = &rules.rarity;

    let mut weights = RarityWeights {
        common: 0.0,
        uncommon: increments.uncommon_per_level * level,
        rare: increments.rare_per_level * level,
        epic: increments.epic_per_level * level,
        legendary: increments.legendary_per_level * level,
    };

    let scaled = weights.uncommon + weights.rare + weights.epic + weights.legendary;
    if scaled <= 100.0 {
        weights.common = 100.0 - scaled;
    } else {
        // Claw the excess back in fixed order until the table fits.
        let mut excess = scaled - 100.0;
        for weight in [
            &mut weights.uncommon,
            &mut weights.epic,
            &mut weights.rare,
            &mut weights.legendary,
        ] {
            let cut = excess.min(*weight);
            *weight -= cut;
            excess -= cut;
            if excess <= 0.0 {
                break;
            }
        }
    }

    weights
}

/// Draws a tier from the weight table: a uniform roll in [0, 100) at
/// 3-decimal precision, walked against cumulative weights in fixed order.
/// Falls back to common if floating-point drift leaves the roll unmatched.
pub fn weighted_pick(weights: &RarityWeights, rng: &mut impl Rng) -> Rarity {
    let roll = rng.gen_range(0..100_000) as f64 / 1000.0;
    let mut cumulative = 0.0;
    for (rarity, weight) in weights.entries() {
        cumulative += weight;
        if cumulative > roll {
            return rarity;
        }
    }
    Rarity::Common
}

/// Rolls a loot drop for a character level: a uniformly random template
/// from the loot table with a level-weighted rarity. `None` only if the
/// table is empty.
pub fn roll_loot(rules: &GameRules, level: u32, rng: &mut impl Rng) -> Option<OwnedItem> {
    let item = rules.items.choose(rng)?;
    let rarity = weighted_pick(&distribution(rules, level), rng);
    Some(OwnedItem {
        item_id: item.id,
        rarity,
    })
}
