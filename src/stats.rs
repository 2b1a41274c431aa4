//! Stat model: class/level/equipment to combat stats.
//!
//! Pure functions over the class table injected through `GameRules`.
//! Callers guarantee level >= 1; level is not validated here.

use serde::{Deserialize, Serialize};

use crate::balance::COMBAT_SCORE_LEVEL_WEIGHT;
use crate::character::Equipment;
use crate::rules::GameRules;

/// The four combat attributes. Derived values, never persisted independently
/// of their sources (class, level, equipment).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CharacterStats {
    pub strength: f64,
    pub agility: f64,
    pub intellect: f64,
    pub vitality: f64,
}

impl CharacterStats {
    pub fn new(strength: f64, agility: f64, intellect: f64, vitality: f64) -> Self {
        Self {
            strength,
            agility,
            intellect,
            vitality,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn total(&self) -> f64 {
        self.strength + self.agility + self.intellect + self.vitality
    }

    /// Attribute-wise accumulation (for equipment bonuses).
    pub fn add(&mut self, other: &CharacterStats) {
        self.strength += other.strength;
        self.agility += other.agility;
        self.intellect += other.intellect;
        self.vitality += other.vitality;
    }

    /// Attribute-wise scaling (for rarity multipliers).
    pub fn scaled(&self, factor: f64) -> CharacterStats {
        CharacterStats {
            strength: self.strength * factor,
            agility: self.agility * factor,
            intellect: self.intellect * factor,
            vitality: self.vitality * factor,
        }
    }
}

/// Per-class base stats at level 1 and per-level growth increments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassDefinition {
    pub name: String,
    pub base: CharacterStats,
    pub growth: CharacterStats,
}

/// Class stats at a given level: base + growth * (level - 1).
/// Unknown class names fall back to the Novice definition.
pub fn stats_for_class(rules: &GameRules, class_name: &str, level: u32) -> CharacterStats {
    let class = rules.class_or_novice(class_name);
    let steps = level.saturating_sub(1) as f64;
    CharacterStats {
        strength: class.base.strength + class.growth.strength * steps,
        agility: class.base.agility + class.growth.agility * steps,
        intellect: class.base.intellect + class.growth.intellect * steps,
        vitality: class.base.vitality + class.growth.vitality * steps,
    }
}

/// Sums the stat bonuses of every equipped item, each scaled by the
/// multiplier of its rolled rarity. Items with no template entry contribute
/// nothing (static tables are assumed well-formed).
pub fn equipment_bonus_totals(rules: &GameRules, equipment: &Equipment) -> CharacterStats {
    let mut totals = CharacterStats::zero();
    for owned in equipment.iter() {
        if let Some(item) = rules.item(owned.item_id) {
            totals.add(&item.bonuses.scaled(owned.rarity.multiplier()));
        }
    }
    totals
}

/// Class stats plus equipment totals for a character snapshot.
pub fn effective_stats(rules: &GameRules, character: &crate::character::Character) -> CharacterStats {
    let mut stats = stats_for_class(rules, &character.class_name, character.level);
    stats.add(&equipment_bonus_totals(rules, &character.equipment));
    stats
}

/// Display-only aggregate used for opponent comparison and matchmaking
/// listings. Distinct from MMR and never used to resolve combat.
pub fn combat_score(level: u32, base: &CharacterStats, equip: &CharacterStats) -> i64 {
    (COMBAT_SCORE_LEVEL_WEIGHT * level as f64 + base.total() + equip.total()).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{OwnedItem, Rarity};

    #[test]
    fn test_warrior_stats_at_level_one() {
        let rules = GameRules::default();
        let stats = stats_for_class(&rules, "Warrior", 1);
        assert_eq!(stats, CharacterStats::new(7.0, 4.0, 2.0, 7.0));
    }

    #[test]
    fn test_warrior_stats_at_level_five() {
        let rules = GameRules::default();
        let stats = stats_for_class(&rules, "Warrior", 5);
        assert_eq!(stats, CharacterStats::new(15.0, 8.0, 2.0, 15.0));
    }

    #[test]
    fn test_unknown_class_falls_back_to_novice() {
        let rules = GameRules::default();
        let unknown = stats_for_class(&rules, "Beastmaster", 3);
        let novice = stats_for_class(&rules, "Novice", 3);
        assert_eq!(unknown, novice);
    }

    #[test]
    fn test_equipment_totals_apply_rarity_multiplier() {
        let rules = GameRules::default();
        let item = rules
            .items
            .iter()
            .find(|i| i.bonuses.total() > 0.0)
            .expect("default table has items with bonuses");

        let mut equipment = Equipment::default();
        equipment.set(
            item.slot,
            OwnedItem {
                item_id: item.id,
                rarity: Rarity::Legendary,
            },
        );

        let totals = equipment_bonus_totals(&rules, &equipment);
        let expected = item.bonuses.scaled(3.0);
        assert!((totals.total() - expected.total()).abs() < 1e-9);
    }

    #[test]
    fn test_equipment_totals_accumulate_across_items() {
        let mut rules = GameRules::default();
        rules.items = vec![
            crate::items::Item {
                id: 1,
                name: "Band of Might".to_string(),
                slot: crate::items::EquipSlot::Amulet,
                allowed_classes: None,
                bonuses: CharacterStats::new(3.0, 0.0, 0.0, 0.0),
                rarity: Rarity::Common,
            },
            crate::items::Item {
                id: 2,
                name: "Heavy Blade".to_string(),
                slot: crate::items::EquipSlot::Weapon,
                allowed_classes: None,
                bonuses: CharacterStats::new(2.0, 0.0, 0.0, 0.0),
                rarity: Rarity::Common,
            },
        ];

        let mut equipment = Equipment::default();
        equipment.set(
            crate::items::EquipSlot::Amulet,
            OwnedItem {
                item_id: 1,
                rarity: Rarity::Common,
            },
        );
        equipment.set(
            crate::items::EquipSlot::Weapon,
            OwnedItem {
                item_id: 2,
                rarity: Rarity::Uncommon,
            },
        );

        let totals = equipment_bonus_totals(&rules, &equipment);
        // 3.0 * 1.0 + 2.0 * 1.2
        assert!((totals.strength - 5.4).abs() < 1e-9);
    }

    #[test]
    fn test_combat_score_rounds() {
        let base = CharacterStats::new(7.0, 4.0, 2.0, 7.0);
        let equip = CharacterStats::new(1.2, 0.0, 0.0, 1.2);
        // 2*5 + 20 + 2.4 = 32.4 -> 32
        assert_eq!(combat_score(5, &base, &equip), 32);
    }
}
