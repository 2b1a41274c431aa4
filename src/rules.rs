//! Injected configuration: class tables, quest tables, the loot table,
//! rarity increments, and balance knobs.
//!
//! Nothing in the engine reads a hidden global; every tunable number flows
//! through a `GameRules` value so tests and the calling layer can
//! substitute alternate tables. `Default` builds the standard tables from
//! the `balance` constants.

use serde::{Deserialize, Serialize};

use crate::balance::*;
use crate::items::{EquipSlot, Item, Rarity};
use crate::quests::types::{QuestTemplate, RiskPath};
use crate::stats::{CharacterStats, ClassDefinition};

/// Per-level percentage-point increments for the scaled rarity tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RarityIncrements {
    pub uncommon_per_level: f64,
    pub rare_per_level: f64,
    pub epic_per_level: f64,
    pub legendary_per_level: f64,
}

impl Default for RarityIncrements {
    fn default() -> Self {
        Self {
            uncommon_per_level: UNCOMMON_PER_LEVEL,
            rare_per_level: RARE_PER_LEVEL,
            epic_per_level: EPIC_PER_LEVEL,
            legendary_per_level: LEGENDARY_PER_LEVEL,
        }
    }
}

/// Arena tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArenaRules {
    pub starting_mmr: i32,
    pub mmr_delta: i32,
    pub daily_fight_cap: u32,
    pub daily_refresh_cap: u32,
    pub opponent_band: i32,
    pub ranked_bands: [i32; 4],
    pub min_opponents: usize,
    pub max_opponents: usize,
}

impl Default for ArenaRules {
    fn default() -> Self {
        Self {
            starting_mmr: STARTING_MMR,
            mmr_delta: MMR_DELTA,
            daily_fight_cap: DAILY_FIGHT_CAP,
            daily_refresh_cap: DAILY_REFRESH_CAP,
            opponent_band: OPPONENT_MMR_BAND,
            ranked_bands: RANKED_MMR_BANDS,
            min_opponents: MIN_OPPONENTS_LISTED,
            max_opponents: MAX_OPPONENTS_LISTED,
        }
    }
}

/// The full rules object handed to the engine at construction time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRules {
    pub classes: Vec<ClassDefinition>,
    /// Fallback definition for characters with no or an unknown class.
    pub novice: ClassDefinition,
    pub quests: Vec<QuestTemplate>,
    pub items: Vec<Item>,
    pub rarity: RarityIncrements,
    pub rare_loot_chance: f64,
    pub standard_loot_chance: f64,
    pub inventory_capacity: usize,
    pub arena: ArenaRules,
}

impl GameRules {
    /// Resolves a class name, falling back to Novice. Total by
    /// construction: every referenced class name yields a definition.
    pub fn class_or_novice(&self, name: &str) -> &ClassDefinition {
        self.classes
            .iter()
            .find(|c| c.name == name)
            .unwrap_or(&self.novice)
    }

    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// All quest templates for a path and tier.
    pub fn quests_for(&self, path: RiskPath, tier: u8) -> Vec<&QuestTemplate> {
        self.quests
            .iter()
            .filter(|q| q.path == path && q.tier == tier)
            .collect()
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            classes: default_classes(),
            novice: novice_class(),
            quests: default_quests(),
            items: default_items(),
            rarity: RarityIncrements::default(),
            rare_loot_chance: RARE_LOOT_CHANCE,
            standard_loot_chance: STANDARD_LOOT_CHANCE,
            inventory_capacity: INVENTORY_CAPACITY,
            arena: ArenaRules::default(),
        }
    }
}

fn class(name: &str, base: [f64; 4], growth: [f64; 4]) -> ClassDefinition {
    ClassDefinition {
        name: name.to_string(),
        base: CharacterStats::new(base[0], base[1], base[2], base[3]),
        growth: CharacterStats::new(growth[0], growth[1], growth[2], growth[3]),
    }
}

fn novice_class() -> ClassDefinition {
    class("Novice", [5.0, 5.0, 5.0, 5.0], [1.0, 1.0, 1.0, 1.0])
}

fn default_classes() -> Vec<ClassDefinition> {
    vec![
        novice_class(),
        class("Warrior", [7.0, 4.0, 2.0, 7.0], [2.0, 1.0, 0.0, 2.0]),
        class("Rogue", [4.0, 8.0, 3.0, 5.0], [1.0, 2.0, 0.0, 1.0]),
        class("Mage", [2.0, 4.0, 9.0, 4.0], [0.0, 1.0, 3.0, 1.0]),
    ]
}

fn quest(
    path: RiskPath,
    tier: u8,
    name: &str,
    duration_secs: i64,
    energy_cost: u32,
    xp_reward: u64,
    gold_reward: u64,
    rare_loot: bool,
) -> QuestTemplate {
    QuestTemplate {
        tier,
        name: name.to_string(),
        duration_secs,
        energy_cost,
        xp_reward,
        gold_reward,
        is_combat: path == RiskPath::Risky,
        rare_loot,
        path,
    }
}

fn default_quests() -> Vec<QuestTemplate> {
    use RiskPath::{Risky, Safe};
    vec![
        // Safe path: guaranteed rewards, no combat.
        quest(Safe, 1, "Sweep the Granary", 60, 10, 25, 10, false),
        quest(Safe, 1, "Deliver Herb Bundles", 60, 10, 25, 12, false),
        quest(Safe, 1, "Mend the Fence Line", 90, 10, 30, 8, false),
        quest(Safe, 2, "Escort the Tinker's Cart", 300, 20, 80, 35, false),
        quest(Safe, 2, "Chart the Old Mill Road", 300, 20, 85, 30, false),
        quest(Safe, 3, "Survey the Border Hills", 900, 30, 200, 100, false),
        quest(Safe, 3, "Recover the Census Ledger", 900, 30, 210, 90, false),
        // Risky path: combat-gated rewards.
        quest(Risky, 1, "Clear the Rat Cellar", 60, 10, 40, 15, false),
        quest(Risky, 1, "Drive Off the Scavengers", 90, 10, 45, 18, false),
        quest(Risky, 2, "Break the Bandit Camp", 300, 20, 120, 50, false),
        quest(Risky, 2, "Hunt the Marsh Stalker", 300, 20, 130, 45, true),
        quest(Risky, 3, "Storm the Watchtower", 900, 30, 300, 160, true),
        quest(Risky, 3, "Slay the Barrow Wight", 900, 30, 320, 150, true),
    ]
}

fn item(
    id: u32,
    name: &str,
    slot: EquipSlot,
    allowed: Option<&[&str]>,
    bonuses: [f64; 4],
) -> Item {
    Item {
        id,
        name: name.to_string(),
        slot,
        allowed_classes: allowed.map(|classes| classes.iter().map(|c| c.to_string()).collect()),
        bonuses: CharacterStats::new(bonuses[0], bonuses[1], bonuses[2], bonuses[3]),
        rarity: Rarity::Common,
    }
}

fn default_items() -> Vec<Item> {
    vec![
        item(1, "Squire's Sword", EquipSlot::Weapon, Some(&["Warrior"]), [3.0, 0.0, 0.0, 1.0]),
        item(2, "Notched Greataxe", EquipSlot::Weapon, Some(&["Warrior"]), [4.0, 0.0, 0.0, 0.0]),
        item(3, "Whittled Shiv", EquipSlot::Weapon, Some(&["Rogue"]), [1.0, 3.0, 0.0, 0.0]),
        item(4, "Ironbark Staff", EquipSlot::Weapon, Some(&["Mage"]), [0.0, 0.0, 4.0, 0.0]),
        item(5, "Traveler's Cudgel", EquipSlot::Weapon, None, [2.0, 0.0, 0.0, 0.0]),
        item(6, "Riveted Hauberk", EquipSlot::Armor, Some(&["Warrior"]), [0.0, 0.0, 0.0, 4.0]),
        item(7, "Padded Leathers", EquipSlot::Armor, None, [0.0, 1.0, 0.0, 2.0]),
        item(8, "Runed Vestments", EquipSlot::Armor, Some(&["Mage"]), [0.0, 0.0, 2.0, 2.0]),
        item(9, "Dented Sallet", EquipSlot::Helmet, None, [0.0, 0.0, 0.0, 2.0]),
        item(10, "Hood of Quiet Steps", EquipSlot::Helmet, Some(&["Rogue"]), [0.0, 2.0, 0.0, 1.0]),
        item(11, "Marsh-Walker Boots", EquipSlot::Boots, None, [0.0, 2.0, 0.0, 0.0]),
        item(12, "Charm of the Ox", EquipSlot::Amulet, None, [1.0, 0.0, 0.0, 1.0]),
        item(13, "Scrivener's Locket", EquipSlot::Amulet, None, [0.0, 0.0, 2.0, 0.0]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_have_every_class() {
        let rules = GameRules::default();
        for name in ["Novice", "Warrior", "Rogue", "Mage"] {
            assert_eq!(rules.class_or_novice(name).name, name);
        }
    }

    #[test]
    fn test_unknown_class_resolves_to_novice() {
        let rules = GameRules::default();
        assert_eq!(rules.class_or_novice("Summoner").name, "Novice");
    }

    #[test]
    fn test_every_tier_has_templates_on_both_paths() {
        let rules = GameRules::default();
        for path in RiskPath::all() {
            for tier in 1..=QUEST_TIERS {
                assert!(
                    !rules.quests_for(path, tier).is_empty(),
                    "{:?} tier {} has no templates",
                    path,
                    tier
                );
            }
        }
    }

    #[test]
    fn test_item_ids_are_unique() {
        let rules = GameRules::default();
        let mut ids: Vec<u32> = rules.items.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), rules.items.len());
    }

    #[test]
    fn test_item_lookup() {
        let rules = GameRules::default();
        assert!(rules.item(1).is_some());
        assert!(rules.item(9999).is_none());
    }

    #[test]
    fn test_rules_serde_round_trip() {
        let rules = GameRules::default();
        let json = serde_json::to_string(&rules).unwrap();
        let back: GameRules = serde_json::from_str(&json).unwrap();
        assert_eq!(rules, back);
    }
}
