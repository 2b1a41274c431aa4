//! Item templates, rarity tiers, and owned item instances.
//!
//! Items are immutable templates supplied through `GameRules`; a character's
//! inventory and equipment hold references by template id plus the rarity
//! rolled at drop time.

use serde::{Deserialize, Serialize};

use crate::balance::*;
use crate::stats::CharacterStats;

/// Loot quality bracket, ordered worst to best.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn all() -> [Rarity; 5] {
        [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ]
    }

    /// Multiplier applied to every stat bonus an item of this rarity grants.
    /// Total over all tiers the loot distribution can produce.
    pub fn multiplier(self) -> f64 {
        match self {
            Rarity::Common => COMMON_MULTIPLIER,
            Rarity::Uncommon => UNCOMMON_MULTIPLIER,
            Rarity::Rare => RARE_MULTIPLIER,
            Rarity::Epic => EPIC_MULTIPLIER,
            Rarity::Legendary => LEGENDARY_MULTIPLIER,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EquipSlot {
    Weapon,
    Armor,
    Helmet,
    Boots,
    Amulet,
}

impl EquipSlot {
    pub fn all() -> [EquipSlot; 5] {
        [
            EquipSlot::Weapon,
            EquipSlot::Armor,
            EquipSlot::Helmet,
            EquipSlot::Boots,
            EquipSlot::Amulet,
        ]
    }
}

/// Immutable item template. `allowed_classes: None` means unrestricted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub slot: EquipSlot,
    pub allowed_classes: Option<Vec<String>>,
    pub bonuses: CharacterStats,
    /// Baseline tier for display; instances carry their own rolled rarity.
    pub rarity: Rarity,
}

impl Item {
    pub fn usable_by(&self, class_name: &str) -> bool {
        match &self.allowed_classes {
            None => true,
            Some(classes) => classes.iter().any(|c| c == class_name),
        }
    }
}

/// An item instance held by a character: template reference plus rolled rarity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OwnedItem {
    pub item_id: u32,
    pub rarity: Rarity,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Item {
        Item {
            id: 1,
            name: "Squire's Sword".to_string(),
            slot: EquipSlot::Weapon,
            allowed_classes: Some(vec!["Warrior".to_string()]),
            bonuses: CharacterStats::new(2.0, 0.0, 0.0, 1.0),
            rarity: Rarity::Common,
        }
    }

    #[test]
    fn test_rarity_multipliers_are_total_and_increasing() {
        let mut last = 0.0;
        for rarity in Rarity::all() {
            let m = rarity.multiplier();
            assert!(
                m > last,
                "{:?} multiplier should exceed the tier below",
                rarity
            );
            last = m;
        }
        assert_eq!(Rarity::Common.multiplier(), 1.0);
        assert_eq!(Rarity::Legendary.multiplier(), 3.0);
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn test_class_restriction() {
        let item = sword();
        assert!(item.usable_by("Warrior"));
        assert!(!item.usable_by("Mage"));
    }

    #[test]
    fn test_unrestricted_item_usable_by_anyone() {
        let mut item = sword();
        item.allowed_classes = None;
        assert!(item.usable_by("Novice"));
        assert!(item.usable_by("Mage"));
    }
}
