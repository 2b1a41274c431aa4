//! The engine's view of a character.
//!
//! The calling layer owns character lifetime and persistence; the engine
//! receives mutable snapshots, mutates them, and returns results. Every
//! field that the original data model back-filled lazily gets an explicit
//! default in `Character::new`.

use std::collections::VecDeque;

use chrono::{DateTime, NaiveTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::balance::*;
use crate::error::EngineError;
use crate::items::{EquipSlot, OwnedItem};
use crate::quests::types::{ActiveQuest, QuestPools};
use crate::rules::GameRules;

/// Equipped items by slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Equipment {
    pub weapon: Option<OwnedItem>,
    pub armor: Option<OwnedItem>,
    pub helmet: Option<OwnedItem>,
    pub boots: Option<OwnedItem>,
    pub amulet: Option<OwnedItem>,
}

impl Equipment {
    pub fn get(&self, slot: EquipSlot) -> Option<&OwnedItem> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Helmet => self.helmet.as_ref(),
            EquipSlot::Boots => self.boots.as_ref(),
            EquipSlot::Amulet => self.amulet.as_ref(),
        }
    }

    /// Places an item in a slot, returning the previous occupant.
    pub fn set(&mut self, slot: EquipSlot, item: OwnedItem) -> Option<OwnedItem> {
        self.slot_mut(slot).replace(item)
    }

    pub fn clear(&mut self, slot: EquipSlot) -> Option<OwnedItem> {
        self.slot_mut(slot).take()
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<OwnedItem> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Helmet => &mut self.helmet,
            EquipSlot::Boots => &mut self.boots,
            EquipSlot::Amulet => &mut self.amulet,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OwnedItem> {
        EquipSlot::all().into_iter().filter_map(|slot| self.get(slot))
    }
}

/// What a history entry records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HistoryKind {
    Quest,
    Arena,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
    Completed,
}

/// One combat or quest outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub kind: HistoryKind,
    /// Quest name, or the opponent's name for arena matches.
    pub name: String,
    pub outcome: Outcome,
    pub player_hp: u32,
    pub opponent_hp: u32,
    pub opponent: Option<String>,
    /// Signed rating change, arena entries only.
    pub mmr_delta: Option<i32>,
    pub timestamp: i64,
}

/// Bounded outcome log: pushing past capacity evicts the oldest entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() >= HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }
}

/// A capped daily counter with lazy reset at UTC midnight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyCounter {
    pub count: u32,
    /// Timestamp of the last reset (or creation).
    pub reset_at: i64,
}

impl DailyCounter {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            count: 0,
            reset_at: now.timestamp(),
        }
    }

    /// Resets the counter if the stored stamp predates the current UTC
    /// day's midnight. A stamp of exactly midnight does not reset.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc().timestamp();
        if self.reset_at < midnight {
            self.count = 0;
            self.reset_at = now.timestamp();
        }
    }
}

/// The XP required to advance from `level` to `level + 1`.
pub fn xp_threshold(level: u32) -> u64 {
    XP_THRESHOLD_BASE + (level.saturating_sub(1) as u64) * XP_THRESHOLD_PER_LEVEL
}

/// A character snapshot as the engine sees it. Created, persisted, and
/// deleted by the calling layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    pub class_name: String,
    pub level: u32,
    pub xp: u64,
    pub gold: u64,
    /// 0..=100; regeneration happens outside the engine.
    pub energy: u32,
    pub equipment: Equipment,
    pub inventory: Vec<OwnedItem>,
    pub quest_pools: QuestPools,
    pub active_quest: Option<ActiveQuest>,
    pub mmr: i32,
    pub wins: u32,
    pub losses: u32,
    /// Set once the character has fought in the arena; gates opponent pools.
    pub arena_entered: bool,
    pub daily_fights: DailyCounter,
    pub daily_refreshes: DailyCounter,
    pub history: HistoryLog,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        class_name: impl Into<String>,
        rules: &GameRules,
        now: DateTime<Utc>,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            class_name: class_name.into(),
            level: 1,
            xp: 0,
            gold: 0,
            energy: MAX_ENERGY,
            equipment: Equipment::default(),
            inventory: Vec::new(),
            quest_pools: QuestPools::roll(rules, rng),
            active_quest: None,
            mmr: rules.arena.starting_mmr,
            wins: 0,
            losses: 0,
            arena_entered: false,
            daily_fights: DailyCounter::new(now),
            daily_refreshes: DailyCounter::new(now),
            history: HistoryLog::default(),
        }
    }

    /// Applies an XP grant and cascades level-ups while the running total
    /// clears the threshold. Returns the number of levels gained.
    pub fn grant_xp(&mut self, amount: u64) -> u32 {
        self.xp += amount;

        let mut levels = 0;
        while self.xp >= xp_threshold(self.level) {
            self.xp -= xp_threshold(self.level);
            self.level += 1;
            levels += 1;
        }

        if levels > 0 {
            debug!(character = %self.name, level = self.level, levels, "level up");
        }
        levels
    }

    pub fn spend_energy(&mut self, cost: u32) -> Result<(), EngineError> {
        if self.energy < cost {
            return Err(EngineError::InsufficientEnergy);
        }
        self.energy -= cost;
        Ok(())
    }

    pub fn inventory_has_room(&self, rules: &GameRules) -> bool {
        self.inventory.len() < rules.inventory_capacity
    }

    /// Equips the inventory item at `index`, swapping out any current slot
    /// occupant. Honors the template's class restriction.
    pub fn equip(&mut self, rules: &GameRules, index: usize) -> Result<(), EngineError> {
        let owned = *self.inventory.get(index).ok_or(EngineError::UnknownItem)?;
        let item = rules.item(owned.item_id).ok_or(EngineError::UnknownItem)?;
        if !item.usable_by(&self.class_name) {
            return Err(EngineError::ClassRestricted);
        }

        self.inventory.remove(index);
        if let Some(previous) = self.equipment.set(item.slot, owned) {
            self.inventory.push(previous);
        }
        Ok(())
    }

    /// Moves the item in `slot` back to the inventory.
    pub fn unequip(&mut self, rules: &GameRules, slot: EquipSlot) -> Result<(), EngineError> {
        if self.equipment.get(slot).is_none() {
            return Err(EngineError::UnknownItem);
        }
        if !self.inventory_has_room(rules) {
            return Err(EngineError::InventoryFull);
        }
        if let Some(owned) = self.equipment.clear(slot) {
            self.inventory.push(owned);
        }
        Ok(())
    }
}
