use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::balance::QUEST_TIERS;
use crate::combat::types::Combatant;
use crate::rules::GameRules;

/// Quest risk category: safe quests always pay out, risky quests gate
/// the reward behind a combat win.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskPath {
    Safe,
    Risky,
}

impl RiskPath {
    pub fn all() -> [RiskPath; 2] {
        [RiskPath::Safe, RiskPath::Risky]
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskPath::Safe => "safe",
            RiskPath::Risky => "risky",
        }
    }
}

/// Static quest definition, supplied externally through `GameRules`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestTemplate {
    /// Difficulty/reward bracket within the path, 1..=3.
    pub tier: u8,
    pub name: String,
    pub duration_secs: i64,
    pub energy_cost: u32,
    pub xp_reward: u64,
    pub gold_reward: u64,
    pub is_combat: bool,
    /// Raises the loot roll success chance on completion.
    pub rare_loot: bool,
    pub path: RiskPath,
}

/// A character's in-flight quest: reward fields snapshotted at start, plus
/// a frozen enemy stat block when the quest is combat-flavored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveQuest {
    pub name: String,
    pub tier: u8,
    pub path: RiskPath,
    pub duration_secs: i64,
    pub xp_reward: u64,
    pub gold_reward: u64,
    pub is_combat: bool,
    pub rare_loot: bool,
    pub started_at: i64,
    pub enemy: Option<Combatant>,
}

impl ActiveQuest {
    pub fn from_template(template: &QuestTemplate, started_at: i64, enemy: Option<Combatant>) -> Self {
        Self {
            name: template.name.clone(),
            tier: template.tier,
            path: template.path,
            duration_secs: template.duration_secs,
            xp_reward: template.xp_reward,
            gold_reward: template.gold_reward,
            is_combat: template.is_combat,
            rare_loot: template.rare_loot,
            started_at,
            enemy,
        }
    }
}

/// Per-character quest slots: one available quest per tier per path,
/// refilled from the same tier's table whenever a quest completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuestPools {
    pub safe: Vec<QuestTemplate>,
    pub risky: Vec<QuestTemplate>,
}

impl QuestPools {
    /// Populates every slot with a uniformly random pick from its tier's
    /// table.
    pub fn roll(rules: &GameRules, rng: &mut impl Rng) -> Self {
        let mut pools = Self::default();
        for path in RiskPath::all() {
            for tier in 1..=QUEST_TIERS {
                if let Some(template) = rules.quests_for(path, tier).choose(rng) {
                    pools.path_mut(path).push((*template).clone());
                }
            }
        }
        pools
    }

    pub fn path(&self, path: RiskPath) -> &[QuestTemplate] {
        match path {
            RiskPath::Safe => &self.safe,
            RiskPath::Risky => &self.risky,
        }
    }

    fn path_mut(&mut self, path: RiskPath) -> &mut Vec<QuestTemplate> {
        match path {
            RiskPath::Safe => &mut self.safe,
            RiskPath::Risky => &mut self.risky,
        }
    }

    pub fn slot(&self, path: RiskPath, tier: u8) -> Option<&QuestTemplate> {
        self.path(path).iter().find(|t| t.tier == tier)
    }

    /// Swaps the slot for `path`/`tier` with a replacement template.
    pub fn replace(&mut self, path: RiskPath, tier: u8, template: QuestTemplate) {
        let slots = self.path_mut(path);
        if let Some(slot) = slots.iter_mut().find(|t| t.tier == tier) {
            *slot = template;
        } else {
            slots.push(template);
        }
    }
}
