//! Questforge - Progression & Combat Engine
//!
//! A pure computation library for a quest-driven RPG backend: the stat
//! model, the turn-based combat simulator, the quest lifecycle state
//! machine, arena matchmaking with flat-delta rating updates, and the
//! weighted rarity distribution behind loot rolls.
//!
//! The engine performs no I/O and holds no storage: the calling layer
//! loads character snapshots, supplies wall-clock time and a random
//! source, invokes an operation, and persists the mutated snapshot. All
//! static tables (classes, quests, items, rarity increments) are injected
//! through [`rules::GameRules`].

pub mod arena;
pub mod balance;
pub mod character;
pub mod combat;
pub mod error;
pub mod items;
pub mod loot;
pub mod quests;
pub mod rules;
pub mod stats;

pub use arena::{
    find_ranked_opponent, list_opponents, refresh_opponents, resolve_match, MatchReport,
    OpponentListing,
};
pub use character::{Character, DailyCounter, Equipment, HistoryEntry, HistoryLog, Outcome};
pub use combat::{simulate, CombatResult, CombatSide, Combatant};
pub use error::EngineError;
pub use items::{EquipSlot, Item, OwnedItem, Rarity};
pub use loot::{distribution, weighted_pick, RarityWeights};
pub use quests::{
    cancel_quest, poll_quest, start_quest, ActiveQuest, CompletionReport, LootOutcome, QuestPools,
    QuestStatus, QuestTemplate, RiskPath,
};
pub use rules::GameRules;
pub use stats::{combat_score, effective_stats, stats_for_class, CharacterStats, ClassDefinition};
