use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::stats::CharacterStats;

/// One side of a battle: a display name plus a frozen stat block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Combatant {
    pub name: String,
    pub stats: CharacterStats,
}

impl Combatant {
    pub fn new(name: impl Into<String>, stats: CharacterStats) -> Self {
        Self {
            name: name.into(),
            stats,
        }
    }
}

/// Which argument of `simulate` a result refers to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CombatSide {
    Attacker,
    Defender,
}

/// Outcome of a fully resolved battle. Ephemeral: produced and consumed
/// within a single request, persisted only as a history entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombatResult {
    pub winner: CombatSide,
    pub rounds: u32,
    pub attacker_hp: u32,
    pub defender_hp: u32,
    /// One line per round, plus opening and closing lines.
    pub log: Vec<String>,
}

impl CombatResult {
    pub fn attacker_won(&self) -> bool {
        self.winner == CombatSide::Attacker
    }
}

/// Flavor name for generated quest enemies.
pub fn generate_enemy_name(rng: &mut impl Rng) -> String {
    let prefixes = [
        "Grizz", "Sav", "Dark", "Blood", "Bone", "Shadow", "Fel", "Dire", "Wild", "Grim",
    ];
    let roots = [
        "led", "age", "en", "tooth", "claw", "fang", "heart", "eye", "maw", "tail",
    ];
    let suffixes = [
        "Orc", "Troll", "Drake", "Crusher", "Render", "Maw", "Beast", "Fiend", "Horror", "Terror",
    ];

    let prefix = prefixes[rng.gen_range(0..prefixes.len())];
    let root = roots[rng.gen_range(0..roots.len())];
    let suffix = suffixes[rng.gen_range(0..suffixes.len())];

    format!("{}{} {}", prefix, root, suffix)
}
