use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::combat::types::CombatResult;

/// A matchmaking listing entry: identity plus the display-only numbers the
/// caller renders next to each candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpponentListing {
    pub id: Uuid,
    pub name: String,
    pub level: u32,
    pub mmr: i32,
    /// Display-only aggregate, distinct from MMR.
    pub combat_score: i64,
}

/// Everything the calling layer persists after a resolved match. Both
/// characters must be persisted as one transactional unit.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub winner_id: Uuid,
    pub initiator_won: bool,
    pub initiator_mmr_delta: i32,
    pub opponent_mmr_delta: i32,
    pub combat: CombatResult,
}
