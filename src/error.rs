//! Domain error taxonomy for the engine.
//!
//! Every variant is an expected, recoverable condition with a stable message
//! the calling layer surfaces verbatim. Non-domain failures (storage,
//! malformed static tables) are the caller's concern; the engine assumes
//! well-formed input.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("not enough energy to start this quest")]
    InsufficientEnergy,

    #[error("a quest is already in progress")]
    QuestAlreadyActive,

    #[error("no quest is in progress")]
    NoActiveQuest,

    #[error("no opponent refreshes remaining today")]
    NoRefreshesRemaining,

    #[error("daily arena fight limit reached")]
    DailyFightLimitReached,

    #[error("you cannot fight yourself")]
    CannotFightSelf,

    #[error("no opponents available")]
    NoOpponents,

    #[error("inventory is full")]
    InventoryFull,

    #[error("item does not exist")]
    UnknownItem,

    #[error("this class cannot use that item")]
    ClassRestricted,
}
