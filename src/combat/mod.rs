//! Turn-based combat: combatant types and the battle simulator.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
