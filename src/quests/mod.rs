//! Quest lifecycle: templates, pools, and the Idle -> Active -> Idle
//! state machine with energy-gated, time-delayed rewards.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
