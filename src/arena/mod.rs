//! Arena: rating-banded opponent discovery and the match resolution
//! protocol with flat MMR swings.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
