pub mod config;
pub mod error;
pub mod types;

pub use config::CombatConfig;
pub use error::{Result, SkillsError};
pub use types::{EntityId, Tick};
