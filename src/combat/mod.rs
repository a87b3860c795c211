//! Combat event routing and per-player combat state

pub mod dispatcher;
pub mod effects;
pub mod events;
pub mod loot;
pub mod registry;
pub mod state;
pub mod view;

pub use dispatcher::{ActivationOutcome, CombatDispatcher};
pub use effects::{Effect, SoundCue};
pub use events::{AttackEvent, DamageEvent};
pub use loot::{resolve_orb_drop, DeathEvent, DropTable, MobKind};
pub use registry::SkillRegistry;
pub use state::PlayerCombatState;
pub use view::{HeldItem, PlayerView};
