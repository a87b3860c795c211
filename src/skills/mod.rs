//! Sword skill state machines
//!
//! Every skill is a small state machine: INACTIVE until an activation
//! request passes its guards, ACTIVE while a countdown runs, back to
//! INACTIVE at zero (or at an early-exit boundary). Double-tap skills
//! track an auxiliary ARMED window on a separate short timer.

pub mod armor_break;
pub mod basic_technique;
pub mod combo;
pub mod definition;
pub mod instance;
pub mod mortal_draw;
pub mod sword_beam;
pub mod sword_break;

pub use armor_break::ArmorBreak;
pub use basic_technique::BasicTechnique;
pub use combo::{Combo, ComboHit};
pub use definition::{SkillDefinition, SkillKind};
pub use instance::SkillInstance;
pub use mortal_draw::MortalDraw;
pub use sword_beam::SwordBeam;
pub use sword_break::SwordBreak;
