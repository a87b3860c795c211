//! Skill identities and leveled definitions
//!
//! A `SkillDefinition` is immutable: every attribute is a pure function of
//! the level, and leveling up replaces the definition (and the instance
//! built from it) rather than mutating in place.

use crate::core::error::SkillsError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identity tag for every skill the engine knows about
///
/// Runtime dispatch keys off this tag (no trait objects, no downcasting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    /// Basic sword technique; owns the player's combo accumulator
    BasicTechnique,
    /// Fierce parry that damages the attacker's weapon
    SwordBreak,
    /// Ranged beam fired from the sword tip
    SwordBeam,
    /// Charged strike that bypasses armor entirely
    ArmorBreak,
    /// Lightning draw from an empty hand
    MortalDraw,
}

impl SkillKind {
    /// Fixed iteration order for per-tick updates and uniform loot picks
    ///
    /// Per-player skill updates always walk this array, never raw map
    /// order, so a given player's transitions are deterministic.
    pub const ALL: [SkillKind; 5] = [
        SkillKind::BasicTechnique,
        SkillKind::SwordBreak,
        SkillKind::SwordBeam,
        SkillKind::ArmorBreak,
        SkillKind::MortalDraw,
    ];

    /// Stable numeric id (save data, orb item metadata)
    pub fn id(&self) -> u8 {
        match self {
            SkillKind::BasicTechnique => 0,
            SkillKind::SwordBreak => 1,
            SkillKind::SwordBeam => 2,
            SkillKind::ArmorBreak => 3,
            SkillKind::MortalDraw => 4,
        }
    }

    pub fn from_id(id: u8) -> Option<SkillKind> {
        SkillKind::ALL.into_iter().find(|k| k.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SkillKind::BasicTechnique => "Basic Technique",
            SkillKind::SwordBreak => "Sword Break",
            SkillKind::SwordBeam => "Sword Beam",
            SkillKind::ArmorBreak => "Armor Break",
            SkillKind::MortalDraw => "Mortal Draw",
        }
    }

    /// Does activation of this skill require the double-tap handshake?
    pub fn uses_double_tap(&self) -> bool {
        matches!(self, SkillKind::SwordBreak)
    }
}

impl FromStr for SkillKind {
    type Err = SkillsError;

    /// Parse the snake_case name used in drop tables and save data
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic_technique" => Ok(SkillKind::BasicTechnique),
            "sword_break" => Ok(SkillKind::SwordBreak),
            "sword_beam" => Ok(SkillKind::SwordBeam),
            "armor_break" => Ok(SkillKind::ArmorBreak),
            "mortal_draw" => Ok(SkillKind::MortalDraw),
            _ => Err(SkillsError::UnknownSkill(s.to_string())),
        }
    }
}

/// Immutable identity + level of a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDefinition {
    kind: SkillKind,
    level: u8,
}

impl SkillDefinition {
    /// Create a definition, clamping the level to `max_level`
    pub fn new(kind: SkillKind, level: u8, max_level: u8) -> Self {
        Self {
            kind,
            level: level.min(max_level),
        }
    }

    pub fn kind(&self) -> SkillKind {
        self.kind
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Copy-on-level: returns a NEW definition at the given level
    pub fn leveled(&self, level: u8, max_level: u8) -> Self {
        Self::new(self.kind, level, max_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for kind in SkillKind::ALL {
            assert_eq!(SkillKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(SkillKind::from_id(200), None);
    }

    #[test]
    fn test_parse_snake_case_names() {
        assert_eq!("sword_break".parse::<SkillKind>().unwrap(), SkillKind::SwordBreak);
        assert_eq!("mortal_draw".parse::<SkillKind>().unwrap(), SkillKind::MortalDraw);
        assert!(matches!(
            "spin_attack".parse::<SkillKind>(),
            Err(SkillsError::UnknownSkill(name)) if name == "spin_attack"
        ));
    }

    #[test]
    fn test_level_clamped_to_max() {
        let def = SkillDefinition::new(SkillKind::SwordBreak, 9, 5);
        assert_eq!(def.level(), 5);
    }

    #[test]
    fn test_leveled_does_not_mutate() {
        let def = SkillDefinition::new(SkillKind::SwordBeam, 1, 5);
        let up = def.leveled(2, 5);
        assert_eq!(def.level(), 1);
        assert_eq!(up.level(), 2);
        assert_eq!(up.kind(), SkillKind::SwordBeam);
    }
}
