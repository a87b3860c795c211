//! Combat engine configuration with documented constants
//!
//! All tuning values are collected here with explanations of their purpose
//! and how they interact with each other. The config is injected into the
//! dispatcher rather than read from a global, so tests can tune gates freely.

use crate::core::error::{Result, SkillsError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the skill and loot systems
///
/// These values have been tuned for the default balance. Changing them
/// affects pacing (cooldowns, activation windows) and drop rarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === SKILLS ===
    /// Maximum skill level (levels run 0..=max_skill_level, at most 10)
    ///
    /// A freshly learned skill starts at level 0; orbs raise it from there.
    /// The per-level cooldown formulas reach zero at level 10, so higher
    /// maxima are rejected by `validate()`.
    pub max_skill_level: u8,

    /// Attack-time cooldown (ticks) set after each swing
    ///
    /// Acts as left-click anti-spam; skills that count as a swing
    /// (e.g. the sword beam) set their own, longer cooldown.
    pub base_swing_speed: u32,

    /// Whether timed-input skills require a double tap to activate
    ///
    /// When true, the first activation request only opens the armed
    /// window; a second request inside the window activates.
    pub require_double_tap: bool,

    /// Ticks the armed (double-tap) window stays open
    pub double_tap_window: u32,

    /// Damage above which a hit ends the victim's combo
    ///
    /// Chip damage at or below this keeps an in-progress combo alive.
    pub combo_break_damage: f32,

    /// Per-level widening of the sword beam's missing-health allowance
    ///
    /// At level L the beam may be fired with up to `L * health_allowance_step`
    /// health missing. Level 1 is therefore nearly-full-health only.
    pub health_allowance_step: f32,

    // === LOOT ===
    /// Whether skill orbs drop from mobs at all
    pub orb_drops_enabled: bool,

    /// Whether player victims can drop orbs (PvP servers)
    pub player_drops_enabled: bool,

    /// Probability that a mapped mob's fixed orb is bypassed
    /// in favour of a uniform random pick
    ///
    /// At 0.0 mapped mobs always drop their signature orb type;
    /// at 1.0 the fixed mapping is never consulted.
    pub chance_for_random_drop: f32,

    /// Probability that an unmapped mob attempts a random orb drop
    pub random_mob_drop_chance: f32,

    /// Multiplier applied to `random_mob_drop_chance` for player victims
    pub player_drop_factor: f32,

    /// Base probability that a selected orb is actually granted
    ///
    /// This is the second gate: it tunes overall drop rarity
    /// independently of which orb type was selected.
    pub base_orb_drop_chance: f32,

    /// Additional grant probability per looting/bonus level on the kill
    pub looting_bonus_per_level: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            // Skills
            max_skill_level: 5,
            base_swing_speed: 4,
            require_double_tap: true,
            double_tap_window: 6,
            combo_break_damage: 0.5,
            health_allowance_step: 3.0,

            // Loot (two-stage gate: selection, then grant)
            orb_drops_enabled: true,
            player_drops_enabled: false,
            chance_for_random_drop: 0.1,
            random_mob_drop_chance: 0.025,
            player_drop_factor: 5.0,
            base_orb_drop_chance: 0.1,
            looting_bonus_per_level: 0.005,
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_skill_level == 0 {
            return Err(SkillsError::InvalidConfig(
                "max_skill_level must be at least 1".into(),
            ));
        }
        if self.max_skill_level > 10 {
            return Err(SkillsError::InvalidConfig(format!(
                "max_skill_level ({}) must be at most 10",
                self.max_skill_level
            )));
        }

        if self.double_tap_window == 0 && self.require_double_tap {
            return Err(SkillsError::InvalidConfig(
                "double_tap_window must be nonzero when require_double_tap is set".into(),
            ));
        }

        for (name, p) in [
            ("chance_for_random_drop", self.chance_for_random_drop),
            ("random_mob_drop_chance", self.random_mob_drop_chance),
            ("base_orb_drop_chance", self.base_orb_drop_chance),
            ("looting_bonus_per_level", self.looting_bonus_per_level),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SkillsError::InvalidConfig(format!(
                    "{} ({}) must be within [0, 1]",
                    name, p
                )));
            }
        }

        if self.player_drop_factor < 0.0 {
            return Err(SkillsError::InvalidConfig(format!(
                "player_drop_factor ({}) must be non-negative",
                self.player_drop_factor
            )));
        }

        if self.combo_break_damage < 0.0 || self.health_allowance_step < 0.0 {
            return Err(SkillsError::InvalidConfig(
                "damage thresholds must be non-negative".into(),
            ));
        }

        Ok(())
    }

    /// Parse a config from TOML text; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CombatConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_max_level_beyond_formula_range() {
        let mut config = CombatConfig::default();
        config.max_skill_level = 30;
        assert!(config.validate().is_err());

        config.max_skill_level = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_probability_out_of_range() {
        let mut config = CombatConfig::default();
        config.base_orb_drop_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_armed_window() {
        let mut config = CombatConfig::default();
        config.double_tap_window = 0;
        assert!(config.validate().is_err());

        // Fine when double tap is disabled entirely
        config.require_double_tap = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = CombatConfig::from_toml_str(
            r#"
            base_swing_speed = 10
            player_drops_enabled = true
            "#,
        )
        .unwrap();
        assert_eq!(config.base_swing_speed, 10);
        assert!(config.player_drops_enabled);
        // Untouched keys keep their defaults
        assert_eq!(config.max_skill_level, 5);
    }

    #[test]
    fn test_toml_rejects_invalid_values() {
        assert!(CombatConfig::from_toml_str("chance_for_random_drop = 2.0").is_err());
    }
}
