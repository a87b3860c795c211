//! Basic Technique - foundational swordsmanship; owns the combo accumulator
//!
//! The combo is exclusively owned by this skill. Other code reaches it
//! through the player state's registry lookup and only reads; mutation
//! happens via the bookkeeping hooks here.

use crate::core::config::CombatConfig;
use crate::skills::combo::Combo;
use crate::skills::definition::SkillDefinition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicTechnique {
    def: SkillDefinition,
    /// Present once the player has opened a combo at least once
    combo: Option<Combo>,
    /// Ticks left before an in-progress combo times out
    combo_timer: u32,
}

impl BasicTechnique {
    pub fn new(def: SkillDefinition) -> Self {
        Self {
            def,
            combo: None,
            combo_timer: 0,
        }
    }

    pub fn def(&self) -> SkillDefinition {
        self.def
    }

    /// Hits a combo can hold before it finishes on its own
    pub fn max_combo_size(&self) -> usize {
        2 + usize::from(self.def.level())
    }

    /// Ticks allowed between hits before the combo times out
    pub fn combo_time_limit(&self) -> u32 {
        20 + 2 * u32::from(self.def.level())
    }

    /// Opening a stance costs nothing
    pub fn exhaustion(&self) -> f32 {
        0.0
    }

    pub fn combo(&self) -> Option<&Combo> {
        self.combo.as_ref()
    }

    pub fn is_combo_in_progress(&self) -> bool {
        self.combo.as_ref().map(Combo::is_in_progress).unwrap_or(false)
    }

    /// "Active" while a combo is being chained
    pub fn is_active(&self) -> bool {
        self.is_combo_in_progress()
    }

    pub fn can_use(&self, holds_sword: bool) -> bool {
        holds_sword
    }

    /// Open a fresh combo, replacing any finished one
    pub(crate) fn activate(&mut self) -> bool {
        self.combo = Some(Combo::new(self.max_combo_size()));
        self.combo_timer = self.combo_time_limit();
        true
    }

    pub(crate) fn deactivate(&mut self) {
        self.end_combo();
    }

    pub(crate) fn update(&mut self) {
        if self.is_combo_in_progress() {
            self.combo_timer = self.combo_timer.saturating_sub(1);
            if self.combo_timer == 0 {
                self.end_combo();
            }
        }
    }

    /// The owner landed a hit for `damage`; extends (or opens) the combo
    pub(crate) fn on_hurt_target(&mut self, damage: f32) {
        if !self.is_combo_in_progress() {
            self.combo = Some(Combo::new(self.max_combo_size()));
        }
        if let Some(combo) = self.combo.as_mut() {
            combo.add_hit(damage);
        }
        self.combo_timer = self.combo_time_limit();
    }

    /// The owner took a hit; heavy damage breaks the chain
    pub(crate) fn on_player_hurt(&mut self, damage: f32, config: &CombatConfig) {
        if damage > config.combo_break_damage {
            self.end_combo();
        }
    }

    pub(crate) fn end_combo(&mut self) {
        if let Some(combo) = self.combo.as_mut() {
            combo.end();
        }
        self.combo_timer = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::definition::SkillKind;

    fn skill(level: u8) -> BasicTechnique {
        BasicTechnique::new(SkillDefinition::new(SkillKind::BasicTechnique, level, 5))
    }

    #[test]
    fn test_hits_open_and_extend_combo() {
        let mut bt = skill(3);
        assert!(!bt.is_combo_in_progress());
        bt.on_hurt_target(4.0);
        bt.on_hurt_target(5.0);
        assert!(bt.is_combo_in_progress());
        assert_eq!(bt.combo().unwrap().hit_count(), 2);
    }

    #[test]
    fn test_combo_times_out() {
        let mut bt = skill(0); // 20-tick limit
        bt.on_hurt_target(1.0);
        for _ in 0..19 {
            bt.update();
            assert!(bt.is_combo_in_progress());
        }
        bt.update();
        assert!(!bt.is_combo_in_progress());
        // History remains readable after the chain ends
        assert_eq!(bt.combo().unwrap().hit_count(), 1);
    }

    #[test]
    fn test_heavy_hit_breaks_combo_chip_damage_does_not() {
        let config = CombatConfig::default();
        let mut bt = skill(1);
        bt.on_hurt_target(3.0);

        bt.on_player_hurt(config.combo_break_damage, &config);
        assert!(bt.is_combo_in_progress());

        bt.on_player_hurt(config.combo_break_damage + 0.1, &config);
        assert!(!bt.is_combo_in_progress());
    }

    #[test]
    fn test_size_cap_scales_with_level() {
        let mut bt = skill(0); // cap 2
        bt.on_hurt_target(1.0);
        bt.on_hurt_target(1.0);
        assert!(!bt.is_combo_in_progress());
        assert_eq!(bt.combo().unwrap().hit_count(), 2);
    }
}
