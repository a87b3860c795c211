//! Armor Break - a charged strike that bypasses armor entirely
//!
//! While the window is open, the owner's next outgoing damage event is
//! consumed whole: the normal damage pipeline is canceled and replaced
//! with an armor-ignoring strike for the same (combo-boosted) amount.
//! Interception ends the window immediately.

use crate::combat::effects::{Effect, SoundCue};
use crate::combat::events::DamageEvent;
use crate::combat::view::PlayerView;
use crate::skills::definition::SkillDefinition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorBreak {
    def: SkillDefinition,
    /// Ticks remaining in which the next strike pierces armor
    active_timer: u32,
}

impl ArmorBreak {
    pub fn new(def: SkillDefinition) -> Self {
        Self {
            def,
            active_timer: 0,
        }
    }

    pub fn def(&self) -> SkillDefinition {
        self.def
    }

    pub fn active_time(&self) -> u32 {
        4 + u32::from(self.def.level())
    }

    pub fn exhaustion(&self) -> f32 {
        4.0 - 0.2 * f32::from(self.def.level())
    }

    pub fn is_active(&self) -> bool {
        self.active_timer > 0
    }

    pub fn can_use(&self, view: &PlayerView) -> bool {
        !self.is_active() && view.holds_weapon()
    }

    pub(crate) fn activate(&mut self) -> bool {
        self.active_timer = self.active_time();
        self.is_active()
    }

    pub(crate) fn deactivate(&mut self) {
        self.active_timer = 0;
    }

    pub(crate) fn update(&mut self) {
        if self.active_timer > 0 {
            self.active_timer -= 1;
        }
    }

    /// Fully intercept the outgoing damage event
    ///
    /// The pre-cancel amount (combo bonus included) is re-issued as
    /// armor-piercing damage; the intercepted event applies nothing.
    pub(crate) fn on_impact(&mut self, event: &mut DamageEvent, effects: &mut Vec<Effect>) {
        let amount = event.amount();
        event.cancel();
        effects.push(Effect::PlaySound(SoundCue::ArmorCrack));
        effects.push(Effect::ArmorPiercingDamage {
            source: event.source,
            target: event.target,
            amount,
        });
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EntityId;
    use crate::skills::definition::SkillKind;

    fn skill(level: u8) -> ArmorBreak {
        ArmorBreak::new(SkillDefinition::new(SkillKind::ArmorBreak, level, 5))
    }

    #[test]
    fn test_window_opens_and_decays() {
        let mut ab = skill(1);
        assert!(ab.activate());
        for _ in 0..5 {
            assert!(ab.is_active());
            ab.update();
        }
        assert!(!ab.is_active());
    }

    #[test]
    fn test_interception_consumes_event_and_window() {
        let mut ab = skill(1);
        ab.activate();
        let mut event = DamageEvent::new(EntityId::new(), EntityId::new(), 9.5);
        let mut effects = Vec::new();
        ab.on_impact(&mut event, &mut effects);

        assert!(event.is_canceled());
        assert_eq!(event.final_amount(), 0.0);
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::ArmorPiercingDamage { amount, .. } if *amount == 9.5)));
        assert!(!ab.is_active());
    }
}
