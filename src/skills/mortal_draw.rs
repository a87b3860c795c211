//! Mortal Draw - a lightning draw from an empty hand
//!
//! Activated only while the main hand is empty. While the draw window is
//! open, the owner's next outgoing damage event is amplified (the event
//! is modified, never consumed); landing the draw closes the window.

use crate::combat::effects::{Effect, SoundCue};
use crate::combat::events::DamageEvent;
use crate::combat::view::PlayerView;
use crate::skills::definition::SkillDefinition;
use serde::{Deserialize, Serialize};

/// Flat damage added on top of the level-scaled amplification
const DRAW_BONUS: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalDraw {
    def: SkillDefinition,
    /// Ticks remaining in which a strike counts as the draw
    draw_timer: u32,
}

impl MortalDraw {
    pub fn new(def: SkillDefinition) -> Self {
        Self { def, draw_timer: 0 }
    }

    pub fn def(&self) -> SkillDefinition {
        self.def
    }

    pub fn active_time(&self) -> u32 {
        3 + u32::from(self.def.level())
    }

    pub fn exhaustion(&self) -> f32 {
        3.0 - 0.2 * f32::from(self.def.level())
    }

    pub fn is_active(&self) -> bool {
        self.draw_timer > 0
    }

    pub fn can_use(&self, view: &PlayerView) -> bool {
        !self.is_active() && view.held_item.is_none()
    }

    pub(crate) fn activate(&mut self) -> bool {
        self.draw_timer = self.active_time();
        self.is_active()
    }

    pub(crate) fn deactivate(&mut self) {
        self.draw_timer = 0;
    }

    pub(crate) fn update(&mut self) {
        if self.draw_timer > 0 {
            self.draw_timer -= 1;
        }
    }

    /// Bonus damage for a strike of the given base amount
    pub fn damage_bonus(&self, amount: f32) -> f32 {
        amount * 0.1 * f32::from(self.def.level()) + DRAW_BONUS
    }

    /// Amplify the outgoing damage event without consuming it
    pub(crate) fn on_impact(&mut self, event: &mut DamageEvent, effects: &mut Vec<Effect>) {
        let bonus = self.damage_bonus(event.amount());
        event.add_amount(bonus);
        effects.push(Effect::PlaySound(SoundCue::Whoosh));
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EntityId;
    use crate::skills::definition::SkillKind;

    fn skill(level: u8) -> MortalDraw {
        MortalDraw::new(SkillDefinition::new(SkillKind::MortalDraw, level, 5))
    }

    #[test]
    fn test_requires_empty_hand() {
        let md = skill(1);
        assert!(!md.can_use(&PlayerView::swordsman()));
        assert!(md.can_use(&PlayerView::unarmed()));
    }

    #[test]
    fn test_draw_amplifies_without_canceling() {
        let mut md = skill(2);
        md.activate();
        let mut event = DamageEvent::new(EntityId::new(), EntityId::new(), 10.0);
        let mut effects = Vec::new();
        md.on_impact(&mut event, &mut effects);

        // 10 + (10 * 0.2 + 2.0) = 14
        assert!((event.amount() - 14.0).abs() < 1e-6);
        assert!(!event.is_canceled());
        assert!(!md.is_active());
    }

    #[test]
    fn test_window_decays() {
        let mut md = skill(0);
        md.activate();
        for _ in 0..3 {
            assert!(md.is_active());
            md.update();
        }
        assert!(!md.is_active());
    }
}
