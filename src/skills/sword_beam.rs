//! Sword Beam - shoot a beam of energy from the sword tip
//!
//! Only usable near full health (the allowance widens with level) and
//! from a crouched stance on the ground. The skill is never "active" in
//! the registry sense; it only keeps a miss timer so that a beam that
//! strikes nothing ends the shooter's combo.

use crate::combat::effects::{Effect, SoundCue};
use crate::combat::view::PlayerView;
use crate::core::config::CombatConfig;
use crate::core::types::EntityId;
use crate::skills::definition::SkillDefinition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwordBeam {
    def: SkillDefinition,
    /// Ticks until the beam is considered to have missed
    miss_timer: u32,
}

impl SwordBeam {
    pub fn new(def: SkillDefinition) -> Self {
        Self { def, miss_timer: 0 }
    }

    pub fn def(&self) -> SkillDefinition {
        self.def
    }

    pub fn exhaustion(&self) -> f32 {
        2.0 - 0.1 * f32::from(self.def.level())
    }

    /// Percent of base attack damage the beam inflicts
    pub fn damage_factor(&self) -> u32 {
        30 + 10 * u32::from(self.def.level())
    }

    /// Beam flight range in blocks
    pub fn beam_range(&self) -> u32 {
        12 + u32::from(self.def.level())
    }

    /// Swing cooldown charged after firing; zero from level 20 up
    pub fn attack_cooldown(&self) -> u32 {
        20u32.saturating_sub(u32::from(self.def.level()))
    }

    /// Beam damage derived from the player's base attack damage
    pub fn beam_damage(&self, view: &PlayerView) -> f32 {
        self.damage_factor() as f32 * 0.01 * view.attack_damage
    }

    /// Missing health allowed before the skill refuses to fire
    pub fn health_allowance(&self, config: &CombatConfig) -> f32 {
        config.health_allowance_step * f32::from(self.def.level())
    }

    /// The beam leaves no active window behind
    pub fn is_active(&self) -> bool {
        false
    }

    pub fn can_use(&self, view: &PlayerView, config: &CombatConfig, can_attack: bool) -> bool {
        let healthy = view.creative || view.missing_health() <= self.health_allowance(config);
        can_attack && healthy && view.holds_sword() && view.on_ground && view.sneaking
    }

    pub(crate) fn activate(
        &mut self,
        owner: EntityId,
        view: &PlayerView,
        effects: &mut Vec<Effect>,
    ) -> bool {
        self.miss_timer = 12 + u32::from(self.def.level());
        effects.push(Effect::PlaySound(SoundCue::Whoosh));
        effects.push(Effect::SpawnBeam {
            shooter: owner,
            level: self.def.level(),
            damage: self.beam_damage(view),
            range: self.beam_range(),
        });
        true
    }

    pub(crate) fn deactivate(&mut self) {
        self.miss_timer = 0;
    }

    /// Per-tick update; returns true when the miss timer expires and the
    /// owner's in-progress combo should be ended
    pub(crate) fn update(&mut self) -> bool {
        if self.miss_timer > 0 {
            self.miss_timer -= 1;
            return self.miss_timer == 0;
        }
        false
    }

    /// Host callback from the beam projectile's impact.
    /// A direct entity strike clears the miss timer (the combo survives);
    /// hitting a block leaves one tick so the combo still ends.
    pub fn on_beam_impact(&mut self, hit_block: bool) {
        self.miss_timer = if hit_block && self.miss_timer > 0 { 1 } else { 0 };
    }
}
