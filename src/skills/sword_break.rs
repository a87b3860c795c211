//! Sword Break - a fierce parry that damages the attacker's weapon
//!
//! Activation: double-tap while blocking with a weapon in hand.
//! While the break timer is above the use-delay boundary the player is
//! actively parrying; a successful parry snaps the timer down to that
//! boundary (exactly one guarded response per activation), damages the
//! attacker's held item for up to `15 * (level + 1)` durability, and
//! knocks the attacker back. The remaining delay ticks enforce a gap
//! between uses.

use crate::combat::effects::{Effect, SoundCue};
use crate::combat::events::AttackEvent;
use crate::combat::view::PlayerView;
use crate::core::types::EntityId;
use crate::skills::definition::SkillDefinition;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwordBreak {
    def: SkillDefinition,
    /// Ticks remaining in the active window
    break_timer: u32,
    /// Double-tap window: ticks remaining before the armed state lapses
    #[serde(skip)]
    armed_timer: u32,
    /// One-shot: play the miss sound when the parry window closes unused
    miss_sound_pending: bool,
}

impl SwordBreak {
    pub fn new(def: SkillDefinition) -> Self {
        Self {
            def,
            break_timer: 0,
            armed_timer: 0,
            miss_sound_pending: false,
        }
    }

    pub fn def(&self) -> SkillDefinition {
        self.def
    }

    /// Ticks the skill stays active after activation
    pub fn active_time(&self) -> u32 {
        6 + u32::from(self.def.level())
    }

    /// Ticks that must elapse before the skill can be used again;
    /// the parry itself is only honoured while `break_timer` exceeds this
    pub fn use_delay(&self) -> u32 {
        5u32.saturating_sub(u32::from(self.def.level()) / 2)
    }

    /// Maximum durability damage dealt to the attacker's weapon
    pub fn max_item_damage(&self) -> u32 {
        15 * (u32::from(self.def.level()) + 1)
    }

    pub fn exhaustion(&self) -> f32 {
        2.0 - 0.1 * f32::from(self.def.level())
    }

    pub fn is_active(&self) -> bool {
        self.break_timer > 0
    }

    /// Ticks remaining in the active window (0 when inactive)
    pub fn remaining_ticks(&self) -> u32 {
        self.break_timer
    }

    pub fn can_use(&self, view: &PlayerView) -> bool {
        !self.is_active() && view.holds_weapon() && view.blocking
    }

    pub(crate) fn activate(&mut self) -> bool {
        self.break_timer = self.active_time();
        self.miss_sound_pending = true;
        self.armed_timer = 0;
        self.is_active()
    }

    pub(crate) fn deactivate(&mut self) {
        self.break_timer = 0;
        self.miss_sound_pending = false;
    }

    /// Open the double-tap window for `window` ticks
    pub(crate) fn arm(&mut self, window: u32) {
        self.armed_timer = window;
    }

    pub fn is_armed(&self) -> bool {
        self.armed_timer > 0
    }

    pub(crate) fn update(&mut self, effects: &mut Vec<Effect>) {
        if self.is_active() {
            self.break_timer -= 1;
            if self.break_timer <= self.use_delay() && self.miss_sound_pending {
                self.miss_sound_pending = false;
                effects.push(Effect::PlaySound(SoundCue::SwordMiss));
            }
        } else if self.armed_timer > 0 {
            self.armed_timer -= 1;
        }
    }

    /// Attempt to parry an incoming attack. Returns true if the attack
    /// was blocked (the caller cancels the attack event).
    pub(crate) fn on_being_attacked(
        &mut self,
        owner: EntityId,
        attack: &AttackEvent,
        view: &PlayerView,
        rng: &mut impl Rng,
        effects: &mut Vec<Effect>,
    ) -> bool {
        let attacker = match attack.direct_source {
            Some(attacker) => attacker,
            None => return false,
        };
        let held = match attack.source_held_item {
            Some(held) => held,
            None => return false,
        };
        if self.break_timer <= self.use_delay() || !view.holds_weapon() {
            return false;
        }

        // Only block one attack; the remaining delay ticks decay naturally
        self.break_timer = self.use_delay();
        self.miss_sound_pending = false;
        effects.push(Effect::PlaySound(SoundCue::SwordStrike));

        if let Some(durability) = held.durability {
            let max = self.max_item_damage();
            let damage = (max / 3).max(rng.gen_range(0..max));
            effects.push(Effect::DamageHeldItem {
                holder: attacker,
                amount: damage,
            });
            if damage >= durability {
                effects.push(Effect::PlaySound(SoundCue::ItemBreak));
                effects.push(Effect::Disarm { holder: attacker });
            }
        }
        effects.push(Effect::Knockback {
            target: attacker,
            from: owner,
        });
        true
    }
}
