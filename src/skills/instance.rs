//! Per-player skill instances with tag-based dispatch
//!
//! Each learned skill is one variant of `SkillInstance`, holding that
//! skill's mutable runtime state. Dispatch is a match on the tag; there is
//! no trait-object hierarchy to downcast through.

use crate::combat::effects::Effect;
use crate::combat::events::AttackEvent;
use crate::combat::view::PlayerView;
use crate::core::config::CombatConfig;
use crate::core::types::EntityId;
use crate::skills::armor_break::ArmorBreak;
use crate::skills::basic_technique::BasicTechnique;
use crate::skills::definition::{SkillDefinition, SkillKind};
use crate::skills::mortal_draw::MortalDraw;
use crate::skills::sword_beam::SwordBeam;
use crate::skills::sword_break::SwordBreak;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Runtime state of one skill owned by one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkillInstance {
    BasicTechnique(BasicTechnique),
    SwordBreak(SwordBreak),
    SwordBeam(SwordBeam),
    ArmorBreak(ArmorBreak),
    MortalDraw(MortalDraw),
}

impl SkillInstance {
    /// Build a fresh instance at the given level (clamped to the config max)
    pub fn new(kind: SkillKind, level: u8, config: &CombatConfig) -> Self {
        let def = SkillDefinition::new(kind, level, config.max_skill_level);
        match kind {
            SkillKind::BasicTechnique => Self::BasicTechnique(BasicTechnique::new(def)),
            SkillKind::SwordBreak => Self::SwordBreak(SwordBreak::new(def)),
            SkillKind::SwordBeam => Self::SwordBeam(SwordBeam::new(def)),
            SkillKind::ArmorBreak => Self::ArmorBreak(ArmorBreak::new(def)),
            SkillKind::MortalDraw => Self::MortalDraw(MortalDraw::new(def)),
        }
    }

    pub fn def(&self) -> SkillDefinition {
        match self {
            Self::BasicTechnique(s) => s.def(),
            Self::SwordBreak(s) => s.def(),
            Self::SwordBeam(s) => s.def(),
            Self::ArmorBreak(s) => s.def(),
            Self::MortalDraw(s) => s.def(),
        }
    }

    pub fn kind(&self) -> SkillKind {
        self.def().kind()
    }

    pub fn level(&self) -> u8 {
        self.def().level()
    }

    /// Copy-on-level: a NEW instance with fresh runtime state
    pub fn leveled(&self, level: u8, config: &CombatConfig) -> Self {
        Self::new(self.kind(), level, config)
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::BasicTechnique(s) => s.is_active(),
            Self::SwordBreak(s) => s.is_active(),
            Self::SwordBeam(s) => s.is_active(),
            Self::ArmorBreak(s) => s.is_active(),
            Self::MortalDraw(s) => s.is_active(),
        }
    }

    pub fn exhaustion(&self) -> f32 {
        match self {
            Self::BasicTechnique(s) => s.exhaustion(),
            Self::SwordBreak(s) => s.exhaustion(),
            Self::SwordBeam(s) => s.exhaustion(),
            Self::ArmorBreak(s) => s.exhaustion(),
            Self::MortalDraw(s) => s.exhaustion(),
        }
    }

    /// Activation guard: the shared stamina check plus the skill's own
    /// preconditions. A false here means the activation request is
    /// silently rejected, never queued.
    pub fn can_use(&self, view: &PlayerView, config: &CombatConfig, can_attack: bool) -> bool {
        if !view.creative && view.stamina < self.exhaustion() {
            return false;
        }
        match self {
            Self::BasicTechnique(s) => s.can_use(view.holds_sword()),
            Self::SwordBreak(s) => s.can_use(view),
            Self::SwordBeam(s) => s.can_use(view, config, can_attack),
            Self::ArmorBreak(s) => s.can_use(view),
            Self::MortalDraw(s) => s.can_use(view),
        }
    }

    /// Perform the INACTIVE -> ACTIVE transition. The caller has already
    /// checked `can_use`; immediate side effects land in `effects`.
    pub(crate) fn activate(
        &mut self,
        owner: EntityId,
        view: &PlayerView,
        effects: &mut Vec<Effect>,
    ) -> bool {
        match self {
            Self::BasicTechnique(s) => s.activate(),
            Self::SwordBreak(s) => s.activate(),
            Self::SwordBeam(s) => s.activate(owner, view, effects),
            Self::ArmorBreak(s) => s.activate(),
            Self::MortalDraw(s) => s.activate(),
        }
    }

    pub(crate) fn deactivate(&mut self) {
        match self {
            Self::BasicTechnique(s) => s.deactivate(),
            Self::SwordBreak(s) => s.deactivate(),
            Self::SwordBeam(s) => s.deactivate(),
            Self::ArmorBreak(s) => s.deactivate(),
            Self::MortalDraw(s) => s.deactivate(),
        }
    }

    /// Per-tick update; returns true when the owner's combo should end
    /// (only the sword beam's miss timer requests that)
    pub(crate) fn update(&mut self, effects: &mut Vec<Effect>) -> bool {
        match self {
            Self::BasicTechnique(s) => {
                s.update();
                false
            }
            Self::SwordBreak(s) => {
                s.update(effects);
                false
            }
            Self::SwordBeam(s) => s.update(),
            Self::ArmorBreak(s) => {
                s.update();
                false
            }
            Self::MortalDraw(s) => {
                s.update();
                false
            }
        }
    }

    /// Defensive hook; returns true if the incoming attack was handled
    /// (the caller cancels it). Only the parry responds.
    pub(crate) fn on_being_attacked(
        &mut self,
        owner: EntityId,
        attack: &AttackEvent,
        view: &PlayerView,
        rng: &mut impl Rng,
        effects: &mut Vec<Effect>,
    ) -> bool {
        match self {
            Self::SwordBreak(s) => s.on_being_attacked(owner, attack, view, rng, effects),
            _ => false,
        }
    }

    /// Is the double-tap window currently open?
    pub fn is_armed(&self) -> bool {
        match self {
            Self::SwordBreak(s) => s.is_armed(),
            _ => false,
        }
    }

    pub(crate) fn arm(&mut self, window: u32) {
        if let Self::SwordBreak(s) = self {
            s.arm(window);
        }
    }

    pub fn as_basic_technique(&self) -> Option<&BasicTechnique> {
        match self {
            Self::BasicTechnique(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn as_basic_technique_mut(&mut self) -> Option<&mut BasicTechnique> {
        match self {
            Self::BasicTechnique(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sword_beam_mut(&mut self) -> Option<&mut SwordBeam> {
        match self {
            Self::SwordBeam(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn as_armor_break_mut(&mut self) -> Option<&mut ArmorBreak> {
        match self {
            Self::ArmorBreak(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn as_mortal_draw_mut(&mut self) -> Option<&mut MortalDraw> {
        match self {
            Self::MortalDraw(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamina_gate() {
        let config = CombatConfig::default();
        let skill = SkillInstance::new(SkillKind::ArmorBreak, 1, &config);
        let mut view = PlayerView::swordsman();
        view.stamina = 0.5; // exhaustion is 3.8
        assert!(!skill.can_use(&view, &config, true));

        view.creative = true;
        assert!(skill.can_use(&view, &config, true));
    }

    #[test]
    fn test_leveled_replaces_runtime_state() {
        let config = CombatConfig::default();
        let mut skill = SkillInstance::new(SkillKind::SwordBreak, 1, &config);
        let mut effects = Vec::new();
        skill.activate(EntityId::new(), &PlayerView::swordsman(), &mut effects);
        assert!(skill.is_active());

        let up = skill.leveled(2, &config);
        assert_eq!(up.level(), 2);
        assert!(!up.is_active()); // fresh state, not carried over
        assert!(skill.is_active()); // original untouched
    }

    #[test]
    fn test_only_parry_answers_attacks() {
        use crate::combat::view::HeldItem;
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let config = CombatConfig::default();
        let owner = EntityId::new();
        let attack = AttackEvent::melee(EntityId::new(), owner, HeldItem::sword());
        let view = PlayerView::swordsman();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut effects = Vec::new();

        for kind in [SkillKind::SwordBeam, SkillKind::ArmorBreak, SkillKind::MortalDraw] {
            let mut skill = SkillInstance::new(kind, 1, &config);
            skill.activate(owner, &view, &mut effects);
            assert!(!skill.on_being_attacked(owner, &attack, &view, &mut rng, &mut effects));
        }
    }
}
