//! Per-player combat state
//!
//! Owns the player's skill instances (exactly one per learned kind), the
//! swing cooldown, and the pending fall-distance reduction. All mutation
//! happens through the owning player's own notifications; other players'
//! handlers only read through the registry.

use crate::combat::effects::Effect;
use crate::combat::events::{AttackEvent, DamageEvent};
use crate::combat::view::PlayerView;
use crate::core::config::CombatConfig;
use crate::core::types::EntityId;
use crate::skills::{Combo, SkillInstance, SkillKind};
use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCombatState {
    id: EntityId,
    skills: AHashMap<SkillKind, SkillInstance>,
    /// Swing cooldown (left-click anti-spam); attacks allowed at 0
    attack_time: u32,
    /// Fall distance forgiven on the next fall, then cleared
    pub reduce_fall_amount: f32,
}

impl PlayerCombatState {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            skills: AHashMap::new(),
            attack_time: 0,
            reduce_fall_amount: 0.0,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Learn the skill at level 0, or level it up if already known
    ///
    /// Leveling replaces the instance with a fresh one (copy-on-level);
    /// any running timers on the old instance are discarded. Returns the
    /// resulting level.
    pub fn learn(&mut self, kind: SkillKind, config: &CombatConfig) -> u8 {
        let instance = match self.skills.get(&kind) {
            Some(existing) => existing.leveled(existing.level().saturating_add(1), config),
            None => SkillInstance::new(kind, 0, config),
        };
        let level = instance.level();
        self.skills.insert(kind, instance);
        level
    }

    pub fn skill(&self, kind: SkillKind) -> Option<&SkillInstance> {
        self.skills.get(&kind)
    }

    pub fn skill_mut(&mut self, kind: SkillKind) -> Option<&mut SkillInstance> {
        self.skills.get_mut(&kind)
    }

    pub fn skill_level(&self, kind: SkillKind) -> u8 {
        self.skills.get(&kind).map(|s| s.level()).unwrap_or(0)
    }

    pub fn is_skill_active(&self, kind: SkillKind) -> bool {
        self.skills.get(&kind).map(|s| s.is_active()).unwrap_or(false)
    }

    pub fn can_attack(&self) -> bool {
        self.attack_time == 0
    }

    pub fn set_attack_time(&mut self, ticks: u32) {
        self.attack_time = ticks;
    }

    /// The player's combo record, if a combo-capable skill is known
    pub fn combo(&self) -> Option<&Combo> {
        self.skills
            .get(&SkillKind::BasicTechnique)
            .and_then(|s| s.as_basic_technique())
            .and_then(|bt| bt.combo())
    }

    pub fn combo_in_progress(&self) -> bool {
        self.combo().map(Combo::is_in_progress).unwrap_or(false)
    }

    /// Validate and perform an activation request.
    ///
    /// Rejected requests (unknown skill, already active, failed guard) are
    /// silent no-ops: state and timers are left untouched.
    pub fn activate(
        &mut self,
        kind: SkillKind,
        view: &PlayerView,
        config: &CombatConfig,
        effects: &mut Vec<Effect>,
    ) -> bool {
        let id = self.id;
        let can_attack = self.can_attack();
        let skill = match self.skills.get_mut(&kind) {
            Some(skill) => skill,
            None => return false,
        };
        if skill.is_active() || !skill.can_use(view, config, can_attack) {
            return false;
        }
        let exhaustion = skill.exhaustion();
        if !skill.activate(id, view, effects) {
            return false;
        }
        let cooldown = match skill {
            SkillInstance::SwordBeam(beam) => beam.attack_cooldown(),
            _ => 0,
        };
        if cooldown > 0 {
            self.attack_time = cooldown;
        }
        if !view.creative && exhaustion > 0.0 {
            effects.push(Effect::AddExhaustion {
                player: id,
                amount: exhaustion,
            });
        }
        true
    }

    /// Per-tick update; runs every skill in `SkillKind::ALL` order
    pub fn on_update(&mut self, effects: &mut Vec<Effect>) {
        if self.attack_time > 0 {
            self.attack_time -= 1;
        }
        let mut end_combo = false;
        for kind in SkillKind::ALL {
            if let Some(skill) = self.skills.get_mut(&kind) {
                if skill.update(effects) {
                    end_combo = true;
                }
            }
        }
        if end_combo {
            self.end_combo();
        }
    }

    pub fn end_combo(&mut self) {
        if let Some(bt) = self
            .skills
            .get_mut(&SkillKind::BasicTechnique)
            .and_then(|s| s.as_basic_technique_mut())
        {
            bt.end_combo();
        }
    }

    /// Route an incoming attack to the first active defensive skill.
    /// Returns true if it was handled (the attack should be canceled).
    pub fn on_being_attacked(
        &mut self,
        attack: &AttackEvent,
        view: &PlayerView,
        rng: &mut impl Rng,
        effects: &mut Vec<Effect>,
    ) -> bool {
        let id = self.id;
        for kind in SkillKind::ALL {
            if let Some(skill) = self.skills.get_mut(&kind) {
                if skill.is_active() && skill.on_being_attacked(id, attack, view, rng, effects) {
                    return true;
                }
            }
        }
        false
    }

    /// Post-impact bookkeeping for a hit this player landed.
    /// Idempotent per event: a second call for the same record is a no-op.
    pub fn on_post_impact(&mut self, event: &mut DamageEvent) {
        if !event.mark_post_impact() {
            return;
        }
        let amount = event.amount();
        if let Some(bt) = self
            .skills
            .get_mut(&SkillKind::BasicTechnique)
            .and_then(|s| s.as_basic_technique_mut())
        {
            bt.on_hurt_target(amount);
        }
    }

    /// Combo bookkeeping for a hit this player received
    pub fn on_player_hurt(&mut self, event: &DamageEvent, config: &CombatConfig) {
        let amount = event.amount();
        if let Some(bt) = self
            .skills
            .get_mut(&SkillKind::BasicTechnique)
            .and_then(|s| s.as_basic_technique_mut())
        {
            bt.on_player_hurt(amount, config);
        }
    }

    /// Consume the pending fall reduction; returns the adjusted distance
    pub fn on_fall(&mut self, distance: f32) -> f32 {
        let adjusted = (distance - self.reduce_fall_amount).max(0.0);
        self.reduce_fall_amount = 0.0;
        adjusted
    }

    /// Login: deactivate everything and clear transients; learned levels
    /// survive (they came in with the save data)
    pub fn on_logged_in(&mut self) {
        self.reset_transients();
    }

    /// Joining a world (including after respawn) re-validates the same way
    pub fn on_join_world(&mut self) {
        self.reset_transients();
    }

    fn reset_transients(&mut self) {
        for kind in SkillKind::ALL {
            if let Some(skill) = self.skills.get_mut(&kind) {
                skill.deactivate();
            }
        }
        self.attack_time = 0;
        self.reduce_fall_amount = 0.0;
    }

    /// Deep value copy of another player's combat fields (respawn/clone).
    /// The receiving state keeps its own identity.
    pub fn copy_from(&mut self, other: &PlayerCombatState) {
        self.skills = other.skills.clone();
        self.attack_time = other.attack_time;
        self.reduce_fall_amount = other.reduce_fall_amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learned(kinds: &[SkillKind]) -> (PlayerCombatState, CombatConfig) {
        let config = CombatConfig::default();
        let mut state = PlayerCombatState::new(EntityId::new());
        for &kind in kinds {
            state.learn(kind, &config);
        }
        (state, config)
    }

    #[test]
    fn test_learn_then_level_up() {
        let (mut state, config) = learned(&[SkillKind::SwordBreak]);
        assert_eq!(state.skill_level(SkillKind::SwordBreak), 0);
        assert_eq!(state.learn(SkillKind::SwordBreak, &config), 1);
        // Levels clamp at the configured max
        for _ in 0..10 {
            state.learn(SkillKind::SwordBreak, &config);
        }
        assert_eq!(state.skill_level(SkillKind::SwordBreak), config.max_skill_level);
    }

    #[test]
    fn test_activate_while_active_is_noop() {
        let (mut state, config) = learned(&[SkillKind::SwordBreak]);
        let mut view = PlayerView::swordsman();
        view.blocking = true;
        let mut effects = Vec::new();

        assert!(state.activate(SkillKind::SwordBreak, &view, &config, &mut effects));
        let snapshot = state.clone();
        let before = effects.len();

        assert!(!state.activate(SkillKind::SwordBreak, &view, &config, &mut effects));
        assert_eq!(state, snapshot); // state and timers unchanged
        assert_eq!(effects.len(), before); // no new side effects
    }

    #[test]
    fn test_unknown_skill_activation_is_noop() {
        let (mut state, config) = learned(&[]);
        let mut effects = Vec::new();
        assert!(!state.activate(SkillKind::SwordBeam, &PlayerView::swordsman(), &config, &mut effects));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_sword_beam_sets_attack_cooldown_and_exhaustion() {
        let (mut state, config) = learned(&[SkillKind::SwordBeam]);
        let view = PlayerView::crouching_swordsman();
        let mut effects = Vec::new();
        assert!(state.activate(SkillKind::SwordBeam, &view, &config, &mut effects));
        assert!(!state.can_attack());
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::AddExhaustion { amount, .. } if (*amount - 2.0).abs() < 1e-6)));

        // Cooldown blocks an immediate second beam
        effects.clear();
        assert!(!state.activate(SkillKind::SwordBeam, &view, &config, &mut effects));
    }

    #[test]
    fn test_copy_from_is_deep() {
        let (mut original, config) = learned(&[SkillKind::SwordBreak, SkillKind::BasicTechnique]);
        original.set_attack_time(7);
        original.reduce_fall_amount = 2.5;

        let mut clone = PlayerCombatState::new(original.id());
        clone.copy_from(&original);
        assert_eq!(clone.skill_level(SkillKind::SwordBreak), 0);
        assert_eq!(clone.reduce_fall_amount, 2.5);
        assert!(!clone.can_attack());

        // Mutating the copy never touches the original
        clone.learn(SkillKind::SwordBreak, &config);
        clone.reduce_fall_amount = 0.0;
        assert_eq!(clone.skill_level(SkillKind::SwordBreak), 1);
        assert_eq!(original.skill_level(SkillKind::SwordBreak), 0);
        assert_eq!(original.reduce_fall_amount, 2.5);
    }

    #[test]
    fn test_fall_reduction_consumed_once() {
        let (mut state, _) = learned(&[]);
        state.reduce_fall_amount = 3.0;
        assert_eq!(state.on_fall(5.0), 2.0);
        assert_eq!(state.on_fall(5.0), 5.0);
    }

    #[test]
    fn test_login_resets_active_windows_but_keeps_levels() {
        let (mut state, config) = learned(&[SkillKind::ArmorBreak]);
        let mut effects = Vec::new();
        state.activate(SkillKind::ArmorBreak, &PlayerView::swordsman(), &config, &mut effects);
        assert!(state.is_skill_active(SkillKind::ArmorBreak));

        state.on_logged_in();
        assert!(!state.is_skill_active(SkillKind::ArmorBreak));
        assert_eq!(state.skill_level(SkillKind::ArmorBreak), 0);
    }

    #[test]
    fn test_post_impact_idempotent_per_event() {
        let (mut state, _) = learned(&[SkillKind::BasicTechnique]);
        let mut event = DamageEvent::new(state.id(), EntityId::new(), 4.0);
        state.on_post_impact(&mut event);
        state.on_post_impact(&mut event);
        assert_eq!(state.combo().unwrap().hit_count(), 1);
    }

    #[test]
    fn test_save_round_trip() {
        let (mut state, config) = learned(&[SkillKind::SwordBreak, SkillKind::BasicTechnique]);
        state.learn(SkillKind::SwordBreak, &config);
        let json = serde_json::to_string(&state).unwrap();
        let restored: PlayerCombatState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
