//! Combat event dispatcher
//!
//! Receives the host's attack/hurt/tick/lifecycle notifications, finds the
//! relevant player state in the registry, and invokes exactly one handler
//! chain per event in a fixed priority order:
//!
//! 1. attacker side: combo bonus first (interceptors must see the final
//!    incoming amount), then armor-break interception (consumes the event
//!    and short-circuits), else mortal-draw modification;
//! 2. target side: combo-continuation bookkeeping, only on positive damage;
//! 3. the attacker's generic post-impact hook, always last.
//!
//! Handlers mutate only the event record and the owning player's state.

use crate::combat::effects::{Effect, SoundCue};
use crate::combat::events::{AttackEvent, DamageEvent};
use crate::combat::loot::{resolve_orb_drop, DeathEvent, DropTable};
use crate::combat::registry::SkillRegistry;
use crate::combat::view::PlayerView;
use crate::core::config::CombatConfig;
use crate::core::types::EntityId;
use crate::skills::SkillKind;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Result of an activation request
#[derive(Debug, Clone)]
pub struct ActivationOutcome {
    pub activated: bool,
    pub effects: Vec<Effect>,
}

impl ActivationOutcome {
    fn rejected() -> Self {
        Self {
            activated: false,
            effects: Vec::new(),
        }
    }
}

pub struct CombatDispatcher {
    registry: SkillRegistry,
    config: CombatConfig,
    drop_table: DropTable,
    rng: ChaCha8Rng,
}

impl CombatDispatcher {
    pub fn new(config: CombatConfig, drop_table: DropTable, seed: u64) -> Self {
        Self {
            registry: SkillRegistry::new(),
            config,
            drop_table,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn registry(&self) -> &SkillRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SkillRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// "Attack initiated": give the target's defensive skills a chance to
    /// handle the attack before any damage is computed
    pub fn on_attack_initiated(
        &mut self,
        attack: &mut AttackEvent,
        target_view: &PlayerView,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        if attack.is_canceled() {
            return effects;
        }
        if let Some(state) = self.registry.get_mut(attack.target) {
            if state.on_being_attacked(attack, target_view, &mut self.rng, &mut effects) {
                tracing::debug!(target = ?attack.target, "incoming attack parried");
                attack.cancel();
            }
        }
        effects
    }

    /// "Damage about to apply": run the fixed-priority handler chain.
    /// Mutation of the event completes before the host applies it.
    pub fn on_damage_resolving(&mut self, event: &mut DamageEvent) -> Vec<Effect> {
        let mut effects = Vec::new();

        if let Some(attacker) = self.registry.get_mut(event.source) {
            // Combo bonus first: interception decides on the boosted amount
            let combo_hits = attacker
                .combo()
                .filter(|c| c.is_in_progress())
                .map(|c| c.hit_count())
                .unwrap_or(0);
            if combo_hits > 0 {
                event.add_amount(combo_hits as f32);
            }

            if attacker.is_skill_active(SkillKind::ArmorBreak) {
                if let Some(ab) = attacker
                    .skill_mut(SkillKind::ArmorBreak)
                    .and_then(|s| s.as_armor_break_mut())
                {
                    ab.on_impact(event, &mut effects);
                }
                tracing::debug!(source = ?event.source, "armor break consumed damage event");
                // Block semantics override everything downstream
                return effects;
            }
            if attacker.is_skill_active(SkillKind::MortalDraw) {
                if let Some(md) = attacker
                    .skill_mut(SkillKind::MortalDraw)
                    .and_then(|s| s.as_mortal_draw_mut())
                {
                    md.on_impact(event, &mut effects);
                }
            }
        }

        // Target-side combo bookkeeping observes the already-modified amount
        if event.final_amount() > 0.0 {
            if let Some(target) = self.registry.get_mut(event.target) {
                target.on_player_hurt(event, &self.config);
            }
        }

        // Post-impact hook runs last, once per event
        if event.final_amount() > 0.0 {
            if let Some(attacker) = self.registry.get_mut(event.source) {
                attacker.on_post_impact(event);
            }
        }
        effects
    }

    /// Per-entity tick; the host calls this exactly once per game step
    pub fn on_tick(&mut self, player: EntityId) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(state) = self.registry.get_mut(player) {
            state.on_update(&mut effects);
        }
        effects
    }

    /// Activation request from local input or a remote peer.
    ///
    /// For double-tap skills the first request only arms the window; a
    /// second request inside the window performs the activation. Invalid
    /// requests are rejected silently (no queueing, no retry).
    pub fn request_activation(
        &mut self,
        player: EntityId,
        kind: SkillKind,
        view: &PlayerView,
    ) -> ActivationOutcome {
        let state = match self.registry.get_mut(player) {
            Some(state) => state,
            None => return ActivationOutcome::rejected(),
        };

        if self.config.require_double_tap && kind.uses_double_tap() {
            let can_attack = state.can_attack();
            let skill = match state.skill_mut(kind) {
                Some(skill) => skill,
                None => return ActivationOutcome::rejected(),
            };
            if !skill.is_armed() {
                if skill.can_use(view, &self.config, can_attack) {
                    skill.arm(self.config.double_tap_window);
                }
                return ActivationOutcome::rejected();
            }
        }

        let mut effects = Vec::new();
        let activated = state.activate(kind, view, &self.config, &mut effects);
        if activated {
            tracing::debug!(player = ?player, skill = kind.name(), "skill activated");
        } else {
            tracing::trace!(player = ?player, skill = kind.name(), "activation refused");
        }
        ActivationOutcome { activated, effects }
    }

    /// Anti-spam hook: charge the base swing cooldown after a left click
    pub fn set_player_attack_time(&mut self, player: EntityId) {
        let ticks = self.config.base_swing_speed;
        if let Some(state) = self.registry.get_mut(player) {
            state.set_attack_time(ticks);
        }
    }

    /// Beam projectile impact callback from the host
    pub fn on_beam_impact(&mut self, player: EntityId, hit_block: bool) {
        if let Some(beam) = self
            .registry
            .get_mut(player)
            .and_then(|s| s.skill_mut(SkillKind::SwordBeam))
            .and_then(|s| s.as_sword_beam_mut())
        {
            beam.on_beam_impact(hit_block);
        }
    }

    /// Login: ensure state exists and clear any stale activation windows
    pub fn on_player_logged_in(&mut self, player: EntityId) {
        self.registry.register(player).on_logged_in();
    }

    /// Entity joined the world (first join or post-respawn)
    pub fn on_join_world(&mut self, player: EntityId) {
        self.registry.register(player).on_join_world();
    }

    /// Respawn/clone: deep-copy the original entity's combat state onto
    /// the replacement entity
    pub fn on_respawn(&mut self, replacement: EntityId, original: EntityId) {
        if let Some(snapshot) = self.registry.get(original).cloned() {
            self.registry.register(replacement).copy_from(&snapshot);
        }
    }

    /// Fall notification; consumes any pending fall-distance reduction
    /// and returns the distance the host should apply
    pub fn on_fall(&mut self, player: EntityId, distance: f32) -> f32 {
        match self.registry.get_mut(player) {
            Some(state) => state.on_fall(distance),
            None => distance,
        }
    }

    /// Death notification; resolves the two-stage orb drop gate
    pub fn on_entity_death(&mut self, death: &DeathEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(orb) = resolve_orb_drop(death, &self.drop_table, &self.config, &mut self.rng) {
            effects.push(Effect::GrantOrb {
                victim: death.victim,
                skill: orb,
            });
            effects.push(Effect::PlaySound(SoundCue::SpecialDrop));
        }
        effects
    }
}
