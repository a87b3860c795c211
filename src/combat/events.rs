//! Mutable combat event records exchanged with the host
//!
//! The host builds one of these per attack/hurt notification, hands it to
//! the dispatcher, then applies the possibly-mutated outcome. Handler
//! mutation must complete before the host finalizes the action (the model
//! is fully synchronous).

use crate::combat::view::HeldItem;
use crate::core::types::EntityId;

/// "Attack initiated" notification, delivered before damage is computed
///
/// Defensive skills (parries) may cancel the attack outright.
#[derive(Debug, Clone)]
pub struct AttackEvent {
    /// Entity the attack is attributed to
    pub source: EntityId,
    /// Immediate attacking entity (the melee attacker itself, or a
    /// projectile), if known
    pub direct_source: Option<EntityId>,
    pub target: EntityId,
    /// Snapshot of the direct source's main-hand item
    pub source_held_item: Option<HeldItem>,
    canceled: bool,
}

impl AttackEvent {
    pub fn new(
        source: EntityId,
        direct_source: Option<EntityId>,
        target: EntityId,
        source_held_item: Option<HeldItem>,
    ) -> Self {
        Self {
            source,
            direct_source,
            target,
            source_held_item,
            canceled: false,
        }
    }

    /// Direct melee attack: the source is also the immediate attacker
    pub fn melee(attacker: EntityId, target: EntityId, held: HeldItem) -> Self {
        Self::new(attacker, Some(attacker), target, Some(held))
    }

    pub fn cancel(&mut self) {
        self.canceled = true;
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled
    }
}

/// "Damage about to apply" record
///
/// Skills may raise or lower the amount, or cancel the event entirely,
/// before the host subtracts it from the target's health.
#[derive(Debug, Clone)]
pub struct DamageEvent {
    pub source: EntityId,
    pub target: EntityId,
    amount: f32,
    canceled: bool,
    /// Looting/bonus enchantment level on the killing weapon
    pub looting_level: u32,
    post_impact_done: bool,
}

impl DamageEvent {
    pub fn new(source: EntityId, target: EntityId, amount: f32) -> Self {
        Self {
            source,
            target,
            amount,
            canceled: false,
            looting_level: 0,
            post_impact_done: false,
        }
    }

    pub fn with_looting(mut self, level: u32) -> Self {
        self.looting_level = level;
        self
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: f32) {
        self.amount = amount.max(0.0);
    }

    pub fn add_amount(&mut self, bonus: f32) {
        self.set_amount(self.amount + bonus);
    }

    /// Consume the event: no damage will be applied
    pub fn cancel(&mut self) {
        self.canceled = true;
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// Damage the host should actually apply
    pub fn final_amount(&self) -> f32 {
        if self.canceled {
            0.0
        } else {
            self.amount
        }
    }

    /// One-shot marker for the post-impact hook; returns true exactly once
    pub(crate) fn mark_post_impact(&mut self) -> bool {
        if self.post_impact_done {
            false
        } else {
            self.post_impact_done = true;
            true
        }
    }
}
