//! Outward effects produced by skill handlers
//!
//! Skills never touch host state directly. Handlers append `Effect` values
//! to a buffer which the dispatcher returns to the host, the same way the
//! simulation tick reports events for the host to act on.

use crate::core::types::EntityId;
use crate::skills::SkillKind;

/// Sound cues the host should play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Active window expired without a parry
    SwordMiss,
    /// Successful parry contact
    SwordStrike,
    /// Armor-ignoring strike landed
    ArmorCrack,
    /// Beam or draw released
    Whoosh,
    /// A held item broke from durability damage
    ItemBreak,
    /// A rare orb dropped
    SpecialDrop,
}

/// A side effect for the host engine to apply
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PlaySound(SoundCue),
    /// Spawn a sword-beam projectile owned by `shooter`
    SpawnBeam {
        shooter: EntityId,
        level: u8,
        damage: f32,
        range: u32,
    },
    /// Apply durability damage to the holder's main-hand item
    DamageHeldItem {
        holder: EntityId,
        amount: u32,
    },
    /// The holder's main-hand item broke; clear the slot
    Disarm {
        holder: EntityId,
    },
    /// Knock `target` back, away from `from`
    Knockback {
        target: EntityId,
        from: EntityId,
    },
    /// Charge the activation's stamina cost to the player
    AddExhaustion {
        player: EntityId,
        amount: f32,
    },
    /// Deal damage that ignores the target's armor
    ArmorPiercingDamage {
        source: EntityId,
        target: EntityId,
        amount: f32,
    },
    /// Drop a skill orb of the given kind at the victim's position
    GrantOrb {
        victim: EntityId,
        skill: SkillKind,
    },
}
