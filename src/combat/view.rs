//! Host-supplied snapshots of combat participants
//!
//! The engine never polls input or inventory itself; the host passes a
//! `PlayerView` into every callback that needs to inspect the acting player.

/// What an entity currently holds in its main hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldItem {
    /// Counts as a weapon for activation guards
    pub is_weapon: bool,
    /// Counts as a sword (stricter guard used by sword-only skills)
    pub is_sword: bool,
    /// Remaining durability; `None` means the item cannot be damaged
    pub durability: Option<u32>,
}

impl HeldItem {
    pub fn sword() -> Self {
        Self {
            is_weapon: true,
            is_sword: true,
            durability: Some(250),
        }
    }

    pub fn worn_sword(durability: u32) -> Self {
        Self {
            durability: Some(durability),
            ..Self::sword()
        }
    }

    /// A weapon that is not a sword (axe, club)
    pub fn crude_weapon() -> Self {
        Self {
            is_weapon: true,
            is_sword: false,
            durability: Some(60),
        }
    }

    /// Held item that cannot take durability damage (e.g. a bone)
    pub fn unbreakable() -> Self {
        Self {
            is_weapon: false,
            is_sword: false,
            durability: None,
        }
    }

    pub fn damageable(&self) -> bool {
        self.durability.is_some()
    }
}

/// Per-call snapshot of the acting player, supplied by the host
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub health: f32,
    pub max_health: f32,
    /// Stamina available to pay exhaustion costs
    pub stamina: f32,
    /// Creative-mode players bypass stamina and health gates
    pub creative: bool,
    pub blocking: bool,
    pub sneaking: bool,
    pub on_ground: bool,
    /// Main-hand item, if any
    pub held_item: Option<HeldItem>,
    /// Base attack damage with the current weapon
    pub attack_damage: f32,
}

impl PlayerView {
    /// Test view: healthy player holding a sword
    pub fn swordsman() -> Self {
        Self {
            health: 20.0,
            max_health: 20.0,
            stamina: 20.0,
            creative: false,
            blocking: false,
            sneaking: false,
            on_ground: true,
            held_item: Some(HeldItem::sword()),
            attack_damage: 7.0,
        }
    }

    /// Test view: swordsman crouched on the ground (beam firing stance)
    pub fn crouching_swordsman() -> Self {
        Self {
            sneaking: true,
            ..Self::swordsman()
        }
    }

    /// Test view: healthy player with empty hands
    pub fn unarmed() -> Self {
        Self {
            held_item: None,
            attack_damage: 1.0,
            ..Self::swordsman()
        }
    }

    pub fn missing_health(&self) -> f32 {
        (self.max_health - self.health).max(0.0)
    }

    pub fn holds_weapon(&self) -> bool {
        self.held_item.map(|item| item.is_weapon).unwrap_or(false)
    }

    pub fn holds_sword(&self) -> bool {
        self.held_item.map(|item| item.is_sword).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swordsman_holds_sword() {
        let view = PlayerView::swordsman();
        assert!(view.holds_weapon());
        assert!(view.holds_sword());
        assert_eq!(view.missing_health(), 0.0);
    }

    #[test]
    fn test_unarmed_holds_nothing() {
        let view = PlayerView::unarmed();
        assert!(!view.holds_weapon());
        assert!(!view.holds_sword());
    }

    #[test]
    fn test_crude_weapon_is_not_sword() {
        let mut view = PlayerView::swordsman();
        view.held_item = Some(HeldItem::crude_weapon());
        assert!(view.holds_weapon());
        assert!(!view.holds_sword());
    }
}
