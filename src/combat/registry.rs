//! Registry of per-player combat state
//!
//! Entities without an entry simply have the feature disabled: lookups
//! return `None` and collaborating hooks treat that as "nothing happened".

use crate::combat::state::PlayerCombatState;
use crate::core::types::EntityId;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillRegistry {
    players: AHashMap<EntityId, PlayerCombatState>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-create the state for a player
    pub fn register(&mut self, id: EntityId) -> &mut PlayerCombatState {
        self.players
            .entry(id)
            .or_insert_with(|| PlayerCombatState::new(id))
    }

    pub fn get(&self, id: EntityId) -> Option<&PlayerCombatState> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut PlayerCombatState> {
        self.players.get_mut(&id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<PlayerCombatState> {
        self.players.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
