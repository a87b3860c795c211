//! Skill orb drop resolution
//!
//! Two independent probability gates run in sequence: stage (a) selects
//! WHICH orb would drop (fixed mob mapping, or a uniform random pick),
//! stage (b) decides IF the selected orb actually drops. Keeping the
//! gates separate lets orb-type weighting and overall rarity be tuned
//! independently.

use crate::core::config::CombatConfig;
use crate::core::error::{Result, SkillsError};
use crate::core::types::EntityId;
use crate::skills::SkillKind;
use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Mob families the drop table can map to signature orbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobKind {
    Zombie,
    Skeleton,
    Spider,
    Witch,
    StoneGolem,
    Wildcat,
    Slime,
    Bat,
}

impl std::str::FromStr for MobKind {
    type Err = SkillsError;

    /// Parse the snake_case name used in drop table files
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "zombie" => Ok(MobKind::Zombie),
            "skeleton" => Ok(MobKind::Skeleton),
            "spider" => Ok(MobKind::Spider),
            "witch" => Ok(MobKind::Witch),
            "stone_golem" => Ok(MobKind::StoneGolem),
            "wildcat" => Ok(MobKind::Wildcat),
            "slime" => Ok(MobKind::Slime),
            "bat" => Ok(MobKind::Bat),
            _ => Err(SkillsError::UnknownMob(s.to_string())),
        }
    }
}

/// A mob's death, as reported by the host
#[derive(Debug, Clone)]
pub struct DeathEvent {
    pub victim: EntityId,
    /// Mob family of the victim; `None` for players and unknown entities
    pub mob: Option<MobKind>,
    pub victim_is_player: bool,
    /// Orbs only drop from player kills
    pub killed_by_player: bool,
    /// Looting/bonus enchantment level on the killing weapon
    pub looting_level: u32,
}

/// Read-only mob -> signature orb mapping
///
/// Initialized once at startup and injected into the dispatcher;
/// never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DropTable {
    drops: AHashMap<MobKind, SkillKind>,
}

impl DropTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default mapping
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.insert(MobKind::Zombie, SkillKind::BasicTechnique);
        table.insert(MobKind::Skeleton, SkillKind::BasicTechnique);
        table.insert(MobKind::StoneGolem, SkillKind::SwordBreak);
        table.insert(MobKind::Witch, SkillKind::SwordBeam);
        table.insert(MobKind::Spider, SkillKind::ArmorBreak);
        table.insert(MobKind::Wildcat, SkillKind::MortalDraw);
        table
    }

    pub fn insert(&mut self, mob: MobKind, skill: SkillKind) {
        self.drops.insert(mob, skill);
    }

    pub fn get(&self, mob: MobKind) -> Option<SkillKind> {
        self.drops.get(&mob).copied()
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Parse a table from TOML text, e.g.
    /// `drops = { zombie = "basic_technique", witch = "sword_beam" }`
    pub fn from_toml_str(content: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct TableFile {
            drops: AHashMap<MobKind, SkillKind>,
        }
        let file: TableFile = toml::from_str(content)?;
        Ok(Self { drops: file.drops })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// Resolve whether a kill drops a skill orb, and which one.
///
/// Stage (a): a mapped mob keeps its signature orb with probability
/// `1 - chance_for_random_drop`; otherwise a uniform pick over all orbs
/// is attempted, gated by `random_mob_drop_chance` (scaled by
/// `player_drop_factor` for player victims; mapped mobs always pass).
/// Stage (b): the selected orb is granted with probability
/// `base_orb_drop_chance + looting_bonus_per_level * looting`.
pub fn resolve_orb_drop(
    death: &DeathEvent,
    table: &DropTable,
    config: &CombatConfig,
    rng: &mut impl Rng,
) -> Option<SkillKind> {
    if !death.killed_by_player {
        return None;
    }
    if death.victim_is_player {
        if !config.player_drops_enabled {
            return None;
        }
    } else if !config.orb_drops_enabled {
        return None;
    }

    let mapped = death.mob.and_then(|mob| table.get(mob));

    // Stage (a): which orb would drop this time
    let selected = if mapped.is_some() && rng.gen::<f32>() > config.chance_for_random_drop {
        mapped
    } else {
        let pick = SkillKind::ALL[rng.gen_range(0..SkillKind::ALL.len())];
        let factor = if death.victim_is_player {
            config.player_drop_factor
        } else {
            1.0
        };
        let chance = factor * config.random_mob_drop_chance;
        if mapped.is_some() || rng.gen::<f32>() < chance {
            Some(pick)
        } else {
            None
        }
    };
    let orb = selected?;

    // Stage (b): does a drop happen at all
    let grant_chance =
        config.base_orb_drop_chance + config.looting_bonus_per_level * death.looting_level as f32;
    if config.base_orb_drop_chance > 0.0 && rng.gen::<f32>() < grant_chance {
        tracing::debug!(victim = ?death.victim, orb = orb.name(), "skill orb dropped");
        Some(orb)
    } else {
        None
    }
}
