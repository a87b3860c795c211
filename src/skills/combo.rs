//! Chained-hit combo accumulator
//!
//! A combo is an ordered sequence of successful hits tracked per player.
//! Once finished (explicit end, miss, or size cap) it never records
//! another hit; ending is idempotent.

use serde::{Deserialize, Serialize};

/// One recorded hit in a combo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboHit {
    /// Damage dealt by this hit, after event mutation
    pub damage: f32,
}

/// Running record of a chained-hit sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    hits: Vec<ComboHit>,
    max_hits: usize,
    finished: bool,
}

impl Combo {
    pub fn new(max_hits: usize) -> Self {
        Self {
            hits: Vec::new(),
            max_hits,
            finished: false,
        }
    }

    pub fn hit_count(&self) -> u32 {
        self.hits.len() as u32
    }

    pub fn total_damage(&self) -> f32 {
        self.hits.iter().map(|h| h.damage).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_in_progress(&self) -> bool {
        !self.finished
    }

    /// Record a hit; ignored once finished. Reaching the size cap
    /// finishes the combo with the capping hit included.
    pub fn add_hit(&mut self, damage: f32) {
        if self.finished {
            return;
        }
        self.hits.push(ComboHit { damage });
        if self.hits.len() >= self.max_hits {
            self.finished = true;
        }
    }

    /// End the combo; idempotent
    pub fn end(&mut self) {
        self.finished = true;
    }
}
