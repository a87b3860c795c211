//! Sword Arts - tick-based combat skill engine
//!
//! Player-activated sword techniques as per-player state machines, a
//! combat event dispatcher wired to the host's attack/hurt/tick
//! notifications, combo tracking, and skill-orb loot resolution. The
//! host engine supplies events and applies the effects this crate emits.

pub mod combat;
pub mod core;
pub mod skills;
