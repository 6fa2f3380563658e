//! Combat attributes shared by characters and enemies.
//!
//! Health is a clamped pool: every mutation keeps `health` within
//! `0..=max_health`, so overkill and overheal are absorbed rather than
//! stored.

use serde::{Deserialize, Serialize};

/// Health, strength, and magic of a combat participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    health: u32,
    max_health: u32,
    /// Physical power; drives basic attacks and damage reduction.
    pub strength: u32,
    /// Spell power; drives the Mage's Fireball.
    pub magic: u32,
}

impl Stats {
    /// Create stats starting at full health.
    pub fn new(max_health: u32, strength: u32, magic: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            strength,
            magic,
        }
    }

    /// Create stats with an explicit current health, clamped to the maximum.
    pub fn with_health(health: u32, max_health: u32, strength: u32, magic: u32) -> Self {
        Self {
            health: health.min(max_health),
            max_health,
            strength,
            magic,
        }
    }

    /// Current health.
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Maximum health.
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Remove health, stopping at zero. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.health);
        self.health -= dealt;
        dealt
    }

    /// Restore health, stopping at the maximum. Returns the health actually
    /// restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_health - self.health);
        self.health += restored;
        restored
    }

    /// Set current health, clamped to `0..=max_health`.
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    /// Refill health to the maximum.
    pub fn restore_full(&mut self) {
        self.health = self.max_health;
    }

    /// Change the maximum health by a signed delta. Current health is clamped
    /// to the new maximum.
    pub fn adjust_max_health(&mut self, delta: i64) {
        self.max_health = adjust(self.max_health, delta);
        self.health = self.health.min(self.max_health);
    }

    /// Returns true while health is above zero.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Returns true if health is at its maximum.
    pub fn is_full(&self) -> bool {
        self.health >= self.max_health
    }

    /// Returns the fraction of health remaining (0.0 to 1.0).
    pub fn fraction(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        f64::from(self.health) / f64::from(self.max_health)
    }
}

/// Add a signed delta to an unsigned stat, saturating at both ends.
pub(crate) fn adjust(value: u32, delta: i64) -> u32 {
    let result = i64::from(value).saturating_add(delta);
    u32::try_from(result.max(0)).unwrap_or(u32::MAX)
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HP {}/{} | STR {} | MAG {}",
            self.health, self.max_health, self.strength, self.magic
        )
    }
}
