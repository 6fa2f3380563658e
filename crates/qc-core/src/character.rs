//! Player characters and their classes.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::STARTING_GOLD;
use crate::error::{QcError, QcResult};
use crate::inventory::{Equipment, Inventory};
use crate::quest::QuestLog;
use crate::stats::Stats;

/// The playable classes. Each class has its own base stats and one special
/// ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    /// Sturdy melee fighter.
    Warrior,
    /// Fragile spellcaster.
    Mage,
    /// Gambling striker.
    Rogue,
    /// Healer.
    Cleric,
}

impl CharacterClass {
    /// All classes, in menu order.
    pub const ALL: [Self; 4] = [Self::Warrior, Self::Mage, Self::Rogue, Self::Cleric];

    /// Starting stats for a level 1 character of this class.
    pub fn base_stats(self) -> Stats {
        match self {
            Self::Warrior => Stats::new(120, 15, 5),
            Self::Mage => Stats::new(80, 8, 20),
            Self::Rogue => Stats::new(90, 12, 10),
            Self::Cleric => Stats::new(100, 10, 15),
        }
    }

    /// Display name of the class ability.
    pub fn ability_name(self) -> &'static str {
        match self {
            Self::Warrior => "Power Strike",
            Self::Mage => "Fireball",
            Self::Rogue => "Critical Strike",
            Self::Cleric => "Heal",
        }
    }

    /// The class name as written in save files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warrior => "Warrior",
            Self::Mage => "Mage",
            Self::Rogue => "Rogue",
            Self::Cleric => "Cleric",
        }
    }
}

impl std::fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterClass {
    type Err = QcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == lower)
            .ok_or_else(|| QcError::InvalidCharacterClass(s.trim().to_string()))
    }
}

/// A player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Character name; also the save file key.
    pub name: String,
    /// The character's class.
    pub class: CharacterClass,
    /// Current level (1-based).
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub experience: u32,
    /// Gold on hand.
    pub gold: u32,
    /// Health, strength, and magic.
    pub stats: Stats,
    /// Carried items.
    pub inventory: Inventory,
    /// Equipped weapon and armor.
    pub equipment: Equipment,
    /// Active and completed quests.
    pub quests: QuestLog,
}

impl Character {
    /// Create a level 1 character with the class's base stats.
    pub fn new(name: impl Into<String>, class: CharacterClass) -> Self {
        Self {
            name: name.into(),
            class,
            level: 1,
            experience: 0,
            gold: STARTING_GOLD,
            stats: class.base_stats(),
            inventory: Inventory::new(),
            equipment: Equipment::default(),
            quests: QuestLog::new(),
        }
    }

    /// Check the record's invariants: a positive level and max health,
    /// health within bounds, an inventory within capacity, and disjoint,
    /// duplicate-free quest sets.
    pub fn validate(&self) -> QcResult<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if self.level == 0 {
            return Err(invalid("level must be at least 1"));
        }
        if self.stats.max_health() == 0 {
            return Err(invalid("max health must be positive"));
        }
        if self.stats.health() > self.stats.max_health() {
            return Err(invalid(format!(
                "health {} exceeds max health {}",
                self.stats.health(),
                self.stats.max_health()
            )));
        }
        if self.inventory.len() > self.inventory.capacity() {
            return Err(invalid(format!(
                "inventory holds {} items but capacity is {}",
                self.inventory.len(),
                self.inventory.capacity()
            )));
        }

        let mut seen = HashSet::new();
        for id in self.quests.active().iter().chain(self.quests.completed()) {
            if !seen.insert(id.as_str()) {
                return Err(invalid(format!("quest '{id}' listed more than once")));
            }
        }
        Ok(())
    }

    /// Returns true if the character has no health left.
    pub fn is_dead(&self) -> bool {
        !self.stats.is_alive()
    }

    /// Returns true while the character has health left.
    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    /// Add (or, with a negative amount, spend) gold. Returns the new total.
    /// Spending more than the character has fails without changing the total.
    pub fn add_gold(&mut self, amount: i64) -> QcResult<u32> {
        let total = i64::from(self.gold).saturating_add(amount);
        if total < 0 {
            return Err(QcError::InsufficientGold {
                required: amount.unsigned_abs(),
                available: u64::from(self.gold),
            });
        }
        self.gold = u32::try_from(total).unwrap_or(u32::MAX);
        Ok(self.gold)
    }

    /// Heal by `amount`, capped at max health. Returns the amount healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.stats.heal(amount)
    }

    /// Bring a dead character back at half health (at least 1). Returns false
    /// if the character was not dead.
    pub fn revive(&mut self) -> bool {
        if !self.is_dead() {
            return false;
        }
        let half = (self.stats.max_health() / 2).max(1);
        self.stats.set_health(half);
        true
    }
}

fn invalid(message: impl Into<String>) -> QcError {
    QcError::InvalidCharacterData(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_character_uses_class_stats() {
        let c = Character::new("Hero", CharacterClass::Warrior);
        assert_eq!(c.level, 1);
        assert_eq!(c.experience, 0);
        assert_eq!(c.gold, 100);
        assert_eq!(c.stats.health(), 120);
        assert_eq!(c.stats.strength, 15);
        assert_eq!(c.stats.magic, 5);
        assert!(c.inventory.is_empty());
        c.validate().unwrap();
    }

    #[test]
    fn class_base_stats() {
        let mage = CharacterClass::Mage.base_stats();
        assert_eq!((mage.max_health(), mage.strength, mage.magic), (80, 8, 20));
        let rogue = CharacterClass::Rogue.base_stats();
        assert_eq!((rogue.max_health(), rogue.strength, rogue.magic), (90, 12, 10));
        let cleric = CharacterClass::Cleric.base_stats();
        assert_eq!((cleric.max_health(), cleric.strength, cleric.magic), (100, 10, 15));
    }

    #[test]
    fn class_parse_case_insensitive() {
        assert_eq!("warrior".parse::<CharacterClass>().unwrap(), CharacterClass::Warrior);
        assert_eq!(" MAGE ".parse::<CharacterClass>().unwrap(), CharacterClass::Mage);
        assert_eq!(
            "Bard".parse::<CharacterClass>(),
            Err(QcError::InvalidCharacterClass("Bard".to_string()))
        );
    }

    #[test]
    fn add_gold_rejects_overdraft() {
        let mut c = Character::new("Hero", CharacterClass::Rogue);
        assert_eq!(c.add_gold(25).unwrap(), 125);
        assert_eq!(c.add_gold(-125).unwrap(), 0);
        assert!(matches!(
            c.add_gold(-1),
            Err(QcError::InsufficientGold { required: 1, available: 0 })
        ));
        assert_eq!(c.gold, 0);
    }

    #[test]
    fn revive_only_when_dead() {
        let mut c = Character::new("Hero", CharacterClass::Cleric);
        assert!(!c.revive());
        c.stats.take_damage(1_000);
        assert!(c.is_dead());
        assert!(c.revive());
        assert_eq!(c.stats.health(), 50);
    }

    #[test]
    fn heal_is_capped() {
        let mut c = Character::new("Hero", CharacterClass::Mage);
        c.stats.take_damage(10);
        assert_eq!(c.heal(50), 10);
        assert!(c.stats.is_full());
    }

    #[test]
    fn validate_rejects_overlapping_quests() {
        let mut c = Character::new("Hero", CharacterClass::Warrior);
        c.quests =
            serde_json::from_str(r#"{"active":["first_steps"],"completed":["first_steps"]}"#)
                .unwrap();
        assert!(matches!(c.validate(), Err(QcError::InvalidCharacterData(_))));
    }

    #[test]
    fn validate_rejects_zero_level() {
        let mut c = Character::new("Hero", CharacterClass::Warrior);
        c.level = 0;
        assert!(c.validate().is_err());
    }
}
