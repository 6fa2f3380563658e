//! Enemy templates.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QcError;
use crate::progression::Rewards;
use crate::stats::Stats;

/// The built-in enemy types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Weak early-game enemy.
    Goblin,
    /// Mid-game bruiser.
    Orc,
    /// Late-game boss.
    Dragon,
}

impl EnemyKind {
    /// All enemy kinds, weakest first.
    pub const ALL: [Self; 3] = [Self::Goblin, Self::Orc, Self::Dragon];

    /// The enemy kind suited to a character level: goblins up to level 2,
    /// orcs up to level 5, dragons beyond.
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=2 => Self::Goblin,
            3..=5 => Self::Orc,
            _ => Self::Dragon,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Goblin => "Goblin",
            Self::Orc => "Orc",
            Self::Dragon => "Dragon",
        }
    }

    fn template(self) -> (Stats, Rewards) {
        match self {
            Self::Goblin => (Stats::new(50, 8, 2), Rewards::new(25, 10)),
            Self::Orc => (Stats::new(80, 12, 5), Rewards::new(50, 25)),
            Self::Dragon => (Stats::new(200, 25, 15), Rewards::new(200, 100)),
        }
    }
}

impl FromStr for EnemyKind {
    type Err = QcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name().to_lowercase() == lower)
            .ok_or_else(|| QcError::InvalidTarget(s.trim().to_string()))
    }
}

impl std::fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An enemy combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Display name.
    pub name: String,
    /// Health, strength, and magic.
    pub stats: Stats,
    /// Experience granted when defeated.
    pub xp_reward: u32,
    /// Gold granted when defeated.
    pub gold_reward: u32,
}

impl Enemy {
    /// Create an enemy with explicit stats and rewards.
    pub fn new(name: impl Into<String>, stats: Stats, xp_reward: u32, gold_reward: u32) -> Self {
        Self {
            name: name.into(),
            stats,
            xp_reward,
            gold_reward,
        }
    }

    /// Create a fresh enemy of a built-in kind by name (case-insensitive).
    ///
    /// Unknown names fail with [`QcError::InvalidTarget`].
    pub fn spawn(kind: &str) -> Result<Self, QcError> {
        kind.parse::<EnemyKind>().map(Self::from)
    }

    /// Create a fresh enemy appropriate for a character level.
    pub fn for_level(level: u32) -> Self {
        Self::from(EnemyKind::for_level(level))
    }

    /// Rewards for defeating this enemy.
    pub fn rewards(&self) -> Rewards {
        Rewards::new(self.xp_reward, self.gold_reward)
    }
}

impl From<EnemyKind> for Enemy {
    fn from(kind: EnemyKind) -> Self {
        let (stats, rewards) = kind.template();
        Self::new(kind.name(), stats, rewards.xp, rewards.gold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_known_enemies() {
        let goblin = Enemy::spawn("goblin").unwrap();
        assert_eq!(goblin.name, "Goblin");
        assert_eq!(goblin.stats.health(), 50);
        assert_eq!(goblin.stats.strength, 8);
        assert_eq!(goblin.rewards(), Rewards::new(25, 10));

        let orc = Enemy::spawn("ORC").unwrap();
        assert_eq!(orc.stats.max_health(), 80);
        assert_eq!((orc.xp_reward, orc.gold_reward), (50, 25));

        let dragon = Enemy::spawn("Dragon").unwrap();
        assert_eq!(dragon.stats.strength, 25);
        assert_eq!((dragon.xp_reward, dragon.gold_reward), (200, 100));
    }

    #[test]
    fn spawn_unknown_enemy() {
        assert_eq!(
            Enemy::spawn("lich"),
            Err(QcError::InvalidTarget("lich".to_string()))
        );
    }

    #[test]
    fn level_brackets() {
        assert_eq!(EnemyKind::for_level(1), EnemyKind::Goblin);
        assert_eq!(EnemyKind::for_level(2), EnemyKind::Goblin);
        assert_eq!(EnemyKind::for_level(3), EnemyKind::Orc);
        assert_eq!(EnemyKind::for_level(5), EnemyKind::Orc);
        assert_eq!(EnemyKind::for_level(6), EnemyKind::Dragon);
        assert_eq!(Enemy::for_level(40).name, "Dragon");
    }
}
