//! Player actions, damage formulas, and the battle log.

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::character::CharacterClass;
use crate::constants::{
    CLERIC_HEAL, CRITICAL_STRIKE_CHANCE, CRITICAL_STRIKE_MULTIPLIER, ESCAPE_CHANCE,
    FIREBALL_MULTIPLIER, POWER_STRIKE_MULTIPLIER,
};
use crate::stats::Stats;

/// What the player does on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Basic attack.
    Attack,
    /// The class's special ability.
    Ability,
    /// Try to run away.
    Flee,
}

impl std::fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack => write!(f, "Attack"),
            Self::Ability => write!(f, "Special Ability"),
            Self::Flee => write!(f, "Try to Run"),
        }
    }
}

impl FromStr for PlayerAction {
    type Err = String;

    /// Accepts the action name or its menu number (1 to 3).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "attack" | "a" => Ok(Self::Attack),
            "2" | "ability" | "special" | "s" => Ok(Self::Ability),
            "3" | "flee" | "run" | "f" => Ok(Self::Flee),
            other => Err(format!("unknown battle action '{other}'")),
        }
    }
}

/// Who acted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    /// The player character.
    Player,
    /// The enemy.
    Enemy,
}

/// The mechanical result of one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionEffect {
    /// Health removed from the opponent.
    Damage(u32),
    /// Health restored to the actor.
    Heal(u32),
    /// The action had no effect.
    Miss,
    /// The player got away.
    Escaped,
    /// The escape attempt failed.
    EscapeFailed,
}

/// A recorded battle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleEvent {
    /// Round the event happened in (1-based).
    pub round: u32,
    /// Who acted.
    pub actor: Actor,
    /// What the action did.
    pub effect: ActionEffect,
    /// One-line narration.
    pub description: String,
}

impl std::fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description)
    }
}

/// Basic attack damage: the attacker's strength less a quarter of the
/// defender's, never below 1.
pub fn calculate_damage(attacker: &Stats, defender: &Stats) -> u32 {
    attacker
        .strength
        .saturating_sub(defender.strength / 4)
        .max(1)
}

/// Resolve a class ability. Damage is applied to `target`, healing to
/// `user`; both are clamped.
pub fn resolve_ability<R>(
    class: CharacterClass,
    user: &mut Stats,
    target: &mut Stats,
    rng: &mut R,
) -> ActionEffect
where
    R: Rng + ?Sized,
{
    match class {
        CharacterClass::Warrior => {
            let damage = user.strength.saturating_mul(POWER_STRIKE_MULTIPLIER);
            ActionEffect::Damage(target.take_damage(damage))
        }
        CharacterClass::Mage => {
            let damage = user.magic.saturating_mul(FIREBALL_MULTIPLIER);
            ActionEffect::Damage(target.take_damage(damage))
        }
        CharacterClass::Rogue => {
            if rng.random_bool(CRITICAL_STRIKE_CHANCE) {
                let damage = user.strength.saturating_mul(CRITICAL_STRIKE_MULTIPLIER);
                ActionEffect::Damage(target.take_damage(damage))
            } else {
                ActionEffect::Miss
            }
        }
        CharacterClass::Cleric => ActionEffect::Heal(user.heal(CLERIC_HEAL)),
    }
}

/// Roll an escape attempt.
pub fn attempt_escape<R>(rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    rng.random_bool(ESCAPE_CHANCE)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::RngCore;

    /// An RNG that always yields the same word. `Fixed(0)` makes every
    /// 50% roll succeed; `Fixed(u64::MAX)` makes every one fail.
    pub(crate) struct Fixed(pub u64);

    impl RngCore for Fixed {
        fn next_u32(&mut self) -> u32 {
            self.0 as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for (i, byte) in dst.iter_mut().enumerate() {
                *byte = self.0.to_le_bytes()[i % 8];
            }
        }
    }

    #[test]
    fn damage_reduced_by_defense() {
        let warrior = Stats::new(120, 15, 5);
        let goblin = Stats::new(50, 8, 2);
        assert_eq!(calculate_damage(&warrior, &goblin), 13);
        assert_eq!(calculate_damage(&goblin, &warrior), 5);
    }

    #[test]
    fn damage_floor_is_one() {
        let weak = Stats::new(10, 1, 0);
        let dragon = Stats::new(200, 25, 15);
        assert_eq!(calculate_damage(&weak, &dragon), 1);
    }

    #[test]
    fn warrior_power_strike() {
        let mut user = Stats::new(120, 15, 5);
        let mut target = Stats::new(50, 8, 2);
        let effect =
            resolve_ability(CharacterClass::Warrior, &mut user, &mut target, &mut Fixed(0));
        assert_eq!(effect, ActionEffect::Damage(30));
        assert_eq!(target.health(), 20);
    }

    #[test]
    fn mage_fireball_overkill_is_clamped() {
        let mut user = Stats::new(80, 8, 20);
        let mut target = Stats::with_health(25, 50, 8, 2);
        let effect = resolve_ability(CharacterClass::Mage, &mut user, &mut target, &mut Fixed(0));
        assert_eq!(effect, ActionEffect::Damage(25));
        assert_eq!(target.health(), 0);
    }

    #[test]
    fn rogue_critical_hit_and_miss() {
        let mut user = Stats::new(90, 12, 10);
        let mut target = Stats::new(200, 25, 15);
        let hit = resolve_ability(CharacterClass::Rogue, &mut user, &mut target, &mut Fixed(0));
        assert_eq!(hit, ActionEffect::Damage(36));
        let miss = resolve_ability(
            CharacterClass::Rogue,
            &mut user,
            &mut target,
            &mut Fixed(u64::MAX),
        );
        assert_eq!(miss, ActionEffect::Miss);
        assert_eq!(target.health(), 164);
    }

    #[test]
    fn cleric_heal_is_capped() {
        let mut user = Stats::with_health(90, 100, 10, 15);
        let mut target = Stats::new(50, 8, 2);
        let effect = resolve_ability(CharacterClass::Cleric, &mut user, &mut target, &mut Fixed(0));
        assert_eq!(effect, ActionEffect::Heal(10));
        assert!(user.is_full());
        assert!(target.is_full());
    }

    #[test]
    fn escape_rolls() {
        assert!(attempt_escape(&mut Fixed(0)));
        assert!(!attempt_escape(&mut Fixed(u64::MAX)));
    }

    #[test]
    fn parse_actions() {
        assert_eq!("1".parse::<PlayerAction>().unwrap(), PlayerAction::Attack);
        assert_eq!("Ability".parse::<PlayerAction>().unwrap(), PlayerAction::Ability);
        assert_eq!(" run ".parse::<PlayerAction>().unwrap(), PlayerAction::Flee);
        assert!("dance".parse::<PlayerAction>().is_err());
    }

    proptest! {
        #[test]
        fn damage_always_positive(
            attack in any::<u32>(),
            defense in any::<u32>(),
        ) {
            let attacker = Stats::new(1, attack, 0);
            let defender = Stats::new(1, defense, 0);
            prop_assert!(calculate_damage(&attacker, &defender) >= 1);
        }
    }
}
