//! Experience and the level-up cascade.
//!
//! Advancing from level `n` costs `n * XP_PER_LEVEL` experience. A single
//! gain may cross several thresholds; each level gained raises max health,
//! strength, and magic, and refills health.

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::constants::{
    LEVEL_CAP, LEVEL_UP_MAGIC, LEVEL_UP_MAX_HEALTH, LEVEL_UP_STRENGTH, XP_PER_LEVEL,
};
use crate::error::{QcError, QcResult};

/// Experience and gold granted by a battle or a quest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    /// Experience points.
    pub xp: u32,
    /// Gold pieces.
    pub gold: u32,
}

impl Rewards {
    /// Create a reward bundle.
    pub fn new(xp: u32, gold: u32) -> Self {
        Self { xp, gold }
    }
}

impl std::ops::Add for Rewards {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            xp: self.xp.saturating_add(rhs.xp),
            gold: self.gold.saturating_add(rhs.gold),
        }
    }
}

impl std::iter::Sum for Rewards {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, r| acc + r)
    }
}

impl std::fmt::Display for Rewards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} XP, {} gold", self.xp, self.gold)
    }
}

/// Experience needed to advance from `level` to the next one.
pub fn xp_to_next_level(level: u32) -> u32 {
    level.saturating_mul(XP_PER_LEVEL)
}

/// Add experience and apply every level-up it pays for.
///
/// Dead characters cannot gain experience. Returns true if at least one
/// level was gained.
pub fn gain_experience(character: &mut Character, amount: u32) -> QcResult<bool> {
    if character.is_dead() {
        return Err(QcError::CharacterDead);
    }
    character.experience = character.experience.saturating_add(amount);
    Ok(settle_levels(character)? > 0)
}

/// Apply the level-up cascade to experience the character already holds.
///
/// Each threshold is checked against the whole pool, so one gain can cross
/// several levels; when the cascade ends only the last threshold crossed is
/// deducted. From level 1, 250 experience reaches level 3 with 50 left over.
///
/// Quest completion credits experience directly; calling this afterwards
/// turns that experience into levels without counting it twice. Returns the
/// number of levels gained. Levelling stops at [`LEVEL_CAP`]; experience
/// beyond it is kept.
pub fn settle_levels(character: &mut Character) -> QcResult<u32> {
    if character.is_dead() {
        return Err(QcError::CharacterDead);
    }
    let mut gained = 0;
    let mut crossed = 0;
    while character.level < LEVEL_CAP {
        let threshold = xp_to_next_level(character.level);
        if character.experience < threshold {
            break;
        }
        crossed = threshold;
        level_up(character);
        gained += 1;
    }
    character.experience -= crossed;
    Ok(gained)
}

fn level_up(character: &mut Character) {
    character.level += 1;
    character
        .stats
        .adjust_max_health(i64::from(LEVEL_UP_MAX_HEALTH));
    character.stats.strength = character.stats.strength.saturating_add(LEVEL_UP_STRENGTH);
    character.stats.magic = character.stats.magic.saturating_add(LEVEL_UP_MAGIC);
    character.stats.restore_full();
}
