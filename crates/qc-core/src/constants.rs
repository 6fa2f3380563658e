//! Game balance constants.

/// Maximum number of items a character can carry.
pub const MAX_INVENTORY_SIZE: usize = 20;

/// Gold a freshly created character starts with.
pub const STARTING_GOLD: u32 = 100;

/// Experience cost per level: advancing from level `n` costs `n * XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u32 = 100;

/// Highest level reachable through the level-up cascade.
pub const LEVEL_CAP: u32 = 100;

/// Max health gained per level.
pub const LEVEL_UP_MAX_HEALTH: u32 = 10;

/// Strength gained per level.
pub const LEVEL_UP_STRENGTH: u32 = 2;

/// Magic gained per level.
pub const LEVEL_UP_MAGIC: u32 = 2;

/// Warrior Power Strike: multiple of strength dealt as damage.
pub const POWER_STRIKE_MULTIPLIER: u32 = 2;

/// Mage Fireball: multiple of magic dealt as damage.
pub const FIREBALL_MULTIPLIER: u32 = 2;

/// Rogue Critical Strike: multiple of strength dealt on a hit.
pub const CRITICAL_STRIKE_MULTIPLIER: u32 = 3;

/// Probability that a Rogue Critical Strike lands.
pub const CRITICAL_STRIKE_CHANCE: f64 = 0.5;

/// Health restored by the Cleric Heal ability.
pub const CLERIC_HEAL: u32 = 30;

/// Probability that an escape attempt succeeds.
pub const ESCAPE_CHANCE: f64 = 0.5;
