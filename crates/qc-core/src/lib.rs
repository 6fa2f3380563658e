//! Core rules for Quest Chronicles.
//!
//! Provides the stat model shared by characters and enemies, a turn-based
//! combat engine with class abilities and escape, a quest graph with
//! prerequisite chains, the experience/level-up cascade, and inventory,
//! equipment, and shop bookkeeping. Nothing in this crate performs I/O.

pub mod catalog;
pub mod character;
pub mod combat;
pub mod constants;
pub mod enemy;
pub mod error;
pub mod id;
pub mod inventory;
pub mod progression;
pub mod quest;
pub mod stats;

pub use catalog::Catalog;
pub use character::{Character, CharacterClass};
pub use combat::{Battle, BattleOutcome, BattleState, PlayerAction, Tactician, start_battle};
pub use enemy::{Enemy, EnemyKind};
pub use error::{QcError, QcResult};
pub use id::{ItemId, QuestId};
pub use inventory::{EquipSlot, Inventory, Item, ItemCatalog, ItemKind, Stat, StatEffect};
pub use progression::{Rewards, gain_experience, settle_levels};
pub use quest::{QuestBook, QuestDef, QuestLog};
pub use stats::Stats;
