//! Error types for the core rules.

use crate::id::{ItemId, QuestId};
use crate::inventory::ItemKind;

/// Alias for `Result<T, QcError>`.
pub type QcResult<T> = Result<T, QcError>;

/// Errors raised by combat, quest, progression, and inventory operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QcError {
    /// The character has no health left.
    #[error("character is dead")]
    CharacterDead,

    /// An enemy type that does not exist was requested.
    #[error("unknown enemy type: {0}")]
    InvalidTarget(String),

    /// A battle action was attempted outside an active battle.
    #[error("battle is not active")]
    CombatNotActive,

    /// The quest id is not in the quest dataset.
    #[error("quest not found: {0}")]
    QuestNotFound(QuestId),

    /// The quest is not in the character's active set.
    #[error("quest '{0}' is not active")]
    QuestNotActive(QuestId),

    /// The quest was already completed and cannot be accepted again.
    #[error("quest '{0}' already completed")]
    QuestAlreadyCompleted(QuestId),

    /// The quest is already in the character's active set.
    #[error("quest '{0}' already active")]
    QuestAlreadyActive(QuestId),

    /// The quest's prerequisite has not been completed.
    #[error("quest '{quest}' requires completing '{prerequisite}' first")]
    QuestRequirementsNotMet {
        /// The quest being accepted.
        quest: QuestId,
        /// The prerequisite that is still outstanding.
        prerequisite: QuestId,
    },

    /// The character's level is below the quest's requirement.
    #[error("quest '{quest}' requires level {required} (current level {actual})")]
    InsufficientLevel {
        /// The quest being accepted.
        quest: QuestId,
        /// Minimum level for the quest.
        required: u32,
        /// The character's level.
        actual: u32,
    },

    /// Following prerequisite edges from this quest revisits a quest.
    #[error("prerequisite cycle detected at quest '{0}'")]
    PrerequisiteCycle(QuestId),

    /// The character class name is not one of the playable classes.
    #[error("invalid character class: {0}")]
    InvalidCharacterClass(String),

    /// A character record violates one of its invariants.
    #[error("invalid character data: {0}")]
    InvalidCharacterData(String),

    /// The inventory has no free slot.
    #[error("inventory is full ({capacity} items)")]
    InventoryFull {
        /// Inventory capacity.
        capacity: usize,
    },

    /// The item is not in the inventory or the item catalog.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// The item cannot be used in the requested way.
    #[error("item '{item}' is not a {expected} item")]
    InvalidItemType {
        /// The offending item.
        item: ItemId,
        /// The kind the operation needs.
        expected: ItemKind,
    },

    /// An item effect string could not be parsed.
    #[error("invalid item effect: {0}")]
    InvalidItemEffect(String),

    /// Not enough gold for the purchase or deduction.
    #[error("not enough gold: need {required}, have {available}")]
    InsufficientGold {
        /// Gold the operation needs.
        required: u64,
        /// Gold the character has.
        available: u64,
    },
}

impl QcError {
    /// Returns true for the conditions the quest board reports as
    /// "requirements not met": an outstanding prerequisite or a quest that is
    /// already being worked on.
    pub fn is_unmet_requirement(&self) -> bool {
        matches!(
            self,
            Self::QuestRequirementsNotMet { .. } | Self::QuestAlreadyActive(_)
        )
    }
}
