//! Quest definitions and the per-character quest log.
//!
//! A [`QuestBook`] holds every quest definition in dataset order. Each quest
//! has at most one prerequisite, so the prerequisite relation forms a
//! forest; [`QuestBook::validate`] rejects datasets where it does not.

mod graph;
mod log;

pub use graph::{abandon, is_active, is_completed};
pub use log::QuestLog;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Keyed};
use crate::id::QuestId;
use crate::progression::Rewards;

/// An immutable quest definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDef {
    /// Unique quest id.
    pub id: QuestId,
    /// Display title.
    pub title: String,
    /// Quest text.
    pub description: String,
    /// Experience granted on completion.
    pub reward_xp: u32,
    /// Gold granted on completion.
    pub reward_gold: u32,
    /// Minimum character level to accept.
    pub required_level: u32,
    /// Quest that must be completed first, if any.
    pub prerequisite: Option<QuestId>,
}

impl QuestDef {
    /// Create a level 1 quest with no rewards and no prerequisite.
    pub fn new(id: impl Into<QuestId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            reward_xp: 0,
            reward_gold: 0,
            required_level: 1,
            prerequisite: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the completion rewards.
    pub fn with_rewards(mut self, xp: u32, gold: u32) -> Self {
        self.reward_xp = xp;
        self.reward_gold = gold;
        self
    }

    /// Set the required level.
    pub fn with_required_level(mut self, level: u32) -> Self {
        self.required_level = level;
        self
    }

    /// Set the prerequisite quest.
    pub fn with_prerequisite(mut self, prerequisite: impl Into<QuestId>) -> Self {
        self.prerequisite = Some(prerequisite.into());
        self
    }

    /// Rewards granted on completion.
    pub fn rewards(&self) -> Rewards {
        Rewards::new(self.reward_xp, self.reward_gold)
    }
}

impl Keyed for QuestDef {
    type Key = QuestId;

    fn key(&self) -> &QuestId {
        &self.id
    }
}

/// All quest definitions, in dataset order.
pub type QuestBook = Catalog<QuestDef>;
