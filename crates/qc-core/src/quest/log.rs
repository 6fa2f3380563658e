//! A character's active and completed quests.

use serde::{Deserialize, Serialize};

use crate::error::{QcError, QcResult};
use crate::id::QuestId;

/// The quests a character is working on and has finished.
///
/// Both lists are duplicate-free and disjoint. Quest ids move from active to
/// completed, or leave the active list when abandoned; completion is
/// permanent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestLog {
    active: Vec<QuestId>,
    completed: Vec<QuestId>,
}

impl QuestLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from saved lists, rejecting duplicates and overlaps.
    pub fn from_parts(active: Vec<QuestId>, completed: Vec<QuestId>) -> QcResult<Self> {
        let mut seen = std::collections::HashSet::new();
        for id in active.iter().chain(&completed) {
            if !seen.insert(id) {
                return Err(QcError::InvalidCharacterData(format!(
                    "quest '{id}' listed more than once"
                )));
            }
        }
        Ok(Self { active, completed })
    }

    /// Active quest ids in acceptance order.
    pub fn active(&self) -> &[QuestId] {
        &self.active
    }

    /// Completed quest ids in completion order.
    pub fn completed(&self) -> &[QuestId] {
        &self.completed
    }

    /// Returns true if the quest is active.
    pub fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|q| q == id)
    }

    /// Returns true if the quest has been completed.
    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.iter().any(|q| q == id)
    }

    pub(crate) fn activate(&mut self, id: QuestId) {
        self.active.push(id);
    }

    /// Move a quest from active to completed. Returns false if it was not
    /// active.
    pub(crate) fn complete(&mut self, id: &str) -> bool {
        match self.active.iter().position(|q| q == id) {
            Some(pos) => {
                let id = self.active.remove(pos);
                self.completed.push(id);
                true
            }
            None => false,
        }
    }

    /// Drop an active quest. Returns false if it was not active.
    pub(crate) fn abandon(&mut self, id: &str) -> bool {
        let before = self.active.len();
        self.active.retain(|q| q != id);
        self.active.len() < before
    }
}
