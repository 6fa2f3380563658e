//! Quest eligibility, state transitions, and prerequisite chains.

use std::collections::HashSet;

use super::{QuestBook, QuestDef};
use crate::character::Character;
use crate::error::{QcError, QcResult};
use crate::id::QuestId;
use crate::progression::Rewards;

/// Returns true if the character has completed the quest.
pub fn is_completed(character: &Character, id: &str) -> bool {
    character.quests.is_completed(id)
}

/// Returns true if the quest is in the character's active set.
pub fn is_active(character: &Character, id: &str) -> bool {
    character.quests.is_active(id)
}

/// Drop an active quest without completing it. Completed quests are
/// unaffected.
pub fn abandon(character: &mut Character, id: &str) -> QcResult<()> {
    if character.quests.abandon(id) {
        Ok(())
    } else {
        Err(QcError::QuestNotActive(QuestId::new(id)))
    }
}

impl QuestBook {
    /// Check whether the character may accept a quest, returning its
    /// definition.
    ///
    /// Conditions are checked in a fixed order, and the first failure is
    /// reported: unknown quest, already completed, already active, level
    /// too low, prerequisite outstanding.
    pub fn check_accept(&self, character: &Character, id: &str) -> QcResult<&QuestDef> {
        let quest = self
            .get(id)
            .ok_or_else(|| QcError::QuestNotFound(QuestId::new(id)))?;
        if character.quests.is_completed(id) {
            return Err(QcError::QuestAlreadyCompleted(quest.id.clone()));
        }
        if character.quests.is_active(id) {
            return Err(QcError::QuestAlreadyActive(quest.id.clone()));
        }
        if character.level < quest.required_level {
            return Err(QcError::InsufficientLevel {
                quest: quest.id.clone(),
                required: quest.required_level,
                actual: character.level,
            });
        }
        if let Some(prerequisite) = &quest.prerequisite
            && !character.quests.is_completed(prerequisite)
        {
            return Err(QcError::QuestRequirementsNotMet {
                quest: quest.id.clone(),
                prerequisite: prerequisite.clone(),
            });
        }
        Ok(quest)
    }

    /// Returns true if [`check_accept`](Self::check_accept) would succeed.
    pub fn can_accept(&self, character: &Character, id: &str) -> bool {
        self.check_accept(character, id).is_ok()
    }

    /// Add a quest to the character's active set.
    pub fn accept(&self, character: &mut Character, id: &str) -> QcResult<()> {
        let quest = self.check_accept(character, id)?;
        character.quests.activate(quest.id.clone());
        Ok(())
    }

    /// Complete an active quest and credit its rewards.
    ///
    /// Experience and gold are added directly; levels are not recalculated.
    /// Callers that want the level-up cascade follow this with
    /// [`settle_levels`](crate::progression::settle_levels).
    pub fn complete(&self, character: &mut Character, id: &str) -> QcResult<Rewards> {
        let quest = self
            .get(id)
            .ok_or_else(|| QcError::QuestNotFound(QuestId::new(id)))?;
        if !character.quests.complete(id) {
            return Err(QcError::QuestNotActive(quest.id.clone()));
        }
        let rewards = quest.rewards();
        character.experience = character.experience.saturating_add(rewards.xp);
        character.gold = character.gold.saturating_add(rewards.gold);
        Ok(rewards)
    }

    /// Quests the character can accept right now, in dataset order.
    pub fn available_quests(&self, character: &Character) -> Vec<&QuestDef> {
        self.iter()
            .filter(|q| self.can_accept(character, q.id.as_str()))
            .collect()
    }

    /// Definitions of the character's active quests. Ids missing from the
    /// dataset are skipped.
    pub fn active_quests(&self, character: &Character) -> Vec<&QuestDef> {
        self.resolve(character.quests.active())
    }

    /// Definitions of the character's completed quests. Ids missing from the
    /// dataset are skipped.
    pub fn completed_quests(&self, character: &Character) -> Vec<&QuestDef> {
        self.resolve(character.quests.completed())
    }

    fn resolve(&self, ids: &[QuestId]) -> Vec<&QuestDef> {
        ids.iter().filter_map(|id| self.get(id.as_str())).collect()
    }

    /// The prerequisite path ending at `id`, earliest ancestor first.
    ///
    /// Fails with [`QcError::QuestNotFound`] if the quest or any ancestor is
    /// unknown, and with [`QcError::PrerequisiteCycle`] if the path loops.
    pub fn prerequisite_chain(&self, id: &str) -> QcResult<Vec<QuestId>> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = self
            .get(id)
            .ok_or_else(|| QcError::QuestNotFound(QuestId::new(id)))?;
        loop {
            if !visited.insert(current.id.as_str()) {
                return Err(QcError::PrerequisiteCycle(current.id.clone()));
            }
            chain.push(current.id.clone());
            let Some(prerequisite) = &current.prerequisite else {
                break;
            };
            current = self
                .get(prerequisite.as_str())
                .ok_or_else(|| QcError::QuestNotFound(prerequisite.clone()))?;
        }
        chain.reverse();
        Ok(chain)
    }

    /// Completed quests as a percentage of the dataset size. Every completed
    /// id counts, including ids the dataset no longer defines. An empty
    /// dataset yields 0.0.
    pub fn completion_percentage(&self, character: &Character) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let completed = character.quests.completed().len();
        100.0 * completed as f64 / self.len() as f64
    }

    /// Sum of rewards over completed quests still present in the dataset.
    pub fn total_rewards_earned(&self, character: &Character) -> Rewards {
        self.completed_quests(character)
            .into_iter()
            .map(QuestDef::rewards)
            .sum()
    }

    /// Quests whose required level lies in `min..=max`, in dataset order.
    pub fn quests_by_level(&self, min: u32, max: u32) -> Vec<&QuestDef> {
        self.iter()
            .filter(|q| (min..=max).contains(&q.required_level))
            .collect()
    }

    /// Check that every prerequisite names a known quest and that no quest
    /// is its own ancestor.
    pub fn validate(&self) -> QcResult<()> {
        for quest in self {
            self.prerequisite_chain(quest.id.as_str())?;
        }
        Ok(())
    }
}
