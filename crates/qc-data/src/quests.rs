//! Quest data files.
//!
//! ```text
//! QUEST_ID: goblin_hunter
//! TITLE: Goblin Hunter
//! DESCRIPTION: Clear out goblins.
//! REWARD_XP: 150
//! REWARD_GOLD: 50
//! REQUIRED_LEVEL: 2
//! PREREQUISITE: first_steps
//! ```
//!
//! `PREREQUISITE: NONE` (any case) marks a root quest.

use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use qc_core::{QcError, QuestBook, QuestDef, QuestId};

use crate::blocks::{Block, parse_blocks};
use crate::diagnostics::Diagnostic;
use crate::error::DataResult;
use crate::{Parsed, read_data_file};

const KEYS: &[&str] = &[
    "QUEST_ID",
    "TITLE",
    "DESCRIPTION",
    "REWARD_XP",
    "REWARD_GOLD",
    "REQUIRED_LEVEL",
    "PREREQUISITE",
];

/// Sentinel value for "no prerequisite".
pub const NO_PREREQUISITE: &str = "NONE";

/// Parse quest definitions, collecting every problem.
///
/// Besides per-block errors, this reports duplicate ids, prerequisites that
/// name unknown quests, and prerequisite cycles.
pub fn parse_quests(source: &str) -> Parsed<QuestBook> {
    let (blocks, mut diagnostics) = parse_blocks(source);
    let mut book = QuestBook::new();
    let mut prerequisite_spans: HashMap<QuestId, Range<usize>> = HashMap::new();

    for block in &blocks {
        block.warn_unknown(KEYS, &mut diagnostics);
        let Some((quest, prerequisite_span)) = parse_block(block, &mut diagnostics) else {
            continue;
        };
        let id = quest.id.clone();
        if let Err(duplicate) = book.insert(quest) {
            let span = block
                .get("QUEST_ID")
                .map(|f| f.value_span.clone())
                .unwrap_or_default();
            diagnostics.push(
                Diagnostic::error(span, format!("duplicate quest id '{}'", duplicate.id))
                    .with_label("already defined earlier in the file"),
            );
            continue;
        }
        if let Some(span) = prerequisite_span {
            prerequisite_spans.insert(id, span);
        }
    }

    for quest in &book {
        let Some(prerequisite) = &quest.prerequisite else {
            continue;
        };
        let span = prerequisite_spans.get(&quest.id).cloned().unwrap_or_default();
        if !book.contains(prerequisite.as_str()) {
            diagnostics.push(
                Diagnostic::error(span, format!("unknown prerequisite '{prerequisite}'"))
                    .with_label("no quest with this id"),
            );
        } else if let Err(QcError::PrerequisiteCycle(at)) =
            book.prerequisite_chain(quest.id.as_str())
            && at == quest.id
        {
            diagnostics.push(
                Diagnostic::error(
                    span,
                    format!("quest '{}' is its own prerequisite ancestor", quest.id),
                )
                .with_label("prerequisite cycle starts here"),
            );
        }
    }

    diagnostics.sort_by_key(|d| d.span.start);
    Parsed {
        value: book,
        diagnostics,
    }
}

fn parse_block(
    block: &Block,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<(QuestDef, Option<Range<usize>>)> {
    let id = block.require("QUEST_ID", diagnostics);
    let title = block.require("TITLE", diagnostics);
    let description = block.require("DESCRIPTION", diagnostics);
    let reward_xp = block.require_number("REWARD_XP", diagnostics);
    let reward_gold = block.require_number("REWARD_GOLD", diagnostics);
    let required_level = block.require_number("REQUIRED_LEVEL", diagnostics);
    let prerequisite = block.require("PREREQUISITE", diagnostics);

    if let Some(field) = id
        && field.value.is_empty()
    {
        diagnostics.push(Diagnostic::error(field.value_span.clone(), "QUEST_ID is empty"));
        return None;
    }
    if let Some(0) = required_level
        && let Some(field) = block.get("REQUIRED_LEVEL")
    {
        diagnostics.push(Diagnostic::error(
            field.value_span.clone(),
            "REQUIRED_LEVEL must be at least 1",
        ));
        return None;
    }
    if let Some(field) = prerequisite
        && field.value.is_empty()
    {
        diagnostics.push(
            Diagnostic::error(field.value_span.clone(), "PREREQUISITE is empty")
                .with_label(format!("use a quest id or {NO_PREREQUISITE}")),
        );
        return None;
    }

    let (id, title, description, prerequisite) = (id?, title?, description?, prerequisite?);
    let mut quest = QuestDef::new(id.value.as_str(), title.value.as_str())
        .with_description(description.value.as_str())
        .with_rewards(reward_xp?, reward_gold?)
        .with_required_level(required_level?);
    let mut prerequisite_span = None;
    if !prerequisite.value.eq_ignore_ascii_case(NO_PREREQUISITE) {
        quest = quest.with_prerequisite(prerequisite.value.as_str());
        prerequisite_span = Some(prerequisite.value_span.clone());
    }
    Some((quest, prerequisite_span))
}

/// Load and validate a quest data file.
pub fn load_quests(path: &Path) -> DataResult<QuestBook> {
    let source = read_data_file(path)?;
    parse_quests(&source).into_result(path)
}
