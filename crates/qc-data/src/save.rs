//! Character save files.
//!
//! Each character lives in `{name}_save.txt` inside the save directory, one
//! `KEY: VALUE` line per field. Lists are comma-separated; an empty value is
//! an empty list. Stats are stored with equipment bonuses already applied.

use std::fs;
use std::path::{Path, PathBuf};

use qc_core::{Character, CharacterClass, ItemId, QuestId, QuestLog, Stats};

use crate::blocks::{Block, parse_blocks};
use crate::defaults::io_error;
use crate::error::{DataError, DataResult};

const SAVE_SUFFIX: &str = "_save.txt";

/// Path of a character's save file. Names that would escape the save
/// directory or break the line format are rejected.
pub fn save_path(dir: &Path, name: &str) -> DataResult<PathBuf> {
    let bad_char = |c: char| matches!(c, '/' | '\\' | ',') || c.is_control();
    if name.trim().is_empty()
        || name != name.trim()
        || name.contains("..")
        || name.contains(bad_char)
    {
        return Err(DataError::InvalidSaveData(format!(
            "'{name}' cannot be used as a character name"
        )));
    }
    Ok(dir.join(format!("{name}{SAVE_SUFFIX}")))
}

/// Render a character in the save format.
pub fn format_save(character: &Character) -> String {
    let join = |ids: &[QuestId]| {
        ids.iter()
            .map(QuestId::as_str)
            .collect::<Vec<_>>()
            .join(",")
    };
    let inventory = character
        .inventory
        .items()
        .iter()
        .map(ItemId::as_str)
        .collect::<Vec<_>>()
        .join(",");
    let stats = &character.stats;

    let mut out = String::new();
    let mut line = |key: &str, value: &dyn std::fmt::Display| {
        out.push_str(&format!("{key}: {value}\n"));
    };
    line("NAME", &character.name);
    line("CLASS", &character.class);
    line("LEVEL", &character.level);
    line("HEALTH", &stats.health());
    line("MAX_HEALTH", &stats.max_health());
    line("STRENGTH", &stats.strength);
    line("MAGIC", &stats.magic);
    line("EXPERIENCE", &character.experience);
    line("GOLD", &character.gold);
    line("INVENTORY", &inventory);
    line("ACTIVE_QUESTS", &join(character.quests.active()));
    line("COMPLETED_QUESTS", &join(character.quests.completed()));
    if let Some(weapon) = &character.equipment.weapon {
        line("EQUIPPED_WEAPON", weapon);
    }
    if let Some(armor) = &character.equipment.armor {
        line("EQUIPPED_ARMOR", armor);
    }
    out
}

/// Rebuild a character from save file text and check its invariants.
pub fn parse_save(source: &str) -> DataResult<Character> {
    let (blocks, diagnostics) = parse_blocks(source);
    if let Some(first) = diagnostics.first() {
        return Err(invalid(format!("line {}: {}", first.line(source), first.message)));
    }
    let block = match blocks.as_slice() {
        [] => return Err(invalid("save file is empty")),
        [block] => block,
        [_, ..] => return Err(invalid("save file must not contain blank lines")),
    };

    let name = text(block, "NAME")?;
    let class = text(block, "CLASS")?
        .parse::<CharacterClass>()
        .map_err(|e| invalid(e.to_string()))?;
    let health = number(block, "HEALTH")?;
    let max_health = number(block, "MAX_HEALTH")?;
    if health > max_health {
        return Err(invalid(format!(
            "health {health} exceeds max health {max_health}"
        )));
    }

    let mut character = Character::new(name, class);
    character.level = number(block, "LEVEL")?;
    character.experience = number(block, "EXPERIENCE")?;
    character.gold = number(block, "GOLD")?;
    character.stats = Stats::with_health(
        health,
        max_health,
        number(block, "STRENGTH")?,
        number(block, "MAGIC")?,
    );

    for item in list(text(block, "INVENTORY")?) {
        character
            .inventory
            .add(item)
            .map_err(|e| invalid(e.to_string()))?;
    }
    let active = list(text(block, "ACTIVE_QUESTS")?).map(QuestId::new).collect();
    let completed = list(text(block, "COMPLETED_QUESTS")?).map(QuestId::new).collect();
    character.quests = QuestLog::from_parts(active, completed).map_err(|e| invalid(e.to_string()))?;

    character.equipment.weapon = optional(block, "EQUIPPED_WEAPON").map(ItemId::new);
    character.equipment.armor = optional(block, "EQUIPPED_ARMOR").map(ItemId::new);

    character.validate().map_err(|e| invalid(e.to_string()))?;
    Ok(character)
}

fn invalid(message: impl Into<String>) -> DataError {
    DataError::InvalidSaveData(message.into())
}

fn text<'a>(block: &'a Block, key: &str) -> DataResult<&'a str> {
    block
        .get(key)
        .map(|f| f.value.as_str())
        .ok_or_else(|| invalid(format!("missing field {key}")))
}

fn number(block: &Block, key: &str) -> DataResult<u32> {
    let value = text(block, key)?;
    value
        .parse()
        .map_err(|_| invalid(format!("{key} must be a whole number, found '{value}'")))
}

fn optional<'a>(block: &'a Block, key: &str) -> Option<&'a str> {
    block
        .get(key)
        .map(|f| f.value.as_str())
        .filter(|v| !v.is_empty())
}

fn list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Write a character's save file, creating the directory if needed.
pub fn save_character(dir: &Path, character: &Character) -> DataResult<PathBuf> {
    let path = save_path(dir, &character.name)?;
    fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
    fs::write(&path, format_save(character)).map_err(|e| io_error(&path, e))?;
    Ok(path)
}

/// Load a character by name.
pub fn load_character(dir: &Path, name: &str) -> DataResult<Character> {
    let path = save_path(dir, name)?;
    if !path.exists() {
        return Err(DataError::CharacterNotFound(name.to_string()));
    }
    let source = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
    parse_save(&source)
}

/// Names of every saved character, sorted. A missing directory has none.
pub fn list_saved_characters(dir: &Path) -> DataResult<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(dir).map_err(|e| io_error(dir, e))?;
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| {
            e.file_name()
                .to_str()
                .and_then(|f| f.strip_suffix(SAVE_SUFFIX))
                .filter(|n| !n.is_empty())
                .map(str::to_string)
        })
        .collect();
    names.sort();
    Ok(names)
}

/// Delete a character's save file.
pub fn delete_character(dir: &Path, name: &str) -> DataResult<()> {
    let path = save_path(dir, name)?;
    if !path.exists() {
        return Err(DataError::CharacterNotFound(name.to_string()));
    }
    fs::remove_file(&path).map_err(|e| io_error(&path, e))
}
