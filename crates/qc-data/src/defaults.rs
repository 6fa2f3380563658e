//! The starter dataset written by `qc init`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DataError, DataResult};

/// Quest data file name inside the data directory.
pub const QUESTS_FILE: &str = "quests.txt";

/// Item data file name inside the data directory.
pub const ITEMS_FILE: &str = "items.txt";

/// The default quest chain: first_steps, then goblin_hunter, then
/// dragon_slayer.
pub const DEFAULT_QUESTS: &str = "\
QUEST_ID: first_steps
TITLE: First Steps
DESCRIPTION: Begin your journey.
REWARD_XP: 25
REWARD_GOLD: 10
REQUIRED_LEVEL: 1
PREREQUISITE: NONE

QUEST_ID: goblin_hunter
TITLE: Goblin Hunter
DESCRIPTION: Clear out goblins.
REWARD_XP: 150
REWARD_GOLD: 50
REQUIRED_LEVEL: 2
PREREQUISITE: first_steps

QUEST_ID: dragon_slayer
TITLE: Dragon Slayer
DESCRIPTION: Defeat the dragon.
REWARD_XP: 500
REWARD_GOLD: 300
REQUIRED_LEVEL: 3
PREREQUISITE: goblin_hunter
";

/// The default shop stock.
pub const DEFAULT_ITEMS: &str = "\
ITEM_ID: health_potion
NAME: Health Potion
TYPE: consumable
EFFECT: health:20
COST: 25
DESCRIPTION: Restores 20 HP.

ITEM_ID: iron_sword
NAME: Iron Sword
TYPE: weapon
EFFECT: strength:5
COST: 100
DESCRIPTION: A sturdy iron blade.

ITEM_ID: leather_armor
NAME: Leather Armor
TYPE: armor
EFFECT: max_health:10
COST: 80
DESCRIPTION: Light protective armor.
";

/// Write the default quest and item files into `dir`, creating it if needed.
/// Existing files are left alone. Returns the paths that were written.
pub fn create_default_data_files(dir: &Path) -> DataResult<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
    let mut written = Vec::new();
    for (name, contents) in [(QUESTS_FILE, DEFAULT_QUESTS), (ITEMS_FILE, DEFAULT_ITEMS)] {
        let path = dir.join(name);
        if path.exists() {
            continue;
        }
        fs::write(&path, contents).map_err(|e| io_error(&path, e))?;
        written.push(path);
    }
    Ok(written)
}

pub(crate) fn io_error(path: &Path, source: std::io::Error) -> DataError {
    DataError::Io {
        path: path.to_path_buf(),
        source,
    }
}
