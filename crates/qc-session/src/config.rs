//! Configuration for a game session.

use std::path::{Path, PathBuf};

use qc_data::{ITEMS_FILE, QUESTS_FILE};

/// Gold charged to revive a fallen character.
pub const DEFAULT_REVIVE_COST: u32 = 50;

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible battles. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Directory holding the quest and item data files.
    pub data_dir: PathBuf,
    /// Directory holding save files; defaults to `save_games` inside the
    /// data directory.
    pub save_dir: Option<PathBuf>,
    /// Gold charged by `revive`.
    pub revive_cost: u32,
    /// Save after every command that changes the character.
    pub autosave: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            data_dir: PathBuf::from("data"),
            save_dir: None,
            revive_cost: DEFAULT_REVIVE_COST,
            autosave: true,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the save directory.
    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = Some(dir.into());
        self
    }

    /// Set the revive cost.
    pub fn with_revive_cost(mut self, cost: u32) -> Self {
        self.revive_cost = cost;
        self
    }

    /// Enable or disable autosave.
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Where save files live.
    pub fn save_dir(&self) -> PathBuf {
        self.save_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("save_games"))
    }

    /// Path of the quest data file.
    pub fn quests_path(&self) -> PathBuf {
        self.data_dir.join(QUESTS_FILE)
    }

    /// Path of the item data file.
    pub fn items_path(&self) -> PathBuf {
        self.data_dir.join(ITEMS_FILE)
    }

    /// The data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
