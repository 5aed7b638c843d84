//! File layout of a store data directory.

use std::path::{Path, PathBuf};

pub const INVENTORY_FILE: &str = "inventory.csv";
pub const HISTORY_FILE: &str = "history.csv";
pub const TECHNICIANS_FILE: &str = "technicians.txt";
pub const AUTHORIZED_IDS_FILE: &str = "authorized_ids.txt";

/// Resolved locations of the four files backing a store.
#[derive(Debug, Clone)]
pub struct StorePaths {
    data_dir: PathBuf,
}

impl StorePaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StorePaths {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn inventory(&self) -> PathBuf {
        self.data_dir.join(INVENTORY_FILE)
    }

    pub fn history(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }

    pub fn technicians(&self) -> PathBuf {
        self.data_dir.join(TECHNICIANS_FILE)
    }

    pub fn authorized_ids(&self) -> PathBuf {
        self.data_dir.join(AUTHORIZED_IDS_FILE)
    }
}
