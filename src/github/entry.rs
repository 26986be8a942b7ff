//! Directory listing entries returned by the Contents API

use serde::{Deserialize, Serialize};

/// One entry of a GitHub directory listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    /// symlink, submodule
    #[serde(other)]
    Other,
}

impl RepoEntry {
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }
}

/// Decode a listing body. Anything other than a JSON array (a single file's
/// metadata object, an error object) yields `None`.
pub fn parse_listing(body: &str) -> Option<Vec<RepoEntry>> {
    serde_json::from_str(body).ok()
}
