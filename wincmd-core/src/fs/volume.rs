//! Path-keyed directory table.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::entry::DirectoryEntry;
use super::path::{self, ROOT};
use crate::error::{ShellError, ShellResult};

/// In-memory volume: absolute path -> ordered entries.
///
/// Every key must be reachable from the root by following directory entries;
/// `validate` checks this, nothing else enforces it. Entry order is insertion
/// order and is the listing order.
#[derive(Debug, Clone)]
pub struct VirtualFs {
    dirs: BTreeMap<String, Vec<DirectoryEntry>>,
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFs {
    /// Create a volume holding only an empty root.
    pub fn new() -> Self {
        let mut dirs = BTreeMap::new();
        dirs.insert(ROOT.to_string(), Vec::new());
        Self { dirs }
    }

    /// Add or replace a directory with the given entries.
    pub fn insert_directory(&mut self, dir: &str, entries: Vec<DirectoryEntry>) {
        let key = self.find(dir).map(str::to_string).unwrap_or_else(|| path::normalize(dir));
        self.dirs.insert(key, entries);
    }

    /// Canonical key for `dir`: exact match first, then case-insensitive.
    pub fn find(&self, dir: &str) -> Option<&str> {
        if let Some((key, _)) = self.dirs.get_key_value(dir) {
            return Some(key.as_str());
        }
        self.dirs
            .keys()
            .find(|key| key.eq_ignore_ascii_case(dir))
            .map(String::as_str)
    }

    pub fn contains(&self, dir: &str) -> bool {
        self.find(dir).is_some()
    }

    pub fn entries(&self, dir: &str) -> Option<&[DirectoryEntry]> {
        let key = self.find(dir)?;
        self.dirs.get(key).map(Vec::as_slice)
    }

    /// Subdirectory entries of `dir` with the table key each one maps to,
    /// if it has one.
    pub fn subdirectories(&self, dir: &str) -> Vec<(&DirectoryEntry, Option<&str>)> {
        let Some(key) = self.find(dir) else {
            return Vec::new();
        };
        self.dirs[key]
            .iter()
            .filter(|e| e.is_directory)
            .map(|e| (e, self.find(&path::join(key, &e.name))))
            .collect()
    }

    /// All directory keys.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.dirs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Check the root exists and every key is reachable from it.
    pub fn validate(&self) -> ShellResult<()> {
        let root = self
            .find(ROOT)
            .ok_or_else(|| ShellError::InvalidSeed(format!("missing root {}", ROOT)))?;

        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut queue = VecDeque::from([root]);
        while let Some(dir) = queue.pop_front() {
            if !seen.insert(dir) {
                continue;
            }
            for (_, child) in self.subdirectories(dir) {
                if let Some(child) = child {
                    queue.push_back(child);
                }
            }
        }

        match self.paths().find(|key| !seen.contains(key)) {
            Some(orphan) => Err(ShellError::InvalidSeed(format!(
                "{} is not reachable from {}",
                orphan, ROOT
            ))),
            None => Ok(()),
        }
    }
}
