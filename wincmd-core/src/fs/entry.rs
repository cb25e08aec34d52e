//! Directory entries as shown by a listing.

use chrono::NaiveDateTime;
use log::warn;

/// Timestamp layout used by `dir`.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y  %I:%M %p";

/// Attribute tag carried by directories.
pub const DIR_TAG: &str = "<DIR>";

/// One file or subdirectory inside a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_directory: bool,
    /// Informational attribute string; `H` marks a hidden entry.
    pub attributes: String,
    /// Human-formatted size (`187,456`), files only.
    pub size: Option<String>,
    pub last_modified: NaiveDateTime,
}

impl DirectoryEntry {
    pub fn directory(name: &str, last_modified: NaiveDateTime) -> Self {
        Self {
            name: name.to_string(),
            is_directory: true,
            attributes: DIR_TAG.to_string(),
            size: None,
            last_modified,
        }
    }

    pub fn file(name: &str, size: &str, last_modified: NaiveDateTime) -> Self {
        Self {
            name: name.to_string(),
            is_directory: false,
            attributes: String::new(),
            size: Some(size.to_string()),
            last_modified,
        }
    }

    pub fn with_attributes(mut self, attributes: &str) -> Self {
        self.attributes = attributes.to_string();
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.attributes.contains('H')
    }

    /// Size in bytes with thousands separators stripped.
    /// Unparsable or missing sizes count as zero.
    pub fn size_bytes(&self) -> u64 {
        let Some(size) = self.size.as_deref() else {
            return 0;
        };
        match size.replace(',', "").trim().parse() {
            Ok(bytes) => bytes,
            Err(_) => {
                warn!("unparsable size {:?} for {}", size, self.name);
                0
            }
        }
    }

    pub fn timestamp(&self) -> String {
        self.last_modified.format(TIMESTAMP_FORMAT).to_string()
    }

    /// One line of a full `dir` listing.
    pub fn listing_line(&self) -> String {
        if self.is_directory {
            format!("{}    {:<8} {}", self.timestamp(), self.attributes, self.name)
        } else {
            let size = self.size.as_deref().unwrap_or("");
            format!("{}    {:>15} {}", self.timestamp(), size, self.name)
        }
    }
}
