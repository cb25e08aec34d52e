//! Seed documents: the initial filesystem and environment.
//!
//! A seed is a JSON document, either loose or stored as `seed.json` inside a
//! ZIP archive. Without one, `SeedImage::builtin` supplies the stock volume.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use zip::ZipArchive;

use crate::env::Environment;
use crate::error::{ShellError, ShellResult};
use crate::fs::{DirectoryEntry, VirtualFs};
use crate::session::Session;

pub const DEFAULT_USER: &str = "User";
pub const DEFAULT_COMPUTER: &str = "TEXTYOS-PC";

/// Name of the seed document inside an archive.
pub const SEED_FILE: &str = "seed.json";

/// Layout of `modified` timestamps in seed documents.
pub const SEED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedVariable {
    pub name: String,
    pub value: String,
}

/// One directory entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedEntry {
    pub name: String,
    #[serde(default)]
    pub directory: bool,
    #[serde(default)]
    pub attributes: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
}

/// One directory and its entries, in listing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedDirectory {
    pub path: String,
    #[serde(default)]
    pub entries: Vec<SeedEntry>,
}

/// Seed document schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedImage {
    #[serde(default = "default_user")]
    pub user_name: String,
    #[serde(default = "default_computer")]
    pub computer_name: String,
    /// Empty means "derive the defaults from the identity".
    #[serde(default)]
    pub environment: Vec<SeedVariable>,
    #[serde(default)]
    pub directories: Vec<SeedDirectory>,
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_computer() -> String {
    DEFAULT_COMPUTER.to_string()
}

fn dir(name: &str) -> SeedEntry {
    SeedEntry {
        name: name.to_string(),
        directory: true,
        attributes: None,
        size: None,
        modified: None,
    }
}

fn file(name: &str, size: &str) -> SeedEntry {
    SeedEntry {
        name: name.to_string(),
        directory: false,
        attributes: None,
        size: Some(size.to_string()),
        modified: None,
    }
}

impl SeedImage {
    /// The stock volume for the given identity.
    pub fn builtin(user_name: &str, computer_name: &str) -> Self {
        let directories = vec![
            SeedDirectory {
                path: "C:\\".to_string(),
                entries: vec![
                    dir("Windows"),
                    dir("Users"),
                    dir("Program Files"),
                    file("autoexec.bat", "256"),
                    file("config.sys", "128"),
                ],
            },
            SeedDirectory {
                path: "C:\\Windows".to_string(),
                entries: vec![
                    dir("system32"),
                    dir("System"),
                    file("notepad.exe", "187,456"),
                    file("calc.exe", "98,304"),
                    file("cmd.exe", "245,760"),
                ],
            },
            SeedDirectory {
                path: "C:\\Users".to_string(),
                entries: vec![dir(user_name), dir("Public")],
            },
            SeedDirectory {
                path: format!("C:\\Users\\{}", user_name),
                entries: vec![
                    dir("Desktop"),
                    dir("Documents"),
                    dir("Downloads"),
                    dir("Favorites"),
                    dir("Music"),
                    dir("Pictures"),
                    dir("Videos"),
                    SeedEntry {
                        attributes: Some("HS".to_string()),
                        ..file("desktop.ini", "282")
                    },
                ],
            },
        ];

        Self {
            user_name: user_name.to_string(),
            computer_name: computer_name.to_string(),
            environment: Vec::new(),
            directories,
        }
    }

    /// Build the directory table. Entries without a timestamp get `now`.
    pub fn volume(&self, now: NaiveDateTime) -> ShellResult<VirtualFs> {
        let mut fs = VirtualFs::new();
        for seed_dir in &self.directories {
            let entries = seed_dir
                .entries
                .iter()
                .map(|e| entry(e, now))
                .collect::<ShellResult<Vec<_>>>()?;
            fs.insert_directory(&seed_dir.path, entries);
        }
        fs.validate()?;
        debug!("seeded {} directories", fs.len());
        Ok(fs)
    }

    /// Initial environment: the listed variables, or the defaults.
    pub fn environment(&self) -> Environment {
        if self.environment.is_empty() {
            return Environment::with_defaults(&self.user_name, &self.computer_name);
        }
        let mut env = Environment::new();
        for var in &self.environment {
            env.set(&var.name, &var.value);
        }
        env
    }

    /// Create a fresh session at the root.
    pub fn into_session(self) -> ShellResult<Session> {
        let fs = self.volume(Local::now().naive_local())?;
        let env = self.environment();
        Ok(Session::new(fs, env, &self.user_name, &self.computer_name))
    }
}

fn entry(seed: &SeedEntry, now: NaiveDateTime) -> ShellResult<DirectoryEntry> {
    let modified = match &seed.modified {
        Some(text) => NaiveDateTime::parse_from_str(text, SEED_TIME_FORMAT).map_err(|e| {
            ShellError::InvalidSeed(format!("bad timestamp {:?} on {}: {}", text, seed.name, e))
        })?,
        None => now,
    };

    let mut entry = if seed.directory {
        DirectoryEntry::directory(&seed.name, modified)
    } else {
        DirectoryEntry::file(&seed.name, seed.size.as_deref().unwrap_or("0"), modified)
    };
    if let Some(attributes) = &seed.attributes {
        entry = entry.with_attributes(attributes);
    }
    Ok(entry)
}

/// Parse a seed document from JSON.
pub fn load_seed<R: Read>(reader: R) -> ShellResult<SeedImage> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse the `seed.json` member of a ZIP archive (any folder).
pub fn load_seed_from_zip<R: Read + Seek>(reader: R) -> ShellResult<SeedImage> {
    let mut archive = ZipArchive::new(reader)?;

    for i in 0..archive.len() {
        let mut member = archive.by_index(i)?;
        if member.is_dir() {
            continue;
        }
        let name = member.name().to_string();
        let file_name = name.rsplit('/').next().unwrap_or(&name);
        if file_name.eq_ignore_ascii_case(SEED_FILE) {
            let mut content = Vec::new();
            member.read_to_end(&mut content)?;
            return load_seed(content.as_slice());
        }
    }

    Err(ShellError::InvalidSeed(format!("archive has no {}", SEED_FILE)))
}

/// Load a seed from disk: `.zip` archives or JSON documents.
pub fn load_seed_from_path(path: impl AsRef<Path>) -> ShellResult<SeedImage> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let is_zip = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"));

    info!("loading seed from {}", path.display());
    if is_zip {
        load_seed_from_zip(file)
    } else {
        load_seed(file)
    }
}
