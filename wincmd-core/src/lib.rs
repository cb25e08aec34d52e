//! Emulated Windows command prompt core
//!
//! This crate provides the pieces of a text-mode `cmd.exe` look-alike:
//! - Line editor with history recall and tab completion
//! - Virtual filesystem: a seeded table of directory listings
//! - Command dispatcher with the built-in handler catalog
//!
//! # Architecture
//!
//! - `Terminal` trait: key input, text output, cursor and colour control
//! - `VirtualFs`: absolute directory path -> ordered entries
//! - `Session`: current directory, environment, history and volume
//! - `Shell`: binds a session to a terminal and runs the prompt loop
//!
//! Seeds (`SeedImage`) describe the initial volume and environment and can
//! be loaded from JSON or from a ZIP archive holding `seed.json`.

pub mod command;
pub mod editor;
pub mod env;
pub mod error;
pub mod fs;
pub mod history;
pub mod seed;
pub mod session;
pub mod terminal;

pub use command::{dispatch, Command, Line};
pub use editor::read_line;
pub use env::Environment;
pub use error::{ShellError, ShellResult};
pub use fs::{DirectoryEntry, VirtualFs};
pub use history::History;
pub use seed::{load_seed, load_seed_from_path, load_seed_from_zip, SeedImage};
pub use session::{Session, Shell};
pub use terminal::{ConsoleColor, HeadlessTerminal, Key, Terminal};

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `exit`
    Exit,
    /// `shutdown`
    Shutdown,
    /// `reboot`: the host should start a fresh session
    Reboot,
    /// Key input ended
    InputClosed,
}
