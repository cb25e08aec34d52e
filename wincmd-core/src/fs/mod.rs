//! Virtual filesystem.
//!
//! The volume is a flat table keyed by absolute path (`C:\Users\User`), each
//! key holding the ordered entries of that directory:
//! - `path`: normalization and resolution of user-typed paths
//! - `VirtualFs`: the path-keyed directory table
//! - `listing`: `dir` rendering

mod entry;
pub mod listing;
pub mod path;
mod volume;

pub use entry::DirectoryEntry;
pub use listing::{list, ListOptions};
pub use volume::VirtualFs;
