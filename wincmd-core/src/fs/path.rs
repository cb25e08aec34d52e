//! Path normalization and resolution.
//!
//! Paths are absolute, backslash-separated and rooted at the single drive
//! `C:`. Comparison against the directory table is case-insensitive; this
//! module only shapes strings.

/// The only drive.
pub const DRIVE: &str = "C:";

pub const SEPARATOR: char = '\\';

/// Root directory of the drive.
pub const ROOT: &str = "C:\\";

/// The parent-reference token.
pub const PARENT: &str = "..";

pub fn is_root(path: &str) -> bool {
    path.eq_ignore_ascii_case(ROOT)
}

/// Resolve a user-typed path against the current directory.
///
/// - `/` is accepted as a separator
/// - no drive (`:`): a leading separator means "from the root", anything
///   else is appended to `cwd`
/// - `.` and `..` segments are folded, never climbing above the root
pub fn resolve(cwd: &str, raw: &str) -> String {
    let raw = raw.trim().trim_matches('"').replace('/', "\\");

    let joined = if raw.contains(':') {
        raw
    } else if raw.starts_with(SEPARATOR) {
        format!("{}{}", DRIVE, raw)
    } else if cwd.ends_with(SEPARATOR) {
        format!("{}{}", cwd, raw)
    } else {
        format!("{}{}{}", cwd, SEPARATOR, raw)
    };

    normalize(&joined)
}

/// Canonical form: `DRIVE\seg\seg`, no trailing separator except on the root.
pub fn normalize(path: &str) -> String {
    let (drive, rest) = match path.find(':') {
        Some(pos) => path.split_at(pos + 1),
        None => (DRIVE, path),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            PARENT => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    format!("{}{}{}", drive, SEPARATOR, segments.join("\\"))
}

/// Strip the last segment. The root is its own parent.
pub fn parent(path: &str) -> String {
    let normalized = normalize(path);
    match normalized.rfind(SEPARATOR) {
        Some(pos) if pos + 1 < normalized.len() => normalize(&normalized[..pos]),
        _ => normalized,
    }
}

/// Append one name to a directory path.
pub fn join(dir: &str, name: &str) -> String {
    if dir.ends_with(SEPARATOR) {
        format!("{}{}", dir, name)
    } else {
        format!("{}{}{}", dir, SEPARATOR, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        assert_eq!(resolve("C:\\", "Windows"), "C:\\Windows");
        assert_eq!(resolve("C:\\Users", "User"), "C:\\Users\\User");
    }

    #[test]
    fn test_resolve_rooted_and_absolute() {
        assert_eq!(resolve("C:\\Users\\User", "\\Windows"), "C:\\Windows");
        assert_eq!(resolve("C:\\Users", "C:\\Windows\\"), "C:\\Windows");
        assert_eq!(resolve("C:\\Users", "C:"), "C:\\");
    }

    #[test]
    fn test_resolve_forward_slashes() {
        assert_eq!(resolve("C:\\", "Users/User"), "C:\\Users\\User");
        assert_eq!(resolve("C:\\Users", "/Windows"), "C:\\Windows");
    }

    #[test]
    fn test_resolve_dot_segments() {
        assert_eq!(resolve("C:\\Users\\User", "..\\Public"), "C:\\Users\\Public");
        assert_eq!(resolve("C:\\Users", ".\\User"), "C:\\Users\\User");
        assert_eq!(resolve("C:\\", "..\\..\\Windows"), "C:\\Windows");
    }

    #[test]
    fn test_resolve_quoted() {
        assert_eq!(resolve("C:\\", "\"Program Files\""), "C:\\Program Files");
    }

    #[test]
    fn test_parent() {
        assert_eq!(parent("C:\\Users\\User"), "C:\\Users");
        assert_eq!(parent("C:\\Users"), "C:\\");
        assert_eq!(parent("C:\\"), "C:\\");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("C:\\", "Windows"), "C:\\Windows");
        assert_eq!(join("C:\\Windows", "System"), "C:\\Windows\\System");
    }

    #[test]
    fn test_is_root() {
        assert!(is_root("C:\\"));
        assert!(is_root("c:\\"));
        assert!(!is_root("C:\\Windows"));
    }
}
