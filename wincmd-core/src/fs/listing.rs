//! `dir` rendering.

use super::path;
use super::volume::VirtualFs;
use crate::error::{ShellError, ShellResult};

/// Parsed `dir` arguments.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// `/a`, `/a:h`, ... : include hidden entries.
    pub show_all: bool,
    /// `/b`: names only, no header or summary.
    pub bare: bool,
    /// Explicit directory: every non-switch word, joined by single spaces.
    pub path: Option<String>,
}

impl ListOptions {
    pub fn parse(args: &str) -> Self {
        let mut opts = Self::default();
        let mut words = Vec::new();
        for token in split_args(args) {
            let lower = token.to_ascii_lowercase();
            if lower.starts_with("/a") {
                opts.show_all = true;
            } else if lower == "/b" {
                opts.bare = true;
            } else if lower.starts_with('/') {
                // Other switches (/w, /p, /s ...) are accepted and ignored.
            } else {
                words.push(token);
            }
        }
        if !words.is_empty() {
            opts.path = Some(words.join(" "));
        }
        opts
    }
}

/// Split on whitespace, keeping double-quoted runs together.
fn split_args(args: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in args.chars() {
        match ch {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Group digits in threes: `187456` -> `187,456`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render a listing of `args` (or `cwd`) as output lines.
pub fn list(fs: &VirtualFs, cwd: &str, args: &str) -> ShellResult<Vec<String>> {
    let opts = ListOptions::parse(args);
    let target = match &opts.path {
        Some(raw) => path::resolve(cwd, raw),
        None => cwd.to_string(),
    };

    let dir = fs
        .find(&target)
        .ok_or_else(|| ShellError::FileNotFound(target.clone()))?;
    let entries = fs.entries(dir).unwrap_or_default();
    let visible = entries.iter().filter(|e| opts.show_all || !e.is_hidden());

    if opts.bare {
        return Ok(visible.map(|e| e.name.clone()).collect());
    }

    let mut lines = vec![
        " Volume in drive C has no label.".to_string(),
        " Volume Serial Number is 1234-5678".to_string(),
        String::new(),
        format!(" Directory of {}", dir),
        String::new(),
    ];

    let mut files = 0usize;
    let mut dirs = 0usize;
    let mut total = 0u64;
    for entry in visible {
        lines.push(entry.listing_line());
        if entry.is_directory {
            dirs += 1;
        } else {
            files += 1;
            total += entry.size_bytes();
        }
    }

    lines.push(format!(
        "               {} File(s)     {} bytes",
        files,
        group_thousands(total)
    ));
    lines.push(format!(
        "               {} Dir(s)      unlimited bytes free",
        dirs
    ));
    lines.push(String::new());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::DirectoryEntry;
    use chrono::NaiveDateTime;

    fn volume() -> VirtualFs {
        let at = NaiveDateTime::default();
        let mut fs = VirtualFs::new();
        fs.insert_directory(
            "C:\\",
            vec![
                DirectoryEntry::directory("Windows", at),
                DirectoryEntry::directory("Users", at),
                DirectoryEntry::directory("Program Files", at),
                DirectoryEntry::file("autoexec.bat", "256", at),
                DirectoryEntry::file("config.sys", "128", at),
            ],
        );
        fs.insert_directory(
            "C:\\Windows",
            vec![
                DirectoryEntry::file("notepad.exe", "187,456", at),
                DirectoryEntry::file("broken.dat", "n/a", at),
                DirectoryEntry::file("pagefile.sys", "1,024", at).with_attributes("HS"),
            ],
        );
        fs.insert_directory("C:\\Program Files", Vec::new());
        fs
    }

    #[test]
    fn test_parse_options() {
        let opts = ListOptions::parse("/B /a:h \\Windows");
        assert!(opts.bare);
        assert!(opts.show_all);
        assert_eq!(opts.path.as_deref(), Some("\\Windows"));

        let opts = ListOptions::parse("\"Program Files\" /w");
        assert_eq!(opts.path.as_deref(), Some("Program Files"));
        assert!(!opts.bare);
    }

    #[test]
    fn test_parse_unquoted_path_with_spaces() {
        let opts = ListOptions::parse("Program   Files /b");
        assert_eq!(opts.path.as_deref(), Some("Program Files"));
        assert!(opts.bare);
    }

    #[test]
    fn test_bare_listing() {
        let lines = list(&volume(), "C:\\", "/b").unwrap();
        assert_eq!(
            lines,
            vec!["Windows", "Users", "Program Files", "autoexec.bat", "config.sys"]
        );
    }

    #[test]
    fn test_full_listing_summary() {
        let lines = list(&volume(), "C:\\", "").unwrap();
        assert_eq!(lines[0], " Volume in drive C has no label.");
        assert_eq!(lines[3], " Directory of C:\\");
        assert_eq!(lines.len(), 5 + 5 + 3);
        assert_eq!(lines[10], "               2 File(s)     384 bytes");
        assert_eq!(lines[11], "               3 Dir(s)      unlimited bytes free");
    }

    #[test]
    fn test_unparsable_size_counts_zero() {
        let lines = list(&volume(), "C:\\", "C:\\Windows").unwrap();
        assert!(lines.contains(&"               2 File(s)     187,456 bytes".to_string()));
    }

    #[test]
    fn test_hidden_entries_need_show_all() {
        let fs = volume();
        let bare = list(&fs, "C:\\Windows", "/b").unwrap();
        assert!(!bare.contains(&"pagefile.sys".to_string()));

        let all = list(&fs, "C:\\Windows", "/b /a").unwrap();
        assert_eq!(all.last().map(String::as_str), Some("pagefile.sys"));

        let full = list(&fs, "C:\\Windows", "/a").unwrap();
        assert!(full.contains(&"               3 File(s)     188,480 bytes".to_string()));
    }

    #[test]
    fn test_path_forms() {
        let fs = volume();
        assert!(list(&fs, "C:\\Windows", "\\").is_ok());
        assert_eq!(list(&fs, "C:\\", "windows /b").unwrap().len(), 2);
        let lines = list(&fs, "C:\\Windows", "\\program files").unwrap();
        assert_eq!(lines[3], " Directory of C:\\Program Files");
        let lines = list(&fs, "C:\\", "/a Program Files").unwrap();
        assert_eq!(lines[3], " Directory of C:\\Program Files");
    }

    #[test]
    fn test_unknown_path() {
        let err = list(&volume(), "C:\\", "\\Nope").unwrap_err();
        assert!(matches!(err, ShellError::FileNotFound(ref p) if p == "C:\\Nope"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
