//! Command-line classification.

use crate::env::Environment;

/// A finished input line, classified for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Blank line.
    Empty,
    /// `echo <text>`: the text after the keyword and its space.
    Echo(&'a str),
    /// `NAME=VALUE` outside `echo`/`set`. `name` may be empty.
    Assign { name: &'a str, value: &'a str },
    /// Anything else: lowercased command token plus the trimmed remainder.
    Invoke { command: String, args: &'a str },
}

fn has_keyword(line: &str, keyword: &str) -> bool {
    line.get(..keyword.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword))
}

/// Classify a line. Echo is checked first, then inline assignment,
/// then the first-space split.
pub fn parse(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Line::Empty;
    }

    if has_keyword(line, "echo ") {
        return Line::Echo(&line["echo ".len()..]);
    }

    if !has_keyword(line, "set ") {
        if let Some((name, value)) = line.split_once('=') {
            return Line::Assign {
                name: name.trim(),
                value: value.trim(),
            };
        }
    }

    let (command, args) = line.split_once(' ').unwrap_or((line, ""));
    Line::Invoke {
        command: command.to_lowercase(),
        args: args.trim(),
    }
}

/// What `echo` prints for `text`.
///
/// `%NAME%` expands to the bound value, or stays literal when unbound.
pub fn echo_text(env: &Environment, text: &str) -> String {
    if text.is_empty() {
        return "ECHO is on.".to_string();
    }
    if text.len() >= 2 && text.starts_with('%') && text.ends_with('%') {
        let name = &text[1..text.len() - 1];
        if let Some(value) = env.get(name) {
            return value.to_string();
        }
    }
    text.to_string()
}
