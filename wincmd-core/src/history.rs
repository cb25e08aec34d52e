//! Command history with a recall cursor.

/// What a history step put into the edit buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall<'a> {
    /// A previously entered line.
    Entry(&'a str),
    /// Moved past the newest entry: back to a blank line.
    Blank,
}

/// Append-only log of entered lines.
///
/// The cursor ranges over `0..=len`; `len` means "nothing recalled".
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished line. Empty lines and repeats of the last entry are
    /// not stored. The cursor always returns to one past the end.
    pub fn record(&mut self, line: &str) {
        if !line.is_empty() && self.entries.last().map(String::as_str) != Some(line) {
            self.entries.push(line.to_string());
        }
        self.reset_cursor();
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = self.entries.len();
    }

    /// Step towards older entries. Saturates at the oldest.
    pub fn older(&mut self) -> Option<&str> {
        if self.entries.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step towards newer entries. From the newest entry this yields
    /// `Recall::Blank`; past that it saturates.
    pub fn newer(&mut self) -> Option<Recall<'_>> {
        let len = self.entries.len();
        if self.cursor + 1 < len {
            self.cursor += 1;
            Some(Recall::Entry(&self.entries[self.cursor]))
        } else if self.cursor + 1 == len {
            self.cursor = len;
            Some(Recall::Blank)
        } else {
            None
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(lines: &[&str]) -> History {
        let mut h = History::new();
        for line in lines {
            h.record(line);
        }
        h
    }

    #[test]
    fn test_adjacent_duplicates_dropped() {
        let h = history(&["dir", "dir", "cd ..", "dir"]);
        assert_eq!(h.entries(), &["dir", "cd ..", "dir"]);
        assert_eq!(h.cursor(), 3);
    }

    #[test]
    fn test_empty_line_not_recorded() {
        let h = history(&["", "ver"]);
        assert_eq!(h.entries(), &["ver"]);
    }

    #[test]
    fn test_older_saturates() {
        let mut h = history(&["a", "b"]);
        assert_eq!(h.older(), Some("b"));
        assert_eq!(h.older(), Some("a"));
        assert_eq!(h.older(), None);
        assert_eq!(h.older(), None);
        assert_eq!(h.cursor(), 0);
    }

    #[test]
    fn test_newer_clears_then_saturates() {
        let mut h = history(&["a", "b"]);
        h.older();
        h.older();
        assert_eq!(h.newer(), Some(Recall::Entry("b")));
        assert_eq!(h.newer(), Some(Recall::Blank));
        assert_eq!(h.newer(), None);
        assert_eq!(h.cursor(), 2);
    }

    #[test]
    fn test_empty_history_is_inert() {
        let mut h = History::new();
        assert_eq!(h.older(), None);
        assert_eq!(h.newer(), None);
    }

    #[test]
    fn test_record_resets_cursor() {
        let mut h = history(&["a", "b"]);
        h.older();
        h.record("b");
        assert_eq!(h.cursor(), 2);
    }
}
