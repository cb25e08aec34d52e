//! Raw-keystroke line editor.
//!
//! Turns keypresses into a finished input line with in-place editing,
//! history recall and first-match tab completion. Every content change
//! redraws the whole row: blank it for the full window width, rewrite
//! prompt + buffer, then park the cursor at `prompt width + offset`.

use std::io;

use log::trace;

use crate::error::ShellResult;
use crate::history::{History, Recall};
use crate::terminal::{Key, Terminal};

/// Text being edited plus the cursor offset (in characters).
///
/// Invariant: `cursor <= chars.len()`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Insert at the cursor and advance past it.
    pub fn insert(&mut self, ch: char) {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    /// Remove the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor);
        true
    }

    pub fn left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn right(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Replace the whole content and move the cursor to the end.
    pub fn replace(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
    }
}

/// What the terminal has to do after a key was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// Only the cursor moved.
    MoveCursor,
    /// Content changed: redraw the row.
    Redraw,
    /// Enter: the line is finished.
    Submit,
}

/// First candidate that starts with `input`, ignoring ASCII case.
pub fn complete<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|candidate| {
        candidate
            .get(..input.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(input))
    })
}

/// Apply one key to the buffer.
pub fn apply_key(
    buffer: &mut EditBuffer,
    key: Key,
    history: &mut History,
    completions: &[&str],
) -> Effect {
    let changed = |moved: bool, effect: Effect| if moved { effect } else { Effect::None };

    match key {
        Key::Enter => Effect::Submit,
        Key::Backspace => changed(buffer.backspace(), Effect::Redraw),
        Key::Delete => changed(buffer.delete(), Effect::Redraw),
        Key::Left => changed(buffer.left(), Effect::MoveCursor),
        Key::Right => changed(buffer.right(), Effect::MoveCursor),
        Key::Up => match history.older() {
            Some(entry) => {
                buffer.replace(entry);
                Effect::Redraw
            }
            None => Effect::None,
        },
        Key::Down => match history.newer() {
            Some(Recall::Entry(entry)) => {
                buffer.replace(entry);
                Effect::Redraw
            }
            Some(Recall::Blank) => {
                buffer.replace("");
                Effect::Redraw
            }
            None => Effect::None,
        },
        Key::Tab => match complete(&buffer.text(), completions) {
            Some(name) => {
                buffer.replace(name);
                Effect::Redraw
            }
            None => Effect::None,
        },
        Key::Char(ch) if !ch.is_control() => {
            buffer.insert(ch);
            Effect::Redraw
        }
        _ => Effect::None,
    }
}

/// Rewrite the current row so it shows exactly `prompt` + buffer.
pub fn redraw<T: Terminal + ?Sized>(
    term: &mut T,
    prompt: &str,
    buffer: &EditBuffer,
) -> io::Result<()> {
    let row = term.cursor_row()?;
    let width = term.window_width()?;
    term.set_cursor_position(0, row)?;
    term.write(&" ".repeat(width))?;
    term.set_cursor_position(0, row)?;
    term.write(prompt)?;
    term.write(&buffer.text())?;
    term.set_cursor_position(prompt.chars().count() + buffer.cursor(), row)
}

/// Read keys until Enter and return the trimmed line.
///
/// The prompt must already be on screen; it is only rewritten on redraw.
pub fn read_line<T: Terminal + ?Sized>(
    term: &mut T,
    history: &mut History,
    completions: &[&str],
    prompt: &str,
) -> ShellResult<String> {
    let prompt_width = prompt.chars().count();
    let mut buffer = EditBuffer::new();

    loop {
        let key = term.read_key()?;
        let effect = apply_key(&mut buffer, key, history, completions);
        trace!("key {:?} -> {:?} (cursor {})", key, effect, buffer.cursor());

        match effect {
            Effect::Submit => {
                term.write_line("")?;
                return Ok(buffer.text().trim().to_string());
            }
            Effect::Redraw => redraw(term, prompt, &buffer)?,
            Effect::MoveCursor => {
                let row = term.cursor_row()?;
                term.set_cursor_position(prompt_width + buffer.cursor(), row)?;
            }
            Effect::None => {}
        }
    }
}
