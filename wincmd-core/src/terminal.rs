//! Terminal driver abstraction.
//!
//! The `Terminal` trait is the only way the shell touches the screen or the
//! keyboard. The CLI implements it on top of a real terminal; tests use
//! `HeadlessTerminal`, which replays queued keys and keeps a simulated screen.

use std::collections::VecDeque;
use std::io;

/// A single keypress as seen by the line editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Tab,
    Escape,
    /// A key that produced a character.
    Char(char),
    /// Function keys, lone modifiers and anything else the editor ignores.
    Other,
}

/// The sixteen console colours, in `color` attribute order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl ConsoleColor {
    const ALL: [ConsoleColor; 16] = [
        ConsoleColor::Black,
        ConsoleColor::DarkBlue,
        ConsoleColor::DarkGreen,
        ConsoleColor::DarkCyan,
        ConsoleColor::DarkRed,
        ConsoleColor::DarkMagenta,
        ConsoleColor::DarkYellow,
        ConsoleColor::Gray,
        ConsoleColor::DarkGray,
        ConsoleColor::Blue,
        ConsoleColor::Green,
        ConsoleColor::Cyan,
        ConsoleColor::Red,
        ConsoleColor::Magenta,
        ConsoleColor::Yellow,
        ConsoleColor::White,
    ];

    /// Parse one hex digit of a `color` attribute (`0`-`9`, `A`-`F`).
    pub fn from_hex_digit(c: char) -> Option<Self> {
        c.to_digit(16).map(|d| Self::ALL[d as usize])
    }
}

/// Terminal capabilities consumed by the shell.
pub trait Terminal: Send {
    /// Block until the next keypress.
    fn read_key(&mut self) -> io::Result<Key>;

    /// Write text at the cursor.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Write text followed by a line break.
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    /// Move the cursor to (column, row), both zero-based.
    fn set_cursor_position(&mut self, column: usize, row: usize) -> io::Result<()>;

    /// Row the cursor is currently on.
    fn cursor_row(&mut self) -> io::Result<usize>;

    /// Width of the window in columns.
    fn window_width(&mut self) -> io::Result<usize>;

    fn clear_screen(&mut self) -> io::Result<()>;

    fn set_foreground(&mut self, color: ConsoleColor) -> io::Result<()>;

    fn set_background(&mut self, color: ConsoleColor) -> io::Result<()>;

    /// Set the window title (optional, can be no-op).
    fn set_title(&mut self, _title: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Headless terminal for testing - replays queued keys, records output.
///
/// Besides the raw transcript it keeps a character grid so tests can check
/// what a row looks like after in-place redraws. Once the key queue is empty
/// `read_key` fails with `UnexpectedEof`.
pub struct HeadlessTerminal {
    input: VecDeque<Key>,
    transcript: String,
    screen: Vec<Vec<char>>,
    column: usize,
    row: usize,
    width: usize,
    foreground: ConsoleColor,
    background: ConsoleColor,
    title: Option<String>,
    clears: usize,
}

impl Default for HeadlessTerminal {
    fn default() -> Self {
        Self {
            input: VecDeque::new(),
            transcript: String::new(),
            screen: vec![Vec::new()],
            column: 0,
            row: 0,
            width: 80,
            foreground: ConsoleColor::White,
            background: ConsoleColor::Black,
            title: None,
            clears: 0,
        }
    }
}

impl HeadlessTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-queued keys.
    pub fn with_keys(keys: &[Key]) -> Self {
        let mut term = Self::new();
        term.queue_keys(keys);
        term
    }

    /// Queue keypresses.
    pub fn queue_keys(&mut self, keys: &[Key]) {
        self.input.extend(keys.iter().copied());
    }

    /// Queue a string as typed characters; `\n` becomes Enter.
    pub fn queue_text(&mut self, text: &str) {
        self.input.extend(text.chars().map(|c| match c {
            '\n' => Key::Enter,
            c => Key::Char(c),
        }));
    }

    /// Queue a full command line followed by Enter.
    pub fn queue_line(&mut self, line: &str) {
        self.queue_text(line);
        self.input.push_back(Key::Enter);
    }

    /// Number of keys not yet consumed.
    pub fn pending_keys(&self) -> usize {
        self.input.len()
    }

    /// Everything written so far, in order.
    pub fn output_string(&self) -> &str {
        &self.transcript
    }

    /// Clear the recorded transcript (the screen grid is kept).
    pub fn clear_output(&mut self) {
        self.transcript.clear();
    }

    /// Contents of a screen row with trailing blanks removed.
    pub fn screen_line(&self, row: usize) -> String {
        self.screen
            .get(row)
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// Current cursor position as (column, row).
    pub fn cursor(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    pub fn colors(&self) -> (ConsoleColor, ConsoleColor) {
        (self.foreground, self.background)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// How many times the screen was cleared.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    fn put(&mut self, ch: char) {
        while self.screen.len() <= self.row {
            self.screen.push(Vec::new());
        }
        let line = &mut self.screen[self.row];
        while line.len() <= self.column {
            line.push(' ');
        }
        line[self.column] = ch;
        self.column += 1;
    }
}

impl Terminal for HeadlessTerminal {
    fn read_key(&mut self) -> io::Result<Key> {
        self.input
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more input"))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.transcript.push_str(text);
        for ch in text.chars() {
            match ch {
                '\n' => {
                    self.row += 1;
                    self.column = 0;
                }
                '\r' => self.column = 0,
                c => self.put(c),
            }
        }
        Ok(())
    }

    fn set_cursor_position(&mut self, column: usize, row: usize) -> io::Result<()> {
        self.column = column;
        self.row = row;
        Ok(())
    }

    fn cursor_row(&mut self) -> io::Result<usize> {
        Ok(self.row)
    }

    fn window_width(&mut self) -> io::Result<usize> {
        Ok(self.width)
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.screen = vec![Vec::new()];
        self.column = 0;
        self.row = 0;
        self.clears += 1;
        Ok(())
    }

    fn set_foreground(&mut self, color: ConsoleColor) -> io::Result<()> {
        self.foreground = color;
        Ok(())
    }

    fn set_background(&mut self, color: ConsoleColor) -> io::Result<()> {
        self.background = color;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        self.title = Some(title.to_string());
        Ok(())
    }
}
