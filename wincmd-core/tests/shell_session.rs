//! End-to-end tests: keystrokes in, screen rows out.

use std::io;

use wincmd_core::command::VERSION_LINE;
use wincmd_core::{
    ConsoleColor, ExitReason, HeadlessTerminal, Key, SeedImage, Shell, Terminal,
};

fn shell_with(lines: &[&str]) -> Shell<HeadlessTerminal> {
    let session = SeedImage::builtin("User", "TEXTYOS-PC")
        .into_session()
        .unwrap();
    let mut term = HeadlessTerminal::new();
    for line in lines {
        term.queue_line(line);
    }
    Shell::new(session, term)
}

fn rows(shell: &Shell<HeadlessTerminal>, count: usize) -> Vec<String> {
    (0..count).map(|row| shell.terminal().screen_line(row)).collect()
}

#[test]
fn test_dir_bare_at_root() {
    let mut shell = shell_with(&["dir /b"]);
    assert_eq!(shell.run().unwrap(), ExitReason::InputClosed);
    assert_eq!(
        rows(&shell, 7),
        vec![
            "C:\\>dir /b",
            "Windows",
            "Users",
            "Program Files",
            "autoexec.bat",
            "config.sys",
            "C:\\>",
        ]
    );
}

#[test]
fn test_dir_summary_at_root() {
    let mut shell = shell_with(&["dir"]);
    shell.run().unwrap();
    let out = shell.terminal().output_string();
    assert!(out.contains(" Directory of C:\\\n"));
    assert!(out.contains("               2 File(s)     384 bytes\n"));
    assert!(out.contains("               3 Dir(s)      unlimited bytes free\n"));
}

#[test]
fn test_hidden_entries_need_show_all() {
    let mut shell = shell_with(&["cd Users\\User", "dir /b", "dir /A /B"]);
    shell.run().unwrap();
    let out = shell.terminal().output_string();
    assert_eq!(out.matches("desktop.ini").count(), 1);
}

#[test]
fn test_assignment_then_echo() {
    let mut shell = shell_with(&["GREETING = hello world", "echo %GREETING%", "echo %UNSET%"]);
    shell.run().unwrap();
    assert_eq!(
        rows(&shell, 6),
        vec![
            "C:\\>GREETING = hello world",
            "C:\\>echo %GREETING%",
            "hello world",
            "C:\\>echo %UNSET%",
            "%UNSET%",
            "C:\\>",
        ]
    );
    assert_eq!(shell.session().env.get("GREETING"), Some("hello world"));
    assert_eq!(shell.session().history.len(), 3);
}

#[test]
fn test_cd_parent_and_prompt() {
    let mut shell = shell_with(&["cd Windows", "cd ..", "cd .."]);
    shell.run().unwrap();
    assert_eq!(
        rows(&shell, 4),
        vec!["C:\\>cd Windows", "C:\\Windows>cd ..", "C:\\>cd ..", "C:\\>"]
    );
}

#[test]
fn test_cd_unknown_path() {
    let mut shell = shell_with(&["cd Nowhere"]);
    shell.run().unwrap();
    assert_eq!(
        shell.terminal().screen_line(1),
        "The system cannot find the path specified."
    );
    assert_eq!(shell.session().current_dir, "C:\\");
}

#[test]
fn test_unknown_command() {
    let mut shell = shell_with(&["foo bar"]);
    shell.run().unwrap();
    assert_eq!(
        shell.terminal().screen_line(1),
        "'foo' is not recognized as an internal or external command, operable program or batch file."
    );
}

#[test]
fn test_up_arrow_recalls_previous_line() {
    let mut shell = shell_with(&["ver"]);
    shell
        .terminal_mut()
        .queue_keys(&[Key::Up, Key::Up, Key::Enter]);
    shell.run().unwrap();
    assert_eq!(
        rows(&shell, 5),
        vec!["C:\\>ver", VERSION_LINE, "C:\\>ver", VERSION_LINE, "C:\\>"]
    );
    // Repeats of the last line are not stored again.
    assert_eq!(shell.session().history.entries(), ["ver"]);
}

#[test]
fn test_down_arrow_clears_recalled_line() {
    let mut shell = shell_with(&["cls"]);
    shell
        .terminal_mut()
        .queue_keys(&[Key::Up, Key::Down, Key::Char('v'), Key::Char('e'), Key::Char('r'), Key::Enter]);
    shell.run().unwrap();
    assert_eq!(shell.session().history.entries(), ["cls", "ver"]);
}

#[test]
fn test_tab_completion_submits_command() {
    let mut shell = shell_with(&[]);
    shell
        .terminal_mut()
        .queue_keys(&[Key::Char('V'), Key::Char('E'), Key::Tab, Key::Enter]);
    shell.run().unwrap();
    assert_eq!(shell.terminal().screen_line(0), "C:\\>ver");
    assert_eq!(shell.terminal().screen_line(1), VERSION_LINE);
}

#[test]
fn test_delete_mid_line() {
    let mut shell = shell_with(&[]);
    shell.terminal_mut().queue_text("dirx");
    shell
        .terminal_mut()
        .queue_keys(&[Key::Left, Key::Delete, Key::Enter]);
    shell.run().unwrap();
    assert_eq!(shell.session().history.entries(), ["dir"]);
    assert_eq!(shell.terminal().screen_line(0), "C:\\>dir");
}

#[test]
fn test_exit_stops_reading() {
    let mut shell = shell_with(&["exit", "ver"]);
    assert_eq!(shell.run().unwrap(), ExitReason::Exit);
    assert_eq!(shell.terminal().pending_keys(), 4);
}

#[test]
fn test_reboot_and_shutdown() {
    let mut shell = shell_with(&["reboot"]);
    assert_eq!(shell.run().unwrap(), ExitReason::Reboot);
    let mut shell = shell_with(&["shutdown"]);
    assert_eq!(shell.run().unwrap(), ExitReason::Shutdown);
}

#[test]
fn test_banner() {
    let mut shell = shell_with(&[]);
    shell.banner().unwrap();
    assert_eq!(shell.terminal().screen_line(0), VERSION_LINE);
    assert_eq!(
        shell.terminal().screen_line(1),
        "(c) Microsoft Corporation. All rights reserved."
    );
}

/// Headless terminal whose title cannot be set.
struct NoTitleTerminal(HeadlessTerminal);

impl Terminal for NoTitleTerminal {
    fn read_key(&mut self) -> io::Result<Key> {
        self.0.read_key()
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.0.write(text)
    }

    fn set_cursor_position(&mut self, column: usize, row: usize) -> io::Result<()> {
        self.0.set_cursor_position(column, row)
    }

    fn cursor_row(&mut self) -> io::Result<usize> {
        self.0.cursor_row()
    }

    fn window_width(&mut self) -> io::Result<usize> {
        self.0.window_width()
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.0.clear_screen()
    }

    fn set_foreground(&mut self, color: ConsoleColor) -> io::Result<()> {
        self.0.set_foreground(color)
    }

    fn set_background(&mut self, color: ConsoleColor) -> io::Result<()> {
        self.0.set_background(color)
    }

    fn set_title(&mut self, _title: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "no title bar"))
    }
}

#[test]
fn test_failed_command_is_reported_and_loop_continues() {
    let session = SeedImage::builtin("User", "TEXTYOS-PC")
        .into_session()
        .unwrap();
    let mut term = HeadlessTerminal::new();
    term.queue_line("title Hello");
    term.queue_line("ver");
    let mut shell = Shell::new(session, NoTitleTerminal(term));

    assert_eq!(shell.run().unwrap(), ExitReason::InputClosed);
    let screen = &shell.terminal().0;
    assert_eq!(screen.screen_line(1), "Error: I/O error: no title bar");
    assert_eq!(screen.screen_line(3), VERSION_LINE);
    assert_eq!(screen.colors().0, ConsoleColor::White);
}
