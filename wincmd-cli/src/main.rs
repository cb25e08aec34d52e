//! wincmd - an emulated Windows command prompt in the terminal.
//!
//! Usage:
//!   wincmd [--seed image.zip] [--user NAME] [--computer NAME] [-- command args]
//!
//! Examples:
//!   wincmd                               # Built-in volume, interactive prompt
//!   wincmd --seed lab.zip                # Volume and environment from lab.zip
//!   wincmd --user alice --computer BOX   # Built-in volume for another identity
//!   wincmd -- dir /b                     # Run one command line and exit

mod logger;

use std::io::{self, Stdout, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    style::{Color, SetBackgroundColor, SetForegroundColor},
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType, SetTitle},
};
use log::{debug, info};

use wincmd_core::seed::{DEFAULT_COMPUTER, DEFAULT_USER};
use wincmd_core::{
    load_seed_from_path, ConsoleColor, ExitReason, Key, SeedImage, Session, Shell, ShellResult,
    Terminal,
};

/// Emulated Windows command prompt
#[derive(Parser, Debug)]
#[command(name = "wincmd")]
#[command(about = "Run an emulated Windows command prompt")]
struct Args {
    /// Seed document (.json) or archive (.zip) describing the volume
    #[arg(long)]
    seed: Option<PathBuf>,

    /// User name (overrides the seed's)
    #[arg(long)]
    user: Option<String>,

    /// Computer name (overrides the seed's)
    #[arg(long)]
    computer: Option<String>,

    /// Log every keystroke
    #[arg(short, long)]
    trace: bool,

    /// Log dispatched commands and resolved paths
    #[arg(short, long)]
    verbose: bool,

    /// Command line to run once (instead of the prompt)
    #[arg(last = true)]
    command: Vec<String>,
}

/// Terminal driver on top of crossterm.
struct CrosstermTerminal {
    stdout: Stdout,
    /// Raw mode needs `\r\n` for line breaks.
    raw: bool,
}

impl CrosstermTerminal {
    fn new(raw: bool) -> Self {
        Self {
            stdout: io::stdout(),
            raw,
        }
    }
}

/// Translate crossterm key events to editor keys.
fn translate_key(code: KeyCode, modifiers: KeyModifiers) -> Key {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return Key::Other;
    }

    match code {
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

fn translate_color(color: ConsoleColor) -> Color {
    match color {
        ConsoleColor::Black => Color::Black,
        ConsoleColor::DarkBlue => Color::DarkBlue,
        ConsoleColor::DarkGreen => Color::DarkGreen,
        ConsoleColor::DarkCyan => Color::DarkCyan,
        ConsoleColor::DarkRed => Color::DarkRed,
        ConsoleColor::DarkMagenta => Color::DarkMagenta,
        ConsoleColor::DarkYellow => Color::DarkYellow,
        ConsoleColor::Gray => Color::Grey,
        ConsoleColor::DarkGray => Color::DarkGrey,
        ConsoleColor::Blue => Color::Blue,
        ConsoleColor::Green => Color::Green,
        ConsoleColor::Cyan => Color::Cyan,
        ConsoleColor::Red => Color::Red,
        ConsoleColor::Magenta => Color::Magenta,
        ConsoleColor::Yellow => Color::Yellow,
        ConsoleColor::White => Color::White,
    }
}

impl Terminal for CrosstermTerminal {
    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            let Event::Key(key_event) = event::read()? else {
                continue;
            };
            if key_event.kind != KeyEventKind::Press {
                continue;
            }
            // Ctrl+C ends the session like a closed input stream.
            if key_event.modifiers.contains(KeyModifiers::CONTROL)
                && key_event.code == KeyCode::Char('c')
            {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "interrupted"));
            }
            return Ok(translate_key(key_event.code, key_event.modifiers));
        }
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        if self.raw {
            self.stdout.write_all(text.replace('\n', "\r\n").as_bytes())?;
        } else {
            self.stdout.write_all(text.as_bytes())?;
        }
        self.stdout.flush()
    }

    fn set_cursor_position(&mut self, column: usize, row: usize) -> io::Result<()> {
        let column = u16::try_from(column).unwrap_or(u16::MAX);
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(self.stdout, cursor::MoveTo(column, row))?;
        self.stdout.flush()
    }

    fn cursor_row(&mut self) -> io::Result<usize> {
        cursor::position().map(|(_, row)| row as usize)
    }

    fn window_width(&mut self) -> io::Result<usize> {
        terminal::size().map(|(columns, _)| columns as usize)
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        self.stdout.flush()
    }

    fn set_foreground(&mut self, color: ConsoleColor) -> io::Result<()> {
        queue!(self.stdout, SetForegroundColor(translate_color(color)))?;
        self.stdout.flush()
    }

    fn set_background(&mut self, color: ConsoleColor) -> io::Result<()> {
        queue!(self.stdout, SetBackgroundColor(translate_color(color)))?;
        self.stdout.flush()
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        queue!(self.stdout, SetTitle(title))?;
        self.stdout.flush()
    }
}

/// Run sessions until one ends with something other than `reboot`.
fn run_interactive(
    first: Session,
    seed: &SeedImage,
    mut terminal: CrosstermTerminal,
) -> ShellResult<ExitReason> {
    let mut session = first;
    loop {
        let mut shell = Shell::new(session, terminal);
        shell.banner()?;
        let reason = shell.run()?;
        if reason != ExitReason::Reboot {
            return Ok(reason);
        }

        info!("rebooting");
        terminal = shell.into_terminal();
        terminal.clear_screen()?;
        session = seed.clone().into_session()?;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Err(e) = logger::init(logger::level_for(args.trace, args.verbose)) {
        eprintln!("Failed to install logger: {}", e);
    }

    let mut seed = match &args.seed {
        Some(path) => match load_seed_from_path(path) {
            Ok(seed) => seed,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                return Err(e.into());
            }
        },
        None => SeedImage::builtin(
            args.user.as_deref().unwrap_or(DEFAULT_USER),
            args.computer.as_deref().unwrap_or(DEFAULT_COMPUTER),
        ),
    };
    if let Some(user) = &args.user {
        seed.user_name = user.clone();
    }
    if let Some(computer) = &args.computer {
        seed.computer_name = computer.clone();
    }

    // Validate the seed before touching the terminal.
    let session = seed.clone().into_session()?;
    debug!(
        "session ready: {} directories, {} variables",
        session.fs.len(),
        session.env.len()
    );

    let command = (!args.command.is_empty()).then(|| args.command.join(" "));

    // Raw mode only for the interactive prompt (gracefully handle non-TTY)
    let raw_mode_enabled = command.is_none() && enable_raw_mode().is_ok();

    let session_handle = tokio::task::spawn_blocking(move || -> ShellResult<ExitReason> {
        let terminal = CrosstermTerminal::new(raw_mode_enabled);
        match command {
            Some(line) => {
                let mut shell = Shell::new(session, terminal);
                Ok(shell.execute(&line)?.unwrap_or(ExitReason::Exit))
            }
            None => run_interactive(session, &seed, terminal),
        }
    });

    let result = session_handle.await;

    if raw_mode_enabled {
        let _ = disable_raw_mode();
    }

    match result {
        Ok(Ok(reason)) => {
            debug!("session ended: {:?}", reason);
            Ok(())
        }
        Ok(Err(e)) => {
            eprintln!("\nError: {}", e);
            Err(e.into())
        }
        Err(e) => {
            eprintln!("\nSession task failed: {}", e);
            Err(e.into())
        }
    }
}
