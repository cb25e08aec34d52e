//! Shell session state and the read-eval loop.

use chrono::{Local, NaiveDateTime};
use log::{debug, error};

use crate::command::{self, COMPLETIONS, VERSION_LINE};
use crate::editor;
use crate::env::Environment;
use crate::error::{ShellError, ShellResult};
use crate::fs::{path, VirtualFs};
use crate::history::History;
use crate::terminal::{ConsoleColor, Terminal};
use crate::ExitReason;

/// Everything a command can read or change.
#[derive(Debug, Clone)]
pub struct Session {
    /// Absolute path; only `cd`/`chdir` change it.
    pub current_dir: String,
    pub env: Environment,
    pub history: History,
    pub fs: VirtualFs,
    user_name: String,
    computer_name: String,
    started: NaiveDateTime,
}

impl Session {
    /// Create a session positioned at the root.
    pub fn new(fs: VirtualFs, env: Environment, user_name: &str, computer_name: &str) -> Self {
        Self {
            current_dir: path::ROOT.to_string(),
            env,
            history: History::new(),
            fs,
            user_name: user_name.to_string(),
            computer_name: computer_name.to_string(),
            started: Local::now().naive_local(),
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn computer_name(&self) -> &str {
        &self.computer_name
    }

    pub fn started(&self) -> NaiveDateTime {
        self.started
    }

    /// Prompt text: current directory plus `>`.
    pub fn prompt(&self) -> String {
        format!("{}>", self.current_dir)
    }

    /// Apply a non-empty `cd` argument.
    ///
    /// `..` climbs one level (no-op at the root), a bare separator jumps to
    /// the root, anything else is resolved and must name a known directory.
    pub fn change_directory(&mut self, arg: &str) -> ShellResult<()> {
        let arg = arg.trim();
        if arg == path::PARENT {
            if !path::is_root(&self.current_dir) {
                let parent = path::parent(&self.current_dir);
                self.current_dir = self.fs.find(&parent).map(str::to_string).unwrap_or(parent);
            }
            return Ok(());
        }
        if arg == "\\" || arg == "/" {
            self.current_dir = path::ROOT.to_string();
            return Ok(());
        }

        let resolved = path::resolve(&self.current_dir, arg);
        debug!("cd {:?} -> {}", arg, resolved);
        match self.fs.find(&resolved) {
            Some(dir) => {
                self.current_dir = dir.to_string();
                Ok(())
            }
            None => Err(ShellError::PathNotFound(resolved)),
        }
    }
}

/// A session bound to a terminal.
pub struct Shell<T: Terminal> {
    session: Session,
    terminal: T,
}

impl<T: Terminal> Shell<T> {
    pub fn new(session: Session, terminal: T) -> Self {
        Self { session, terminal }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn into_terminal(self) -> T {
        self.terminal
    }

    /// Print the startup banner.
    pub fn banner(&mut self) -> ShellResult<()> {
        self.terminal.write_line(VERSION_LINE)?;
        self.terminal
            .write_line("(c) Microsoft Corporation. All rights reserved.")?;
        self.terminal.write_line("")?;
        Ok(())
    }

    /// Show the prompt, read one line and record it in history.
    pub fn read_command(&mut self) -> ShellResult<String> {
        let prompt = self.session.prompt();
        self.terminal.write(&prompt)?;
        let line = editor::read_line(
            &mut self.terminal,
            &mut self.session.history,
            COMPLETIONS,
            &prompt,
        )?;
        self.session.history.record(&line);
        Ok(line)
    }

    /// Dispatch one line.
    pub fn execute(&mut self, line: &str) -> ShellResult<Option<ExitReason>> {
        command::dispatch(&mut self.session, &mut self.terminal, line)
    }

    /// Run until a command ends the session or input runs out.
    ///
    /// A failing command is reported in red and the loop goes on; only a
    /// failure to read input ends it with an error.
    pub fn run(&mut self) -> ShellResult<ExitReason> {
        loop {
            let line = match self.read_command() {
                Ok(line) => line,
                Err(e) if e.is_input_closed() => return Ok(ExitReason::InputClosed),
                Err(e) => return Err(e),
            };

            match self.execute(&line) {
                Ok(Some(reason)) => return Ok(reason),
                Ok(None) => {}
                Err(e) if e.is_input_closed() => return Ok(ExitReason::InputClosed),
                Err(e) => self.report(&e)?,
            }
        }
    }

    fn report(&mut self, err: &ShellError) -> ShellResult<()> {
        error!("command failed: {}", err);
        self.terminal.set_foreground(ConsoleColor::Red)?;
        self.terminal.write_line(&format!("Error: {}", err))?;
        self.terminal.set_foreground(ConsoleColor::White)?;
        Ok(())
    }
}
