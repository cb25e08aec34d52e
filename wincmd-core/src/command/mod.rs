//! Command dispatcher.
//!
//! A line goes through `parse::parse`; echo and inline assignment are
//! handled here, everything else is looked up in `ROUTES` and handed to the
//! handler catalog with the rest of the line as one argument string.

mod handlers;
pub mod parse;

use log::{debug, warn};

use crate::error::{ShellError, ShellResult};
use crate::session::Session;
use crate::terminal::Terminal;
use crate::ExitReason;

pub use handlers::VERSION_LINE;
pub use parse::{echo_text, parse, Line};

/// Handler selected by the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Dir,
    Cd,
    Cls,
    Ver,
    Time,
    Date,
    Set,
    Path,
    Exit,
    Shutdown,
    Reboot,
    Color,
    Title,
    Prompt,
    Copy,
    Del,
    Rename,
    Type,
    Find,
    Sort,
    Attrib,
    Xcopy,
    Mkdir,
    Rmdir,
    Vol,
    Tree,
    Move,
    SystemInfo,
    TaskList,
    Where,
    WhoAmI,
    Hostname,
    IpConfig,
    Assoc,
    Ftype,
    Pause,
    Rem,
    Echo,
    /// Recognized but without behaviour; carries the display name.
    NotImplemented(&'static str),
}

/// Command name -> handler. Aliases share a handler.
pub const ROUTES: &[(&str, Command)] = &[
    ("help", Command::Help),
    ("dir", Command::Dir),
    ("cd", Command::Cd),
    ("chdir", Command::Cd),
    ("cls", Command::Cls),
    ("ver", Command::Ver),
    ("time", Command::Time),
    ("date", Command::Date),
    ("set", Command::Set),
    ("path", Command::Path),
    ("exit", Command::Exit),
    ("shutdown", Command::Shutdown),
    ("reboot", Command::Reboot),
    ("color", Command::Color),
    ("title", Command::Title),
    ("prompt", Command::Prompt),
    ("copy", Command::Copy),
    ("del", Command::Del),
    ("erase", Command::Del),
    ("rename", Command::Rename),
    ("ren", Command::Rename),
    ("type", Command::Type),
    ("find", Command::Find),
    ("sort", Command::Sort),
    ("attrib", Command::Attrib),
    ("xcopy", Command::Xcopy),
    ("mkdir", Command::Mkdir),
    ("md", Command::Mkdir),
    ("rmdir", Command::Rmdir),
    ("rd", Command::Rmdir),
    ("vol", Command::Vol),
    ("tree", Command::Tree),
    ("move", Command::Move),
    ("systeminfo", Command::SystemInfo),
    ("tasklist", Command::TaskList),
    ("where", Command::Where),
    ("whoami", Command::WhoAmI),
    ("hostname", Command::Hostname),
    ("ipconfig", Command::IpConfig),
    ("assoc", Command::Assoc),
    ("ftype", Command::Ftype),
    ("pause", Command::Pause),
    ("rem", Command::Rem),
    ("echo", Command::Echo),
    ("label", Command::NotImplemented("LABEL")),
    ("chkdsk", Command::NotImplemented("CHKDSK")),
    ("fc", Command::NotImplemented("FC")),
    ("comp", Command::NotImplemented("COMP")),
    ("diskpart", Command::NotImplemented("DISKPART")),
    ("taskkill", Command::NotImplemented("TASKKILL")),
    ("sc", Command::NotImplemented("SC")),
    ("schtasks", Command::NotImplemented("SCHTASKS")),
    ("wmic", Command::NotImplemented("WMIC")),
    ("ping", Command::NotImplemented("PING")),
    ("netstat", Command::NotImplemented("NETSTAT")),
    ("tracert", Command::NotImplemented("TRACERT")),
    ("nslookup", Command::NotImplemented("NSLOOKUP")),
    ("ftp", Command::NotImplemented("FTP")),
    ("telnet", Command::NotImplemented("TELNET")),
];

/// Tab completion candidates, in match priority order.
pub const COMPLETIONS: &[&str] = &[
    "help", "dir", "cd", "cls", "echo", "set", "path", "ver", "time", "date", "exit", "shutdown",
    "reboot", "color", "title", "prompt", "copy", "del", "rename", "type", "find", "sort",
    "attrib", "xcopy", "mkdir", "rmdir",
];

impl Command {
    /// Case-insensitive routing table lookup.
    pub fn lookup(name: &str) -> Option<Self> {
        ROUTES
            .iter()
            .find(|(route, _)| route.eq_ignore_ascii_case(name))
            .map(|(_, command)| *command)
    }
}

/// Dispatch one finished line against the session.
///
/// Returns `Some(reason)` when the line ends the session. Unknown commands
/// and missing paths are reported on the terminal, not returned.
pub fn dispatch<T: Terminal + ?Sized>(
    session: &mut Session,
    term: &mut T,
    line: &str,
) -> ShellResult<Option<ExitReason>> {
    let user = session.user_name().to_string();
    session.env.set("USERNAME", &user);

    match parse(line) {
        Line::Empty => Ok(None),
        Line::Echo(text) => {
            term.write_line(&echo_text(&session.env, text))?;
            Ok(None)
        }
        Line::Assign { name, value } => {
            if name.is_empty() {
                warn!("dropping assignment without a name: {:?}", line);
            } else {
                debug!("assign {}={}", name, value);
                session.env.set(name, value);
            }
            Ok(None)
        }
        Line::Invoke { command, args } => match Command::lookup(&command) {
            Some(handler) => {
                debug!("dispatch {:?} args={:?}", handler, args);
                handlers::run(handler, args, session, term)
            }
            None => {
                debug!("unknown command {:?}", command);
                term.write_line(&ShellError::UnknownCommand(command).to_string())?;
                Ok(None)
            }
        },
    }
}
