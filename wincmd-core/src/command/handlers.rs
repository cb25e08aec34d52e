//! Handler catalog.

use chrono::{Local, Timelike};
use log::warn;

use super::{echo_text, Command};
use crate::editor;
use crate::error::{ShellError, ShellResult};
use crate::fs::{self, VirtualFs};
use crate::history::History;
use crate::session::Session;
use crate::terminal::{ConsoleColor, Terminal};
use crate::ExitReason;

pub const VERSION_LINE: &str = "Microsoft Windows [Version 10.0.19045.6456]";

const VOLUME_LINES: &[&str] = &[
    " Volume in drive C has no label.",
    " Volume Serial Number is 1234-5678",
];

const HELP_SUMMARY: &[(&str, &str)] = &[
    ("ASSOC", "Displays or modifies file extension associations."),
    ("ATTRIB", "Displays or changes file attributes."),
    ("CD", "Displays the name of or changes the current directory."),
    ("CHDIR", "Displays the name of or changes the current directory."),
    ("CLS", "Clears the screen."),
    ("COLOR", "Sets the default console foreground and background colors."),
    ("COPY", "Copies one or more files to another location."),
    ("DATE", "Displays or sets the date."),
    ("DEL", "Deletes one or more files."),
    ("DIR", "Displays a list of files and subdirectories in a directory."),
    ("ECHO", "Displays messages, or turns command echoing on or off."),
    ("ERASE", "Deletes one or more files."),
    ("EXIT", "Quits the CMD.EXE program (command interpreter)."),
    ("FIND", "Searches for a text string in a file or files."),
    ("FTYPE", "Displays or modifies file types used in file extension associations."),
    ("HELP", "Provides Help information for Windows commands."),
    ("HOSTNAME", "Prints the name of the current host."),
    ("IPCONFIG", "Displays network adapter configuration."),
    ("MD", "Creates a directory."),
    ("MKDIR", "Creates a directory."),
    ("MOVE", "Moves one or more files from one directory to another directory."),
    ("PATH", "Displays or sets a search path for executable files."),
    ("PAUSE", "Suspends processing of a batch file and displays a message."),
    ("PROMPT", "Changes the Windows command prompt."),
    ("RD", "Removes a directory."),
    ("REBOOT", "Restarts the machine."),
    ("REM", "Records comments (remarks) in batch files or CONFIG.SYS."),
    ("REN", "Renames a file or files."),
    ("RENAME", "Renames a file or files."),
    ("RMDIR", "Removes a directory."),
    ("SET", "Displays, sets, or removes Windows environment variables."),
    ("SHUTDOWN", "Allows proper local or remote shutdown of machine."),
    ("SORT", "Sorts input."),
    ("SYSTEMINFO", "Displays machine specific properties and configuration."),
    ("TASKLIST", "Displays all currently running tasks including services."),
    ("TIME", "Displays or sets the system time."),
    ("TITLE", "Sets the window title for a CMD.EXE session."),
    ("TREE", "Graphically displays the directory structure of a drive or path."),
    ("TYPE", "Displays the contents of a text file."),
    ("VER", "Displays the Windows version."),
    ("VOL", "Displays a disk volume label and serial number."),
    ("WHERE", "Displays the location of files that match the search pattern."),
    ("WHOAMI", "Displays the current user name."),
    ("XCOPY", "Copies files and directory trees."),
];

/// Usage text shown by `help <cmd>` and by file commands called bare.
fn usage(command: Command) -> &'static [&'static str] {
    match command {
        Command::Dir => &[
            "Displays a list of files and subdirectories in a directory.",
            "",
            "DIR [drive:][path][filename] [/A[[:]attributes]] [/B]",
        ],
        Command::Cd => &[
            "Displays the name of or changes the current directory.",
            "",
            "CD [drive:][path]",
            "CD [..]",
        ],
        Command::Color => &[
            "Sets the default console foreground and background colors.",
            "",
            "COLOR [attr]",
            "",
            "  attr        Specifies color attribute of console output",
            "",
            "Color attributes are specified as TWO hex digits -- the first",
            "corresponds to the background; the second the foreground.",
            "    0 = Black       8 = Gray",
            "    1 = Blue        9 = Light Blue",
            "    2 = Green       A = Light Green",
            "    3 = Aqua        B = Light Aqua",
            "    4 = Red         C = Light Red",
            "    5 = Purple      D = Light Purple",
            "    6 = Yellow      E = Light Yellow",
            "    7 = White       F = Bright White",
        ],
        Command::Prompt => &["Changes the command prompt.", "", "PROMPT [text]"],
        Command::Copy => &[
            "Copies one or more files to another location.",
            "",
            "COPY source destination",
        ],
        Command::Del => &[
            "Deletes one or more files.",
            "",
            "DEL [/P] [/F] [/S] [/Q] [/A[[:]attributes]] names",
        ],
        Command::Rename => &[
            "Renames a file or files.",
            "",
            "RENAME [drive:][path]filename1 filename2",
        ],
        Command::Type => &[
            "Displays the contents of a text file.",
            "",
            "TYPE [drive:][path]filename",
        ],
        Command::Find => &[
            "Searches for a text string in a file or files.",
            "",
            "FIND [/V] [/C] [/N] [/I] \"string\" [[drive:][path]filename[ ...]]",
        ],
        Command::Sort => &["Sorts input.", "", "SORT [/R] [[drive1:][path1]filename1]"],
        Command::Attrib => &[
            "Displays or changes file attributes.",
            "",
            "ATTRIB [+R | -R] [+A | -A] [+S | -S] [+H | -H] [drive:][path][filename]",
        ],
        Command::Xcopy => &[
            "Copies files and directory trees.",
            "",
            "XCOPY source [destination] [/S [/E]] [/V] [/W]",
        ],
        Command::Mkdir => &["Creates a directory.", "", "MKDIR [drive:]path"],
        Command::Rmdir => &["Removes (deletes) a directory.", "", "RMDIR [/S] [/Q] [drive:]path"],
        Command::Move => &[
            "Moves files and renames files and directories.",
            "",
            "MOVE [/Y | /-Y] [drive:][path]filename1[,...] destination",
        ],
        Command::Where => &[
            "Displays the location of files that match the search pattern.",
            "",
            "WHERE [/R dir] [/Q] [/F] [/T] pattern...",
        ],
        _ => &[],
    }
}

fn write_lines<T: Terminal + ?Sized>(term: &mut T, lines: &[&str]) -> ShellResult<()> {
    for line in lines {
        term.write_line(line)?;
    }
    Ok(())
}

/// Print usage when `args` is empty, otherwise the canned result line.
fn usage_or<T: Terminal + ?Sized>(
    term: &mut T,
    command: Command,
    args: &str,
    done: &str,
) -> ShellResult<()> {
    if args.is_empty() {
        write_lines(term, usage(command))
    } else {
        term.write_line(done)?;
        Ok(())
    }
}

/// Run a routed command.
pub(crate) fn run<T: Terminal + ?Sized>(
    command: Command,
    args: &str,
    session: &mut Session,
    term: &mut T,
) -> ShellResult<Option<ExitReason>> {
    match command {
        Command::Help => help(term, args)?,
        Command::Dir => match fs::list(&session.fs, &session.current_dir, args) {
            Ok(lines) => {
                for line in &lines {
                    term.write_line(line)?;
                }
            }
            Err(e @ ShellError::FileNotFound(_)) => term.write_line(&e.to_string())?,
            Err(e) => return Err(e),
        },
        Command::Cd => change_directory(session, term, args)?,
        Command::Cls => term.clear_screen()?,
        Command::Ver => term.write_line(VERSION_LINE)?,
        Command::Time => time(term, args)?,
        Command::Date => date(term, args)?,
        Command::Set => set(session, term, args)?,
        Command::Path => {
            if let Some(value) = session.env.get("PATH") {
                term.write_line(&format!("PATH={}", value))?;
            }
        }
        Command::Exit => {
            term.write_line("Exiting...")?;
            return Ok(Some(ExitReason::Exit));
        }
        Command::Shutdown => {
            term.write_line("Shutting down...")?;
            return Ok(Some(ExitReason::Shutdown));
        }
        Command::Reboot => {
            term.write_line("Rebooting...")?;
            return Ok(Some(ExitReason::Reboot));
        }
        Command::Color => color(term, args)?,
        Command::Title => {
            if !args.is_empty() {
                term.set_title(args)?;
            }
        }
        Command::Prompt => usage_or(
            term,
            command,
            args,
            "Prompt customization is not fully supported in this version.",
        )?,
        Command::Copy => usage_or(term, command, args, "        1 file(s) copied.")?,
        Command::Del => usage_or(term, command, args, "        1 file(s) deleted.")?,
        Command::Rename => usage_or(term, command, args, "File renamed successfully.")?,
        Command::Type => {
            if args.is_empty() {
                write_lines(term, usage(command))?;
            } else {
                write_lines(
                    term,
                    &[
                        "This is a sample text file.",
                        "TYPE command displays the contents.",
                        "Line 3 of the file.",
                    ],
                )?;
            }
        }
        Command::Find => {
            if !args.contains('"') {
                write_lines(term, usage(command))?;
            } else {
                write_lines(
                    term,
                    &[
                        "---------- FILENAME.TXT",
                        "    1:  This line contains the search string.",
                        "    2:  Another line with the string.",
                    ],
                )?;
            }
        }
        Command::Sort => {
            if args.is_empty() {
                write_lines(term, usage(command))?;
            } else {
                write_lines(term, &["Apple", "Banana", "Cherry", "Date"])?;
            }
        }
        Command::Attrib => {
            let line = format!("     A    R    H    {}", args);
            usage_or(term, command, args, &line)?;
        }
        Command::Xcopy => usage_or(term, command, args, "        5 file(s) copied.")?,
        Command::Mkdir => usage_or(term, command, args, "Directory created successfully.")?,
        Command::Rmdir => usage_or(term, command, args, "Directory removed successfully.")?,
        Command::Move => usage_or(term, command, args, "        1 file(s) moved.")?,
        Command::Vol => write_lines(term, VOLUME_LINES)?,
        Command::Tree => tree(session, term)?,
        Command::SystemInfo => system_info(session, term)?,
        Command::TaskList => task_list(term)?,
        Command::Where => {
            if args.is_empty() {
                write_lines(term, usage(command))?;
            } else {
                term.write_line(&format!("C:\\Windows\\System32\\{}.exe", args))?;
                term.write_line(&format!("C:\\Windows\\{}.exe", args))?;
            }
        }
        Command::WhoAmI => term.write_line(&format!(
            "{}\\{}",
            session.computer_name(),
            session.user_name()
        ))?,
        Command::Hostname => term.write_line(session.computer_name())?,
        Command::IpConfig => write_lines(
            term,
            &[
                "Windows IP Configuration",
                "",
                "Ethernet adapter Ethernet:",
                "   Connection-specific DNS Suffix  . : ",
                "   Link-local IPv6 Address . . . . . : fe80::1%1",
                "   IPv4 Address. . . . . . . . . . . : 192.168.1.100",
                "   Subnet Mask . . . . . . . . . . . : 255.255.255.0",
                "   Default Gateway . . . . . . . . . : 192.168.1.1",
            ],
        )?,
        Command::Assoc => write_lines(
            term,
            &[".txt=txtfile", ".exe=exefile", ".bat=batfile", ".cmd=cmdfile"],
        )?,
        Command::Ftype => write_lines(
            term,
            &[
                "txtfile=%SystemRoot%\\system32\\NOTEPAD.EXE %1",
                "exefile=\"%1\" %*",
                "batfile=\"%1\" %*",
            ],
        )?,
        Command::Pause => {
            term.write_line("Press any key to continue . . .")?;
            term.read_key()?;
        }
        Command::Rem => {}
        Command::Echo => term.write_line(&echo_text(&session.env, args))?,
        Command::NotImplemented(name) => {
            term.write_line(&format!("{} not implemented in this version.", name))?
        }
    }
    Ok(None)
}

fn help<T: Terminal + ?Sized>(term: &mut T, args: &str) -> ShellResult<()> {
    if args.is_empty() {
        term.write_line("For more information on a specific command, type HELP command-name")?;
        for (name, summary) in HELP_SUMMARY {
            term.write_line(&format!("{:<15}{}", name, summary))?;
        }
        term.write_line("")?;
        return Ok(());
    }

    let lines = Command::lookup(args).map(usage).unwrap_or_default();
    if lines.is_empty() {
        term.write_line(&format!("Help for {} is not available in this version.", args))?;
        Ok(())
    } else {
        write_lines(term, lines)
    }
}

fn change_directory<T: Terminal + ?Sized>(
    session: &mut Session,
    term: &mut T,
    args: &str,
) -> ShellResult<()> {
    if args.is_empty() {
        term.write_line(&session.current_dir)?;
        return Ok(());
    }
    match session.change_directory(args) {
        Err(e @ ShellError::PathNotFound(_)) => {
            term.write_line(&e.to_string())?;
            Ok(())
        }
        other => other,
    }
}

fn set<T: Terminal + ?Sized>(session: &mut Session, term: &mut T, args: &str) -> ShellResult<()> {
    if args.is_empty() {
        for (name, value) in session.env.iter() {
            term.write_line(&format!("{}={}", name, value))?;
        }
    } else if let Some((name, value)) = args.split_once('=') {
        let name = name.trim();
        if name.is_empty() {
            warn!("set without a variable name: {:?}", args);
        } else {
            session.env.set(name, value.trim());
        }
    } else {
        match session.env.get(args) {
            Some(value) => term.write_line(&format!("{}={}", args, value))?,
            None => term.write_line(&format!("Environment variable {} not defined", args))?,
        }
    }
    Ok(())
}

fn color<T: Terminal + ?Sized>(term: &mut T, args: &str) -> ShellResult<()> {
    if args.is_empty() {
        return write_lines(term, usage(Command::Color));
    }
    let mut digits = args.chars();
    if let (Some(bg), Some(fg)) = (digits.next(), digits.next()) {
        let bg = ConsoleColor::from_hex_digit(bg).unwrap_or(ConsoleColor::White);
        let fg = ConsoleColor::from_hex_digit(fg).unwrap_or(ConsoleColor::White);
        term.set_background(bg)?;
        term.set_foreground(fg)?;
        term.clear_screen()?;
    }
    Ok(())
}

/// Ask for a replacement value on the same row using the line editor.
fn ask<T: Terminal + ?Sized>(term: &mut T, prompt: &str) -> ShellResult<String> {
    term.write(prompt)?;
    editor::read_line(term, &mut History::new(), &[], prompt)
}

fn time<T: Terminal + ?Sized>(term: &mut T, _args: &str) -> ShellResult<()> {
    let now = Local::now();
    term.write_line(&format!(
        "The current time is: {}.{:02}",
        now.format("%H:%M:%S"),
        now.nanosecond() / 10_000_000 % 100
    ))?;
    if !ask(term, "Enter the new time: ")?.is_empty() {
        term.write_line("Invalid time format. (Use hours:minutes:seconds)")?;
    }
    Ok(())
}

fn date<T: Terminal + ?Sized>(term: &mut T, _args: &str) -> ShellResult<()> {
    let now = Local::now();
    term.write_line(&format!("The current date is: {}", now.format("%a %m/%d/%Y")))?;
    if !ask(term, "Enter the new date (mm-dd-yy): ")?.is_empty() {
        term.write_line("Invalid date format. (Use mm-dd-yy format)")?;
    }
    Ok(())
}

/// Box-drawn subdirectory tree below `dir`.
fn tree_lines(fs: &VirtualFs, dir: &str, prefix: &str, out: &mut Vec<String>) {
    let subdirs = fs.subdirectories(dir);
    let count = subdirs.len();
    for (i, (entry, key)) in subdirs.into_iter().enumerate() {
        let last = i + 1 == count;
        out.push(format!("{}{}{}", prefix, if last { "└───" } else { "├───" }, entry.name));
        if let Some(child) = key {
            let nested = format!("{}{}", prefix, if last { "    " } else { "│   " });
            tree_lines(fs, child, &nested, out);
        }
    }
}

fn tree<T: Terminal + ?Sized>(session: &Session, term: &mut T) -> ShellResult<()> {
    term.write_line("Folder PATH listing for volume Windows")?;
    term.write_line("Volume serial number is 1234-5678")?;
    term.write_line(&session.current_dir)?;

    let mut lines = Vec::new();
    tree_lines(&session.fs, &session.current_dir, "", &mut lines);
    if lines.is_empty() {
        term.write_line("No subfolders exist")?;
    }
    for line in &lines {
        term.write_line(line)?;
    }
    Ok(())
}

fn system_info<T: Terminal + ?Sized>(session: &Session, term: &mut T) -> ShellResult<()> {
    let field = |name: &str, value: &str| format!("{:<27}{}", format!("{}:", name), value);
    let boot = session.started().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string();
    let logon = format!("\\\\{}", session.computer_name());
    let lines = [
        field("Host Name", session.computer_name()),
        field("OS Name", "Microsoft Windows 10 Pro"),
        field("OS Version", "10.0.19045 N/A Build 19045"),
        field("OS Manufacturer", "Microsoft Corporation"),
        field("OS Configuration", "Standalone Workstation"),
        field("Registered Owner", session.user_name()),
        field("System Boot Time", &boot),
        field("System Manufacturer", "TextyOS Virtual Machine"),
        field("System Model", "TextyOS PC"),
        field("System Type", "x86-based PC"),
        field("Windows Directory", "C:\\Windows"),
        field("System Directory", "C:\\Windows\\system32"),
        field("Total Physical Memory", "1,024 MB"),
        field("Available Physical Memory", "512 MB"),
        field("Domain", "WORKGROUP"),
        field("Logon Server", &logon),
    ];
    for line in &lines {
        term.write_line(line)?;
    }
    Ok(())
}

fn task_list<T: Terminal + ?Sized>(term: &mut T) -> ShellResult<()> {
    write_lines(
        term,
        &[
            "",
            "Image Name                     PID Session Name        Session#    Mem Usage",
            "========================= ======== ================ =========== ============",
            "System Idle Process              0 Services                   0         24 K",
            "System                           4 Services                   0      1,024 K",
            "smss.exe                       248 Services                   0        452 K",
            "csrss.exe                      332 Services                   0      3,456 K",
            "winlogon.exe                   468 Console                    1      5,672 K",
            "services.exe                   508 Services                   0      6,540 K",
            "explorer.exe                   912 Console                    1    124,560 K",
            "cmd.exe                       1234 Console                    1      3,456 K",
            "",
        ],
    )
}
