//! Command-line surface.
//!
//! Parsing never exits the process; it yields a [`CliOutcome`] that the entry
//! point matches on to pick an exit status.

use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::Path;

/// Help shown, or the operator typed `bye`.
pub const EXIT_OK: u8 = 0;
/// No `-c` given.
pub const EXIT_USAGE: u8 = 1;
/// The argument parser rejected the command line.
pub const EXIT_BAD_OPTION: u8 = 2;
/// Ctrl+C from the operator.
pub const EXIT_INTERRUPTED: u8 = 3;
/// The port could not be opened, failed mid-session, or stdin closed.
pub const EXIT_FAILURE: u8 = 1;

/// Raw flags as clap sees them.
#[derive(Parser, Debug)]
#[command(
    name = "serial_loopback",
    about = "Sends operator-entered lines to a serial loopback peer and prints the echoed replies.",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct Args {
    /// Serial port to open (e.g. /dev/ttyUSB0 or COM1).
    #[arg(short = 'c', value_name = "comPort")]
    port: Option<String>,

    /// Print usage and exit.
    #[arg(short = 'h', short_alias = '?', action = ArgAction::SetTrue)]
    help: bool,

    /// Option parsing stops at the first positional; it and everything after
    /// it are ignored.
    #[arg(hide = true, trailing_var_arg = true, num_args = 1..)]
    rest: Vec<String>,
}

/// Result of interpreting the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliOutcome {
    /// `-h` or `-?` was given.
    Help,
    /// No usable `-c <port>` was given.
    MissingPort,
    /// The parser rejected the arguments; carries its error text.
    UnknownFlag(String),
    /// Port identifier to open.
    Parsed(String),
}

impl CliOutcome {
    /// Exit status for outcomes that stop before a session is opened.
    pub fn exit_status(&self) -> Option<u8> {
        match self {
            Self::Help => Some(EXIT_OK),
            Self::MissingPort => Some(EXIT_USAGE),
            Self::UnknownFlag(_) => Some(EXIT_BAD_OPTION),
            Self::Parsed(_) => None,
        }
    }
}

/// Interpret a full argument vector, program name first.
pub fn parse_args<I, T>(args: I) -> CliOutcome
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(e) => return CliOutcome::UnknownFlag(e.to_string().trim_end().to_string()),
    };

    if !args.rest.is_empty() {
        tracing::debug!(ignored = ?args.rest, "ignoring trailing arguments");
    }

    if args.help {
        return CliOutcome::Help;
    }

    match args.port {
        Some(port) if !port.is_empty() => CliOutcome::Parsed(port),
        _ => CliOutcome::MissingPort,
    }
}

/// Usage text for `program` (a path or bare name).
pub fn usage(program: &str) -> String {
    let name = Path::new(program)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string());

    format!(
        "Usage: {name} -c comPort\n  -c Specify serial port (e.g. com1)\n  -? Help: print this usage message\n"
    )
}
