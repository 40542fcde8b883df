//! Dispatch logic: extract params from `ArgMatches` and convert to command args.
//!
//! Arguments neither command declares are split off before clap sees them;
//! the binaries log them and carry on.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgMatches, Command};
use tracing::Level;

use crate::commands::assemble::AssembleArgs;
use crate::commands::execute::ExecuteArgs;
use crate::logging::LogArgs;

pub struct LogParams {
    pub file: PathBuf,
    pub level: Level,
}

impl LogParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: m
                .get_one::<PathBuf>("log_file")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("log.log")),
            level: m
                .get_one::<String>("log_level")
                .and_then(|level| level.parse().ok())
                .unwrap_or(Level::DEBUG),
        }
    }
}

impl From<LogParams> for LogArgs {
    fn from(p: LogParams) -> Self {
        Self {
            file: p.file,
            level: p.level,
        }
    }
}

pub struct AssembleParams {
    pub infile: PathBuf,
    pub outfile: PathBuf,
}

impl AssembleParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            infile: required_path(m, "infile"),
            outfile: required_path(m, "outfile"),
        }
    }
}

impl From<AssembleParams> for AssembleArgs {
    fn from(p: AssembleParams) -> Self {
        Self {
            infile: p.infile,
            outfile: p.outfile,
        }
    }
}

pub struct ExecuteParams {
    pub infile: PathBuf,
    pub trace: bool,
}

impl ExecuteParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            infile: required_path(m, "infile"),
            trace: m.get_flag("trace"),
        }
    }
}

impl From<ExecuteParams> for ExecuteArgs {
    fn from(p: ExecuteParams) -> Self {
        Self {
            infile: p.infile,
            trace: p.trace,
        }
    }
}

/// Clap enforces presence; an empty path only shows up for hand-built matches.
fn required_path(m: &ArgMatches, id: &str) -> PathBuf {
    m.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

/// Split `args` (program name first) into what `cmd` declares and the rest.
///
/// A declared option keeps its value, given either as the next argument or
/// after `=`.
pub fn partition_args<I>(cmd: &Command, args: I) -> (Vec<OsString>, Vec<OsString>)
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut known: Vec<OsString> = args.next().into_iter().collect();
    let mut unknown = Vec::new();

    while let Some(arg) = args.next() {
        let (declared, inline_value) = {
            let text = arg.to_string_lossy();
            let (name, inline_value) = match text.split_once('=') {
                Some((name, _)) => (name, true),
                None => (&*text, false),
            };
            (declared_flag(cmd, name), inline_value)
        };

        match declared {
            Some(takes_value) => {
                known.push(arg);
                if takes_value && !inline_value {
                    known.extend(args.next());
                }
            }
            None => unknown.push(arg),
        }
    }

    (known, unknown)
}

/// `Some(takes_value)` when `flag` names an argument of `cmd`.
fn declared_flag(cmd: &Command, flag: &str) -> Option<bool> {
    if matches!(flag, "-h" | "--help") {
        return Some(false);
    }
    let long = flag.strip_prefix("--")?;
    cmd.get_arguments()
        .find(|arg| arg.get_long() == Some(long))
        .map(|arg| arg.get_action().takes_values())
}
