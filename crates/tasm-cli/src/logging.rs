//! Log sink setup.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use tasm_core::ErrorKind;
use tracing::{Level, error, warn};

pub struct LogArgs {
    pub file: PathBuf,
    pub level: Level,
}

/// Install the global subscriber, appending to `args.file`.
///
/// Falls back to stderr when the file cannot be opened. A second call is a
/// no-op.
pub fn init(args: &LogArgs) {
    let builder = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_max_level(args.level);

    match OpenOptions::new().create(true).append(true).open(&args.file) {
        Ok(file) => {
            let _ = builder.with_writer(Mutex::new(file)).try_init();
        }
        Err(err) => {
            let _ = builder.with_writer(io::stderr).try_init();
            warn!(path = %args.file.display(), "log file unavailable, using stderr: {err}");
        }
    }
}

/// Make panics visible the way returned errors are.
///
/// The only panic outside tests is the stack container's corruption check, so
/// the stdout line is the corruption summary. The default hook still runs.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("panic");
        report_panic(&mut io::stdout(), message);
        previous(info);
    }));
}

fn report_panic<W: Write>(out: &mut W, message: &str) {
    error!("fatal: {message}");
    let _ = writeln!(out, "{}", ErrorKind::Corruption.label());
    let _ = out.flush();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod logging_tests;
