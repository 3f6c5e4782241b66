//! pickdir: an interactive directory browser.
//!
//! Walks the filesystem one directory at a time and prints the chosen path to
//! stdout, which is meant to be captured by the shell, e.g. `cd "$(pickdir)"`.
//!
//! # Keys
//! - `k`/`Up`, `j`/`Down`: move the selection (wraps around).
//! - `l`/`Right`: enter the selected directory.
//! - `h`/`Left`: go to the parent directory.
//! - `Enter`: print the selected path and exit.
//! - `q`, `Esc`, `Ctrl-C`: exit without printing.
//! - `Ctrl-Z`: suspend (Unix only).
//!
//! # Logging
//! Set `PICKDIR_LOG` to a file path to write a debug log there. The terminal
//! itself is never used for log output.

mod app;
mod error;
mod input;
mod listing;
mod navigation;
mod render;
mod terminal;

use std::{
    env,
    ffi::OsStr,
    fs::File,
    io::{self, stderr, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use crossterm::{event, terminal::size};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::{
    error::Error,
    listing::FsLister,
    navigation::DirectoryView,
    terminal::TermCleanup,
};

const LOG_ENV: &str = "PICKDIR_LOG";

#[derive(Parser)]
#[command(name = "pickdir", version, about = "Interactively pick a path and print it")]
struct Args {
    /// Directory to start in; defaults to the current directory
    path: Option<PathBuf>,
}

/// Sends `log` records to `path`, if given.
///
/// Fails only when the log file cannot be created.
fn init_logging(path: Option<&OsStr>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    // A logger is already set only if this runs twice.
    let _ = WriteLogger::init(LevelFilter::Debug, config, file);
    Ok(())
}

/// Lists the starting directory and runs the browser on it.
///
/// The first listing happens before the terminal is touched, so a bad start
/// path is reported on a normal screen.
fn run_interactive_selector(start: Option<PathBuf>) -> Result<Option<PathBuf>, Error> {
    let start = match start {
        Some(path) => path,
        None => env::current_dir().map_err(Error::WorkingDirectory)?,
    };
    let view = DirectoryView::open(start, &FsLister)?;

    // `_cleanup` restores the terminal when this function returns.
    let _cleanup = TermCleanup::enter()?;
    app::run(&mut stderr(), view, &FsLister, event::read, || {
        size().unwrap_or((80, 24))
    })
}

/// Writes `path` and a newline to `out`, byte for byte on Unix.
fn write_path<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt as _;
        out.write_all(path.as_os_str().as_bytes())?;
    }

    // On other platforms (like Windows), `display()` is safe.
    #[cfg(not(unix))]
    write!(out, "{}", path.display())?;

    out.write_all(b"\n")?;
    out.flush()
}

fn main() {
    let args = Args::parse();
    let log_path = env::var_os(LOG_ENV);
    if let Err(e) = init_logging(log_path.as_deref()) {
        eprintln!("Warning: cannot open log file from {LOG_ENV}: {e}");
    }
    log::info!("starting in {:?}", args.path);

    // The terminal guard has been dropped by the time this returns, so the
    // path lands in the normal screen rather than the alternate one.
    match run_interactive_selector(args.path) {
        Ok(Some(path)) => {
            if let Err(e) = write_path(&mut io::stdout().lock(), &path) {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
