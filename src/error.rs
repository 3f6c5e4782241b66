use std::{io, path::PathBuf};

use thiserror::Error;

/// A directory could not be listed.
///
/// There is no safe state to fall back to once the listing is unreadable, so
/// this always ends the program.
#[derive(Debug, Error)]
#[error("error reading dir {}: {source}", .path.display())]
pub struct ListingError {
    /// The directory that failed to list.
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl ListingError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// Fatal errors surfaced by the binary.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// Only possible at startup, when no path argument was given.
    #[error("error getting current directory: {0}")]
    WorkingDirectory(#[source] io::Error),

    /// Drawing or reading events failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
