//! The directory-listing primitive.
//!
//! Navigation never touches the filesystem directly; it asks a [`Lister`] for
//! the immediate children of a path. [`FsLister`] is the real implementation,
//! tests substitute an in-memory tree.

use std::{ffi::OsString, fs, path::Path};

use crate::error::ListingError;

/// One child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: OsString,
    pub is_dir: bool,
}

#[cfg(test)]
impl Entry {
    pub fn dir(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    pub fn file(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }
}

/// Produces the listing of a directory at a point in time.
pub trait Lister {
    fn list(&self, path: &Path) -> Result<Vec<Entry>, ListingError>;
}

/// Lists directories with `std::fs::read_dir`, sorted by file name.
///
/// `is_dir` is taken from the entry's own file type, so a symlink pointing at a
/// directory is reported as a non-directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl Lister for FsLister {
    fn list(&self, path: &Path) -> Result<Vec<Entry>, ListingError> {
        let read_dir = fs::read_dir(path).map_err(|e| ListingError::new(path, e))?;

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|e| ListingError::new(path, e))?;
            let file_type = dir_entry
                .file_type()
                .map_err(|e| ListingError::new(path, e))?;
            entries.push(Entry {
                name: dir_entry.file_name(),
                is_dir: file_type.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        log::debug!("listed {} ({} entries)", path.display(), entries.len());
        Ok(entries)
    }
}
