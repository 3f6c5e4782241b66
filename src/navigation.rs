//! Navigation state: the current directory, its listing, and the selection.
//!
//! A [`DirectoryView`] is never patched in place. Every [`Operation`] produces
//! a fresh, fully consistent view (or a terminal [`Transition::Finish`]), so a
//! half-updated listing is never observable.

use std::path::{Component, Path, PathBuf};

use crate::{
    error::ListingError,
    listing::{Entry, Lister},
};

/// A state transition requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    MoveUp,
    MoveDown,
    /// Enter the selected directory.
    Descend,
    /// Go to the parent directory, keeping the cursor on the directory we came from.
    Ascend,
    Confirm,
    Cancel,
}

/// The outcome of applying an [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Keep browsing with the new view.
    Continue(DirectoryView),
    /// Stop. `Some` carries the confirmed path, `None` means the user cancelled.
    Finish(Option<PathBuf>),
}

/// A directory, its children as listed when it was entered, and the highlighted child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryView {
    current_path: PathBuf,
    children: Vec<Entry>,
    selected: usize,
}

impl DirectoryView {
    /// Lists `path` and selects its first child.
    pub fn open<L: Lister + ?Sized>(path: impl Into<PathBuf>, lister: &L) -> Result<Self, ListingError> {
        let path = path.into();
        log::debug!("opening {}", path.display());
        let children = lister.list(&path)?;
        Ok(Self::from_listing(path, children))
    }

    /// Builds a view from an already taken listing, selecting the first child.
    pub fn from_listing(current_path: impl Into<PathBuf>, children: Vec<Entry>) -> Self {
        Self {
            current_path: current_path.into(),
            children,
            selected: 0,
        }
    }

    /// Moves the selection to `index`, wrapped into the listing's bounds.
    pub fn with_selected(self, index: usize) -> Self {
        let selected = match self.children.len() {
            0 => 0,
            len => index % len,
        };
        Self { selected, ..self }
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn children(&self) -> &[Entry] {
        &self.children
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.children.get(self.selected)
    }

    /// The path confirming right now would yield: the selected child joined onto
    /// the current path, or the current path itself when the directory is empty.
    pub fn selection_target(&self) -> PathBuf {
        match self.selected_entry() {
            Some(entry) => self.current_path.join(&entry.name),
            None => self.current_path.clone(),
        }
    }

    /// Computes the next state for `op`.
    ///
    /// Only `Descend` and `Ascend` read the filesystem, and a failed read is
    /// returned as-is. Everything else is total.
    pub fn apply<L: Lister + ?Sized>(&self, op: Operation, lister: &L) -> Result<Transition, ListingError> {
        let next = match op {
            Operation::MoveUp => self.moved_by(-1),
            Operation::MoveDown => self.moved_by(1),
            Operation::Descend => self.descended(lister)?,
            Operation::Ascend => self.ascended(lister)?,
            Operation::Confirm => return Ok(Transition::Finish(Some(self.selection_target()))),
            Operation::Cancel => return Ok(Transition::Finish(None)),
        };
        Ok(Transition::Continue(next))
    }

    /// Moves the selection by `step`, wrapping around both ends.
    fn moved_by(&self, step: isize) -> Self {
        let len = self.children.len();
        if len == 0 {
            return self.clone();
        }
        let selected = (self.selected as isize + step).rem_euclid(len as isize) as usize;
        Self {
            selected,
            ..self.clone()
        }
    }

    fn descended<L: Lister + ?Sized>(&self, lister: &L) -> Result<Self, ListingError> {
        match self.selected_entry() {
            Some(entry) if entry.is_dir => Self::open(self.current_path.join(&entry.name), lister),
            // Files and empty directories stay put.
            _ => Ok(self.clone()),
        }
    }

    fn ascended<L: Lister + ?Sized>(&self, lister: &L) -> Result<Self, ListingError> {
        let parent = parent_of(&self.current_path);
        let view = Self::open(parent, lister)?;

        // Exact match on the final segment of the path we left.
        let came_from = self.current_path.file_name();
        let selected = came_from
            .and_then(|name| view.children.iter().position(|e| e.name.as_os_str() == name))
            .unwrap_or(0);
        Ok(view.with_selected(selected))
    }
}

/// Lexical parent of `path`.
///
/// The filesystem root is its own parent. Paths without a lexical parent
/// (`.`, a bare name's parent is `.`, or anything ending in `..`) climb by
/// appending `..` instead, so ascending always makes progress.
pub fn parent_of(path: &Path) -> PathBuf {
    match path.components().next_back() {
        Some(Component::RootDir | Component::Prefix(_)) => path.to_path_buf(),
        Some(Component::Normal(_)) => match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
        Some(Component::CurDir | Component::ParentDir) | None => path.join(".."),
    }
}
