//! The render/input loop.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use crossterm::event::Event;

use crate::{
    error::Error,
    input::{map_event, Input},
    listing::Lister,
    navigation::{DirectoryView, Transition},
    render::render,
};

/// Drives `view` until the user confirms or cancels.
///
/// Draws once up front and again after every event. `next_event` blocks for
/// the next terminal event and `size` reports the current `(columns, rows)`.
///
/// # Returns
/// - `Ok(Some(path))`: the user confirmed `path`.
/// - `Ok(None)`: the user cancelled.
/// - `Err(e)`: a directory became unreadable, or the terminal failed.
pub fn run<W, L, E, R>(
    out: &mut W,
    mut view: DirectoryView,
    lister: &L,
    mut next_event: E,
    mut size: R,
) -> Result<Option<PathBuf>, Error>
where
    W: Write,
    L: Lister + ?Sized,
    E: FnMut() -> io::Result<Event>,
    R: FnMut() -> (u16, u16),
{
    loop {
        render(out, &view, size())?;

        let event = next_event()?;
        let op = match map_event(&event) {
            Some(Input::Navigate(op)) => op,
            #[cfg(unix)]
            Some(Input::Suspend) => {
                crate::terminal::suspend()?;
                continue;
            }
            #[cfg(not(unix))]
            Some(Input::Suspend) => continue,
            // Resizes and unbound keys only need the redraw.
            None => continue,
        };

        log::trace!("{op:?} in {}", view.current_path().display());
        match view.apply(op, lister)? {
            Transition::Continue(next) => view = next,
            Transition::Finish(result) => {
                log::info!("finished with {result:?}");
                return Ok(result);
            }
        }
    }
}
