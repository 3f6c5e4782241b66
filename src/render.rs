//! Draws a [`DirectoryView`].
//!
//! The screen is cleared and redrawn in full for every frame. Styles are
//! attached to the printed content itself, so no attribute ever leaks into
//! the next line.

use std::{
    io::{Result, Write},
    path::MAIN_SEPARATOR,
};

use crossterm::{
    cursor, queue,
    style::{Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
};

use crate::navigation::DirectoryView;

/// Renders `view` into a screen of `(columns, rows)`.
///
/// Line 0 shows, in reverse video, the path confirming would print. The
/// remaining lines list the children (directories suffixed with the path
/// separator), the selected one in bold. A listing taller than the screen is
/// windowed so the selection stays visible, and every line is cut at the
/// screen width so nothing wraps onto the next row.
pub fn render<W: Write>(out: &mut W, view: &DirectoryView, (columns, rows): (u16, u16)) -> Result<()> {
    let columns = usize::from(columns);
    let target = fit(&view.selection_target().display().to_string(), columns);
    queue!(
        out,
        Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        PrintStyledContent(target.reverse())
    )?;

    let visible = usize::from(rows.saturating_sub(1));
    let first = first_visible(view.selected(), visible);
    let window = view.children().iter().enumerate().skip(first).take(visible);

    for (line, (index, entry)) in (1u16..).zip(window) {
        let mut label = entry.name.to_string_lossy().into_owned();
        if entry.is_dir {
            label.push(MAIN_SEPARATOR);
        }
        let label = fit(&label, columns);
        queue!(out, cursor::MoveTo(0, line))?;
        if index == view.selected() {
            queue!(out, PrintStyledContent(label.bold()))?;
        } else {
            queue!(out, Print(label))?;
        }
    }
    out.flush()
}

/// Cuts `line` to at most `columns` characters.
fn fit(line: &str, columns: usize) -> String {
    line.chars().take(columns).collect()
}

/// First listing index to draw so that `selected` fits in `visible` lines.
fn first_visible(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return 0;
    }
    (selected + 1).saturating_sub(visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Entry;

    fn draw(view: &DirectoryView, rows: u16) -> String {
        draw_sized(view, 80, rows)
    }

    fn draw_sized(view: &DirectoryView, columns: u16, rows: u16) -> String {
        let mut out = Vec::new();
        render(&mut out, view, (columns, rows)).expect("rendering into memory should not fail");
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn header_shows_selection_target_reversed() {
        let view = DirectoryView::from_listing("/a/b", vec![Entry::dir("x"), Entry::file("y.txt")])
            .with_selected(1);
        let screen = draw(&view, 24);

        let header = std::path::Path::new("/a/b").join("y.txt").display().to_string();
        assert!(screen.contains(&format!("\x1b[7m{header}")));
    }

    #[test]
    fn directories_get_separator_and_selection_is_bold() {
        let view = DirectoryView::from_listing("/a/b", vec![Entry::dir("x"), Entry::file("y.txt")]);
        let screen = draw(&view, 24);

        assert!(screen.contains(&format!("\x1b[1mx{MAIN_SEPARATOR}")));
        assert!(screen.contains("y.txt"));
        assert!(!screen.contains("\x1b[1my.txt"));
    }

    #[test]
    fn empty_directory_shows_only_current_path() {
        let view = DirectoryView::from_listing("/a/b", vec![]);
        let screen = draw(&view, 24);

        assert!(screen.contains("\x1b[7m/a/b"));
        assert!(!screen.contains("\x1b[1m"));
    }

    #[test]
    fn long_listing_keeps_selection_visible() {
        let children = (0..10).map(|i| Entry::file(format!("e{i}"))).collect();
        let view = DirectoryView::from_listing("/d", children).with_selected(7);
        let screen = draw(&view, 4);

        assert!(screen.contains("e5"));
        assert!(screen.contains("\x1b[1me7"));
        assert!(!screen.contains("e4"));
        assert!(!screen.contains("e8"));
    }

    #[test]
    fn narrow_screen_cuts_header_and_entries() {
        let view = DirectoryView::from_listing(
            "/very/deep/directory/tree",
            vec![Entry::file("a-rather-long-file-name.txt"), Entry::dir("short")],
        );
        let screen = draw_sized(&view, 12, 24);

        assert!(screen.contains("\x1b[7m/very/deep/d\x1b[0m"));
        assert!(!screen.contains("/very/deep/di"));
        assert!(screen.contains("\x1b[1ma-rather-lon\x1b[0m"));
        assert!(!screen.contains("a-rather-long"));
        assert!(screen.contains(&format!("short{MAIN_SEPARATOR}")));
    }

    #[test]
    fn fit_counts_characters() {
        assert_eq!(fit("abcdef", 3), "abc");
        assert_eq!(fit("ab", 3), "ab");
        assert_eq!(fit("äöüß", 2), "äö");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn first_visible_window() {
        assert_eq!(first_visible(0, 3), 0);
        assert_eq!(first_visible(2, 3), 0);
        assert_eq!(first_visible(3, 3), 1);
        assert_eq!(first_visible(9, 0), 0);
    }
}
