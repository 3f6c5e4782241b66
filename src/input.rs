//! Maps terminal events onto navigation operations.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::navigation::Operation;

/// What the event loop should do with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Navigate(Operation),
    /// Ctrl+Z: hand the terminal back to the shell until resumed.
    Suspend,
}

/// Translates an event, or `None` if it has no binding.
pub fn map_event(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<Input> {
    const CTRL: KeyModifiers = KeyModifiers::CONTROL;

    // Some terminals (Windows) also report releases.
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let op = match key.code {
        // Raw mode delivers the interrupt as a key press.
        KeyCode::Char('c') if key.modifiers.contains(CTRL) => Operation::Cancel,
        #[cfg(unix)]
        KeyCode::Char('z') if key.modifiers.contains(CTRL) => return Some(Input::Suspend),
        KeyCode::Up | KeyCode::Char('k') => Operation::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Operation::MoveDown,
        KeyCode::Right | KeyCode::Char('l') => Operation::Descend,
        KeyCode::Left | KeyCode::Char('h') => Operation::Ascend,
        KeyCode::Enter => Operation::Confirm,
        KeyCode::Char('q') | KeyCode::Esc => Operation::Cancel,
        _ => return None,
    };
    Some(Input::Navigate(op))
}

fn map_mouse(mouse: &MouseEvent) -> Option<Input> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Input::Navigate(Operation::MoveUp)),
        MouseEventKind::ScrollDown => Some(Input::Navigate(Operation::MoveDown)),
        _ => None,
    }
}
