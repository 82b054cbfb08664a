//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map digit/shifted-digit keys to section number (1..3).
pub fn map_key_to_digit(k: &KeyEvent) -> Option<usize> {
    if let KeyCode::Char(c) = k.code {
        match c {
            '1' | '!' => Some(1),
            '2' | '@' => Some(2),
            '3' | '#' => Some(3),
            _ => None,
        }
    } else {
        None
    }
}

/// Check if the key event is a shifted symbol (!, @, #).
pub fn is_shifted_symbol(key: &KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('!') | KeyCode::Char('@') | KeyCode::Char('#')
    )
}

/// Actions derived from key events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationAction {
    Up,
    Down,
    Enter,
    Back,
    TogglePause,
    Stop,
    NextTrack,
    PreviousTrack,
    SeekForward,
    SeekBackward,
    VolumeUp,
    VolumeDown,
    CycleStyle,
    ToggleFullscreen,
    Quit,
    ToggleSection(usize),
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: &KeyEvent) -> NavigationAction {
    if let Some(d) = map_key_to_digit(key) {
        if key.modifiers.contains(KeyModifiers::SHIFT) || is_shifted_symbol(key) {
            return NavigationAction::ToggleSection(d);
        }
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return NavigationAction::Quit;
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
        KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
        KeyCode::Enter | KeyCode::Right => NavigationAction::Enter,
        KeyCode::Left | KeyCode::Backspace => NavigationAction::Back,
        KeyCode::Char(' ') => NavigationAction::TogglePause,
        KeyCode::Char('s') => NavigationAction::Stop,
        KeyCode::Char('n') | KeyCode::Char('>') => NavigationAction::NextTrack,
        KeyCode::Char('p') | KeyCode::Char('<') => NavigationAction::PreviousTrack,
        KeyCode::Char(']') => NavigationAction::SeekForward,
        KeyCode::Char('[') => NavigationAction::SeekBackward,
        KeyCode::Char('+') | KeyCode::Char('=') => NavigationAction::VolumeUp,
        KeyCode::Char('-') => NavigationAction::VolumeDown,
        KeyCode::Char('v') => NavigationAction::CycleStyle,
        KeyCode::Char('f') => NavigationAction::ToggleFullscreen,
        KeyCode::Char('q') | KeyCode::Esc => NavigationAction::Quit,
        _ => NavigationAction::None,
    }
}
