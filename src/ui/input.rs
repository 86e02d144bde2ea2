//! Input handling for the TUI.
//!
//! This module translates terminal events into application actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Actions that can be performed based on user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Quit the application
    Quit,
    /// Fetch the current window again
    Refresh,
    /// Switch to the next (longer) window preset
    NextWindow,
    /// Switch to the previous (shorter) window preset
    PrevWindow,
    /// Toggle help panel
    ToggleHelp,
    /// No action
    None,
}

/// Translate a terminal event into an application action
pub fn action_for(event: &Event) -> InputAction {
    match event {
        Event::Key(key_event) => map_key_to_action(*key_event),
        _ => InputAction::None,
    }
}

/// Map a key event to an application action
fn map_key_to_action(key_event: KeyEvent) -> InputAction {
    match key_event.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => InputAction::Quit,
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Quit
        }

        // Refresh now
        KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Refresh,

        // Cycle the history window
        KeyCode::Right | KeyCode::Char(']') => InputAction::NextWindow,
        KeyCode::Left | KeyCode::Char('[') => InputAction::PrevWindow,

        // Help
        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::F(1) => {
            InputAction::ToggleHelp
        }

        _ => InputAction::None,
    }
}
