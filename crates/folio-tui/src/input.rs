use crossterm::event::KeyEvent;

use crate::app::App;
use crate::keymap::KeyBinding;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    /// Index into the page's section shortcut list
    JumpToSection(usize),
    FocusNext,
    FocusPrev,
    /// Click the focused element
    Activate,
    Dismiss,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    let binding = KeyBinding::from(key);

    if app.keymap.is_g_prefix(&binding) {
        return if app.pending_key == Some('g') {
            app.keymap
                .get_pending_g_action()
                .cloned()
                .unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    app.keymap.lookup(key).unwrap_or(Action::None)
}
