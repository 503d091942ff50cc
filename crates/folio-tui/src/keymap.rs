use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_core::config::KeymapConfig;
use folio_core::effects::{KeyInput, KeyPress, Shortcut};
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }
}

impl From<KeyEvent> for KeyBinding {
    fn from(key: KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

/// Runtime keymap for key-to-action lookup
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Action for the "gg" sequence, if configured
    pending_g_action: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();
        let mut pending_g_action = None;

        let mut add_binding = |key_str: &str, action: Action| {
            if key_str == "gg" {
                pending_g_action = Some(action);
                return;
            }

            if let Some(binding) = parse_key_binding(key_str) {
                if let Some(existing) = bindings.get(&binding) {
                    warn!(
                        "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                        key_str, existing, action
                    );
                } else {
                    bindings.insert(binding, action);
                }
            } else {
                warn!("Invalid key binding: '{}', ignoring", key_str);
            }
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.scroll_down, Action::ScrollDown);
        add_binding(&config.scroll_up, Action::ScrollUp);
        add_binding(&config.scroll_half_down, Action::ScrollHalfPageDown);
        add_binding(&config.scroll_half_up, Action::ScrollHalfPageUp);
        add_binding(&config.scroll_page_down, Action::ScrollPageDown);
        add_binding(&config.scroll_page_up, Action::ScrollPageUp);
        add_binding(&config.jump_to_top, Action::JumpToTop);
        add_binding(&config.jump_to_bottom, Action::JumpToBottom);
        add_binding(&config.section_hero, Action::JumpToSection(0));
        add_binding(&config.section_services, Action::JumpToSection(1));
        add_binding(&config.section_portfolio, Action::JumpToSection(2));
        add_binding(&config.section_contact, Action::JumpToSection(3));
        add_binding(&config.focus_next, Action::FocusNext);
        add_binding(&config.focus_prev, Action::FocusPrev);
        add_binding(&config.activate, Action::Activate);
        add_binding(&config.dismiss, Action::Dismiss);

        // Hardcoded bindings that shouldn't be configurable
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.entry(KeyBinding::simple(KeyCode::Up)).or_insert(Action::ScrollUp);
        bindings.entry(KeyBinding::simple(KeyCode::Down)).or_insert(Action::ScrollDown);
        bindings.entry(KeyBinding::simple(KeyCode::PageUp)).or_insert(Action::ScrollPageUp);
        bindings.entry(KeyBinding::simple(KeyCode::PageDown)).or_insert(Action::ScrollPageDown);
        bindings.entry(KeyBinding::simple(KeyCode::Home)).or_insert(Action::JumpToTop);
        bindings.entry(KeyBinding::simple(KeyCode::End)).or_insert(Action::JumpToBottom);
        // Terminals report Shift+Tab as BackTab
        bindings.entry(KeyBinding::shift(KeyCode::BackTab)).or_insert(Action::FocusPrev);
        bindings.entry(KeyBinding::simple(KeyCode::BackTab)).or_insert(Action::FocusPrev);

        Self {
            bindings,
            pending_g_action,
        }
    }

    /// Get action for a key binding
    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Resolve a key press, falling back to the page's modifier+digit
    /// section shortcuts (most terminals cannot send Ctrl+digit, Alt+digit
    /// arrives instead)
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from(key);
        if let Some(action) = self.bindings.get(&binding) {
            return Some(action.clone());
        }

        // Some terminals omit SHIFT on uppercase letters
        if let KeyCode::Char(c) = key.code {
            if c.is_ascii_uppercase() && !key.modifiers.contains(KeyModifiers::SHIFT) {
                let shifted = KeyBinding::new(key.code, key.modifiers | KeyModifiers::SHIFT);
                if let Some(action) = self.bindings.get(&shifted) {
                    return Some(action.clone());
                }
            }
        }

        match Shortcut::from_key(key_press(key))? {
            Shortcut::JumpToSection(index) => Some(Action::JumpToSection(index)),
            Shortcut::Dismiss => Some(Action::Dismiss),
        }
    }

    /// Check if "gg" sequence is configured
    pub fn has_pending_g(&self) -> bool {
        self.pending_g_action.is_some()
    }

    /// Get the action for completed "gg" sequence
    pub fn get_pending_g_action(&self) -> Option<&Action> {
        self.pending_g_action.as_ref()
    }

    /// Check if a single 'g' press should start a pending sequence
    pub fn is_g_prefix(&self, binding: &KeyBinding) -> bool {
        self.pending_g_action.is_some()
            && binding.code == KeyCode::Char('g')
            && binding.modifiers == KeyModifiers::NONE
    }
}

/// Platform-neutral view of a key press for the page's shortcut surface
pub fn key_press(key: KeyEvent) -> KeyPress {
    let input = match key.code {
        KeyCode::Char(c) => KeyInput::Char(c),
        KeyCode::Esc => KeyInput::Escape,
        _ => KeyInput::Other,
    };
    KeyPress {
        key: input,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        meta: key
            .modifiers
            .intersects(KeyModifiers::ALT | KeyModifiers::META | KeyModifiers::SUPER),
    }
}

/// Parse Vim-style key notation into KeyBinding
/// Supported formats:
/// - Single char: "j", "k", "q", "1", etc.
/// - Uppercase (Shift): "G", "N", etc.
/// - Ctrl: "<C-d>", "<C-1>"
/// - Alt/Meta: "<A-1>", "<M-1>"
/// - Shift: "<S-Tab>"
/// - Special keys: "<CR>", "<Enter>", "<Esc>", "<Tab>", "<Space>", "<Up>", "<Down>", ...
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    if s.len() > 2 && s.starts_with('<') && s.ends_with('>') {
        let inner = &s[1..s.len() - 1];
        return parse_special_key(inner);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_uppercase() {
        return Some(KeyBinding::shift(KeyCode::Char(c)));
    }
    Some(KeyBinding::simple(KeyCode::Char(c)))
}

/// Parse special key notation (content inside <...>)
fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    if let Some(rest) = inner.strip_prefix("C-") {
        return parse_key_name(rest).map(KeyBinding::ctrl);
    }
    if let Some(rest) = inner.strip_prefix("A-").or_else(|| inner.strip_prefix("M-")) {
        return parse_key_name(rest).map(KeyBinding::alt);
    }
    if let Some(rest) = inner.strip_prefix("S-") {
        return parse_key_name(rest).map(KeyBinding::shift);
    }

    parse_key_name(inner).map(KeyBinding::simple)
}

/// Parse a key name (without modifiers)
fn parse_key_name(name: &str) -> Option<KeyCode> {
    match name.to_lowercase().as_str() {
        "cr" | "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "space" | "spc" => Some(KeyCode::Char(' ')),
        "bs" | "backspace" => Some(KeyCode::Backspace),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        _ => {
            // Single character after modifier (e.g., "d" in "<C-d>")
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            Some(KeyCode::Char(c.to_ascii_lowercase()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_keys() {
        assert_eq!(
            parse_key_binding("j"),
            Some(KeyBinding::simple(KeyCode::Char('j')))
        );
        assert_eq!(
            parse_key_binding("G"),
            Some(KeyBinding::shift(KeyCode::Char('G')))
        );
        assert_eq!(parse_key_binding("jk"), None);
        assert_eq!(parse_key_binding(""), None);
    }

    #[test]
    fn test_parse_modifier_keys() {
        assert_eq!(
            parse_key_binding("<C-d>"),
            Some(KeyBinding::ctrl(KeyCode::Char('d')))
        );
        assert_eq!(
            parse_key_binding("<C-1>"),
            Some(KeyBinding::ctrl(KeyCode::Char('1')))
        );
        assert_eq!(
            parse_key_binding("<A-2>"),
            Some(KeyBinding::alt(KeyCode::Char('2')))
        );
        assert_eq!(
            parse_key_binding("<M-3>"),
            Some(KeyBinding::alt(KeyCode::Char('3')))
        );
        assert_eq!(
            parse_key_binding("<S-Tab>"),
            Some(KeyBinding::shift(KeyCode::Tab))
        );
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(
            parse_key_binding("<CR>"),
            Some(KeyBinding::simple(KeyCode::Enter))
        );
        assert_eq!(
            parse_key_binding("<Esc>"),
            Some(KeyBinding::simple(KeyCode::Esc))
        );
        assert_eq!(
            parse_key_binding("<Space>"),
            Some(KeyBinding::simple(KeyCode::Char(' ')))
        );
        assert_eq!(parse_key_binding("<Nope>"), None);
    }

    #[test]
    fn test_keymap_from_config() {
        let keymap = Keymap::default();

        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
        assert_eq!(
            keymap.get(&KeyBinding::ctrl(KeyCode::Char('d'))),
            Some(&Action::ScrollHalfPageDown)
        );
        assert_eq!(
            keymap.get(&KeyBinding::ctrl(KeyCode::Char('3'))),
            Some(&Action::JumpToSection(2))
        );
        assert!(keymap.has_pending_g());
        assert_eq!(keymap.get_pending_g_action(), Some(&Action::JumpToTop));
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            scroll_up: "j".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('j'))),
            Some(&Action::ScrollDown)
        );
    }

    #[test]
    fn test_lookup_alt_digit_falls_back_to_shortcut() {
        let keymap = Keymap::default();
        let alt_two = KeyEvent::new(KeyCode::Char('2'), KeyModifiers::ALT);
        assert_eq!(keymap.lookup(alt_two), Some(Action::JumpToSection(1)));

        let plain_two = KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(keymap.lookup(plain_two), None);
    }

    #[test]
    fn test_lookup_uppercase_without_shift() {
        let keymap = Keymap::default();
        let key = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::NONE);
        assert_eq!(keymap.lookup(key), Some(Action::JumpToBottom));
    }
}
