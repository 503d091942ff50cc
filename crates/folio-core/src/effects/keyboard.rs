//! Keyboard shortcut surface: modifier+digit section jumps and the reserved
//! Escape handler.

/// Jump targets for modifier+1..4, in digit order
pub const SECTION_SHORTCUTS: [&str; 4] = ["hero", "services", "portfolio", "contact"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: KeyInput,
    pub ctrl: bool,
    /// Meta/Alt/Command
    pub meta: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Index into [`SECTION_SHORTCUTS`]
    JumpToSection(usize),
    /// Close open overlays; no overlays exist yet
    Dismiss,
}

impl Shortcut {
    /// Resolve a raw key press. Digits only count with Ctrl or Meta held.
    pub fn from_key(press: KeyPress) -> Option<Self> {
        match press.key {
            KeyInput::Escape => Some(Shortcut::Dismiss),
            KeyInput::Char(c @ '1'..='4') if press.ctrl || press.meta => {
                Some(Shortcut::JumpToSection(c as usize - '1' as usize))
            }
            _ => None,
        }
    }

    pub fn section_id(self) -> Option<&'static str> {
        match self {
            Shortcut::JumpToSection(index) => SECTION_SHORTCUTS.get(index).copied(),
            Shortcut::Dismiss => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: KeyInput, ctrl: bool, meta: bool) -> KeyPress {
        KeyPress { key, ctrl, meta }
    }

    #[test]
    fn test_modifier_digits() {
        assert_eq!(
            Shortcut::from_key(press(KeyInput::Char('1'), true, false)),
            Some(Shortcut::JumpToSection(0))
        );
        assert_eq!(
            Shortcut::from_key(press(KeyInput::Char('4'), false, true))
                .and_then(Shortcut::section_id),
            Some("contact")
        );
        assert_eq!(Shortcut::from_key(press(KeyInput::Char('2'), false, false)), None);
        assert_eq!(Shortcut::from_key(press(KeyInput::Char('5'), true, false)), None);
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            Shortcut::from_key(press(KeyInput::Escape, false, false)),
            Some(Shortcut::Dismiss)
        );
        assert_eq!(Shortcut::Dismiss.section_id(), None);
    }
}
