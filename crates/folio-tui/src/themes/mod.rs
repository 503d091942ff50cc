//! Theme registry and loader
//!
//! A handful of built-in themes plus per-color overrides from config.

mod dracula;
mod gruvbox;
mod nord;

use folio_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;
use tracing::warn;

use crate::theme::Theme;

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

pub(crate) fn default_theme() -> Theme {
    gruvbox::dark()
}

/// Load a theme by name from config
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "gruvbox-dark" | "gruvbox" => gruvbox::dark(),
        "gruvbox-light" => gruvbox::light(),
        "nord" => nord::default(),
        "dracula" => dracula::default(),
        other => {
            warn!("Unknown theme '{}', using gruvbox-dark", other);
            gruvbox::dark()
        }
    };

    apply_overrides(base, &config.colors)
}

/// Apply user color overrides to a base theme
fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots = [
        (&overrides.bg0, &mut theme.bg0),
        (&overrides.bg1, &mut theme.bg1),
        (&overrides.fg0, &mut theme.fg0),
        (&overrides.fg1, &mut theme.fg1),
        (&overrides.accent, &mut theme.accent),
        (&overrides.muted, &mut theme.muted),
        (&overrides.focus, &mut theme.focus),
    ];

    for (hex, slot) in slots {
        let Some(hex) = hex else { continue };
        match parse_hex_color(hex) {
            Some(color) => *slot = color,
            None => warn!("Invalid color override '{}'", hex),
        }
    }

    theme
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["gruvbox-dark", "gruvbox-light", "nord", "dracula"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert!(matches!(parse_hex_color("#ff5500"), Some(Color::Rgb(255, 85, 0))));
        assert!(matches!(parse_hex_color("f50"), Some(Color::Rgb(255, 85, 0))));
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
    }

    #[test]
    fn test_load_theme_default() {
        let theme = load_theme(&ThemeConfig::default());
        assert!(matches!(theme.bg0, Color::Rgb(0x28, 0x28, 0x28)));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "solarized".to_string(),
            ..Default::default()
        };
        assert!(matches!(load_theme(&config).bg0, Color::Rgb(0x28, 0x28, 0x28)));
    }

    #[test]
    fn test_load_theme_with_override() {
        let config = ThemeConfig {
            name: "nord".to_string(),
            colors: ThemeColorOverrides {
                focus: Some("#ff0000".to_string()),
                muted: Some("nope".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.focus, Color::Rgb(255, 0, 0)));
        assert!(matches!(theme.muted, Color::Rgb(0x4c, 0x56, 0x6a)));
    }

    #[test]
    fn test_available_themes_load() {
        for name in available_themes() {
            let config = ThemeConfig {
                name: name.to_string(),
                ..Default::default()
            };
            load_theme(&config);
        }
    }
}
