use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub effects: EffectsConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds when nothing is animating
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Pixel height of one terminal row
    #[serde(default = "default_px_per_row")]
    pub px_per_row: u16,
    /// Pixel width of one terminal column
    #[serde(default = "default_px_per_col")]
    pub px_per_col: u16,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Smooth scrolling configuration
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            px_per_row: default_px_per_row(),
            px_per_col: default_px_per_col(),
            theme: ThemeConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve used by smooth scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate jumps and page scrolls instead of snapping
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default = "default_easing")]
    pub easing: EasingType,
    /// Rows moved per line scroll when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate used while animating (also the frame scheduler rate)
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: default_easing(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Visibility subscription parameters for reveal animations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Fraction of an element's area that must be visible (0.0-1.0)
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,
    /// Pixels cut from the bottom of the viewport before testing visibility
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin_px: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_reveal_threshold(),
            bottom_margin_px: default_bottom_margin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsConfig {
    /// Multiplier applied to the scroll offset for the hero background
    #[serde(default = "default_parallax_rate")]
    pub parallax_rate: f64,
    /// Scroll offset above which the scroll indicator is hidden
    #[serde(default = "default_indicator_hide_after")]
    pub indicator_hide_after_px: f64,
    #[serde(default = "default_hover_scale")]
    pub hover_scale: f64,
    /// Resting offset of the portfolio action row (1rem)
    #[serde(default = "default_actions_offset")]
    pub actions_offset_px: f64,
    #[serde(default = "default_press_scale")]
    pub press_scale: f64,
    #[serde(default = "default_press_duration")]
    pub press_duration_ms: u64,
    #[serde(default = "default_loader_fade")]
    pub loader_fade_ms: u64,
    #[serde(default)]
    pub typing: TypingConfig,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            parallax_rate: default_parallax_rate(),
            indicator_hide_after_px: default_indicator_hide_after(),
            hover_scale: default_hover_scale(),
            actions_offset_px: default_actions_offset(),
            press_scale: default_press_scale(),
            press_duration_ms: default_press_duration(),
            loader_fade_ms: default_loader_fade(),
            typing: TypingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_typing_start_delay")]
    pub start_delay_ms: u64,
    #[serde(default = "default_typing_interval")]
    pub char_interval_ms: u64,
    /// The effect only runs on viewports wider than this
    #[serde(default = "default_typing_min_width")]
    pub min_viewport_width_px: f64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            start_delay_ms: default_typing_start_delay(),
            char_interval_ms: default_typing_interval(),
            min_viewport_width_px: default_typing_min_width(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a bare theme name or a table with 'name' and optional 'colors'
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg0: Option<String>,
    pub bg1: Option<String>,
    pub fg0: Option<String>,
    pub fg1: Option<String>,
    pub accent: Option<String>,
    pub muted: Option<String>,
    pub focus: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "<C-d>" (Ctrl+d), "<A-1>" (Alt+1), "<S-Tab>", "<CR>", "<Esc>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,

    // Scrolling
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,
    /// "gg" is recognised as a two-key sequence
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,

    // Section shortcuts
    #[serde(default = "default_key_section_hero")]
    pub section_hero: String,
    #[serde(default = "default_key_section_services")]
    pub section_services: String,
    #[serde(default = "default_key_section_portfolio")]
    pub section_portfolio: String,
    #[serde(default = "default_key_section_contact")]
    pub section_contact: String,

    // Interactive elements
    #[serde(default = "default_key_focus_next")]
    pub focus_next: String,
    #[serde(default = "default_key_focus_prev")]
    pub focus_prev: String,
    #[serde(default = "default_key_activate")]
    pub activate: String,
    #[serde(default = "default_key_dismiss")]
    pub dismiss: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            section_hero: default_key_section_hero(),
            section_services: default_key_section_services(),
            section_portfolio: default_key_section_portfolio(),
            section_contact: default_key_section_contact(),
            focus_next: default_key_focus_next(),
            focus_prev: default_key_focus_prev(),
            activate: default_key_activate(),
            dismiss: default_key_dismiss(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_scroll_page_down() -> String { "<C-f>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_section_hero() -> String { "<C-1>".to_string() }
fn default_key_section_services() -> String { "<C-2>".to_string() }
fn default_key_section_portfolio() -> String { "<C-3>".to_string() }
fn default_key_section_contact() -> String { "<C-4>".to_string() }
fn default_key_focus_next() -> String { "<Tab>".to_string() }
fn default_key_focus_prev() -> String { "<S-Tab>".to_string() }
fn default_key_activate() -> String { "<CR>".to_string() }
fn default_key_dismiss() -> String { "<Esc>".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_px_per_row() -> u16 {
    16
}

fn default_px_per_col() -> u16 {
    8
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

fn default_animation_duration() -> u64 {
    250
}

fn default_easing() -> EasingType {
    EasingType::Cubic
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_bottom_margin() -> f64 {
    50.0
}

fn default_parallax_rate() -> f64 {
    -0.5
}

fn default_indicator_hide_after() -> f64 {
    100.0
}

fn default_hover_scale() -> f64 {
    1.1
}

fn default_actions_offset() -> f64 {
    16.0 // 1rem
}

fn default_press_scale() -> f64 {
    0.95
}

fn default_press_duration() -> u64 {
    150
}

fn default_loader_fade() -> u64 {
    300
}

fn default_typing_start_delay() -> u64 {
    500
}

fn default_typing_interval() -> u64 {
    100
}

fn default_typing_min_width() -> f64 {
    768.0
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text; missing fields take defaults
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml_string()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }

    /// Get the log file path used while the terminal UI is active
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("folio.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_behaviour() {
        let config = AppConfig::default();
        assert!((config.reveal.threshold - 0.1).abs() < f64::EPSILON);
        assert!((config.reveal.bottom_margin_px - 50.0).abs() < f64::EPSILON);
        assert!((config.effects.parallax_rate + 0.5).abs() < f64::EPSILON);
        assert!((config.effects.indicator_hide_after_px - 100.0).abs() < f64::EPSILON);
        assert_eq!(config.effects.press_duration_ms, 150);
        assert_eq!(config.effects.typing.start_delay_ms, 500);
        assert_eq!(config.effects.typing.char_interval_ms, 100);
        assert_eq!(config.keymap.section_services, "<C-2>");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [ui]
            theme = "nord"

            [ui.scroll]
            easing = "quintic"

            [effects]
            parallax_rate = -0.25
            "#,
        )
        .unwrap();

        assert_eq!(config.ui.theme.name, "nord");
        assert_eq!(config.ui.scroll.easing, EasingType::Quintic);
        assert!(config.ui.scroll.smooth_enabled);
        assert!((config.effects.parallax_rate + 0.25).abs() < f64::EPSILON);
        assert_eq!(config.effects.loader_fade_ms, 300);
        assert_eq!(config.keymap.quit, "q");
    }

    #[test]
    fn test_theme_table_form() {
        let config = AppConfig::from_toml_str(
            r##"
            [ui.theme]
            name = "dracula"
            colors = { accent = "#ff00ff" }
            "##,
        )
        .unwrap();

        assert_eq!(config.ui.theme.name, "dracula");
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#ff00ff"));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let err = AppConfig::from_toml_str("[reveal]\nthreshold = \"lots\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let text = AppConfig::default().to_toml_string().unwrap();
        let parsed = AppConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.keymap.jump_to_top, "gg");
        assert_eq!(parsed.ui.px_per_row, 16);
    }
}
