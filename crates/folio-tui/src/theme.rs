use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub muted: Color,

    // Semantic colors
    pub accent: Color,
    /// Keyboard focus ring
    pub focus: Color,
    /// Hover overlay and pressed buttons
    pub highlight: Color,
    pub link: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::default_theme()
    }
}
