use folio_core::ElementKind;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use crate::app::App;

/// Full-screen cover shown until the page reports it has loaded
pub struct LoaderWidget;

impl LoaderWidget {
    /// Whether the loader still covers the page
    pub fn is_visible(app: &App) -> bool {
        app.page()
            .first_of_kind(ElementKind::Loader)
            .map(|id| app.runtime.presentation().style(id))
            .is_some_and(|style| !style.removed && style.opacity > 0.0)
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if !Self::is_visible(app) {
            return;
        }
        let theme = &app.theme;

        frame.render_widget(Clear, area);
        let middle = Rect {
            y: area.y + area.height / 2,
            height: 1.min(area.height),
            ..area
        };
        let paragraph = Paragraph::new("Loading…")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), area);
        frame.render_widget(paragraph, middle);
    }
}
