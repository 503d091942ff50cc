use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let status_text = if let Some(msg) = app.host.status() {
            format!(" {}", msg)
        } else {
            let section = app.current_section().unwrap_or("-");
            let max = app.host.max_scroll_px();
            let percent = if max > 0.0 {
                (app.host.scroll_top_px() / max * 100.0).round() as u32
            } else {
                100
            };
            let focus = app
                .focused()
                .and_then(|id| app.page().element(id))
                .map(|e| format!(" | > {}", e.text))
                .unwrap_or_default();
            format!(" {} | {} | {}%{}", app.page().title, section, percent, focus)
        };

        let help_hint = " q:quit j/k:scroll Tab:focus Enter:open A-1..4:jump ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
