use folio_core::page::Element;
use folio_core::{ElementId, ElementKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::layout::DocRect;

pub struct PageWidget;

/// Screen placement of a document rectangle: the clipped area and the number
/// of rows cut off at its top
fn project(area: Rect, rect: DocRect, scroll: u32) -> Option<(Rect, u16)> {
    let top = rect.y as i64 - scroll as i64;
    let bottom = top + rect.height as i64;
    let visible_top = top.max(0);
    let visible_bottom = bottom.min(area.height as i64);
    if visible_bottom <= visible_top || rect.x >= area.width {
        return None;
    }

    let width = rect.width.min(area.width - rect.x);
    let clipped = Rect::new(
        area.x + rect.x,
        area.y + visible_top as u16,
        width,
        (visible_bottom - visible_top) as u16,
    );
    Some((clipped, (visible_top - top) as u16))
}

/// Pixel translation rounded to whole rows
fn shift_rows(translate_y: f64, px_per_row: f64) -> i64 {
    (translate_y / px_per_row).round() as i64
}

/// Dotted backdrop; `phase` moves the pattern vertically
fn pattern_lines(width: u16, height: u16, phase: i64, glyph: char) -> Vec<Line<'static>> {
    (0..height as i64)
        .map(|row| {
            let line: String = (0..width as i64)
                .map(|col| {
                    if (col + 3 * (row + phase)).rem_euclid(12) == 0 {
                        glyph
                    } else {
                        ' '
                    }
                })
                .collect();
            Line::from(line)
        })
        .collect()
}

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let background = Block::default().style(Style::default().bg(app.theme.bg0));
        frame.render_widget(background, area);

        let scroll = app.host.scroll_top_rows();
        for element in app.page().elements() {
            if Self::is_hidden(app, element.id) {
                continue;
            }
            let Some(rect) = app.host.layout().rect(element.id) else {
                continue;
            };
            Self::render_element(frame, area, app, element, rect, scroll);
        }
    }

    /// Inside a revealable element that has not been revealed yet
    fn is_hidden(app: &App, id: ElementId) -> bool {
        let page = app.page();
        let controller = app.runtime.controller();
        let mut current = page.element(id);
        while let Some(element) = current {
            if controller.is_observed(element.id) && !controller.is_revealed(element.id) {
                return true;
            }
            current = element.parent.and_then(|p| page.element(p));
        }
        app.runtime.presentation().style(id).removed
    }

    fn render_element(
        frame: &mut Frame,
        area: Rect,
        app: &App,
        element: &Element,
        rect: DocRect,
        scroll: u32,
    ) {
        let theme = &app.theme;
        let style = app.runtime.presentation().style(element.id);
        let px_per_row = app.host.px_per_row();
        let focused = app.focused() == Some(element.id);

        match element.kind {
            ElementKind::HeroBackground => {
                // The layer is clipped to the hero even when translated
                let Some((clip, skip)) = project(area, rect, scroll) else {
                    return;
                };
                let phase = skip as i64 - shift_rows(style.translate_y, px_per_row);
                let lines = pattern_lines(clip.width, clip.height, phase, '·');
                let paragraph = Paragraph::new(lines)
                    .style(Style::default().fg(theme.muted).bg(theme.bg1));
                frame.render_widget(paragraph, clip);
            }
            ElementKind::HeroTitle => {
                let Some((clip, skip)) = project(area, rect, scroll) else {
                    return;
                };
                let mut title = app.runtime.presentation().text(element.id, &element.text).to_string();
                if app.runtime.is_typing() {
                    title.push('▌');
                }
                let lines = vec![
                    Line::from(Span::styled(
                        title,
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(element.detail.clone(), Style::default().fg(theme.fg1))),
                ];
                let paragraph = Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .scroll((skip, 0))
                    .style(Style::default().bg(theme.bg1));
                frame.render_widget(paragraph, clip);
            }
            ElementKind::ScrollIndicator => {
                if style.opacity <= 0.0 {
                    return;
                }
                let Some((clip, _)) = project(area, rect, scroll) else {
                    return;
                };
                let mut text_style = Style::default().fg(theme.muted).bg(theme.bg1);
                if focused {
                    text_style = text_style.fg(theme.focus).add_modifier(Modifier::REVERSED);
                }
                let paragraph = Paragraph::new(format!("▼ {} ▼", element.text))
                    .alignment(Alignment::Center)
                    .style(text_style);
                frame.render_widget(paragraph, clip);
            }
            ElementKind::SectionHeader => {
                let Some((clip, skip)) = project(area, rect, scroll) else {
                    return;
                };
                let lines = vec![
                    Line::from(Span::styled(
                        element.text.clone(),
                        Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(element.detail.clone(), Style::default().fg(theme.muted))),
                ];
                frame.render_widget(Paragraph::new(lines).scroll((skip, 0)), clip);
            }
            ElementKind::ServiceCard | ElementKind::ContactCard | ElementKind::PortfolioCard => {
                let Some((clip, skip)) = project(area, rect, scroll) else {
                    return;
                };
                let hovered = app.runtime.hovered() == Some(element.id);
                let border_style = if hovered {
                    Style::default().fg(theme.highlight)
                } else {
                    Style::default().fg(theme.muted)
                };
                let mut borders = Borders::ALL;
                if skip > 0 {
                    borders.remove(Borders::TOP);
                }
                let mut block = Block::default()
                    .borders(borders)
                    .border_style(border_style)
                    .style(Style::default().bg(theme.bg0));
                if skip == 0 {
                    block = block.title(Span::styled(
                        format!(" {} ", element.text),
                        Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
                    ));
                }

                // Portfolio card bodies live in the overlay
                let body = if element.kind == ElementKind::PortfolioCard {
                    String::new()
                } else {
                    element.detail.clone()
                };
                let paragraph = Paragraph::new(body)
                    .style(Style::default().fg(theme.fg1))
                    .wrap(Wrap { trim: true })
                    .scroll((skip.saturating_sub(1), 0))
                    .block(block);
                frame.render_widget(paragraph, clip);
            }
            ElementKind::PortfolioImage => {
                let Some((clip, skip)) = project(area, rect, scroll) else {
                    return;
                };
                // Zoomed images render denser
                let glyph = if style.scale > 1.0 { '▓' } else { '░' };
                let lines = pattern_lines(clip.width, clip.height, skip as i64, glyph);
                let paragraph = Paragraph::new(lines).style(Style::default().fg(theme.accent));
                frame.render_widget(paragraph, clip);
            }
            ElementKind::PortfolioOverlay => {
                if style.opacity <= 0.0 {
                    return;
                }
                let Some((clip, skip)) = project(area, rect, scroll) else {
                    return;
                };
                let pad = (rect.height.saturating_sub(1) / 2) as usize;
                let mut lines = vec![Line::default(); pad];
                lines.push(Line::from(element.text.clone()));
                let paragraph = Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .scroll((skip, 0))
                    .style(Style::default().fg(theme.bg0).bg(theme.highlight));
                frame.render_widget(paragraph, clip);
            }
            ElementKind::PortfolioActions => {}
            ElementKind::Button => {
                if let Some(actions) = element.parent {
                    let offset = app.runtime.presentation().style(actions).translate_y;
                    // Slid out of the card until hovered
                    if shift_rows(offset, px_per_row) != 0 {
                        return;
                    }
                }
                let Some((clip, _)) = project(area, rect, scroll) else {
                    return;
                };
                let mut button_style = Style::default().fg(theme.bg0).bg(theme.accent);
                if style.scale < 1.0 {
                    button_style = button_style.bg(theme.highlight);
                }
                if focused {
                    button_style = button_style.bg(theme.focus).add_modifier(Modifier::BOLD);
                }
                let label = format!("[ {} ]", element.text);
                frame.render_widget(Paragraph::new(label).style(button_style), clip);
            }
            ElementKind::Link => {
                let Some((clip, _)) = project(area, rect, scroll) else {
                    return;
                };
                let mut link_style = Style::default()
                    .fg(theme.link)
                    .add_modifier(Modifier::UNDERLINED);
                if focused {
                    link_style = link_style.fg(theme.focus).add_modifier(Modifier::REVERSED);
                }
                frame.render_widget(Paragraph::new(element.text.clone()).style(link_style), clip);
            }
            // Drawn as an overlay by LoaderWidget
            ElementKind::Loader => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_clips_top_and_bottom() {
        let area = Rect::new(0, 0, 80, 20);
        let rect = DocRect::new(2, 10, 30, 6);

        assert_eq!(project(area, rect, 0), Some((Rect::new(2, 10, 30, 6), 0)));
        assert_eq!(project(area, rect, 12), Some((Rect::new(2, 0, 30, 4), 2)));
        assert_eq!(project(area, rect, 16), None);

        let low = DocRect::new(2, 16, 30, 6);
        assert_eq!(project(area, low, 0), Some((Rect::new(2, 16, 30, 4), 0)));
        assert_eq!(project(area, DocRect::new(2, 22, 30, 6), 0), None);
    }

    #[test]
    fn test_shift_rows() {
        assert_eq!(shift_rows(-120.0, 16.0), -8);
        assert_eq!(shift_rows(16.0, 16.0), 1);
        assert_eq!(shift_rows(0.0, 16.0), 0);
    }

    #[test]
    fn test_pattern_phase_moves_rows() {
        let a = pattern_lines(12, 4, 0, '·');
        let b = pattern_lines(12, 4, 1, '·');
        assert_eq!(a[1], b[0]);
    }
}
