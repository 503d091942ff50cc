//! Document layout in terminal cells
//!
//! Places every element of a page on a single scrolling column of rows.
//! Rows are document rows (not screen rows); the renderer subtracts the
//! scroll offset.

use std::collections::HashMap;

use folio_core::page::{Element, Section, SectionLayout};
use folio_core::{ElementId, ElementKind, Page};
use unicode_width::UnicodeWidthStr;

const HERO_MIN_ROWS: u32 = 14;
const SECTION_PADDING: u32 = 1;
const HEADER_ROWS: u32 = 2;
const MARGIN_COLS: u16 = 2;
const GAP_COLS: u16 = 2;
const GAP_ROWS: u32 = 1;
const BUTTON_GAP_COLS: u16 = 2;
const INDICATOR_COLS: u16 = 12;
const PORTFOLIO_IMAGE_ROWS: u32 = 5;

/// Rectangle in document cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocRect {
    pub x: u16,
    pub y: u32,
    pub width: u16,
    pub height: u32,
}

impl DocRect {
    pub fn new(x: u16, y: u32, width: u16, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, col: u16, row: u32) -> bool {
        col >= self.x
            && (col as u32) < self.x as u32 + self.width as u32
            && row >= self.y
            && row < self.bottom()
    }

    fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Width in cells of a rendered button label ("[ label ]")
pub fn button_width(label: &str) -> u16 {
    (label.width() as u16).saturating_add(4)
}

fn card_rows(layout: SectionLayout) -> u32 {
    match layout {
        SectionLayout::Portfolio => 10,
        SectionLayout::Contact => 6,
        SectionLayout::Services | SectionLayout::Hero => 6,
    }
}

/// Number of card columns that fit the terminal width
pub fn grid_columns(width: u16) -> u16 {
    if width >= 110 {
        3
    } else if width >= 70 {
        2
    } else {
        1
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    width: u16,
    viewport_rows: u16,
    rects: HashMap<ElementId, DocRect>,
    total_rows: u32,
}

impl DocumentLayout {
    pub fn compute(page: &Page, width: u16, viewport_rows: u16) -> Self {
        let mut layout = Self {
            width,
            viewport_rows,
            rects: HashMap::new(),
            total_rows: 0,
        };

        let mut y = 0u32;
        for (index, section) in page.sections().iter().enumerate() {
            let elements: Vec<&Element> = page
                .elements()
                .iter()
                .filter(|e| e.section == index && e.kind != ElementKind::Loader)
                .collect();
            y = match section.layout {
                SectionLayout::Hero => layout.place_hero(&elements, y),
                _ => layout.place_section(page, section, &elements, y),
            };
        }

        layout.total_rows = y;
        layout
    }

    fn place_hero(&mut self, elements: &[&Element], top: u32) -> u32 {
        let height = (self.viewport_rows as u32).max(HERO_MIN_ROWS);
        let middle = top + height / 2;
        let buttons: Vec<&&Element> = elements
            .iter()
            .filter(|e| e.kind == ElementKind::Button)
            .collect();

        for element in elements {
            let rect = match element.kind {
                ElementKind::HeroBackground => DocRect::new(0, top, self.width, height),
                ElementKind::HeroTitle => DocRect::new(0, middle.saturating_sub(3), self.width, 2),
                ElementKind::ScrollIndicator => DocRect::new(
                    self.width.saturating_sub(INDICATOR_COLS) / 2,
                    top + height - 2,
                    INDICATOR_COLS.min(self.width),
                    1,
                ),
                _ => continue,
            };
            self.rects.insert(element.id, rect);
        }

        let total: u16 = buttons
            .iter()
            .map(|b| button_width(&b.text))
            .sum::<u16>()
            + BUTTON_GAP_COLS * (buttons.len().saturating_sub(1) as u16);
        let mut x = self.width.saturating_sub(total) / 2;
        for button in buttons {
            let w = button_width(&button.text);
            self.rects.insert(button.id, DocRect::new(x, middle, w, 1));
            x = x.saturating_add(w + BUTTON_GAP_COLS);
        }

        top + height
    }

    fn place_section(
        &mut self,
        page: &Page,
        section: &Section,
        elements: &[&Element],
        top: u32,
    ) -> u32 {
        let inner_width = self.width.saturating_sub(MARGIN_COLS * 2).max(1);
        let mut y = top + SECTION_PADDING;

        self.rects.insert(
            section.anchor,
            DocRect::new(MARGIN_COLS, y, inner_width, HEADER_ROWS),
        );
        y += HEADER_ROWS + 1;

        let cards: Vec<&&Element> = elements
            .iter()
            .filter(|e| {
                matches!(
                    e.kind,
                    ElementKind::ServiceCard | ElementKind::PortfolioCard | ElementKind::ContactCard
                )
            })
            .collect();

        let columns = grid_columns(self.width);
        let card_width = (inner_width.saturating_sub(GAP_COLS * (columns - 1)) / columns).max(1);
        let card_height = card_rows(section.layout);

        for (i, card) in cards.iter().enumerate() {
            let col = i as u16 % columns;
            let row = i as u32 / columns as u32;
            let rect = DocRect::new(
                MARGIN_COLS + col * (card_width + GAP_COLS),
                y + row * (card_height + GAP_ROWS),
                card_width,
                card_height,
            );
            self.rects.insert(card.id, rect);
            self.place_card_children(page, card.id, rect);
        }

        let grid_rows = (cards.len() as u32).div_ceil(columns as u32);
        y += grid_rows * (card_height + GAP_ROWS);

        // Section-level buttons sit on one row under the grid
        let mut x = MARGIN_COLS;
        let mut has_buttons = false;
        for button in elements
            .iter()
            .filter(|e| e.kind == ElementKind::Button && e.parent.is_none())
        {
            let w = button_width(&button.text);
            self.rects.insert(button.id, DocRect::new(x, y, w, 1));
            x = x.saturating_add(w + BUTTON_GAP_COLS);
            has_buttons = true;
        }
        if has_buttons {
            y += 2;
        }

        y + SECTION_PADDING
    }

    fn place_card_children(&mut self, page: &Page, card: ElementId, rect: DocRect) {
        let inner_x = rect.x + 1;
        let inner_width = rect.width.saturating_sub(2);

        for child in page.children(card) {
            match child.kind {
                ElementKind::PortfolioImage | ElementKind::PortfolioOverlay => {
                    self.rects.insert(
                        child.id,
                        DocRect::new(inner_x, rect.y + 1, inner_width, PORTFOLIO_IMAGE_ROWS),
                    );
                }
                ElementKind::PortfolioActions => {
                    let row = rect.bottom() - 2;
                    self.rects
                        .insert(child.id, DocRect::new(inner_x, row, inner_width, 1));
                    let mut x = inner_x + 1;
                    for button in page.children(child.id) {
                        let w = button_width(&button.text);
                        self.rects.insert(button.id, DocRect::new(x, row, w, 1));
                        x = x.saturating_add(w + BUTTON_GAP_COLS);
                    }
                }
                ElementKind::Link => {
                    let w = (child.text.width() as u16).min(inner_width.saturating_sub(2));
                    self.rects
                        .insert(child.id, DocRect::new(inner_x + 1, rect.bottom() - 2, w, 1));
                }
                _ => {}
            }
        }
    }

    pub fn rect(&self, id: ElementId) -> Option<DocRect> {
        self.rects.get(&id).copied()
    }

    pub fn total_rows(&self) -> u32 {
        self.total_rows
    }

    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn max_scroll_rows(&self) -> u32 {
        self.total_rows.saturating_sub(self.viewport_rows as u32)
    }

    /// Smallest element containing the cell
    pub fn hit_test(&self, col: u16, row: u32) -> Option<ElementId> {
        self.rects
            .iter()
            .filter(|(_, rect)| rect.contains(col, row))
            .min_by_key(|(id, rect)| (rect.area(), std::cmp::Reverse(**id)))
            .map(|(id, _)| *id)
    }

    /// Section whose anchor is the last one at or above `row`
    pub fn section_at<'a>(&self, page: &'a Page, row: u32) -> Option<&'a Section> {
        page.sections()
            .iter()
            .filter(|s| self.rect(s.anchor).is_some_and(|r| r.y <= row))
            .last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_stack_in_order() {
        let page = Page::builtin();
        let layout = DocumentLayout::compute(&page, 120, 30);

        let tops: Vec<u32> = page
            .sections()
            .iter()
            .map(|s| layout.rect(s.anchor).unwrap().y)
            .collect();
        assert_eq!(tops[0], 0);
        assert!(tops.windows(2).all(|w| w[0] < w[1]));
        assert!(layout.total_rows() > tops[3]);
    }

    #[test]
    fn test_hero_fills_viewport() {
        let page = Page::builtin();
        let layout = DocumentLayout::compute(&page, 80, 40);
        let background = page.first_of_kind(ElementKind::HeroBackground).unwrap();
        assert_eq!(layout.rect(background).unwrap().height, 40);

        let small = DocumentLayout::compute(&page, 80, 5);
        assert_eq!(small.rect(background).unwrap().height, HERO_MIN_ROWS);
    }

    #[test]
    fn test_cards_wrap_into_columns() {
        let page = Page::builtin();
        let layout = DocumentLayout::compute(&page, 120, 30);
        let cards: Vec<DocRect> = page
            .by_kind(ElementKind::PortfolioCard)
            .map(|e| layout.rect(e.id).unwrap())
            .collect();

        // Three columns: the fourth card starts a new row
        assert_eq!(cards[0].y, cards[2].y);
        assert!(cards[3].y > cards[0].y);
        assert_eq!(cards[3].x, cards[0].x);

        let narrow = DocumentLayout::compute(&page, 50, 30);
        let first = narrow.rect(page.first_of_kind(ElementKind::PortfolioCard).unwrap());
        assert_eq!(grid_columns(50), 1);
        assert_eq!(first.unwrap().width, 46);
    }

    #[test]
    fn test_hit_test_prefers_smallest() {
        let page = Page::builtin();
        let layout = DocumentLayout::compute(&page, 120, 30);
        let card = page.first_of_kind(ElementKind::PortfolioCard).unwrap();
        let actions = page.child_of_kind(card, ElementKind::PortfolioActions).unwrap();
        let button = page.children(actions).next().unwrap().id;
        let rect = layout.rect(button).unwrap();

        assert_eq!(layout.hit_test(rect.x, rect.y), Some(button));

        let card_rect = layout.rect(card).unwrap();
        assert_eq!(layout.hit_test(card_rect.x, card_rect.y), Some(card));
    }

    #[test]
    fn test_section_at() {
        let page = Page::builtin();
        let layout = DocumentLayout::compute(&page, 120, 30);
        assert_eq!(layout.section_at(&page, 0).unwrap().id, "hero");

        let contact_top = layout.rect(page.section_anchor("contact").unwrap()).unwrap().y;
        assert_eq!(layout.section_at(&page, contact_top).unwrap().id, "contact");
        assert_eq!(layout.section_at(&page, contact_top - 1).unwrap().id, "portfolio");
    }
}
