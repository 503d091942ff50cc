use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use folio_core::effects::Shortcut;
use folio_core::schedule::Debounce;
use folio_core::{
    AppConfig, ElementId, ElementKind, Page, PageEvent, PageRuntime, ScrollBehavior, ScrollBlock,
    ScrollHost,
};
use tracing::debug;

use crate::host::TerminalHost;
use crate::input::{handle_key_event, Action};
use crate::keymap::Keymap;
use crate::layout::DocumentLayout;
use crate::theme::Theme;
use crate::themes::load_theme;
use crate::visibility::VisibilityObserver;

/// Quiet period before a terminal resize triggers a relayout
const RESIZE_SETTLE: Duration = Duration::from_millis(50);

type SizeAction = Box<dyn FnMut((u16, u16))>;

/// Rows the page occupies: everything but the status bar
fn page_rows(height: u16) -> u16 {
    height.saturating_sub(1).max(1)
}

/// Application state
pub struct App {
    pub config: AppConfig,
    pub runtime: PageRuntime,
    pub host: TerminalHost,
    pub visibility: VisibilityObserver,
    pub keymap: Keymap,
    pub theme: Theme,
    /// Index into `interactive` of the keyboard-focused element
    pub focus: Option<usize>,
    interactive: Vec<ElementId>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    pub should_quit: bool,
    resize: Debounce<(u16, u16), SizeAction>,
    settled_size: Rc<Cell<Option<(u16, u16)>>>,
    /// Offset last reported to the runtime
    reported_scroll_top: f64,
}

impl App {
    pub fn new(page: Page, config: AppConfig, width: u16, height: u16) -> Self {
        let layout = DocumentLayout::compute(&page, width, page_rows(height));
        let host = TerminalHost::new(&config.ui, layout);
        let visibility = VisibilityObserver::new(&config.reveal);
        let keymap = Keymap::from_config(&config.keymap);
        let theme = load_theme(&config.ui.theme);
        let interactive = page.interactive();
        let runtime = PageRuntime::new(page, &config);

        let settled_size: Rc<Cell<Option<(u16, u16)>>> = Rc::new(Cell::new(None));
        let slot = Rc::clone(&settled_size);
        let resize = Debounce::new(
            RESIZE_SETTLE,
            Box::new(move |size: (u16, u16)| slot.set(Some(size))) as SizeAction,
        );

        Self {
            config,
            runtime,
            host,
            visibility,
            keymap,
            theme,
            focus: None,
            interactive,
            pending_key: None,
            should_quit: false,
            resize,
            settled_size,
            reported_scroll_top: 0.0,
        }
    }

    /// Wire up the page and evaluate the initial viewport
    pub fn init(&mut self, now: Instant) {
        let width_px = self.host.viewport_width_px();
        self.runtime.init(width_px, now, &mut self.visibility);
        // Settle scroll-derived state for the initial offset
        self.reported_scroll_top = self.host.scroll_top_px();
        self.dispatch(PageEvent::Scroll { scroll_top: self.reported_scroll_top }, now);
        self.evaluate_visibility(now);
    }

    pub fn page(&self) -> &Page {
        self.runtime.page()
    }

    /// Send one event to the page runtime
    pub fn dispatch(&mut self, event: PageEvent, now: Instant) -> bool {
        self.host.set_now(now);
        self.runtime.handle(event, now, &mut self.host)
    }

    fn evaluate_visibility(&mut self, now: Instant) -> bool {
        let events = self.visibility.evaluate(
            self.host.layout(),
            self.host.px_per_row(),
            self.host.scroll_top_px(),
            self.host.viewport_height_px(),
        );
        let mut changed = false;
        for event in events {
            changed |= self.dispatch(PageEvent::Intersection(event), now);
        }
        changed
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let action = handle_key_event(key, self);
        if action == Action::PendingG {
            self.pending_key = Some('g');
            return;
        }
        self.pending_key = None;
        self.handle_action(action, now);
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        self.host.set_now(now);
        let lines = self.config.ui.scroll.scroll_lines.max(1) as i64;
        let viewport = self.host.layout().viewport_rows() as i64;

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.host.scroll_rows(lines),
            Action::ScrollUp => self.host.scroll_rows(-lines),
            Action::ScrollHalfPageDown => self.host.scroll_rows((viewport / 2).max(1)),
            Action::ScrollHalfPageUp => self.host.scroll_rows(-(viewport / 2).max(1)),
            Action::ScrollPageDown => self.host.scroll_rows(viewport.max(1)),
            Action::ScrollPageUp => self.host.scroll_rows(-viewport.max(1)),
            Action::JumpToTop => self.host.scroll_to_px(0.0, ScrollBehavior::Smooth),
            Action::JumpToBottom => {
                let max = self.host.max_scroll_px();
                self.host.scroll_to_px(max, ScrollBehavior::Smooth);
            }
            Action::JumpToSection(index) => {
                self.dispatch(PageEvent::Shortcut(Shortcut::JumpToSection(index)), now);
            }
            Action::FocusNext => self.move_focus(true, now),
            Action::FocusPrev => self.move_focus(false, now),
            Action::Activate => {
                if let Some(element) = self.focused() {
                    self.dispatch(PageEvent::Click(element), now);
                }
            }
            Action::Dismiss => {
                self.dispatch(PageEvent::Shortcut(Shortcut::Dismiss), now);
                self.set_focus(None, now);
                self.host.clear_status();
            }
            Action::PendingG | Action::None => {}
        }
    }

    /// Keyboard-focused element, if any
    pub fn focused(&self) -> Option<ElementId> {
        self.focus.and_then(|i| self.interactive.get(i).copied())
    }

    fn is_focusable(&self, element: ElementId) -> bool {
        let style = self.runtime.presentation().style(element);
        style.interactive && !style.removed && self.host.layout().rect(element).is_some()
    }

    fn move_focus(&mut self, forward: bool, now: Instant) {
        let len = self.interactive.len();
        if len == 0 {
            return;
        }

        let mut index = self.focus;
        for _ in 0..len {
            let next = match (index, forward) {
                (None, true) => 0,
                (None, false) => len - 1,
                (Some(i), true) => (i + 1) % len,
                (Some(i), false) => (i + len - 1) % len,
            };
            index = Some(next);
            if self.is_focusable(self.interactive[next]) {
                self.set_focus(index, now);
                return;
            }
        }
    }

    fn set_focus(&mut self, index: Option<usize>, now: Instant) {
        let previous = self.focused();
        self.focus = index;
        let current = self.focused();
        if previous == current {
            return;
        }

        // Focus inside a portfolio card behaves like hovering it
        let card_of = |app: &Self, id: Option<ElementId>| {
            id.and_then(|id| app.page().ancestor_of_kind(id, ElementKind::PortfolioCard))
        };
        let old_card = card_of(self, previous);
        let new_card = card_of(self, current);
        if old_card != new_card {
            if let Some(card) = old_card {
                self.dispatch(PageEvent::HoverLeave(card), now);
            }
            if let Some(card) = new_card {
                self.dispatch(PageEvent::HoverEnter(card), now);
            }
        }

        if let Some(element) = current {
            self.host
                .scroll_into_view(element, ScrollBehavior::Smooth, ScrollBlock::Nearest);
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let lines = self.config.ui.scroll.scroll_lines.max(1) as i64;
        match mouse.kind {
            // The animator batches notches until the next frame
            MouseEventKind::ScrollDown => self.host.scroll_rows(lines),
            MouseEventKind::ScrollUp => self.host.scroll_rows(-lines),
            MouseEventKind::Moved => self.hover_at(mouse.column, mouse.row, now),
            MouseEventKind::Down(MouseButton::Left) => {
                let target = self
                    .element_at(mouse.column, mouse.row)
                    .and_then(|id| self.clickable_ancestor(id));
                if let Some(element) = target {
                    self.dispatch(PageEvent::Click(element), now);
                }
            }
            _ => {}
        }
    }

    /// Element under a screen cell of the page area
    pub fn element_at(&self, column: u16, row: u16) -> Option<ElementId> {
        if row >= self.host.layout().viewport_rows() {
            return None;
        }
        let doc_row = self.host.scroll_top_rows() + row as u32;
        self.host.layout().hit_test(column, doc_row)
    }

    fn clickable_ancestor(&self, id: ElementId) -> Option<ElementId> {
        let mut current = self.page().element(id);
        while let Some(element) = current {
            if element.kind.is_interactive() {
                return Some(element.id);
            }
            current = element.parent.and_then(|p| self.page().element(p));
        }
        None
    }

    fn hover_at(&mut self, column: u16, row: u16, now: Instant) {
        let card = self
            .element_at(column, row)
            .and_then(|id| self.page().ancestor_of_kind(id, ElementKind::PortfolioCard));
        let hovered = self.runtime.hovered();
        if card == hovered {
            return;
        }
        match card {
            Some(card) => {
                self.dispatch(PageEvent::HoverEnter(card), now);
            }
            None => {
                if let Some(previous) = hovered {
                    self.dispatch(PageEvent::HoverLeave(previous), now);
                }
            }
        }
    }

    pub fn on_resize(&mut self, width: u16, height: u16, now: Instant) {
        self.resize.call(now, (width, height));
    }

    fn relayout(&mut self, width: u16, height: u16) {
        debug!(width, height, "relayout");
        let layout = DocumentLayout::compute(self.page(), width, page_rows(height));
        self.host.set_layout(layout);
    }

    /// Advance everything time-driven: settled resizes, scroll animation, the pending page frame and effect timers. Returns whether
    /// the screen needs redrawing.
    pub fn on_frame_tick(&mut self, now: Instant) -> bool {
        let mut dirty = false;
        self.host.set_now(now);

        if self.resize.poll(now) {
            if let Some((width, height)) = self.settled_size.take() {
                self.relayout(width, height);
                dirty = true;
            }
        }

        let layout_changed = dirty;
        let scroll_top = self.host.advance(now);
        if layout_changed || (scroll_top - self.reported_scroll_top).abs() > f64::EPSILON {
            self.reported_scroll_top = scroll_top;
            self.dispatch(PageEvent::Scroll { scroll_top }, now);
            self.evaluate_visibility(now);
            dirty = true;
        }

        if self.host.take_frame_request() {
            dirty |= self.dispatch(PageEvent::Frame, now);
        }

        dirty |= self.runtime.run_timers(now);
        dirty
    }

    /// Whether the next frame tick has work regardless of new input
    pub fn is_animating(&self) -> bool {
        self.host.animator().needs_update() || self.host.frame_requested()
    }

    /// Earliest effect timer or pending resize
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.runtime.next_deadline(), self.resize.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Section under the top of the viewport
    pub fn current_section(&self) -> Option<&str> {
        self.host
            .layout()
            .section_at(self.page(), self.host.scroll_top_rows())
            .map(|s| s.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use folio_core::ScrollConfig;

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.ui.scroll = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        config
    }

    fn app(width: u16, height: u16) -> (App, Instant) {
        let now = Instant::now();
        let mut app = App::new(Page::builtin(), config(), width, height);
        app.host = TerminalHost::new(&app.config.ui, app.host.layout().clone())
            .with_opener(|_| Ok(()));
        app.init(now);
        (app, now)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_gg_jumps_to_top() {
        let (mut app, now) = app(120, 31);
        app.handle_action(Action::ScrollPageDown, now);
        app.on_frame_tick(now);
        assert!(app.host.scroll_top_px() > 0.0);

        app.handle_key(key(KeyCode::Char('g')), now);
        assert_eq!(app.pending_key, Some('g'));
        app.handle_key(key(KeyCode::Char('g')), now);
        assert_eq!(app.pending_key, None);
        assert_eq!(app.host.scroll_top_px(), 0.0);
    }

    #[test]
    fn test_section_shortcut_reveals_cards() {
        let (mut app, now) = app(120, 31);
        let header = app.page().section_anchor("services").unwrap();
        assert!(!app.runtime.presentation().is_revealed(header));

        app.handle_key(KeyEvent::new(KeyCode::Char('2'), KeyModifiers::ALT), now);
        assert!(app.on_frame_tick(now));

        let expected = app.host.layout().rect(header).unwrap().y;
        assert_eq!(app.host.scroll_top_rows(), expected);
        assert!(app.runtime.presentation().is_revealed(header));
        assert_eq!(app.current_section(), Some("services"));
    }

    #[test]
    fn test_scroll_hides_indicator_on_frame() {
        let (mut app, now) = app(120, 31);
        let indicator = app.page().first_of_kind(ElementKind::ScrollIndicator).unwrap();

        // 10 rows * 16px = 160px, past the 100px threshold
        for _ in 0..10 {
            app.handle_action(Action::ScrollDown, now);
        }
        app.on_frame_tick(now);
        assert_eq!(app.runtime.presentation().style(indicator).opacity, 0.0);
        assert!(!app.runtime.presentation().style(indicator).interactive);
    }

    #[test]
    fn test_focus_cycles_and_activates() {
        let (mut app, now) = app(120, 31);
        app.handle_action(Action::FocusNext, now);
        let first = app.focused().unwrap();
        assert_eq!(app.page().element(first).unwrap().kind, ElementKind::Button);

        app.handle_action(Action::FocusPrev, now);
        app.handle_action(Action::FocusNext, now);
        assert_eq!(app.focused(), Some(first));

        app.handle_action(Action::Activate, now);
        app.on_frame_tick(now);
        let portfolio = app.page().section_anchor("portfolio").unwrap();
        assert_eq!(
            app.host.scroll_top_rows(),
            app.host.layout().rect(portfolio).unwrap().y
        );
    }

    #[test]
    fn test_focus_on_portfolio_button_hovers_card() {
        let (mut app, now) = app(120, 31);
        let card = app.page().first_of_kind(ElementKind::PortfolioCard).unwrap();
        while app
            .focused()
            .and_then(|f| app.page().ancestor_of_kind(f, ElementKind::PortfolioCard))
            != Some(card)
        {
            app.handle_action(Action::FocusNext, now);
        }
        assert_eq!(app.runtime.hovered(), Some(card));

        app.handle_action(Action::Dismiss, now);
        assert_eq!(app.focused(), None);
        assert_eq!(app.runtime.hovered(), None);
    }

    #[test]
    fn test_mouse_hover_and_click() {
        let (mut app, now) = app(120, 31);
        let card = app.page().first_of_kind(ElementKind::PortfolioCard).unwrap();
        let anchor = app.page().section_anchor("portfolio").unwrap();
        app.host.scroll_into_view(anchor, ScrollBehavior::Instant, ScrollBlock::Start);
        app.on_frame_tick(now);

        let rect = app.host.layout().rect(card).unwrap();
        let row = (rect.y - app.host.scroll_top_rows()) as u16;
        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            column: rect.x + 1,
            row: row + 1,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(moved, now);
        assert_eq!(app.runtime.hovered(), Some(card));

        let away = MouseEvent { column: 0, row: 0, ..moved };
        app.handle_mouse(away, now);
        assert_eq!(app.runtime.hovered(), None);

        let actions = app.page().child_of_kind(card, ElementKind::PortfolioActions).unwrap();
        let button = app.page().children(actions).next().unwrap().id;
        let button_rect = app.host.layout().rect(button).unwrap();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: button_rect.x,
            row: (button_rect.y - app.host.scroll_top_rows()) as u16,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(click, now);
        assert_eq!(app.runtime.presentation().style(button).scale, 0.95);
    }

    #[test]
    fn test_resize_is_debounced() {
        let (mut app, now) = app(120, 31);
        app.on_resize(80, 25, now);
        app.on_resize(60, 20, now + Duration::from_millis(20));
        assert_eq!(app.next_deadline().map(|d| d > now), Some(true));

        app.on_frame_tick(now + Duration::from_millis(40));
        assert_eq!(app.host.layout().width(), 120);

        app.on_frame_tick(now + Duration::from_millis(70));
        assert_eq!(app.host.layout().width(), 60);
        assert_eq!(app.host.layout().viewport_rows(), 19);
    }

    #[test]
    fn test_wheel_burst_scrolls_every_notch() {
        let (mut app, now) = app(120, 31);
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        for ms in 0..5 {
            app.handle_mouse(wheel, now + Duration::from_millis(ms));
        }
        app.on_frame_tick(now + Duration::from_millis(5));
        assert_eq!(app.host.scroll_top_rows(), 5);

        let up = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            ..wheel
        };
        app.handle_mouse(up, now + Duration::from_millis(6));
        app.handle_mouse(up, now + Duration::from_millis(7));
        app.on_frame_tick(now + Duration::from_millis(8));
        assert_eq!(app.host.scroll_top_rows(), 3);
    }
}
