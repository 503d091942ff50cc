//! Page runtime: owns the controller, the presentation state and the effect
//! timers, and consumes typed page events one handler per event kind.

use std::time::{Duration, Instant};

use tracing::info;

use crate::config::{AppConfig, EffectsConfig, TypingConfig};
use crate::controller::{FrameScheduler, IntersectionEvent, ScrollController, VisibilitySubscription};
use crate::effects::{self, route_click, ClickAction, LinkKind, Shortcut, Typewriter};
use crate::navigation::{scroll_to_section, ScrollHost};
use crate::page::{ElementId, ElementKind, Page, REVEAL_KINDS};
use crate::presentation::Presentation;
use crate::schedule::TimerQueue;

/// Events produced by the host and consumed by [`PageRuntime::handle`]
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Every resource finished loading
    Loaded,
    Intersection(IntersectionEvent),
    Scroll { scroll_top: f64 },
    /// The frame requested through [`FrameScheduler`] is about to paint
    Frame,
    HoverEnter(ElementId),
    HoverLeave(ElementId),
    Click(ElementId),
    Shortcut(Shortcut),
}

/// Host facility that follows a link outside the page
pub trait LinkHost {
    fn follow_link(&mut self, href: &str);
}

/// Everything the runtime needs from its host
pub trait PageHost: FrameScheduler + ScrollHost + LinkHost {}

impl<T: FrameScheduler + ScrollHost + LinkHost + ?Sized> PageHost for T {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EffectTask {
    Release(ElementId),
    TypeNext,
    RemoveLoader(ElementId),
}

pub struct PageRuntime {
    page: Page,
    effects: EffectsConfig,
    presentation: Presentation,
    controller: ScrollController,
    timers: TimerQueue<EffectTask>,
    typewriter: Option<Typewriter>,
    hovered: Option<ElementId>,
}

impl PageRuntime {
    pub fn new(page: Page, config: &AppConfig) -> Self {
        let effects = config.effects.clone();
        let presentation = Presentation::for_page(&page, &effects);
        let controller = ScrollController::for_page(&page, &effects);
        Self {
            page,
            effects,
            presentation,
            controller,
            timers: TimerQueue::new(),
            typewriter: None,
            hovered: None,
        }
    }

    /// Document-ready wiring: observe reveal targets and start the typing
    /// effect on wide viewports
    pub fn init<V>(&mut self, viewport_width_px: f64, now: Instant, visibility: &mut V)
    where
        V: VisibilitySubscription + ?Sized,
    {
        let targets = self.page.select(&REVEAL_KINDS);
        self.controller.register_for_reveal(targets, visibility);

        let typing: &TypingConfig = &self.effects.typing;
        self.typewriter =
            Typewriter::start(&self.page, &mut self.presentation, viewport_width_px, typing);
        if self.typewriter.is_some() {
            self.timers.schedule(
                now + Duration::from_millis(typing.start_delay_ms),
                EffectTask::TypeNext,
            );
        }

        info!(
            sections = self.page.sections().len(),
            elements = self.page.elements().len(),
            "Page initialized"
        );
    }

    /// Dispatch one event. Returns whether the presentation may have changed.
    pub fn handle<H>(&mut self, event: PageEvent, now: Instant, host: &mut H) -> bool
    where
        H: PageHost + ?Sized,
    {
        match event {
            PageEvent::Loaded => self.on_loaded(now),
            PageEvent::Intersection(event) => {
                self.controller.on_intersection(event, &mut self.presentation)
            }
            PageEvent::Scroll { scroll_top } => {
                self.controller.on_scroll(scroll_top, host);
                false
            }
            PageEvent::Frame => self.controller.on_frame(&mut self.presentation),
            PageEvent::HoverEnter(card) => self.on_hover_enter(card),
            PageEvent::HoverLeave(card) => self.on_hover_leave(card),
            PageEvent::Click(element) => self.on_click(element, now, host),
            PageEvent::Shortcut(shortcut) => self.on_shortcut(shortcut, host),
        }
    }

    fn on_loaded(&mut self, now: Instant) -> bool {
        let loader = self.page.first_of_kind(ElementKind::Loader);
        if let Some(loader) = effects::loader::on_loaded(&mut self.presentation, loader) {
            self.timers.schedule(
                now + Duration::from_millis(self.effects.loader_fade_ms),
                EffectTask::RemoveLoader(loader),
            );
        }
        true
    }

    fn on_hover_enter(&mut self, card: ElementId) -> bool {
        if self.hovered == Some(card) {
            return false;
        }
        if let Some(previous) = self.hovered.take() {
            effects::hover::apply_hover(&self.page, &mut self.presentation, previous, false, &self.effects);
        }
        if effects::hover::apply_hover(&self.page, &mut self.presentation, card, true, &self.effects) {
            self.hovered = Some(card);
        }
        true
    }

    fn on_hover_leave(&mut self, card: ElementId) -> bool {
        if self.hovered != Some(card) {
            return false;
        }
        self.hovered = None;
        effects::hover::apply_hover(&self.page, &mut self.presentation, card, false, &self.effects)
    }

    fn on_click<H>(&mut self, element: ElementId, now: Instant, host: &mut H) -> bool
    where
        H: PageHost + ?Sized,
    {
        if !self.presentation.style(element).interactive {
            return false;
        }

        let pressed = effects::press::has_press_affordance(&self.page, element);
        if pressed {
            effects::press::press(&mut self.presentation, element, self.effects.press_scale);
            self.timers.schedule(
                now + Duration::from_millis(self.effects.press_duration_ms),
                EffectTask::Release(element),
            );
        }

        match route_click(&self.page, element) {
            ClickAction::JumpTo(section) => {
                scroll_to_section(&self.page, &section, host);
            }
            ClickAction::PortfolioItem { label } => {
                info!("Portfolio item clicked: {}", label);
            }
            ClickAction::FollowLink { href, kind } => {
                match kind {
                    LinkKind::Email => info!("Email contact initiated"),
                    LinkKind::Instagram => info!("Instagram contact initiated"),
                    LinkKind::Web => {}
                }
                host.follow_link(&href);
            }
            ClickAction::None => {}
        }

        pressed
    }

    fn on_shortcut<H>(&mut self, shortcut: Shortcut, host: &mut H) -> bool
    where
        H: PageHost + ?Sized,
    {
        match shortcut.section_id() {
            Some(section) => {
                scroll_to_section(&self.page, section, host);
            }
            None => info!("Escape pressed"),
        }
        false
    }

    /// Run effect timers due at `now`. Returns whether any ran.
    pub fn run_timers(&mut self, now: Instant) -> bool {
        let due = self.timers.pop_due(now);
        let ran = !due.is_empty();

        for task in due {
            match task {
                EffectTask::Release(button) => {
                    effects::press::release(&mut self.presentation, button);
                }
                EffectTask::RemoveLoader(loader) => {
                    effects::loader::remove(&mut self.presentation, loader);
                }
                EffectTask::TypeNext => {
                    let more = self
                        .typewriter
                        .as_mut()
                        .is_some_and(|writer| writer.step(&mut self.presentation));
                    if more {
                        self.timers.schedule(
                            now + Duration::from_millis(self.effects.typing.char_interval_ms),
                            EffectTask::TypeNext,
                        );
                    }
                }
            }
        }

        ran
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn controller(&self) -> &ScrollController {
        &self.controller
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    /// Whether the typing effect is still appending characters
    pub fn is_typing(&self) -> bool {
        self.typewriter.as_ref().is_some_and(|w| !w.is_done())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{ScrollBehavior, ScrollBlock};

    #[derive(Default)]
    struct FakeHost {
        frames: usize,
        scrolls: Vec<ElementId>,
        links: Vec<String>,
        observed: Vec<ElementId>,
    }

    impl FrameScheduler for FakeHost {
        fn request_frame(&mut self) {
            self.frames += 1;
        }
    }

    impl ScrollHost for FakeHost {
        fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior, block: ScrollBlock) {
            assert_eq!(behavior, ScrollBehavior::Smooth);
            assert_eq!(block, ScrollBlock::Start);
            self.scrolls.push(element);
        }
    }

    impl LinkHost for FakeHost {
        fn follow_link(&mut self, href: &str) {
            self.links.push(href.to_string());
        }
    }

    impl VisibilitySubscription for FakeHost {
        fn observe(&mut self, element: ElementId) {
            self.observed.push(element);
        }
    }

    fn runtime(width: f64) -> (PageRuntime, FakeHost, Instant) {
        let mut runtime = PageRuntime::new(Page::builtin(), &AppConfig::default());
        let mut host = FakeHost::default();
        let now = Instant::now();
        runtime.init(width, now, &mut host);
        (runtime, host, now)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_init_observes_reveal_targets() {
        let (runtime, host, _) = runtime(1024.0);
        assert_eq!(host.observed, runtime.page().select(&REVEAL_KINDS));
    }

    #[test]
    fn test_scroll_burst_requests_one_frame() {
        let (mut runtime, mut host, now) = runtime(1024.0);
        let background = runtime.page().first_of_kind(ElementKind::HeroBackground).unwrap();

        for s in [5.0, 60.0, 180.0] {
            runtime.handle(PageEvent::Scroll { scroll_top: s }, now, &mut host);
        }
        assert_eq!(host.frames, 1);
        assert!(runtime.handle(PageEvent::Frame, now, &mut host));
        assert_eq!(runtime.presentation().style(background).translate_y, -90.0);
    }

    #[test]
    fn test_shortcut_jumps_to_section() {
        let (mut runtime, mut host, now) = runtime(1024.0);
        runtime.handle(PageEvent::Shortcut(Shortcut::JumpToSection(2)), now, &mut host);
        runtime.handle(PageEvent::Shortcut(Shortcut::Dismiss), now, &mut host);
        assert_eq!(host.scrolls, [runtime.page().section_anchor("portfolio").unwrap()]);
    }

    /// Captures formatted log output for assertions
    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_escape_logged_at_info() {
        let (mut runtime, mut host, now) = runtime(1024.0);
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let changed = tracing::subscriber::with_default(subscriber, || {
            runtime.handle(PageEvent::Shortcut(Shortcut::Dismiss), now, &mut host)
        });

        assert!(!changed);
        assert!(host.scrolls.is_empty());
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let line = output.lines().find(|l| l.contains("Escape pressed")).unwrap();
        assert!(line.contains("INFO"));
    }

    #[test]
    fn test_button_press_is_restored() {
        let (mut runtime, mut host, now) = runtime(1024.0);
        let button = runtime.page().first_of_kind(ElementKind::Button).unwrap();

        assert!(runtime.handle(PageEvent::Click(button), now, &mut host));
        assert_eq!(runtime.presentation().style(button).scale, 0.95);
        assert_eq!(host.scrolls, [runtime.page().section_anchor("portfolio").unwrap()]);

        runtime.run_timers(now + ms(149));
        assert_eq!(runtime.presentation().style(button).scale, 0.95);
        runtime.run_timers(now + ms(150));
        assert_eq!(runtime.presentation().style(button).scale, 1.0);
    }

    #[test]
    fn test_hidden_indicator_ignores_clicks() {
        let (mut runtime, mut host, now) = runtime(1024.0);
        let indicator = runtime.page().first_of_kind(ElementKind::ScrollIndicator).unwrap();

        runtime.handle(PageEvent::Scroll { scroll_top: 400.0 }, now, &mut host);
        runtime.handle(PageEvent::Frame, now, &mut host);
        runtime.handle(PageEvent::Click(indicator), now, &mut host);
        assert!(host.scrolls.is_empty());

        runtime.handle(PageEvent::Scroll { scroll_top: 0.0 }, now, &mut host);
        runtime.handle(PageEvent::Frame, now, &mut host);
        runtime.handle(PageEvent::Click(indicator), now, &mut host);
        assert_eq!(host.scrolls, [runtime.page().section_anchor("services").unwrap()]);
    }

    #[test]
    fn test_links_are_followed() {
        let (mut runtime, mut host, now) = runtime(1024.0);
        let links: Vec<ElementId> = runtime.page().by_kind(ElementKind::Link).map(|e| e.id).collect();
        for link in links {
            assert!(!runtime.handle(PageEvent::Click(link), now, &mut host));
        }
        assert_eq!(host.links.len(), 2);
        assert!(host.links[0].starts_with("mailto:"));
    }

    #[test]
    fn test_hover_moves_between_cards() {
        let (mut runtime, mut host, now) = runtime(1024.0);
        let cards: Vec<ElementId> = runtime
            .page()
            .by_kind(ElementKind::PortfolioCard)
            .map(|e| e.id)
            .collect();
        let overlay_of = |rt: &PageRuntime, card| {
            let overlay = rt.page().child_of_kind(card, ElementKind::PortfolioOverlay).unwrap();
            rt.presentation().style(overlay).opacity
        };

        runtime.handle(PageEvent::HoverEnter(cards[0]), now, &mut host);
        assert_eq!(overlay_of(&runtime, cards[0]), 1.0);

        runtime.handle(PageEvent::HoverEnter(cards[1]), now, &mut host);
        assert_eq!(overlay_of(&runtime, cards[0]), 0.0);
        assert_eq!(overlay_of(&runtime, cards[1]), 1.0);
        assert_eq!(runtime.hovered(), Some(cards[1]));

        // Stale leave for a card that is no longer hovered
        assert!(!runtime.handle(PageEvent::HoverLeave(cards[0]), now, &mut host));
        runtime.handle(PageEvent::HoverLeave(cards[1]), now, &mut host);
        assert_eq!(overlay_of(&runtime, cards[1]), 0.0);
        assert_eq!(runtime.hovered(), None);
    }

    #[test]
    fn test_typing_schedule() {
        let (mut runtime, _, now) = runtime(1024.0);
        let title = runtime.page().first_of_kind(ElementKind::HeroTitle).unwrap();
        let full = runtime.page().element(title).unwrap().text.clone();
        let typed = |rt: &PageRuntime| rt.presentation().text(title, &full).to_string();

        assert_eq!(typed(&runtime), "");
        assert_eq!(runtime.next_deadline(), Some(now + ms(500)));

        runtime.run_timers(now + ms(499));
        assert_eq!(typed(&runtime), "");
        runtime.run_timers(now + ms(500));
        assert_eq!(typed(&runtime), full[..1]);
        runtime.run_timers(now + ms(600));
        assert_eq!(typed(&runtime), full[..2]);

        let mut t = now + ms(600);
        while runtime.is_typing() {
            t += ms(100);
            runtime.run_timers(t);
        }
        assert_eq!(typed(&runtime), full);
        assert!(runtime.next_deadline().is_none());
    }

    #[test]
    fn test_narrow_viewport_keeps_title() {
        let (runtime, _, _) = runtime(600.0);
        assert!(!runtime.is_typing());
        assert!(runtime.next_deadline().is_none());
    }

    #[test]
    fn test_loaded_removes_loader_after_fade() {
        let (mut runtime, mut host, now) = runtime(600.0);
        let loader = runtime.page().first_of_kind(ElementKind::Loader).unwrap();

        runtime.handle(PageEvent::Loaded, now, &mut host);
        assert!(runtime.presentation().loaded);
        assert_eq!(runtime.presentation().style(loader).opacity, 0.0);
        assert!(!runtime.presentation().style(loader).removed);

        runtime.run_timers(now + ms(300));
        assert!(runtime.presentation().style(loader).removed);
    }

    #[test]
    fn test_portfolio_button_is_pressed_not_followed() {
        let (mut runtime, mut host, now) = runtime(1024.0);
        let card = runtime.page().first_of_kind(ElementKind::PortfolioCard).unwrap();
        let actions = runtime.page().child_of_kind(card, ElementKind::PortfolioActions).unwrap();
        let button = runtime.page().children(actions).next().unwrap().id;

        assert!(runtime.handle(PageEvent::Click(button), now, &mut host));
        assert!(host.links.is_empty());
        assert!(host.scrolls.is_empty());
    }
}
