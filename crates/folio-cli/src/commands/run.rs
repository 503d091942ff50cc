use std::io::{self, Stdout};
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio::time::sleep_until;
use tracing::{debug, info};

use folio_core::{AppConfig, Page, PageEvent};
use folio_tui::scroll::timing::frame_interval;
use folio_tui::widgets::{LoaderWidget, PageWidget, StatusBarWidget};
use folio_tui::{App, AppEvent, EventHandler, FrameClock};

use super::load_page;

pub async fn run(config: AppConfig, page_path: Option<&Path>) -> Result<()> {
    let page = load_page(page_path)?;
    info!("Showing page '{}' ({} sections)", page.title, page.sections().len());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle(page.title.as_str())
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config, page).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    PageWidget::render(frame, chunks[0], app);
    StatusBarWidget::render(frame, chunks[1], app);

    if LoaderWidget::is_visible(app) {
        LoaderWidget::render(frame, frame.area(), app);
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: AppConfig,
    page: Page,
) -> Result<()> {
    let size = terminal.size()?;
    let tick_rate = config.ui.tick_rate_ms;
    let frame_period = frame_interval(config.ui.scroll.animation_fps);

    let mut app = App::new(page, config, size.width, size.height);
    app.init(Instant::now());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let reader = EventHandler::new(tick_rate).spawn(tx);
    let mut clock = FrameClock::new(frame_period);

    terminal.draw(|frame| draw(frame, &app))?;

    // The page lives in memory, so it has finished loading once it is on screen
    app.dispatch(PageEvent::Loaded, Instant::now());
    let mut dirty = true;

    loop {
        let deadline = app.next_deadline();
        let wake_at = deadline
            .map(tokio::time::Instant::from_std)
            .unwrap_or_else(tokio::time::Instant::now);
        let animating = app.is_animating();

        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else {
                    debug!("Input reader stopped");
                    break;
                };
                let now = Instant::now();
                match event {
                    AppEvent::Key(key) => app.handle_key(key, now),
                    AppEvent::Mouse(mouse) => app.handle_mouse(mouse, now),
                    AppEvent::Resize(width, height) => app.on_resize(width, height, now),
                    AppEvent::Tick => {}
                }
                // Settle instant scrolls and hit-test state right away
                app.on_frame_tick(now);
                dirty = true;
            }
            now = clock.tick(), if animating => {
                dirty |= app.on_frame_tick(now);
            }
            _ = sleep_until(wake_at), if deadline.is_some() => {
                dirty |= app.on_frame_tick(Instant::now());
            }
        }

        if app.should_quit {
            break;
        }

        if dirty {
            terminal.draw(|frame| draw(frame, &app))?;
            dirty = false;
        }
    }

    reader.abort();
    Ok(())
}
