use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::warn;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// No input within the tick rate
    Tick,
}

/// Convert a raw terminal event, dropping the ones the page ignores
pub fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Only handle key press events, ignore release and repeat
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Option<AppEvent>> {
        if event::poll(self.tick_rate)? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }

    /// Read terminal input on a blocking thread and forward it to `tx`.
    /// The reader stops once the receiving side is dropped.
    pub fn spawn(self, tx: UnboundedSender<AppEvent>) -> JoinHandle<()> {
        tokio::task::spawn_blocking(move || loop {
            match self.next() {
                Ok(Some(event)) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    if tx.is_closed() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Terminal input error: {}", e);
                    break;
                }
            }
        })
    }
}

/// Fixed-rate ticker that services frame requests and scroll animation
pub struct FrameClock {
    interval: Interval,
}

impl FrameClock {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    pub async fn tick(&mut self) -> std::time::Instant {
        self.interval.tick().await.into_std()
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}
