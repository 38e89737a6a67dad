use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Unified event type consumed by the app loop.
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize).
pub trait EventSource: Send + 'static {
    /// Wait up to `timeout` for an event. `None` means the interval
    /// elapsed quietly and the caller should tick.
    fn next(&mut self, timeout: Duration) -> Option<AppEvent>;
}

/// Production event source polling crossterm on the calling thread.
pub struct CrosstermEventSource;

impl CrosstermEventSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn next(&mut self, timeout: Duration) -> Option<AppEvent> {
        match event::poll(timeout) {
            Ok(true) => match event::read() {
                // Windows terminals also deliver key releases; only
                // presses and repeats drive the app.
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    Some(AppEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => Some(AppEvent::Resize),
                _ => None,
            },
            Ok(false) | Err(_) => None,
        }
    }
}

/// Configurable tick interval.
pub trait Ticker: Send + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Scripted event source for unit and headless integration tests.
/// Yields its queue in order, then times out forever (pure ticks).
pub struct TestEventSource {
    queue: VecDeque<AppEvent>,
}

impl TestEventSource {
    pub fn new(events: impl IntoIterator<Item = AppEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }
}

impl EventSource for TestEventSource {
    fn next(&mut self, _timeout: Duration) -> Option<AppEvent> {
        self.queue.pop_front()
    }
}

/// Advances the application one event or tick at a time.
///
/// Ticks fire on a wall-clock deadline that incoming events cannot
/// defer: each event wait is capped at the time left until the next
/// tick, and a missed deadline is made up before more input is read.
/// Countdowns driven by ticks therefore track wall clock even while
/// the player hammers the keyboard.
pub struct Runner<E: EventSource, T: Ticker> {
    source: E,
    ticker: T,
    next_tick: Instant,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(source: E, ticker: T) -> Self {
        let next_tick = Instant::now() + ticker.interval();
        Self {
            source,
            ticker,
            next_tick,
        }
    }

    /// Returns the next event, or Tick once the deadline passes.
    pub fn step(&mut self) -> AppEvent {
        let now = Instant::now();
        if now >= self.next_tick {
            self.next_tick += self.ticker.interval();
            return AppEvent::Tick;
        }
        match self.source.next(self.next_tick - now) {
            Some(ev) => ev,
            None => {
                self.next_tick = Instant::now() + self.ticker.interval();
                AppEvent::Tick
            }
        }
    }
}
