use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Resize,
}

/// Key presses and resizes matter; releases, repeats, mouse and focus
/// events are dropped before they reach the app.
pub fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(_, _) => Some(Event::Resize),
        _ => None,
    }
}

/// Terminal input and the sampling timer, each pumped by its own task into
/// one channel. Both tasks stop when the handler is dropped.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    input: JoinHandle<()>,
    ticker: JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let input = tokio::spawn(pump_input(tx.clone()));
        let ticker = tokio::spawn(pump_ticks(tx, tick_rate));
        Self { rx, input, ticker }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.input.abort();
        self.ticker.abort();
    }
}

async fn pump_input(tx: UnboundedSender<Event>) {
    let mut reader = EventStream::new();
    while let Some(Ok(raw)) = reader.next().await {
        if let Some(event) = translate(raw)
            && tx.send(event).is_err()
        {
            break;
        }
    }
}

async fn pump_ticks(tx: UnboundedSender<Event>, tick_rate: Duration) {
    let mut interval = tokio::time::interval(tick_rate);
    // skip the immediate first tick; the app samples once on startup
    interval.tick().await;
    loop {
        interval.tick().await;
        if tx.send(Event::Tick).is_err() {
            break;
        }
    }
}
