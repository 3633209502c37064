use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

/// The two event sources of the main loop, merged into one stream.
pub enum GameEvent {
    Tick,
    Key(KeyEvent),
}

/// Owns the ticker and input threads. Both only enqueue events; the
/// receiving loop is the single mutator of game state.
pub struct EventPump {
    rx: Receiver<GameEvent>,
    tick_ms: Arc<AtomicU64>,
}

impl EventPump {
    pub fn start(tick_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_ms = Arc::new(AtomicU64::new(tick_interval.as_millis() as u64));

        let ticker_tx = tx.clone();
        let ticker_ms = Arc::clone(&tick_ms);
        thread::spawn(move || loop {
            thread::sleep(Duration::from_millis(ticker_ms.load(Ordering::Relaxed)));
            if ticker_tx.send(GameEvent::Tick).is_err() {
                break;
            }
        });

        thread::spawn(move || loop {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(GameEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("input thread stopping: {}", e);
                    break;
                }
            }
        });

        EventPump { rx, tick_ms }
    }

    /// Blocks until the next tick or key press. None means both producer
    /// threads are gone.
    pub fn next(&self) -> Option<GameEvent> {
        self.rx.recv().ok()
    }

    /// The ticker picks up the new interval on its next wakeup.
    pub fn set_tick_interval(&self, interval: Duration) {
        self.tick_ms
            .store(interval.as_millis() as u64, Ordering::Relaxed);
    }
}
